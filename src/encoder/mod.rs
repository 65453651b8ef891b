//! Field encoders and the line encoder that drives them.
//!
//! Each entry element (time, level, caller) is rendered by a plain function
//! stored in an [`EncoderConfig`]. The functions append strings to a
//! [`PrimitiveArrayEncoder`]; the [`Encoder`] decides how those elements are
//! joined into an output line.

mod caller;
mod config;
mod format;
mod level;
mod time;

pub use caller::{full_caller_encoder, short_caller_encoder, CallerEncoder, EntryCaller};
pub use config::EncoderConfig;
pub use format::{Encoder, Entry, LogFormat};
pub use level::{
    capital_level_encoder, color_level_encoder, lowercase_level_encoder, LevelEncoder,
};
pub use time::{epoch_time_encoder, layout_time_encoder, TimeEncoder, TIME_LAYOUT};

/// Sink accepting the primitive values produced by a field encoder.
pub trait PrimitiveArrayEncoder {
    fn append_str(&mut self, value: &str);

    fn append_string(&mut self, value: String) {
        self.append_str(&value);
    }
}

/// Each appended value becomes one element.
impl PrimitiveArrayEncoder for Vec<String> {
    fn append_str(&mut self, value: &str) {
        self.push(value.to_owned());
    }

    fn append_string(&mut self, value: String) {
        self.push(value);
    }
}

/// Appended values are concatenated.
impl PrimitiveArrayEncoder for String {
    fn append_str(&mut self, value: &str) {
        self.push_str(value);
    }
}
