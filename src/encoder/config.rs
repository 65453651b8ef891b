//! Encoder configuration.

use std::fmt;

use super::{
    capital_level_encoder, color_level_encoder, epoch_time_encoder, full_caller_encoder,
    layout_time_encoder, lowercase_level_encoder, short_caller_encoder, CallerEncoder,
    LevelEncoder, TimeEncoder,
};

/// Which elements of a record are written, under which keys, and how.
///
/// A `None` key omits the element entirely. Keys only appear in JSON output;
/// console output uses them as on/off switches.
#[derive(Clone)]
pub struct EncoderConfig {
    pub time_key: Option<String>,
    pub level_key: Option<String>,
    pub caller_key: Option<String>,
    pub message_key: Option<String>,
    pub encode_time: TimeEncoder,
    pub encode_level: LevelEncoder,
    pub encode_caller: CallerEncoder,
}

impl EncoderConfig {
    /// Base configuration for machine-oriented output.
    pub fn production() -> Self {
        Self {
            time_key: Some("ts".to_string()),
            level_key: Some("level".to_string()),
            caller_key: Some("caller".to_string()),
            message_key: Some("msg".to_string()),
            encode_time: epoch_time_encoder,
            encode_level: lowercase_level_encoder,
            encode_caller: full_caller_encoder,
        }
    }

    /// Terminal output: no timestamp, colored level, `[file:line]` caller.
    pub fn console() -> Self {
        Self {
            time_key: None,
            encode_level: color_level_encoder,
            encode_caller: short_caller_encoder,
            ..Self::production()
        }
    }

    /// File output: `T` timestamp, plain level, `M` message, no caller.
    pub fn file() -> Self {
        Self {
            time_key: Some("T".to_string()),
            level_key: Some("L".to_string()),
            caller_key: None,
            message_key: Some("M".to_string()),
            encode_time: layout_time_encoder,
            encode_level: capital_level_encoder,
            encode_caller: full_caller_encoder,
        }
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl fmt::Debug for EncoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncoderConfig")
            .field("time_key", &self.time_key)
            .field("level_key", &self.level_key)
            .field("caller_key", &self.caller_key)
            .field("message_key", &self.message_key)
            .finish_non_exhaustive()
    }
}
