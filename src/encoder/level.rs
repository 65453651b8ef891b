//! Level encoders.

use std::borrow::Cow;

use tracing::Level;

use super::PrimitiveArrayEncoder;
use crate::color;

/// Renders a record's level.
pub type LevelEncoder = fn(&Level, &mut dyn PrimitiveArrayEncoder);

/// Upper-case, fixed-width, ANSI-colored level name.
///
/// Levels with a table entry are served from the shared label cache; any other
/// level is rendered on the spot with the fallback color.
pub fn color_level_encoder(level: &Level, enc: &mut dyn PrimitiveArrayEncoder) {
    match color::colored_label(level) {
        Cow::Borrowed(label) => enc.append_str(label),
        Cow::Owned(label) => enc.append_string(label),
    }
}

/// Upper-case level name without color.
pub fn capital_level_encoder(level: &Level, enc: &mut dyn PrimitiveArrayEncoder) {
    enc.append_str(level.as_str());
}

pub fn lowercase_level_encoder(level: &Level, enc: &mut dyn PrimitiveArrayEncoder) {
    enc.append_string(level.as_str().to_ascii_lowercase());
}
