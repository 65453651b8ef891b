//! ANSI colors for level labels.
//!
//! The level-to-color table is a constant. The rendered labels derived from
//! it are built once per process and shared by every console logger.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::Level;

/// Foreground colors, numbered by their SGR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 30,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A foreground color with an optional bold/bright modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpec {
    pub color: Color,
    pub bright: bool,
}

impl ColorSpec {
    pub const fn new(color: Color, bright: bool) -> Self {
        Self { color, bright }
    }

    /// Wrap `text` in this color, resetting all attributes afterwards.
    pub fn render(&self, text: &str) -> String {
        if self.bright {
            format!("\x1b[{};1m{}\x1b[0m", self.color.code(), text)
        } else {
            format!("\x1b[{}m{}\x1b[0m", self.color.code(), text)
        }
    }
}

/// Colors for the levels that have a dedicated entry.
pub const LEVEL_COLORS: [(Level, ColorSpec); 4] = [
    (Level::DEBUG, ColorSpec::new(Color::Magenta, false)),
    (Level::INFO, ColorSpec::new(Color::Cyan, false)),
    (Level::WARN, ColorSpec::new(Color::Yellow, false)),
    (Level::ERROR, ColorSpec::new(Color::Red, false)),
];

/// Used for any level missing from [`LEVEL_COLORS`].
pub const UNKNOWN_LEVEL_COLOR: ColorSpec = ColorSpec::new(Color::Red, true);

/// Width every level label is padded to before coloring.
pub const LABEL_WIDTH: usize = 5;

static LEVEL_LABELS: OnceLock<HashMap<Level, String>> = OnceLock::new();

/// Look up the table entry for `level`.
pub fn color_for(level: &Level) -> Option<ColorSpec> {
    LEVEL_COLORS
        .iter()
        .find(|(known, _)| known == level)
        .map(|(_, spec)| *spec)
}

/// Upper-case level name padded to [`LABEL_WIDTH`].
pub fn capital_label(level: &Level) -> String {
    format!("{:<width$}", level.as_str(), width = LABEL_WIDTH)
}

/// Rendered labels for every level in [`LEVEL_COLORS`], built on first use.
pub fn level_labels() -> &'static HashMap<Level, String> {
    LEVEL_LABELS.get_or_init(|| {
        LEVEL_COLORS
            .iter()
            .map(|(level, spec)| (*level, spec.render(&capital_label(level))))
            .collect()
    })
}

/// Colored label for `level`, falling back to [`UNKNOWN_LEVEL_COLOR`].
pub fn colored_label(level: &Level) -> Cow<'static, str> {
    match level_labels().get(level) {
        Some(label) => Cow::Borrowed(label.as_str()),
        None => Cow::Owned(UNKNOWN_LEVEL_COLOR.render(&capital_label(level))),
    }
}
