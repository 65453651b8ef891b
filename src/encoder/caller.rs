//! Call-site encoders.

use tracing::Metadata;

use super::PrimitiveArrayEncoder;

/// Where a record was emitted from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCaller {
    pub defined: bool,
    pub file: String,
    pub line: u32,
}

impl EntryCaller {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            defined: true,
            file: file.into(),
            line,
        }
    }

    pub fn undefined() -> Self {
        Self::default()
    }

    /// Caller taken from a callsite's static metadata.
    pub fn from_metadata(meta: &Metadata<'_>) -> Self {
        match (meta.file(), meta.line()) {
            (Some(file), Some(line)) => Self::new(file, line),
            _ => Self::undefined(),
        }
    }

    /// `file:line`, or `undefined`.
    pub fn full_path(&self) -> String {
        if !self.defined {
            return "undefined".to_string();
        }
        format!("{}:{}", self.file, self.line)
    }
}

/// Renders a record's call site.
pub type CallerEncoder = fn(&EntryCaller, &mut dyn PrimitiveArrayEncoder);

/// `[file.rs:42]`, keeping only what follows the last `/`.
///
/// A path without any separator is emitted as-is, without brackets or line.
pub fn short_caller_encoder(caller: &EntryCaller, enc: &mut dyn PrimitiveArrayEncoder) {
    if !caller.defined {
        enc.append_str("undefined");
        return;
    }
    match caller.file.rfind('/') {
        None => enc.append_str(&caller.file),
        Some(idx) => enc.append_string(format!("[{}:{}]", &caller.file[idx + 1..], caller.line)),
    }
}

pub fn full_caller_encoder(caller: &EntryCaller, enc: &mut dyn PrimitiveArrayEncoder) {
    enc.append_string(caller.full_path());
}
