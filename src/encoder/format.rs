//! Line encoder plugged into `tracing-subscriber` as the event formatter.

use std::fmt;

use chrono::{DateTime, Local};
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

use super::{EncoderConfig, EntryCaller, PrimitiveArrayEncoder};

/// Field carrying an explicit caller file; overrides callsite metadata.
const CALLER_FILE_FIELD: &str = "caller.file";
/// Field carrying an explicit caller line; overrides callsite metadata.
const CALLER_LINE_FIELD: &str = "caller.line";
/// Prefix for event fields whose name is taken by a configured JSON key.
const SHADOWED_FIELD_PREFIX: &str = "fields.";

const MESSAGE_FIELD: &str = "message";

/// Output line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Tab-separated elements followed by extra fields as a JSON object.
    #[default]
    Console,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// One log record, detached from `tracing`'s event type.
#[derive(Debug, Clone)]
pub struct Entry {
    pub level: Level,
    /// Read from the clock at encode time when unset.
    pub time: Option<DateTime<Local>>,
    pub caller: EntryCaller,
    pub message: String,
    pub fields: Map<String, Value>,
}

impl Entry {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            time: None,
            caller: EntryCaller::undefined(),
            message: message.into(),
            fields: Map::new(),
        }
    }

    pub fn with_caller(mut self, caller: EntryCaller) -> Self {
        self.caller = caller;
        self
    }

    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Capture an event's level, message, fields and call site.
    ///
    /// A `caller.file`/`caller.line` pair replaces the callsite location; a lone
    /// half is kept as an ordinary field.
    pub fn from_event(event: &Event<'_>) -> Self {
        let meta = event.metadata();
        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);

        let caller = match (visitor.caller_file.take(), visitor.caller_line.take()) {
            (Some(file), Some(line)) if u32::try_from(line).is_ok() => {
                EntryCaller::new(file, line as u32)
            }
            (file, line) => {
                if let Some(file) = file {
                    visitor.fields.insert(CALLER_FILE_FIELD.to_string(), Value::from(file));
                }
                if let Some(line) = line {
                    visitor.fields.insert(CALLER_LINE_FIELD.to_string(), Value::from(line));
                }
                EntryCaller::from_metadata(meta)
            }
        };

        Self {
            level: *meta.level(),
            time: None,
            caller,
            message: visitor.message,
            fields: visitor.fields,
        }
    }
}

#[derive(Default)]
struct EntryVisitor {
    message: String,
    fields: Map<String, Value>,
    caller_file: Option<String>,
    caller_line: Option<u64>,
}

impl EntryVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for EntryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            MESSAGE_FIELD => self.message = value.to_string(),
            CALLER_FILE_FIELD => self.caller_file = Some(value.to_string()),
            _ => self.insert(field, Value::from(value)),
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == CALLER_LINE_FIELD {
            self.caller_line = Some(value);
        } else {
            self.insert(field, Value::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match u64::try_from(value) {
            Ok(line) if field.name() == CALLER_LINE_FIELD => self.record_u64(field, line),
            _ => self.insert(field, Value::from(value)),
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == MESSAGE_FIELD {
            self.message = format!("{:?}", value);
        } else {
            self.insert(field, Value::from(format!("{:?}", value)));
        }
    }
}

/// Renders entries according to an [`EncoderConfig`] and a [`LogFormat`].
#[derive(Debug, Clone)]
pub struct Encoder {
    config: EncoderConfig,
    format: LogFormat,
}

impl Encoder {
    pub fn new(config: EncoderConfig, format: LogFormat) -> Self {
        Self { config, format }
    }

    pub fn console(config: EncoderConfig) -> Self {
        Self::new(config, LogFormat::Console)
    }

    pub fn json(config: EncoderConfig) -> Self {
        Self::new(config, LogFormat::Json)
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Render one entry, without the trailing newline.
    pub fn encode_entry(&self, entry: &Entry) -> String {
        match self.format {
            LogFormat::Console => self.encode_console(entry),
            LogFormat::Json => self.encode_json(entry),
        }
    }

    fn encode_console(&self, entry: &Entry) -> String {
        let config = &self.config;
        let mut elements: Vec<String> = Vec::with_capacity(4);
        if config.time_key.is_some() {
            let time = entry.time.unwrap_or_else(Local::now);
            (config.encode_time)(&time, &mut elements);
        }
        if config.level_key.is_some() {
            (config.encode_level)(&entry.level, &mut elements);
        }
        if config.caller_key.is_some() {
            (config.encode_caller)(&entry.caller, &mut elements);
        }
        if config.message_key.is_some() {
            elements.push(entry.message.clone());
        }

        let mut line = elements.join("\t");
        if !entry.fields.is_empty() {
            if !line.is_empty() {
                line.push('\t');
            }
            line.push_str(&serde_json::to_string(&entry.fields).unwrap_or_default());
        }
        line
    }

    fn encode_json(&self, entry: &Entry) -> String {
        let config = &self.config;
        let mut object = Map::new();
        if let Some(key) = &config.time_key {
            let time = entry.time.unwrap_or_else(Local::now);
            let time = encode_one(|enc| (config.encode_time)(&time, enc));
            object.insert(key.clone(), Value::String(time));
        }
        if let Some(key) = &config.level_key {
            let level = encode_one(|enc| (config.encode_level)(&entry.level, enc));
            object.insert(key.clone(), Value::String(level));
        }
        if let Some(key) = &config.caller_key {
            let caller = encode_one(|enc| (config.encode_caller)(&entry.caller, enc));
            object.insert(key.clone(), Value::String(caller));
        }
        if let Some(key) = &config.message_key {
            object.insert(key.clone(), Value::String(entry.message.clone()));
        }
        for (key, value) in &entry.fields {
            let key = if object.contains_key(key) {
                format!("{}{}", SHADOWED_FIELD_PREFIX, key)
            } else {
                key.clone()
            };
            object.entry(key).or_insert_with(|| value.clone());
        }
        serde_json::to_string(&object).unwrap_or_default()
    }
}

fn encode_one(encode: impl FnOnce(&mut dyn PrimitiveArrayEncoder)) -> String {
    let mut out = String::new();
    encode(&mut out);
    out
}

impl<S, N> FormatEvent<S, N> for Encoder
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut entry = Entry::from_event(event);
        if self.config.time_key.is_some() {
            entry.time = Some(Local::now());
        }
        writeln!(writer, "{}", self.encode_entry(&entry))
    }
}
