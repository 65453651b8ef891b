//! Timestamp encoders.

use chrono::{DateTime, Local};

use super::PrimitiveArrayEncoder;

/// Renders a record's timestamp.
pub type TimeEncoder = fn(&DateTime<Local>, &mut dyn PrimitiveArrayEncoder);

/// `2024-03-09 17:04:05.123`
pub const TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Local time in [`TIME_LAYOUT`].
pub fn layout_time_encoder(time: &DateTime<Local>, enc: &mut dyn PrimitiveArrayEncoder) {
    enc.append_string(time.format(TIME_LAYOUT).to_string());
}

/// Seconds since the Unix epoch with millisecond precision.
pub fn epoch_time_encoder(time: &DateTime<Local>, enc: &mut dyn PrimitiveArrayEncoder) {
    let millis = time.timestamp_millis();
    enc.append_string(format!("{}.{:03}", millis.div_euclid(1000), millis.rem_euclid(1000)));
}
