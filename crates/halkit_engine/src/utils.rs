use chrono::{DateTime, Utc};
use halkit_base::{HalkitError, HalkitResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Serializes `value` as JSON indented by four spaces. Non-ASCII characters are written as is.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> HalkitResult<String> {
    let mut out = Vec::with_capacity(128);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|e| Box::new(HalkitError::wrap(e).context("Failed to serialize JSON")))?;
    String::from_utf8(out)
        .map_err(|e| Box::new(HalkitError::wrap(e).context("Serialized JSON is not UTF-8")))
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SSZ`, the date format used in API payloads.
pub fn iso_date(date: Option<&DateTime<Utc>>) -> Option<String> {
    date.map(|date| date.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}
