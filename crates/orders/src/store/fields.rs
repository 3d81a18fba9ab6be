//! Defensive readers over untyped field bags.
//!
//! Store documents predate any schema enforcement: a field may be absent,
//! null, spelled in legacy camelCase, or written with the wrong JSON type by
//! an older client. Every reader here takes a list of accepted key spellings
//! and returns `None` for anything it cannot use, leaving the fallback
//! decision to the caller.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use velocart_core::GeoPoint;

/// Read a non-empty trimmed string under any of `keys`.
pub fn str_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(s) = fields.get(*key).and_then(Value::as_str) {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// Read a whole-number quantity under any of `keys`.
///
/// Accepts integer JSON numbers and floats with no fractional part (an older
/// writer stored quantities as floats).
pub fn u32_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<u32> {
    for key in keys {
        let Some(value) = fields.get(*key) else {
            continue;
        };
        if let Some(n) = value.as_u64() {
            if let Ok(n) = u32::try_from(n) {
                return Some(n);
            }
        }
        if let Some(n) = value.as_f64() {
            if n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                return Some(n as u32);
            }
        }
    }
    None
}

/// Read a decimal amount under any of `keys`.
///
/// Accepts JSON numbers (routed through their exact textual form so floats do
/// not pick up binary noise) and numeric strings.
pub fn decimal_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<Decimal> {
    for key in keys {
        match fields.get(*key) {
            Some(Value::Number(n)) => {
                if let Ok(d) = n.to_string().parse::<Decimal>() {
                    return Some(d);
                }
            }
            Some(Value::String(s)) => {
                if let Ok(d) = s.trim().parse::<Decimal>() {
                    return Some(d);
                }
            }
            _ => {}
        }
    }
    None
}

/// Read a nested object under any of `keys`.
pub fn map_field<'a>(
    fields: &'a Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Map<String, Value>> {
    for key in keys {
        if let Some(map) = fields.get(*key).and_then(Value::as_object) {
            return Some(map);
        }
    }
    None
}

/// Read an array under any of `keys`.
pub fn array_field<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Vec<Value>> {
    for key in keys {
        if let Some(array) = fields.get(*key).and_then(Value::as_array) {
            return Some(array);
        }
    }
    None
}

/// Read a store-native timestamp under any of `keys`.
pub fn timestamp_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<DateTime<Utc>> {
    for key in keys {
        if let Some(instant) = fields.get(*key).and_then(parse_timestamp) {
            return Some(instant);
        }
    }
    None
}

/// Normalize any of the store's timestamp spellings to UTC.
///
/// Accepted forms:
/// - `{ "seconds": 1700000000, "nanoseconds": 0 }` (native store timestamps)
/// - integer or float epoch seconds
/// - RFC 3339 strings (written by the migration tooling)
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Object(map) => {
            let seconds = map.get("seconds").and_then(Value::as_i64)?;
            let nanoseconds = map
                .get("nanoseconds")
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, nanoseconds)
        }
        Value::Number(n) => {
            if let Some(seconds) = n.as_i64() {
                return DateTime::from_timestamp(seconds, 0);
            }
            let seconds = n.as_f64()?;
            epoch_from_float(seconds)
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        _ => None,
    }
}

fn epoch_from_float(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    #[allow(clippy::cast_possible_truncation)]
    let secs = whole as i64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let nanos = ((seconds - whole) * 1_000_000_000.0) as u32;
    DateTime::from_timestamp(secs, nanos.min(999_999_999))
}

/// Read a `{ latitude, longitude }` pair from a nested object value.
pub fn parse_geo_point(value: &Value) -> Option<GeoPoint> {
    let map = value.as_object()?;
    let latitude = map.get("latitude").and_then(Value::as_f64)?;
    let longitude = map.get("longitude").and_then(Value::as_f64)?;
    Some(GeoPoint::new(latitude, longitude))
}
