use super::atlas_datetime::{AtlasDateTime, format_iso8601_datetime, parse_iso8601_datetime};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// A single sample of a measurement series.
///
/// Both fields are optional: a sample that cannot be parsed keeps its
/// place in the series with the unparseable field set to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementValue {
    timestamp: Option<AtlasDateTime>,
    value: Option<f64>,
}

/// Serializable view of a [`MeasurementValue`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementValueReport {
    pub timestamp: Option<String>,
    pub value: Option<f64>,
    pub value_int: Option<i64>,
    pub value_float: Option<f64>,
}

impl MeasurementValue {
    pub fn new(timestamp: Option<AtlasDateTime>, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }

    /// Builds a sample from a raw `{"timestamp": .., "value": ..}` object.
    ///
    /// Never fails: anything that is not an object, or fields that cannot
    /// be parsed, end up as `None`.
    pub fn from_raw(raw: &Value) -> Self {
        let timestamp = raw.get("timestamp").unwrap_or(&Value::Null);
        let value = raw.get("value").unwrap_or(&Value::Null);
        Self {
            timestamp: parse_timestamp(timestamp),
            value: parse_value(value),
        }
    }

    pub fn timestamp(&self) -> Option<AtlasDateTime> {
        self.timestamp
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Truncates the value toward zero. `None` when the value is absent,
    /// not finite, or out of the `i64` range.
    pub fn as_int(&self) -> Option<i64> {
        let value = self.value?;
        if !value.is_finite() {
            return None;
        }
        let truncated = value.trunc();
        if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
            return None;
        }
        Some(truncated as i64)
    }

    pub fn as_float(&self) -> Option<f64> {
        self.value
    }

    pub fn as_tuple(&self) -> (Option<AtlasDateTime>, Option<f64>) {
        (self.timestamp, self.value)
    }

    pub fn as_report(&self) -> MeasurementValueReport {
        MeasurementValueReport {
            timestamp: self.timestamp.as_ref().map(format_iso8601_datetime),
            value: self.value,
            value_int: self.as_int(),
            value_float: self.as_float(),
        }
    }
}

fn parse_timestamp(raw: &Value) -> Option<AtlasDateTime> {
    match raw {
        Value::String(s) => {
            let parsed = parse_iso8601_datetime(s);
            if parsed.is_none() {
                warn!("Could not parse \"{}\" as a datetime", s);
            }
            parsed
        }
        Value::Null => {
            debug!("Timestamp is null");
            None
        }
        other => {
            warn!("Could not parse {} as a datetime", other);
            None
        }
    }
}

fn parse_value(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Could not parse the metric value \"{}\". Error was {}", s, e);
                None
            }
        },
        Value::Null => {
            debug!("Value is null");
            None
        }
        other => {
            warn!("Could not parse the metric value {}", other);
            None
        }
    }
}
