use super::number_format::{format_bytes, format_number};
use super::statistical_summary::StatisticalSummary;
use crate::datamodel::unit::AtlasUnit;
use serde::Serialize;

pub const NO_VALUE_MEAN: &str = "No Value";
pub const NO_VALUE: &str = "No value";

/// [`StatisticalSummary`] with mean, min and max rendered for display.
///
/// Byte units are scaled with binary prefixes, everything else gets
/// grouped number formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticalSummaryFriendly {
    pub samples: usize,
    pub mean: String,
    pub min: String,
    pub max: String,
}

impl StatisticalSummaryFriendly {
    pub fn from_values<I>(values: I, units: Option<AtlasUnit>) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        Self::from_summary(&StatisticalSummary::from_values(values), units)
    }

    pub fn from_summary(summary: &StatisticalSummary, units: Option<AtlasUnit>) -> Self {
        if summary.is_empty() {
            return Self::no_value();
        }
        let render = |value: f64| format_value(value, units);
        Self {
            samples: summary.samples,
            mean: render(summary.mean),
            min: render(summary.min),
            max: render(summary.max),
        }
    }

    /// Placeholder used when there is nothing to summarize.
    pub fn no_value() -> Self {
        Self {
            samples: 0,
            mean: NO_VALUE_MEAN.to_string(),
            min: NO_VALUE.to_string(),
            max: NO_VALUE.to_string(),
        }
    }
}

fn format_value(value: f64, units: Option<AtlasUnit>) -> String {
    match units {
        Some(unit) if unit.is_bytes() => {
            format_bytes(value).unwrap_or_else(|| format_number(value))
        }
        _ => format_number(value),
    }
}
