use crate::error::MeasurementError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Units the provider attaches to a measurement series.
///
/// Serde and [`FromStr`] share one case-insensitive parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum AtlasUnit {
    ScalarPerSecond,
    Scalar,
    Percent,
    Milliseconds,
    Bytes,
    Gigabytes,
    BytesPerSecond,
    MegabytesPerSecond,
    GigabytesPerHour,
}

impl AtlasUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtlasUnit::ScalarPerSecond => "SCALAR_PER_SECOND",
            AtlasUnit::Scalar => "SCALAR",
            AtlasUnit::Percent => "PERCENT",
            AtlasUnit::Milliseconds => "MILLISECONDS",
            AtlasUnit::Bytes => "BYTES",
            AtlasUnit::Gigabytes => "GIGABYTES",
            AtlasUnit::BytesPerSecond => "BYTES_PER_SECOND",
            AtlasUnit::MegabytesPerSecond => "MEGABYTES_PER_SECOND",
            AtlasUnit::GigabytesPerHour => "GIGABYTES_PER_HOUR",
        }
    }

    /// Whether values are counted in single bytes and can be byte-scaled.
    pub fn is_bytes(&self) -> bool {
        matches!(self, AtlasUnit::Bytes | AtlasUnit::BytesPerSecond)
    }
}

impl fmt::Display for AtlasUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AtlasUnit {
    type Err = MeasurementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SCALAR_PER_SECOND" => Ok(AtlasUnit::ScalarPerSecond),
            "SCALAR" => Ok(AtlasUnit::Scalar),
            "PERCENT" => Ok(AtlasUnit::Percent),
            "MILLISECONDS" => Ok(AtlasUnit::Milliseconds),
            "BYTES" => Ok(AtlasUnit::Bytes),
            "GIGABYTES" => Ok(AtlasUnit::Gigabytes),
            "BYTES_PER_SECOND" => Ok(AtlasUnit::BytesPerSecond),
            "MEGABYTES_PER_SECOND" => Ok(AtlasUnit::MegabytesPerSecond),
            "GIGABYTES_PER_HOUR" => Ok(AtlasUnit::GigabytesPerHour),
            _ => Err(MeasurementError::UnknownUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for AtlasUnit {
    type Error = MeasurementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AtlasUnit::from_str(&value)
    }
}

impl From<AtlasUnit> for &'static str {
    fn from(unit: AtlasUnit) -> Self {
        unit.as_str()
    }
}
