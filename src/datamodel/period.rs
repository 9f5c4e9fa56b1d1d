//! ISO-8601 durations accepted by the provider for the `period` and
//! `granularity` query parameters.

use crate::error::MeasurementError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Total time window covered by a measurement series.
///
/// Serde and [`FromStr`] share one case-insensitive parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Period {
    Minutes15,
    Hours1,
    Hours8,
    Hours24,
    Hours48,
    Weeks1,
    Weeks4,
    Months1,
    Months2,
    Years1,
    Years2,
}

impl Period {
    pub const ALL: [Period; 11] = [
        Period::Minutes15,
        Period::Hours1,
        Period::Hours8,
        Period::Hours24,
        Period::Hours48,
        Period::Weeks1,
        Period::Weeks4,
        Period::Months1,
        Period::Months2,
        Period::Years1,
        Period::Years2,
    ];

    pub fn as_iso8601(&self) -> &'static str {
        match self {
            Period::Minutes15 => "PT15M",
            Period::Hours1 => "PT1H",
            Period::Hours8 => "PT8H",
            Period::Hours24 => "P1D",
            Period::Hours48 => "P2D",
            Period::Weeks1 => "P7D",
            Period::Weeks4 => "P28D",
            Period::Months1 => "P1M",
            Period::Months2 => "P2M",
            Period::Years1 => "P1Y",
            Period::Years2 => "P2Y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_iso8601())
    }
}

impl FromStr for Period {
    type Err = MeasurementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PT15M" => Ok(Period::Minutes15),
            "PT1H" => Ok(Period::Hours1),
            "PT8H" => Ok(Period::Hours8),
            "P1D" | "PT24H" => Ok(Period::Hours24),
            "P2D" | "PT48H" => Ok(Period::Hours48),
            "P7D" | "P1W" => Ok(Period::Weeks1),
            "P28D" | "P4W" => Ok(Period::Weeks4),
            "P1M" => Ok(Period::Months1),
            "P2M" => Ok(Period::Months2),
            "P1Y" => Ok(Period::Years1),
            "P2Y" => Ok(Period::Years2),
            _ => Err(MeasurementError::UnknownPeriod(s.to_string())),
        }
    }
}

impl TryFrom<String> for Period {
    type Error = MeasurementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Period::from_str(&value)
    }
}

impl From<Period> for &'static str {
    fn from(period: Period) -> Self {
        period.as_iso8601()
    }
}

/// Sampling interval of a measurement series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Granularity {
    Minute,
    FiveMinutes,
    Hour,
    Day,
}

impl Granularity {
    pub fn as_iso8601(&self) -> &'static str {
        match self {
            Granularity::Minute => "PT1M",
            Granularity::FiveMinutes => "PT5M",
            Granularity::Hour => "PT1H",
            Granularity::Day => "P1D",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_iso8601())
    }
}

impl FromStr for Granularity {
    type Err = MeasurementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PT1M" => Ok(Granularity::Minute),
            "PT5M" => Ok(Granularity::FiveMinutes),
            "PT1H" => Ok(Granularity::Hour),
            "P1D" | "PT24H" => Ok(Granularity::Day),
            _ => Err(MeasurementError::UnknownGranularity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Granularity {
    type Error = MeasurementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Granularity::from_str(&value)
    }
}

impl From<Granularity> for &'static str {
    fn from(granularity: Granularity) -> Self {
        granularity.as_iso8601()
    }
}
