use crate::datamodel::measurement::Measurement;
use crate::datamodel::measurement_types::registry;
use crate::datamodel::measurement_value::MeasurementValue;
use crate::datamodel::period::{Granularity, Period};
use crate::datamodel::unit::AtlasUnit;
use crate::error::{MeasurementError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, warn};

/// Measurements document returned for a process, a database or a disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementsResponse {
    pub group_id: Option<String>,
    pub host_id: Option<String>,
    pub process_id: Option<String>,
    pub database_name: Option<String>,
    pub partition_name: Option<String>,
    pub granularity: String,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub measurements: Vec<RawMeasurement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurement {
    pub name: String,
    pub units: Option<String>,
    /// Kept raw, each point is parsed on its own and never fails the document.
    #[serde(default)]
    pub data_points: Vec<Value>,
}

impl MeasurementsResponse {
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// One [`Measurement`] per entry of the document.
    ///
    /// The provider does not echo the period back, the caller gives it.
    /// In strict mode, metric names missing from the registry are rejected.
    pub fn into_measurements(self, period: Period, strict: bool) -> Result<Vec<Measurement>> {
        let granularity = Granularity::from_str(&self.granularity)?;

        self.measurements
            .into_iter()
            .map(|raw| raw.into_measurement(period, granularity, strict))
            .collect()
    }
}

impl RawMeasurement {
    fn into_measurement(
        self,
        period: Period,
        granularity: Granularity,
        strict: bool,
    ) -> Result<Measurement> {
        if !registry().contains(&self.name) {
            if strict {
                return Err(MeasurementError::UnknownMeasurementType(self.name));
            }
            debug!("Measurement type {} is not in the registry", self.name);
        }

        let units = match self.units.as_deref() {
            Some(units) => match AtlasUnit::from_str(units) {
                Ok(unit) => Some(unit),
                Err(e) => {
                    warn!("{} for measurement {}", e, self.name);
                    None
                }
            },
            None => None,
        };

        let values = self
            .data_points
            .iter()
            .map(MeasurementValue::from_raw)
            .collect();

        Ok(Measurement::new(self.name, period, granularity)
            .with_units(units)
            .with_values(values))
    }
}
