use super::atlas_datetime::{AtlasDateTime, format_iso8601_datetime};
use super::measurement_value::{MeasurementValue, MeasurementValueReport};
use super::period::{Granularity, Period};
use super::unit::AtlasUnit;
use crate::error::{MeasurementError, Result};
use crate::stats::{StatisticalSummary, StatisticalSummaryFriendly};
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// A named time series for one period and granularity.
///
/// Identity is the name and the period only. Two series fetched with a
/// different granularity, or holding different samples, are the same
/// measurement as far as deduplication is concerned.
#[derive(Debug, Clone)]
pub struct Measurement {
    name: String,
    period: Period,
    granularity: Granularity,
    units: Option<AtlasUnit>,
    values: Vec<MeasurementValue>,
}

/// Serializable view of a [`Measurement`] with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementReport {
    pub measurements: Vec<MeasurementValueReport>,
    pub date_start: Option<String>,
    pub date_end: Option<String>,
    pub name: String,
    pub units: Option<AtlasUnit>,
    pub period: Period,
    pub granularity: Granularity,
    pub measurements_count: usize,
}

impl Measurement {
    pub fn new(name: impl Into<String>, period: Period, granularity: Granularity) -> Self {
        Self {
            name: name.into(),
            period,
            granularity,
            units: None,
            values: Vec::new(),
        }
    }

    pub fn with_units(mut self, units: Option<AtlasUnit>) -> Self {
        self.units = units;
        self
    }

    pub fn with_values(mut self, values: Vec<MeasurementValue>) -> Self {
        self.values = values;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn units(&self) -> Option<AtlasUnit> {
        self.units
    }

    pub fn append_one(&mut self, value: MeasurementValue) {
        self.values.push(value);
    }

    pub fn append_many<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = MeasurementValue>,
    {
        self.values.extend(values);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Stored samples, in the order they were appended.
    pub fn values(&self) -> std::slice::Iter<'_, MeasurementValue> {
        self.values.iter()
    }

    /// `(timestamp, value)` pairs in stored order. Call again to restart.
    pub fn as_tuples(
        &self,
    ) -> impl Iterator<Item = (Option<AtlasDateTime>, Option<f64>)> + '_ {
        self.values.iter().map(MeasurementValue::as_tuple)
    }

    /// Number of stored samples, unparseable ones included.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Earliest timestamp of the series.
    pub fn date_start(&self) -> Result<AtlasDateTime> {
        self.timestamp_extremum(|candidate, current| candidate < current)
    }

    /// Latest timestamp of the series.
    pub fn date_end(&self) -> Result<AtlasDateTime> {
        self.timestamp_extremum(|candidate, current| candidate > current)
    }

    fn timestamp_extremum<F>(&self, replaces: F) -> Result<AtlasDateTime>
    where
        F: Fn(&AtlasDateTime, &AtlasDateTime) -> bool,
    {
        if self.values.is_empty() {
            return Err(MeasurementError::empty_series(&self.name));
        }
        self.values
            .iter()
            .filter_map(MeasurementValue::timestamp)
            .reduce(|current, candidate| {
                if replaces(&candidate, &current) {
                    candidate
                } else {
                    current
                }
            })
            .ok_or_else(|| MeasurementError::missing_timestamps(&self.name))
    }

    pub fn stats(&self) -> StatisticalSummary {
        StatisticalSummary::from_values(self.values.iter().map(MeasurementValue::value))
    }

    /// Friendly summary, formatted according to the series units.
    pub fn stats_friendly(&self) -> StatisticalSummaryFriendly {
        StatisticalSummaryFriendly::from_summary(&self.stats(), self.units)
    }

    pub fn as_report(&self) -> MeasurementReport {
        MeasurementReport {
            measurements: self.values.iter().map(MeasurementValue::as_report).collect(),
            date_start: self.date_start().ok().as_ref().map(format_iso8601_datetime),
            date_end: self.date_end().ok().as_ref().map(format_iso8601_datetime),
            name: self.name.clone(),
            units: self.units,
            period: self.period,
            granularity: self.granularity,
            measurements_count: self.count(),
        }
    }
}

impl PartialEq for Measurement {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.period == other.period
    }
}

impl Eq for Measurement {}

impl Hash for Measurement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.period.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::measurement_types::{cache, network};
    use std::collections::HashSet;
    use std::collections::hash_map::DefaultHasher;

    fn at(day: u8) -> Option<AtlasDateTime> {
        Some(AtlasDateTime::from_gregorian_utc_hms(2024, 1, day, 0, 0, 0))
    }

    fn hash_of(measurement: &Measurement) -> u64 {
        let mut hasher = DefaultHasher::new();
        measurement.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_append_one_then_many() {
        let mut measurement = Measurement::new(cache::USED, Period::Hours24, Granularity::Hour);
        measurement.append_one(MeasurementValue::new(at(1), Some(1.0)));
        measurement.append_many(vec![
            MeasurementValue::new(at(2), Some(2.0)),
            MeasurementValue::new(at(3), None),
        ]);

        assert_eq!(measurement.count(), 3);
        let tuples: Vec<_> = measurement.as_tuples().collect();
        assert_eq!(
            tuples,
            vec![(at(1), Some(1.0)), (at(2), Some(2.0)), (at(3), None)]
        );
        // Restartable
        assert_eq!(measurement.as_tuples().count(), 3);
    }

    #[test]
    fn test_clear() {
        let mut measurement = Measurement::new(cache::USED, Period::Hours24, Granularity::Hour)
            .with_values(vec![MeasurementValue::new(at(1), Some(1.0))]);
        assert!(!measurement.is_empty());
        measurement.clear();
        assert_eq!(measurement.count(), 0);
        assert_eq!(measurement.as_tuples().count(), 0);
    }

    #[test]
    fn test_dates() {
        // Not sorted on purpose, order is kept as delivered
        let measurement = Measurement::new(cache::USED, Period::Weeks1, Granularity::Day)
            .with_values(vec![
                MeasurementValue::new(at(5), Some(1.0)),
                MeasurementValue::new(None, Some(1.0)),
                MeasurementValue::new(at(2), Some(1.0)),
                MeasurementValue::new(at(9), Some(1.0)),
            ]);
        assert_eq!(Some(measurement.date_start().unwrap()), at(2));
        assert_eq!(Some(measurement.date_end().unwrap()), at(9));
        assert_eq!(measurement.as_tuples().next(), Some((at(5), Some(1.0))));
    }

    #[test]
    fn test_dates_on_empty_series() {
        let measurement = Measurement::new(cache::USED, Period::Weeks1, Granularity::Day);
        assert!(matches!(
            measurement.date_start(),
            Err(MeasurementError::EmptySeries { .. })
        ));
        assert!(matches!(
            measurement.date_end(),
            Err(MeasurementError::EmptySeries { .. })
        ));
    }

    #[test]
    fn test_dates_without_timestamps() {
        let measurement = Measurement::new(cache::USED, Period::Weeks1, Granularity::Day)
            .with_values(vec![MeasurementValue::new(None, Some(1.0))]);
        assert!(matches!(
            measurement.date_start(),
            Err(MeasurementError::MissingTimestamps { .. })
        ));
    }

    #[test]
    fn test_identity_is_name_and_period() {
        let a = Measurement::new(cache::USED, Period::Hours24, Granularity::Minute)
            .with_values(vec![MeasurementValue::new(at(1), Some(1.0))]);
        let b = Measurement::new(cache::USED, Period::Hours24, Granularity::Hour)
            .with_values(vec![MeasurementValue::new(at(2), Some(5.0))]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let other_name = Measurement::new(network::BYTES_OUT, Period::Hours24, Granularity::Minute);
        let other_period = Measurement::new(cache::USED, Period::Hours48, Granularity::Minute);
        assert_ne!(a, other_name);
        assert_ne!(a, other_period);

        let set: HashSet<_> = [a, b, other_name, other_period].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_stats() {
        let measurement = Measurement::new(cache::USED, Period::Hours24, Granularity::Hour)
            .with_values(vec![
                MeasurementValue::new(at(1), Some(1.0)),
                MeasurementValue::new(at(2), Some(2.0)),
                MeasurementValue::new(at(3), Some(3.0)),
                MeasurementValue::new(at(4), None),
            ]);
        let stats = measurement.stats();
        assert_eq!(stats.samples, 3);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);

        let empty = Measurement::new(cache::USED, Period::Hours24, Granularity::Hour);
        assert_eq!(empty.stats(), StatisticalSummary::default());
        assert_eq!(empty.stats_friendly(), StatisticalSummaryFriendly::no_value());
    }

    #[test]
    fn test_stats_friendly_uses_units() {
        let values = vec![
            MeasurementValue::new(at(1), Some(1024.0)),
            MeasurementValue::new(at(2), Some(2048.0)),
        ];
        let bytes = Measurement::new(cache::USED, Period::Hours24, Granularity::Hour)
            .with_units(Some(AtlasUnit::Bytes))
            .with_values(values.clone());
        assert_eq!(bytes.stats_friendly().mean, "1.5 KiB");

        let scalar = Measurement::new(cache::USED, Period::Hours24, Granularity::Hour)
            .with_units(Some(AtlasUnit::Scalar))
            .with_values(values);
        assert_eq!(scalar.stats_friendly().mean, "1,536");
    }

    #[test]
    fn test_as_report() {
        let measurement = Measurement::new(cache::USED, Period::Hours24, Granularity::Hour)
            .with_units(Some(AtlasUnit::Bytes))
            .with_values(vec![
                MeasurementValue::new(at(2), Some(2.0)),
                MeasurementValue::new(at(1), Some(1.0)),
            ]);
        let report = serde_json::to_value(measurement.as_report()).unwrap();
        assert_eq!(report["name"], "CACHE_USED_BYTES");
        assert_eq!(report["units"], "BYTES");
        assert_eq!(report["period"], "P1D");
        assert_eq!(report["granularity"], "PT1H");
        assert_eq!(report["measurements_count"], 2);
        assert_eq!(report["date_start"], "2024-01-01T00:00:00Z");
        assert_eq!(report["date_end"], "2024-01-02T00:00:00Z");
        assert_eq!(report["measurements"][0]["value"], 2.0);

        let empty = Measurement::new(cache::USED, Period::Hours24, Granularity::Hour).as_report();
        assert_eq!(empty.date_start, None);
        assert_eq!(empty.measurements_count, 0);
    }
}
