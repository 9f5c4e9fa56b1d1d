use super::measurement::Measurement;
use super::period::Period;
use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};
use tracing::debug;

/// Measurements merged across several fetches, deduplicated with
/// [`Measurement`]'s own `Eq` and `Hash`.
///
/// The first measurement seen for an identity is kept, later ones are
/// dropped. Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct MeasurementSet {
    measurements: Vec<Measurement>,
    // Hash to positions in `measurements`, collisions are settled with `==`.
    index: HashMap<u64, Vec<usize>>,
    hasher: RandomState,
}

impl MeasurementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an equal measurement was already present.
    pub fn insert(&mut self, measurement: Measurement) -> bool {
        if self.contains(&measurement) {
            debug!(
                "Dropping duplicate measurement {} for period {}",
                measurement.name(),
                measurement.period()
            );
            return false;
        }
        let hash = self.hasher.hash_one(&measurement);
        self.index
            .entry(hash)
            .or_default()
            .push(self.measurements.len());
        self.measurements.push(measurement);
        true
    }

    /// Whether a measurement equal to `measurement` is already present.
    pub fn contains(&self, measurement: &Measurement) -> bool {
        let hash = self.hasher.hash_one(measurement);
        self.index.get(&hash).is_some_and(|positions| {
            positions
                .iter()
                .any(|&position| self.measurements[position] == *measurement)
        })
    }

    pub fn get(&self, name: &str, period: Period) -> Option<&Measurement> {
        self.measurements
            .iter()
            .find(|m| m.name() == name && m.period() == period)
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Measurement> {
        self.measurements.iter()
    }

    pub fn into_vec(self) -> Vec<Measurement> {
        self.measurements
    }
}

impl Extend<Measurement> for MeasurementSet {
    fn extend<T: IntoIterator<Item = Measurement>>(&mut self, iter: T) {
        for measurement in iter {
            self.insert(measurement);
        }
    }
}

impl FromIterator<Measurement> for MeasurementSet {
    fn from_iter<T: IntoIterator<Item = Measurement>>(iter: T) -> Self {
        let mut set = MeasurementSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a MeasurementSet {
    type Item = &'a Measurement;
    type IntoIter = std::slice::Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
