use serde::Serialize;

/// Sample count, mean, min and max of a series.
///
/// Absent samples are ignored. An empty input gives an all-zero summary
/// instead of an error, empty telemetry windows are expected.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StatisticalSummary {
    pub samples: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl StatisticalSummary {
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut values = values.into_iter().flatten();
        let Some(first) = values.next() else {
            return Self::default();
        };

        let mut samples = 1_usize;
        let mut sum = first;
        let mut min = first;
        let mut max = first;
        for value in values {
            samples += 1;
            sum += value;
            // Keep the current extremum unless the new value is strictly beyond it
            if value < min {
                min = value;
            }
            if value > max {
                max = value;
            }
        }

        Self {
            samples,
            mean: sum / samples as f64,
            min,
            max,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}
