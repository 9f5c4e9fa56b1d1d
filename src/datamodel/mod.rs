pub mod atlas_datetime;
pub mod measurement;
pub mod measurement_set;
pub mod measurement_types;
pub mod measurement_value;
pub mod period;
pub mod unit;

pub use atlas_datetime::AtlasDateTime;
pub use measurement::{Measurement, MeasurementReport};
pub use measurement_set::MeasurementSet;
pub use measurement_types::{MeasurementTypeNode, registry};
pub use measurement_value::{MeasurementValue, MeasurementValueReport};
pub use period::{Granularity, Period};
pub use unit::AtlasUnit;
