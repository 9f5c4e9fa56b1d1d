pub mod measurements_response;

pub use measurements_response::{MeasurementsResponse, RawMeasurement};
