#![forbid(unsafe_code)]

pub mod config;
pub mod datamodel;
pub mod error;
pub mod parsing;
pub mod stats;

pub use error::{MeasurementError, Result};
