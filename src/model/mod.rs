mod config;
mod reading;

pub use config::{DbConfig, LametricConfig, SensorConfig};
pub use reading::{SensorReading, CONTROL_VALUE_ID, GRADE_VALUE_ID, WRITTEN_GRADE_VALUE_ID};

#[cfg(test)]
pub(crate) use reading::tests as fixtures;
