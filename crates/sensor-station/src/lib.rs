//! Sensor station — reading histories, polymorphic sensors, and the registry that owns them.

pub mod history;
pub mod registry;
pub mod sensor;
pub mod simulator;
pub mod types;

pub use history::{Measurement, ReadingHistory};
pub use registry::SensorRegistry;
pub use sensor::{AnySensor, PressureSensor, Sensor, TemperatureSensor, MAX_NAME_LEN};
pub use simulator::{ArduinoSimulator, SerialPortInfo};
pub use types::*;
