//! The owning registry of every sensor in the station.

use crate::sensor::{AnySensor, Sensor};
use crate::types::{RegistrySummary, SensorProcessed};

/// Ordered collection of sensors, kept in registration order.
///
/// Names are not required to be unique; lookups return the earliest match.
#[derive(Debug, Default)]
pub struct SensorRegistry {
    sensors: Vec<AnySensor>,
}

impl SensorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        tracing::debug!("Sensor registry initialized");
        Self::default()
    }

    /// Take ownership of a sensor and append it.
    pub fn register(&mut self, sensor: impl Into<AnySensor>) {
        let sensor = sensor.into();
        tracing::info!("Registered {} sensor {}", sensor.kind(), sensor.name());
        self.sensors.push(sensor);
    }

    /// Get the first sensor with exactly this name.
    pub fn find(&self, name: &str) -> Option<&AnySensor> {
        self.sensors.iter().find(|s| s.name() == name)
    }

    /// Get a mutable reference to the first sensor with exactly this name.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut AnySensor> {
        self.sensors.iter_mut().find(|s| s.name() == name)
    }

    /// Run every sensor's own processing algorithm, in registration order.
    pub fn process_all(&mut self) -> Vec<SensorProcessed> {
        self.sensors
            .iter_mut()
            .map(|s| {
                let report = s.process();
                tracing::debug!("Processed {}: {report}", s.name());
                SensorProcessed {
                    name: s.name().to_string(),
                    kind: s.kind(),
                    report,
                }
            })
            .collect()
    }

    /// Describe every sensor, in registration order.
    pub fn describe_all(&self) -> RegistrySummary {
        RegistrySummary {
            sensors: self.sensors.iter().map(|s| s.describe()).collect(),
            total: self.sensors.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnySensor> {
        self.sensors.iter()
    }
}

impl Drop for SensorRegistry {
    fn drop(&mut self) {
        for sensor in &self.sensors {
            tracing::debug!(
                "Releasing sensor {} ({} readings)",
                sensor.name(),
                sensor.len()
            );
        }
    }
}
