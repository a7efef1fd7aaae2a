//! Sensor variants and the common processing interface they share.

use crate::history::ReadingHistory;
use crate::types::{ProcessReport, Reading, SensorKind, SensorSummary, StationError, StationResult};

/// Longest sensor name kept; longer identifiers are truncated.
pub const MAX_NAME_LEN: usize = 49;

/// Behaviour shared by every sensor kind.
pub trait Sensor {
    fn name(&self) -> &str;

    fn kind(&self) -> SensorKind;

    /// Number of stored readings.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mean of the stored readings, `0.0` when there are none.
    fn mean(&self) -> f64;

    /// Run this kind's processing algorithm over the history.
    fn process(&mut self) -> ProcessReport;

    /// Identity, reading count, and the current mean if any readings exist.
    fn describe(&self) -> SensorSummary {
        SensorSummary {
            name: self.name().to_string(),
            kind: self.kind(),
            readings: self.len(),
            mean: (!self.is_empty()).then(|| self.mean()),
        }
    }
}

fn bounded_name(id: &str) -> String {
    if id.chars().count() <= MAX_NAME_LEN {
        return id.to_string();
    }
    let name: String = id.chars().take(MAX_NAME_LEN).collect();
    tracing::warn!("Sensor name truncated to {MAX_NAME_LEN} characters: {name}");
    name
}

/// Temperature sensor: discards the lowest reading, then averages the rest.
#[derive(Debug, Clone)]
pub struct TemperatureSensor {
    name: String,
    history: ReadingHistory<f32>,
}

impl TemperatureSensor {
    pub fn new(id: &str) -> Self {
        let name = bounded_name(id);
        tracing::info!("Temperature sensor created: {name}");
        Self {
            name,
            history: ReadingHistory::new(),
        }
    }

    /// Append a temperature in degrees Celsius.
    pub fn register_reading(&mut self, value: f32) {
        self.history.push(value);
        tracing::debug!("[{}] Temperature registered: {value:.2} C", self.name);
    }

    pub fn history(&self) -> &ReadingHistory<f32> {
        &self.history
    }
}

impl Sensor for TemperatureSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Temperature
    }

    fn len(&self) -> usize {
        self.history.len()
    }

    fn mean(&self) -> f64 {
        self.history.mean()
    }

    fn process(&mut self) -> ProcessReport {
        let Some(removed) = self.history.remove_minimum() else {
            tracing::debug!("[{}] No readings to process", self.name);
            return ProcessReport::NoReadings;
        };
        tracing::debug!("[{}] Lowest reading discarded: {removed:.2} C", self.name);

        let remaining = self.history.len();
        let mean = (!self.history.is_empty()).then(|| self.history.mean());
        ProcessReport::MinimumDiscarded {
            removed,
            remaining,
            mean,
        }
    }
}

/// Pressure sensor: averages the full history without modifying it.
#[derive(Debug, Clone)]
pub struct PressureSensor {
    name: String,
    history: ReadingHistory<i32>,
}

impl PressureSensor {
    pub fn new(id: &str) -> Self {
        let name = bounded_name(id);
        tracing::info!("Pressure sensor created: {name}");
        Self {
            name,
            history: ReadingHistory::new(),
        }
    }

    /// Append a pressure reading in pascals.
    pub fn register_reading(&mut self, value: i32) {
        self.history.push(value);
        tracing::debug!("[{}] Pressure registered: {value} Pa", self.name);
    }

    pub fn history(&self) -> &ReadingHistory<i32> {
        &self.history
    }
}

impl Sensor for PressureSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Pressure
    }

    fn len(&self) -> usize {
        self.history.len()
    }

    fn mean(&self) -> f64 {
        self.history.mean()
    }

    fn process(&mut self) -> ProcessReport {
        if self.history.is_empty() {
            tracing::debug!("[{}] No readings to process", self.name);
            return ProcessReport::NoReadings;
        }
        ProcessReport::Averaged {
            mean: self.history.mean(),
            readings: self.history.len(),
        }
    }
}

/// Any sensor the registry can own.
#[derive(Debug, Clone)]
pub enum AnySensor {
    Temperature(TemperatureSensor),
    Pressure(PressureSensor),
}

impl AnySensor {
    /// Record a kind-tagged reading, rejecting readings of the wrong kind.
    pub fn record(&mut self, reading: Reading) -> StationResult<()> {
        match (self, reading) {
            (AnySensor::Temperature(s), Reading::Temperature(v)) => s.register_reading(v),
            (AnySensor::Pressure(s), Reading::Pressure(v)) => s.register_reading(v),
            (sensor, reading) => {
                return Err(StationError::KindMismatch {
                    sensor: sensor.name().to_string(),
                    expected: sensor.kind(),
                    found: reading.kind(),
                });
            }
        }
        Ok(())
    }

    fn inner(&self) -> &dyn Sensor {
        match self {
            AnySensor::Temperature(s) => s,
            AnySensor::Pressure(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Sensor {
        match self {
            AnySensor::Temperature(s) => s,
            AnySensor::Pressure(s) => s,
        }
    }
}

impl Sensor for AnySensor {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn kind(&self) -> SensorKind {
        self.inner().kind()
    }

    fn len(&self) -> usize {
        self.inner().len()
    }

    fn mean(&self) -> f64 {
        self.inner().mean()
    }

    fn process(&mut self) -> ProcessReport {
        self.inner_mut().process()
    }
}

impl From<TemperatureSensor> for AnySensor {
    fn from(sensor: TemperatureSensor) -> Self {
        AnySensor::Temperature(sensor)
    }
}

impl From<PressureSensor> for AnySensor {
    fn from(sensor: PressureSensor) -> Self {
        AnySensor::Pressure(sensor)
    }
}
