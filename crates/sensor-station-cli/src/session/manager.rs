//! Station session lifecycle and the menu operations driven by the REPL.

use sensor_station::{
    AnySensor, ArduinoSimulator, PressureSensor, Reading, RegistrySummary, Sensor,
    SensorKind, SensorProcessed, SensorRegistry, SerialPortInfo, StationError, StationResult,
    TemperatureSensor,
};

/// Upper bound on readings generated by a single `simulate` call.
pub const MAX_SIMULATED_READINGS: usize = 10_000;

/// Owns the sensor registry and the simulator that feeds it.
pub struct StationSession {
    registry: SensorRegistry,
    simulator: ArduinoSimulator,
}

impl StationSession {
    /// Start a session; a seed makes simulated readings reproducible.
    pub fn open(seed: Option<u64>) -> Self {
        let simulator = match seed {
            Some(seed) => ArduinoSimulator::with_seed(seed),
            None => ArduinoSimulator::new(),
        };
        tracing::info!("Station session started");

        Self {
            registry: SensorRegistry::new(),
            simulator,
        }
    }

    /// Get the sensor registry.
    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// Register a new temperature sensor.
    pub fn create_temperature(&mut self, id: &str) -> StationResult<()> {
        let id = validate_id(id)?;
        self.registry.register(TemperatureSensor::new(id));
        Ok(())
    }

    /// Register a new pressure sensor.
    pub fn create_pressure(&mut self, id: &str) -> StationResult<()> {
        let id = validate_id(id)?;
        self.registry.register(PressureSensor::new(id));
        Ok(())
    }

    /// Record a manually entered value, parsed according to the sensor's kind.
    pub fn record(&mut self, id: &str, raw: &str) -> StationResult<Reading> {
        let sensor = self.lookup(id)?;
        let reading = parse_reading(sensor.kind(), raw)?;
        sensor.record(reading)?;
        Ok(reading)
    }

    /// Feed `count` simulated readings into a sensor.
    pub fn simulate(&mut self, id: &str, count: usize) -> StationResult<Vec<Reading>> {
        if self.registry.is_empty() {
            return Err(StationError::NoSensors);
        }
        if count == 0 {
            return Err(StationError::InvalidInput(
                "reading count must be positive".to_string(),
            ));
        }
        if count > MAX_SIMULATED_READINGS {
            return Err(StationError::InvalidInput(format!(
                "reading count {count} exceeds the limit of {MAX_SIMULATED_READINGS}"
            )));
        }

        let kind = self.lookup(id)?.kind();
        let readings: Vec<Reading> = match kind {
            SensorKind::Temperature => self
                .simulator
                .temperature_batch(count)
                .into_iter()
                .map(Reading::Temperature)
                .collect(),
            SensorKind::Pressure => self
                .simulator
                .pressure_batch(count)
                .into_iter()
                .map(Reading::Pressure)
                .collect(),
        };

        let sensor = self.lookup(id)?;
        for reading in &readings {
            sensor.record(*reading)?;
        }
        tracing::info!("Simulated {count} {kind} readings for {id}");
        Ok(readings)
    }

    /// Process every sensor in registration order.
    pub fn process_all(&mut self) -> StationResult<Vec<SensorProcessed>> {
        if self.registry.is_empty() {
            return Err(StationError::NoSensors);
        }
        Ok(self.registry.process_all())
    }

    /// Describe every sensor in registration order.
    pub fn describe_all(&self) -> StationResult<RegistrySummary> {
        if self.registry.is_empty() {
            return Err(StationError::NoSensors);
        }
        Ok(self.registry.describe_all())
    }

    pub fn port_info(&self) -> SerialPortInfo {
        self.simulator.port_info()
    }

    fn lookup(&mut self, id: &str) -> StationResult<&mut AnySensor> {
        if self.registry.is_empty() {
            return Err(StationError::NoSensors);
        }
        self.registry
            .find_mut(id)
            .ok_or_else(|| StationError::SensorNotFound(id.to_string()))
    }
}

fn validate_id(id: &str) -> StationResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(StationError::InvalidInput("sensor ID is empty".to_string()));
    }
    if id.contains(char::is_whitespace) {
        return Err(StationError::InvalidInput(format!(
            "sensor ID must not contain spaces: {id}"
        )));
    }
    Ok(id)
}

fn parse_reading(kind: SensorKind, raw: &str) -> StationResult<Reading> {
    let raw = raw.trim();
    match kind {
        SensorKind::Temperature => match raw.parse::<f32>() {
            Ok(v) if v.is_finite() => Ok(Reading::Temperature(v)),
            _ => Err(StationError::InvalidInput(format!(
                "invalid temperature value: {raw}"
            ))),
        },
        SensorKind::Pressure => raw.parse::<i32>().map(Reading::Pressure).map_err(|_| {
            StationError::InvalidInput(format!("invalid pressure value: {raw}"))
        }),
    }
}
