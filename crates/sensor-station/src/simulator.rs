//! Simulated Arduino serial source producing temperature and pressure readings.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Lowest simulated temperature, in degrees Celsius.
pub const TEMPERATURE_MIN: f32 = 15.0;

/// Number of 0.1 C steps above [`TEMPERATURE_MIN`]; values stay below 45.0.
const TEMPERATURE_STEPS: u16 = 300;

/// Inclusive bounds for simulated pressure, in pascals.
pub const PRESSURE_RANGE: std::ops::RangeInclusive<i32> = 70..=110;

/// Description of the (simulated) serial link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerialPortInfo {
    pub port: String,
    pub baud_rate: u32,
    pub connected: bool,
}

impl fmt::Display for SerialPortInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Serial port ===")?;
        writeln!(f, "Port: {}", self.port)?;
        writeln!(f, "Baud rate: {} bps", self.baud_rate)?;
        write!(
            f,
            "Status: {}",
            if self.connected { "connected" } else { "disconnected" }
        )
    }
}

/// Pseudo-random stand-in for an Arduino streaming sensor values over serial.
pub struct ArduinoSimulator {
    rng: StdRng,
}

impl ArduinoSimulator {
    /// Seed from OS entropy.
    pub fn new() -> Self {
        tracing::debug!("Arduino simulator initialized");
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible simulator for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        tracing::debug!("Arduino simulator initialized with seed {seed}");
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A temperature in [15.0, 45.0) with 0.1 C resolution.
    pub fn read_temperature(&mut self) -> f32 {
        let steps = self.rng.random_range(0..TEMPERATURE_STEPS);
        let value = TEMPERATURE_MIN + f32::from(steps) / 10.0;
        tracing::trace!("Arduino temperature reading: {value:.2} C");
        value
    }

    /// A pressure in [70, 110] Pa.
    pub fn read_pressure(&mut self) -> i32 {
        let value = self.rng.random_range(PRESSURE_RANGE);
        tracing::trace!("Arduino pressure reading: {value} Pa");
        value
    }

    pub fn temperature_batch(&mut self, count: usize) -> Vec<f32> {
        (0..count).map(|_| self.read_temperature()).collect()
    }

    pub fn pressure_batch(&mut self, count: usize) -> Vec<i32> {
        (0..count).map(|_| self.read_pressure()).collect()
    }

    pub fn port_info(&self) -> SerialPortInfo {
        SerialPortInfo {
            port: "/dev/ttyUSB0 (simulated)".to_string(),
            baud_rate: 9600,
            connected: true,
        }
    }
}

impl Default for ArduinoSimulator {
    fn default() -> Self {
        Self::new()
    }
}
