//! Core data types for sensor kinds, readings, processing reports, and summaries.

use std::fmt;

use serde::Serialize;

/// The closed set of sensor kinds a station can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Temperature,
    Pressure,
}

impl SensorKind {
    /// Unit suffix used when reporting values of this kind.
    pub fn unit(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "C",
            SensorKind::Pressure => "Pa",
        }
    }

    /// Human-readable title used in sensor descriptions.
    pub fn title(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "Temperature sensor",
            SensorKind::Pressure => "Pressure sensor",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Temperature => f.write_str("temperature"),
            SensorKind::Pressure => f.write_str("pressure"),
        }
    }
}

/// A single scalar measurement tagged with the kind of sensor it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Reading {
    Temperature(f32),
    Pressure(i32),
}

impl Reading {
    pub fn kind(&self) -> SensorKind {
        match self {
            Reading::Temperature(_) => SensorKind::Temperature,
            Reading::Pressure(_) => SensorKind::Pressure,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Temperature(v) => write!(f, "{v:.2} C"),
            Reading::Pressure(v) => write!(f, "{v} Pa"),
        }
    }
}

/// Outcome of running a sensor's processing algorithm once.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProcessReport {
    /// The history was empty; nothing was done.
    NoReadings,
    /// Temperature processing: the lowest reading was discarded. `mean` is the
    /// mean of what is left, or `None` when the discarded reading was the last one.
    MinimumDiscarded {
        removed: f32,
        remaining: usize,
        mean: Option<f64>,
    },
    /// Pressure processing: mean over the full, untouched history.
    Averaged { mean: f64, readings: usize },
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessReport::NoReadings => f.write_str("No readings to process."),
            ProcessReport::MinimumDiscarded {
                removed,
                remaining,
                mean: Some(mean),
            } => write!(
                f,
                "Lowest reading discarded: {removed:.2} C. Mean of remaining temperatures: {mean:.2} C (over {remaining} readings)"
            ),
            ProcessReport::MinimumDiscarded {
                removed,
                mean: None,
                ..
            } => write!(
                f,
                "Lowest reading discarded: {removed:.2} C. No readings remain after discarding the minimum."
            ),
            ProcessReport::Averaged { mean, readings } => {
                write!(f, "Mean pressure: {mean:.2} Pa (over {readings} readings)")
            }
        }
    }
}

/// A processing report attributed to the sensor that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorProcessed {
    pub name: String,
    pub kind: SensorKind,
    pub report: ProcessReport,
}

impl fmt::Display for SensorProcessed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-> Processing sensor {}... {}", self.name, self.report)
    }
}

/// Snapshot of one sensor's identity and history statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSummary {
    pub name: String,
    pub kind: SensorKind,
    pub readings: usize,
    /// Present only when at least one reading is stored.
    pub mean: Option<f64>,
}

impl fmt::Display for SensorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.kind.title())?;
        writeln!(f, "ID: {}", self.name)?;
        write!(f, "Stored readings: {}", self.readings)?;
        if let Some(mean) = self.mean {
            write!(f, "\nCurrent mean: {mean:.2} {}", self.kind.unit())?;
        }
        Ok(())
    }
}

/// Every sensor's summary in registration order, plus the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrySummary {
    pub sensors: Vec<SensorSummary>,
    pub total: usize,
}

impl fmt::Display for RegistrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in &self.sensors {
            writeln!(f, "{summary}")?;
            writeln!(f)?;
        }
        write!(f, "Total sensors: {}", self.total)
    }
}

/// Errors raised by callers misusing the station outside the core contract.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum StationError {
    #[error("Sensor {sensor} records {expected} readings, got a {found} reading")]
    KindMismatch {
        sensor: String,
        expected: SensorKind,
        found: SensorKind,
    },

    #[error("Sensor not found: {0}")]
    SensorNotFound(String),

    #[error("No sensors registered; create one first")]
    NoSensors,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience result type.
pub type StationResult<T> = Result<T, StationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_omits_mean_when_empty() {
        let summary = SensorSummary {
            name: "P-105".to_string(),
            kind: SensorKind::Pressure,
            readings: 0,
            mean: None,
        };
        let text = summary.to_string();
        assert!(text.contains("=== Pressure sensor ==="));
        assert!(text.contains("Stored readings: 0"));
        assert!(!text.contains("Current mean"));
    }

    #[test]
    fn test_summary_reports_mean_with_unit() {
        let summary = SensorSummary {
            name: "T-001".to_string(),
            kind: SensorKind::Temperature,
            readings: 2,
            mean: Some(22.5),
        };
        assert!(summary.to_string().ends_with("Current mean: 22.50 C"));
    }

    #[test]
    fn test_report_serializes_with_outcome_tag() {
        let report = ProcessReport::Averaged {
            mean: 90.0,
            readings: 2,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "averaged");
        assert_eq!(json["mean"], 90.0);
    }

    #[test]
    fn test_last_reading_discarded_message() {
        let report = ProcessReport::MinimumDiscarded {
            removed: 18.5,
            remaining: 0,
            mean: None,
        };
        assert!(report.to_string().contains("No readings remain"));
    }
}
