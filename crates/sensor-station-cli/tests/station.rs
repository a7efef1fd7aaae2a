//! Integration tests for sensor-station-cli.
//!
//! Drives the station session and REPL command layer end to end.

use sensor_station::{ProcessReport, Reading, Sensor, SensorKind, StationError};
use sensor_station_cli::config::{resolve_history_path, resolve_seed, HISTORY_ENV, SEED_ENV};
use sensor_station_cli::repl::{execute, parse_command, ReplCommand};
use sensor_station_cli::session::{StationSession, MAX_SIMULATED_READINGS};

// ─────────────────────── helpers ───────────────────────

/// Session with a fixed seed and sensors T-1 and P-1.
fn seeded_session() -> StationSession {
    let mut session = StationSession::open(Some(1234));
    session.create_temperature("T-1").unwrap();
    session.create_pressure("P-1").unwrap();
    session
}

/// Parse and execute one REPL line.
fn run_line(session: &mut StationSession, line: &str) -> Result<String, StationError> {
    let command = parse_command(line)?;
    execute(session, &command)
}

// ═══════════════════════════════════════════════════════
// SESSION
// ═══════════════════════════════════════════════════════

#[test]
fn test_empty_station_rejects_menu_operations() {
    let mut session = StationSession::open(Some(1));
    assert_eq!(session.record("T-1", "20.0"), Err(StationError::NoSensors));
    assert_eq!(session.simulate("T-1", 3), Err(StationError::NoSensors));
    assert_eq!(session.process_all(), Err(StationError::NoSensors));
    assert_eq!(session.describe_all(), Err(StationError::NoSensors));
}

#[test]
fn test_record_parses_by_sensor_kind() {
    let mut session = seeded_session();
    assert_eq!(
        session.record("T-1", "21.5").unwrap(),
        Reading::Temperature(21.5)
    );
    assert_eq!(session.record("P-1", "95").unwrap(), Reading::Pressure(95));

    let err = session.record("P-1", "95.5").unwrap_err();
    assert!(matches!(err, StationError::InvalidInput(_)));
    let err = session.record("T-1", "warm").unwrap_err();
    assert!(matches!(err, StationError::InvalidInput(_)));
    let err = session.record("T-1", "NaN").unwrap_err();
    assert!(matches!(err, StationError::InvalidInput(_)));

    assert_eq!(session.registry().find("T-1").unwrap().len(), 1);
    assert_eq!(session.registry().find("P-1").unwrap().len(), 1);
}

#[test]
fn test_record_unknown_sensor() {
    let mut session = seeded_session();
    assert_eq!(
        session.record("X-404", "1"),
        Err(StationError::SensorNotFound("X-404".to_string()))
    );
}

#[test]
fn test_simulate_fills_history_within_ranges() {
    let mut session = seeded_session();
    let temps = session.simulate("T-1", 20).unwrap();
    let pressures = session.simulate("P-1", 20).unwrap();

    assert_eq!(temps.len(), 20);
    for reading in &temps {
        match reading {
            Reading::Temperature(v) => assert!((15.0..45.0).contains(v)),
            other => panic!("unexpected reading {other:?}"),
        }
    }
    for reading in &pressures {
        match reading {
            Reading::Pressure(v) => assert!((70..=110).contains(v)),
            other => panic!("unexpected reading {other:?}"),
        }
    }
    assert_eq!(session.registry().find("T-1").unwrap().len(), 20);
    assert_eq!(session.registry().find("P-1").unwrap().len(), 20);
}

#[test]
fn test_simulate_rejects_zero_count() {
    let mut session = seeded_session();
    let err = session.simulate("T-1", 0).unwrap_err();
    assert!(matches!(err, StationError::InvalidInput(_)));
}

#[test]
fn test_simulate_rejects_oversized_count() {
    let mut session = seeded_session();
    let err = session
        .simulate("T-1", MAX_SIMULATED_READINGS + 1)
        .unwrap_err();
    assert!(matches!(err, StationError::InvalidInput(_)));

    let command = parse_command(&format!("/simulate P-1 {}", usize::MAX)).unwrap();
    let err = execute(&mut session, &command).unwrap_err();
    assert!(matches!(err, StationError::InvalidInput(_)));

    assert!(session.registry().find("T-1").unwrap().is_empty());
    assert!(session.registry().find("P-1").unwrap().is_empty());
}

#[test]
fn test_simulate_accepts_count_at_limit() {
    let mut session = seeded_session();
    let readings = session.simulate("P-1", MAX_SIMULATED_READINGS).unwrap();
    assert_eq!(readings.len(), MAX_SIMULATED_READINGS);
}

#[test]
fn test_same_seed_same_readings() {
    let mut a = seeded_session();
    let mut b = seeded_session();
    assert_eq!(a.simulate("T-1", 8).unwrap(), b.simulate("T-1", 8).unwrap());
}

#[test]
fn test_create_rejects_blank_id() {
    let mut session = StationSession::open(Some(1));
    assert!(session.create_temperature("   ").is_err());
    assert!(session.create_pressure("P 1").is_err());
    assert!(session.registry().is_empty());
}

#[test]
fn test_process_all_end_to_end() {
    let mut session = seeded_session();
    for v in ["20.0", "10.0", "30.0"] {
        session.record("T-1", v).unwrap();
    }
    for v in ["80", "100"] {
        session.record("P-1", v).unwrap();
    }

    let processed = session.process_all().unwrap();
    assert_eq!(processed[0].kind, SensorKind::Temperature);
    assert_eq!(
        processed[0].report,
        ProcessReport::MinimumDiscarded {
            removed: 10.0,
            remaining: 2,
            mean: Some(25.0),
        }
    );
    assert_eq!(
        processed[1].report,
        ProcessReport::Averaged {
            mean: 90.0,
            readings: 2,
        }
    );

    let summary = session.describe_all().unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.sensors[0].mean, Some(25.0));
}

// ═══════════════════════════════════════════════════════
// REPL COMMANDS
// ═══════════════════════════════════════════════════════

#[test]
fn test_parse_commands() {
    assert_eq!(
        parse_command("/temp T-001").unwrap(),
        ReplCommand::CreateTemperature("T-001".to_string())
    );
    assert_eq!(
        parse_command("pressure P-105").unwrap(),
        ReplCommand::CreatePressure("P-105".to_string())
    );
    assert_eq!(
        parse_command("/record T-1 21.5").unwrap(),
        ReplCommand::Record {
            id: "T-1".to_string(),
            value: "21.5".to_string(),
        }
    );
    assert_eq!(
        parse_command("/simulate P-1 4").unwrap(),
        ReplCommand::Simulate {
            id: "P-1".to_string(),
            count: 4,
        }
    );
    assert_eq!(parse_command("/").unwrap(), ReplCommand::Help);
    assert_eq!(parse_command("/quit").unwrap(), ReplCommand::Exit);
}

#[test]
fn test_parse_rejects_bad_input() {
    assert!(parse_command("/temp").is_err());
    assert!(parse_command("/record T-1").is_err());
    assert!(parse_command("/simulate T-1 -3").is_err());
    assert!(parse_command("/simulate T-1 many").is_err());

    let err = parse_command("/launch").unwrap_err();
    assert!(err.to_string().contains("unknown command '/launch'"));
}

#[test]
fn test_repl_session_transcript() {
    let mut session = StationSession::open(Some(99));

    let out = run_line(&mut session, "/temp T-1").unwrap();
    assert_eq!(out, "Temperature sensor T-1 created.");
    run_line(&mut session, "/pressure P-1").unwrap();

    let out = run_line(&mut session, "/record P-1 80").unwrap();
    assert_eq!(out, "[P-1] Reading registered: 80 Pa");
    run_line(&mut session, "/record P-1 100").unwrap();

    let out = run_line(&mut session, "/process").unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("-> Processing sensor T-1"));
    assert!(lines[0].contains("No readings to process."));
    assert!(lines[1].contains("Mean pressure: 90.00 Pa (over 2 readings)"));

    let out = run_line(&mut session, "/describe").unwrap();
    assert!(out.contains("=== Temperature sensor ==="));
    assert!(out.contains("Current mean: 90.00 Pa"));
    assert!(out.ends_with("Total sensors: 2"));

    let out = run_line(&mut session, "/simulate T-1 3").unwrap();
    assert!(out.starts_with("[T-1] Simulated 3 readings:"));
}

#[test]
fn test_repl_errors_are_reported() {
    let mut session = seeded_session();
    let err = run_line(&mut session, "/record X-404 1").unwrap_err();
    assert_eq!(err.to_string(), "Sensor not found: X-404");

    let out = run_line(&mut session, "/port").unwrap();
    assert!(out.contains("Baud rate: 9600 bps"));
    assert!(run_line(&mut session, "/help").unwrap().contains("/simulate"));
}

// ═══════════════════════════════════════════════════════
// CONFIG
// ═══════════════════════════════════════════════════════

#[test]
fn test_seed_resolution() {
    assert_eq!(resolve_seed(Some(5)), Some(5));

    std::env::set_var(SEED_ENV, "77");
    assert_eq!(resolve_seed(None), Some(77));
    assert_eq!(resolve_seed(Some(5)), Some(5));

    std::env::set_var(SEED_ENV, "not-a-number");
    assert_eq!(resolve_seed(None), None);
    std::env::remove_var(SEED_ENV);
}

#[test]
fn test_history_path_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.txt");
    std::env::set_var(HISTORY_ENV, &path);
    assert_eq!(resolve_history_path(), path);
    std::env::remove_var(HISTORY_ENV);
}
