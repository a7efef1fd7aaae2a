//! Configuration loading and resolution.

use std::path::PathBuf;

/// Environment variable holding a fixed simulator seed.
pub const SEED_ENV: &str = "SENSOR_STATION_SEED";

/// Environment variable overriding the REPL history file location.
pub const HISTORY_ENV: &str = "SENSOR_STATION_HISTORY";

/// Resolve the simulator seed: explicit flag, then `SENSOR_STATION_SEED`.
///
/// `None` means the simulator draws from OS entropy.
pub fn resolve_seed(explicit: Option<u64>) -> Option<u64> {
    if explicit.is_some() {
        return explicit;
    }

    match std::env::var(SEED_ENV) {
        Ok(raw) => match raw.trim().parse() {
            Ok(seed) => Some(seed),
            Err(e) => {
                tracing::warn!("Ignoring {SEED_ENV}={raw}: {e}");
                None
            }
        },
        Err(_) => None,
    }
}

/// Resolve the REPL history file path.
pub fn resolve_history_path() -> PathBuf {
    if let Ok(env_path) = std::env::var(HISTORY_ENV) {
        return PathBuf::from(env_path);
    }

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());

    PathBuf::from(home).join(".sensor_station_history")
}
