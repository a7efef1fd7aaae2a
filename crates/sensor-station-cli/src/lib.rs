//! Sensor station CLI — interactive monitoring over the sensor registry.

pub mod config;
pub mod repl;
pub mod session;

pub use config::{resolve_history_path, resolve_seed};
pub use repl::{execute, parse_command, ReplCommand};
pub use session::StationSession;
