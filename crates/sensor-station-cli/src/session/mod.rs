//! Station session: the registry plus its simulated data source.

pub mod manager;

pub use manager::{StationSession, MAX_SIMULATED_READINGS};
