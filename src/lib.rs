//! IEEE 1115 standby battery sizing for engine-starting duty cycles.

pub mod cli;
pub mod config;
pub mod io;
pub mod runner;
/// Discharge-curve interpolation, duty-cycle indexing, and section sizing.
pub mod sizing;
