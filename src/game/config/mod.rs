//! Config Module
//!
//! JSON configuration for the construct, its elements and the universe.

pub mod simulation_config;

pub use simulation_config::{ConfigError, ConstructConfig, SimulationConfig};
