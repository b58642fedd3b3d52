//! World Module
//!
//! The environment a construct flies through: the provider trait the
//! kinematics engine queries, a uniform provider for tests and headless runs,
//! and a celestial-body universe.

pub mod environment;
pub mod universe;

pub use environment::{CollisionMode, EnvironmentProvider, SPEED_OF_LIGHT, UniformEnvironment};
pub use universe::{CelestialBody, Universe};
