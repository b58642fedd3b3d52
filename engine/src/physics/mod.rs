//! Physics module
//!
//! Kinematics for a single construct. Built from scratch without external
//! physics library dependencies.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//! - Mass in kg
//! - Air density in kg/m³
//! - Thrust envelopes in newtons
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam
//! - [`kinematics`] - Thrust, drag and gravity integration per tick

pub mod kinematics;
pub mod types;

pub use kinematics::{
    ConstructBody, KinematicsEngine, MotionState, ThrustEnvelope, TickOutcome, drag_deceleration,
};
pub use types::{Vec3, Vec4, basis_from_accumulator};
