//! Construct Simulation Engine
//!
//! Per-tick kinematics for a single construct (a vehicle-like aggregate of
//! elements) and the script-facing state facade a host game binds to.
//!
//! # Modules
//!
//! - [`physics`] - Thrust envelopes, drag and the kinematics integrator
//! - [`world`] - Environment provider trait, uniform and celestial-body worlds
//! - [`game`] - Construct assembly, element registry, configuration, script facade
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use construct_sim_engine::game::{Construct, ConstructConfig};
//! use construct_sim_engine::world::Universe;
//! use glam::Vec3;
//!
//! let mut construct = Construct::new(Arc::new(Universe::default()), &ConstructConfig::default());
//! construct.set_thrust(Vec3::new(0.0, 12.0, 0.0));
//! construct.tick(1.0 / 60.0);
//!
//! let altitude = construct.script().get_altitude();
//! ```

pub mod physics;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use game::{Construct, ConstructConfig, SimulationConfig};
pub use physics::{ConstructBody, KinematicsEngine, MotionState, ThrustEnvelope, TickOutcome};
pub use world::{EnvironmentProvider, Universe, UniformEnvironment};
