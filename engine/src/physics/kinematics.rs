//! Construct kinematics
//!
//! Per-tick motion integration for a single construct: commanded thrust,
//! atmospheric drag and gravity are combined into one deterministic
//! position/velocity/orientation update.
//!
//! # Tick order
//!
//! 1. density at the current position
//! 2. drag deceleration (zero when the velocity has no direction)
//! 3. commanded acceleration clamped against the directional thrust envelope
//! 4. applied = clamped - gravity - drag
//! 5. velocity integrated first, then the new velocity moves the position
//!    (semi-implicit Euler)
//! 6. a collision at the provisional position arrests the construct
//! 7. orientation integrates only when the construct was not arrested
//!
//! # Example
//!
//! ```ignore
//! use construct_sim_engine::physics::kinematics::{KinematicsEngine, ConstructBody};
//! use construct_sim_engine::world::UniformEnvironment;
//! use glam::Vec3;
//!
//! let env = UniformEnvironment::with_air_density(1.2);
//! let mut engine = KinematicsEngine::new(ConstructBody::default());
//! engine.set_thrust_command(Vec3::new(0.0, 5.0, 0.0));
//! engine.tick(&env, 1.0 / 60.0);
//! ```

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::world::EnvironmentProvider;

// ============================================================================
// THRUST ENVELOPE
// ============================================================================

/// Maximum thrust force per axis, split by sign and by medium.
///
/// Every component is a force magnitude (newtons) and is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrustEnvelope {
    /// Max force along +X/+Y/+Z inside an atmosphere
    pub atmo_positive: Vec3,
    /// Max force along -X/-Y/-Z inside an atmosphere
    pub atmo_negative: Vec3,
    /// Max force along +X/+Y/+Z in space
    pub space_positive: Vec3,
    /// Max force along -X/-Y/-Z in space
    pub space_negative: Vec3,
}

impl Default for ThrustEnvelope {
    fn default() -> Self {
        Self::uniform(100_000.0)
    }
}

impl ThrustEnvelope {
    /// Same force limit on every axis, sign and medium.
    pub fn uniform(force: f32) -> Self {
        let v = Vec3::splat(force);
        Self {
            atmo_positive: v,
            atmo_negative: v,
            space_positive: v,
            space_negative: v,
        }
    }

    /// Iterate the four envelope vectors in (atmo+, atmo-, space+, space-) order.
    pub fn vectors(&self) -> [Vec3; 4] {
        [
            self.atmo_positive,
            self.atmo_negative,
            self.space_positive,
            self.space_negative,
        ]
    }

    /// Envelope magnitudes projected on `axis`.
    ///
    /// Componentwise product with the axis, then length. Returned as
    /// (atmo+, atmo-, space+, space-).
    pub fn along_axis(&self, axis: Vec3) -> Vec4 {
        Vec4::new(
            (self.atmo_positive * axis).length(),
            (self.atmo_negative * axis).length(),
            (self.space_positive * axis).length(),
            (self.space_negative * axis).length(),
        )
    }
}

// ============================================================================
// BODY / MOTION STATE
// ============================================================================

/// Physical constants of a construct. Fixed after assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructBody {
    /// Rest mass (kilograms)
    pub mass: f32,
    /// Area facing the airflow (m²), used for drag
    pub cross_sectional_area: f32,
    /// Directional thrust limits
    pub envelope: ThrustEnvelope,
}

impl Default for ConstructBody {
    fn default() -> Self {
        Self {
            mass: 10_000.0,
            cross_sectional_area: 10.0,
            envelope: ThrustEnvelope::default(),
        }
    }
}

/// Motion state of a construct, world frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MotionState {
    /// Position (meters)
    pub position: Vec3,
    /// Velocity (m/s)
    pub velocity: Vec3,
    /// Net acceleration applied during the last tick (m/s²)
    pub acceleration: Vec3,
    /// Orientation accumulator. Additive, never normalized.
    pub rotation: Vec3,
    /// Rate of change of `rotation`
    pub angular_velocity: Vec3,
    /// Rate of change of `angular_velocity`
    pub angular_acceleration: Vec3,
    /// Drag deceleration computed during the last tick (m/s²)
    pub air_resistance: Vec3,
    /// True only for the tick in which a collision arrested the construct
    pub is_colliding: bool,
}

/// Result of a single [`KinematicsEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Position advanced to the provisional position
    Moved,
    /// A collision at the provisional position stopped the construct in place
    Arrested,
}

// ============================================================================
// DRAG
// ============================================================================

/// Drag deceleration for a body moving at `velocity`.
///
/// Magnitude `(density * area / 2) * |v|² / mass`, pointing along the velocity
/// (the caller subtracts it). A velocity with no direction yields exactly
/// `Vec3::ZERO`, as does any NaN result.
pub fn drag_deceleration(velocity: Vec3, air_density: f32, cross_sectional_area: f32, mass: f32) -> Vec3 {
    let Some(direction) = velocity.try_normalize() else {
        return Vec3::ZERO;
    };
    let force = (air_density * cross_sectional_area / 2.0) * velocity.length_squared();
    let drag = direction * (force / mass);
    if drag.is_nan() { Vec3::ZERO } else { drag }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Integrates the motion of one construct.
///
/// Not reentrant: exactly one `tick` per logical step, and no other mutation
/// while it runs (`&mut self` enforces this).
#[derive(Debug, Clone)]
pub struct KinematicsEngine {
    body: ConstructBody,
    state: MotionState,
    thrust_command: Vec3,
    rotation_command: Vec3,
}

impl KinematicsEngine {
    /// Create an engine at rest at the origin.
    pub fn new(body: ConstructBody) -> Self {
        Self {
            body,
            state: MotionState::default(),
            thrust_command: Vec3::ZERO,
            rotation_command: Vec3::ZERO,
        }
    }

    /// Start at `position` instead of the origin.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.state.position = position;
        self
    }

    /// Start with the given orientation accumulator.
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.state.rotation = rotation;
        self
    }

    pub fn body(&self) -> &ConstructBody {
        &self.body
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn mass(&self) -> f32 {
        self.body.mass
    }

    pub fn cross_sectional_area(&self) -> f32 {
        self.body.cross_sectional_area
    }

    pub fn thrust_command(&self) -> Vec3 {
        self.thrust_command
    }

    pub fn rotation_command(&self) -> Vec3 {
        self.rotation_command
    }

    /// Store the commanded linear acceleration. Takes effect on the next tick.
    pub fn set_thrust_command(&mut self, acceleration: Vec3) {
        self.thrust_command = acceleration;
    }

    /// Store the commanded angular acceleration. Takes effect on the next tick.
    pub fn set_rotation_command(&mut self, angular_acceleration: Vec3) {
        self.rotation_command = angular_acceleration;
    }

    /// Teleport. Bypasses integration and collision checks.
    pub fn set_position(&mut self, position: Vec3) {
        self.state.position = position;
    }

    /// Overwrite the velocity. Bypasses integration.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.state.velocity = velocity;
    }

    /// Advance the construct by `dt` seconds.
    ///
    /// `dt` must be positive; zero or negative values are not rejected and
    /// simply produce a degenerate step.
    pub fn tick(&mut self, env: &dyn EnvironmentProvider, dt: f32) -> TickOutcome {
        self.state.angular_acceleration = self.rotation_command;

        let position = self.state.position;
        let air_density = env.air_density_at(position);
        self.state.air_resistance = drag_deceleration(
            self.state.velocity,
            air_density,
            self.body.cross_sectional_area,
            self.body.mass,
        );

        let clamped = self.clamp_to_envelope(env, self.thrust_command);
        let applied = clamped - env.gravity_at(position) - self.state.air_resistance;
        self.state.acceleration = applied;

        // Semi-implicit Euler: the updated velocity moves the position
        self.state.velocity += applied * dt;
        let provisional = position + self.state.velocity * dt;

        let outcome = if env.is_colliding_at(provisional) {
            self.state.velocity = Vec3::ZERO;
            self.state.is_colliding = true;
            tracing::debug!(?position, ?provisional, "construct arrested by collision");
            TickOutcome::Arrested
        } else {
            self.state.position = provisional;
            self.state.is_colliding = false;
            TickOutcome::Moved
        };

        if outcome == TickOutcome::Moved {
            self.state.rotation += self.state.angular_velocity * dt;
            self.state.angular_velocity += self.state.angular_acceleration * dt;
        }

        tracing::trace!(
            dt,
            air_density,
            position = ?self.state.position,
            velocity = ?self.state.velocity,
            "kinematics tick"
        );

        outcome
    }

    /// Clamp `command` against the envelope for its own direction.
    ///
    /// Per axis this is the algebraic minimum of the command and the envelope
    /// limit. Only overshoot in the positive direction is limited; a large
    /// negative command passes through unchanged.
    pub fn clamp_to_envelope(&self, env: &dyn EnvironmentProvider, command: Vec3) -> Vec3 {
        self.max_possible_acceleration(env, command).min(command)
    }

    /// Maximum acceleration per axis for thrust in `direction`.
    ///
    /// Uses the atmosphere envelope when the density at the current position
    /// is strictly positive, the space envelope otherwise. For each axis the
    /// positive limit applies when `direction` is >= 0 on that axis.
    pub fn max_possible_acceleration(&self, env: &dyn EnvironmentProvider, direction: Vec3) -> Vec3 {
        let envelope = &self.body.envelope;
        let (positive, negative) = if env.air_density_at(self.state.position) > 0.0 {
            (envelope.atmo_positive, envelope.atmo_negative)
        } else {
            (envelope.space_positive, envelope.space_negative)
        };

        let pick = |d: f32, pos: f32, neg: f32| if d >= 0.0 { pos } else { neg };
        Vec3::new(
            pick(direction.x, positive.x, negative.x),
            pick(direction.y, positive.y, negative.y),
            pick(direction.z, positive.z, negative.z),
        ) / self.body.mass
    }

    /// Envelope magnitudes along an arbitrary axis: (atmo+, atmo-, space+, space-).
    pub fn axis_kinematics(&self, axis: Vec3) -> Vec4 {
        self.body.envelope.along_axis(axis)
    }

    /// Relativistic apparent mass `m / sqrt(1 - v²/c²)`.
    ///
    /// Informational only, never used by `tick`. At or above `c` the result is
    /// infinite or NaN.
    pub fn apparent_mass(&self, env: &dyn EnvironmentProvider) -> f32 {
        let c = env.speed_of_light() as f64;
        let v2 = self.state.velocity.length_squared() as f64;
        (self.body.mass as f64 / (1.0 - v2 / (c * c)).sqrt()) as f32
    }
}

static_assertions::assert_impl_all!(KinematicsEngine: Send, Sync, Clone);
