//! Environment Provider
//!
//! Point queries the kinematics engine makes against the world it flies in:
//! air density, gravity, collision, altitude and the speed of light.
//!
//! The provider is handed to a construct at assembly time as a shared
//! capability (`Arc<dyn EnvironmentProvider>`). Nothing in the engine reaches
//! for global world state, so a test can drive a construct through a fully
//! deterministic [`UniformEnvironment`].

use glam::Vec3;

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f32 = 299_792_458.0;

/// World-side queries consumed by the kinematics engine.
///
/// # Gravity convention
///
/// `gravity_at` returns what an accelerometer at rest would read: the vector
/// pointing *away* from the attracting mass. The engine subtracts it from the
/// commanded acceleration, so a positive reading pulls the construct down.
pub trait EnvironmentProvider: Send + Sync {
    /// Air density at `position` (kg/m³). Never negative.
    fn air_density_at(&self, position: Vec3) -> f32;

    /// Gravity reading at `position` (m/s²).
    fn gravity_at(&self, position: Vec3) -> Vec3;

    /// Whether `position` lies inside solid geometry.
    fn is_colliding_at(&self, position: Vec3) -> bool;

    /// Height above the nearest surface (meters).
    fn altitude_at(&self, position: Vec3) -> f32;

    /// Universal speed limit `c` (m/s). Always positive.
    fn speed_of_light(&self) -> f32 {
        SPEED_OF_LIGHT
    }
}

/// Collision behavior of a [`UniformEnvironment`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CollisionMode {
    /// Nothing is ever hit.
    #[default]
    Never,
    /// Every query reports a collision.
    Always,
    /// Collides with everything below the given height (a flat floor at y = height).
    Floor(f32),
}

/// An environment with the same density and gravity everywhere.
///
/// Used for headless runs and as the deterministic mock in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformEnvironment {
    /// Air density everywhere (kg/m³)
    pub air_density: f32,
    /// Gravity reading everywhere (m/s²)
    pub gravity: Vec3,
    /// Collision rule
    pub collision: CollisionMode,
    /// Speed of light (m/s)
    pub c: f32,
}

impl Default for UniformEnvironment {
    fn default() -> Self {
        Self::vacuum()
    }
}

impl UniformEnvironment {
    /// Empty space: no air, no gravity, no collisions.
    pub fn vacuum() -> Self {
        Self {
            air_density: 0.0,
            gravity: Vec3::ZERO,
            collision: CollisionMode::Never,
            c: SPEED_OF_LIGHT,
        }
    }

    /// Uniform atmosphere of the given density, no gravity.
    pub fn with_air_density(air_density: f32) -> Self {
        Self {
            air_density: air_density.max(0.0),
            ..Self::vacuum()
        }
    }

    /// Builder-style gravity override.
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder-style collision override.
    pub fn with_collision(mut self, collision: CollisionMode) -> Self {
        self.collision = collision;
        self
    }

    /// Builder-style speed of light override.
    pub fn with_speed_of_light(mut self, c: f32) -> Self {
        self.c = c;
        self
    }
}

impl EnvironmentProvider for UniformEnvironment {
    fn air_density_at(&self, _position: Vec3) -> f32 {
        self.air_density
    }

    fn gravity_at(&self, _position: Vec3) -> Vec3 {
        self.gravity
    }

    fn is_colliding_at(&self, position: Vec3) -> bool {
        match self.collision {
            CollisionMode::Never => false,
            CollisionMode::Always => true,
            CollisionMode::Floor(height) => position.y < height,
        }
    }

    fn altitude_at(&self, position: Vec3) -> f32 {
        match self.collision {
            CollisionMode::Floor(height) => position.y - height,
            _ => position.y,
        }
    }

    fn speed_of_light(&self) -> f32 {
        self.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacuum_defaults() {
        let env = UniformEnvironment::default();
        assert_eq!(env.air_density_at(Vec3::new(1.0, 2.0, 3.0)), 0.0);
        assert_eq!(env.gravity_at(Vec3::ZERO), Vec3::ZERO);
        assert!(!env.is_colliding_at(Vec3::splat(-1.0e6)));
        assert_eq!(env.speed_of_light(), SPEED_OF_LIGHT);
    }

    #[test]
    fn test_negative_density_is_clamped() {
        let env = UniformEnvironment::with_air_density(-3.0);
        assert_eq!(env.air_density_at(Vec3::ZERO), 0.0);
    }

    #[test]
    fn test_floor_collision() {
        let env = UniformEnvironment::vacuum().with_collision(CollisionMode::Floor(2.0));
        assert!(env.is_colliding_at(Vec3::new(0.0, 1.9, 0.0)));
        assert!(!env.is_colliding_at(Vec3::new(0.0, 2.0, 0.0)));
        assert_eq!(env.altitude_at(Vec3::new(5.0, 12.0, 0.0)), 10.0);
    }

    #[test]
    fn test_always_collides() {
        let env = UniformEnvironment::vacuum().with_collision(CollisionMode::Always);
        assert!(env.is_colliding_at(Vec3::new(0.0, 1.0e9, 0.0)));
    }
}
