//! Universe Module
//!
//! A small celestial-body world: every body is a sphere with surface gravity
//! and an exponential atmosphere. Implements [`EnvironmentProvider`] so a
//! construct can fly from a planet's surface into space.
//!
//! ## Units
//! 1 unit = 1 meter (SI units). Densities in kg/m³, gravity in m/s².
//!
//! ## Atmosphere
//! `density = sea_level_density * exp(-altitude / scale_height)` up to
//! `atmosphere_height`, zero above. Below the surface the sea level density
//! applies.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::environment::{EnvironmentProvider, SPEED_OF_LIGHT};

/// A spherical body with gravity and an optional atmosphere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelestialBody {
    /// Display name (e.g. "Alioth")
    pub name: String,
    /// World-space center (meters)
    pub center: Vec3,
    /// Surface radius (meters)
    pub radius: f32,
    /// Gravity magnitude at the surface (m/s²)
    pub surface_gravity: f32,
    /// Air density at the surface (kg/m³), 0 for airless bodies
    pub sea_level_density: f32,
    /// Height above the surface where the atmosphere ends (meters)
    pub atmosphere_height: f32,
    /// Altitude over which density falls by a factor of e (meters)
    pub scale_height: f32,
}

impl Default for CelestialBody {
    fn default() -> Self {
        // Earth-like body scaled down to game size
        Self {
            name: "Planet".to_string(),
            center: Vec3::ZERO,
            radius: 126_000.0,
            surface_gravity: 9.81,
            sea_level_density: 1.225,
            atmosphere_height: 6_000.0,
            scale_height: 1_500.0,
        }
    }
}

impl CelestialBody {
    /// Create an airless body (moon, asteroid).
    pub fn airless(name: impl Into<String>, center: Vec3, radius: f32, surface_gravity: f32) -> Self {
        Self {
            name: name.into(),
            center,
            radius,
            surface_gravity,
            sea_level_density: 0.0,
            atmosphere_height: 0.0,
            scale_height: 1.0,
        }
    }

    /// Signed distance from the surface; negative inside the body.
    pub fn surface_distance(&self, position: Vec3) -> f32 {
        position.distance(self.center) - self.radius
    }

    /// Whether `position` is strictly inside the body.
    pub fn contains(&self, position: Vec3) -> bool {
        self.surface_distance(position) < 0.0
    }

    /// Air density contributed by this body at `position`.
    pub fn air_density_at(&self, position: Vec3) -> f32 {
        if self.sea_level_density <= 0.0 {
            return 0.0;
        }
        let altitude = self.surface_distance(position);
        if altitude < 0.0 {
            return self.sea_level_density;
        }
        if altitude >= self.atmosphere_height {
            return 0.0;
        }
        self.sea_level_density * (-altitude / self.scale_height.max(f32::EPSILON)).exp()
    }

    /// Gravity reading from this body at `position`.
    ///
    /// Inverse-square falloff outside the surface, linear inside (uniform
    /// density sphere). Points away from the center.
    pub fn gravity_at(&self, position: Vec3) -> Vec3 {
        let offset = position - self.center;
        let r = offset.length();
        let Some(outward) = offset.try_normalize() else {
            return Vec3::ZERO;
        };
        let magnitude = if r >= self.radius {
            self.surface_gravity * (self.radius / r).powi(2)
        } else {
            self.surface_gravity * (r / self.radius)
        };
        outward * magnitude
    }
}

/// A collection of celestial bodies acting as the construct's environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Universe {
    /// Bodies in the universe, in no particular order
    pub bodies: Vec<CelestialBody>,
    /// Speed of light (m/s)
    pub c: f32,
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            bodies: vec![CelestialBody::default()],
            c: SPEED_OF_LIGHT,
        }
    }
}

impl Universe {
    /// An empty universe: deep space everywhere.
    pub fn empty() -> Self {
        Self {
            bodies: Vec::new(),
            c: SPEED_OF_LIGHT,
        }
    }

    /// Add a body.
    pub fn with_body(mut self, body: CelestialBody) -> Self {
        self.bodies.push(body);
        self
    }

    /// The body whose surface is closest to `position`.
    pub fn nearest_body(&self, position: Vec3) -> Option<&CelestialBody> {
        self.bodies.iter().min_by(|a, b| {
            a.surface_distance(position)
                .total_cmp(&b.surface_distance(position))
        })
    }
}

impl EnvironmentProvider for Universe {
    fn air_density_at(&self, position: Vec3) -> f32 {
        self.bodies
            .iter()
            .map(|body| body.air_density_at(position))
            .fold(0.0, f32::max)
    }

    fn gravity_at(&self, position: Vec3) -> Vec3 {
        self.bodies
            .iter()
            .map(|body| body.gravity_at(position))
            .sum()
    }

    fn is_colliding_at(&self, position: Vec3) -> bool {
        self.bodies.iter().any(|body| body.contains(position))
    }

    fn altitude_at(&self, position: Vec3) -> f32 {
        match self.nearest_body(position) {
            Some(body) => body.surface_distance(position),
            None => position.length(),
        }
    }

    fn speed_of_light(&self) -> f32 {
        self.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn planet() -> CelestialBody {
        CelestialBody {
            name: "Test".to_string(),
            center: Vec3::ZERO,
            radius: 1000.0,
            surface_gravity: 10.0,
            sea_level_density: 1.2,
            atmosphere_height: 500.0,
            scale_height: 100.0,
        }
    }

    #[test]
    fn test_density_at_surface_and_above_atmosphere() {
        let body = planet();
        assert_relative_eq!(body.air_density_at(Vec3::new(0.0, 1000.0, 0.0)), 1.2);
        assert_eq!(body.air_density_at(Vec3::new(0.0, 1500.0, 0.0)), 0.0);
        assert_eq!(body.air_density_at(Vec3::new(0.0, 5000.0, 0.0)), 0.0);
    }

    #[test]
    fn test_density_falls_with_altitude() {
        let body = planet();
        let low = body.air_density_at(Vec3::new(0.0, 1050.0, 0.0));
        let high = body.air_density_at(Vec3::new(0.0, 1200.0, 0.0));
        assert!(low > high);
        assert_relative_eq!(high, 1.2 * (-2.0f32).exp(), epsilon = 1e-5);
    }

    #[test]
    fn test_gravity_points_outward_with_inverse_square() {
        let body = planet();
        let g_surface = body.gravity_at(Vec3::new(0.0, 1000.0, 0.0));
        assert_relative_eq!(g_surface.y, 10.0, epsilon = 1e-4);
        let g_far = body.gravity_at(Vec3::new(2000.0, 0.0, 0.0));
        assert_relative_eq!(g_far.x, 2.5, epsilon = 1e-4);
        assert_eq!(body.gravity_at(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_universe_collision_and_altitude() {
        let universe = Universe::empty().with_body(planet());
        assert!(universe.is_colliding_at(Vec3::new(0.0, 999.0, 0.0)));
        assert!(!universe.is_colliding_at(Vec3::new(0.0, 1001.0, 0.0)));
        assert_relative_eq!(universe.altitude_at(Vec3::new(0.0, 1250.0, 0.0)), 250.0);
    }

    #[test]
    fn test_empty_universe_is_deep_space() {
        let universe = Universe::empty();
        let p = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(universe.air_density_at(p), 0.0);
        assert_eq!(universe.gravity_at(p), Vec3::ZERO);
        assert!(!universe.is_colliding_at(p));
        assert_eq!(universe.altitude_at(p), 5.0);
    }

    #[test]
    fn test_nearest_body_picks_closest_surface() {
        let universe = Universe::empty()
            .with_body(planet())
            .with_body(CelestialBody::airless("Moon", Vec3::new(10_000.0, 0.0, 0.0), 200.0, 1.6));
        let near_moon = Vec3::new(9_700.0, 0.0, 0.0);
        let nearest = universe.nearest_body(near_moon).map(|b| b.name.as_str());
        assert_eq!(nearest, Some("Moon"));
        assert_eq!(universe.air_density_at(near_moon), 0.0);
    }
}
