//! Simulation Configuration
//!
//! Everything needed to assemble a construct and its world, loadable from a
//! JSON file. Every section has defaults, so `{}` is a valid configuration:
//! a 10 t construct hovering 100 m above the default planet.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::construct::elements::{CORE_ELEMENT_ID, ElementRecord};
use crate::physics::ConstructBody;
use crate::world::Universe;

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for this schema.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The values parse but violate an invariant.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// CONSTRUCT CONFIG
// ============================================================================

/// Initial placement and physical constants of the construct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructConfig {
    /// Starting position (meters)
    pub position: Vec3,
    /// Starting orientation accumulator
    pub rotation: Vec3,
    /// Mass, cross-section and thrust envelope
    pub body: ConstructBody,
    /// Hit points of the construct's own element record
    pub core_max_hit_points: u32,
}

impl Default for ConstructConfig {
    fn default() -> Self {
        Self {
            // 100 m above the default planet's surface
            position: Vec3::new(0.0, 126_100.0, 0.0),
            rotation: Vec3::ZERO,
            body: ConstructBody::default(),
            core_max_hit_points: 1_000,
        }
    }
}

// ============================================================================
// SIMULATION CONFIG
// ============================================================================

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Celestial bodies and physical constants
    pub universe: Universe,
    /// The construct itself
    pub construct: ConstructConfig,
    /// Additional elements, appended after the construct's own record
    pub elements: Vec<ElementRecord>,
}

impl SimulationConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            bodies = config.universe.bodies.len(),
            elements = config.elements.len(),
            "loaded simulation config"
        );
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the kinematics engine relies on but never checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let body = &self.construct.body;
        if !(body.mass >= 0.0 && body.mass.is_finite()) {
            return Err(ConfigError::Invalid(format!("mass must be >= 0, got {}", body.mass)));
        }
        if body.mass == 0.0 {
            tracing::warn!("construct mass is zero; drag and thrust limits will be infinite");
        }
        if !(body.cross_sectional_area >= 0.0 && body.cross_sectional_area.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "cross_sectional_area must be >= 0, got {}",
                body.cross_sectional_area
            )));
        }
        for v in body.envelope.vectors() {
            if !v.is_finite() || v.min_element() < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "thrust envelope components must be finite and >= 0, got {v}"
                )));
            }
        }

        if !(self.universe.c > 0.0 && self.universe.c.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "speed of light must be > 0, got {}",
                self.universe.c
            )));
        }
        for planet in &self.universe.bodies {
            let positive = |v: f32| v > 0.0 && v.is_finite();
            let non_negative = |v: f32| v >= 0.0 && v.is_finite();
            let checks = [
                ("radius", positive(planet.radius)),
                ("scale_height", positive(planet.scale_height)),
                ("sea_level_density", non_negative(planet.sea_level_density)),
                ("atmosphere_height", non_negative(planet.atmosphere_height)),
                ("surface_gravity", planet.surface_gravity.is_finite()),
                ("center", planet.center.is_finite()),
            ];
            if let Some((field, _)) = checks.iter().find(|(_, ok)| !ok) {
                return Err(ConfigError::Invalid(format!(
                    "body '{}' has an invalid {field}",
                    planet.name
                )));
            }
        }

        let mut seen = vec![CORE_ELEMENT_ID];
        for element in &self.elements {
            if seen.contains(&element.id) {
                return Err(ConfigError::Invalid(format!(
                    "element id {} is reserved or duplicated",
                    element.id
                )));
            }
            seen.push(element.id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ThrustEnvelope;
    use crate::world::CelestialBody;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = SimulationConfig::from_json_str("{}").expect("defaults are valid");
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.construct.body.mass, 10_000.0);
        assert_eq!(config.construct.body.cross_sectional_area, 10.0);
        assert_eq!(config.universe.bodies.len(), 1);
    }

    #[test]
    fn test_partial_json_overrides() {
        let json = r#"{
            "construct": { "body": { "mass": 2500.0 }, "position": [1.0, 2.0, 3.0] },
            "universe": { "bodies": [], "c": 1000.0 },
            "elements": [ { "id": 2, "class_name": "Engine", "hit_points": 5, "max_hit_points": 10, "mass": 40.0 } ]
        }"#;
        let config = SimulationConfig::from_json_str(json).expect("valid config");
        assert_eq!(config.construct.body.mass, 2500.0);
        assert_eq!(config.construct.body.cross_sectional_area, 10.0);
        assert_eq!(config.construct.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(config.universe.bodies.is_empty());
        assert_eq!(config.universe.c, 1000.0);
        assert_eq!(config.elements[0].class_name, "Engine");
    }

    #[test]
    fn test_negative_envelope_rejected() {
        let mut config = SimulationConfig::default();
        config.construct.body.envelope = ThrustEnvelope {
            atmo_negative: Vec3::new(1.0, -1.0, 1.0),
            ..ThrustEnvelope::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_mass_rejected() {
        let mut config = SimulationConfig::default();
        config.construct.body.mass = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_reserved_and_duplicate_ids_rejected() {
        let mut config = SimulationConfig::default();
        config.elements.push(ElementRecord::new(CORE_ELEMENT_ID, "Clash", 1, 1.0));
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.elements.push(ElementRecord::new(4, "A", 1, 1.0));
        config.elements.push(ElementRecord::new(4, "B", 1, 1.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_c_rejected() {
        let mut config = SimulationConfig::default();
        config.universe.c = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_body_fields_rejected() {
        let cases: [fn(&mut CelestialBody); 5] = [
            |b: &mut CelestialBody| b.radius = f32::NAN,
            |b: &mut CelestialBody| b.radius = 0.0,
            |b: &mut CelestialBody| b.sea_level_density = f32::NAN,
            |b: &mut CelestialBody| b.scale_height = 0.0,
            |b: &mut CelestialBody| b.atmosphere_height = f32::INFINITY,
        ];
        for corrupt in cases {
            let mut config = SimulationConfig::default();
            corrupt(&mut config.universe.bodies[0]);
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_airless_body_is_valid() {
        let mut config = SimulationConfig::default();
        config.universe.bodies.push(CelestialBody::airless("Moon", Vec3::new(5.0e5, 0.0, 0.0), 3.0e4, 1.6));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let result = SimulationConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimulationConfig::default();
        let json = config.to_json_string().expect("serializable");
        let parsed = SimulationConfig::from_json_str(&json).expect("parsable");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = SimulationConfig::load(Path::new("definitely/not/here.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
