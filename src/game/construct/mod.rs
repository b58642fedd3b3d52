//! Construct Module
//!
//! A construct is the kinematics engine, its element registry and the
//! environment capability it was assembled with. The registry's first record
//! always describes the construct itself; the engine never reads it back.

pub mod elements;

use std::sync::Arc;

use glam::Vec3;

use crate::game::config::{ConstructConfig, SimulationConfig};
use crate::game::script::ScriptApi;
use crate::physics::{KinematicsEngine, TickOutcome};
use crate::world::EnvironmentProvider;

pub use elements::{CORE_ELEMENT_CLASS, CORE_ELEMENT_ID, ElementId, ElementRecord, ElementRegistry};

/// A simulated construct.
pub struct Construct {
    environment: Arc<dyn EnvironmentProvider>,
    engine: KinematicsEngine,
    elements: ElementRegistry,
}

impl std::fmt::Debug for Construct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Construct")
            .field("engine", &self.engine)
            .field("elements_len", &self.elements.len())
            .finish()
    }
}

impl Construct {
    /// Assemble a construct from its configuration.
    ///
    /// The registry starts with the construct's own record (id 1).
    pub fn new(environment: Arc<dyn EnvironmentProvider>, config: &ConstructConfig) -> Self {
        let engine = KinematicsEngine::new(config.body)
            .with_position(config.position)
            .with_rotation(config.rotation);

        let mut elements = ElementRegistry::new();
        elements.add(ElementRecord::new(
            CORE_ELEMENT_ID,
            CORE_ELEMENT_CLASS,
            config.core_max_hit_points,
            config.body.mass,
        ));

        Self {
            environment,
            engine,
            elements,
        }
    }

    /// Assemble a construct and its extra elements from a full simulation config.
    pub fn from_config(environment: Arc<dyn EnvironmentProvider>, config: &SimulationConfig) -> Self {
        let mut construct = Self::new(environment, &config.construct);
        for element in &config.elements {
            construct.add_element(element.clone());
        }
        construct
    }

    /// Construct id as seen by scripts.
    pub fn id(&self) -> ElementId {
        CORE_ELEMENT_ID
    }

    pub fn engine(&self) -> &KinematicsEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut KinematicsEngine {
        &mut self.engine
    }

    pub fn elements(&self) -> &ElementRegistry {
        &self.elements
    }

    pub fn environment(&self) -> &dyn EnvironmentProvider {
        self.environment.as_ref()
    }

    /// Append an element record.
    pub fn add_element(&mut self, record: ElementRecord) {
        tracing::debug!(id = record.id, class = %record.class_name, "element added");
        self.elements.add(record);
    }

    /// Advance the construct by one step of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        self.engine.tick(self.environment.as_ref(), dt)
    }

    /// Store the commanded linear acceleration for the next tick.
    pub fn set_thrust(&mut self, acceleration: Vec3) {
        self.engine.set_thrust_command(acceleration);
    }

    /// Store the commanded angular acceleration for the next tick.
    pub fn set_rotation(&mut self, angular_acceleration: Vec3) {
        self.engine.set_rotation_command(angular_acceleration);
    }

    /// Apparent (relativistic) mass in the construct's environment.
    pub fn apparent_mass(&self) -> f32 {
        self.engine.apparent_mass(self.environment.as_ref())
    }

    /// Maximum per-axis acceleration for thrust in `direction` at the current position.
    pub fn max_possible_acceleration(&self, direction: Vec3) -> Vec3 {
        self.engine
            .max_possible_acceleration(self.environment.as_ref(), direction)
    }

    /// Script-facing facade over this construct.
    pub fn script(&mut self) -> ScriptApi<'_> {
        ScriptApi::new(self)
    }
}

static_assertions::assert_impl_all!(Construct: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{CollisionMode, UniformEnvironment};

    fn construct(env: UniformEnvironment) -> Construct {
        let config = ConstructConfig {
            position: Vec3::ZERO,
            ..ConstructConfig::default()
        };
        Construct::new(Arc::new(env), &config)
    }

    #[test]
    fn test_core_element_is_first() {
        let c = construct(UniformEnvironment::vacuum());
        let first = &c.elements().list()[0];
        assert_eq!(first.id, CORE_ELEMENT_ID);
        assert_eq!(first.class_name, CORE_ELEMENT_CLASS);
        assert_eq!(first.mass, c.engine().mass());
        assert_eq!(c.id(), CORE_ELEMENT_ID);
    }

    #[test]
    fn test_from_config_appends_elements() {
        let mut config = SimulationConfig::default();
        config.elements.push(ElementRecord::new(2, "Engine", 100, 50.0));
        config.elements.push(ElementRecord::new(3, "Tank", 80, 300.0));
        let c = Construct::from_config(Arc::new(UniformEnvironment::vacuum()), &config);
        assert_eq!(c.elements().ids(), vec![1, 2, 3]);
        assert_eq!(c.engine().state().position, config.construct.position);
    }

    #[test]
    fn test_tick_uses_owned_environment() {
        let mut c = construct(UniformEnvironment::vacuum().with_collision(CollisionMode::Always));
        c.engine_mut().set_velocity(Vec3::X);
        assert_eq!(c.tick(1.0), TickOutcome::Arrested);
        assert!(c.engine().state().is_colliding);
    }

    #[test]
    fn test_set_thrust_applies_next_tick() {
        let mut c = construct(UniformEnvironment::vacuum());
        c.set_thrust(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(c.engine().state().velocity, Vec3::ZERO);
        c.tick(2.0);
        assert_eq!(c.engine().state().velocity, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(c.engine().state().position, Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn test_element_mass_does_not_change_engine_mass() {
        let mut c = construct(UniformEnvironment::vacuum());
        c.add_element(ElementRecord::new(2, "Heavy", 1, 1.0e6));
        assert_eq!(c.engine().mass(), 10_000.0);
    }
}
