//! Script Facade
//!
//! The function-call surface a host script runtime sees for one construct.
//! Names and argument/return shapes are stable: scripts written against the
//! host game call these exact functions.
//!
//! Two layers:
//! - typed methods on [`ScriptApi`] (`get_world_position`, ...)
//! - [`ScriptApi::call`], a by-name dispatcher over [`ScriptValue`]s for
//!   runtimes that bind functions dynamically
//!
//! Lookups that miss return sentinels (`""`, `0`, zero vectors); only
//! malformed calls produce a [`ScriptError`].

pub mod value;

use glam::Vec3;

use crate::game::construct::{Construct, ElementId, ElementRecord};
use crate::physics::basis_from_accumulator;

pub use value::{ScriptError, ScriptValue};
use value::Args;

/// Every function name the facade answers to.
pub const SCRIPT_FUNCTIONS: &[&str] = &[
    "getMass",
    "getIMass",
    "getWorldPosition",
    "setWorldPosition",
    "getCrossSection",
    "getWorldVelocity",
    "setWorldVelocity",
    "getVelocity",
    "getWorldAcceleration",
    "getAcceleration",
    "getWorldOrientationUp",
    "getWorldOrientationRight",
    "getWorldOrientationForward",
    "getWorldGravity",
    "getGravityIntensity",
    "getWorldVertical",
    "getWorldAirFrictionAcceleration",
    "getWorldAngularVelocity",
    "getWorldAngularAcceleration",
    "getWorldAirFrictionAngularAcceleration",
    "getAltitude",
    "getId",
    "getMaxThrustAlongAxis",
    "spawnNumberSticker",
    "spawnArrowSticker",
    "deleteSticker",
    "moveSticker",
    "rotateSticker",
    "getElementIdList",
    "getElementTypeById",
    "getElementHitPointsById",
    "getElementMaxHitPointsById",
    "getElementMassById",
    "getElementPositionById",
    "getElementRotationById",
    "getElementTagsById",
];

/// Sticker index returned when a number sticker cannot be placed.
pub const NO_STICKER: i64 = -1;

fn vec3_from_slice(values: &[f32]) -> Option<Vec3> {
    <[f32; 3]>::try_from(values).ok().map(Vec3::from_array)
}

/// Script-facing view of a construct.
pub struct ScriptApi<'a> {
    construct: &'a mut Construct,
}

impl<'a> ScriptApi<'a> {
    pub fn new(construct: &'a mut Construct) -> Self {
        Self { construct }
    }

    pub fn construct(&self) -> &Construct {
        &*self.construct
    }

    fn gravity(&self) -> Vec3 {
        let position = self.construct.engine().state().position;
        self.construct.environment().gravity_at(position)
    }

    fn element(&self, id: ElementId) -> Option<&ElementRecord> {
        self.construct.elements().find_by_id(id)
    }

    // ========================================================================
    // MASS
    // ========================================================================

    pub fn get_mass(&self) -> f32 {
        self.construct.engine().mass()
    }

    /// Relativistic apparent mass. NaN or infinite at or above light speed.
    pub fn get_i_mass(&self) -> f32 {
        self.construct.apparent_mass()
    }

    pub fn get_cross_section(&self) -> f32 {
        self.construct.engine().cross_sectional_area()
    }

    // ========================================================================
    // LINEAR MOTION
    // ========================================================================

    pub fn get_world_position(&self) -> [f32; 3] {
        self.construct.engine().state().position.to_array()
    }

    /// Teleport. Returns false, leaving the state untouched, unless given exactly three components.
    pub fn set_world_position(&mut self, position: &[f32]) -> bool {
        let Some(position) = vec3_from_slice(position) else {
            return false;
        };
        tracing::debug!(?position, "script set world position");
        self.construct.engine_mut().set_position(position);
        true
    }

    pub fn get_world_velocity(&self) -> [f32; 3] {
        self.construct.engine().state().velocity.to_array()
    }

    /// Returns false, leaving the state untouched, unless given exactly three components.
    pub fn set_world_velocity(&mut self, velocity: &[f32]) -> bool {
        let Some(velocity) = vec3_from_slice(velocity) else {
            return false;
        };
        tracing::debug!(?velocity, "script set world velocity");
        self.construct.engine_mut().set_velocity(velocity);
        true
    }

    /// Net acceleration applied during the last tick.
    pub fn get_world_acceleration(&self) -> [f32; 3] {
        self.construct.engine().state().acceleration.to_array()
    }

    /// Local-frame velocity is not modelled; always the zero vector.
    pub fn get_velocity(&self) -> [f32; 3] {
        [0.0; 3]
    }

    /// Local-frame acceleration is not modelled; always the zero vector.
    pub fn get_acceleration(&self) -> [f32; 3] {
        [0.0; 3]
    }

    // ========================================================================
    // ORIENTATION
    // ========================================================================

    pub fn get_world_orientation_up(&self) -> [f32; 3] {
        let (_, up, _) = basis_from_accumulator(self.construct.engine().state().rotation);
        up.to_array()
    }

    pub fn get_world_orientation_right(&self) -> [f32; 3] {
        let (right, _, _) = basis_from_accumulator(self.construct.engine().state().rotation);
        right.to_array()
    }

    pub fn get_world_orientation_forward(&self) -> [f32; 3] {
        let (_, _, forward) = basis_from_accumulator(self.construct.engine().state().rotation);
        forward.to_array()
    }

    pub fn get_world_angular_velocity(&self) -> [f32; 3] {
        self.construct.engine().state().angular_velocity.to_array()
    }

    pub fn get_world_angular_acceleration(&self) -> [f32; 3] {
        self.construct.engine().state().angular_acceleration.to_array()
    }

    /// Angular drag is not simulated.
    pub fn get_world_air_friction_angular_acceleration(&self) -> [f32; 3] {
        [0.0; 3]
    }

    // ========================================================================
    // ENVIRONMENT
    // ========================================================================

    pub fn get_world_gravity(&self) -> [f32; 3] {
        self.gravity().to_array()
    }

    pub fn get_gravity_intensity(&self) -> f32 {
        self.gravity().length()
    }

    /// Same reading as [`Self::get_world_gravity`].
    pub fn get_world_vertical(&self) -> [f32; 3] {
        self.get_world_gravity()
    }

    pub fn get_world_air_friction_acceleration(&self) -> [f32; 3] {
        self.construct.engine().state().air_resistance.to_array()
    }

    pub fn get_altitude(&self) -> f32 {
        let position = self.construct.engine().state().position;
        self.construct.environment().altitude_at(position)
    }

    pub fn get_id(&self) -> ElementId {
        self.construct.id()
    }

    /// Thrust envelope along `axis` as (atmo+, atmo-, space+, space-).
    ///
    /// The thrust type tag is accepted for compatibility and ignored.
    pub fn get_max_thrust_along_axis(&self, _thrust_type: &str, axis: [f32; 3]) -> [f32; 4] {
        self.construct
            .engine()
            .axis_kinematics(Vec3::from_array(axis))
            .to_array()
    }

    // ========================================================================
    // STICKERS (cosmetic, no state)
    // ========================================================================

    pub fn spawn_number_sticker(&self, _number: i64, _x: f32, _y: f32, _z: f32, _orientation: &str) -> i64 {
        NO_STICKER
    }

    pub fn spawn_arrow_sticker(&self, _x: f32, _y: f32, _z: f32, _orientation: &str) -> bool {
        true
    }

    pub fn delete_sticker(&self, _index: i64) -> bool {
        true
    }

    pub fn move_sticker(&self, _index: i64, _x: f32, _y: f32, _z: f32) -> bool {
        true
    }

    pub fn rotate_sticker(&self, _index: i64, _angle_x: f32, _angle_y: f32, _angle_z: f32) -> bool {
        true
    }

    // ========================================================================
    // ELEMENTS
    // ========================================================================

    pub fn get_element_id_list(&self) -> Vec<ElementId> {
        self.construct.elements().ids()
    }

    /// Class name, or `""` for an unknown id.
    pub fn get_element_type_by_id(&self, id: ElementId) -> String {
        self.element(id)
            .map(|e| e.class_name.clone())
            .unwrap_or_default()
    }

    /// Hit points, or 0 for an unknown id.
    pub fn get_element_hit_points_by_id(&self, id: ElementId) -> u32 {
        self.element(id).map_or(0, |e| e.hit_points)
    }

    /// Max hit points, or 0 for an unknown id.
    pub fn get_element_max_hit_points_by_id(&self, id: ElementId) -> u32 {
        self.element(id).map_or(0, |e| e.max_hit_points)
    }

    /// Mass, or 0 for an unknown id.
    pub fn get_element_mass_by_id(&self, id: ElementId) -> f32 {
        self.element(id).map_or(0.0, |e| e.mass)
    }

    /// Elements carry no local transform; always the zero vector.
    pub fn get_element_position_by_id(&self, _id: ElementId) -> [f32; 3] {
        [0.0; 3]
    }

    /// Elements carry no local transform; always the zero vector.
    pub fn get_element_rotation_by_id(&self, _id: ElementId) -> [f32; 3] {
        [0.0; 3]
    }

    /// Elements carry no tags; always `""`.
    pub fn get_element_tags_by_id(&self, _id: ElementId) -> String {
        String::new()
    }

    // ========================================================================
    // DISPATCH
    // ========================================================================

    /// Call a facade function by its script name.
    pub fn call(&mut self, name: &str, args: &[ScriptValue]) -> Result<ScriptValue, ScriptError> {
        tracing::trace!(function = name, argc = args.len(), "script call");
        let value: ScriptValue = match name {
            "getMass" => self.get_mass().into(),
            "getIMass" => self.get_i_mass().into(),
            "getCrossSection" => self.get_cross_section().into(),
            "getWorldPosition" => self.get_world_position().into(),
            "getWorldVelocity" => self.get_world_velocity().into(),
            "getVelocity" => self.get_velocity().into(),
            "getAcceleration" => self.get_acceleration().into(),
            "getWorldAcceleration" => self.get_world_acceleration().into(),
            "getWorldOrientationUp" => self.get_world_orientation_up().into(),
            "getWorldOrientationRight" => self.get_world_orientation_right().into(),
            "getWorldOrientationForward" => self.get_world_orientation_forward().into(),
            "getWorldGravity" => self.get_world_gravity().into(),
            "getGravityIntensity" => self.get_gravity_intensity().into(),
            "getWorldVertical" => self.get_world_vertical().into(),
            "getWorldAirFrictionAcceleration" => self.get_world_air_friction_acceleration().into(),
            "getWorldAngularVelocity" => self.get_world_angular_velocity().into(),
            "getWorldAngularAcceleration" => self.get_world_angular_acceleration().into(),
            "getWorldAirFrictionAngularAcceleration" => {
                self.get_world_air_friction_angular_acceleration().into()
            }
            "getAltitude" => self.get_altitude().into(),
            "getId" => self.get_id().into(),
            "getElementIdList" => {
                ScriptValue::integers(self.get_element_id_list().into_iter().map(i64::from))
            }
            "setWorldPosition" => {
                let args = Args::new(name, args, 1)?;
                return Ok(self.set_world_position(&args.numbers(0)?).into());
            }
            "setWorldVelocity" => {
                let args = Args::new(name, args, 1)?;
                return Ok(self.set_world_velocity(&args.numbers(0)?).into());
            }
            "getMaxThrustAlongAxis" => {
                let args = Args::new(name, args, 2)?;
                let thrust_type = args.string(0)?;
                let axis = args.numbers(1)?;
                let axis = <[f32; 3]>::try_from(axis.as_slice()).map_err(|_| ScriptError::ArgumentType {
                    function: name.to_string(),
                    index: 1,
                    expected: "an array of three numbers",
                })?;
                return Ok(self.get_max_thrust_along_axis(thrust_type, axis).into());
            }
            "spawnNumberSticker" => {
                let args = Args::new(name, args, 5)?;
                return Ok(self
                    .spawn_number_sticker(
                        args.integer(0)?,
                        args.number(1)?,
                        args.number(2)?,
                        args.number(3)?,
                        args.string(4)?,
                    )
                    .into());
            }
            "spawnArrowSticker" => {
                let args = Args::new(name, args, 4)?;
                return Ok(self
                    .spawn_arrow_sticker(args.number(0)?, args.number(1)?, args.number(2)?, args.string(3)?)
                    .into());
            }
            "deleteSticker" => {
                let args = Args::new(name, args, 1)?;
                return Ok(self.delete_sticker(args.integer(0)?).into());
            }
            "moveSticker" => {
                let args = Args::new(name, args, 4)?;
                return Ok(self
                    .move_sticker(args.integer(0)?, args.number(1)?, args.number(2)?, args.number(3)?)
                    .into());
            }
            "rotateSticker" => {
                let args = Args::new(name, args, 4)?;
                return Ok(self
                    .rotate_sticker(args.integer(0)?, args.number(1)?, args.number(2)?, args.number(3)?)
                    .into());
            }
            "getElementTypeById"
            | "getElementHitPointsById"
            | "getElementMaxHitPointsById"
            | "getElementMassById"
            | "getElementPositionById"
            | "getElementRotationById"
            | "getElementTagsById" => {
                let args = Args::new(name, args, 1)?;
                return Ok(match ElementId::try_from(args.integer(0)?) {
                    Ok(id) => self.element_query(name, id),
                    // Ids outside the u32 range cannot exist
                    Err(_) => Self::element_miss(name),
                });
            }
            _ => return Err(ScriptError::UnknownFunction(name.to_string())),
        };

        // Everything that fell through is a zero-argument getter
        Args::new(name, args, 0)?;
        Ok(value)
    }

    fn element_miss(name: &str) -> ScriptValue {
        match name {
            "getElementTypeById" | "getElementTagsById" => String::new().into(),
            "getElementHitPointsById" | "getElementMaxHitPointsById" => 0u32.into(),
            "getElementMassById" => 0.0f32.into(),
            _ => [0.0f32; 3].into(),
        }
    }

    fn element_query(&self, name: &str, id: ElementId) -> ScriptValue {
        match name {
            "getElementTypeById" => self.get_element_type_by_id(id).into(),
            "getElementHitPointsById" => self.get_element_hit_points_by_id(id).into(),
            "getElementMaxHitPointsById" => self.get_element_max_hit_points_by_id(id).into(),
            "getElementMassById" => self.get_element_mass_by_id(id).into(),
            "getElementPositionById" => self.get_element_position_by_id(id).into(),
            "getElementRotationById" => self.get_element_rotation_by_id(id).into(),
            _ => self.get_element_tags_by_id(id).into(),
        }
    }
}
