//! Element Registry
//!
//! Sub-part records of a construct. Pure data: an element has an identity, a
//! class tag, hit points and a mass, and no behavior of its own.
//!
//! The registry is append-only and keeps insertion order. Lookup is a linear
//! scan (O(n)); constructs carry tens of elements, not thousands.

use serde::{Deserialize, Serialize};

/// Element id, unique within one construct.
pub type ElementId = u32;

/// Id of the record describing the construct itself.
pub const CORE_ELEMENT_ID: ElementId = 1;

/// Class tag of the construct's own record.
pub const CORE_ELEMENT_CLASS: &str = "CoreUnitDynamic";

/// A single sub-part of a construct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    /// Caller-assigned id, stable for the construct's lifetime
    pub id: ElementId,
    /// Class tag (e.g. "AtmosphericEngineSmall")
    pub class_name: String,
    /// Current hit points
    pub hit_points: u32,
    /// Hit points when undamaged
    pub max_hit_points: u32,
    /// Mass (kilograms). Informational only.
    pub mass: f32,
}

impl ElementRecord {
    /// Create an undamaged element.
    pub fn new(id: ElementId, class_name: impl Into<String>, max_hit_points: u32, mass: f32) -> Self {
        Self {
            id,
            class_name: class_name.into(),
            hit_points: max_hit_points,
            max_hit_points,
            mass,
        }
    }
}

/// Ordered, append-only collection of element records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementRegistry {
    records: Vec<ElementRecord>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Ids are not checked for uniqueness.
    pub fn add(&mut self, record: ElementRecord) {
        self.records.push(record);
    }

    /// First record with the given id, in insertion order.
    pub fn find_by_id(&self, id: ElementId) -> Option<&ElementRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[ElementRecord] {
        &self.records
    }

    /// All ids in insertion order.
    pub fn ids(&self) -> Vec<ElementId> {
        self.records.iter().map(|record| record.id).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of element masses. Not used by the kinematics engine.
    pub fn total_mass(&self) -> f32 {
        self.records.iter().map(|record| record.mass).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_keeps_insertion_order() {
        let mut registry = ElementRegistry::new();
        registry.add(ElementRecord::new(7, "Container", 50, 120.0));
        registry.add(ElementRecord::new(3, "Engine", 200, 80.0));
        registry.add(ElementRecord::new(5, "Seat", 10, 20.0));
        assert_eq!(registry.ids(), vec![7, 3, 5]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.list()[1].class_name, "Engine");
    }

    #[test]
    fn test_find_by_id() {
        let mut registry = ElementRegistry::new();
        registry.add(ElementRecord::new(2, "Gyro", 30, 5.0));
        let found = registry.find_by_id(2);
        assert_eq!(found.map(|e| e.max_hit_points), Some(30));
        assert!(registry.find_by_id(99).is_none());
    }

    #[test]
    fn test_duplicate_ids_resolve_to_first() {
        let mut registry = ElementRegistry::new();
        registry.add(ElementRecord::new(4, "First", 1, 1.0));
        registry.add(ElementRecord::new(4, "Second", 1, 1.0));
        assert_eq!(registry.find_by_id(4).map(|e| e.class_name.as_str()), Some("First"));
    }

    #[test]
    fn test_new_element_is_undamaged() {
        let record = ElementRecord::new(9, "Hull", 400, 10.0);
        assert_eq!(record.hit_points, record.max_hit_points);
    }

    #[test]
    fn test_total_mass() {
        let mut registry = ElementRegistry::new();
        assert!(registry.is_empty());
        registry.add(ElementRecord::new(1, "A", 1, 1.5));
        registry.add(ElementRecord::new(2, "B", 1, 2.5));
        assert_eq!(registry.total_mass(), 4.0);
    }
}
