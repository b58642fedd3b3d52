//! Physics type re-exports from glam
//!
//! Core mathematical types used throughout the kinematics system.
//! `Vec4` carries the four thrust-envelope magnitudes returned by axis queries.

pub use glam::{Vec3, Vec4};

/// Multiply `v` componentwise with each unit axis and return (right, up, forward).
///
/// The orientation accumulator is not a rotation, so "rotating" a basis vector
/// by it is a plain componentwise product.
pub fn basis_from_accumulator(v: Vec3) -> (Vec3, Vec3, Vec3) {
    (v * Vec3::X, v * Vec3::Y, v * Vec3::Z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_from_accumulator_masks_axes() {
        let (right, up, forward) = basis_from_accumulator(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(right, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(up, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(forward, Vec3::new(0.0, 0.0, 3.0));
    }
}
