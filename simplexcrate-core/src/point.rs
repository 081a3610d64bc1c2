//! Point types

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Bit-exact identity of a point's coordinates.
///
/// Two points share a key iff every coordinate compares equal, so `-0.0` and
/// `0.0` map to the same key. NaN coordinates only match the same NaN payload.
pub fn coordinate_key(p: &Point3f) -> [u32; 3] {
    // Adding positive zero folds -0.0 into 0.0 and leaves every other value alone.
    [
        (p.x + 0.0).to_bits(),
        (p.y + 0.0).to_bits(),
        (p.z + 0.0).to_bits(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_key_identity() {
        let a = Point3f::new(1.0, 2.0, 3.0);
        let b = Point3f::new(1.0, 2.0, 3.0);
        assert_eq!(coordinate_key(&a), coordinate_key(&b));
    }

    #[test]
    fn test_coordinate_key_signed_zero() {
        let a = Point3f::new(0.0, -0.0, 1.0);
        let b = Point3f::new(-0.0, 0.0, 1.0);
        assert_eq!(coordinate_key(&a), coordinate_key(&b));
    }

    #[test]
    fn test_coordinate_key_distinguishes_close_points() {
        let a = Point3f::new(1.0, 0.0, 0.0);
        let b = Point3f::new(1.0 + f32::EPSILON, 0.0, 0.0);
        assert_ne!(coordinate_key(&a), coordinate_key(&b));
    }
}
