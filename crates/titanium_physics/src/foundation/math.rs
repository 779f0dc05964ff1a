//! Math utilities and types
//!
//! Thin aliases over nalgebra so the rest of the crate speaks in `Vec3`/`Quat`.

pub use nalgebra::{Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations (w-x-y-z)
pub type Quat = Unit<Quaternion<f32>>;

/// Number of spatial axes
pub const AXES: usize = 3;

/// Check that every component of a vector is finite
pub fn is_finite_vec(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Check that every component of a vector is finite and strictly positive
pub fn is_positive_vec(v: &Vec3) -> bool {
    v.iter().all(|&c| c.is_finite() && c > 0.0)
}

/// Unit vector along `axis` with the given sign
///
/// `axis` is 0, 1 or 2 for X, Y, Z.
pub fn signed_axis(axis: usize, sign: f32) -> Vec3 {
    let mut v = Vec3::zeros();
    v[axis] = sign;
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_checks() {
        assert!(is_finite_vec(&Vec3::new(1.0, -2.0, 0.0)));
        assert!(!is_finite_vec(&Vec3::new(f32::NAN, 0.0, 0.0)));
        assert!(is_positive_vec(&Vec3::new(1.0, 0.5, 2.0)));
        assert!(!is_positive_vec(&Vec3::new(1.0, 0.0, 2.0)));
        assert!(!is_positive_vec(&Vec3::new(1.0, f32::INFINITY, 2.0)));
    }

    #[test]
    fn test_signed_axis() {
        assert_eq!(signed_axis(1, -1.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(signed_axis(2, 1.0), Vec3::new(0.0, 0.0, 1.0));
    }
}
