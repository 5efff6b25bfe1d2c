//! Angle unit helpers and nalgebra extensions

use core::f64::consts::{PI, TAU};

use nalgebra::{ComplexField, Vector3};

/// Mathematical constants
pub const DEG_TO_RAD: f64 = PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / PI;

/// Wraps an angle in radians into (−π, π]
pub fn wrap_radians(angle: f64) -> f64 {
    let wrapped = angle - TAU * (angle / TAU).round();
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Wraps an angle in degrees into (−180°, 180°]
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle - 360.0 * (angle / 360.0).round();
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Extension trait for Vector3 operations
pub trait Vector3Ext {
    /// Normalize the vector, returning zero vector if magnitude is zero
    fn safe_normalize(&self) -> Vector3<f64>;

    /// Whether every component is finite
    fn all_finite(&self) -> bool;

    /// The basis axis forming the largest angle with this vector
    fn least_aligned_axis(&self) -> Vector3<f64>;
}

impl Vector3Ext for Vector3<f64> {
    fn safe_normalize(&self) -> Vector3<f64> {
        let mag = self.norm();
        if mag > 0.0 {
            *self / mag
        } else {
            Vector3::zeros()
        }
    }

    fn all_finite(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }

    fn least_aligned_axis(&self) -> Vector3<f64> {
        let (x, y, z) = (self.x.abs(), self.y.abs(), self.z.abs());
        if x <= y && x <= z {
            Vector3::x()
        } else if y <= z {
            Vector3::y()
        } else {
            Vector3::z()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_radians() {
        assert_relative_eq!(wrap_radians(0.0), 0.0);
        assert_relative_eq!(wrap_radians(PI), PI);
        assert_relative_eq!(wrap_radians(-PI), PI);
        assert_relative_eq!(wrap_radians(1.5 * PI), -0.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(wrap_radians(-1.5 * PI), 0.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(wrap_radians(5.0 * TAU + 0.25), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(180.0), 180.0);
        assert_eq!(wrap_degrees(-180.0), 180.0);
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(720.0 + 45.0), 45.0);
    }

    #[test]
    fn test_vector_extensions() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert_relative_eq!(v.safe_normalize().norm(), 1.0, epsilon = 1e-12);
        assert_eq!(Vector3::<f64>::zeros().safe_normalize(), Vector3::zeros());

        assert!(v.all_finite());
        assert!(!Vector3::new(f64::NAN, 0.0, 0.0).all_finite());

        assert_eq!(v.least_aligned_axis(), Vector3::z());
        assert_eq!(Vector3::new(0.1, 5.0, -3.0).least_aligned_axis(), Vector3::x());
        assert_eq!(Vector3::new(4.0, 0.5, -3.0).least_aligned_axis(), Vector3::y());
    }
}
