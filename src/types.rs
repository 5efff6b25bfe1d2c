//! Core types and settings for the pole orientation math

use crate::math::{DEG_TO_RAD, RAD_TO_DEG};

/// Spherical pole direction
///
/// - **theta**: polar angle between the vertical (+y) axis and the pole
/// - **phi**: azimuth of the pole's horizontal projection, measured about +y
///   from the local +z axis toward +x
///
/// The unit (degrees or radians) is set by the function that produced the
/// value; use [`to_degrees`](Self::to_degrees) and
/// [`to_radians`](Self::to_radians) to convert.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphericalAngles {
    pub theta: f64,
    pub phi: f64,
}

impl SphericalAngles {
    pub const fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }

    /// Treats `self` as radians and converts to degrees
    pub fn to_degrees(self) -> Self {
        Self::new(self.theta * RAD_TO_DEG, self.phi * RAD_TO_DEG)
    }

    /// Treats `self` as degrees and converts to radians
    pub fn to_radians(self) -> Self {
        Self::new(self.theta * DEG_TO_RAD, self.phi * DEG_TO_RAD)
    }
}

/// Dual-tilt pole direction
///
/// Angles of the pole's projections onto the two vertical planes x–y
/// (`tilt_x`) and z–y (`tilt_z`), each measured from the positive in-plane
/// horizontal axis. An upright pole has both tilts at 90°.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltAngles {
    pub tilt_x: f64,
    pub tilt_z: f64,
}

impl TiltAngles {
    pub const fn new(tilt_x: f64, tilt_z: f64) -> Self {
        Self { tilt_x, tilt_z }
    }

    /// Treats `self` as radians and converts to degrees
    pub fn to_degrees(self) -> Self {
        Self::new(self.tilt_x * RAD_TO_DEG, self.tilt_z * RAD_TO_DEG)
    }

    /// Treats `self` as degrees and converts to radians
    pub fn to_radians(self) -> Self {
        Self::new(self.tilt_x * DEG_TO_RAD, self.tilt_z * DEG_TO_RAD)
    }
}

/// Angle conversion settings
///
/// # Example
/// ```
/// use pole_tilt::{AngleSettings, angles::tilt_to_spherical_with};
///
/// let settings = AngleSettings {
///     singularity_tolerance: 0.5, // reject tilts within half a degree of 0°/180°
/// };
/// assert!(tilt_to_spherical_with(settings, 0.3_f64.to_radians(), 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AngleSettings {
    /// Distance in degrees from 0° and 180° within which a tilt angle is
    /// treated as singular
    ///
    /// The tangent of such a tilt is too close to zero for the cotangent
    /// terms of the tilt to spherical conversion to be meaningful.
    pub singularity_tolerance: f64,
}

impl Default for AngleSettings {
    fn default() -> Self {
        Self {
            singularity_tolerance: 1e-9,
        }
    }
}

/// Calibration settings
#[derive(Debug, Clone, Copy)]
pub struct CalibrationSettings {
    /// Angle in radians below which the measured and expected vectors are
    /// treated as parallel (or anti-parallel, measured from π)
    ///
    /// Inside this band the cross product is too short to give a stable
    /// rotation axis.
    pub parallel_tolerance: f64,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            parallel_tolerance: 1e-9,
        }
    }
}
