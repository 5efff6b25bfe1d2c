//! Conversions between gravity vectors, spherical angles and tilt angles
//!
//! All three describe the direction of the pole in the sensor's local frame,
//! where +y is the pole axis when it stands upright:
//!
//! - gravity vector `(x, y, z)` as decoded from a payload
//! - spherical `(theta, phi)`: polar angle from +y and azimuth about +y,
//!   measured from +z toward +x
//! - tilts `(tilt_x, tilt_z)`: angles of the projections onto the x–y and
//!   z–y planes
//!
//! The core functions take and return radians. Each has a `_deg` twin that
//! converts at the boundary.
//!
//! # Example
//! ```
//! use nalgebra::Vector3;
//! use pole_tilt::angles;
//!
//! let gravity = Vector3::new(430.0, 850.0, 322.0);
//! let spherical = angles::spherical_deg(gravity);
//! let tilts = angles::spherical_to_tilt_deg(spherical.theta, spherical.phi);
//! let back = angles::tilt_to_spherical_deg(tilts.tilt_x, tilts.tilt_z).unwrap();
//!
//! assert!((back.theta - spherical.theta).abs() < 1e-9);
//! assert!((back.phi - spherical.phi).abs() < 1e-9);
//! ```

use core::f64::consts::{FRAC_PI_2, PI};

use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::math::{DEG_TO_RAD, RAD_TO_DEG, wrap_radians};
use crate::types::{AngleSettings, SphericalAngles, TiltAngles};

/// Polar angle between the +y axis and the gravity vector, in [0, π]
pub fn theta(gravity: Vector3<f64>) -> f64 {
    (gravity.x * gravity.x + gravity.z * gravity.z)
        .sqrt()
        .atan2(gravity.y)
}

/// Azimuth of the horizontal projection, from +z toward +x, in (−π, π]
pub fn local_phi(gravity: Vector3<f64>) -> f64 {
    gravity.x.atan2(gravity.z)
}

/// Angle of the projection onto the x–y plane, measured from +x
pub fn tilt_x(gravity: Vector3<f64>) -> f64 {
    gravity.y.atan2(gravity.x)
}

/// Angle of the projection onto the z–y plane, measured from +z
pub fn tilt_z(gravity: Vector3<f64>) -> f64 {
    gravity.y.atan2(gravity.z)
}

/// Theta and local phi of a gravity vector, in radians
pub fn spherical(gravity: Vector3<f64>) -> SphericalAngles {
    SphericalAngles::new(theta(gravity), local_phi(gravity))
}

/// Both tilts of a gravity vector, in radians
pub fn tilts(gravity: Vector3<f64>) -> TiltAngles {
    TiltAngles::new(tilt_x(gravity), tilt_z(gravity))
}

/// Unit vector pointing at `(theta, phi)` (radians)
pub fn unit_vector(theta: f64, phi: f64) -> Vector3<f64> {
    let (sin_theta, cos_theta) = (theta.sin(), theta.cos());
    Vector3::new(sin_theta * phi.sin(), cos_theta, sin_theta * phi.cos())
}

/// Converts spherical angles to tilt angles (radians)
///
/// Defined everywhere. For theta in [0, π/2] both tilts fall in [0, π].
pub fn spherical_to_tilt(theta: f64, phi: f64) -> TiltAngles {
    let (sin_theta, cos_theta) = (theta.sin(), theta.cos());
    TiltAngles::new(
        cos_theta.atan2(sin_theta * phi.sin()),
        cos_theta.atan2(sin_theta * phi.cos()),
    )
}

/// Converts tilt angles to spherical angles (radians) with default settings
///
/// See [`tilt_to_spherical_with`].
pub fn tilt_to_spherical(tilt_x: f64, tilt_z: f64) -> Result<SphericalAngles> {
    tilt_to_spherical_with(AngleSettings::default(), tilt_x, tilt_z)
}

/// Converts tilt angles to spherical angles (radians)
///
/// Two tilts leave the azimuth quadrant ambiguous; tilting z past π/2 means
/// the pole leans toward −z, which folds phi around π. The returned phi is
/// wrapped into (−π, π] and theta lies in [0, π/2].
///
/// # Errors
/// - [`Error::AngleOutOfRange`] if a tilt is not finite or outside [0, π]
/// - [`Error::SingularAngleInput`] if a tilt lies within
///   `settings.singularity_tolerance` of 0 or π, where its tangent vanishes
pub fn tilt_to_spherical_with(
    settings: AngleSettings,
    tilt_x: f64,
    tilt_z: f64,
) -> Result<SphericalAngles> {
    let tolerance = settings.singularity_tolerance * DEG_TO_RAD;
    for (name, tilt) in [("tilt_x", tilt_x), ("tilt_z", tilt_z)] {
        check_range(name, tilt)?;
        if is_singular(tilt, tolerance) {
            return Err(Error::SingularAngleInput {
                tilt_x: tilt_x * RAD_TO_DEG,
                tilt_z: tilt_z * RAD_TO_DEG,
            });
        }
    }

    let tan_x = tilt_x.tan();
    let (phi, tan_z) = if tilt_z > FRAC_PI_2 {
        let tan_z = (PI - tilt_z).tan();
        (PI - (tan_z / tan_x).atan(), tan_z)
    } else {
        let tan_z = tilt_z.tan();
        ((tan_z / tan_x).atan(), tan_z)
    };

    let theta = ((1.0 / tan_x).powi(2) + (1.0 / tan_z).powi(2)).sqrt().atan();

    Ok(SphericalAngles::new(theta, wrap_radians(phi)))
}

/// Global azimuth from local phi and the sensor heading offset psi (radians)
pub fn global_phi(local_phi: f64, psi: f64) -> f64 {
    wrap_radians(local_phi + psi)
}

/// Local phi from the global azimuth and the sensor heading offset psi (radians)
pub fn local_phi_from_global(phi: f64, psi: f64) -> f64 {
    wrap_radians(phi - psi)
}

fn check_range(name: &'static str, tilt: f64) -> Result<()> {
    if !tilt.is_finite() || !(0.0..=PI).contains(&tilt) {
        return Err(Error::AngleOutOfRange {
            name,
            value: tilt * RAD_TO_DEG,
        });
    }
    Ok(())
}

fn is_singular(tilt: f64, tolerance: f64) -> bool {
    tilt <= tolerance || PI - tilt <= tolerance
}

// Degree wrappers

/// [`theta`] in degrees
pub fn theta_deg(gravity: Vector3<f64>) -> f64 {
    theta(gravity) * RAD_TO_DEG
}

/// [`local_phi`] in degrees
pub fn local_phi_deg(gravity: Vector3<f64>) -> f64 {
    local_phi(gravity) * RAD_TO_DEG
}

/// [`tilt_x`] in degrees
pub fn tilt_x_deg(gravity: Vector3<f64>) -> f64 {
    tilt_x(gravity) * RAD_TO_DEG
}

/// [`tilt_z`] in degrees
pub fn tilt_z_deg(gravity: Vector3<f64>) -> f64 {
    tilt_z(gravity) * RAD_TO_DEG
}

/// [`spherical`] in degrees
pub fn spherical_deg(gravity: Vector3<f64>) -> SphericalAngles {
    spherical(gravity).to_degrees()
}

/// [`tilts`] in degrees
pub fn tilts_deg(gravity: Vector3<f64>) -> TiltAngles {
    tilts(gravity).to_degrees()
}

/// [`unit_vector`] taking degrees
pub fn unit_vector_deg(theta: f64, phi: f64) -> Vector3<f64> {
    unit_vector(theta * DEG_TO_RAD, phi * DEG_TO_RAD)
}

/// [`spherical_to_tilt`] in degrees
pub fn spherical_to_tilt_deg(theta: f64, phi: f64) -> TiltAngles {
    spherical_to_tilt(theta * DEG_TO_RAD, phi * DEG_TO_RAD).to_degrees()
}

/// [`tilt_to_spherical`] in degrees
///
/// # Arguments
/// * `tilt_x` - Tilt in the sensor x–y plane, in [0°, 180°]
/// * `tilt_z` - Tilt in the sensor z–y plane, in [0°, 180°]
///
/// # Returns
/// Theta and local phi in degrees, or the reason the tilts have no
/// spherical equivalent
pub fn tilt_to_spherical_deg(tilt_x: f64, tilt_z: f64) -> Result<SphericalAngles> {
    tilt_to_spherical_deg_with(AngleSettings::default(), tilt_x, tilt_z)
}

/// [`tilt_to_spherical_with`] in degrees
pub fn tilt_to_spherical_deg_with(
    settings: AngleSettings,
    tilt_x: f64,
    tilt_z: f64,
) -> Result<SphericalAngles> {
    tilt_to_spherical_with(settings, tilt_x * DEG_TO_RAD, tilt_z * DEG_TO_RAD)
        .map(SphericalAngles::to_degrees)
        .map_err(|err| match err {
            // report the caller's own values rather than the round-tripped ones
            Error::SingularAngleInput { .. } => Error::SingularAngleInput { tilt_x, tilt_z },
            Error::AngleOutOfRange { name: "tilt_x", .. } => Error::AngleOutOfRange {
                name: "tilt_x",
                value: tilt_x,
            },
            Error::AngleOutOfRange { name: "tilt_z", .. } => Error::AngleOutOfRange {
                name: "tilt_z",
                value: tilt_z,
            },
            other => other,
        })
}

/// [`global_phi`] in degrees
pub fn global_phi_deg(local_phi: f64, psi: f64) -> f64 {
    global_phi(local_phi * DEG_TO_RAD, psi * DEG_TO_RAD) * RAD_TO_DEG
}

/// [`local_phi_from_global`] in degrees
pub fn local_phi_from_global_deg(phi: f64, psi: f64) -> f64 {
    local_phi_from_global(phi * DEG_TO_RAD, psi * DEG_TO_RAD) * RAD_TO_DEG
}
