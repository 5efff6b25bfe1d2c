//! One-shot calibration of the sensor mounting
//!
//! A calibration payload is recorded while the pole sits at a known
//! orientation `(theta, phi)`. The [`Correction`] returned here is the exact
//! rotation carrying the measured gravity vector onto the vector expected at
//! that orientation; applying it to later readings removes the mounting
//! error before angles are extracted.
//!
//! # Example
//! ```
//! use pole_tilt::{angles, calibration::compute_correction_from_payload, payload::decode};
//!
//! // recorded with the pole upright
//! let correction = compute_correction_from_payload(0.0, 0.0, "0a04628c0002ffe903affe9301").unwrap();
//!
//! let raw = decode("0a04628c0002ffe903affe9301").unwrap().gravity().unwrap();
//! let corrected = correction.apply(raw);
//! assert!(angles::theta_deg(corrected) < 1e-9);
//! ```

use core::f64::consts::PI;

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};

use crate::angles::unit_vector;
use crate::error::{Error, Result};
use crate::math::{DEG_TO_RAD, RAD_TO_DEG, Vector3Ext};
use crate::payload::decode;
use crate::state::PoleState;
use crate::types::CalibrationSettings;

/// Rotation correcting raw gravity vectors for the sensor mounting error
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    rotation: Rotation3<f64>,
    axis: Option<Unit<Vector3<f64>>>,
    angle: f64,
}

impl Correction {
    /// The correction that leaves vectors unchanged
    pub fn identity() -> Self {
        Self {
            rotation: Rotation3::identity(),
            axis: None,
            angle: 0.0,
        }
    }

    /// Rotates a raw gravity vector into the corrected frame
    pub fn apply(&self, raw: Vector3<f64>) -> Vector3<f64> {
        self.rotation * raw
    }

    /// Rotation axis, or `None` for the identity
    pub fn axis(&self) -> Option<Unit<Vector3<f64>>> {
        self.axis
    }

    /// Rotation angle in radians, in [0, π]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Rotation angle in degrees
    pub fn angle_deg(&self) -> f64 {
        self.angle() * RAD_TO_DEG
    }

    /// The 3×3 rotation matrix
    pub fn matrix(&self) -> Matrix3<f64> {
        *self.rotation.matrix()
    }

    /// The underlying rotation
    pub fn rotation(&self) -> Rotation3<f64> {
        self.rotation
    }
}

impl Default for Correction {
    fn default() -> Self {
        Self::identity()
    }
}

/// Computes the correction for a reference reading taken at
/// `(measured_theta, measured_phi)`, both in degrees
///
/// `measured_phi` is the local azimuth; subtract the heading offset psi from
/// a global azimuth before calling.
///
/// # Arguments
/// * `measured_theta` - Polar angle the pole was set to while recording
/// * `measured_phi` - Local azimuth the pole was set to while recording
/// * `reference` - Gravity vector decoded from the calibration payload
///
/// # Returns
/// Rotation carrying `reference` onto the vector expected at that orientation
///
/// # Errors
/// [`Error::InvalidCalibrationInput`] if `reference` is zero or not finite,
/// or if the angles are not finite.
pub fn compute_correction(
    measured_theta: f64,
    measured_phi: f64,
    reference: Vector3<f64>,
) -> Result<Correction> {
    compute_correction_rad(
        measured_theta * DEG_TO_RAD,
        measured_phi * DEG_TO_RAD,
        reference,
    )
}

/// [`compute_correction`] taking radians
pub fn compute_correction_rad(
    measured_theta: f64,
    measured_phi: f64,
    reference: Vector3<f64>,
) -> Result<Correction> {
    compute_correction_with(
        CalibrationSettings::default(),
        measured_theta,
        measured_phi,
        reference,
    )
}

/// [`compute_correction_rad`] with explicit settings
pub fn compute_correction_with(
    settings: CalibrationSettings,
    measured_theta: f64,
    measured_phi: f64,
    reference: Vector3<f64>,
) -> Result<Correction> {
    if !reference.all_finite() {
        return Err(Error::InvalidCalibrationInput(
            "reference vector is not finite",
        ));
    }
    if !measured_theta.is_finite() || !measured_phi.is_finite() {
        return Err(Error::InvalidCalibrationInput(
            "measured angles are not finite",
        ));
    }

    let measured = reference.safe_normalize();
    if measured == Vector3::zeros() {
        return Err(Error::InvalidCalibrationInput("reference vector is zero"));
    }

    let expected = unit_vector(measured_theta, measured_phi);
    let normal = measured.cross(&expected);
    let angle = normal.norm().atan2(measured.dot(&expected));

    if angle <= settings.parallel_tolerance {
        log::debug!("calibration reference already matches, no correction");
        return Ok(Correction::identity());
    }

    let axis = if PI - angle <= settings.parallel_tolerance {
        log::debug!("calibration reference is reversed, rotating half a turn");
        measured.cross(&measured.least_aligned_axis())
    } else {
        normal
    };

    let axis = Unit::new_normalize(axis);
    log::debug!(
        "calibration correction: {:.3}° about {:?}",
        angle * RAD_TO_DEG,
        axis.as_ref()
    );

    Ok(Correction {
        rotation: Rotation3::from_axis_angle(&axis, angle),
        axis: Some(axis),
        angle,
    })
}

/// Decodes a calibration payload and computes the correction against it
///
/// # Errors
/// Decoding errors are passed through; a payload that carries no vector is
/// [`Error::InvalidCalibrationInput`].
pub fn compute_correction_from_payload(
    measured_theta: f64,
    measured_phi: f64,
    payload_hex: &str,
) -> Result<Correction> {
    let reference = decode(payload_hex)?.gravity().ok_or(Error::InvalidCalibrationInput(
        "calibration payload carries no vector",
    ))?;
    compute_correction(measured_theta, measured_phi, reference)
}

/// [`compute_correction`] against a known pole orientation
///
/// # Arguments
/// * `measured` - Orientation the pole was set to; its psi is removed from phi
/// * `reference` - Gravity vector recorded at that orientation
pub fn correction_for_state(measured: &PoleState, reference: Vector3<f64>) -> Result<Correction> {
    compute_correction(measured.theta, measured.local_phi(), reference)
}
