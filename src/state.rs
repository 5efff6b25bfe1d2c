//! Immutable pole orientation snapshots
//!
//! A [`PoleState`] holds one consistent set of display angles. Every update
//! returns a new snapshot with the dependent angles recomputed, so a
//! rendering layer can compare snapshots and redraw on change. Failed updates
//! return an error and leave the previous snapshot untouched.
//!
//! # Example
//! ```
//! use pole_tilt::PoleState;
//!
//! let state = PoleState::default().with_psi(30.0).with_theta(20.0).with_phi(75.0);
//!
//! // tilts follow the local azimuth phi - psi = 45°
//! assert!((state.tilt_x - state.tilt_z).abs() < 1e-9);
//!
//! let leaned = state.with_tilts(60.0, 80.0).unwrap();
//! assert!(leaned.theta > state.theta);
//! ```

use nalgebra::Vector3;

use crate::angles;
use crate::calibration::{Correction, compute_correction_from_payload};
use crate::error::Result;
use crate::math::wrap_degrees;
use crate::payload::decode;
use crate::types::{SphericalAngles, TiltAngles};

/// Pole orientation in degrees
///
/// `phi` is the global azimuth: the local azimuth plus the sensor heading
/// offset `psi`. The tilts describe the same direction in the sensor frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleState {
    /// Angle between the vertical and the pole, in [0°, 180°]
    pub theta: f64,
    /// Global azimuth of the pole's lean, in (−180°, 180°]
    pub phi: f64,
    /// Angle between the sensor's −z axis and north when the pole is upright
    pub psi: f64,
    /// Tilt in the sensor x–y plane
    pub tilt_x: f64,
    /// Tilt in the sensor z–y plane
    pub tilt_z: f64,
}

impl Default for PoleState {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            psi: 0.0,
            tilt_x: 90.0,
            tilt_z: 90.0,
        }
    }
}

impl PoleState {
    /// Builds a snapshot from a local-frame gravity vector
    pub fn from_gravity(gravity: Vector3<f64>, psi: f64) -> Self {
        let spherical = angles::spherical_deg(gravity);
        let tilts = angles::tilts_deg(gravity);
        Self {
            theta: spherical.theta,
            phi: angles::global_phi_deg(spherical.phi, psi),
            psi,
            tilt_x: tilts.tilt_x,
            tilt_z: tilts.tilt_z,
        }
    }

    /// Decodes a payload into a snapshot
    ///
    /// # Errors
    /// Decoding errors are passed through. A payload without a vector gives
    /// `Ok(None)`.
    pub fn from_payload(hex: &str, psi: f64) -> Result<Option<Self>> {
        Ok(decode(hex)?
            .gravity()
            .map(|gravity| Self::from_gravity(gravity, psi)))
    }

    /// Decodes a payload and applies a calibration correction first
    pub fn from_payload_corrected(
        hex: &str,
        correction: &Correction,
        psi: f64,
    ) -> Result<Option<Self>> {
        Ok(decode(hex)?
            .gravity()
            .map(|gravity| Self::from_gravity(correction.apply(gravity), psi)))
    }

    /// Azimuth relative to the sensor frame
    pub fn local_phi(&self) -> f64 {
        angles::local_phi_from_global_deg(self.phi, self.psi)
    }

    /// Theta and local phi
    pub fn spherical(&self) -> SphericalAngles {
        SphericalAngles::new(self.theta, self.local_phi())
    }

    /// Both tilts
    pub fn tilts(&self) -> TiltAngles {
        TiltAngles::new(self.tilt_x, self.tilt_z)
    }

    /// Unit vector of the pole direction in the sensor frame
    pub fn direction(&self) -> Vector3<f64> {
        angles::unit_vector_deg(self.theta, self.local_phi())
    }

    /// Sets the polar angle and recomputes the tilts
    ///
    /// # Arguments
    /// * `theta` - Angle between the vertical and the pole, in degrees
    ///
    /// # Returns
    /// A new snapshot; phi and psi are kept
    pub fn with_theta(&self, theta: f64) -> Self {
        Self { theta, ..*self }.retilt()
    }

    /// Sets the global azimuth and recomputes the tilts
    ///
    /// # Arguments
    /// * `phi` - Global azimuth in degrees, any value (wrapped into (−180°, 180°])
    ///
    /// # Returns
    /// A new snapshot; theta and psi are kept
    pub fn with_phi(&self, phi: f64) -> Self {
        Self {
            phi: wrap_degrees(phi),
            ..*self
        }
        .retilt()
    }

    /// Changes the heading offset, keeping the global azimuth
    pub fn with_psi(&self, psi: f64) -> Self {
        Self { psi, ..*self }.retilt()
    }

    /// Sets both tilts and recomputes theta and phi
    ///
    /// # Errors
    /// Singular or out-of-range tilts, see
    /// [`tilt_to_spherical`](crate::angles::tilt_to_spherical).
    pub fn with_tilts(&self, tilt_x: f64, tilt_z: f64) -> Result<Self> {
        let spherical = angles::tilt_to_spherical_deg(tilt_x, tilt_z)?;
        Ok(Self {
            theta: spherical.theta,
            phi: angles::global_phi_deg(spherical.phi, self.psi),
            tilt_x,
            tilt_z,
            ..*self
        })
    }

    fn retilt(self) -> Self {
        let tilts = angles::spherical_to_tilt_deg(self.theta, self.local_phi());
        Self {
            tilt_x: tilts.tilt_x,
            tilt_z: tilts.tilt_z,
            ..self
        }
    }
}

/// Calibration inputs: where the pole was and what the sensor reported
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration<'a> {
    /// Orientation the pole was set to while recording
    pub measured: PoleState,
    /// Hex payload recorded at that orientation
    pub payload: &'a str,
}

impl Calibration<'_> {
    /// Correction mapping the recorded vector onto the measured orientation
    pub fn correction(&self) -> Result<Correction> {
        compute_correction_from_payload(
            self.measured.theta,
            self.measured.local_phi(),
            self.payload,
        )
    }
}
