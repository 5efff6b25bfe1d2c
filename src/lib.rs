#![no_std]

//! Pole tilt - payload decoding and orientation math for pole-mounted tilt sensors
//!
//! A tilt sensor strapped to a pole reports its accelerometer reading in
//! uplink frames. This crate turns such a frame into a gravity vector and
//! converts that vector between the angle systems used to describe how the
//! pole leans:
//!
//! - **spherical**: theta (angle from the vertical) and phi (azimuth)
//! - **dual tilt**: tilt_x and tilt_z, the pole's projections onto two
//!   orthogonal vertical planes
//!
//! It also computes the rotation that corrects for the sensor being mounted
//! slightly askew, from a single reference reading taken at a known
//! orientation.
//!
//! # Features
//!
//! - Lenient hex input with diagnostics on the `log` facade
//! - Bounds-checked decoding of motion-end events and configuration reports
//! - Exact tilt/spherical conversions with explicit errors at singularities
//! - Axis-angle calibration correction
//! - Immutable [`PoleState`] snapshots for display layers
//! - `#![no_std]` compatible (needs `alloc`)
//!
//! # Quick Start
//!
//! ```rust
//! use pole_tilt::{angles, payload::decode};
//!
//! let message = decode("0a04628c0002fe520352febe01").unwrap();
//! let gravity = message.gravity().unwrap();
//!
//! let theta = angles::theta_deg(gravity);     // ~32.3°
//! let phi = angles::local_phi_deg(gravity);   // ~53.2°
//! let tilts = angles::spherical_to_tilt_deg(theta, phi);
//!
//! let back = angles::tilt_to_spherical_deg(tilts.tilt_x, tilts.tilt_z).unwrap();
//! assert!((back.theta - theta).abs() < 1e-9);
//! ```

extern crate alloc;

pub mod angles;
pub mod calibration;
mod error;
pub mod hex;
mod math;
pub mod payload;
pub mod state;
mod types;

// Re-export all public types and functions
pub use calibration::{
    Correction, compute_correction, compute_correction_from_payload, correction_for_state,
};
pub use error::{Error, Result};
pub use math::{DEG_TO_RAD, RAD_TO_DEG, Vector3Ext, wrap_degrees, wrap_radians};
pub use payload::{DecodedMessage, decode, decode_bytes};
pub use state::{Calibration, PoleState};
pub use types::*;
