//! Error types for payload decoding and orientation math

use thiserror::Error;

/// Errors returned by the decoder, the angle conversions and the calibration
///
/// Unrecognized messages are not errors: they decode to
/// [`DecodedMessage::Unrecognized`](crate::DecodedMessage::Unrecognized).
/// Malformed hex input is not an error either; it is reported as a
/// [`HexIssue`](crate::hex::HexIssue) diagnostic through the `log` facade.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// The payload holds fewer bytes than its message format requires
    #[error("{message} payload too short: need {required} bytes, got {actual}")]
    TruncatedPayload {
        /// Name of the message format that was being read
        message: &'static str,
        /// Minimum number of bytes the format needs
        required: usize,
        /// Number of bytes actually present
        actual: usize,
    },

    /// A tilt angle sits on a tangent singularity (0° or 180°)
    #[error("tilt angles ({tilt_x}°, {tilt_z}°) are singular: neither may be 0° or 180°")]
    SingularAngleInput {
        /// Tilt about the x–y plane in degrees
        tilt_x: f64,
        /// Tilt about the z–y plane in degrees
        tilt_z: f64,
    },

    /// An angle is not finite or lies outside its valid domain
    #[error("{name} = {value} is out of range")]
    AngleOutOfRange {
        /// Which angle was rejected
        name: &'static str,
        /// The rejected value in degrees
        value: f64,
    },

    /// The calibration reference cannot define a rotation
    #[error("invalid calibration input: {0}")]
    InvalidCalibrationInput(&'static str),
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;
