//! Payload decoder for tilt sensor uplink frames
//!
//! Two frame kinds carry an accelerometer reading:
//!
//! | Byte 0 | Byte 5 | Kind                 | Fields (big-endian, signed)        |
//! |--------|--------|----------------------|------------------------------------|
//! | `0x0A` | `0x02` | event / motion end   | x: i16 @6, y: i16 @8, z: i16 @10   |
//! | `0x07` | `0x02` | configuration report | x: i32 @7, y: i32 @12, z: i32 @17  |
//!
//! Every other frame decodes to [`DecodedMessage::Unrecognized`].
//!
//! The device x and z axes point opposite to the local frame used by the
//! angle math, so both are negated during decoding while y passes through.
//!
//! # Example
//! ```
//! use pole_tilt::{DecodedMessage, payload::decode};
//!
//! let message = decode("0a04628a00020017000203ec01").unwrap();
//! assert_eq!(message, DecodedMessage::MotionEndEvent { x: -23, y: 2, z: -1004 });
//! ```

use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::hex::hex_to_bytes;

/// Message type tags found in byte 0
pub mod message_type {
    /// Event message (motion start/end, button, ...)
    pub const EVENT: u8 = 0x0A;
    /// Configuration, shock detection or activity monitoring message
    pub const CONFIG: u8 = 0x07;
}

/// Sub-type tags found in byte 5
pub mod sub_type {
    /// Event sub-type reporting the orientation at the end of a motion
    pub const MOTION_END: u8 = 0x02;
    /// Config sub-type answering an orientation-on-demand request
    pub const CONFIGURATION: u8 = 0x02;
}

const SUB_TYPE_OFFSET: usize = 5;

const MOTION_END_OFFSETS: [usize; 3] = [6, 8, 10];
const MOTION_END_LEN: usize = 12;

const CONFIGURATION_OFFSETS: [usize; 3] = [7, 12, 17];
const CONFIGURATION_LEN: usize = 21;

/// A decoded sensor frame
///
/// Vector components are already in the local frame (x and z negated). They
/// are one size wider than on the wire so that negating the minimum device
/// reading stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodedMessage {
    /// Orientation reported when the device stops moving (i16 on the wire)
    MotionEndEvent { x: i32, y: i32, z: i32 },
    /// Orientation reported in a configuration answer (i32 on the wire)
    ConfigurationReport { x: i64, y: i64, z: i64 },
    /// Any other frame; carries no vector
    Unrecognized {
        /// Byte 0 of the frame
        message_type: u8,
        /// Byte 5 of the frame, if present
        sub_type: Option<u8>,
    },
}

impl DecodedMessage {
    /// Gravity vector in the local frame, or `None` for unrecognized frames
    pub fn gravity(&self) -> Option<Vector3<f64>> {
        match *self {
            Self::MotionEndEvent { x, y, z } => {
                Some(Vector3::new(f64::from(x), f64::from(y), f64::from(z)))
            }
            // every i64 built from an i32 reading is exact in f64
            Self::ConfigurationReport { x, y, z } => {
                Some(Vector3::new(x as f64, y as f64, z as f64))
            }
            Self::Unrecognized { .. } => None,
        }
    }

    /// Whether the frame carried a vector
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized { .. })
    }

    /// Short name of the message kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MotionEndEvent { .. } => "motion_end",
            Self::ConfigurationReport { .. } => "configuration",
            Self::Unrecognized { .. } => "unrecognized",
        }
    }
}

/// Decodes a hex payload.
///
/// Malformed hex is logged and the valid pairs are decoded anyway.
///
/// # Arguments
/// * `hex` - Uplink payload as hex text, optionally `0x`-prefixed
///
/// # Returns
/// The decoded frame, or [`Error::TruncatedPayload`] if it is too short for
/// its declared format
pub fn decode(hex: &str) -> Result<DecodedMessage> {
    decode_bytes(&hex_to_bytes(hex))
}

/// Decodes a raw payload.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedMessage> {
    let Some(&tag) = bytes.first() else {
        return Err(Error::TruncatedPayload {
            message: "any",
            required: 1,
            actual: 0,
        });
    };

    let message = match tag {
        message_type::EVENT => match read_sub_type(bytes, "event")? {
            sub_type::MOTION_END => {
                require(bytes, "motion_end", MOTION_END_LEN)?;
                let [x, y, z] = MOTION_END_OFFSETS.map(|offset| read_i16(bytes, offset));
                DecodedMessage::MotionEndEvent {
                    x: -i32::from(x),
                    y: i32::from(y),
                    z: -i32::from(z),
                }
            }
            other => unrecognized(tag, Some(other)),
        },
        message_type::CONFIG => match read_sub_type(bytes, "config")? {
            sub_type::CONFIGURATION => {
                require(bytes, "configuration", CONFIGURATION_LEN)?;
                let [x, y, z] = CONFIGURATION_OFFSETS.map(|offset| read_i32(bytes, offset));
                DecodedMessage::ConfigurationReport {
                    x: -i64::from(x),
                    y: i64::from(y),
                    z: -i64::from(z),
                }
            }
            other => unrecognized(tag, Some(other)),
        },
        _ => unrecognized(tag, bytes.get(SUB_TYPE_OFFSET).copied()),
    };

    if message.is_recognized() {
        log::debug!("decoded {} frame: {:?}", message.kind(), message);
    }

    Ok(message)
}

fn unrecognized(message_type: u8, sub_type: Option<u8>) -> DecodedMessage {
    log::debug!("skipping frame type {message_type:#04x}, sub-type {sub_type:?}");
    DecodedMessage::Unrecognized {
        message_type,
        sub_type,
    }
}

fn read_sub_type(bytes: &[u8], message: &'static str) -> Result<u8> {
    require(bytes, message, SUB_TYPE_OFFSET + 1)?;
    Ok(bytes[SUB_TYPE_OFFSET])
}

fn require(bytes: &[u8], message: &'static str, required: usize) -> Result<()> {
    if bytes.len() < required {
        return Err(Error::TruncatedPayload {
            message,
            required,
            actual: bytes.len(),
        });
    }
    Ok(())
}

// Callers check the length with `require` first.
fn read_i16(bytes: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    i32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
