//! Decoding of recorded device frames
//!
//! `testdata/device_frames.csv` holds frames captured from a sensor on a
//! pole, with the azimuth read off a compass in the field where one was
//! noted (sensor heading offset ≈ 0°).

use nalgebra::Vector3;
use pole_tilt::{DecodedMessage, Error, angles, decode, decode_bytes, hex};
use serde::Deserialize;
use std::error::Error as StdError;

#[derive(Debug, Deserialize)]
struct DeviceFrame {
    #[serde(rename = "Payload")]
    payload: String,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "X")]
    x: i32,
    #[serde(rename = "Y")]
    y: i32,
    #[serde(rename = "Z")]
    z: i32,
    #[serde(rename = "Field Phi (deg)")]
    field_phi: Option<f64>,
    #[serde(rename = "Description")]
    description: String,
}

fn load_frames() -> Result<Vec<DeviceFrame>, Box<dyn StdError>> {
    let mut reader = csv::Reader::from_path("testdata/device_frames.csv")?;
    let mut frames = Vec::new();
    for result in reader.deserialize() {
        frames.push(result?);
    }
    Ok(frames)
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_recorded_frames() -> Result<(), Box<dyn StdError>> {
    init_logging();
    let frames = load_frames()?;
    assert_eq!(frames.len(), 13);

    for frame in &frames {
        let message = decode(&frame.payload)?;
        assert_eq!(message.kind(), frame.kind, "{}", frame.payload);

        let gravity = message.gravity().expect("recorded frames carry a vector");
        assert_eq!(
            gravity,
            Vector3::new(frame.x as f64, frame.y as f64, frame.z as f64),
            "{} ({})",
            frame.payload,
            frame.description
        );
    }

    Ok(())
}

#[test]
fn test_recorded_azimuths_match_field_notes() -> Result<(), Box<dyn StdError>> {
    init_logging();
    let frames = load_frames()?;

    let mut checked = 0;
    for frame in frames.iter().filter(|f| f.field_phi.is_some()) {
        let gravity = decode(&frame.payload)?.gravity().unwrap();
        let phi = angles::local_phi_deg(gravity);
        let field_phi = frame.field_phi.unwrap();
        assert!(
            (phi - field_phi).abs() < 1.0,
            "{}: decoded phi {phi:.2}° vs field {field_phi}°",
            frame.payload
        );
        checked += 1;
    }
    assert_eq!(checked, 8);

    Ok(())
}

#[test]
fn test_sign_convention() {
    let message = decode("0a04628a00020017000203ec01").unwrap();
    assert_eq!(
        message,
        DecodedMessage::MotionEndEvent {
            x: -23,
            y: 2,
            z: -1004
        }
    );
}

/// The device minimum still flips to a positive local component
#[test]
fn test_minimum_reading_sign() {
    let gravity = decode("0a0000000002800000010000")
        .unwrap()
        .gravity()
        .unwrap();
    assert_eq!(gravity, Vector3::new(32768.0, 1.0, 0.0));

    let gravity = decode("070000000002008000000000000000010000000000")
        .unwrap()
        .gravity()
        .unwrap();
    assert_eq!(gravity, Vector3::new(2_147_483_648.0, 1.0, 0.0));
}

#[test]
fn test_configuration_offsets() {
    let bytes = hex::hex_to_bytes("070061890002faffffffe9fb0000000afc000003f2");
    let read = |offset: usize| {
        i64::from(i32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap()))
    };

    let message = decode_bytes(&bytes).unwrap();
    assert_eq!(
        message,
        DecodedMessage::ConfigurationReport {
            x: -read(7),
            y: read(12),
            z: -read(17)
        }
    );
}

#[test]
fn test_unrecognized_never_fails() {
    init_logging();
    for first in (0u8..=255).filter(|b| *b != 0x07 && *b != 0x0a) {
        let mut bytes = vec![first];
        bytes.extend_from_slice(&[0x04, 0x62, 0x8a, 0x00, 0x02]);

        let message = decode_bytes(&bytes).unwrap();
        assert_eq!(message.gravity(), None);
        assert!(!decode_bytes(&[first]).unwrap().is_recognized());
    }
}

#[test]
fn test_truncated_frames_fail() {
    let full = hex::hex_to_bytes("0a04628a00020017000203ec01");
    for len in 1..12 {
        let result = decode_bytes(&full[..len]);
        assert!(
            matches!(result, Err(Error::TruncatedPayload { .. })),
            "length {len}: {result:?}"
        );
    }
    assert!(decode_bytes(&full[..12]).is_ok());

    let full = hex::hex_to_bytes("070061890002faffffffe9fb0000000afc000003f2");
    for len in 1..21 {
        assert!(decode_bytes(&full[..len]).is_err(), "length {len}");
    }
}

#[test]
fn test_malformed_hex_still_decodes() {
    init_logging();
    let spaced = "0x0a 04 62 8a 00 02 00 17 00 02 03 ec 01";
    assert!(!hex::inspect(spaced).is_empty());
    assert_eq!(
        decode(spaced).unwrap(),
        decode("0a04628a00020017000203ec01").unwrap()
    );

    let trailing = "0a04628a00020017000203ec01f";
    assert_eq!(hex::inspect(trailing), vec![hex::HexIssue::OddLength(27)]);
    assert!(decode(trailing).unwrap().is_recognized());
}

#[test]
fn test_decoding_is_idempotent() {
    for hex in [
        "0a04628c000201c50350013301",
        "070061890002faffffffe9fb0000000afc000003f2",
        "1122",
    ] {
        let first = decode(hex).unwrap();
        let second = decode(hex).unwrap();
        assert_eq!(first, second);

        let (a, b) = (first.gravity(), second.gravity());
        assert_eq!(
            a.map(|v| v.map(f64::to_bits)),
            b.map(|v| v.map(f64::to_bits))
        );
    }
}
