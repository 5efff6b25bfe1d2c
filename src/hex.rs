//! Lenient hex string to byte conversion
//!
//! Payloads arrive as ASCII hex, usually copied from a network server console.
//! Conversion never fails: odd lengths and stray characters are reported as
//! [`HexIssue`] diagnostics on the `log` facade and the valid digit pairs are
//! still extracted.
//!
//! # Example
//! ```
//! use pole_tilt::hex::hex_to_bytes;
//!
//! assert_eq!(hex_to_bytes("0x0a04"), vec![0x0a, 0x04]);
//! assert_eq!(hex_to_bytes("0A 04 ff"), vec![0x0a, 0x04, 0xff]);
//! ```

use alloc::vec::Vec;
use thiserror::Error;

/// Diagnostic raised for malformed hex input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HexIssue {
    /// The input (after the prefix) has an odd number of characters
    #[error("expected an even number of hex characters, got {0}")]
    OddLength(usize),
    /// The input contains a character that is not a hex digit
    #[error("found non-hex character {character:?} at position {position}")]
    InvalidCharacter {
        /// First offending character
        character: char,
        /// Character index after the prefix was stripped
        position: usize,
    },
}

/// Converts a hex string into bytes, logging any [`HexIssue`] as a warning.
///
/// A leading `0x` (or `0X`) is stripped. Every run of two consecutive hex
/// digits becomes one byte; anything else is skipped.
pub fn hex_to_bytes(input: &str) -> Vec<u8> {
    let digits = strip_prefix(input);

    for issue in scan(digits) {
        log::warn!("malformed payload hex {input:?}: {issue}");
    }

    let mut bytes = Vec::with_capacity(digits.len() / 2);
    let mut high: Option<u8> = None;

    for c in digits.chars() {
        match (c.to_digit(16), high) {
            (Some(low), Some(h)) => {
                bytes.push((h << 4) | low as u8);
                high = None;
            }
            (Some(nibble), None) => high = Some(nibble as u8),
            // a lone digit followed by junk is dropped
            (None, _) => high = None,
        }
    }

    bytes
}

/// Returns the diagnostics [`hex_to_bytes`] would log for `input`.
pub fn inspect(input: &str) -> Vec<HexIssue> {
    scan(strip_prefix(input)).collect()
}

fn strip_prefix(input: &str) -> &str {
    let trimmed = input.trim_start();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

fn scan(digits: &str) -> impl Iterator<Item = HexIssue> + '_ {
    let len = digits.chars().count();
    let odd = (!len.is_multiple_of(2)).then_some(HexIssue::OddLength(len));

    let invalid = digits
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_hexdigit())
        .map(|(position, character)| HexIssue::InvalidCharacter {
            character,
            position,
        });

    odd.into_iter().chain(invalid)
}
