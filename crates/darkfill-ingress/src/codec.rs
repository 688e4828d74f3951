//! Rotation codec: reversible alphanumeric rotation over an order payload.
//!
//! ASCII letters rotate within their own case alphabet by `shift mod 26`,
//! ASCII digits rotate by `shift mod 10`, everything else passes through.
//! Decoding is encoding with the negated shift.
//!
//! This is a format layer only. The shift is a public constant, so the
//! transform hides nothing from anyone who reads this file.

use darkfill_types::constants::{DIGIT_ALPHABET_LEN, LETTER_ALPHABET_LEN, ROTATION_SHIFT};
use darkfill_types::{DarkfillError, EncodedOrder, Order, Result};

/// Rotate `c` within the alphabet starting at `base` of length `len`.
fn rotate_in(c: char, base: u8, len: u8, shift: i64) -> char {
    let offset = i64::from(c as u8 - base);
    let rotated = (offset + shift).rem_euclid(i64::from(len));
    // rem_euclid keeps `rotated` in 0..len
    char::from(base + rotated as u8)
}

fn rotate_char(c: char, shift: i64) -> char {
    match c {
        'A'..='Z' => rotate_in(c, b'A', LETTER_ALPHABET_LEN, shift),
        'a'..='z' => rotate_in(c, b'a', LETTER_ALPHABET_LEN, shift),
        '0'..='9' => rotate_in(c, b'0', DIGIT_ALPHABET_LEN, shift),
        _ => c,
    }
}

fn rotate(payload: &str, shift: i64) -> String {
    payload.chars().map(|c| rotate_char(c, shift)).collect()
}

/// Rotate every ASCII letter and digit in `payload` forward by `shift`.
#[must_use]
pub fn encode(payload: &str, shift: i32) -> String {
    rotate(payload, i64::from(shift))
}

/// Inverse of [`encode`]: `decode(x, s) == encode(x, -s)`.
#[must_use]
pub fn decode(payload: &str, shift: i32) -> String {
    rotate(payload, -i64::from(shift))
}

/// Order-level codec: JSON serialization wrapped in the rotation transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationCodec {
    shift: i32,
}

impl RotationCodec {
    /// Create a codec with an explicit shift.
    #[must_use]
    pub fn new(shift: i32) -> Self {
        Self { shift }
    }

    /// `encode(serde_json::to_string(order), shift)`.
    pub fn encode_order(&self, order: &Order) -> Result<EncodedOrder> {
        let json = serde_json::to_string(order)?;
        Ok(EncodedOrder(encode(&json, self.shift)))
    }

    /// `serde_json::from_str(decode(text, shift))`.
    ///
    /// # Errors
    /// Returns `MalformedPayload` if the inverse-rotated text is not a JSON
    /// order object. Tampered or corrupted payloads normally end up here.
    pub fn decode_order(&self, encoded: &EncodedOrder) -> Result<Order> {
        let json = decode(encoded.as_str(), self.shift);
        serde_json::from_str(&json).map_err(|e| DarkfillError::MalformedPayload {
            reason: format!("decoded payload is not a valid order object: {e}"),
        })
    }
}

impl Default for RotationCodec {
    fn default() -> Self {
        Self::new(ROTATION_SHIFT)
    }
}
