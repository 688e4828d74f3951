//! Account identifiers.
//!
//! An [`Address`] is the 20-byte account identity recovered from a wallet
//! signature. Its text form is `0x` + 40 hex digits; casing carries an
//! optional checksum and never affects equality.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::constants::ADDRESS_LEN;
use crate::{DarkfillError, Result};

/// A 20-byte account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// Lowercase `0x`-prefixed hex form.
    #[must_use]
    pub fn to_lower_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Mixed-case checksum form (EIP-55).
    ///
    /// A hex letter is uppercased when the matching nibble of
    /// `keccak256(lowercase_hex)` is 8 or greater.
    #[must_use]
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, ch) in lower.chars().enumerate() {
            let byte = digest[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if ch.is_ascii_alphabetic() && nibble >= 8 {
                out.push(ch.to_ascii_uppercase());
            } else {
                out.push(ch);
            }
        }
        out
    }

    /// Case-insensitive comparison against an address string. No other
    /// normalization is applied.
    #[must_use]
    pub fn matches_str(&self, other: &str) -> bool {
        self.to_lower_hex().eq_ignore_ascii_case(other)
    }
}

impl FromStr for Address {
    type Err = DarkfillError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DarkfillError::InvalidAddress {
            input: s.to_string(),
        };
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(invalid)?;
        if digits.len() != ADDRESS_LEN * 2 {
            return Err(invalid());
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| invalid())?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Returns `true` if `s` parses as an address.
#[must_use]
pub fn is_valid_address(s: &str) -> bool {
    s.parse::<Address>().is_ok()
}

/// Normalize an address string to its checksum form.
pub fn normalize_address(s: &str) -> Result<String> {
    Ok(s.parse::<Address>()?.to_checksum())
}
