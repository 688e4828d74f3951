//! Wire-level authentication unit and the encoded order payload.
//!
//! The canonical message is opaque: it is the exact string the wallet
//! signed and is only ever compared, never rebuilt from the decoded order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Claimed signer, signed message, and signature.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedEnvelope {
    /// Hex account identifier. Compared case-insensitively.
    #[serde(rename = "walletAddress")]
    pub claimed_address: String,
    /// The exact string that was signed.
    #[serde(rename = "messageToVerify")]
    pub canonical_message: String,
    /// Hex signature over `canonical_message`. Secret-bearing.
    pub signature: String,
}

impl SignedEnvelope {
    /// Wire names of fields that must be redacted before logging.
    pub const SECRET_FIELDS: &'static [&'static str] = &["signature"];

    #[must_use]
    pub fn new(
        claimed_address: impl Into<String>,
        canonical_message: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            claimed_address: claimed_address.into(),
            canonical_message: canonical_message.into(),
            signature: signature.into(),
        }
    }

    /// Returns `true` if the given wire field name carries secret material.
    #[must_use]
    pub fn is_secret_field(name: &str) -> bool {
        Self::SECRET_FIELDS.contains(&name)
    }
}

impl fmt::Debug for SignedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedEnvelope")
            .field("claimed_address", &self.claimed_address)
            .field("canonical_message", &self.canonical_message)
            .field("signature", &"<redacted>")
            .finish()
    }
}

/// Rotation-coded JSON order. Consumed once, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedOrder(pub String);

impl EncodedOrder {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EncodedOrder {
    fn from(s: String) -> Self {
        Self(s)
    }
}
