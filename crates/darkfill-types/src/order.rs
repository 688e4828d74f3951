//! Order types for the darkfill pipeline.
//!
//! An [`Order`] is the record recovered from an encoded payload. Every
//! field is optional at this stage; the ingress validator turns it into a
//! [`ValidatedOrder`] or reports every defect at once.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accept a JSON string or number, coercing numbers to their text form.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Order record as decoded from the wire.
///
/// Key order on serialization is `amount, tokenIn, tokenOut, duration,
/// timestamp`, matching what the client encodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub token_in: Option<String>,
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub token_out: Option<String>,
    /// Duration in hours. Wire key is `duration`.
    #[serde(
        rename = "duration",
        alias = "durationHours",
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_hours: Option<String>,
    /// Milliseconds since the UNIX epoch.
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Keys the pipeline does not recognise. Never copied into a
    /// [`ValidatedOrder`].
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl Order {
    /// Build a fully populated order from its five fields.
    #[must_use]
    pub fn new(
        amount: &str,
        token_in: &str,
        token_out: &str,
        duration_hours: &str,
        timestamp: &str,
    ) -> Self {
        Self {
            amount: Some(amount.to_string()),
            token_in: Some(token_in.to_string()),
            token_out: Some(token_out.to_string()),
            duration_hours: Some(duration_hours.to_string()),
            timestamp: Some(timestamp.to_string()),
            unknown: BTreeMap::new(),
        }
    }
}

/// An order that passed validation, with its values parsed.
///
/// `amount_text` and `duration_text` keep the submitted text so responses
/// can echo it unchanged; the parsed fields are for arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedOrder {
    pub amount: Decimal,
    pub amount_text: String,
    pub token_in: String,
    pub token_out: String,
    pub duration_hours: u32,
    pub duration_text: String,
    pub timestamp_ms: u64,
}

impl ValidatedOrder {
    /// Token pair label, e.g. `ETH/USDC`.
    #[must_use]
    pub fn pair(&self) -> String {
        format!("{}/{}", self.token_in, self.token_out)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// The reference order: 0.01 ETH into USDC over 48 hours.
    pub fn dummy() -> Self {
        Self::new("0.01", "ETH", "USDC", "48", "1700000000000")
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl ValidatedOrder {
    pub fn dummy(amount: Decimal) -> Self {
        Self {
            amount,
            amount_text: amount.to_string(),
            token_in: "ETH".to_string(),
            token_out: "USDC".to_string(),
            duration_hours: 48,
            duration_text: "48".to_string(),
            timestamp_ms: 1_700_000_000_000,
        }
    }
}
