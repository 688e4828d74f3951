//! Error types for the darkfill order pipeline.
//!
//! All errors use the `DF_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Request / authentication field errors
//! - 2xx: Signature errors
//! - 3xx: Payload codec errors
//! - 4xx: Order validation errors
//! - 9xx: General / internal errors
//!
//! No variant ever carries the raw signature.

use std::fmt;

use thiserror::Error;

use crate::Address;

/// A single reason an order failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderDefect {
    /// A required field is absent (or null).
    MissingField(&'static str),
    /// `amount` is not a decimal number.
    AmountNotNumeric(String),
    /// `amount` is zero or negative.
    AmountNotPositive(String),
    /// `duration` is not an integer.
    DurationNotInteger(String),
    /// `duration` is zero or negative.
    DurationNotPositive(String),
    /// `timestamp` is not an integer millisecond count.
    TimestampNotInteger(String),
    /// A token symbol is empty.
    EmptyToken(&'static str),
    /// Arithmetic on the order's values left the representable range.
    ValueOutOfRange(&'static str),
}

impl fmt::Display for OrderDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "missing field `{name}`"),
            Self::AmountNotNumeric(v) => write!(f, "amount `{v}` is not a decimal number"),
            Self::AmountNotPositive(v) => write!(f, "amount must be greater than 0, got {v}"),
            Self::DurationNotInteger(v) => write!(f, "duration `{v}` is not an integer"),
            Self::DurationNotPositive(v) => write!(f, "duration must be greater than 0, got {v}"),
            Self::TimestampNotInteger(v) => write!(f, "timestamp `{v}` is not an integer"),
            Self::EmptyToken(name) => write!(f, "token symbol `{name}` is empty"),
            Self::ValueOutOfRange(what) => write!(f, "{what} is out of range"),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Central error enum for all darkfill operations.
#[derive(Debug, Error)]
pub enum DarkfillError {
    // =================================================================
    // Request Errors (1xx)
    // =================================================================
    /// One or more of `walletAddress`, `messageToVerify`, `signature` is absent.
    #[error("DF_ERR_100: Missing authentication fields: {}", join(.missing))]
    MissingAuthFields { missing: Vec<&'static str> },

    /// The encoded order payload is absent.
    #[error("DF_ERR_101: Missing encoded order payload")]
    MissingOrderPayload,

    /// The request body is not a JSON object of the expected shape.
    #[error("DF_ERR_102: Malformed request: {reason}")]
    MalformedRequest { reason: String },

    /// The request body exceeds the accepted size.
    #[error("DF_ERR_103: Request body of {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    // =================================================================
    // Signature Errors (2xx)
    // =================================================================
    /// The signature cannot be parsed into recoverable components.
    #[error("DF_ERR_200: Invalid signature format: {reason}")]
    InvalidSignatureFormat { reason: String },

    /// The signature is well-formed but was produced by another key.
    #[error("DF_ERR_201: Signature mismatch: claimed {claimed}, recovered {recovered}")]
    SignatureMismatch { claimed: String, recovered: Address },

    /// The string is not a 20-byte hex account address.
    #[error("DF_ERR_202: Invalid address: {input}")]
    InvalidAddress { input: String },

    // =================================================================
    // Payload Errors (3xx)
    // =================================================================
    /// The payload is not valid JSON after inverse rotation.
    #[error("DF_ERR_300: Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    // =================================================================
    // Order Errors (4xx)
    // =================================================================
    /// Required order fields are missing. Lists every missing field.
    #[error("DF_ERR_400: Invalid order structure, missing: {}", join(.missing))]
    InvalidOrderStructure { missing: Vec<&'static str> },

    /// Order fields are present but carry unusable values.
    #[error("DF_ERR_401: Invalid order value: {}", join(.defects))]
    InvalidOrderValue { defects: Vec<OrderDefect> },

    /// The order was rejected by validation; itemized reasons attached.
    #[error("DF_ERR_402: Invalid order: {}", join(.defects))]
    InvalidOrder { defects: Vec<OrderDefect> },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Configuration error (out-of-range parameters, bad config file).
    #[error("DF_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// Unexpected internal fault.
    #[error("DF_ERR_901: Internal error: {0}")]
    Internal(String),

    /// Serialization error while producing a response.
    #[error("DF_ERR_902: Serialization error: {0}")]
    Serialization(String),
}

impl DarkfillError {
    /// HTTP-equivalent status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingAuthFields { .. }
            | Self::MissingOrderPayload
            | Self::MalformedRequest { .. }
            | Self::InvalidSignatureFormat { .. }
            | Self::InvalidAddress { .. }
            | Self::MalformedPayload { .. }
            | Self::InvalidOrderStructure { .. }
            | Self::InvalidOrderValue { .. }
            | Self::InvalidOrder { .. } => 400,
            Self::SignatureMismatch { .. } => 403,
            Self::PayloadTooLarge { .. } => 413,
            Self::Configuration(_) | Self::Internal(_) | Self::Serialization(_) => 500,
        }
    }

    /// Stable machine-readable name of the error class.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingAuthFields { .. } => "MISSING_AUTH_FIELDS",
            Self::MissingOrderPayload => "MISSING_ORDER_PAYLOAD",
            Self::MalformedRequest { .. } => "MALFORMED_REQUEST",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::InvalidSignatureFormat { .. } => "INVALID_SIGNATURE_FORMAT",
            Self::SignatureMismatch { .. } => "SIGNATURE_MISMATCH",
            Self::InvalidAddress { .. } => "INVALID_ADDRESS",
            Self::MalformedPayload { .. } => "MALFORMED_PAYLOAD",
            Self::InvalidOrderStructure { .. } => "INVALID_ORDER_STRUCTURE",
            Self::InvalidOrderValue { .. } => "INVALID_ORDER_VALUE",
            Self::InvalidOrder { .. } => "INVALID_ORDER",
            Self::Configuration(_) | Self::Internal(_) | Self::Serialization(_) => {
                "INTERNAL_FAULT"
            }
        }
    }

    /// Returns `true` for faults that are not the caller's doing.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }

    /// Itemized order defects, when this is a validation failure.
    #[must_use]
    pub fn defects(&self) -> Vec<OrderDefect> {
        match self {
            Self::InvalidOrderStructure { missing } => {
                missing.iter().copied().map(OrderDefect::MissingField).collect()
            }
            Self::InvalidOrderValue { defects } | Self::InvalidOrder { defects } => {
                defects.clone()
            }
            _ => Vec::new(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, DarkfillError>;

impl From<serde_json::Error> for DarkfillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
