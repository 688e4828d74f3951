//! Configuration types for the simulator and the order processor.
//!
//! The rotation shift is deliberately absent: it is a shared constant
//! ([`ROTATION_SHIFT`](crate::constants::ROTATION_SHIFT)), not a setting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{DarkfillError, Result, constants};

/// Parameters of the execution simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Output units per unit of input token.
    pub reference_price: Decimal,
    /// Adverse-impact rate applied to the public-market fill, in `[0, 1)`.
    pub penalty_rate: Decimal,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            reference_price: Decimal::from(constants::DEFAULT_REFERENCE_PRICE),
            penalty_rate: Decimal::new(i64::from(constants::DEFAULT_PENALTY_RATE_BPS), 4),
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn new(reference_price: Decimal, penalty_rate: Decimal) -> Self {
        Self {
            reference_price,
            penalty_rate,
        }
    }

    /// Reject parameters outside their meaningful range.
    pub fn validate(&self) -> Result<()> {
        if self.reference_price <= Decimal::ZERO {
            return Err(DarkfillError::Configuration(format!(
                "reference price must be positive, got {}",
                self.reference_price
            )));
        }
        if self.penalty_rate < Decimal::ZERO || self.penalty_rate >= Decimal::ONE {
            return Err(DarkfillError::Configuration(format!(
                "penalty rate must be in [0, 1), got {}",
                self.penalty_rate
            )));
        }
        Ok(())
    }
}

/// Configuration for an order processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessorConfig {
    pub simulation: SimulationConfig,
    /// Maximum accepted request body size in bytes.
    pub max_request_bytes: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            max_request_bytes: constants::MAX_REQUEST_BYTES,
        }
    }
}

impl ProcessorConfig {
    /// Parse a JSON config document, filling unspecified fields with defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| DarkfillError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        if self.max_request_bytes == 0 {
            return Err(DarkfillError::Configuration(
                "max request bytes must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
