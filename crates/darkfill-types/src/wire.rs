//! JSON request and response shapes exchanged with the client.
//!
//! Failure bodies carry a code and a human-readable reason. The signature
//! is never echoed in any response.

use serde::{Deserialize, Serialize};

use crate::{
    DarkfillError, EncodedOrder, ExecutionReport, Result, SignedEnvelope, constants,
};

/// Inbound order submission. Every field is optional at parse time so that
/// absence can be reported with the right error class.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub wallet_address: Option<String>,
    #[serde(default)]
    pub message_to_verify: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub encrypted_order: Option<String>,
}

fn present(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.is_empty())
}

impl OrderRequest {
    /// Split into the authentication envelope and the encoded payload.
    ///
    /// Empty strings count as absent. Authentication fields are checked
    /// before the payload, and every missing auth field is reported.
    pub fn into_parts(self) -> Result<(SignedEnvelope, EncodedOrder)> {
        let mut missing = Vec::new();
        if present(self.wallet_address.as_ref()).is_none() {
            missing.push("walletAddress");
        }
        if present(self.message_to_verify.as_ref()).is_none() {
            missing.push("messageToVerify");
        }
        if present(self.signature.as_ref()).is_none() {
            missing.push("signature");
        }
        if !missing.is_empty() {
            return Err(DarkfillError::MissingAuthFields { missing });
        }

        let encoded = match self.encrypted_order {
            Some(s) if !s.is_empty() => EncodedOrder(s),
            _ => return Err(DarkfillError::MissingOrderPayload),
        };

        Ok((
            SignedEnvelope::new(
                self.wallet_address.unwrap_or_default(),
                self.message_to_verify.unwrap_or_default(),
                self.signature.unwrap_or_default(),
            ),
            encoded,
        ))
    }
}

impl std::fmt::Debug for OrderRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderRequest")
            .field("wallet_address", &self.wallet_address)
            .field("message_to_verify", &self.message_to_verify)
            .field("signature", &self.signature.as_ref().map(|_| "<redacted>"))
            .field("encrypted_order", &self.encrypted_order)
            .finish()
    }
}

/// The `results` object of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResults {
    pub total_input_amount: String,
    pub token_in: String,
    pub token_out: String,
    pub duration_hours: String,
    pub dark_pool_output: String,
    pub normal_swap_output: String,
    pub total_savings: String,
}

impl From<&ExecutionReport> for SimulationResults {
    fn from(report: &ExecutionReport) -> Self {
        Self {
            total_input_amount: report.amount_text.clone(),
            token_in: report.token_in.clone(),
            token_out: report.token_out.clone(),
            duration_hours: report.duration_text.clone(),
            dark_pool_output: report.ideal_output.to_string(),
            normal_swap_output: report.penalized_output.to_string(),
            total_savings: report.savings.to_string(),
        }
    }
}

/// Verification status reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Success,
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBody {
    pub success: bool,
    pub verification_status: VerificationStatus,
    pub wallet_address: String,
    pub results: SimulationResults,
}

/// Failure response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureBody {
    pub success: bool,
    /// Stable error class, e.g. `SIGNATURE_MISMATCH`.
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_address: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defects: Vec<String>,
}

impl From<&DarkfillError> for FailureBody {
    fn from(err: &DarkfillError) -> Self {
        let (expected_address, signer_address) = match err {
            DarkfillError::SignatureMismatch { claimed, recovered } => {
                (Some(claimed.clone()), Some(recovered.to_checksum()))
            }
            _ => (None, None),
        };
        // Internal details stay in the logs.
        let message = if err.is_internal() {
            "Internal server error".to_string()
        } else {
            err.to_string()
        };
        Self {
            success: false,
            code: err.code().to_string(),
            message,
            expected_address,
            signer_address,
            defects: err.defects().iter().map(ToString::to_string).collect(),
        }
    }
}

/// A complete response: status code plus body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProcessResponse {
    Success(SuccessBody),
    Failure(FailureBody),
}

impl ProcessResponse {
    #[must_use]
    pub fn success(wallet_address: &str, report: &ExecutionReport) -> Self {
        Self::Success(SuccessBody {
            success: true,
            verification_status: VerificationStatus::Success,
            wallet_address: wallet_address.to_string(),
            results: SimulationResults::from(report),
        })
    }

    #[must_use]
    pub fn failure(err: &DarkfillError) -> Self {
        Self::Failure(FailureBody::from(err))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Static liveness payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            service: constants::SERVICE_NAME.to_string(),
            version: constants::VERSION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::Address;

    fn full_request() -> OrderRequest {
        OrderRequest {
            wallet_address: Some("0xabc".into()),
            message_to_verify: Some("msg".into()),
            signature: Some("0x01".into()),
            encrypted_order: Some("{}".into()),
        }
    }

    #[test]
    fn complete_request_splits() {
        let (env, enc) = full_request().into_parts().unwrap();
        assert_eq!(env.claimed_address, "0xabc");
        assert_eq!(env.canonical_message, "msg");
        assert_eq!(enc.as_str(), "{}");
    }

    #[test]
    fn missing_auth_reported_before_payload() {
        let req = OrderRequest {
            signature: None,
            encrypted_order: None,
            ..full_request()
        };
        let err = req.into_parts().unwrap_err();
        assert!(matches!(
            err,
            DarkfillError::MissingAuthFields { ref missing } if missing == &vec!["signature"]
        ));
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let req = OrderRequest {
            wallet_address: Some(String::new()),
            message_to_verify: Some(String::new()),
            ..full_request()
        };
        let err = req.into_parts().unwrap_err();
        assert!(matches!(
            err,
            DarkfillError::MissingAuthFields { ref missing } if missing.len() == 2
        ));
    }

    #[test]
    fn missing_payload() {
        let req = OrderRequest {
            encrypted_order: Some(String::new()),
            ..full_request()
        };
        assert!(matches!(
            req.into_parts(),
            Err(DarkfillError::MissingOrderPayload)
        ));
    }

    #[test]
    fn request_debug_redacts_signature() {
        let req = OrderRequest {
            signature: Some("0xsecretsig".into()),
            ..full_request()
        };
        assert!(!format!("{req:?}").contains("secretsig"));
    }

    #[test]
    fn success_body_shape() {
        let report = ExecutionReport {
            amount: Decimal::new(1, 2),
            amount_text: "0.01".into(),
            token_in: "ETH".into(),
            token_out: "USDC".into(),
            duration_hours: 48,
            duration_text: "48".into(),
            ideal_output: Decimal::new(3000, 2),
            penalized_output: Decimal::new(2910, 2),
            savings: Decimal::new(90, 2),
        };
        let json = serde_json::to_value(ProcessResponse::success("0xabc", &report)).unwrap();
        assert_eq!(json["verificationStatus"], "SUCCESS");
        assert_eq!(json["results"]["totalInputAmount"], "0.01");
        assert_eq!(json["results"]["durationHours"], "48");
        assert_eq!(json["results"]["darkPoolOutput"], "30.00");
        assert_eq!(json["results"]["normalSwapOutput"], "29.10");
        assert_eq!(json["results"]["totalSavings"], "0.90");
    }

    #[test]
    fn results_echo_submitted_text() {
        let report = ExecutionReport {
            amount: Decimal::new(15, 1),
            amount_text: "1.50".into(),
            token_in: "ETH".into(),
            token_out: "USDC".into(),
            duration_hours: 48,
            duration_text: "048".into(),
            ideal_output: Decimal::new(450_000, 2),
            penalized_output: Decimal::new(436_500, 2),
            savings: Decimal::new(13_500, 2),
        };
        let results = SimulationResults::from(&report);
        assert_eq!(results.total_input_amount, "1.50");
        assert_eq!(results.duration_hours, "048");
    }

    #[test]
    fn mismatch_body_exposes_both_addresses() {
        let err = DarkfillError::SignatureMismatch {
            claimed: "0xclaimed".into(),
            recovered: Address([0x11; 20]),
        };
        let body = FailureBody::from(&err);
        assert_eq!(body.code, "SIGNATURE_MISMATCH");
        assert_eq!(body.expected_address.as_deref(), Some("0xclaimed"));
        assert!(body.signer_address.is_some());
    }

    #[test]
    fn internal_failure_hides_details() {
        let err = DarkfillError::Internal("stack details".into());
        let body = FailureBody::from(&err);
        assert_eq!(body.code, "INTERNAL_FAULT");
        assert!(!body.message.contains("stack details"));
    }

    #[test]
    fn health_defaults() {
        let h = HealthStatus::default();
        assert_eq!(h.status, "ok");
        assert_eq!(h.service, "darkfill");
    }
}
