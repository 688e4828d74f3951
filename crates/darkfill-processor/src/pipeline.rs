//! The order pipeline: authenticate, decode, validate, simulate.
//!
//! Every call walks the same linear sequence of stages:
//! 1. **AuthCheck**: envelope fields present, signer recovered and matched
//! 2. **PayloadDecode**: inverse rotation and JSON parse
//! 3. **Validate**: structure, then values
//! 4. **Simulate**: ideal vs. penalized fill
//!
//! The first failing stage rejects the request; later stages never run.
//! A processor holds only immutable configuration, so one instance can
//! serve any number of threads.

use std::fmt;

use darkfill_ingress::{
    OrderValidator, PersonalSignRecovery, RotationCodec, SignatureVerifier, SignerRecovery,
};
use darkfill_types::{
    DarkfillError, EncodedOrder, ExecutionReport, ProcessorConfig, Result, SignedEnvelope,
};

/// Position of a request in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipelineStage {
    AuthCheck,
    PayloadDecode,
    Validate,
    Simulate,
    Done,
}

impl PipelineStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthCheck => "auth_check",
            Self::PayloadDecode => "payload_decode",
            Self::Validate => "validate",
            Self::Simulate => "simulate",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single orchestration entry point for signed order submissions.
#[derive(Debug, Clone)]
pub struct OrderProcessor<R = PersonalSignRecovery> {
    config: ProcessorConfig,
    verifier: SignatureVerifier<R>,
    codec: RotationCodec,
    validator: OrderValidator,
}

impl OrderProcessor<PersonalSignRecovery> {
    /// Processor backed by k256 signer recovery.
    ///
    /// # Errors
    /// `Configuration` if `config` is out of range.
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        Self::with_verifier(config, SignatureVerifier::personal_sign())
    }
}

impl Default for OrderProcessor<PersonalSignRecovery> {
    fn default() -> Self {
        Self {
            config: ProcessorConfig::default(),
            verifier: SignatureVerifier::personal_sign(),
            codec: RotationCodec::default(),
            validator: OrderValidator::new(),
        }
    }
}

impl<R: SignerRecovery> OrderProcessor<R> {
    /// Processor with a caller-supplied signature verifier.
    pub fn with_verifier(config: ProcessorConfig, verifier: SignatureVerifier<R>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            verifier,
            codec: RotationCodec::default(),
            validator: OrderValidator::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Run the full pipeline for one submission.
    ///
    /// # Errors
    /// In stage order: `MissingAuthFields`, `MissingOrderPayload`,
    /// `InvalidSignatureFormat`, `SignatureMismatch`, `MalformedPayload`,
    /// `InvalidOrder`, and `InvalidOrderValue` from the simulator.
    pub fn process(
        &self,
        envelope: &SignedEnvelope,
        encoded: &EncodedOrder,
    ) -> Result<ExecutionReport> {
        let claimed = envelope.claimed_address.as_str();

        // ── AUTH CHECK ──────────────────────────────────────────────────
        let mut missing = Vec::new();
        if envelope.claimed_address.is_empty() {
            missing.push("walletAddress");
        }
        if envelope.canonical_message.is_empty() {
            missing.push("messageToVerify");
        }
        if envelope.signature.is_empty() {
            missing.push("signature");
        }
        if !missing.is_empty() {
            return Err(reject(
                PipelineStage::AuthCheck,
                claimed,
                DarkfillError::MissingAuthFields { missing },
            ));
        }
        if encoded.as_str().is_empty() {
            return Err(reject(
                PipelineStage::AuthCheck,
                claimed,
                DarkfillError::MissingOrderPayload,
            ));
        }

        let outcome = self
            .verifier
            .verify_envelope(envelope)
            .map_err(|e| reject(PipelineStage::AuthCheck, claimed, e))?;
        if !outcome.is_valid {
            return Err(reject(
                PipelineStage::AuthCheck,
                claimed,
                DarkfillError::SignatureMismatch {
                    claimed: claimed.to_string(),
                    recovered: outcome.recovered_address,
                },
            ));
        }
        tracing::debug!(claimed, "Signature verified");

        // ── PAYLOAD DECODE ──────────────────────────────────────────────
        let order = self
            .codec
            .decode_order(encoded)
            .map_err(|e| reject(PipelineStage::PayloadDecode, claimed, e))?;

        // ── VALIDATE ────────────────────────────────────────────────────
        let order = self.validator.validate(&order).map_err(|e| {
            let defects = e.defects();
            let err = if defects.is_empty() {
                e
            } else {
                DarkfillError::InvalidOrder { defects }
            };
            reject(PipelineStage::Validate, claimed, err)
        })?;

        // ── SIMULATE ────────────────────────────────────────────────────
        let report = darkfill_simcore::simulate_with(&order, &self.config.simulation)
            .map_err(|e| reject(PipelineStage::Simulate, claimed, e))?;

        tracing::info!(
            claimed,
            pair = %order.pair(),
            amount = %report.amount,
            savings = %report.savings,
            stage = %PipelineStage::Done,
            "Order processed"
        );
        Ok(report)
    }
}

/// Log a rejection and hand the error back.
fn reject(stage: PipelineStage, claimed: &str, err: DarkfillError) -> DarkfillError {
    if err.is_internal() {
        tracing::error!(%stage, claimed, error = %err, "Order pipeline fault");
    } else {
        tracing::warn!(%stage, claimed, code = err.code(), "Order rejected");
    }
    err
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use darkfill_types::{Address, Order, OrderDefect};

    use super::*;

    /// Recovery stub: always returns a fixed address, counting calls.
    struct FixedSigner {
        address: Address,
        calls: AtomicUsize,
    }

    impl SignerRecovery for &FixedSigner {
        fn recover_signer(&self, _message: &[u8], signature: &str) -> Result<Address> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if signature == "garbage" {
                return Err(DarkfillError::InvalidSignatureFormat {
                    reason: "stub".into(),
                });
            }
            Ok(self.address)
        }
    }

    fn processor(signer: &FixedSigner) -> OrderProcessor<&FixedSigner> {
        OrderProcessor::with_verifier(ProcessorConfig::default(), SignatureVerifier::new(signer))
            .unwrap()
    }

    fn signer() -> FixedSigner {
        FixedSigner {
            address: Address([0xab; 20]),
            calls: AtomicUsize::new(0),
        }
    }

    fn envelope(signer: &FixedSigner) -> SignedEnvelope {
        SignedEnvelope::new(signer.address.to_lower_hex(), "msg", "0xsig")
    }

    fn encode(order: &Order) -> EncodedOrder {
        RotationCodec::default().encode_order(order).unwrap()
    }

    #[test]
    fn stub_pipeline_reaches_done() {
        let s = signer();
        let report = processor(&s)
            .process(&envelope(&s), &encode(&Order::dummy()))
            .unwrap();
        assert_eq!(report.ideal_output.to_string(), "30.00");
        assert_eq!(s.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_auth_skips_recovery() {
        let s = signer();
        let env = SignedEnvelope::new("", "msg", "");
        let err = processor(&s)
            .process(&env, &encode(&Order::dummy()))
            .unwrap_err();
        assert!(matches!(
            err,
            DarkfillError::MissingAuthFields { ref missing } if missing == &vec!["walletAddress", "signature"]
        ));
        assert_eq!(s.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_payload_after_auth_fields() {
        let s = signer();
        let err = processor(&s)
            .process(&envelope(&s), &EncodedOrder(String::new()))
            .unwrap_err();
        assert!(matches!(err, DarkfillError::MissingOrderPayload));
        assert_eq!(s.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn mismatch_carries_both_addresses() {
        let s = signer();
        let env = SignedEnvelope::new(Address([0x01; 20]).to_checksum(), "msg", "0xsig");
        let err = processor(&s)
            .process(&env, &encode(&Order::dummy()))
            .unwrap_err();
        match err {
            DarkfillError::SignatureMismatch { claimed, recovered } => {
                assert_eq!(claimed, Address([0x01; 20]).to_checksum());
                assert_eq!(recovered, s.address);
            }
            other => panic!("expected SignatureMismatch, got {other:?}"),
        }
    }

    #[test]
    fn bad_signature_format_propagates() {
        let s = signer();
        let env = SignedEnvelope::new(s.address.to_lower_hex(), "msg", "garbage");
        let err = processor(&s)
            .process(&env, &encode(&Order::dummy()))
            .unwrap_err();
        assert!(matches!(err, DarkfillError::InvalidSignatureFormat { .. }));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn undecodable_payload_is_malformed() {
        let s = signer();
        let err = processor(&s)
            .process(&envelope(&s), &EncodedOrder("{oops".into()))
            .unwrap_err();
        assert!(matches!(err, DarkfillError::MalformedPayload { .. }));
    }

    #[test]
    fn validation_failures_become_invalid_order() {
        let s = signer();
        let order = Order {
            amount: Some("0".into()),
            ..Order::dummy()
        };
        let err = processor(&s)
            .process(&envelope(&s), &encode(&order))
            .unwrap_err();
        match err {
            DarkfillError::InvalidOrder { defects } => {
                assert_eq!(defects, vec![OrderDefect::AmountNotPositive("0".into())]);
            }
            other => panic!("expected InvalidOrder, got {other:?}"),
        }

        let order = Order {
            token_out: None,
            timestamp: None,
            ..Order::dummy()
        };
        let err = processor(&s)
            .process(&envelope(&s), &encode(&order))
            .unwrap_err();
        assert_eq!(
            err.defects(),
            vec![
                OrderDefect::MissingField("tokenOut"),
                OrderDefect::MissingField("timestamp"),
            ]
        );
        assert_eq!(err.code(), "INVALID_ORDER");
    }

    #[test]
    fn simulation_uses_configured_parameters() {
        let s = signer();
        let config = ProcessorConfig::from_json(
            r#"{"simulation":{"referencePrice":"2000","penaltyRate":"0.1"}}"#,
        )
        .unwrap();
        let p = OrderProcessor::with_verifier(config, SignatureVerifier::new(&s)).unwrap();
        let report = p.process(&envelope(&s), &encode(&Order::dummy())).unwrap();
        assert_eq!(report.ideal_output.to_string(), "20.00");
        assert_eq!(report.penalized_output.to_string(), "18.00");
        assert_eq!(report.savings.to_string(), "2.00");
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let mut config = ProcessorConfig::default();
        config.simulation.penalty_rate = "2".parse().unwrap();
        assert!(matches!(
            OrderProcessor::new(config),
            Err(DarkfillError::Configuration(_))
        ));
    }

    #[test]
    fn stage_order() {
        assert!(PipelineStage::AuthCheck < PipelineStage::PayloadDecode);
        assert!(PipelineStage::Validate < PipelineStage::Simulate);
        assert_eq!(PipelineStage::Done.to_string(), "done");
    }
}
