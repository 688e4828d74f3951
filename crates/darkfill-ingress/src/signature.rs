//! Wallet signature verification (secp256k1, personal-message convention).
//!
//! The signer is recovered from `(message, signature)` and compared with the
//! claimed address case-insensitively. Two outcomes are kept apart:
//!
//! - a signature that cannot be parsed into recoverable components is an
//!   `InvalidSignatureFormat` error
//! - a well-formed signature from a different key is `is_valid: false`
//!
//! Recovery sits behind the [`SignerRecovery`] port so the processor can be
//! exercised with a stub.

use darkfill_types::constants::{PERSONAL_MESSAGE_PREFIX, SIGNATURE_LEN};
use darkfill_types::{Address, DarkfillError, Result, SignedEnvelope};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

/// Capability: recover the signer identity implied by a message and signature.
pub trait SignerRecovery {
    /// # Errors
    /// Returns `InvalidSignatureFormat` when `signature` cannot be parsed or
    /// does not yield a public key.
    fn recover_signer(&self, message: &[u8], signature: &str) -> Result<Address>;
}

/// Keccak-256 over `"\x19Ethereum Signed Message:\n" || len || message`.
#[must_use]
pub fn personal_message_hash(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX.as_bytes());
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

/// Derive the account address from a public key: the last 20 bytes of
/// `keccak256(x || y)`.
#[must_use]
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    // Skip the 0x04 uncompressed-point tag.
    let hash = Keccak256::digest(&encoded.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Address(address)
}

fn format_error(reason: impl Into<String>) -> DarkfillError {
    DarkfillError::InvalidSignatureFormat {
        reason: reason.into(),
    }
}

/// Parse a 65-byte `r || s || v` hex signature (optional `0x` prefix).
///
/// `v` may be 0/1 or 27/28. High-S signatures are rejected as
/// non-canonical.
pub fn parse_signature(signature: &str) -> Result<(Signature, RecoveryId)> {
    let digits = signature
        .strip_prefix("0x")
        .or_else(|| signature.strip_prefix("0X"))
        .unwrap_or(signature);
    let bytes = hex::decode(digits).map_err(|e| format_error(format!("not hex: {e}")))?;
    if bytes.len() != SIGNATURE_LEN {
        return Err(format_error(format!(
            "expected {SIGNATURE_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    let v = bytes[64];
    let recovery_byte = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(format_error(format!("invalid recovery id {v}"))),
    };
    let recovery_id = RecoveryId::from_byte(recovery_byte)
        .ok_or_else(|| format_error(format!("invalid recovery id {v}")))?;

    let sig = Signature::from_slice(&bytes[..64])
        .map_err(|_| format_error("r or s out of range"))?;
    // Any s above n/2 is refused, not only those with the top bit set.
    if sig.normalize_s().is_some() {
        return Err(format_error("non-canonical (high) s value"));
    }
    Ok((sig, recovery_id))
}

/// k256-backed recovery under the personal-message hashing convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalSignRecovery;

impl SignerRecovery for PersonalSignRecovery {
    fn recover_signer(&self, message: &[u8], signature: &str) -> Result<Address> {
        let (sig, recovery_id) = parse_signature(signature)?;
        let prehash = personal_message_hash(message);
        let key = VerifyingKey::recover_from_prehash(&prehash, &sig, recovery_id)
            .map_err(|_| format_error("no public key recoverable from signature"))?;
        Ok(address_from_pubkey(&key))
    }
}

/// Result of a verification: the recovered signer and whether it matches
/// the claimed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub is_valid: bool,
    pub recovered_address: Address,
}

/// Verifies that a claimed address signed a message.
#[derive(Debug, Clone, Default)]
pub struct SignatureVerifier<R = PersonalSignRecovery> {
    recovery: R,
}

impl SignatureVerifier<PersonalSignRecovery> {
    /// Verifier backed by k256 personal-message recovery.
    #[must_use]
    pub fn personal_sign() -> Self {
        Self::new(PersonalSignRecovery)
    }
}

impl<R: SignerRecovery> SignatureVerifier<R> {
    #[must_use]
    pub fn new(recovery: R) -> Self {
        Self { recovery }
    }

    /// Recover the signer of `message` and compare it with `claimed_address`.
    ///
    /// A mismatch is reported through `is_valid`, not as an error. Casing of
    /// `claimed_address` never affects the outcome.
    pub fn verify(
        &self,
        message: &str,
        signature: &str,
        claimed_address: &str,
    ) -> Result<VerificationOutcome> {
        let recovered_address = self
            .recovery
            .recover_signer(message.as_bytes(), signature)?;
        Ok(VerificationOutcome {
            is_valid: recovered_address.matches_str(claimed_address),
            recovered_address,
        })
    }

    /// [`verify`](Self::verify) over the fields of an envelope.
    pub fn verify_envelope(&self, envelope: &SignedEnvelope) -> Result<VerificationOutcome> {
        self.verify(
            &envelope.canonical_message,
            &envelope.signature,
            &envelope.claimed_address,
        )
    }
}

#[cfg(test)]
mod tests {
    use k256::ecdsa::SigningKey;

    use super::*;
    use crate::test_helpers::{address_of, personal_sign, random_key};

    const MESSAGE: &str =
        r#"{"amount":"0.01","tokenIn":"ETH","tokenOut":"USDC","duration":"48","timestamp":"1700000000000"}"#;

    #[test]
    fn known_key_address() {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        let key = SigningKey::from_slice(&secret).unwrap();
        assert_eq!(
            address_of(&key).to_checksum(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn valid_signature_recovers_signer() {
        let key = random_key();
        let sig = personal_sign(&key, MESSAGE);
        let addr = address_of(&key);

        let outcome = SignatureVerifier::personal_sign()
            .verify(MESSAGE, &sig, &addr.to_checksum())
            .unwrap();
        assert!(outcome.is_valid);
        assert_eq!(outcome.recovered_address, addr);
    }

    #[test]
    fn claimed_address_case_does_not_matter() {
        let key = random_key();
        let sig = personal_sign(&key, MESSAGE);
        let addr = address_of(&key);
        let verifier = SignatureVerifier::personal_sign();

        for claimed in [
            addr.to_checksum(),
            addr.to_lower_hex(),
            format!("0x{}", addr.to_lower_hex()[2..].to_uppercase()),
        ] {
            assert!(verifier.verify(MESSAGE, &sig, &claimed).unwrap().is_valid, "{claimed}");
        }
    }

    #[test]
    fn other_signer_is_mismatch_not_error() {
        let signer = random_key();
        let claimed = random_key();
        let sig = personal_sign(&signer, MESSAGE);

        let outcome = SignatureVerifier::personal_sign()
            .verify(MESSAGE, &sig, &address_of(&claimed).to_checksum())
            .unwrap();
        assert!(!outcome.is_valid);
        assert_eq!(outcome.recovered_address, address_of(&signer));
    }

    #[test]
    fn changed_message_flips_validity() {
        let key = random_key();
        let sig = personal_sign(&key, MESSAGE);
        let addr = address_of(&key).to_checksum();
        let tampered = MESSAGE.replacen("0.01", "0.02", 1);

        let outcome = SignatureVerifier::personal_sign()
            .verify(&tampered, &sig, &addr)
            .unwrap();
        assert!(!outcome.is_valid);
    }

    #[test]
    fn verification_is_deterministic() {
        let key = random_key();
        let sig = personal_sign(&key, MESSAGE);
        let addr = address_of(&key).to_checksum();
        let verifier = SignatureVerifier::personal_sign();

        let first = verifier.verify(MESSAGE, &sig, &addr).unwrap();
        for _ in 0..10 {
            assert_eq!(verifier.verify(MESSAGE, &sig, &addr).unwrap(), first);
        }
    }

    #[test]
    fn accepts_zero_one_recovery_ids() {
        let key = random_key();
        let sig = personal_sign(&key, MESSAGE);
        let v = u8::from_str_radix(&sig[sig.len() - 2..], 16).unwrap();
        let raw = format!("{}{:02x}", &sig[..sig.len() - 2], v - 27);

        let outcome = SignatureVerifier::personal_sign()
            .verify(MESSAGE, &raw, &address_of(&key).to_checksum())
            .unwrap();
        assert!(outcome.is_valid);
    }

    #[test]
    fn accepts_unprefixed_hex() {
        let key = random_key();
        let sig = personal_sign(&key, MESSAGE);
        let outcome = SignatureVerifier::personal_sign()
            .verify(MESSAGE, &sig[2..], &address_of(&key).to_checksum())
            .unwrap();
        assert!(outcome.is_valid);
    }

    #[test]
    fn malformed_hex_is_format_error() {
        let res = SignatureVerifier::personal_sign().verify(MESSAGE, "0xnothex", "0x00");
        assert!(matches!(res, Err(DarkfillError::InvalidSignatureFormat { .. })));
    }

    #[test]
    fn wrong_length_is_format_error() {
        let short = format!("0x{}", "ab".repeat(64));
        let res = SignatureVerifier::personal_sign().verify(MESSAGE, &short, "0x00");
        assert!(matches!(res, Err(DarkfillError::InvalidSignatureFormat { .. })));
    }

    #[test]
    fn bad_recovery_id_is_format_error() {
        let key = random_key();
        let sig = personal_sign(&key, MESSAGE);
        let bad = format!("{}05", &sig[..sig.len() - 2]);
        let res = parse_signature(&bad);
        assert!(matches!(res, Err(DarkfillError::InvalidSignatureFormat { .. })));
    }

    #[test]
    fn zero_scalars_are_format_error() {
        let zero = format!("0x{}1b", "00".repeat(64));
        assert!(matches!(
            parse_signature(&zero),
            Err(DarkfillError::InvalidSignatureFormat { .. })
        ));
    }

    #[test]
    fn high_s_is_rejected() {
        let key = random_key();
        let sig = personal_sign(&key, MESSAGE);
        let (parsed, _) = parse_signature(&sig).unwrap();
        let (r, s) = parsed.split_scalars();
        let high = Signature::from_scalars(r, -s).unwrap();
        let hex_sig = format!("0x{}1b", hex::encode(high.to_bytes()));
        assert!(matches!(
            parse_signature(&hex_sig),
            Err(DarkfillError::InvalidSignatureFormat { .. })
        ));
    }

    #[test]
    fn personal_hash_includes_length_prefix() {
        assert_ne!(personal_message_hash(b"ab"), personal_message_hash(b"a"));
        let mut manual = Keccak256::new();
        manual.update(b"\x19Ethereum Signed Message:\n5hello");
        let expected: [u8; 32] = manual.finalize().into();
        assert_eq!(personal_message_hash(b"hello"), expected);
    }

    #[test]
    fn verify_envelope_uses_all_fields() {
        let key = random_key();
        let env = SignedEnvelope::new(
            address_of(&key).to_lower_hex(),
            MESSAGE,
            personal_sign(&key, MESSAGE),
        );
        assert!(SignatureVerifier::personal_sign().verify_envelope(&env).unwrap().is_valid);
    }
}
