//! Wallet fixtures for tests: random keys and personal-message signing.

use darkfill_types::Address;
use k256::ecdsa::{RecoveryId, SigningKey};

use crate::signature::{address_from_pubkey, personal_message_hash};

/// A fresh random secp256k1 key.
pub fn random_key() -> SigningKey {
    SigningKey::random(&mut rand::thread_rng())
}

/// Account address of `key`.
pub fn address_of(key: &SigningKey) -> Address {
    address_from_pubkey(key.verifying_key())
}

/// Sign `message` the way a wallet's personal-sign does: `0x`-prefixed
/// `r || s || v` hex with low S and `v` in {27, 28}.
pub fn personal_sign(key: &SigningKey, message: &str) -> String {
    let prehash = personal_message_hash(message.as_bytes());
    let (sig, recid) = key
        .sign_prehash_recoverable(&prehash)
        .expect("signing failed");

    // Normalizing S flips the parity of the recovered point.
    let (sig, recid) = match sig.normalize_s() {
        Some(low) => (low, RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced())),
        None => (sig, recid),
    };

    let mut bytes = sig.to_bytes().to_vec();
    bytes.push(recid.to_byte() + 27);
    format!("0x{}", hex::encode(bytes))
}
