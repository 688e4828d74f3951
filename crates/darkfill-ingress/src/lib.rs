//! # darkfill-ingress
//!
//! **Security Envelope Plane**: everything an order passes through before
//! it is trusted enough to simulate.
//!
//! ## Components
//!
//! 1. **SignatureVerifier**: recovers the wallet that signed the canonical
//!    message and compares it with the claimed address
//! 2. **RotationCodec**: reverses the alphanumeric rotation applied by the
//!    client and parses the order record
//! 3. **OrderValidator**: checks structure, then values, reporting every
//!    defect at once
//!
//! ## Order Flow
//!
//! ```text
//! SignedEnvelope → SignatureVerifier.verify_envelope()
//! EncodedOrder   → RotationCodec.decode_order() → OrderValidator.validate()
//!                → ValidatedOrder → simcore
//! ```
//!
//! Only a `ValidatedOrder` may leave this crate towards the simulator.

pub mod codec;
pub mod signature;
pub mod validator;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use codec::RotationCodec;
pub use signature::{PersonalSignRecovery, SignatureVerifier, SignerRecovery, VerificationOutcome};
pub use validator::OrderValidator;
