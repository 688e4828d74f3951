//! System-wide constants for the darkfill order pipeline.

/// Size of each case-specific ASCII letter alphabet.
pub const LETTER_ALPHABET_LEN: u8 = 26;

/// Size of the ASCII digit alphabet.
pub const DIGIT_ALPHABET_LEN: u8 = 10;

/// Rotation shift shared by the client encoder and the server decoder.
///
/// Half of the letter alphabet, so letters rotate as ROT13. Both sides must
/// agree on it exactly or every decode fails.
pub const ROTATION_SHIFT: i32 = LETTER_ALPHABET_LEN as i32 / 2;

/// Default reference price (quote units per unit of input token).
pub const DEFAULT_REFERENCE_PRICE: u32 = 3000;

/// Default adverse-impact penalty, in basis points (300 = 3%).
pub const DEFAULT_PENALTY_RATE_BPS: u32 = 300;

/// Decimal places used when presenting report values.
pub const REPORT_DECIMALS: u32 = 2;

/// Prefix prepended to a message before hashing for personal-message signing.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Length of a recoverable signature in bytes (`r || s || v`).
pub const SIGNATURE_LEN: usize = 65;

/// Length of an account address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Maximum accepted request body size in bytes.
pub const MAX_REQUEST_BYTES: usize = 100 * 1024;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name reported by the liveness payload.
pub const SERVICE_NAME: &str = "darkfill";
