//! SHA256-CRYPT (`$5$`) scheme
//!
//! Encoded form:
//!
//! ```text
//! $5$[rounds=N$]salt$digest
//! ```
//!
//! `rounds=` is omitted when the cost equals [`DEFAULT_ROUNDS`]. Salts hold at
//! most [`SALT_LEN`] bytes and digests [`DIGEST_LEN`] crypt-alphabet characters.

mod definition;
mod record;

pub use definition::Sha256Crypt;
pub use record::Sha256Record;

/// Prefix identifying SHA256-CRYPT strings
pub const PREFIX: &str = "$5$";

/// Lowest accepted round count
pub const MIN_ROUNDS: u32 = 1000;

/// Highest accepted round count
pub const MAX_ROUNDS: u32 = 999_999_999;

/// Round count used when none is given
pub const DEFAULT_ROUNDS: u32 = 5000;

/// Maximum salt length in bytes
pub const SALT_LEN: usize = 16;

/// Length of the encoded digest
pub const DIGEST_LEN: usize = 43;

pub(crate) const ROUNDS_KEY: &str = "rounds";

/// Clamp any round count into `[MIN_ROUNDS, MAX_ROUNDS]`
#[must_use]
pub fn clamp_rounds(rounds: u64) -> u32 {
    u32::try_from(rounds.clamp(u64::from(MIN_ROUNDS), u64::from(MAX_ROUNDS)))
        .unwrap_or(MAX_ROUNDS)
}
