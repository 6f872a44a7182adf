//! Async wrappers that move the CPU-bound transform onto tokio's blocking pool
//!
//! The round loop is strictly sequential, so parallelism belongs at the record
//! level: spawn one task per record.

use crate::error::{CryptError, Result};
use crate::scheme::{Options, Sha256Crypt, Sha256Record};
use zeroize::Zeroizing;

/// Verify `password` against `record` without blocking the async runtime
///
/// # Errors
///
/// Returns [`CryptError::Task`] if the blocking task panics or is cancelled.
pub async fn verify_async(record: Sha256Record, password: Vec<u8>) -> Result<bool> {
    let password = Zeroizing::new(password);
    tokio::task::spawn_blocking(move || record.verify(&password))
        .await
        .map_err(|err| CryptError::task(err.to_string()))
}

/// Hash `password` with `definition` without blocking the async runtime
///
/// # Errors
///
/// Returns [`CryptError::Task`] if the blocking task panics or is cancelled.
pub async fn hash_async(
    definition: Sha256Crypt,
    password: Vec<u8>,
    salt: Vec<u8>,
    options: Options,
) -> Result<String> {
    let password = Zeroizing::new(password);
    tokio::task::spawn_blocking(move || definition.hash(&password, &salt, &options))
        .await
        .map_err(|err| CryptError::task(err.to_string()))
}
