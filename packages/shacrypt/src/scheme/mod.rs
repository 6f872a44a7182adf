//! Scheme abstraction shared by every crypt format
//!
//! A [`Definition`] is an immutable cost configuration that recognizes its own
//! encoded strings and hands out fresh [`Crypter`] records. Every operation on
//! either side returns a new value, so templates can be shared freely between
//! threads.

pub mod sha256;

use serde_json::{Map, Value};

pub use sha256::{Sha256Crypt, Sha256Record};

/// Loosely typed option bag, e.g. `{"rounds": 10000}`
///
/// Unknown keys and wrong-typed values are ignored by the schemes.
pub type Options = Map<String, Value>;

/// A hashing scheme configured with a cost setting
pub trait Definition: Send + Sync + std::fmt::Debug {
    /// Human readable scheme name, e.g. `{SHA256-CRYPT}`
    fn name(&self) -> &'static str;

    /// Encoded-string prefix identifying the scheme
    fn prefix(&self) -> &'static str;

    /// Snapshot of the current configuration
    fn options(&self) -> Options;

    /// Apply options, clamping out-of-range values and ignoring wrong-typed ones
    fn with_options(&self, options: &Options) -> Box<dyn Definition>;

    /// Template record with this configuration, empty salt and empty digest
    fn default_crypter(&self) -> Box<dyn Crypter>;

    /// Hash `password` under `salt` (random when empty) and return the encoded string
    fn hash(&self, password: &[u8], salt: &[u8], options: &Options) -> String {
        self.with_options(options)
            .default_crypter()
            .with_salt(salt)
            .compute_from(password)
            .encode()
    }

    /// Parse `encoded` if it carries this scheme's prefix
    ///
    /// Returns `None` for foreign or malformed strings so a registry can keep
    /// probing other schemes.
    fn try_parse(&self, encoded: &str) -> Option<Box<dyn Crypter>>;
}

/// A single hash record of some scheme
pub trait Crypter: Send + Sync + std::fmt::Debug {
    /// The definition matching this record's cost setting
    fn definition(&self) -> Box<dyn Definition>;

    /// Options snapshot of this record's definition
    fn options(&self) -> Options {
        self.definition().options()
    }

    /// New record with `salt`, random when empty
    fn with_salt(&self, salt: &[u8]) -> Box<dyn Crypter>;

    /// New record with the given encoded digest
    fn with_digest(&self, digest: &[u8]) -> Box<dyn Crypter>;

    /// New record whose digest is computed from `password`
    fn compute_from(&self, password: &[u8]) -> Box<dyn Crypter>;

    /// Constant-time check of `password` against the stored digest
    fn verify(&self, password: &[u8]) -> bool;

    /// Encoded string form of the record
    fn encode(&self) -> String;
}
