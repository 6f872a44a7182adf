//! SHA256-CRYPT definition and factory

use super::record::Sha256Record;
use super::{DEFAULT_ROUNDS, MIN_ROUNDS, PREFIX, ROUNDS_KEY, clamp_rounds};
use crate::scheme::{Crypter, Definition, Options};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// SHA256-CRYPT configuration
///
/// Immutable; [`Sha256Crypt::with_options`] returns a new value. Out-of-range
/// and wrong-typed options are clamped or ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DefinitionRepr")]
pub struct Sha256Crypt {
    rounds: u32,
}

#[derive(Deserialize)]
struct DefinitionRepr {
    #[serde(default = "default_rounds")]
    rounds: u64,
}

fn default_rounds() -> u64 {
    u64::from(DEFAULT_ROUNDS)
}

impl From<DefinitionRepr> for Sha256Crypt {
    fn from(repr: DefinitionRepr) -> Self {
        Self::with_rounds(repr.rounds)
    }
}

impl Default for Sha256Crypt {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha256Crypt {
    /// Definition with the default cost of 5000 rounds
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
        }
    }

    /// Definition with `rounds` clamped into the accepted range
    #[must_use]
    pub fn with_rounds(rounds: u64) -> Self {
        Self {
            rounds: clamp_rounds(rounds),
        }
    }

    /// Configured round count
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Snapshot of the configuration as `{"rounds": N}`
    #[must_use]
    pub fn options(&self) -> Options {
        let mut options = Options::new();
        options.insert(ROUNDS_KEY.to_string(), Value::from(self.rounds));
        options
    }

    /// Apply `options`
    ///
    /// An integer `rounds` entry is clamped into range. A missing or
    /// non-integer entry leaves the configuration unchanged.
    #[must_use]
    pub fn with_options(&self, options: &Options) -> Self {
        let Some(value) = options.get(ROUNDS_KEY) else {
            return *self;
        };

        let next = if let Some(rounds) = value.as_u64() {
            Self::with_rounds(rounds)
        } else if value.as_i64().is_some() {
            Self { rounds: MIN_ROUNDS }
        } else {
            debug!(?value, "ignoring non-integer rounds option");
            return *self;
        };

        if value.as_u64() != Some(u64::from(next.rounds)) {
            debug!(?value, rounds = next.rounds, "rounds option clamped");
        }
        next
    }

    /// Template record with this cost, empty salt and empty digest
    #[must_use]
    pub fn default_record(&self) -> Sha256Record {
        Sha256Record::empty(self.rounds)
    }

    /// Hash `password` and return the encoded string
    ///
    /// An empty `salt` draws a fresh random one.
    #[must_use]
    pub fn hash(&self, password: &[u8], salt: &[u8], options: &Options) -> String {
        self.with_options(options)
            .default_record()
            .with_salt(salt)
            .compute_from(password)
            .to_string()
    }

    /// Parse `encoded` if it is a SHA256-CRYPT string
    ///
    /// `None` covers both foreign prefixes and malformed records.
    #[must_use]
    pub fn try_parse(&self, encoded: &str) -> Option<Sha256Record> {
        if !encoded.starts_with(PREFIX) {
            return None;
        }
        match Sha256Record::parse(encoded) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!(%err, "rejecting malformed SHA256-CRYPT record");
                None
            }
        }
    }
}

impl Definition for Sha256Crypt {
    fn name(&self) -> &'static str {
        "{SHA256-CRYPT}"
    }

    fn prefix(&self) -> &'static str {
        PREFIX
    }

    fn options(&self) -> Options {
        Sha256Crypt::options(self)
    }

    fn with_options(&self, options: &Options) -> Box<dyn Definition> {
        Box::new(Sha256Crypt::with_options(self, options))
    }

    fn default_crypter(&self) -> Box<dyn Crypter> {
        Box::new(self.default_record())
    }

    fn hash(&self, password: &[u8], salt: &[u8], options: &Options) -> String {
        Sha256Crypt::hash(self, password, salt, options)
    }

    fn try_parse(&self, encoded: &str) -> Option<Box<dyn Crypter>> {
        Sha256Crypt::try_parse(self, encoded).map(|record| Box::new(record) as Box<dyn Crypter>)
    }
}
