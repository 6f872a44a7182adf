//! SHA256-CRYPT hash record and its string codec

use super::definition::Sha256Crypt;
use super::{DEFAULT_ROUNDS, DIGEST_LEN, MAX_ROUNDS, PREFIX, ROUNDS_KEY, SALT_LEN, clamp_rounds};
use crate::algorithms::sha256_crypt;
use crate::error::{CryptError, Result};
use crate::h64;
use crate::scheme::{Crypter, Definition};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use tracing::trace;

/// A SHA256-CRYPT record: cost, salt and encoded digest
///
/// Every transformation returns a new record, the receiver is never touched.
/// A stale digest after [`Sha256Record::with_salt`] is a legitimate
/// intermediate state.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Sha256Record {
    rounds: u32,
    salt: String,
    digest: String,
}

impl Sha256Record {
    pub(crate) fn empty(rounds: u32) -> Self {
        Self {
            rounds,
            salt: String::new(),
            digest: String::new(),
        }
    }

    /// Round count
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Stored salt bytes
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        self.salt.as_bytes()
    }

    /// Stored encoded digest, empty when none was computed or supplied
    #[must_use]
    pub fn digest(&self) -> &[u8] {
        self.digest.as_bytes()
    }

    /// Definition with this record's cost
    #[must_use]
    pub fn definition(&self) -> Sha256Crypt {
        Sha256Crypt::with_rounds(u64::from(self.rounds))
    }

    /// New record with `salt`
    ///
    /// The salt stops at the first `$` or invalid UTF-8 byte and is truncated
    /// to at most 16 bytes on a character boundary. If nothing usable is left,
    /// 16 random crypt-alphabet characters are drawn. The digest is carried
    /// over unchanged.
    #[must_use]
    pub fn with_salt(&self, salt: &[u8]) -> Self {
        let salt = match clip_salt(salt) {
            "" => h64::random_salt(SALT_LEN),
            clipped => clipped.to_string(),
        };
        Self {
            rounds: self.rounds,
            salt,
            digest: self.digest.clone(),
        }
    }

    /// New record carrying up to 43 characters of `digest`
    ///
    /// Only the leading run of crypt-alphabet characters is kept.
    #[must_use]
    pub fn with_digest(&self, digest: &[u8]) -> Self {
        let digest = digest
            .iter()
            .take(DIGEST_LEN)
            .take_while(|c| h64::is_h64_char(**c))
            .map(|c| char::from(*c))
            .collect();
        Self {
            rounds: self.rounds,
            salt: self.salt.clone(),
            digest,
        }
    }

    /// New record whose digest is computed from `password`
    ///
    /// Uses the record's salt as stored, including an empty one.
    #[must_use]
    pub fn compute_from(&self, password: &[u8]) -> Self {
        trace!(rounds = self.rounds, "computing SHA256-CRYPT digest");
        let digest = self.encoded_digest_for(password);
        Self {
            rounds: self.rounds,
            salt: self.salt.clone(),
            digest,
        }
    }

    /// Check `password` against the stored digest
    ///
    /// An empty password never verifies. The comparison runs in constant time.
    #[must_use]
    pub fn verify(&self, password: &[u8]) -> bool {
        if password.is_empty() {
            return false;
        }
        let computed = self.encoded_digest_for(password);
        computed.as_bytes().ct_eq(self.digest.as_bytes()).into()
    }

    /// Decode an encoded `$5$` string
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the string does not start with `$5$`
    /// - the `rounds=` value is not a decimal integer
    /// - the remainder has too many `$`-delimited fields
    /// - the digest holds characters outside the crypt alphabet
    pub fn parse(encoded: &str) -> Result<Self> {
        let rest = encoded
            .strip_prefix(PREFIX)
            .ok_or(CryptError::InvalidPrefix { expected: PREFIX })?;

        if rest.is_empty() {
            return Ok(Self::empty(DEFAULT_ROUNDS));
        }

        let mut fields: Vec<&str> = rest.split('$').collect();
        // A lone trailing `$` means "no digest supplied"
        if fields.len() > 1 && fields.last() == Some(&"") {
            fields.pop();
        }
        let found = fields.len();

        let first = fields.first().copied().unwrap_or_default();
        let (rounds, fields) = match first
            .strip_prefix(ROUNDS_KEY)
            .and_then(|tail| tail.strip_prefix('='))
        {
            Some(value) => (parse_rounds(value)?, &fields[1..]),
            None => (DEFAULT_ROUNDS, &fields[..]),
        };

        let (salt, digest) = match fields {
            [] => ("", ""),
            [salt] => (*salt, ""),
            [salt, digest] => (*salt, *digest),
            _ => return Err(CryptError::FieldCount { found }),
        };
        if !digest.bytes().all(h64::is_h64_char) {
            return Err(CryptError::MalformedDigest);
        }

        Ok(Self {
            rounds,
            salt: clip_salt(salt.as_bytes()).to_string(),
            digest: digest[..digest.len().min(DIGEST_LEN)].to_string(),
        })
    }

    fn encoded_digest_for(&self, password: &[u8]) -> String {
        h64::encode(&sha256_crypt(password, self.salt.as_bytes(), self.rounds))
    }
}

/// Longest prefix of `salt` that formats and parses back unchanged
///
/// Stops at the first `$` or invalid UTF-8 byte, then cuts to at most
/// [`SALT_LEN`] bytes without splitting a character.
fn clip_salt(salt: &[u8]) -> &str {
    let field = salt.split(|b| *b == b'$').next().unwrap_or_default();
    let text = match std::str::from_utf8(field) {
        Ok(text) => text,
        Err(err) => std::str::from_utf8(&field[..err.valid_up_to()]).unwrap_or_default(),
    };
    let end = (0..=text.len().min(SALT_LEN))
        .rev()
        .find(|&idx| text.is_char_boundary(idx))
        .unwrap_or(0);
    &text[..end]
}

fn parse_rounds(value: &str) -> Result<u32> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CryptError::MalformedRounds(value.to_string()));
    }
    // All digits, so the only failure left is overflow
    Ok(value.parse::<u64>().map_or(MAX_ROUNDS, clamp_rounds))
}

impl fmt::Display for Sha256Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PREFIX)?;
        // A salt that itself reads as a cost segment needs the explicit one
        if self.rounds != DEFAULT_ROUNDS || self.salt.starts_with("rounds=") {
            write!(f, "{ROUNDS_KEY}={}$", self.rounds)?;
        }
        write!(f, "{}${}", self.salt, self.digest)
    }
}

impl fmt::Debug for Sha256Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha256Record")
            .field("rounds", &self.rounds)
            .field("salt", &self.salt)
            .field("digest_len", &self.digest.len())
            .finish()
    }
}

impl FromStr for Sha256Record {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Sha256Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Sha256Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::parse(&encoded).map_err(serde::de::Error::custom)
    }
}

impl Crypter for Sha256Record {
    fn definition(&self) -> Box<dyn Definition> {
        Box::new(Sha256Record::definition(self))
    }

    fn with_salt(&self, salt: &[u8]) -> Box<dyn Crypter> {
        Box::new(Sha256Record::with_salt(self, salt))
    }

    fn with_digest(&self, digest: &[u8]) -> Box<dyn Crypter> {
        Box::new(Sha256Record::with_digest(self, digest))
    }

    fn compute_from(&self, password: &[u8]) -> Box<dyn Crypter> {
        Box::new(Sha256Record::compute_from(self, password))
    }

    fn verify(&self, password: &[u8]) -> bool {
        Sha256Record::verify(self, password)
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}
