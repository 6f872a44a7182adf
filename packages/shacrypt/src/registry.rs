//! Prefix-keyed scheme registry
//!
//! A [`Registry`] is assembled once with [`RegistryBuilder`] and read-only
//! afterwards. [`Registry::global`] is a lazily built process-wide instance
//! holding every scheme this crate ships.

use crate::scheme::{Crypter, Definition, Sha256Crypt};
use once_cell::sync::Lazy;
use tracing::{debug, warn};

static GLOBAL: Lazy<Registry> =
    Lazy::new(|| Registry::builder().register(Sha256Crypt::new()).build());

/// Immutable list of schemes probed in registration order
#[derive(Debug, Default)]
pub struct Registry {
    schemes: Vec<Box<dyn Definition>>,
}

/// Builder for [`Registry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    schemes: Vec<Box<dyn Definition>>,
}

impl RegistryBuilder {
    /// Add a scheme; a second scheme with an already registered prefix is dropped
    #[must_use]
    pub fn register(mut self, definition: impl Definition + 'static) -> Self {
        if self
            .schemes
            .iter()
            .any(|known| known.prefix() == definition.prefix())
        {
            warn!(
                scheme = definition.name(),
                prefix = definition.prefix(),
                "prefix already registered, ignoring scheme"
            );
            return self;
        }
        self.schemes.push(Box::new(definition));
        self
    }

    /// Freeze the registry
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            schemes: self.schemes,
        }
    }
}

impl Registry {
    /// Start an empty registry
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Process-wide registry with the built-in schemes
    #[must_use]
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Registered schemes in probe order
    pub fn schemes(&self) -> impl Iterator<Item = &dyn Definition> + '_ {
        self.schemes
            .iter()
            .map(|scheme| -> &dyn Definition { scheme.as_ref() })
    }

    /// Scheme registered under exactly `prefix`
    #[must_use]
    pub fn definition(&self, prefix: &str) -> Option<&dyn Definition> {
        self.schemes().find(|scheme| scheme.prefix() == prefix)
    }

    /// Parse `encoded` with the first scheme that recognizes it
    #[must_use]
    pub fn find(&self, encoded: &str) -> Option<Box<dyn Crypter>> {
        let found = self.schemes.iter().find_map(|scheme| scheme.try_parse(encoded));
        if found.is_none() {
            debug!("no registered scheme recognizes the record");
        }
        found
    }

    /// Verify `password` against a stored encoded string
    ///
    /// Unrecognized or malformed records never verify.
    #[must_use]
    pub fn verify(&self, encoded: &str, password: &[u8]) -> bool {
        self.find(encoded).is_some_and(|crypter| crypter.verify(password))
    }
}
