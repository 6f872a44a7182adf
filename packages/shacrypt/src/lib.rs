//! SHA256-CRYPT (`$5$`) password hashing compatible with glibc `crypt()`
//!
//! ```
//! use shacrypt::{Options, Sha256Crypt};
//!
//! let def = Sha256Crypt::new();
//! let stored = def.hash(b"Hello world!", b"saltstring", &Options::new());
//! assert_eq!(stored, "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5");
//!
//! let record = def.try_parse(&stored).unwrap();
//! assert!(record.verify(b"Hello world!"));
//! ```
//!
//! Option handling is lenient on purpose: an out-of-range `rounds` value is
//! clamped into `[1000, 999_999_999]` and a non-integer one is ignored, neither
//! is reported as an error.

#![forbid(unsafe_code)]

pub mod algorithms;
pub mod error;
pub mod h64;
pub mod primitives;
pub mod registry;
pub mod scheme;
pub mod task;

// Re-export error types
pub use error::{CryptError, Result};

pub use registry::{Registry, RegistryBuilder};
pub use scheme::sha256::{DEFAULT_ROUNDS, MAX_ROUNDS, MIN_ROUNDS};
pub use scheme::{Crypter, Definition, Options, Sha256Crypt, Sha256Record};
pub use task::{hash_async, verify_async};
