//! Crypt transform implementations
//!
//! Each submodule holds one raw transform: password, salt and cost in, raw
//! digest bytes out. Encoding and record handling live in [`crate::scheme`].

pub mod sha256;

pub use sha256::sha256_crypt;
