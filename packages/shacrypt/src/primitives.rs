//! Byte-mixing primitives shared by the crypt transforms
//!
//! Every helper here is digest-agnostic so SHA-256 and SHA-512 variants of the
//! crypt family can reuse them.

use sha2::Digest;
use sha2::digest::Output;
use zeroize::Zeroizing;

/// Hash an arbitrary sequence of byte spans as one message
pub fn sum_parts<'a, D: Digest>(parts: impl IntoIterator<Item = &'a [u8]>) -> Output<D> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}

/// Hash `src` concatenated with itself `times` times, without materializing the message
pub fn sum_repeated<D: Digest>(src: &[u8], times: usize) -> Output<D> {
    let mut hasher = D::new();
    for _ in 0..times {
        hasher.update(src);
    }
    hasher.finalize()
}

/// Cycle `src` until exactly `len` bytes are produced
///
/// An empty `src` always yields an empty sequence.
#[must_use]
pub fn repeat_to_len(src: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(src.iter().copied().cycle().take(len).collect())
}

/// Build the length-dependent mixing sequence
///
/// Walks the bits of `len` from the least significant one while the remaining
/// value is nonzero, choosing `one` for a set bit and `zero` otherwise.
pub fn length_mixer<'a>(len: usize, one: &'a [u8], zero: &'a [u8]) -> LengthMixer<'a> {
    LengthMixer {
        remaining: len,
        one,
        zero,
    }
}

/// Iterator returned by [`length_mixer`]
#[derive(Debug, Clone)]
pub struct LengthMixer<'a> {
    remaining: usize,
    one: &'a [u8],
    zero: &'a [u8],
}

impl<'a> Iterator for LengthMixer<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let part = if self.remaining & 1 == 1 {
            self.one
        } else {
            self.zero
        };
        self.remaining >>= 1;
        Some(part)
    }
}
