//! Crypt-compatible base64 ("h64") encoding
//!
//! Uses the `./0-9A-Za-z` alphabet and packs each 3-byte group little-endian,
//! emitting the least significant 6 bits first. This is not interchangeable with
//! RFC 4648 base64.

use rand::{Rng, rng};

/// The 64-symbol crypt alphabet, value 0 is `.` and value 63 is `z`
pub const ALPHABET: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of characters produced for `len` input bytes
#[must_use]
pub const fn encoded_len(len: usize) -> usize {
    (len * 8).div_ceil(6)
}

/// Encode bytes in consecutive little-endian triplets
///
/// A trailing group of 2 bytes yields 3 characters, of 1 byte yields 2.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(bytes.len()));
    for group in bytes.chunks(3) {
        let mut word = group
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, b)| acc | (u32::from(*b) << (8 * i)));
        for _ in 0..=group.len() {
            out.push(char::from(ALPHABET[(word & 0x3f) as usize]));
            word >>= 6;
        }
    }
    out
}

/// Whether `c` belongs to the crypt alphabet
#[must_use]
pub fn is_h64_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'.' || c == b'/'
}

/// Draw `len` characters uniformly from the crypt alphabet
///
/// Uses the thread-local CSPRNG. 256 is a multiple of 64 so masking keeps the
/// distribution uniform.
#[must_use]
pub fn random_salt(len: usize) -> String {
    let mut rng = rng();
    (0..len)
        .map(|_| char::from(ALPHABET[usize::from(rng.random::<u8>() & 0x3f)]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_ordering() {
        assert_eq!(encode(&[0x00]), "..");
        assert_eq!(encode(&[0x3f]), "z.");
        assert_eq!(encode(&[0x01]), "/.");
    }

    #[test]
    fn test_little_endian_packing() {
        // 0x0000ff -> low six bits 0x3f first
        assert_eq!(encode(&[0xff, 0x00, 0x00]), "z1..");
        // 0xff0000 -> high bits land in the last characters
        assert_eq!(encode(&[0x00, 0x00, 0xff]), "..kz");
    }

    #[test]
    fn test_digest_length() {
        assert_eq!(encoded_len(32), 43);
        assert_eq!(encode(&[0u8; 32]).len(), 43);
        assert_eq!(encode(&[0u8; 2]).len(), 3);
        assert!(encode(&[]).is_empty());
    }

    #[test]
    fn test_random_salt_uses_alphabet() {
        let salt = random_salt(16);
        assert_eq!(salt.len(), 16);
        assert!(salt.bytes().all(is_h64_char));
        assert_ne!(salt, random_salt(16), "two draws should differ");
    }
}
