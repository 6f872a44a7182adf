//! SHA256-CRYPT core transform
//!
//! Reproduces the `$5$` digest computation used by glibc `crypt()` byte for byte.

use crate::primitives::{length_mixer, repeat_to_len, sum_parts, sum_repeated};
use sha2::Sha256;
use zeroize::Zeroizing;

/// Raw digest size in bytes
pub const RAW_LEN: usize = 32;

/// Final byte reordering applied after the round loop
///
/// Read in consecutive triplets this is the grouping table of the `$5$` format,
/// so a plain little-endian h64 pass over the permuted bytes yields the
/// published encoding.
pub const OUTPUT_PERMUTATION: [usize; RAW_LEN] = [
    20, 10, 0, 11, 1, 21, 2, 22, 12, 23, 13, 3, 14, 4, 24, 5, 25, 15, 26, 16, 6, 17, 7, 27, 8, 28,
    18, 29, 19, 9, 30, 31,
];

/// Run the SHA256-CRYPT transform and return the permuted 32-byte digest
///
/// `salt` is used as given; callers are responsible for the 16-byte limit.
/// The loop performs exactly `rounds` sequential digest invocations.
#[must_use]
pub fn sha256_crypt(password: &[u8], salt: &[u8], rounds: u32) -> [u8; RAW_LEN] {
    let pwd_len = password.len();

    let sum_b: Zeroizing<[u8; RAW_LEN]> =
        Zeroizing::new(sum_parts::<Sha256>([password, salt, password]).into());

    let b_cycled = repeat_to_len(sum_b.as_slice(), pwd_len);
    let sum_a: Zeroizing<[u8; RAW_LEN]> = Zeroizing::new(
        sum_parts::<Sha256>(
            [password, salt, b_cycled.as_slice()]
                .into_iter()
                .chain(length_mixer(pwd_len, sum_b.as_slice(), password)),
        )
        .into(),
    );

    let sum_p: Zeroizing<[u8; RAW_LEN]> =
        Zeroizing::new(sum_repeated::<Sha256>(password, pwd_len).into());
    let dp = repeat_to_len(sum_p.as_slice(), pwd_len);

    let salt_repeats = 16 + usize::from(sum_a[0]);
    let sum_s: Zeroizing<[u8; RAW_LEN]> =
        Zeroizing::new(sum_repeated::<Sha256>(salt, salt_repeats).into());
    let ds = repeat_to_len(sum_s.as_slice(), salt.len());

    let mut sum_c = sum_a;
    for round in 0..rounds {
        let next = sum_parts::<Sha256>(round_parts(round, sum_c.as_slice(), &dp, &ds));
        sum_c = Zeroizing::new(next.into());
    }

    let mut out = [0u8; RAW_LEN];
    for (slot, &src) in out.iter_mut().zip(OUTPUT_PERMUTATION.iter()) {
        *slot = sum_c[src];
    }
    out
}

/// Message parts fed to the digest for one round
///
/// Odd rounds open with the password sequence and close with the previous
/// digest, even rounds the other way around. The salt sequence joins unless the
/// round is a multiple of 3, the password sequence unless a multiple of 7.
fn round_parts<'a>(
    round: u32,
    prev: &'a [u8],
    dp: &'a [u8],
    ds: &'a [u8],
) -> impl Iterator<Item = &'a [u8]> {
    let odd = round % 2 == 1;
    [
        Some(if odd { dp } else { prev }),
        (round % 3 != 0).then_some(ds),
        (round % 7 != 0).then_some(dp),
        Some(if odd { prev } else { dp }),
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_raw_digest_known_value() {
        let raw = sha256_crypt(b"Hello world!", b"saltstring", 5000);
        assert_eq!(
            raw,
            hex!("47a3ec24e9928013e643177fdfaa58e7d84c458bf7642065345d9a4d2389107a")
        );
    }

    #[test]
    fn test_permutation_is_bijective() {
        let mut seen = [false; RAW_LEN];
        for &idx in &OUTPUT_PERMUTATION {
            assert!(!seen[idx], "index {idx} repeated");
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_round_parts_dispatch() {
        let (c, p, s) = (b"C".as_slice(), b"P".as_slice(), b"S".as_slice());
        let collect = |round| round_parts(round, c, p, s).collect::<Vec<_>>().concat();

        assert_eq!(collect(0), b"CP");
        assert_eq!(collect(1), b"PSPC");
        assert_eq!(collect(2), b"CSPP");
        assert_eq!(collect(3), b"PPC");
        assert_eq!(collect(7), b"PSC");
        assert_eq!(collect(21), b"PC");
    }

    #[test]
    fn test_transform_is_deterministic() {
        let first = sha256_crypt(b"secret", b"abcdefgh", 1000);
        let second = sha256_crypt(b"secret", b"abcdefgh", 1000);
        assert_eq!(first, second);
        assert_ne!(first, sha256_crypt(b"secret", b"abcdefgi", 1000));
        assert_ne!(first, sha256_crypt(b"secret", b"abcdefgh", 1001));
    }
}
