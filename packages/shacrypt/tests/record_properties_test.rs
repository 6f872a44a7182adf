//! Property tests for the record codec and verification

use proptest::prelude::*;
use shacrypt::h64::ALPHABET;
use shacrypt::{MAX_ROUNDS, MIN_ROUNDS, Sha256Crypt, Sha256Record};

fn salt_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(ALPHABET.to_vec()), 1..=16)
}

fn digest_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(ALPHABET.to_vec()), 43)
}

proptest! {
    #[test]
    fn parse_inverts_format(
        rounds in MIN_ROUNDS..=MAX_ROUNDS,
        salt in salt_strategy(),
        digest in digest_strategy(),
    ) {
        let record = Sha256Crypt::with_rounds(u64::from(rounds))
            .default_record()
            .with_salt(&salt)
            .with_digest(&digest);
        let encoded = record.to_string();
        prop_assert_eq!(Sha256Record::parse(&encoded), Ok(record));
    }

    #[test]
    fn parse_inverts_format_for_any_input_bytes(
        rounds in MIN_ROUNDS..=MAX_ROUNDS,
        salt in prop::collection::vec(any::<u8>(), 0..32),
        digest in prop::collection::vec(any::<u8>(), 0..64),
        password in prop::collection::vec(any::<u8>(), 1..16),
    ) {
        let record = Sha256Crypt::with_rounds(u64::from(rounds))
            .default_record()
            .with_salt(&salt)
            .with_digest(&digest);
        prop_assert!(record.salt().len() <= 16);
        prop_assert_eq!(Sha256Record::parse(&record.to_string()), Ok(record.clone()));

        let computed = Sha256Crypt::with_rounds(1000)
            .default_record()
            .with_salt(&salt)
            .compute_from(&password);
        let reparsed = Sha256Record::parse(&computed.to_string()).unwrap();
        prop_assert!(reparsed.verify(&password));
    }

    #[test]
    fn salt_with_unicode_round_trips(salt in "[^$]{1,12}") {
        let record = Sha256Crypt::new().default_record().with_salt(salt.as_bytes());
        prop_assert!(std::str::from_utf8(record.salt()).is_ok());
        prop_assert_eq!(Sha256Record::parse(&record.to_string()), Ok(record));
    }

    #[test]
    fn format_normalizes_parsed_strings(
        rounds in MIN_ROUNDS..=MAX_ROUNDS,
        salt in salt_strategy(),
        digest in digest_strategy(),
    ) {
        let salt = String::from_utf8(salt).unwrap();
        let digest = String::from_utf8(digest).unwrap();
        let encoded = format!("$5$rounds={rounds}${salt}${digest}");
        let formatted = Sha256Record::parse(&encoded).unwrap().to_string();
        if rounds == 5000 {
            prop_assert_eq!(formatted, format!("$5${salt}${digest}"));
        } else {
            prop_assert_eq!(formatted, encoded);
        }
    }

    #[test]
    fn with_options_always_in_bounds(rounds in any::<i64>()) {
        let mut options = shacrypt::Options::new();
        options.insert("rounds".to_string(), serde_json::json!(rounds));
        let def = Sha256Crypt::new().with_options(&options);
        prop_assert!((MIN_ROUNDS..=MAX_ROUNDS).contains(&def.rounds()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn verify_accepts_only_the_hashed_password(
        password in prop::collection::vec(any::<u8>(), 1..64),
        other in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        let record = Sha256Crypt::with_rounds(1000)
            .default_record()
            .with_salt(b"")
            .compute_from(&password);
        prop_assert!(record.verify(&password));
        if other != password {
            prop_assert!(!record.verify(&other));
        }
    }
}
