use proptest::prelude::*;

use herald_types::{ArkAmount, PublicKey};

proptest! {
    /// Formatted balances always have exactly two decimal digits.
    #[test]
    fn ark_string_has_two_decimals(satoshi in 0u64..=10_000_000 * ArkAmount::SATOSHI_PER_ARK) {
        let rendered = ArkAmount::from_satoshi(satoshi).to_ark_string();
        let (whole, frac) = rendered.split_once('.').expect("decimal point");
        prop_assert!(!whole.is_empty());
        prop_assert!(whole.bytes().all(|b| b.is_ascii_digit()));
        prop_assert_eq!(frac.len(), 2);
        prop_assert!(frac.bytes().all(|b| b.is_ascii_digit()));
    }

    /// The rendered value is the raw amount rounded to the nearest cent.
    #[test]
    fn ark_string_rounds_to_nearest_cent(satoshi in 0u64..=10_000_000 * ArkAmount::SATOSHI_PER_ARK) {
        const SATOSHI_PER_CENT: u64 = ArkAmount::SATOSHI_PER_ARK / 100;

        let rendered = ArkAmount::from_satoshi(satoshi).to_ark_string();
        let (whole, frac) = rendered.split_once('.').expect("decimal point");
        let cents: u64 =
            whole.parse::<u64>().unwrap() * 100 + frac.parse::<u64>().unwrap();

        // Half-up rounding keeps the rendered value within half a cent.
        let distance = (cents * SATOSHI_PER_CENT).abs_diff(satoshi);
        prop_assert!(distance <= SATOSHI_PER_CENT / 2);
    }

    /// Formatting is monotone: a larger balance never renders smaller.
    #[test]
    fn ark_string_is_monotone(a in 0u64..=u64::MAX / 2, b in 0u64..=u64::MAX / 2) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo_str = ArkAmount::from_satoshi(lo).to_ark_string();
        let hi_str = ArkAmount::from_satoshi(hi).to_ark_string();
        let parse = |s: &str| {
            let (whole, frac) = s.split_once('.').unwrap();
            whole.parse::<u128>().unwrap() * 100 + frac.parse::<u128>().unwrap()
        };
        prop_assert!(parse(&lo_str) <= parse(&hi_str));
    }

    /// Key validation accepts exactly the 66-hex-char shape.
    #[test]
    fn public_key_validation_matches_shape(raw in "[0-9a-f]{66}") {
        prop_assert!(PublicKey::new(raw).is_valid());
    }

    #[test]
    fn public_key_validation_rejects_other_lengths(raw in "[0-9a-f]{0,65}") {
        prop_assert!(!PublicKey::new(raw).is_valid());
    }
}
