use formcheck::checksum::{check_digit, is_valid_id};
use proptest::prelude::*;

/// Eight leading digits and the ID they complete.
fn arb_valid_id() -> impl Strategy<Value = String> {
    prop::array::uniform8(0u8..10).prop_map(|leading| {
        let check = check_digit(&leading);
        leading
            .iter()
            .chain(std::iter::once(&check))
            .map(|d| char::from(b'0' + d))
            .collect()
    })
}

proptest! {
    #[test]
    fn completed_ids_validate(id in arb_valid_id()) {
        prop_assert!(is_valid_id(&id));
    }

    #[test]
    fn any_other_last_digit_fails(id in arb_valid_id(), bump in 1u8..10) {
        let last = id.as_bytes()[8] - b'0';
        let other = (last + bump) % 10;
        let flipped = format!("{}{}", &id[..8], other);
        prop_assert!(!is_valid_id(&flipped));
    }

    #[test]
    fn wrong_length_never_validates(digits in "[0-9]{0,20}") {
        prop_assume!(digits.len() != 9);
        prop_assert!(!is_valid_id(&digits));
    }
}
