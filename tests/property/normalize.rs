use formcheck::normalize::{national_id, phone};
use formcheck::types::Diagnostics;
use proptest::prelude::*;

/// Digits with formatting characters sprinkled between them.
fn arb_formatted(len: std::ops::Range<usize>) -> impl Strategy<Value = (String, String)> {
    prop::collection::vec(("[0-9]", "[ \\-./]{0,2}"), len).prop_map(|parts| {
        let digits: String = parts.iter().map(|(d, _)| d.as_str()).collect();
        let formatted: String = parts
            .iter()
            .map(|(d, sep)| format!("{}{}", d, sep))
            .collect();
        (digits, formatted)
    })
}

proptest! {
    #[test]
    fn nine_digit_ids_normalize_to_their_digits((digits, formatted) in arb_formatted(9..10)) {
        let mut diags = Diagnostics::new();
        let out = national_id("idNumber", &formatted, &mut diags);
        prop_assert_eq!(out, Some(digits));
        prop_assert!(diags.is_empty());
    }

    #[test]
    fn other_digit_counts_are_flagged((digits, formatted) in arb_formatted(0..20)) {
        prop_assume!(digits.len() != 9);
        let mut diags = Diagnostics::new();
        let out = national_id("idNumber", &formatted, &mut diags);
        prop_assert_eq!(out, None);
        let expected = format!("ID must be 9 digits, got {}", digits.len());
        prop_assert_eq!(diags.message("idNumber"), Some(expected.as_str()));
    }

    #[test]
    fn phones_always_write_through(raw in "[0-9+() \\-]{1,24}") {
        let mut diags = Diagnostics::new();
        let out = phone("mobilePhone", &raw, &mut diags);
        prop_assert!(out.chars().all(|c| c.is_ascii_digit() || c == '+'));
        let in_range = (9..=15).contains(&out.len());
        prop_assert_eq!(diags.is_empty(), in_range);
    }
}
