//! Israeli national-ID check digit.
//!
//! The ninth digit is derived from the first eight: digits at even positions
//! count once, digits at odd positions are doubled with the digits of the
//! product summed, and the check digit brings the total up to a multiple of 10.

/// Number of digits in a national ID, check digit included.
pub const ID_LENGTH: usize = 9;

/// Check digit for the eight leading digits of an ID.
pub fn check_digit(leading: &[u8; 8]) -> u8 {
    let total: u32 = leading
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let d = u32::from(d);
            if i % 2 == 0 {
                d
            } else {
                let doubled = d * 2;
                if doubled >= 10 { doubled - 9 } else { doubled }
            }
        })
        .sum();
    ((10 - total % 10) % 10) as u8
}

/// Splits `id` into nine digit values, or `None` unless it is exactly nine ASCII digits.
pub fn digits(id: &str) -> Option<[u8; ID_LENGTH]> {
    let bytes = id.as_bytes();
    if bytes.len() != ID_LENGTH || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut out = [0u8; ID_LENGTH];
    for (slot, b) in out.iter_mut().zip(bytes) {
        *slot = b - b'0';
    }
    Some(out)
}

/// True when `id` is nine digits whose last digit matches the checksum.
pub fn is_valid_id(id: &str) -> bool {
    let Some(d) = digits(id) else {
        return false;
    };
    let mut leading = [0u8; 8];
    leading.copy_from_slice(&d[..8]);
    check_digit(&leading) == d[8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zeros_is_valid() {
        assert!(is_valid_id("000000000"));
    }

    #[test]
    fn known_valid_ids() {
        for id in ["123456782", "039337423", "000000018"] {
            assert!(is_valid_id(id), "expected {} to be valid", id);
        }
    }

    #[test]
    fn flipping_check_digit_invalidates() {
        assert!(is_valid_id("123456782"));
        for last in ['0', '1', '3', '9'] {
            let id = format!("12345678{}", last);
            assert!(!is_valid_id(&id), "expected {} to be invalid", id);
        }
    }

    #[test]
    fn rejects_wrong_shape_before_checksum() {
        assert!(!is_valid_id("12345678"));
        assert!(!is_valid_id("1234567820"));
        assert!(!is_valid_id("12345678a"));
        assert!(!is_valid_id("123-45678"));
        assert!(!is_valid_id(""));
    }

    #[test]
    fn doubled_digits_above_nine_are_folded() {
        // odd positions hold 9: 18 folds to 9, four times → 36; evens are 0
        assert_eq!(check_digit(&[0, 9, 0, 9, 0, 9, 0, 9]), 4);
    }
}
