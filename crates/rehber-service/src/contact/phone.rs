//! Phone number normalization for Turkish numbering.

/// ## Summary
/// Canonicalizes a phone number to E.164 where the Turkish pattern is clear.
///
/// Formatting characters are dropped. A leading `+` keeps only the digits
/// that follow it. Otherwise, on the bare digit string:
///
/// | digits                    | result              |
/// |---------------------------|---------------------|
/// | `90` prefix, 12 digits    | `+` + digits        |
/// | `0` prefix, 11 digits     | `+90` + digits[1..] |
/// | `5` prefix, 10 digits     | `+90` + digits      |
/// | anything else             | input unchanged     |
///
/// Never fails; the empty string maps to itself.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

    if trimmed.starts_with('+') {
        return if digits.is_empty() {
            raw.to_string()
        } else {
            format!("+{digits}")
        };
    }

    match digits.len() {
        12 if digits.starts_with("90") => format!("+{digits}"),
        11 if digits.starts_with('0') => format!("+90{}", &digits[1..]),
        10 if digits.starts_with('5') => format!("+90{digits}"),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_trunk_prefix() {
        assert_eq!(normalize_phone("05321234567"), "+905321234567");
        assert_eq!(normalize_phone("0 (532) 123 45 67"), "+905321234567");
    }

    #[test]
    fn bare_mobile_number() {
        assert_eq!(normalize_phone("532-123-45-67"), "+905321234567");
        assert_eq!(normalize_phone("532 111 22 33"), "+905321112233");
    }

    #[test]
    fn country_code_without_plus() {
        assert_eq!(normalize_phone("905321234567"), "+905321234567");
        assert_eq!(normalize_phone("90 532 123 45 67"), "+905321234567");
    }

    #[test]
    fn international_numbers_keep_their_digits() {
        assert_eq!(normalize_phone("+18042003448"), "+18042003448");
        assert_eq!(normalize_phone("+90 (532) 987-65-43"), "+905329876543");
    }

    #[test]
    fn plus_without_digits_is_unchanged() {
        assert_eq!(normalize_phone("+"), "+");
        assert_eq!(normalize_phone("+ext"), "+ext");
    }

    #[test]
    fn unrecognized_numbers_are_unchanged() {
        assert_eq!(normalize_phone("123456"), "123456");
        assert_eq!(normalize_phone("0212 555 44 3"), "0212 555 44 3");
        assert_eq!(normalize_phone("1234567890"), "1234567890");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone("   "), "");
    }

    #[test]
    fn idempotent_on_normalized_output() {
        for raw in ["05321234567", "532 111 22 33", "+18042003448"] {
            let once = normalize_phone(raw);
            assert_eq!(normalize_phone(&once), once);
        }
    }
}
