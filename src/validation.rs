//! Input validation for user-supplied search criteria.
//!
//! Everything here runs before any network I/O: a rejected input never
//! results in a request. The functions are pure (the date check takes
//! "today" as an argument) so the rules can be tested without touching the
//! clock or the network.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

/// Maximum accepted length of a free-text query, in characters.
pub const MAX_QUERY_LEN: usize = 100;

/// Characters allowed in a free-text query: Unicode letters (accented Latin
/// included), digits, whitespace, and basic punctuation.
static ALLOWED_QUERY_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}\s\-.,!?()]+$").unwrap());

/// Validate and normalize a free-text search input.
///
/// Returns the trimmed text on success. Rejects input that is empty after
/// trimming, longer than [`MAX_QUERY_LEN`] characters, or containing
/// characters outside the allowed set.
pub fn validate_query_text(raw: &str) -> Result<String, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    let len = text.chars().count();
    if len > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            len,
            max: MAX_QUERY_LEN,
        });
    }
    if !ALLOWED_QUERY_CHARS.is_match(text) {
        return Err(ValidationError::DisallowedCharacters);
    }
    Ok(text.to_string())
}

/// Validate a search date against `today`.
///
/// Dates strictly after `today` are rejected; today itself is accepted.
pub fn validate_search_date(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if date > today {
        return Err(ValidationError::FutureDate(date));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn accepts_plain_text_and_trims() {
        assert_eq!(validate_query_text("  IBGE  ").unwrap(), "IBGE");
        assert_eq!(validate_query_text("Censo 2022").unwrap(), "Censo 2022");
    }

    #[test]
    fn accepts_accented_letters_and_punctuation() {
        assert_eq!(
            validate_query_text("inflação (IPCA), projeção!").unwrap(),
            "inflação (IPCA), projeção!"
        );
        assert_eq!(validate_query_text("safra 2024-2025?").unwrap(), "safra 2024-2025?");
    }

    #[test]
    fn rejects_empty_after_trim() {
        assert_eq!(validate_query_text(""), Err(ValidationError::Empty));
        assert_eq!(validate_query_text("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_over_length() {
        let just_right = "a".repeat(MAX_QUERY_LEN);
        assert!(validate_query_text(&just_right).is_ok());

        let too_long = "a".repeat(MAX_QUERY_LEN + 1);
        assert_eq!(
            validate_query_text(&too_long),
            Err(ValidationError::TooLong {
                len: MAX_QUERY_LEN + 1,
                max: MAX_QUERY_LEN
            })
        );
    }

    #[test]
    fn length_is_counted_in_characters_not_bytes() {
        // 100 accented characters exceed 100 bytes but must still pass.
        let accented = "ç".repeat(MAX_QUERY_LEN);
        assert!(validate_query_text(&accented).is_ok());
    }

    #[test]
    fn rejects_disallowed_characters() {
        for bad in ["semi;colon", "<script>", "a&b", "path/To", "100%", "\"quoted\""] {
            assert_eq!(
                validate_query_text(bad),
                Err(ValidationError::DisallowedCharacters),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn today_and_past_dates_pass() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
        assert!(validate_search_date(today, today).is_ok());
        assert!(validate_search_date(today - Duration::days(30), today).is_ok());
    }

    #[test]
    fn future_dates_are_rejected() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
        let tomorrow = today + Duration::days(1);
        assert_eq!(
            validate_search_date(tomorrow, today),
            Err(ValidationError::FutureDate(tomorrow))
        );
    }
}
