use regex::Regex;
use std::sync::LazyLock;

/// A string made entirely of digits (ASCII or Persian), date/number
/// punctuation, and whitespace. Such values read left-to-right and must
/// never be reordered.
static NUMERIC_OR_DATE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\u{06F0}-\u{06F9},:/\-.\s]+$").unwrap());

/// Same as above but for a single token: no whitespace allowed.
static NUMERIC_OR_DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\u{06F0}-\u{06F9},:/\-.]+$").unwrap());

/// Fix the visual order of a text fragment extracted from a PDF.
///
/// PDF extraction yields glyph runs in visual order, which for RTL scripts
/// is reversed relative to logical reading order. Reversing each word's
/// characters restores logical order within the word, and reversing the
/// word sequence restores the RTL word order. Numeric and date tokens are
/// kept verbatim since digit sequences are stored left-to-right even
/// inside RTL text.
///
/// This is a heuristic approximation, not a full Unicode bidi
/// implementation; callers depend only on this contract so the heuristic
/// can be swapped out later.
pub fn normalize(text: &str) -> String {
    if text.is_empty() || NUMERIC_OR_DATE_RUN.is_match(text) {
        return text.to_string();
    }

    // Plain Latin text needs no reordering.
    if !text.chars().any(is_arabic_script) {
        return text.to_string();
    }

    let mut parts: Vec<String> = text
        .split_whitespace()
        .map(|token| {
            if NUMERIC_OR_DATE_TOKEN.is_match(token) {
                token.to_string()
            } else {
                token.chars().rev().collect()
            }
        })
        .collect();
    parts.reverse();
    parts.join(" ")
}

/// Whether a cell value should be treated as a number or date for
/// presentation purposes (center alignment instead of right alignment).
pub fn is_numeric_like(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && NUMERIC_OR_DATE_TOKEN.is_match(trimmed)
}

/// Arabic/Persian Unicode blocks, including presentation forms.
fn is_arabic_script(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{06FF}' | '\u{FB50}'..='\u{FDFF}' | '\u{FE70}'..='\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_unchanged() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn numeric_values_unchanged() {
        assert_eq!(normalize("1,234"), "1,234");
        assert_eq!(normalize("1402/05/01"), "1402/05/01");
        assert_eq!(normalize("12:30"), "12:30");
        assert_eq!(normalize("3.14"), "3.14");
        // Persian digits
        assert_eq!(normalize("۱۴۰۲/۰۵/۰۱"), "۱۴۰۲/۰۵/۰۱");
        // Numbers separated by whitespace still count as a numeric run
        assert_eq!(normalize("12 34"), "12 34");
    }

    #[test]
    fn latin_text_unchanged() {
        assert_eq!(normalize("Total Amount"), "Total Amount");
        assert_eq!(normalize("N/A"), "N/A");
    }

    #[test]
    fn persian_word_reversed() {
        assert_eq!(normalize("گزارش"), "شرازگ");
    }

    #[test]
    fn persian_words_reverse_chars_and_order() {
        assert_eq!(normalize("گزارش مالی"), "یلام شرازگ");
    }

    #[test]
    fn numeric_token_kept_inside_persian_text() {
        // The date token stays intact while the word is reversed and the
        // token order flips.
        assert_eq!(normalize("گزارش 1402/05/01"), "1402/05/01 شرازگ");
    }

    #[test]
    fn normalize_is_an_involution_on_pure_word_text() {
        let original = "گزارش مالی سالانه";
        assert_eq!(normalize(&normalize(original)), original);
    }

    #[test]
    fn is_numeric_like_classification() {
        assert!(is_numeric_like("1,234"));
        assert!(is_numeric_like(" 1402/05/01 "));
        assert!(is_numeric_like("۱۲۳"));
        assert!(!is_numeric_like(""));
        assert!(!is_numeric_like("   "));
        assert!(!is_numeric_like("گزارش"));
        assert!(!is_numeric_like("12 ریال"));
    }
}
