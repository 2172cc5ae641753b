//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// E.164-style number: optional '+', no leading zero, 8 to 15 digits in total
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{7,14}$").expect("phone regex is valid"));

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is acceptable as an OTP identifier
///
/// Spaces, dashes, dots and parentheses are ignored; letters are not.
pub fn is_valid_phone(phone: &str) -> bool {
    let stripped_ok = phone
        .trim()
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '.' | '(' | ')'));
    stripped_ok && PHONE_REGEX.is_match(&normalize_phone_number(phone))
}

/// Mask a phone number for logs, keeping the last four digits (e.g. `***5678`)
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}
