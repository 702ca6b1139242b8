mod types;

pub use types::*;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

// Characters rejected by at least one mainstream file system
static FORBIDDEN_CHARS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

static CONTROL_CHARS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x00-\x1F\x7F]").unwrap());

// Windows device names, reserved regardless of case
static RESERVED_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:CON|PRN|AUX|NUL|COM[1-9]|LPT[1-9])$").unwrap());

/// Check a naming pattern against every rule, collecting all violations.
///
/// An empty pattern short-circuits since no other rule means anything for it.
pub fn validate_pattern(pattern: &str) -> PatternValidation {
    let mut errors = Vec::new();

    if pattern.trim().is_empty() {
        errors.push("Pattern cannot be empty".to_string());
        return PatternValidation { errors };
    }

    let placeholders = pattern.matches(PLACEHOLDER).count();
    if placeholders != 1 {
        errors.push(format!(
            "Pattern must contain exactly one {} placeholder (found {})",
            PLACEHOLDER, placeholders
        ));
    }

    let mut invalid: Vec<&str> = Vec::new();
    for m in FORBIDDEN_CHARS_REGEX.find_iter(pattern) {
        if !invalid.contains(&m.as_str()) {
            invalid.push(m.as_str());
        }
    }
    if !invalid.is_empty() {
        errors.push(format!(
            "Pattern contains invalid characters: {}",
            invalid.join(" ")
        ));
    }

    if CONTROL_CHARS_REGEX.is_match(pattern) {
        errors.push("Pattern contains control characters".to_string());
    }

    let length = pattern.chars().count();
    if length > MAX_PATTERN_LENGTH {
        errors.push(format!(
            "Pattern must be at most {} characters (found {})",
            MAX_PATTERN_LENGTH, length
        ));
    }

    if pattern.starts_with('.') {
        errors.push("Pattern cannot start with a dot".to_string());
    }

    if pattern.ends_with('.') {
        errors.push("Pattern cannot end with a dot".to_string());
    }

    let literal = pattern.replace(PLACEHOLDER, "");
    if RESERVED_NAME_REGEX.is_match(&literal) {
        errors.push(format!(
            "Pattern resolves to the reserved system name '{}'",
            literal
        ));
    }

    debug!(pattern = %pattern, errors = errors.len(), "Validated pattern");

    PatternValidation { errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_patterns() {
        for pattern in ["file_{number}", "{number}", "Holiday 2026 - {number}", "img.{number}.raw"] {
            let result = validate_pattern(pattern);
            assert!(result.is_valid(), "{} should be valid: {:?}", pattern, result.errors);
        }
    }

    #[test]
    fn test_empty_pattern_short_circuits() {
        let result = validate_pattern("   ");

        assert!(!result.is_valid());
        assert_eq!(result.errors, vec!["Pattern cannot be empty".to_string()]);
    }

    #[test]
    fn test_invalid_characters() {
        let result = validate_pattern("bad/name{number}");

        assert!(!result.is_valid());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("invalid characters"));
        assert!(result.errors[0].contains('/'));
    }

    #[test]
    fn test_invalid_characters_listed_once_in_order() {
        let result = validate_pattern("a/b:c/{number}");

        assert_eq!(
            result.errors,
            vec!["Pattern contains invalid characters: / :".to_string()]
        );
    }

    #[test]
    fn test_two_placeholders() {
        let result = validate_pattern("{number}_{number}");

        assert!(!result.is_valid());
        assert!(result.errors[0].contains("exactly one"));
        assert!(result.errors[0].contains("found 2"));
    }

    #[test]
    fn test_missing_placeholder() {
        let result = validate_pattern("photo");

        assert!(!result.is_valid());
        assert!(result.errors[0].contains("exactly one"));
    }

    #[test]
    fn test_control_characters() {
        let result = validate_pattern("file\t{number}");

        assert_eq!(result.errors, vec!["Pattern contains control characters".to_string()]);
    }

    #[test]
    fn test_too_long() {
        let pattern = format!("{}{}", "a".repeat(200), PLACEHOLDER);
        let result = validate_pattern(&pattern);

        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("at most 200"));
    }

    #[test]
    fn test_leading_and_trailing_dots() {
        let result = validate_pattern(".file_{number}.");

        assert_eq!(result.errors.len(), 2);
        assert!(result.errors[0].contains("start with a dot"));
        assert!(result.errors[1].contains("end with a dot"));
    }

    #[test]
    fn test_reserved_names() {
        for pattern in ["CON{number}", "{number}nul", "com3{number}", "{number}LPT9"] {
            let result = validate_pattern(pattern);
            assert!(!result.is_valid(), "{} should be rejected", pattern);
            assert!(result.errors[0].contains("reserved"));
        }

        assert!(validate_pattern("CONSOLE_{number}").is_valid());
        assert!(validate_pattern("COM0{number}").is_valid());
    }

    #[test]
    fn test_accumulates_all_errors() {
        let result = validate_pattern(".a<b>|photo.");

        // placeholder, invalid characters, leading dot, trailing dot
        assert_eq!(result.errors.len(), 4);
        assert!(result.errors[1].contains("< > |"));
    }
}
