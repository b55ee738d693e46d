//! Username (public page slug) rules.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9](?:[a-z0-9_.-]*[a-z0-9])?$").unwrap());

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 30;

/// Slugs that collide with top-level routes or product pages.
const RESERVED_USERNAMES: &[&str] = &[
    "admin",
    "api",
    "dashboard",
    "go",
    "health",
    "help",
    "login",
    "logout",
    "settings",
    "signup",
    "static",
    "support",
];

/// Lowercases and trims a username as entered.
pub fn normalize_username(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

/// Validates an already normalized username.
///
/// # Rules
///
/// - Length: 3-30 characters
/// - Allowed characters: lowercase letters, digits, `_`, `.`, `-`
/// - Must start and end with a letter or digit
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] naming the violated rule.
pub fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(AppError::bad_request(
            "Username must be 3-30 characters",
            json!({ "provided_length": len }),
        ));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(AppError::bad_request(
            "Username can only contain lowercase letters, digits, '_', '.' and '-', \
             and must start and end with a letter or digit",
            json!({ "username": username }),
        ));
    }

    if is_reserved(username) {
        return Err(AppError::bad_request(
            "This username is reserved",
            json!({ "username": username }),
        ));
    }

    Ok(())
}

pub fn is_reserved(username: &str) -> bool {
    RESERVED_USERNAMES.contains(&username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        for name in ["ana", "ana_lima", "shop.ana", "ana-2026", "a1b"] {
            assert!(validate_username(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_length_bounds() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(30)).is_ok());
        assert!(validate_username(&"a".repeat(31)).is_err());
    }

    #[test]
    fn test_invalid_characters() {
        for name in ["Ana", "ana lima", "ana!", "ana/shop", "анна"] {
            assert!(validate_username(name).is_err(), "{name} should be invalid");
        }
    }

    #[test]
    fn test_must_start_and_end_alphanumeric() {
        assert!(validate_username("-ana").is_err());
        assert!(validate_username("ana_").is_err());
        assert!(validate_username(".ana").is_err());
    }

    #[test]
    fn test_reserved_names() {
        assert!(matches!(
            validate_username("api"),
            Err(AppError::Validation { .. })
        ));
        assert!(validate_username("health").is_err());
        assert!(is_reserved("go"));
        assert!(!is_reserved("gogo"));
    }

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  Ana_Lima "), "ana_lima");
    }
}
