//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Longest accepted display name, in characters
pub const MAX_DISPLAY_NAME_LEN: usize = 64;

/// Validate a display name and return it trimmed
pub fn validate_display_name(name: &str) -> Result<String, String> {
    let name = name.trim();

    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if name.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(format!(
            "Name must be at most {} characters long",
            MAX_DISPLAY_NAME_LEN
        ));
    }

    Ok(name.to_string())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a profile photo URL produced by the upload step
pub fn validate_photo_url(url: &str) -> Result<(), String> {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = URL_REGEX
        .get_or_init(|| Regex::new(r"^https?://\S+$").expect("Failed to compile URL regex"));

    if !regex.is_match(url) {
        return Err("Photo URL must be an http(s) URL".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(validate_display_name("  Ada  "), Ok("Ada".to_string()));
        assert!(validate_display_name("   ").is_err());
        assert!(validate_display_name(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_photo_url() {
        assert!(validate_photo_url("https://cdn.example.com/u1.png").is_ok());
        assert!(validate_photo_url("ftp://example.com/a.png").is_err());
        assert!(validate_photo_url("https://bad url").is_err());
    }
}
