use crate::utils::error::{GiftError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static GIFT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").unwrap());

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GiftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" | "file" => Ok(()),
            scheme => Err(GiftError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GiftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GiftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GiftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GiftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(GiftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Gift ids double as storage key suffixes and sticker ids.
pub fn validate_gift_id(id: &str) -> Result<()> {
    if !GIFT_ID_PATTERN.is_match(id) {
        return Err(GiftError::InvalidDefinition {
            id: id.to_string(),
            reason: "id must be lowercase ascii letters, digits and dashes".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("assets.base_url", "https://example.com/tgs/").is_ok());
        assert!(validate_url("assets.base_url", "file:///srv/tgs/").is_ok());
        assert!(validate_url("assets.base_url", "").is_err());
        assert!(validate_url("assets.base_url", "invalid-url").is_err());
        assert!(validate_url("assets.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_gift_id() {
        assert!(validate_gift_id("gift-sweets").is_ok());
        assert!(validate_gift_id("g2").is_ok());
        assert!(validate_gift_id("").is_err());
        assert!(validate_gift_id("-leading").is_err());
        assert!(validate_gift_id("Gift Sweets").is_err());
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("storage.backend", "file", &["file", "memory"]).is_ok());
        assert!(validate_one_of("storage.backend", "redis", &["file", "memory"]).is_err());
    }
}
