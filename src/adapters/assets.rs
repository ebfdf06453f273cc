use crate::utils::error::{GiftError, Result};
use std::collections::HashMap;
use url::Url;

pub const DEFAULT_ASSET_BASE_URL: &str = "https://assets.gift-catalog.local/tgs/";
pub const ASSET_EXTENSION: &str = "tgs";

/// Maps symbolic animated-asset names to URLs.
///
/// Explicit overrides win; otherwise the name is joined onto the base URL as
/// `<name>.tgs`. Nothing is fetched or checked for existence.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    base_url: Url,
    overrides: HashMap<String, Url>,
}

impl AssetResolver {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| GiftError::Asset {
            name: base_url.to_string(),
            reason: format!("invalid base URL: {}", e),
        })?;
        // Url::join drops the last path segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            overrides: HashMap::new(),
        })
    }

    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Result<Self> {
        for (name, url) in overrides {
            let parsed = Url::parse(url).map_err(|e| GiftError::Asset {
                name: name.clone(),
                reason: format!("invalid override URL '{}': {}", url, e),
            })?;
            self.overrides.insert(name.clone(), parsed);
        }
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn resolve(&self, name: &str) -> Result<Url> {
        if let Some(url) = self.overrides.get(name) {
            return Ok(url.clone());
        }

        if name.is_empty() || name.contains(['/', '\\', '?', '#']) {
            return Err(GiftError::Asset {
                name: name.to_string(),
                reason: "asset names must be a single path segment".to_string(),
            });
        }

        self.base_url
            .join(&format!("{}.{}", name, ASSET_EXTENSION))
            .map_err(|e| GiftError::Asset {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_ASSET_BASE_URL).unwrap(),
            overrides: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_against_base() {
        let resolver = AssetResolver::new("https://cdn.example.org/animations").unwrap();
        assert_eq!(
            resolver.resolve("Rose").unwrap().as_str(),
            "https://cdn.example.org/animations/Rose.tgs"
        );
    }

    #[test]
    fn test_override_wins() {
        let overrides = HashMap::from([(
            "Rose".to_string(),
            "https://other.example.org/rose-v2.tgs".to_string(),
        )]);
        let resolver = AssetResolver::new("https://cdn.example.org/")
            .unwrap()
            .with_overrides(&overrides)
            .unwrap();

        assert_eq!(
            resolver.resolve("Rose").unwrap().as_str(),
            "https://other.example.org/rose-v2.tgs"
        );
        assert_eq!(
            resolver.resolve("Cake").unwrap().as_str(),
            "https://cdn.example.org/Cake.tgs"
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(AssetResolver::new("not a url").is_err());
        let resolver = AssetResolver::default();
        assert!(resolver.resolve("").is_err());
        assert!(resolver.resolve("../etc/passwd").is_err());

        let bad_override = HashMap::from([("Rose".to_string(), "nope".to_string())]);
        assert!(AssetResolver::default().with_overrides(&bad_override).is_err());
    }
}
