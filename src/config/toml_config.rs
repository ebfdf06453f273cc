use crate::adapters::assets::DEFAULT_ASSET_BASE_URL;
use crate::core::availability::DEFAULT_KEY_PREFIX;
use crate::core::service::STORAGE_BACKENDS;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{GiftError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

pub const DEFAULT_STORE_PATH: &str = "./gift-availability.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub storage: StorageConfig,
    pub assets: AssetConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: String,
    pub path: String,
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            path: DEFAULT_STORE_PATH.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub base_url: String,
    pub overrides: HashMap<String, String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            overrides: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GiftError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GiftError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Output format for the logger; an unknown name is a config error.
    pub fn log_format(&self) -> Result<LogFormat> {
        match self.logging.format.as_deref() {
            None => Ok(LogFormat::default()),
            Some(format) => format
                .parse()
                .map_err(|reason| GiftError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason,
                }),
        }
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn storage_backend(&self) -> &str {
        &self.storage.backend
    }

    fn storage_path(&self) -> &str {
        &self.storage.path
    }

    fn key_prefix(&self) -> &str {
        &self.storage.key_prefix
    }

    fn asset_base_url(&self) -> &str {
        &self.assets.base_url
    }

    fn asset_overrides(&self) -> &HashMap<String, String> {
        &self.assets.overrides
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_one_of("storage.backend", &self.storage.backend, &STORAGE_BACKENDS)?;
        if self.storage.backend == "file" {
            validate_path("storage.path", &self.storage.path)?;
        }
        validate_non_empty_string("storage.key_prefix", &self.storage.key_prefix)?;
        validate_url("assets.base_url", &self.assets.base_url)?;
        for (name, url) in &self.assets.overrides {
            validate_url(&format!("assets.overrides.{}", name), url)?;
        }
        self.log_format()?;
        Ok(())
    }
}
