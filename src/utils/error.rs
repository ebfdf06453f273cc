use thiserror::Error;

/// Failures at the key-value store boundary.
///
/// These never leave the availability layer: every variant is logged and
/// replaced by the documented fallback value.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt value for key '{key}': {value:?}")]
    Corrupt { key: String, value: String },

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Error, Debug)]
pub enum GiftError {
    #[error("Unknown gift definition '{id}'")]
    DefinitionNotFound { id: String },

    #[error("Unknown gift level {level} for '{definition_id}'")]
    LevelNotFound { definition_id: String, level: u32 },

    #[error("Gift '{id}' is sold out")]
    SoldOut { id: String },

    #[error("Gift '{id}' is already at its maximum level {level}")]
    MaxLevelReached { id: String, level: u32 },

    #[error("Invalid gift definition '{id}': {reason}")]
    InvalidDefinition { id: String, reason: String },

    #[error("Cannot resolve asset '{name}': {reason}")]
    Asset { name: String, reason: String },

    #[error("Configuration validation error in field '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The request cannot be served, but nothing is broken.
    Medium,
    /// Bad input or configuration.
    High,
    /// Catalog invariant violated; a bug rather than a user mistake.
    Critical,
}

impl GiftError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GiftError::SoldOut { .. } | GiftError::MaxLevelReached { .. } => ErrorSeverity::Medium,
            GiftError::DefinitionNotFound { .. }
            | GiftError::LevelNotFound { .. }
            | GiftError::InvalidDefinition { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GiftError::DefinitionNotFound { id } => format!("There is no gift called '{}'", id),
            GiftError::LevelNotFound {
                definition_id,
                level,
            } => format!("Gift '{}' has no level {}", definition_id, level),
            GiftError::SoldOut { id } => format!("Gift '{}' is sold out", id),
            GiftError::MaxLevelReached { id, .. } => {
                format!("Gift '{}' cannot be upgraded any further", id)
            }
            GiftError::ConfigValidationError { field, .. }
            | GiftError::InvalidConfigValueError { field, .. } => {
                format!("Configuration problem in '{}': {}", field, self)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GiftError::DefinitionNotFound { .. } => "Run `gift-catalog list` to see the known gift ids",
            GiftError::LevelNotFound { .. } => "Use a level between 1 and the gift's maximum level",
            GiftError::SoldOut { .. } => "Pick another gift; limited gifts are not restocked",
            GiftError::MaxLevelReached { .. } => "The gift is fully upgraded",
            GiftError::ConfigValidationError { .. } | GiftError::InvalidConfigValueError { .. } => {
                "Check the configuration file and command line flags"
            }
            GiftError::Asset { .. } => "Check [assets] base_url and overrides in the configuration",
            GiftError::IoError(_) | GiftError::Storage(_) => {
                "Check that the storage path exists and is writable"
            }
            _ => "Re-run with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, GiftError>;
