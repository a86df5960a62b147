use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SorterError {
    #[error("Category catalog is empty - at least one category is required")]
    EmptyCatalog,

    #[error("Duplicate category name: {name}")]
    DuplicateCategory { name: String },

    #[error("Category name must not be empty")]
    EmptyCategoryName,

    #[error("Invalid keyword '{keyword}' in category '{category}' - must normalize to a single token")]
    InvalidKeyword { category: String, keyword: String },

    #[error("Failed to parse category file {path}: {message}")]
    CatalogParse { path: PathBuf, message: String },

    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidConfigValue { key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SorterError>;

impl SorterError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::EmptyCatalog
            | Self::DuplicateCategory { .. }
            | Self::EmptyCategoryName
            | Self::InvalidKeyword { .. } => 2,
            Self::CatalogParse { .. } => 3,
            Self::ConfigParse { .. } => 4,
            Self::ConfigKeyNotFound { .. } | Self::InvalidConfigValue { .. } => 5,
            _ => 1,
        }
    }

    /// Whether this error comes from an inconsistent category configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyCatalog
                | Self::DuplicateCategory { .. }
                | Self::EmptyCategoryName
                | Self::InvalidKeyword { .. }
                | Self::CatalogParse { .. }
        )
    }
}
