use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::{builtin_defs, merge_defs, CategoriesFile, CategoryCatalog};
use crate::error::{Result, SorterError};

const CONFIG_FILE: &str = "config.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# receipt-sorter configuration file
# Location: ~/.receipt-sorter/config.toml

[catalog]
# Start from the builtin categories
# (makanan, elektronik, kebutuhan rumah tangga, fashion, kesehatan)
# Default: true
builtin = true

# Extra category file, merged over the builtin categories.
# Same-named categories replace the builtin keywords, new ones are appended.
# Relative paths are resolved against this directory.
# Example: path = "categories.toml"
#
# [[category]]
# name = "hobi"
# keywords = ["gitar", "kuas", "benang"]
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Catalog-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Include builtin categories
    #[serde(default = "default_builtin")]
    pub builtin: bool,

    /// External category file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_builtin() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            builtin: default_builtin(),
            path: None,
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| SorterError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "catalog.builtin" => Some(self.catalog.builtin.to_string()),
            "catalog.path" => Some(
                self.catalog
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "catalog.builtin" => {
                self.catalog.builtin = parse_bool(key, value)?;
                Ok(())
            }
            "catalog.path" => {
                let trimmed = value.trim();
                self.catalog.path = if trimmed.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
                Ok(())
            }
            _ => Err(SorterError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        ["catalog.builtin", "catalog.path"]
            .iter()
            .map(|k| (k.to_string(), self.get(k).unwrap_or_default()))
            .collect()
    }

    /// Category file path, resolved against the base directory
    pub fn catalog_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.catalog.path.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                base_dir.join(p)
            }
        })
    }

    /// Build the effective catalog: builtins (if enabled) merged with the category file
    pub fn build_catalog(&self, base_dir: &Path) -> Result<CategoryCatalog> {
        let base = if self.catalog.builtin {
            builtin_defs()
        } else {
            Vec::new()
        };

        let defs = match self.catalog_path(base_dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading category file");
                merge_defs(base, CategoriesFile::load(&path)?.into_defs())?
            }
            None => base,
        };

        CategoryCatalog::new(defs)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(SorterError::InvalidConfigValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
