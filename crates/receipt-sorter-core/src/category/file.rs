//! Category File
//!
//! External catalog in TOML. An array of tables keeps declaration order,
//! which is also the tie-break order:
//!
//! ```toml
//! [[category]]
//! name = "makanan"
//! keywords = ["nasi", "ayam"]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SorterError};

use super::builtin::CategoryDef;

/// Contents of a category file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesFile {
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryDef>,
}

impl CategoriesFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| SorterError::CatalogParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn into_defs(self) -> Vec<CategoryDef> {
        self.categories
    }
}

impl From<Vec<CategoryDef>> for CategoriesFile {
    fn from(categories: Vec<CategoryDef>) -> Self {
        Self { categories }
    }
}
