//! Category Catalog
//!
//! Validated, read-only set of categories. Built once at startup and then
//! shared (usually behind an `Arc`) by the classifier and the reasoner.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::error::{Result, SorterError};
use crate::tokenizer::{normalize_keyword, NormalizedKeyword, Token};

use super::builtin::{builtin_defs, CategoryDef};

/// A named classification bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub keywords: BTreeSet<Token>,
}

impl Category {
    /// Whether `token` triggers this category
    pub fn matches(&self, token: &str) -> bool {
        self.keywords.contains(token)
    }
}

/// Immutable category catalog in declaration order
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

impl CategoryCatalog {
    /// Validate definitions into a catalog.
    ///
    /// Names are trimmed and must be unique and non-empty. Keywords are
    /// normalized with the tokenizer rules: keywords that normalize to nothing
    /// are dropped, keywords that split into several tokens are rejected.
    pub fn new(defs: Vec<CategoryDef>) -> Result<Self> {
        if defs.is_empty() {
            return Err(SorterError::EmptyCatalog);
        }

        let mut categories = Vec::with_capacity(defs.len());
        let mut index = HashMap::with_capacity(defs.len());

        for def in defs {
            let name = def.name.trim().to_string();
            if name.is_empty() {
                return Err(SorterError::EmptyCategoryName);
            }
            if index.contains_key(&name) {
                return Err(SorterError::DuplicateCategory { name });
            }

            let mut keywords = BTreeSet::new();
            for raw in &def.keywords {
                match normalize_keyword(raw) {
                    NormalizedKeyword::Single(token) => {
                        keywords.insert(token);
                    }
                    NormalizedKeyword::Empty => {
                        tracing::warn!(category = %name, keyword = %raw, "dropping keyword with no alphanumeric content");
                    }
                    NormalizedKeyword::Split(_) => {
                        return Err(SorterError::InvalidKeyword {
                            category: name,
                            keyword: raw.clone(),
                        });
                    }
                }
            }

            if keywords.is_empty() {
                tracing::warn!(category = %name, "category has no keywords and will always score 0");
            }

            index.insert(name.clone(), categories.len());
            categories.push(Category { name, keywords });
        }

        tracing::debug!(categories = categories.len(), "category catalog built");
        Ok(Self { categories, index })
    }

    /// Catalog of the builtin categories only
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_defs())
    }

    /// Keyword set of a category, if it exists
    pub fn keywords_of(&self, name: &str) -> Option<&BTreeSet<Token>> {
        self.get(name).map(|c| &c.keywords)
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.index.get(name).map(|&i| &self.categories[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Categories in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Category names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always `false` for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Back to plain definitions, e.g. for writing a category file
    pub fn to_defs(&self) -> Vec<CategoryDef> {
        self.categories
            .iter()
            .map(|c| CategoryDef::new(c.name.clone(), c.keywords.iter().cloned()))
            .collect()
    }
}
