//! Builtin Category Definitions
//!
//! Receipt categories compiled into the binary. Keywords are already
//! normalized, so they compare directly against tokenizer output.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SorterError};

/// Builtin categories, in declaration order.
///
/// Order matters: it is the tie-break order when two categories score the same.
pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        name: "makanan",
        keywords: &[
            "mie", "ayam", "nasi", "minum", "air", "kopi", "gula", "coklat", "roti", "snack",
            "teh", "susu", "burger", "kentang", "ikan",
        ],
    },
    BuiltinCategory {
        name: "elektronik",
        keywords: &[
            "charger",
            "kabel",
            "lampu",
            "baterai",
            "hp",
            "listrik",
            "headset",
            "earphone",
            "powerbank",
            "adapter",
        ],
    },
    BuiltinCategory {
        name: "kebutuhan rumah tangga",
        keywords: &[
            "sabun", "detergen", "pel", "sapu", "ember", "gas", "refill", "shampoo", "piring",
            "gelas",
        ],
    },
    BuiltinCategory {
        name: "fashion",
        keywords: &[
            "baju", "celana", "hoodie", "kaos", "sepatu", "sendal", "topi", "jaket",
        ],
    },
    BuiltinCategory {
        name: "kesehatan",
        keywords: &[
            "obat",
            "vitamin",
            "masker",
            "handsanitizer",
            "paracetamol",
            "supplement",
        ],
    },
];

/// Static builtin category
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// Category name (unique identifier)
    pub name: &'static str,
    /// Trigger keywords
    pub keywords: &'static [&'static str],
}

/// Runtime category definition, before validation.
///
/// Built from the builtins or read from a category file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CategoryDef {
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&BuiltinCategory> for CategoryDef {
    fn from(builtin: &BuiltinCategory) -> Self {
        Self::new(builtin.name, builtin.keywords.iter().copied())
    }
}

/// Builtin definitions in declaration order.
pub fn builtin_defs() -> Vec<CategoryDef> {
    BUILTIN_CATEGORIES.iter().map(CategoryDef::from).collect()
}

/// Merge override definitions into a base list.
///
/// - A category with the same name as a base entry replaces its keywords and keeps its position
/// - A new category is appended
/// - A name repeated within `overrides` is a `DuplicateCategory` error
pub fn merge_defs(
    mut base: Vec<CategoryDef>,
    overrides: Vec<CategoryDef>,
) -> Result<Vec<CategoryDef>> {
    let mut seen = HashSet::new();
    for def in overrides {
        let name = def.name.trim().to_string();
        if !seen.insert(name.clone()) {
            return Err(SorterError::DuplicateCategory { name });
        }
        match base.iter_mut().find(|b| b.name.trim() == name) {
            Some(existing) => existing.keywords = def.keywords,
            None => base.push(def),
        }
    }
    Ok(base)
}
