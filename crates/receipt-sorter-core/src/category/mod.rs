//! # Category Module
//!
//! Fixed keyword taxonomy used by the classifier and the reasoner.
//!
//! ## Module layout
//!
//! - `builtin`: builtin receipt categories and unvalidated definitions
//! - `catalog`: validated, immutable catalog
//! - `file`: external TOML category file
//!
//! ## Example
//!
//! ```rust
//! use receipt_sorter_core::category::{CategoryCatalog, CategoryDef};
//!
//! let catalog = CategoryCatalog::new(vec![
//!     CategoryDef::new("makanan", ["nasi", "ayam"]),
//!     CategoryDef::new("elektronik", ["charger", "kabel"]),
//! ])
//! .unwrap();
//!
//! assert!(catalog.keywords_of("makanan").unwrap().contains("nasi"));
//! assert!(catalog.keywords_of("fashion").is_none());
//! ```

mod builtin;
mod catalog;
mod file;

// Re-exports
pub use builtin::{builtin_defs, merge_defs, BuiltinCategory, CategoryDef, BUILTIN_CATEGORIES};
pub use catalog::{Category, CategoryCatalog};
pub use file::CategoriesFile;
