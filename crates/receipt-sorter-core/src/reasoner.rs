//! Backward Reasoner
//!
//! Works from a conclusion (a category) back to the evidence (the tokens
//! that support it). The text is tokenized again rather than reusing the
//! classifier's work, so any category can be explained on its own, not only
//! the one the classifier picked.

use std::sync::Arc;

use serde::Serialize;

use crate::category::CategoryCatalog;
use crate::tokenizer::{tokenize, Token};

/// Supporting tokens for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub category: String,
    pub supporting_tokens: Vec<Token>,
}

/// Every input of one explanation: the tokens, the keywords looked for, and the hits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasoningTrace {
    pub tokens: Vec<Token>,
    /// Sorted; empty for a category outside the catalog
    pub category_keywords: Vec<Token>,
    pub matched_tokens: Vec<Token>,
}

#[derive(Debug, Clone)]
pub struct BackwardReasoner {
    catalog: Arc<CategoryCatalog>,
}

impl BackwardReasoner {
    pub fn new(catalog: Arc<CategoryCatalog>) -> Self {
        Self { catalog }
    }

    /// Tokens of `raw_text` that are keywords of `category`.
    ///
    /// Order and duplicates follow the text. An unknown category has no
    /// support and yields an empty list.
    pub fn explain(&self, raw_text: &str, category: &str) -> Vec<Token> {
        let Some(keywords) = self.catalog.keywords_of(category) else {
            tracing::debug!(category, "not in catalog, no supporting tokens");
            return Vec::new();
        };

        let support: Vec<Token> = tokenize(raw_text)
            .into_iter()
            .filter(|t| keywords.contains(t))
            .collect();

        tracing::debug!(category, supporting = support.len(), "explained");
        support
    }

    /// Explain `category` and keep the tokens and keywords it was checked against
    pub fn trace(&self, raw_text: &str, category: &str) -> ReasoningTrace {
        let tokens = tokenize(raw_text);
        let category_keywords: Vec<Token> = self
            .catalog
            .keywords_of(category)
            .map(|kws| kws.iter().cloned().collect())
            .unwrap_or_default();
        let matched_tokens = self.explain(raw_text, category);

        ReasoningTrace {
            tokens,
            category_keywords,
            matched_tokens,
        }
    }

    /// Explanations for every catalog category, in catalog order
    pub fn explain_all(&self, raw_text: &str) -> Vec<Explanation> {
        let tokens = tokenize(raw_text);

        self.catalog
            .iter()
            .map(|category| Explanation {
                category: category.name.clone(),
                supporting_tokens: tokens
                    .iter()
                    .filter(|t| category.matches(t))
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}
