//! Forward scoring plus backward justification in one place.

use std::sync::Arc;

use serde::Serialize;

use crate::category::CategoryCatalog;
use crate::classifier::{Classification, HeuristicClassifier};
use crate::reasoner::{BackwardReasoner, Explanation, ReasoningTrace};
use crate::tokenizer::Token;

/// Classification together with the tokens that justify it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    #[serde(flatten)]
    pub classification: Classification,
    pub supporting_tokens: Vec<Token>,
}

/// Classifier and reasoner sharing one catalog
#[derive(Debug, Clone)]
pub struct ReceiptSorter {
    catalog: Arc<CategoryCatalog>,
    classifier: HeuristicClassifier,
    reasoner: BackwardReasoner,
}

impl ReceiptSorter {
    pub fn new(catalog: CategoryCatalog) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            classifier: HeuristicClassifier::new(Arc::clone(&catalog)),
            reasoner: BackwardReasoner::new(Arc::clone(&catalog)),
            catalog,
        }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn classifier(&self) -> &HeuristicClassifier {
        &self.classifier
    }

    pub fn reasoner(&self) -> &BackwardReasoner {
        &self.reasoner
    }

    pub fn classify(&self, raw_text: &str) -> Classification {
        self.classifier.classify(raw_text)
    }

    pub fn explain(&self, raw_text: &str, category: &str) -> Vec<Token> {
        self.reasoner.explain(raw_text, category)
    }

    pub fn explain_trace(&self, raw_text: &str, category: &str) -> ReasoningTrace {
        self.reasoner.trace(raw_text, category)
    }

    pub fn explain_all(&self, raw_text: &str) -> Vec<Explanation> {
        self.reasoner.explain_all(raw_text)
    }

    /// Classify, then explain the chosen category
    pub fn analyze(&self, raw_text: &str) -> Analysis {
        let classification = self.classifier.classify(raw_text);
        let supporting_tokens = self
            .reasoner
            .explain(raw_text, &classification.best_category);

        Analysis {
            classification,
            supporting_tokens,
        }
    }
}
