//! Heuristic Classifier
//!
//! Greedy best-first search over a one-level search space whose nodes are
//! the catalog categories. The heuristic of a node is
//!
//! ```text
//! h(category) = number of input tokens that are keywords of category
//! ```
//!
//! counted per occurrence, so a repeated keyword adds to the score each time.
//! The node with the highest `h` wins; ties go to the category declared first.

use std::sync::Arc;

use serde::Serialize;

use crate::category::CategoryCatalog;
use crate::tokenizer::{tokenize, Token};

/// Sentinel category returned when the input has no tokens at all
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Score of a single category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: usize,
}

/// Scores of every catalog category, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreTable {
    entries: Vec<CategoryScore>,
}

impl ScoreTable {
    pub fn get(&self, category: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryScore> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all scores
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.score).sum()
    }

    /// Highest score in the table, 0 when empty
    pub fn max_score(&self) -> usize {
        self.entries.iter().map(|e| e.score).max().unwrap_or(0)
    }

    /// First entry holding the maximum score
    fn first_max(&self) -> Option<&CategoryScore> {
        // max_by_key keeps the last maximum, so compare in reverse order
        self.entries.iter().rev().max_by_key(|e| e.score)
    }
}

/// Classification result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub best_category: String,
    pub scores: ScoreTable,
    /// Set only when no category could be chosen
    #[serde(skip)]
    fallback: bool,
}

impl Classification {
    /// Whether the input had no tokens and fell back to [`UNKNOWN_CATEGORY`]
    pub fn is_unknown(&self) -> bool {
        self.fallback
    }

    /// Score of the chosen category
    pub fn best_score(&self) -> usize {
        self.scores.get(&self.best_category).unwrap_or(0)
    }
}

/// Full view of one classification, tokens included
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationTrace {
    pub tokens: Vec<Token>,
    pub scores: ScoreTable,
    pub best_category: String,
}

/// Keyword heuristic classifier
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    catalog: Arc<CategoryCatalog>,
}

impl HeuristicClassifier {
    pub fn new(catalog: Arc<CategoryCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Classify raw text into its best category
    pub fn classify(&self, raw_text: &str) -> Classification {
        let tokens = tokenize(raw_text);
        self.classify_tokens(&tokens)
    }

    /// Classify and keep the intermediate tokens
    pub fn trace(&self, raw_text: &str) -> ClassificationTrace {
        let tokens = tokenize(raw_text);
        let Classification {
            best_category,
            scores,
            ..
        } = self.classify_tokens(&tokens);

        ClassificationTrace {
            tokens,
            scores,
            best_category,
        }
    }

    fn classify_tokens(&self, tokens: &[Token]) -> Classification {
        let scores = self.score(tokens);

        // a constructed catalog is never empty, so only empty input falls back
        let best = if tokens.is_empty() {
            None
        } else {
            scores.first_max().map(|e| e.category.clone())
        };

        let Some(best_category) = best else {
            tracing::debug!("no tokens in input, falling back to {}", UNKNOWN_CATEGORY);
            return Classification {
                best_category: UNKNOWN_CATEGORY.to_string(),
                scores,
                fallback: true,
            };
        };

        tracing::debug!(
            tokens = tokens.len(),
            best = %best_category,
            score = scores.max_score(),
            "classified"
        );

        Classification {
            best_category,
            scores,
            fallback: false,
        }
    }

    fn score(&self, tokens: &[Token]) -> ScoreTable {
        let entries = self
            .catalog
            .iter()
            .map(|category| CategoryScore {
                category: category.name.clone(),
                score: tokens.iter().filter(|t| category.matches(t)).count(),
            })
            .collect();

        ScoreTable { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryDef;

    fn classifier(defs: Vec<CategoryDef>) -> HeuristicClassifier {
        HeuristicClassifier::new(Arc::new(CategoryCatalog::new(defs).unwrap()))
    }

    fn sample() -> HeuristicClassifier {
        classifier(vec![
            CategoryDef::new("makanan", ["nasi", "ayam"]),
            CategoryDef::new("elektronik", ["charger", "kabel"]),
        ])
    }

    #[test]
    fn test_classify_receipt() {
        let result = sample().classify("Nasi Ayam 2x @ Rp.10000 charger!!");
        assert_eq!(result.best_category, "makanan");
        assert_eq!(result.scores.get("makanan"), Some(2));
        assert_eq!(result.scores.get("elektronik"), Some(1));
        assert_eq!(result.best_score(), 2);
    }

    #[test]
    fn test_empty_input_is_unknown() {
        for raw in ["", "   !!! ###"] {
            let result = sample().classify(raw);
            assert_eq!(result.best_category, UNKNOWN_CATEGORY);
            assert!(result.is_unknown());
            assert_eq!(result.scores.len(), 2);
            assert!(result.scores.iter().all(|e| e.score == 0));
        }
    }

    #[test]
    fn test_repeated_keywords_count_per_occurrence() {
        let result = sample().classify("kabel kabel kabel nasi");
        assert_eq!(result.scores.get("elektronik"), Some(3));
        assert_eq!(result.best_category, "elektronik");
    }

    #[test]
    fn test_zero_scores_are_kept() {
        let result = sample().classify("sepatu baru");
        assert_eq!(result.scores.len(), 2);
        assert_eq!(result.scores.get("makanan"), Some(0));
        assert_eq!(result.scores.get("elektronik"), Some(0));
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        let result = sample().classify("kabel nasi");
        assert_eq!(result.best_category, "makanan");

        let reversed = classifier(vec![
            CategoryDef::new("elektronik", ["charger", "kabel"]),
            CategoryDef::new("makanan", ["nasi", "ayam"]),
        ]);
        assert_eq!(reversed.classify("kabel nasi").best_category, "elektronik");
    }

    #[test]
    fn test_no_match_picks_first_category() {
        // tokens exist but nothing matches: every score is 0, first declared wins
        let result = sample().classify("sepatu");
        assert_eq!(result.best_category, "makanan");
        assert!(!result.is_unknown());
    }

    #[test]
    fn test_category_named_unknown_is_a_real_result() {
        let classifier = classifier(vec![
            CategoryDef::new("unknown", ["misteri"]),
            CategoryDef::new("makanan", ["nasi"]),
        ]);

        let result = classifier.classify("sepatu");
        assert_eq!(result.best_category, UNKNOWN_CATEGORY);
        assert_eq!(result.scores.get("unknown"), Some(0));
        assert!(!result.is_unknown());

        assert!(classifier.classify("!!!").is_unknown());
    }

    #[test]
    fn test_scores_follow_catalog_order() {
        let result = sample().classify("charger");
        let names: Vec<_> = result.scores.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(names, vec!["makanan", "elektronik"]);
    }

    #[test]
    fn test_trace_includes_tokens() {
        let trace = sample().trace("Kopi, Charger");
        assert_eq!(trace.tokens, vec!["kopi", "charger"]);
        assert_eq!(trace.best_category, "elektronik");
        assert_eq!(trace.scores.get("elektronik"), Some(1));
    }

    #[test]
    fn test_builtin_catalog_classification() {
        let classifier = HeuristicClassifier::new(Arc::new(CategoryCatalog::builtin().unwrap()));
        let result = classifier.classify("INDOMARET\nSabun Mandi 2\nDetergen 1kg\nTeh Botol");
        assert_eq!(result.best_category, "kebutuhan rumah tangga");
        assert_eq!(result.scores.get("kebutuhan rumah tangga"), Some(2));
        assert_eq!(result.scores.get("makanan"), Some(1));
    }

    #[test]
    fn test_score_table_serializes_in_order() {
        let result = sample().classify("nasi");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["best_category"], "makanan");
        assert_eq!(json["scores"][0]["category"], "makanan");
        assert_eq!(json["scores"][0]["score"], 1);
        assert_eq!(json["scores"][1]["category"], "elektronik");
    }
}
