//! Text normalization
//!
//! OCR output is noisy: mixed case, stray symbols, ragged whitespace.
//! Everything downstream compares plain lowercase alphanumeric words, so
//! raw text goes through the same four steps every time:
//!
//! 1. lowercase the whole string
//! 2. replace anything that is not `a-z`, `0-9` or whitespace with a space
//! 3. collapse whitespace runs and trim
//! 4. split on spaces, dropping empty pieces

use serde::Serialize;

/// A normalized word: lowercase, alphanumeric, never empty.
pub type Token = String;

/// Normalize raw text into tokens.
pub fn tokenize(raw_text: &str) -> Vec<Token> {
    strip_symbols(&raw_text.to_lowercase())
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Outcome of normalizing one catalog keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedKeyword {
    /// Nothing survived normalization.
    Empty,
    Single(Token),
    /// The keyword falls apart into several tokens and can never match one.
    Split(Vec<Token>),
}

/// Normalize a single catalog keyword with the tokenizer rules.
pub fn normalize_keyword(raw: &str) -> NormalizedKeyword {
    let mut tokens = tokenize(raw);
    match tokens.len() {
        0 => NormalizedKeyword::Empty,
        1 => NormalizedKeyword::Single(tokens.remove(0)),
        _ => NormalizedKeyword::Split(tokens),
    }
}

/// Every intermediate stage of [`tokenize`], for inspecting messy input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenizeTrace {
    pub lowercase: String,
    pub remove_symbols: String,
    pub normalize_space: String,
    pub tokens: Vec<Token>,
}

pub fn trace_tokenize(raw_text: &str) -> TokenizeTrace {
    let lowercase = raw_text.to_lowercase();
    let remove_symbols = strip_symbols(&lowercase);
    let normalize_space = remove_symbols.split_whitespace().collect::<Vec<_>>().join(" ");
    let tokens = normalize_space
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    TokenizeTrace {
        lowercase,
        remove_symbols,
        normalize_space,
        tokens,
    }
}

fn strip_symbols(lowercase: &str) -> String {
    lowercase
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_receipt_line() {
        let tokens = tokenize("Nasi Ayam 2x @ Rp.10000 charger!!");
        assert_eq!(tokens, vec!["nasi", "ayam", "2x", "rp", "10000", "charger"]);
    }

    #[test]
    fn test_tokenize_empty_and_noise() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   !!! ###").is_empty());
        assert!(tokenize("\t\n  ").is_empty());
    }

    #[test]
    fn test_tokenize_whitespace_runs() {
        let tokens = tokenize("  kopi\t\tsusu \n\n roti  ");
        assert_eq!(tokens, vec!["kopi", "susu", "roti"]);
    }

    #[test]
    fn test_tokenize_non_ascii_letters_become_separators() {
        // accented letters are not in a-z after lowercasing
        let tokens = tokenize("Café-Latte");
        assert_eq!(tokens, vec!["caf", "latte"]);
    }

    #[test]
    fn test_tokenize_idempotent() {
        let raw = "Sabun*Detergen,, GAS-refill 3kg";
        let first = tokenize(raw);
        assert_eq!(first, tokenize(raw));
        assert_eq!(tokenize(&first.join(" ")), first);
    }

    #[test]
    fn test_normalize_keyword() {
        assert_eq!(
            normalize_keyword(" Kopi "),
            NormalizedKeyword::Single("kopi".to_string())
        );
        assert_eq!(normalize_keyword("!!"), NormalizedKeyword::Empty);
        assert_eq!(
            normalize_keyword("hand-sanitizer"),
            NormalizedKeyword::Split(vec!["hand".to_string(), "sanitizer".to_string()])
        );
    }

    #[test]
    fn test_trace_stages() {
        let trace = trace_tokenize("Teh  MANIS!");
        assert_eq!(trace.lowercase, "teh  manis!");
        assert_eq!(trace.remove_symbols, "teh  manis ");
        assert_eq!(trace.normalize_space, "teh manis");
        assert_eq!(trace.tokens, vec!["teh", "manis"]);
    }

    #[test]
    fn test_trace_tokens_match_tokenize() {
        for raw in ["", "   ", "A-B-C", "Rp. 5.000,-"] {
            assert_eq!(trace_tokenize(raw).tokens, tokenize(raw), "input {:?}", raw);
        }
    }
}
