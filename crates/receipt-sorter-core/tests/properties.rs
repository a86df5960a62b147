use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use receipt_sorter_core::{
    tokenize, BackwardReasoner, CategoryCatalog, CategoryDef, HeuristicClassifier, ReceiptSorter,
    UNKNOWN_CATEGORY,
};

const TEXTS: &[&str] = &[
    "",
    "   !!! ###",
    "Nasi Ayam 2x @ Rp.10000 charger!!",
    "KABEL data 1m, kabel charger, lampu LED",
    "sabun sabun sabun teh",
    "Total: Rp 45.000\nKembali: Rp 5.000",
    "obat-batuk vitamin C masker\tmasker",
    "kaos / topi / sepatu / nasi / kabel",
];

fn catalog() -> Arc<CategoryCatalog> {
    Arc::new(
        CategoryCatalog::new(vec![
            CategoryDef::new("makanan", ["nasi", "ayam", "teh"]),
            CategoryDef::new("elektronik", ["charger", "kabel", "lampu"]),
            CategoryDef::new("rumah", ["sabun", "lampu"]),
            CategoryDef::new("kesehatan", ["obat", "vitamin", "masker"]),
        ])
        .unwrap(),
    )
}

fn multiset(tokens: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for t in tokens {
        *counts.entry(t.as_str()).or_insert(0) += 1;
    }
    counts
}

#[test]
fn scores_cover_every_category() {
    let catalog = catalog();
    let classifier = HeuristicClassifier::new(Arc::clone(&catalog));

    for text in TEXTS {
        let result = classifier.classify(text);
        assert_eq!(result.scores.len(), catalog.len(), "text {:?}", text);
        for name in catalog.names() {
            assert!(result.scores.get(name).is_some(), "{} missing", name);
        }
    }
}

#[test]
fn best_category_holds_the_maximum() {
    let classifier = HeuristicClassifier::new(catalog());

    for text in TEXTS {
        let result = classifier.classify(text);
        if result.best_category == UNKNOWN_CATEGORY {
            assert!(tokenize(text).is_empty());
            continue;
        }
        assert_eq!(result.best_score(), result.scores.max_score(), "text {:?}", text);
    }
}

#[test]
fn empty_input_is_unknown_with_zero_scores() {
    let classifier = HeuristicClassifier::new(catalog());

    for text in ["", "   !!! ###"] {
        let result = classifier.classify(text);
        assert_eq!(result.best_category, UNKNOWN_CATEGORY);
        assert_eq!(result.scores.total(), 0);
    }
}

#[test]
fn appending_a_keyword_only_raises_its_categories() {
    let catalog = catalog();
    let classifier = HeuristicClassifier::new(Arc::clone(&catalog));

    for text in TEXTS {
        let before = classifier.classify(text);
        let after = classifier.classify(&format!("{} lampu", text));

        for category in catalog.iter() {
            let b = before.scores.get(&category.name).unwrap();
            let a = after.scores.get(&category.name).unwrap();
            if category.matches("lampu") {
                assert_eq!(a, b + 1, "{} on {:?}", category.name, text);
            } else {
                assert_eq!(a, b, "{} on {:?}", category.name, text);
            }
        }
    }
}

#[test]
fn explanation_is_a_sub_multiset_of_keywords() {
    let catalog = catalog();
    let reasoner = BackwardReasoner::new(Arc::clone(&catalog));

    for text in TEXTS {
        let tokens = tokenize(text);
        let available = multiset(&tokens);

        for category in catalog.iter() {
            let support = reasoner.explain(text, &category.name);
            for (token, count) in multiset(&support) {
                assert!(category.matches(token));
                assert!(available.get(token).copied().unwrap_or(0) >= count);
            }
        }
    }
}

#[test]
fn positive_score_always_has_support() {
    let sorter = ReceiptSorter::new((*catalog()).clone());

    for text in TEXTS {
        let result = sorter.classify(text);
        let support = sorter.explain(text, &result.best_category);
        if result.best_score() > 0 {
            assert!(!support.is_empty(), "text {:?}", text);
        }
        assert_eq!(support.len(), result.best_score(), "text {:?}", text);
    }
}

#[test]
fn receipt_scenario() {
    let catalog = Arc::new(
        CategoryCatalog::new(vec![
            CategoryDef::new("makanan", ["nasi", "ayam"]),
            CategoryDef::new("elektronik", ["charger", "kabel"]),
        ])
        .unwrap(),
    );
    let text = "Nasi Ayam 2x @ Rp.10000 charger!!";

    assert_eq!(
        tokenize(text),
        vec!["nasi", "ayam", "2x", "rp", "10000", "charger"]
    );

    let result = HeuristicClassifier::new(Arc::clone(&catalog)).classify(text);
    assert_eq!(result.best_category, "makanan");
    assert_eq!(result.scores.get("makanan"), Some(2));
    assert_eq!(result.scores.get("elektronik"), Some(1));

    let reasoner = BackwardReasoner::new(catalog);
    assert_eq!(reasoner.explain(text, "makanan"), vec!["nasi", "ayam"]);
    assert!(reasoner.explain("", UNKNOWN_CATEGORY).is_empty());
}

#[test]
fn shared_catalog_across_threads() {
    let catalog = catalog();
    let classifier = HeuristicClassifier::new(Arc::clone(&catalog));
    let reasoner = BackwardReasoner::new(Arc::clone(&catalog));
    let expected: Vec<_> = TEXTS.iter().map(|t| classifier.classify(t)).collect();

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for (text, want) in TEXTS.iter().zip(&expected) {
                    let got = classifier.classify(text);
                    assert_eq!(&got, want);
                    let support = reasoner.explain(text, &got.best_category);
                    assert_eq!(support.len(), got.best_score());
                }
            });
        }
    });
}
