pub mod category;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod reasoner;
pub mod tokenizer;

pub use category::{
    builtin_defs, merge_defs, BuiltinCategory, CategoriesFile, Category, CategoryCatalog,
    CategoryDef, BUILTIN_CATEGORIES,
};
pub use classifier::{
    CategoryScore, Classification, ClassificationTrace, HeuristicClassifier, ScoreTable,
    UNKNOWN_CATEGORY,
};
pub use config::Config;
pub use engine::{Analysis, ReceiptSorter};
pub use error::{Result, SorterError};
pub use reasoner::{BackwardReasoner, Explanation, ReasoningTrace};
pub use tokenizer::{
    normalize_keyword, tokenize, trace_tokenize, NormalizedKeyword, Token, TokenizeTrace,
};
