use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "receipt-sorter")]
#[command(about = "Explainable keyword categorization for receipt text")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.receipt-sorter)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Category file to merge over the builtin categories (overrides catalog.path)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Ignore the builtin categories
    #[arg(long, global = true)]
    pub no_builtin: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Where the text to analyze comes from
#[derive(Args, Debug)]
pub struct TextInput {
    /// Text to analyze (reads stdin when neither TEXT nor --file is given)
    pub text: Option<String>,

    /// Read the text from a file (e.g. saved OCR output)
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify text and show the tokens that justify the result
    Classify {
        #[command(flatten)]
        input: TextInput,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which tokens support a category
    Explain {
        /// Category to explain
        #[arg(short, long, required_unless_present = "all")]
        category: Option<String>,

        #[command(flatten)]
        input: TextInput,

        /// Explain every category
        #[arg(short, long, conflicts_with = "category")]
        all: bool,

        /// Show the tokens and category keywords behind the explanation
        #[arg(short, long, conflicts_with = "all")]
        trace: bool,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how text is normalized into tokens
    Tokenize {
        #[command(flatten)]
        input: TextInput,

        /// Show every normalization step
        #[arg(short, long)]
        trace: bool,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// List the effective categories
    Categories {
        /// Show a single category
        name: Option<String>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., catalog.path)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Value
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Create config file with the default template
    Init,
}
