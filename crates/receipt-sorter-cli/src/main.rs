use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use receipt_sorter_core::config::Config;
use receipt_sorter_core::{
    trace_tokenize, Analysis, Category, CategoryCatalog, Explanation, ReceiptSorter, Result,
    SorterError, UNKNOWN_CATEGORY,
};

mod args;
use args::{Cli, Commands, ConfigAction, Shell, TextInput};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir.clone());
    let catalog_opts = CatalogOptions {
        file: cli.catalog.clone(),
        no_builtin: cli.no_builtin,
    };

    let result = match cli.command {
        Some(Commands::Classify { input, json }) => {
            handle_classify(&base_dir, &catalog_opts, &input, json)
        }
        Some(Commands::Explain {
            category,
            input,
            all,
            trace,
            json,
        }) => match category.as_deref() {
            Some(name) if trace => handle_explain_trace(&base_dir, &catalog_opts, name, &input, json),
            category => handle_explain(&base_dir, &catalog_opts, category, all, &input, json),
        },
        Some(Commands::Tokenize { input, trace, json }) => handle_tokenize(&input, trace, json),
        Some(Commands::Categories { name, json }) => {
            handle_categories(&base_dir, &catalog_opts, name.as_deref(), json)
        }
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Logging goes to stderr so JSON on stdout stays clean.
/// `RUST_LOG` wins over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "receipt_sorter_core={lvl},receipt_sorter={lvl}",
            lvl = default_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "receipt-sorter", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("RECEIPT_SORTER_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".receipt-sorter"))
        .unwrap_or_else(|| PathBuf::from(".receipt-sorter"))
}

/// Catalog overrides from the command line
struct CatalogOptions {
    file: Option<PathBuf>,
    no_builtin: bool,
}

/// Build the catalog once, before any text is looked at
fn load_sorter(base_dir: &Path, opts: &CatalogOptions) -> Result<ReceiptSorter> {
    let mut config = Config::load(base_dir)?;
    if let Some(file) = &opts.file {
        // relative to the working directory, not the base dir
        let file = if file.is_absolute() {
            file.clone()
        } else {
            std::env::current_dir()?.join(file)
        };
        config.catalog.path = Some(file);
    }
    if opts.no_builtin {
        config.catalog.builtin = false;
    }

    let catalog = config.build_catalog(base_dir)?;
    tracing::debug!(categories = ?catalog.names(), "catalog ready");
    Ok(ReceiptSorter::new(catalog))
}

fn read_input(input: &TextInput) -> Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }

    if let Some(path) = &input.file {
        return Ok(fs::read_to_string(path)?);
    }

    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("{}", "Reading text from stdin (Ctrl-D to finish)...".dimmed());
    }
    let mut text = String::new();
    stdin.read_to_string(&mut text)?;
    Ok(text)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    println!("{}", out);
    Ok(())
}

fn handle_classify(
    base_dir: &Path,
    opts: &CatalogOptions,
    input: &TextInput,
    json: bool,
) -> Result<()> {
    let sorter = load_sorter(base_dir, opts)?;
    let text = read_input(input)?;
    let analysis = sorter.analyze(&text);

    if json {
        return print_json(&analysis);
    }

    if text.trim().is_empty() {
        eprintln!("{} Text input is empty.", "[WARN]".yellow().bold());
    }
    print_analysis(&analysis);
    Ok(())
}

fn print_analysis(analysis: &Analysis) {
    let classification = &analysis.classification;
    let width = classification
        .scores
        .iter()
        .map(|e| e.category.len())
        .max()
        .unwrap_or(0)
        .max(8);

    println!();
    println!("{}", "Classification Result".cyan().bold());
    println!();

    let best = classification.best_category.to_uppercase();
    if classification.is_unknown() {
        println!("Best category: {}", best.yellow().bold());
    } else {
        println!("Best category: {}", best.green().bold());
    }

    println!();
    println!("{}", "Scores:".bold());
    for entry in classification.scores.iter() {
        let line = format!("  {:<width$} : {}", entry.category, entry.score, width = width);
        if entry.category == classification.best_category {
            println!("{}", line.green());
        } else if entry.score == 0 {
            println!("{}", line.dimmed());
        } else {
            println!("{}", line);
        }
    }

    println!();
    println!("{}", "Reasoning (backward chaining):".bold());
    if analysis.supporting_tokens.is_empty() {
        println!("  {}", "No supporting tokens found.".dimmed());
    } else {
        println!("  Tokens supporting {}:", classification.best_category.cyan());
        for token in &analysis.supporting_tokens {
            println!("   - {}", token);
        }
    }
    println!();
}

fn handle_explain(
    base_dir: &Path,
    opts: &CatalogOptions,
    category: Option<&str>,
    all: bool,
    input: &TextInput,
    json: bool,
) -> Result<()> {
    let sorter = load_sorter(base_dir, opts)?;
    let text = read_input(input)?;

    let explanations = match category {
        Some(name) if !all => {
            if !sorter.catalog().contains(name) {
                eprintln!(
                    "{} '{}' is not a known category (available: {})",
                    "[WARN]".yellow().bold(),
                    name,
                    sorter.catalog().names().join(", ")
                );
            }
            vec![Explanation {
                category: name.to_string(),
                supporting_tokens: sorter.explain(&text, name),
            }]
        }
        _ => sorter.explain_all(&text),
    };

    if json {
        return if all {
            print_json(&explanations)
        } else {
            print_json(&explanations[0])
        };
    }

    println!();
    for e in &explanations {
        let count = e.supporting_tokens.len();
        let header = format!("{} ({})", e.category, count);
        if count > 0 {
            println!("{}", header.green().bold());
            println!("  {}", e.supporting_tokens.join(", "));
        } else {
            println!("{}", header.dimmed());
            println!("  {}", "No supporting tokens found.".dimmed());
        }
    }
    println!();
    Ok(())
}

fn handle_explain_trace(
    base_dir: &Path,
    opts: &CatalogOptions,
    category: &str,
    input: &TextInput,
    json: bool,
) -> Result<()> {
    let sorter = load_sorter(base_dir, opts)?;
    let text = read_input(input)?;
    let trace = sorter.explain_trace(&text, category);

    if json {
        return print_json(&trace);
    }

    if trace.category_keywords.is_empty() && !sorter.catalog().contains(category) {
        eprintln!(
            "{} '{}' is not a known category",
            "[WARN]".yellow().bold(),
            category
        );
    }
    println!("{} {:?}", "tokens:           ".cyan(), trace.tokens);
    println!("{} {:?}", "category keywords:".cyan(), trace.category_keywords);
    println!("{} {:?}", "matched tokens:   ".cyan(), trace.matched_tokens);
    Ok(())
}

fn handle_tokenize(input: &TextInput, trace: bool, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let steps = trace_tokenize(&text);

    if json {
        return if trace {
            print_json(&steps)
        } else {
            print_json(&steps.tokens)
        };
    }

    if trace {
        println!("{} {:?}", "lowercase:      ".cyan(), steps.lowercase);
        println!("{} {:?}", "remove symbols: ".cyan(), steps.remove_symbols);
        println!("{} {:?}", "normalize space:".cyan(), steps.normalize_space);
        println!("{} {:?}", "tokens:         ".cyan(), steps.tokens);
    } else {
        for token in &steps.tokens {
            println!("{}", token);
        }
    }
    Ok(())
}

fn handle_categories(
    base_dir: &Path,
    opts: &CatalogOptions,
    name: Option<&str>,
    json: bool,
) -> Result<()> {
    let sorter = load_sorter(base_dir, opts)?;
    let catalog = sorter.catalog();

    let selected: Vec<_> = match name {
        Some(n) => match catalog.get(n) {
            Some(c) => vec![c],
            None => {
                eprintln!(
                    "{} '{}' is not a known category ('{}' is only used for empty input)",
                    "[WARN]".yellow().bold(),
                    n,
                    UNKNOWN_CATEGORY
                );
                Vec::new()
            }
        },
        None => catalog.iter().collect(),
    };

    if json {
        return print_json(&selected);
    }

    print_categories(catalog, &selected);
    Ok(())
}

fn print_categories(catalog: &CategoryCatalog, selected: &[&Category]) {
    println!();
    println!(
        "{} ({})",
        "Categories:".cyan().bold(),
        catalog.len().to_string().bold()
    );
    println!();
    for cat in selected {
        let count = format!("({} keywords)", cat.keywords.len());
        println!("  {} {}", cat.name.green().bold(), count.dimmed());
        if !cat.keywords.is_empty() {
            let keywords: Vec<_> = cat.keywords.iter().map(String::as_str).collect();
            println!("    {}", keywords.join(", "));
        }
    }
    println!();
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                    Ok(())
                }
                None => Err(SorterError::ConfigKeyNotFound { key }),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
            Ok(())
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", Config::path(base_dir).display());
            Ok(())
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
            Ok(())
        }
    }
}
