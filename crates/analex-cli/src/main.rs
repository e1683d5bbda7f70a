mod report;

use std::path::{Path, PathBuf};

use analex_lexer::{analyze_with, AnalysisResult, Grammar};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;

use report::{Source, DEFAULT_RESULTS_DIR};

#[derive(Parser)]
#[command(name = "analex")]
#[command(about = "analex: lexical analyzer for a small Spanish-keyword language")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a source file, print the token log and save the results
    Analyze {
        /// Input source file (stdin when omitted or `-`)
        path: Option<PathBuf>,

        /// Directory the result files are written to
        #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
        out_dir: PathBuf,

        /// Base name of the result files (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,

        /// Do not write result files
        #[arg(long)]
        no_save: bool,

        /// Report every non-reserved word as an error
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Report lexical errors only
    Check {
        /// Input source file (stdin when omitted or `-`)
        path: Option<PathBuf>,

        /// Report every non-reserved word as an error
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            path,
            out_dir,
            name,
            no_save,
            strict,
            format,
        } => {
            let source = read_source(path.as_deref());
            let result = analyze_or_exit(&source, strict);
            print_result(&result, format);
            if !no_save {
                let base = base_name(name, &source);
                if let Err(e) = report::save(&result, &out_dir, &base) {
                    fail(&e);
                }
            }
            exit_with(&result);
        }
        Command::Check { path, strict } => {
            let source = read_source(path.as_deref());
            let result = analyze_or_exit(&source, strict);
            if result.is_success() {
                eprintln!("OK: {}", display_name(path.as_deref()));
            } else {
                eprintln!("{}", result.error_text());
            }
            exit_with(&result);
        }
    }
}

fn grammar(strict: bool) -> &'static Grammar {
    if strict {
        Grammar::strict()
    } else {
        Grammar::standard()
    }
}

fn read_source(path: Option<&Path>) -> Source {
    match Source::load(path) {
        Ok(source) => source,
        Err(e) => fail(&e),
    }
}

/// Analyze `source`, or `None` when there is nothing but whitespace.
fn run(source: &Source, strict: bool) -> Option<AnalysisResult> {
    if source.text.trim().is_empty() {
        return None;
    }
    let grammar = grammar(strict);
    debug!("analyzing {} with {} grammar", source.base_name, grammar.name());
    Some(analyze_with(&source.text, grammar))
}

fn analyze_or_exit(source: &Source, strict: bool) -> AnalysisResult {
    match run(source, strict) {
        Some(result) => result,
        None => {
            eprintln!("Warning: no source code to analyze.");
            std::process::exit(1);
        }
    }
}

/// `--name` wins over the base name derived from the source.
fn base_name(name: Option<String>, source: &Source) -> String {
    name.unwrap_or_else(|| source.base_name.clone())
}

fn print_result(result: &AnalysisResult, format: Format) {
    match format {
        Format::Text => {
            println!("{}", report::token_panel(result));
            eprintln!("{}", report::error_panel(result));
        }
        Format::Json => match serde_json::to_string_pretty(result) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(&e),
        },
    }
}

fn display_name(path: Option<&Path>) -> String {
    match path {
        Some(p) if p != Path::new("-") => p.display().to_string(),
        _ => "<stdin>".to_string(),
    }
}

fn exit_with(result: &AnalysisResult) -> ! {
    std::process::exit(if result.is_success() { 0 } else { 1 })
}

fn fail(e: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}
