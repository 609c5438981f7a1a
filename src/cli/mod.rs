//! The assurance command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::Path;
use std::process;

use clap::Parser;
use termcolor::ColorChoice;
use tracing::debug;

use crate::cli::args::{AssuranceArgs, Command, OutputFormat};
use crate::config::{Config, Theme};
use crate::discovery::{discover_gsn_files, load_source};
use crate::errors::{print_error, AssuranceError};
use crate::highlight::{HighlightedSpan, NeverCancel, SemanticHighlighter};
use crate::index::NodeIndex;
use crate::logging;
use crate::syntax::parser;
use crate::validation::validate;

pub mod args;
pub mod output;

/// Outcome of a command that ran to completion: `false` means it found
/// problems and the process should exit non-zero.
type CommandResult = Result<bool, AssuranceError>;

/// The main entry point for the CLI.
pub fn run() {
    let args = AssuranceArgs::parse();

    let config = Config::load(args.config.as_deref()).unwrap_or_else(|e| {
        print_error(e);
        process::exit(2);
    });
    logging::init(config.log.as_deref());
    let choice = args.color.unwrap_or(config.color).choice();

    let result = match args.command {
        Command::Highlight { file, format } => {
            handle_highlight(&file, format, &config.theme, choice)
        }
        Command::Check { path } => handle_check(&path, choice),
        Command::Ast { file } => handle_ast(&file),
        Command::Nodes { path } => handle_nodes(&path, choice),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn handle_highlight(
    path: &Path,
    format: OutputFormat,
    theme: &Theme,
    choice: ColorChoice,
) -> CommandResult {
    let source = load_source(path)?;
    let model = parser::parse(&source.content, source.clone())?;

    let mut spans: Vec<HighlightedSpan> = Vec::new();
    let outcome =
        SemanticHighlighter::default().highlight_model(&model, &mut spans, &NeverCancel);
    debug!(file = %path.display(), ?outcome, "highlighted");
    debug_assert!(spans.windows(2).all(|w| w[0].offset <= w[1].offset));

    match format {
        OutputFormat::Ansi => output::print_highlighted(&source.content, &spans, theme, choice),
        OutputFormat::Json => output::print_spans_json(path, &spans),
    }
    .map_err(output_error)?;
    Ok(true)
}

fn handle_check(root: &Path, choice: ColorChoice) -> CommandResult {
    let files = discover_gsn_files(root)?;
    let mut errors = 0;
    let mut warnings = 0;

    for path in &files {
        let source = load_source(path)?;
        let model = match parser::parse(&source.content, source.clone()) {
            Ok(model) => model,
            Err(e) => {
                errors += 1;
                print_error(e);
                continue;
            }
        };
        let index = NodeIndex::build(&model);
        let report = validate(&model, &index, &source);
        errors += report.errors().count();
        warnings += report.warnings().count();
        for diagnostic in report.into_diagnostics() {
            print_error(diagnostic);
        }
    }

    output::print_check_summary(files.len(), errors, warnings, choice).map_err(output_error)?;
    Ok(errors == 0)
}

fn handle_ast(path: &Path) -> CommandResult {
    let source = load_source(path)?;
    let model = parser::parse(&source.content, source.clone())?;
    output::print_json(&model).map_err(output_error)?;
    Ok(true)
}

fn handle_nodes(root: &Path, choice: ColorChoice) -> CommandResult {
    for path in discover_gsn_files(root)? {
        let source = load_source(&path)?;
        let model = parser::parse(&source.content, source.clone())?;
        let index = NodeIndex::build(&model);
        output::print_nodes(&path, &index, choice).map_err(output_error)?;
    }
    Ok(true)
}

fn output_error(error: std::io::Error) -> AssuranceError {
    AssuranceError::io("<output>", error)
}
