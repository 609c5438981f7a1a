//! Defines the command-line arguments and subcommands for the assurance CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ColorMode;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "assurance",
    version,
    about = "Semantic highlighting and checks for GSN assurance cases."
)]
pub struct AssuranceArgs {
    /// Configuration file. Defaults to ./assurance.yaml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Overrides the configured colour mode.
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorMode>,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a document with semantic highlighting applied.
    Highlight {
        /// The assurance-case file to highlight.
        #[arg(required = true)]
        file: PathBuf,
        /// Coloured source or the list of highlighted spans.
        #[arg(long, value_enum, default_value_t = OutputFormat::Ansi)]
        format: OutputFormat,
    },
    /// Parse and validate a file, or every .gsn file under a directory.
    Check {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Show the Abstract Syntax Tree (AST) of a document as JSON.
    Ast {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// List every node with its path, status and content hash.
    Nodes {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Ansi,
    Json,
}
