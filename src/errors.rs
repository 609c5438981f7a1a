//! Assurance error handling.
//!
//! Every failure the front end, validator, configuration loader or CLI can
//! report is a variant of [`AssuranceError`]. Variants carry their own source
//! and labelled spans so they render as `miette` diagnostics without any
//! further context. The highlighter itself never produces errors.

use std::path::PathBuf;
use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::syntax::Span;

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// Source text plus a display name, shared by every diagnostic raised
/// against the same document.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context from real file content
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

pub type SourceArc = Arc<NamedSource<String>>;

#[derive(Error, Diagnostic, Debug)]
pub enum AssuranceError {
    #[error("Parse error: {message}")]
    #[diagnostic(code(assurance::parse::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: SourceArc,
        #[label("here")]
        span: SourceSpan,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: invalid {item} '{value}'")]
    #[diagnostic(code(assurance::parse::invalid_value))]
    InvalidValue {
        item: String,
        value: String,
        #[source_code]
        src: SourceArc,
        #[label("invalid value")]
        span: SourceSpan,
    },

    #[error("Validation error: duplicate identifier '{id}'")]
    #[diagnostic(
        code(assurance::validation::duplicate_id),
        help("node identifiers must be unique across the model")
    )]
    DuplicateId {
        id: String,
        #[source_code]
        src: SourceArc,
        #[label("redefined here")]
        span: SourceSpan,
        #[label("first defined here")]
        original: SourceSpan,
    },

    #[error("Validation error: reference to unknown {kind} '{id}'")]
    #[diagnostic(code(assurance::validation::unresolved_reference))]
    UnresolvedReference {
        id: String,
        kind: String,
        #[source_code]
        src: SourceArc,
        #[label("no node with this identifier")]
        span: SourceSpan,
    },

    #[error("Validation error: '{id}' is a {actual}, but is referenced as a {expected}")]
    #[diagnostic(code(assurance::validation::ref_kind_mismatch))]
    RefKindMismatch {
        id: String,
        expected: String,
        actual: String,
        #[source_code]
        src: SourceArc,
        #[label("wrong reference kind")]
        span: SourceSpan,
    },

    #[error("Validation error: a {child} cannot appear in '{relation}' of a {parent}")]
    #[diagnostic(code(assurance::validation::misplaced_child))]
    MisplacedChild {
        child: String,
        relation: String,
        parent: String,
        #[source_code]
        src: SourceArc,
        #[label("misplaced")]
        span: SourceSpan,
        #[help]
        help: Option<String>,
    },

    #[error("Validation warning: unknown node kind '{keyword}'")]
    #[diagnostic(code(assurance::validation::unknown_node_kind), severity(Warning))]
    UnknownNodeKind {
        keyword: String,
        #[source_code]
        src: SourceArc,
        #[label("not part of the assurance language")]
        span: SourceSpan,
    },

    #[error("Validation warning: '{uri}' does not look like a document URI")]
    #[diagnostic(code(assurance::validation::malformed_uri), severity(Warning))]
    MalformedUri {
        uri: String,
        #[source_code]
        src: SourceArc,
        #[label("malformed URI")]
        span: SourceSpan,
    },

    #[error("I/O error on '{}': {source}", path.display())]
    #[diagnostic(code(assurance::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(assurance::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Validation,
    Io,
    Config,
}

impl AssuranceError {
    /// Get the error category for test assertions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Syntax { .. } | Self::InvalidValue { .. } => ErrorCategory::Parse,

            Self::DuplicateId { .. }
            | Self::UnresolvedReference { .. }
            | Self::RefKindMismatch { .. }
            | Self::MisplacedChild { .. }
            | Self::UnknownNodeKind { .. }
            | Self::MalformedUri { .. } => ErrorCategory::Validation,

            Self::Io { .. } => ErrorCategory::Io,
            Self::Config { .. } => ErrorCategory::Config,
        }
    }

    /// Warnings are reported but do not fail a check.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::UnknownNodeKind { .. } | Self::MalformedUri { .. }
        )
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }
}

/// Converts an AST span to a miette SourceSpan.
pub fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::from(span.start..span.end)
}

/// Prints an error with full miette diagnostics
pub fn print_error(error: AssuranceError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
