//! Semantic highlighting for GSN assurance cases.
//!
//! The highlighter classifies one syntax node at a time into editor
//! categories and reports the spans through a [`highlight::PositionAcceptor`].
//! Around it sit a reference front end (`syntax`), a flattened node index with
//! content hashes (`index`), semantic checks (`validation`) and a small CLI.

pub use crate::errors::{AssuranceError, ErrorCategory, SourceContext};
pub use crate::highlight::{
    CancelIndicator, HighlightCategory, HighlightedSpan, PositionAcceptor, SemanticHighlighter,
};
pub use crate::syntax::parser::parse;

pub mod cli;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod highlight;
pub mod index;
pub mod logging;
pub mod syntax;
pub mod validation;
