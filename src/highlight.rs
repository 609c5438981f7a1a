//! Semantic highlighting.
//!
//! ## Module Structure
//!
//! - **category**: the editor-visible categories
//! - **rules**: (node kind, feature) to category table
//! - **calculator**: per-node classification into a position sink
//! - **sink**: position acceptors and the per-document decoration set
//! - **cancel**: cancel indicators and the per-document pass scheduler
//! - **traversal**: whole-model passes built on the calculator
//!
//! The calculator is stateless and shared; several passes (one per document)
//! may run on it at once.

mod calculator;
mod cancel;
mod category;
mod rules;
mod sink;
mod traversal;

pub use calculator::SemanticHighlighter;
pub use cancel::{CancelIndicator, NeverCancel, Pass, PassScheduler};
pub use category::HighlightCategory;
pub use rules::{Feature, RuleTable};
pub use sink::{DecorationSet, HighlightedSpan, PositionAcceptor};
pub use traversal::{preorder, PassOutcome};
