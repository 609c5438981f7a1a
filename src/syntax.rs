//! Syntax module for the assurance language
//!
//! Source spans, the node taxonomy produced by the parser, the borrowed node
//! view the highlighter dispatches over, and the keyword accessor generated
//! from the grammar.

use serde::{Deserialize, Serialize};

pub mod ast;
pub mod keywords;
pub mod node;
pub mod parser;

pub use ast::*;
pub use keywords::{AssuranceGrammar, GrammarAccess, Keyword};
pub use node::{Node, NodeKind};

/// Represents a span in the source code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when `other` lies entirely inside this span.
    pub fn contains(&self, other: Span) -> bool {
        other.start >= self.start && other.end <= self.end && other.start <= other.end
    }
}

/// A lexical token: its text as written (quotes unescaped for strings) and
/// where it sits in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}
