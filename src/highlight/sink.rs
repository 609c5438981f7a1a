//! Position sinks: where the calculator's spans go.

use serde::{Deserialize, Serialize};

use super::HighlightCategory;
use crate::syntax::Span;

/// Receives highlighted positions. `length` is always greater than zero.
pub trait PositionAcceptor {
    fn add_position(&mut self, offset: usize, length: usize, category: HighlightCategory);
}

impl<F> PositionAcceptor for F
where
    F: FnMut(usize, usize, HighlightCategory),
{
    fn add_position(&mut self, offset: usize, length: usize, category: HighlightCategory) {
        self(offset, length, category)
    }
}

/// One emitted position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighlightedSpan {
    pub offset: usize,
    pub length: usize,
    pub category: HighlightCategory,
}

impl HighlightedSpan {
    pub fn new(offset: usize, length: usize, category: HighlightCategory) -> Self {
        Self {
            offset,
            length,
            category,
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

impl PositionAcceptor for Vec<HighlightedSpan> {
    fn add_position(&mut self, offset: usize, length: usize, category: HighlightCategory) {
        self.push(HighlightedSpan::new(offset, length, category));
    }
}

/// The decorations currently shown for one document.
///
/// A completed pass replaces the spans of the range it recomputed; spans
/// outside that range are kept. Spans stay sorted by offset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationSet {
    spans: Vec<HighlightedSpan>,
}

impl DecorationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every span that touches `range` and inserts `fresh`.
    pub fn replace_range(&mut self, range: Span, fresh: Vec<HighlightedSpan>) {
        self.spans
            .retain(|span| span.end() <= range.start || span.offset >= range.end);
        self.spans.extend(fresh);
        self.spans.sort_by_key(|span| (span.offset, span.length));
    }

    pub fn spans(&self) -> &[HighlightedSpan] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
