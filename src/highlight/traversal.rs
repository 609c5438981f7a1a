//! Drives the calculator over a whole model.
//!
//! The calculator only ever sees one node; this module decides the visiting
//! order, counts what was emitted and applies finished passes to a
//! [`DecorationSet`].

use tracing::debug;

use super::{
    CancelIndicator, DecorationSet, HighlightCategory, HighlightedSpan, Pass, PassScheduler,
    PositionAcceptor, SemanticHighlighter,
};
use crate::syntax::{AssuranceModel, Node};

/// How a highlighting pass ended. `spans` is the number of positions emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Completed { spans: usize },
    Cancelled { spans: usize },
}

impl PassOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, PassOutcome::Completed { .. })
    }

    pub fn spans(&self) -> usize {
        match self {
            PassOutcome::Completed { spans } | PassOutcome::Cancelled { spans } => *spans,
        }
    }
}

/// Structural nodes of `model` in document pre-order, without comments.
fn structural(model: &AssuranceModel) -> Vec<Node<'_>> {
    let mut nodes = Vec::new();
    let mut stack = vec![Node::Model(model)];
    while let Some(node) = stack.pop() {
        nodes.push(node);
        stack.extend(node.children().into_iter().rev());
    }
    nodes
}

/// Every node of `model` in document pre-order, with comments merged in by
/// offset. A comment nested inside a multi-token node follows that node.
pub fn preorder(model: &AssuranceModel) -> Vec<Node<'_>> {
    let mut comments = model.comments.iter().peekable();
    let mut ordered = Vec::with_capacity(model.comments.len());
    for node in structural(model) {
        let start = node.span().start;
        while let Some(comment) = comments.next_if(|comment| comment.span.start < start) {
            ordered.push(Node::Comment(comment));
        }
        ordered.push(node);
    }
    ordered.extend(comments.map(Node::Comment));
    ordered
}

struct Counting<'a> {
    inner: &'a mut dyn PositionAcceptor,
    emitted: usize,
}

impl PositionAcceptor for Counting<'_> {
    fn add_position(&mut self, offset: usize, length: usize, category: HighlightCategory) {
        self.emitted += 1;
        self.inner.add_position(offset, length, category);
    }
}

fn cancelled(spans: usize) -> PassOutcome {
    debug!(spans, "highlight pass cancelled");
    PassOutcome::Cancelled { spans }
}

impl SemanticHighlighter {
    /// Highlights every node of `model`, checking `cancel` between nodes.
    ///
    /// Each structural node is computed into a scratch buffer first so the
    /// model's comments can be emitted at their offset, even when one sits
    /// between two tokens of the same node. Positions reach `acceptor` in
    /// ascending offset order.
    pub fn highlight_model(
        &self,
        model: &AssuranceModel,
        acceptor: &mut dyn PositionAcceptor,
        cancel: &dyn CancelIndicator,
    ) -> PassOutcome {
        let mut counting = Counting {
            inner: acceptor,
            emitted: 0,
        };
        let mut comments = model.comments.iter().peekable();
        let mut scratch: Vec<HighlightedSpan> = Vec::new();

        for node in structural(model) {
            if cancel.is_canceled() {
                return cancelled(counting.emitted);
            }
            scratch.clear();
            self.highlight(node, &mut scratch, cancel);

            for span in &scratch {
                let mut flushed = false;
                while let Some(comment) = comments.next_if(|c| c.span.start < span.offset) {
                    if cancel.is_canceled() {
                        return cancelled(counting.emitted);
                    }
                    self.highlight(Node::Comment(comment), &mut counting, cancel);
                    flushed = true;
                }
                if flushed && cancel.is_canceled() {
                    return cancelled(counting.emitted);
                }
                counting.add_position(span.offset, span.length, span.category);
            }
        }
        for comment in comments {
            if cancel.is_canceled() {
                return cancelled(counting.emitted);
            }
            self.highlight(Node::Comment(comment), &mut counting, cancel);
        }

        debug!(spans = counting.emitted, "highlight pass completed");
        PassOutcome::Completed {
            spans: counting.emitted,
        }
    }

    /// Runs `pass` over `model` and, if it completes while still current,
    /// replaces the model's range in `decorations`. A superseded pass leaves
    /// `decorations` untouched and reports itself as cancelled.
    pub fn refresh(
        &self,
        model: &AssuranceModel,
        decorations: &mut DecorationSet,
        scheduler: &PassScheduler,
        pass: &Pass,
    ) -> PassOutcome {
        let mut fresh: Vec<HighlightedSpan> = Vec::new();
        let outcome = self.highlight_model(model, &mut fresh, pass);
        if !outcome.is_completed() || !scheduler.is_current(pass) {
            debug!(
                document = %pass.document,
                generation = pass.generation,
                "discarding superseded highlight pass"
            );
            return PassOutcome::Cancelled {
                spans: outcome.spans(),
            };
        }
        decorations.replace_range(model.span, fresh);
        scheduler.finish(pass);
        outcome
    }
}
