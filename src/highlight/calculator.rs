//! The semantic highlighting calculator.
//!
//! One call classifies one node: it looks up each structurally present
//! feature in the [`RuleTable`] and emits that feature's own span. It never
//! recurses, never fails and keeps no state between calls.

use tracing::trace;

use super::rules::{Feature, RuleTable};
use super::{CancelIndicator, PositionAcceptor};
use crate::syntax::{DetailValue, Keyword, Node, Span};

#[derive(Debug, Clone, Default)]
pub struct SemanticHighlighter {
    rules: RuleTable,
}

impl SemanticHighlighter {
    pub fn new(rules: RuleTable) -> Self {
        Self { rules }
    }

    /// Emits the spans of `node` into `acceptor`, unless `cancel` already
    /// reports the pass as superseded.
    pub fn highlight(
        &self,
        node: Node<'_>,
        acceptor: &mut dyn PositionAcceptor,
        cancel: &dyn CancelIndicator,
    ) {
        if cancel.is_canceled() {
            return;
        }

        let kind = node.kind();
        let bounds = node.span();
        let mut last_end = bounds.start;

        for (feature, span) in self.features(node) {
            let Some(span) = span else {
                trace!(?kind, ?feature, "feature missing; no span");
                continue;
            };
            let category = self.rules.classify(kind, feature);
            if category.is_none() {
                continue;
            }
            if span.is_empty() || !bounds.contains(span) || span.start < last_end {
                trace!(?kind, ?feature, ?span, "feature span out of place; skipped");
                continue;
            }
            acceptor.add_position(span.start, span.len(), category);
            last_end = span.end;
        }
    }

    /// Features present on `node`, in source order. `None` marks a feature
    /// the node should have but does not.
    fn features(&self, node: Node<'_>) -> Vec<(Feature, Option<Span>)> {
        match node {
            Node::Uuid(id) => vec![(Feature::Token, Some(id.span))],
            Node::Label(label) => vec![(Feature::Token, Some(label.span))],
            Node::Summary(summary) => {
                let keyword = self
                    .rules
                    .keyword_len(Keyword::Summary)
                    .map(|len| Span::new(summary.span.start, summary.span.start + len));
                vec![
                    (Feature::Keyword, keyword),
                    (Feature::Body, summary.body.as_ref().map(|body| body.span)),
                ]
            }
            Node::Description(description) => vec![
                (Feature::Keyword, Some(description.keyword)),
                (Feature::Body, description.body.as_ref().map(|body| body.span)),
            ],
            Node::GoalDetails(details) | Node::StrategyDetails(details) => details
                .entries
                .iter()
                .flat_map(|entry| {
                    let value = match &entry.value {
                        Some(DetailValue::Text(token)) => (Feature::DetailText, Some(token.span)),
                        Some(DetailValue::Word(token)) => (Feature::DetailWord, Some(token.span)),
                        None => (Feature::DetailWord, None),
                    };
                    [(Feature::DetailKey, Some(entry.key.span)), value]
                })
                .collect(),
            Node::Ref(node_ref) => vec![(
                Feature::Target,
                node_ref.target.as_ref().map(|target| target.span),
            )],
            Node::Uria(uri) => {
                let feature = if uri.is_well_formed() {
                    Feature::Uri
                } else {
                    Feature::MalformedUri
                };
                vec![(feature, Some(uri.span))]
            }
            Node::Comment(comment) => vec![(Feature::Text, Some(comment.span))],
            Node::Model(_) | Node::Definition(_) | Node::Unrecognized(_) => Vec::new(),
        }
    }
}
