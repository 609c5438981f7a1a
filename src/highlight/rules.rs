//! Static mapping from (node kind, structural feature) to highlight category.

use serde::{Deserialize, Serialize};

use super::HighlightCategory;
use crate::syntax::{GrammarAccess, Keyword, NodeKind};

/// A structurally distinguishable part of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// A fixed keyword introducing the node.
    Keyword,
    /// The node's own token (identifier, label).
    Token,
    /// The quoted body of a section.
    Body,
    DetailKey,
    /// A quoted detail value.
    DetailText,
    /// A bare-word detail value.
    DetailWord,
    /// The identifier a reference points at.
    Target,
    Uri,
    MalformedUri,
    /// Comment text.
    Text,
}

impl Feature {
    pub const ALL: [Feature; 10] = [
        Feature::Keyword,
        Feature::Token,
        Feature::Body,
        Feature::DetailKey,
        Feature::DetailText,
        Feature::DetailWord,
        Feature::Target,
        Feature::Uri,
        Feature::MalformedUri,
        Feature::Text,
    ];
}

/// The classification table. Built once from the grammar's keyword literals
/// and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RuleTable {
    summary_keyword_len: usize,
}

impl RuleTable {
    pub fn new(grammar: &dyn GrammarAccess) -> Self {
        Self {
            summary_keyword_len: grammar.keyword(Keyword::Summary).len(),
        }
    }

    /// Length in bytes of a keyword whose position is only known as the
    /// start of its node. `None` for keywords the table does not track.
    pub fn keyword_len(&self, keyword: Keyword) -> Option<usize> {
        match keyword {
            Keyword::Summary => Some(self.summary_keyword_len),
            _ => None,
        }
    }

    pub fn classify(&self, kind: NodeKind, feature: Feature) -> HighlightCategory {
        use HighlightCategory as C;

        match kind {
            NodeKind::Summary => match feature {
                Feature::Keyword => C::Keyword,
                Feature::Body => C::String,
                _ => C::None,
            },
            NodeKind::Description => match feature {
                Feature::Body => C::String,
                _ => C::None,
            },
            NodeKind::Uuid => match feature {
                Feature::Token => C::Identifier,
                _ => C::None,
            },
            NodeKind::Label => match feature {
                Feature::Token => C::String,
                _ => C::None,
            },
            NodeKind::GoalDetails | NodeKind::StrategyDetails => match feature {
                Feature::DetailKey => C::Keyword,
                Feature::DetailText => C::String,
                _ => C::None,
            },
            NodeKind::GoalRef
            | NodeKind::StrategyRef
            | NodeKind::ContextRef
            | NodeKind::JustificationRef
            | NodeKind::AssumptionRef
            | NodeKind::SolutionRef => match feature {
                Feature::Target => C::Identifier,
                _ => C::None,
            },
            NodeKind::Uria => match feature {
                Feature::Uri => C::String,
                Feature::MalformedUri => C::Invalid,
                _ => C::None,
            },
            NodeKind::Comment => match feature {
                Feature::Text => C::Comment,
                _ => C::None,
            },
            NodeKind::Model
            | NodeKind::Goal
            | NodeKind::Strategy
            | NodeKind::Context
            | NodeKind::Justification
            | NodeKind::Assumption
            | NodeKind::Solution
            | NodeKind::Unrecognized => C::None,
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(&crate::syntax::AssuranceGrammar)
    }
}
