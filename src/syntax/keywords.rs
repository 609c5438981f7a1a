//! Fixed keywords of the assurance grammar.
//!
//! The highlighter needs the literal text (and thereby the length) of a few
//! keywords whose position is only known as "the start of the node". It gets
//! them from a [`GrammarAccess`] handed to the rule table at construction.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Goal,
    Strategy,
    Context,
    Justification,
    Assumption,
    Solution,
    Summary,
    Info,
    Details,
    SupportedBy,
    InContextOf,
    Ref,
    In,
}

impl Keyword {
    pub const ALL: [Keyword; 13] = [
        Keyword::Goal,
        Keyword::Strategy,
        Keyword::Context,
        Keyword::Justification,
        Keyword::Assumption,
        Keyword::Solution,
        Keyword::Summary,
        Keyword::Info,
        Keyword::Details,
        Keyword::SupportedBy,
        Keyword::InContextOf,
        Keyword::Ref,
        Keyword::In,
    ];
}

/// Read-only source of keyword literals.
pub trait GrammarAccess: Send + Sync {
    fn keyword(&self, keyword: Keyword) -> &str;
}

/// Keyword literals of `grammar.pest`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssuranceGrammar;

impl GrammarAccess for AssuranceGrammar {
    fn keyword(&self, keyword: Keyword) -> &str {
        Self::literal(keyword)
    }
}

impl AssuranceGrammar {
    pub fn literal(keyword: Keyword) -> &'static str {
        match keyword {
            Keyword::Goal => "goal",
            Keyword::Strategy => "strategy",
            Keyword::Context => "context",
            Keyword::Justification => "justification",
            Keyword::Assumption => "assumption",
            Keyword::Solution => "solution",
            Keyword::Summary => "summary",
            Keyword::Info => "info",
            Keyword::Details => "details",
            Keyword::SupportedBy => "supportedBy",
            Keyword::InContextOf => "inContextOf",
            Keyword::Ref => "ref",
            Keyword::In => "in",
        }
    }
}
