//! Node taxonomy of the assurance language.
//!
//! The parser produces an [`AssuranceModel`] per document; nothing downstream
//! mutates it. Required sub-tokens are `Option`al so that trees coming from an
//! error-recovering parser can still be represented; consumers treat a missing
//! token as "contributes nothing".

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Span, Token};

// ============================================================================
// DOCUMENT ROOT
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssuranceModel {
    pub definitions: Vec<GsnDefinition>,
    /// Every comment in the document, in source order.
    pub comments: Vec<Comment>,
    pub span: Span,
}

// ============================================================================
// DEFINITIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GsnDefinition {
    Goal(GoalNode),
    Strategy(StrategyNode),
    Context(BaseNode),
    Justification(BaseNode),
    Assumption(BaseNode),
    Solution(BaseNode),
}

/// Attributes every definition carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseNode {
    pub id: Option<UuidType>,
    pub label: Option<LabelInfo>,
    pub summary: Option<Summary>,
    pub description: Option<Description>,
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalNode {
    pub base: BaseNode,
    pub details: Option<Details>,
    pub supported_by: Vec<Element>,
    pub in_context_of: Vec<Element>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyNode {
    pub base: BaseNode,
    pub details: Option<Details>,
    pub supported_by: Vec<Element>,
    pub in_context_of: Vec<Element>,
}

/// An entry of a `supportedBy` or `inContextOf` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Definition(GsnDefinition),
    Ref(NodeRef),
    Unrecognized(UnrecognizedNode),
}

impl GsnDefinition {
    pub fn base(&self) -> &BaseNode {
        match self {
            GsnDefinition::Goal(goal) => &goal.base,
            GsnDefinition::Strategy(strategy) => &strategy.base,
            GsnDefinition::Context(base)
            | GsnDefinition::Justification(base)
            | GsnDefinition::Assumption(base)
            | GsnDefinition::Solution(base) => base,
        }
    }

    pub fn span(&self) -> Span {
        self.base().span
    }

    pub fn id(&self) -> Option<&str> {
        self.base().id.as_ref().map(|id| id.text.as_str())
    }

    pub fn kind(&self) -> RefKind {
        match self {
            GsnDefinition::Goal(_) => RefKind::Goal,
            GsnDefinition::Strategy(_) => RefKind::Strategy,
            GsnDefinition::Context(_) => RefKind::Context,
            GsnDefinition::Justification(_) => RefKind::Justification,
            GsnDefinition::Assumption(_) => RefKind::Assumption,
            GsnDefinition::Solution(_) => RefKind::Solution,
        }
    }

    pub fn details(&self) -> Option<&Details> {
        match self {
            GsnDefinition::Goal(goal) => goal.details.as_ref(),
            GsnDefinition::Strategy(strategy) => strategy.details.as_ref(),
            _ => None,
        }
    }

    /// `supportedBy` children; empty for kinds that cannot have any.
    pub fn supported_by(&self) -> &[Element] {
        match self {
            GsnDefinition::Goal(goal) => &goal.supported_by,
            GsnDefinition::Strategy(strategy) => &strategy.supported_by,
            _ => &[],
        }
    }

    /// `inContextOf` children; empty for kinds that cannot have any.
    pub fn in_context_of(&self) -> &[Element] {
        match self {
            GsnDefinition::Goal(goal) => &goal.in_context_of,
            GsnDefinition::Strategy(strategy) => &strategy.in_context_of,
            _ => &[],
        }
    }
}

impl Element {
    pub fn span(&self) -> Span {
        match self {
            Element::Definition(definition) => definition.span(),
            Element::Ref(node_ref) => node_ref.span,
            Element::Unrecognized(node) => node.span,
        }
    }
}

// ============================================================================
// LEAF TOKENS
// ============================================================================

/// Identifier of a definition; unique across the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UuidType {
    pub text: String,
    pub span: Span,
}

/// Quoted short label. The span includes the quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelInfo {
    pub text: String,
    pub span: Span,
}

/// `summary "<text>"`. The keyword starts at `span.start`; its length is a
/// property of the grammar, not of the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub body: Option<Token>,
    pub span: Span,
}

/// `info "<text>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    pub keyword: Span,
    pub body: Option<Token>,
    pub span: Span,
}

/// `details { key = value ... }` on goals and strategies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    pub entries: Vec<DetailEntry>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailEntry {
    pub key: Token,
    pub value: Option<DetailValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailValue {
    /// A bare word such as `Approved` or `true`.
    Word(Token),
    /// A quoted string; the span includes the quotes.
    Text(Token),
}

impl DetailValue {
    pub fn token(&self) -> &Token {
        match self {
            DetailValue::Word(token) | DetailValue::Text(token) => token,
        }
    }
}

impl Details {
    /// Value of the first entry with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key.text == key)
            .and_then(|entry| entry.value.as_ref())
            .map(|value| value.token().text.as_str())
    }
}

// ============================================================================
// REFERENCES
// ============================================================================

/// The kind of node a reference points at; doubles as the definition kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefKind {
    Goal,
    Strategy,
    Context,
    Justification,
    Assumption,
    Solution,
}

impl RefKind {
    pub const ALL: [RefKind; 6] = [
        RefKind::Goal,
        RefKind::Strategy,
        RefKind::Context,
        RefKind::Justification,
        RefKind::Assumption,
        RefKind::Solution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RefKind::Goal => "goal",
            RefKind::Strategy => "strategy",
            RefKind::Context => "context",
            RefKind::Justification => "justification",
            RefKind::Assumption => "assumption",
            RefKind::Solution => "solution",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == keyword)
    }
}

impl std::fmt::Display for RefKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ref <kind> <id> [in "<uri>"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    pub kind: RefKind,
    pub target: Option<Token>,
    pub uri: Option<Uria>,
    pub span: Span,
}

static URI_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*:[^\s]+|[^\s:]+\.gsn)(?:#[^\s]*)?$")
        .expect("URI pattern is valid")
});

/// Cross-document location, written as a quoted string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uria {
    pub text: String,
    pub span: Span,
}

impl Uria {
    /// `scheme:rest` or a relative `*.gsn` path, optionally with a fragment.
    pub fn is_well_formed(&self) -> bool {
        URI_SHAPE.is_match(&self.text)
    }
}

// ============================================================================
// TRIVIA AND EXTENSIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

/// A child entry introduced by a word the grammar does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrecognizedNode {
    pub keyword: Token,
    pub span: Span,
}
