//! Borrowed, closed view over every visitable node of an [`AssuranceModel`].
//!
//! Highlighting, traversal and indexing all dispatch over [`Node`] with an
//! exhaustive `match`, so a new node kind fails to compile until every
//! consumer handles it.

use serde::{Deserialize, Serialize};

use super::ast::*;
use super::Span;

#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Model(&'a AssuranceModel),
    Definition(&'a GsnDefinition),
    Uuid(&'a UuidType),
    Label(&'a LabelInfo),
    Summary(&'a Summary),
    Description(&'a Description),
    GoalDetails(&'a Details),
    StrategyDetails(&'a Details),
    Ref(&'a NodeRef),
    Uria(&'a Uria),
    Comment(&'a Comment),
    Unrecognized(&'a UnrecognizedNode),
}

/// Every node kind of the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Model,
    Goal,
    Strategy,
    Context,
    Justification,
    Assumption,
    Solution,
    Uuid,
    Label,
    Summary,
    Description,
    GoalDetails,
    StrategyDetails,
    GoalRef,
    StrategyRef,
    ContextRef,
    JustificationRef,
    AssumptionRef,
    SolutionRef,
    Uria,
    Comment,
    Unrecognized,
}

impl NodeKind {
    pub const ALL: [NodeKind; 22] = [
        NodeKind::Model,
        NodeKind::Goal,
        NodeKind::Strategy,
        NodeKind::Context,
        NodeKind::Justification,
        NodeKind::Assumption,
        NodeKind::Solution,
        NodeKind::Uuid,
        NodeKind::Label,
        NodeKind::Summary,
        NodeKind::Description,
        NodeKind::GoalDetails,
        NodeKind::StrategyDetails,
        NodeKind::GoalRef,
        NodeKind::StrategyRef,
        NodeKind::ContextRef,
        NodeKind::JustificationRef,
        NodeKind::AssumptionRef,
        NodeKind::SolutionRef,
        NodeKind::Uria,
        NodeKind::Comment,
        NodeKind::Unrecognized,
    ];

    pub fn definition(kind: RefKind) -> Self {
        match kind {
            RefKind::Goal => NodeKind::Goal,
            RefKind::Strategy => NodeKind::Strategy,
            RefKind::Context => NodeKind::Context,
            RefKind::Justification => NodeKind::Justification,
            RefKind::Assumption => NodeKind::Assumption,
            RefKind::Solution => NodeKind::Solution,
        }
    }

    pub fn reference(kind: RefKind) -> Self {
        match kind {
            RefKind::Goal => NodeKind::GoalRef,
            RefKind::Strategy => NodeKind::StrategyRef,
            RefKind::Context => NodeKind::ContextRef,
            RefKind::Justification => NodeKind::JustificationRef,
            RefKind::Assumption => NodeKind::AssumptionRef,
            RefKind::Solution => NodeKind::SolutionRef,
        }
    }
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Model(_) => NodeKind::Model,
            Node::Definition(definition) => NodeKind::definition(definition.kind()),
            Node::Uuid(_) => NodeKind::Uuid,
            Node::Label(_) => NodeKind::Label,
            Node::Summary(_) => NodeKind::Summary,
            Node::Description(_) => NodeKind::Description,
            Node::GoalDetails(_) => NodeKind::GoalDetails,
            Node::StrategyDetails(_) => NodeKind::StrategyDetails,
            Node::Ref(node_ref) => NodeKind::reference(node_ref.kind),
            Node::Uria(_) => NodeKind::Uria,
            Node::Comment(_) => NodeKind::Comment,
            Node::Unrecognized(_) => NodeKind::Unrecognized,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Model(model) => model.span,
            Node::Definition(definition) => definition.span(),
            Node::Uuid(id) => id.span,
            Node::Label(label) => label.span,
            Node::Summary(summary) => summary.span,
            Node::Description(description) => description.span,
            Node::GoalDetails(details) | Node::StrategyDetails(details) => details.span,
            Node::Ref(node_ref) => node_ref.span,
            Node::Uria(uri) => uri.span,
            Node::Comment(comment) => comment.span,
            Node::Unrecognized(node) => node.span,
        }
    }

    /// Direct children in document order. Comments are not children of any
    /// node; the traversal merges them in by offset.
    pub fn children(&self) -> Vec<Node<'a>> {
        let mut children: Vec<Node<'a>> = match *self {
            Node::Model(model) => model.definitions.iter().map(Node::Definition).collect(),
            Node::Definition(definition) => definition_children(definition),
            Node::Ref(node_ref) => node_ref.uri.iter().map(Node::Uria).collect(),
            Node::Uuid(_)
            | Node::Label(_)
            | Node::Summary(_)
            | Node::Description(_)
            | Node::GoalDetails(_)
            | Node::StrategyDetails(_)
            | Node::Uria(_)
            | Node::Comment(_)
            | Node::Unrecognized(_) => Vec::new(),
        };
        children.sort_by_key(|child| child.span().start);
        children
    }
}

fn definition_children(definition: &GsnDefinition) -> Vec<Node<'_>> {
    let base = definition.base();
    let mut children = Vec::new();
    children.extend(base.id.iter().map(Node::Uuid));
    children.extend(base.label.iter().map(Node::Label));
    children.extend(base.summary.iter().map(Node::Summary));
    children.extend(base.description.iter().map(Node::Description));
    match definition {
        GsnDefinition::Goal(goal) => children.extend(goal.details.iter().map(Node::GoalDetails)),
        GsnDefinition::Strategy(strategy) => {
            children.extend(strategy.details.iter().map(Node::StrategyDetails))
        }
        _ => {}
    }
    children.extend(
        definition
            .supported_by()
            .iter()
            .chain(definition.in_context_of())
            .map(element_node),
    );
    children
}

fn element_node(element: &Element) -> Node<'_> {
    match element {
        Element::Definition(definition) => Node::Definition(definition),
        Element::Ref(node_ref) => Node::Ref(node_ref),
        Element::Unrecognized(node) => Node::Unrecognized(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Token;

    #[test]
    fn children_follow_source_order_not_field_order() {
        // info written before summary
        let goal = GsnDefinition::Goal(GoalNode {
            base: BaseNode {
                id: Some(UuidType {
                    text: "G1".into(),
                    span: Span::new(5, 7),
                }),
                label: Some(LabelInfo {
                    text: "x".into(),
                    span: Span::new(8, 11),
                }),
                summary: Some(Summary {
                    body: Some(Token::new("s", Span::new(35, 38))),
                    span: Span::new(27, 38),
                }),
                description: Some(Description {
                    keyword: Span::new(14, 18),
                    body: Some(Token::new("i", Span::new(19, 22))),
                    span: Span::new(14, 22),
                }),
                span: Span::new(0, 40),
            },
            ..GoalNode::default()
        });
        let kinds: Vec<_> = Node::Definition(&goal)
            .children()
            .iter()
            .map(Node::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Uuid, NodeKind::Label, NodeKind::Description, NodeKind::Summary]
        );
    }

    #[test]
    fn reference_kinds_map_to_their_own_node_kinds() {
        let node_ref = NodeRef {
            kind: RefKind::Solution,
            target: None,
            uri: None,
            span: Span::new(0, 16),
        };
        assert_eq!(Node::Ref(&node_ref).kind(), NodeKind::SolutionRef);
        assert!(Node::Ref(&node_ref).children().is_empty());
    }
}
