//! Semantic checks over a parsed model.
//!
//! The parser only guarantees shape. This pass reports what a well-formed
//! assurance case additionally needs: unique identifiers, resolvable local
//! references of the right kind, children under the right relation. It
//! also warns about constructs the language does not define. Highlighting
//! never depends on it.

use crate::errors::{to_source_span, AssuranceError, SourceContext};
use crate::index::NodeIndex;
use crate::syntax::{AssuranceModel, Element, GsnDefinition, NodeRef, RefKind, Span};

// ============================================================================
// VALIDATION REPORT
// ============================================================================

#[derive(Debug, Default)]
pub struct ValidationReport {
    diagnostics: Vec<AssuranceError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: AssuranceError) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &AssuranceError> {
        self.diagnostics.iter().filter(|d| !d.is_warning())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &AssuranceError> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    /// True when there are no errors; warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<AssuranceError> {
        self.diagnostics
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

pub fn validate(
    model: &AssuranceModel,
    index: &NodeIndex,
    source: &SourceContext,
) -> ValidationReport {
    let mut validator = Validator {
        index,
        source,
        report: ValidationReport::new(),
    };

    for duplicate in index.duplicates() {
        validator.report.push(AssuranceError::DuplicateId {
            id: duplicate.id.clone(),
            src: source.to_named_source(),
            span: to_source_span(duplicate.again),
            original: to_source_span(duplicate.first),
        });
    }
    for definition in &model.definitions {
        validator.definition(definition);
    }
    validator.report
}

// ============================================================================
// PLACEMENT RULES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    SupportedBy,
    InContextOf,
}

impl Relation {
    fn keyword(self) -> &'static str {
        match self {
            Relation::SupportedBy => "supportedBy",
            Relation::InContextOf => "inContextOf",
        }
    }

    fn accepts(self, kind: RefKind) -> bool {
        match self {
            Relation::SupportedBy => {
                matches!(kind, RefKind::Goal | RefKind::Strategy | RefKind::Solution)
            }
            Relation::InContextOf => matches!(
                kind,
                RefKind::Context | RefKind::Assumption | RefKind::Justification
            ),
        }
    }

    fn other(self) -> Relation {
        match self {
            Relation::SupportedBy => Relation::InContextOf,
            Relation::InContextOf => Relation::SupportedBy,
        }
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

struct Validator<'a> {
    index: &'a NodeIndex,
    source: &'a SourceContext,
    report: ValidationReport,
}

impl Validator<'_> {
    fn definition(&mut self, definition: &GsnDefinition) {
        let parent = definition.kind();
        for (relation, elements) in [
            (Relation::SupportedBy, definition.supported_by()),
            (Relation::InContextOf, definition.in_context_of()),
        ] {
            for element in elements {
                self.element(parent, relation, element);
            }
        }
    }

    fn element(&mut self, parent: RefKind, relation: Relation, element: &Element) {
        match element {
            Element::Definition(child) => {
                self.placement(parent, relation, child.kind(), child.span());
                self.definition(child);
            }
            Element::Ref(node_ref) => {
                self.placement(parent, relation, node_ref.kind, node_ref.span);
                self.reference(node_ref);
            }
            Element::Unrecognized(node) => self.report.push(AssuranceError::UnknownNodeKind {
                keyword: node.keyword.text.clone(),
                src: self.source.to_named_source(),
                span: to_source_span(node.keyword.span),
            }),
        }
    }

    fn placement(&mut self, parent: RefKind, relation: Relation, child: RefKind, span: Span) {
        if relation.accepts(child) {
            return;
        }
        let help = relation
            .other()
            .accepts(child)
            .then(|| format!("move it into '{}'", relation.other().keyword()));
        self.report.push(AssuranceError::MisplacedChild {
            child: child.to_string(),
            relation: relation.keyword().to_string(),
            parent: parent.to_string(),
            src: self.source.to_named_source(),
            span: to_source_span(span),
            help,
        });
    }

    fn reference(&mut self, node_ref: &NodeRef) {
        if let Some(uri) = &node_ref.uri {
            if !uri.is_well_formed() {
                self.report.push(AssuranceError::MalformedUri {
                    uri: uri.text.clone(),
                    src: self.source.to_named_source(),
                    span: to_source_span(uri.span),
                });
            }
            // Targets in other documents are not resolved here.
            return;
        }

        let Some(target) = &node_ref.target else {
            return;
        };
        match self.index.get(&target.text) {
            None => self.report.push(AssuranceError::UnresolvedReference {
                id: target.text.clone(),
                kind: node_ref.kind.to_string(),
                src: self.source.to_named_source(),
                span: to_source_span(target.span),
            }),
            Some(node) if node.kind != node_ref.kind => {
                self.report.push(AssuranceError::RefKindMismatch {
                    id: target.text.clone(),
                    expected: node_ref.kind.to_string(),
                    actual: node.kind.to_string(),
                    src: self.source.to_named_source(),
                    span: to_source_span(node_ref.span),
                })
            }
            Some(_) => {}
        }
    }
}
