// tests/parser_tests.rs

mod common;

use assurance::syntax::{DetailValue, Element, GsnDefinition, RefKind};
use assurance::{parse, AssuranceError, ErrorCategory};
use common::{context, offset_of, parse_fixture, SAMPLE_CASE};
use miette::Diagnostic;

fn strategy(model: &assurance::syntax::AssuranceModel) -> &GsnDefinition {
    match &model.definitions[0].supported_by()[0] {
        Element::Definition(definition) => definition,
        other => panic!("expected the strategy, got {other:?}"),
    }
}

#[test]
fn test_sample_case_structure() {
    let model = parse_fixture(SAMPLE_CASE);
    assert_eq!(model.definitions.len(), 2);

    let g1 = &model.definitions[0];
    assert_eq!(g1.id(), Some("G1"));
    assert_eq!(g1.kind(), RefKind::Goal);
    assert_eq!(g1.in_context_of().len(), 2);
    assert_eq!(g1.supported_by().len(), 1);

    let s1 = strategy(&model);
    assert_eq!(s1.kind(), RefKind::Strategy);
    assert_eq!(s1.in_context_of().len(), 1);
    assert_eq!(s1.supported_by().len(), 4);
    assert!(matches!(s1.supported_by()[3], Element::Unrecognized(_)));
}

#[test]
fn test_comments_are_collected_in_order() {
    let model = parse_fixture(SAMPLE_CASE);
    let texts: Vec<_> = model.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["// Top-level claim", "/* reuse evidence from elsewhere */"]
    );
}

#[test]
fn test_summary_span_starts_at_keyword() {
    let model = parse_fixture(SAMPLE_CASE);
    let summary = model.definitions[0].base().summary.as_ref().unwrap();
    assert_eq!(summary.span.start, offset_of(SAMPLE_CASE, "summary"));
    let body = summary.body.as_ref().unwrap();
    assert_eq!(body.text, "The system is acceptably safe");
    assert_eq!(
        &SAMPLE_CASE[body.span.start..body.span.end],
        "\"The system is acceptably safe\""
    );
}

#[test]
fn test_detail_values_keep_their_shape() {
    let model = parse_fixture(SAMPLE_CASE);
    let details = model.definitions[0].details().unwrap();
    assert_eq!(details.get("status"), Some("Approved"));
    assert_eq!(details.get("owner"), Some("Safety team"));
    assert!(matches!(details.entries[0].value, Some(DetailValue::Word(_))));
    assert!(matches!(details.entries[1].value, Some(DetailValue::Text(_))));
}

#[test]
fn test_references_with_and_without_uri() {
    let model = parse_fixture(SAMPLE_CASE);
    let refs: Vec<_> = strategy(&model)
        .supported_by()
        .iter()
        .filter_map(|element| match element {
            Element::Ref(node_ref) => Some(node_ref),
            _ => None,
        })
        .collect();
    assert_eq!(refs.len(), 2);
    assert_eq!(refs[0].target.as_ref().unwrap().text, "Sn2");
    assert!(refs[0].uri.is_none());
    let uri = refs[1].uri.as_ref().unwrap();
    assert_eq!(uri.text, "evidence.gsn#Sn3");
    assert!(uri.is_well_formed());
}

#[test]
fn test_leaf_nodes_reject_relations() {
    let text = r#"solution Sn1 "x" { supportedBy { goal G1 "y" } }"#;
    let err = parse(text, context(text)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parse);
}

#[test]
fn test_syntax_errors_are_diagnostics() {
    let text = "goal G1 \"unterminated";
    let err = parse(text, context(text)).unwrap_err();
    let code = err.code().map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("assurance::parse::syntax"));
    match err {
        AssuranceError::Syntax { help, .. } => {
            assert_eq!(help.as_deref(), Some("a string is missing its closing quote"))
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_keywords_are_not_identifiers() {
    let text = r#"goal goal "x""#;
    assert!(parse(text, context(text)).is_err());
}

#[test]
fn test_only_comments() {
    let text = "// nothing yet\n";
    let model = parse_fixture(text);
    assert!(model.definitions.is_empty());
    assert_eq!(model.comments.len(), 1);
}
