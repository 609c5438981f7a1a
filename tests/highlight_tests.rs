// tests/highlight_tests.rs

mod common;

use std::sync::atomic::{AtomicBool, Ordering};

use assurance::highlight::{
    preorder, DecorationSet, HighlightCategory, HighlightedSpan, NeverCancel, PassOutcome,
    PassScheduler, RuleTable, SemanticHighlighter,
};
use assurance::index::NodeIndex;
use assurance::syntax::{
    AssuranceGrammar, AssuranceModel, BaseNode, GoalNode, GrammarAccess, GsnDefinition, Keyword,
    Node, Span, Summary, Token, UuidType,
};
use assurance::validation::validate;
use assurance::AssuranceError;
use common::{context, highlight_all, offset_of, parse_fixture, text_of, SAMPLE_CASE};

use HighlightCategory::{Comment, Identifier, Invalid, String as Str};

struct ColonGrammar;

impl GrammarAccess for ColonGrammar {
    fn keyword(&self, keyword: Keyword) -> &str {
        match keyword {
            Keyword::Summary => "Summary:",
            other => AssuranceGrammar::literal(other),
        }
    }
}

fn spans_per_node(model: &AssuranceModel) -> Vec<(Node<'_>, Vec<HighlightedSpan>)> {
    let highlighter = SemanticHighlighter::default();
    preorder(model)
        .into_iter()
        .map(|node| {
            let mut spans: Vec<HighlightedSpan> = Vec::new();
            highlighter.highlight(node, &mut spans, &NeverCancel);
            (node, spans)
        })
        .collect()
}

// ---
// Scenarios
// ---

#[test]
fn test_summary_keyword_length_comes_from_the_grammar() {
    // Summary: "initial case"
    let summary = Summary {
        body: Some(Token::new("initial case", Span::new(9, 23))),
        span: Span::new(0, 23),
    };
    let highlighter = SemanticHighlighter::new(RuleTable::new(&ColonGrammar));
    let mut spans: Vec<HighlightedSpan> = Vec::new();
    highlighter.highlight(Node::Summary(&summary), &mut spans, &NeverCancel);
    assert_eq!(
        spans,
        vec![
            HighlightedSpan::new(0, 8, HighlightCategory::Keyword),
            HighlightedSpan::new(9, 14, Str),
        ]
    );
}

#[test]
fn test_goal_identifier_and_label() {
    let source = format!("{}goal G1   \"Reduce risk\"", " ".repeat(15));
    let model = parse_fixture(&source);
    assert_eq!(
        highlight_all(&model),
        vec![
            HighlightedSpan::new(20, 2, Identifier),
            HighlightedSpan::new(25, 13, Str),
        ]
    );
}

#[test]
fn test_unresolved_reference_is_still_an_identifier() {
    let head = "goal G1 \"x\" { supportedBy {";
    let keyword = " ref solution ";
    let source = format!(
        "{head}{}{keyword}Sn1 }} }}",
        " ".repeat(50 - head.len() - keyword.len())
    );
    assert_eq!(offset_of(&source, "Sn1"), 50);

    let model = parse_fixture(&source);
    let spans = highlight_all(&model);
    assert!(spans.contains(&HighlightedSpan::new(50, 3, Identifier)));

    let index = NodeIndex::build(&model);
    let report = validate(&model, &index, &context(&source));
    assert!(report
        .errors()
        .any(|e| matches!(e, AssuranceError::UnresolvedReference { id, .. } if id == "Sn1")));
}

#[test]
fn test_cancellation_midway_keeps_earlier_nodes_only() {
    let source: std::string::String = (1..=10)
        .map(|i| format!("solution Sn{i} \"evidence {i}\"\n"))
        .collect();
    let model = parse_fixture(&source);
    let per_node = spans_per_node(&model);
    let expected: Vec<HighlightedSpan> = per_node[..5]
        .iter()
        .flat_map(|(_, spans)| spans.clone())
        .collect();

    let highlighter = SemanticHighlighter::default();
    let cancelled = AtomicBool::new(false);
    let mut spans: Vec<HighlightedSpan> = Vec::new();
    for (visited, node) in preorder(&model).into_iter().take(10).enumerate() {
        if visited == 5 {
            cancelled.store(true, Ordering::Release);
        }
        highlighter.highlight(node, &mut spans, &cancelled);
    }
    assert_eq!(spans, expected);
}

// ---
// Properties
// ---

#[test]
fn test_passes_are_deterministic() {
    let model = parse_fixture(SAMPLE_CASE);
    assert_eq!(highlight_all(&model), highlight_all(&model));
}

#[test]
fn test_spans_follow_document_order() {
    let model = parse_fixture(SAMPLE_CASE);
    let spans = highlight_all(&model);
    assert!(!spans.is_empty());
    for pair in spans.windows(2) {
        assert!(pair[0].offset <= pair[1].offset, "{pair:?}");
        assert!(pair[0].end() <= pair[1].offset, "overlap {pair:?}");
    }
}

#[test]
fn test_comments_inside_a_node_keep_document_order() {
    let cases = [
        r#"goal G1 "x" { summary /* c */ "body" }"#,
        r#"goal G1 "x" { info // c
            "body" }"#,
        "goal G1 \"x\" { details { a = \"1\" // c\n b = \"2\" } }",
        r#"goal G1 "x" { supportedBy { ref solution /* c */ Sn1 } }"#,
    ];
    for source in cases {
        let model = parse_fixture(source);
        let mut spans: Vec<HighlightedSpan> = Vec::new();
        let outcome =
            SemanticHighlighter::default().highlight_model(&model, &mut spans, &NeverCancel);
        assert!(outcome.is_completed());
        assert_eq!(outcome.spans(), spans.len());

        let comment = spans
            .iter()
            .position(|span| span.category == Comment)
            .unwrap_or_else(|| panic!("no comment span in {source:?}"));
        assert!(comment + 1 < spans.len(), "comment not interleaved in {source:?}");
        for pair in spans.windows(2) {
            assert!(pair[0].end() <= pair[1].offset, "{source:?}: {pair:?}");
        }
    }
}

#[test]
fn test_spans_stay_inside_their_node() {
    let model = parse_fixture(SAMPLE_CASE);
    for (node, spans) in spans_per_node(&model) {
        let bounds = node.span();
        for span in spans {
            assert!(span.length > 0);
            assert!(
                span.offset >= bounds.start && span.end() <= bounds.end,
                "{span:?} escapes {:?} {bounds:?}",
                node.kind()
            );
        }
    }
}

#[test]
fn test_sample_case_classification() {
    let model = parse_fixture(SAMPLE_CASE);
    let spans = highlight_all(&model);
    let category_of = |text: &str| {
        spans
            .iter()
            .find(|span| text_of(SAMPLE_CASE, span) == text)
            .map(|span| span.category)
    };

    assert_eq!(category_of("// Top-level claim"), Some(Comment));
    assert_eq!(category_of("/* reuse evidence from elsewhere */"), Some(Comment));
    assert_eq!(category_of("summary"), Some(HighlightCategory::Keyword));
    assert_eq!(category_of("\"The system is acceptably safe\""), Some(Str));
    assert_eq!(category_of("\"Applies to release 2\""), Some(Str));
    assert_eq!(category_of("info"), None);
    assert_eq!(category_of("status"), Some(HighlightCategory::Keyword));
    assert_eq!(category_of("Approved"), None);
    assert_eq!(category_of("\"Safety team\""), Some(Str));
    assert_eq!(category_of("S1"), Some(Identifier));
    assert_eq!(category_of("Sn2"), Some(Identifier));
    assert_eq!(category_of("\"evidence.gsn#Sn3\""), Some(Str));
    assert_eq!(category_of("pattern"), None);
    assert_eq!(category_of("goal"), None);
    assert!(spans.iter().all(|span| !span.category.is_none()));
}

#[test]
fn test_malformed_uri_is_invalid() {
    let source = r#"goal G1 "x" { supportedBy { ref solution Sn1 in "not a uri" } }"#;
    let model = parse_fixture(source);
    let spans = highlight_all(&model);
    let last = spans.last().unwrap();
    assert_eq!(text_of(source, last), "\"not a uri\"");
    assert_eq!(last.category, Invalid);
}

#[test]
fn test_missing_tokens_degrade_silently() {
    let model = AssuranceModel {
        definitions: vec![GsnDefinition::Goal(GoalNode {
            base: BaseNode {
                id: Some(UuidType {
                    text: "G1".into(),
                    span: Span::new(5, 7),
                }),
                label: None,
                summary: Some(Summary {
                    body: None,
                    span: Span::new(8, 10),
                }),
                description: None,
                span: Span::new(0, 30),
            },
            ..GoalNode::default()
        })],
        comments: Vec::new(),
        span: Span::new(0, 30),
    };
    // summary keyword does not fit its two-byte node; only the id survives
    assert_eq!(
        highlight_all(&model),
        vec![HighlightedSpan::new(5, 2, Identifier)]
    );
}

#[test]
fn test_cancel_from_the_sink_stops_the_pass() {
    let model = parse_fixture(SAMPLE_CASE);
    let cancelled = AtomicBool::new(false);
    let mut seen = Vec::new();
    let mut acceptor = |offset: usize, length: usize, category: HighlightCategory| {
        seen.push(HighlightedSpan::new(offset, length, category));
        cancelled.store(true, Ordering::Release);
    };
    let outcome =
        SemanticHighlighter::default().highlight_model(&model, &mut acceptor, &cancelled);
    assert_eq!(outcome, PassOutcome::Cancelled { spans: 1 });
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].category, Comment);
}

// ---
// Pass lifecycle
// ---

#[test]
fn test_documents_highlight_concurrently() {
    let highlighter = SemanticHighlighter::default();
    let scheduler = PassScheduler::new();
    let documents = [SAMPLE_CASE, "goal G1 \"a\"", "solution Sn1 \"b\" // done"];
    let models: Vec<_> = documents.iter().map(|text| parse_fixture(text)).collect();

    let results: Vec<DecorationSet> = std::thread::scope(|scope| {
        let handles: Vec<_> = models
            .iter()
            .enumerate()
            .map(|(i, model)| {
                let highlighter = &highlighter;
                let scheduler = &scheduler;
                scope.spawn(move || {
                    let pass = scheduler.begin(&format!("doc-{i}.gsn"));
                    let mut decorations = DecorationSet::new();
                    let outcome = highlighter.refresh(model, &mut decorations, scheduler, &pass);
                    assert!(outcome.is_completed());
                    decorations
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (model, decorations) in models.iter().zip(&results) {
        assert_eq!(decorations.spans(), highlight_all(model).as_slice());
    }
    assert_eq!(scheduler.in_flight(), 0);
}

#[test]
fn test_new_edit_supersedes_running_pass() {
    let before = parse_fixture("goal G1 \"a\"");
    let after = parse_fixture("goal G2 \"bb\"");
    let highlighter = SemanticHighlighter::default();
    let scheduler = PassScheduler::new();
    let mut decorations = DecorationSet::new();

    let stale = scheduler.begin("case.gsn");
    let fresh = scheduler.begin("case.gsn");
    let stale_outcome = highlighter.refresh(&before, &mut decorations, &scheduler, &stale);
    assert!(!stale_outcome.is_completed());
    assert!(decorations.is_empty());

    let outcome = highlighter.refresh(&after, &mut decorations, &scheduler, &fresh);
    assert_eq!(outcome, PassOutcome::Completed { spans: 2 });
    assert_eq!(
        decorations.spans(),
        &[
            HighlightedSpan::new(5, 2, Identifier),
            HighlightedSpan::new(8, 4, Str),
        ]
    );
}
