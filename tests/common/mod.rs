//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use assurance::highlight::{HighlightedSpan, NeverCancel, SemanticHighlighter};
use assurance::syntax::AssuranceModel;
use assurance::{parse, SourceContext};

/// A small but complete case: every definition kind, both relations,
/// local and remote references, details, comments and an unknown entry.
pub const SAMPLE_CASE: &str = r#"// Top-level claim
goal G1 "Reduce risk" {
    summary "The system is acceptably safe"
    info "Applies to release 2"
    details { status = Approved owner = "Safety team" }
    inContextOf {
        context C1 "Operating environment"
        assumption A1 "Operators are trained"
    }
    supportedBy {
        strategy S1 "Argue over hazards" {
            inContextOf { justification J1 "Hazard list is complete" }
            supportedBy {
                goal G2 "Hazard H1 mitigated" {
                    supportedBy { solution Sn1 "Test report" }
                }
                /* reuse evidence from elsewhere */
                ref solution Sn2
                ref solution Sn3 in "evidence.gsn#Sn3"
                pattern P1 "future extension"
            }
        }
    }
}

solution Sn2 "Field data"
"#;

pub fn context(text: &str) -> SourceContext {
    SourceContext::from_file("fixture.gsn", text)
}

pub fn parse_fixture(text: &str) -> AssuranceModel {
    parse(text, context(text)).expect("fixture parses")
}

/// Spans of one uncancelled pass in emission order.
pub fn highlight_all(model: &AssuranceModel) -> Vec<HighlightedSpan> {
    let mut spans: Vec<HighlightedSpan> = Vec::new();
    SemanticHighlighter::default().highlight_model(model, &mut spans, &NeverCancel);
    spans
}

/// The text a span covers.
pub fn text_of<'a>(source: &'a str, span: &HighlightedSpan) -> &'a str {
    &source[span.offset..span.end()]
}

/// Byte offset of the first occurrence of `needle`.
pub fn offset_of(source: &str, needle: &str) -> usize {
    source.find(needle).expect("needle present")
}
