//! Assurance Parser
//!
//! Converts assurance-case source into an [`AssuranceModel`] with exact byte
//! spans on every token. This parser is purely syntactic; identifier
//! uniqueness and reference resolution belong to `validation`.

use pest::error::{Error, ErrorVariant};
use pest::{iterators::Pair, Parser};
use pest_derive::Parser;

use crate::errors::{to_source_span, AssuranceError, SourceContext};
use crate::syntax::ast::*;
use crate::syntax::{Span, Token};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct AssuranceParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse assurance source code into a model.
pub fn parse(
    source_text: &str,
    source_context: SourceContext,
) -> Result<AssuranceModel, AssuranceError> {
    let whole = Span::new(0, source_text.len());
    if source_text.trim().is_empty() {
        return Ok(AssuranceModel {
            span: whole,
            ..AssuranceModel::default()
        });
    }

    let mut pairs = AssuranceParser::parse(Rule::model, source_text)
        .map_err(|e| convert_parse_error(e, &source_context))?;

    let model = pairs
        .next()
        .ok_or_else(|| make_error(&source_context, "empty document", whole))?;

    let comments = model
        .clone()
        .into_inner()
        .flatten()
        .filter(|p| p.as_rule() == Rule::COMMENT)
        .map(|p| Comment {
            text: p.as_str().to_string(),
            span: get_span(&p),
        })
        .collect();

    let definitions = significant(model)
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(|p| build_definition(p, &source_context))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AssuranceModel {
        definitions,
        comments,
        span: whole,
    })
}

// ============================================================================
// AST BUILDERS
// ============================================================================

fn build_definition(
    pair: Pair<Rule>,
    source: &SourceContext,
) -> Result<GsnDefinition, AssuranceError> {
    let span = get_span(&pair);
    let rule = pair.as_rule();

    let mut base = BaseNode {
        span,
        ..BaseNode::default()
    };
    let mut details = None;
    let mut supported_by = Vec::new();
    let mut in_context_of = Vec::new();

    for item in significant(pair) {
        let item_span = get_span(&item);
        match item.as_rule() {
            r if is_keyword(r) => {}
            Rule::uuid => {
                base.id = Some(UuidType {
                    text: item.as_str().to_string(),
                    span: item_span,
                })
            }
            Rule::label => {
                base.label = Some(LabelInfo {
                    text: unescape_string(item.as_str()),
                    span: item_span,
                })
            }
            Rule::summary => {
                if base.summary.is_some() {
                    return Err(duplicate_section(source, "summary", item_span));
                }
                base.summary = Some(build_summary(item));
            }
            Rule::description => {
                if base.description.is_some() {
                    return Err(duplicate_section(source, "info", item_span));
                }
                base.description = Some(build_description(item));
            }
            Rule::details => {
                if details.is_some() {
                    return Err(duplicate_section(source, "details", item_span));
                }
                details = Some(build_details(item));
            }
            Rule::supported_by => supported_by.extend(build_elements(item, source)?),
            Rule::in_context_of => in_context_of.extend(build_elements(item, source)?),
            other => return Err(unexpected_rule(source, other, item_span)),
        }
    }

    let definition = match rule {
        Rule::goal => GsnDefinition::Goal(GoalNode {
            base,
            details,
            supported_by,
            in_context_of,
        }),
        Rule::strategy => GsnDefinition::Strategy(StrategyNode {
            base,
            details,
            supported_by,
            in_context_of,
        }),
        Rule::context => GsnDefinition::Context(base),
        Rule::justification => GsnDefinition::Justification(base),
        Rule::assumption => GsnDefinition::Assumption(base),
        Rule::solution => GsnDefinition::Solution(base),
        other => return Err(unexpected_rule(source, other, span)),
    };
    Ok(definition)
}

fn build_summary(pair: Pair<Rule>) -> Summary {
    let span = get_span(&pair);
    let body = significant(pair)
        .find(|p| p.as_rule() == Rule::text)
        .map(|p| build_text(&p));
    Summary { body, span }
}

fn build_description(pair: Pair<Rule>) -> Description {
    let span = get_span(&pair);
    let mut keyword = Span::new(span.start, span.start);
    let mut body = None;
    for item in significant(pair) {
        match item.as_rule() {
            Rule::kw_info => keyword = get_span(&item),
            Rule::text => body = Some(build_text(&item)),
            _ => {}
        }
    }
    Description {
        keyword,
        body,
        span,
    }
}

fn build_details(pair: Pair<Rule>) -> Details {
    let span = get_span(&pair);
    let entries = significant(pair)
        .filter(|p| p.as_rule() == Rule::detail)
        .filter_map(|detail| {
            let mut key = None;
            let mut value = None;
            for item in significant(detail) {
                match item.as_rule() {
                    Rule::detail_key => key = Some(Token::new(item.as_str(), get_span(&item))),
                    Rule::detail_text => value = Some(DetailValue::Text(build_text(&item))),
                    Rule::detail_word => {
                        value = Some(DetailValue::Word(Token::new(item.as_str(), get_span(&item))))
                    }
                    _ => {}
                }
            }
            key.map(|key| DetailEntry { key, value })
        })
        .collect();
    Details { entries, span }
}

fn build_elements(pair: Pair<Rule>, source: &SourceContext) -> Result<Vec<Element>, AssuranceError> {
    let mut elements = Vec::new();
    for item in significant(pair) {
        match item.as_rule() {
            r if is_keyword(r) => {}
            Rule::node_ref => elements.push(Element::Ref(build_ref(item, source)?)),
            Rule::unrecognized => elements.push(Element::Unrecognized(build_unrecognized(item))),
            _ => elements.push(Element::Definition(build_definition(item, source)?)),
        }
    }
    Ok(elements)
}

fn build_ref(pair: Pair<Rule>, source: &SourceContext) -> Result<NodeRef, AssuranceError> {
    let span = get_span(&pair);
    let mut kind = None;
    let mut target = None;
    let mut uri = None;

    for item in significant(pair) {
        match item.as_rule() {
            Rule::ref_kind => {
                let text = item.as_str();
                kind = Some(RefKind::from_keyword(text).ok_or_else(|| {
                    AssuranceError::InvalidValue {
                        item: "reference kind".into(),
                        value: text.into(),
                        src: source.to_named_source(),
                        span: to_source_span(get_span(&item)),
                    }
                })?);
            }
            Rule::ref_target => target = Some(Token::new(item.as_str(), get_span(&item))),
            Rule::uria => {
                uri = Some(Uria {
                    text: unescape_string(item.as_str()),
                    span: get_span(&item),
                })
            }
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| make_error(source, "reference without a kind", span))?;
    Ok(NodeRef {
        kind,
        target,
        uri,
        span,
    })
}

fn build_unrecognized(pair: Pair<Rule>) -> UnrecognizedNode {
    let span = get_span(&pair);
    let keyword = significant(pair)
        .find(|p| p.as_rule() == Rule::unknown_keyword)
        .map(|p| Token::new(p.as_str(), get_span(&p)))
        .unwrap_or_else(|| Token::new("", Span::new(span.start, span.start)));
    UnrecognizedNode { keyword, span }
}

fn build_text(pair: &Pair<Rule>) -> Token {
    Token::new(unescape_string(pair.as_str()), get_span(pair))
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Inner pairs without comments.
fn significant(pair: Pair<'_, Rule>) -> impl Iterator<Item = Pair<'_, Rule>> {
    pair.into_inner().filter(|p| p.as_rule() != Rule::COMMENT)
}

fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::kw_goal
            | Rule::kw_strategy
            | Rule::kw_context
            | Rule::kw_justification
            | Rule::kw_assumption
            | Rule::kw_solution
            | Rule::kw_summary
            | Rule::kw_info
            | Rule::kw_details
            | Rule::kw_supported_by
            | Rule::kw_in_context_of
            | Rule::kw_ref
            | Rule::kw_in
    )
}

fn get_span(pair: &Pair<Rule>) -> Span {
    Span {
        start: pair.as_span().start(),
        end: pair.as_span().end(),
    }
}

fn unescape_string(text: &str) -> String {
    // Remove surrounding quotes
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }

    result
}

fn rule_description(rule: &Rule) -> String {
    match rule {
        Rule::uuid | Rule::ref_target => "an identifier".into(),
        Rule::label => "a quoted label".into(),
        Rule::text | Rule::detail_text | Rule::uria => "a quoted string".into(),
        Rule::ref_kind => "a node kind".into(),
        Rule::detail | Rule::detail_key => "a 'key = value' entry".into(),
        Rule::goal
        | Rule::strategy
        | Rule::context
        | Rule::justification
        | Rule::assumption
        | Rule::solution
        | Rule::kw_goal
        | Rule::kw_strategy
        | Rule::kw_context
        | Rule::kw_justification
        | Rule::kw_assumption
        | Rule::kw_solution => "a node definition".into(),
        Rule::summary | Rule::kw_summary => "'summary'".into(),
        Rule::description | Rule::kw_info => "'info'".into(),
        Rule::details | Rule::kw_details => "'details'".into(),
        Rule::supported_by | Rule::kw_supported_by => "'supportedBy'".into(),
        Rule::in_context_of | Rule::kw_in_context_of => "'inContextOf'".into(),
        Rule::node_ref | Rule::kw_ref => "'ref'".into(),
        Rule::EOI => "end of input".into(),
        other => format!("{:?}", other),
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

fn make_error(source: &SourceContext, message: &str, span: Span) -> AssuranceError {
    AssuranceError::Syntax {
        message: message.to_string(),
        src: source.to_named_source(),
        span: to_source_span(span),
        help: None,
    }
}

fn duplicate_section(source: &SourceContext, section: &str, span: Span) -> AssuranceError {
    AssuranceError::Syntax {
        message: format!("'{}' given more than once", section),
        src: source.to_named_source(),
        span: to_source_span(span),
        help: Some(format!("merge the '{}' sections into one", section)),
    }
}

fn unexpected_rule(source: &SourceContext, rule: Rule, span: Span) -> AssuranceError {
    make_error(source, &format!("unexpected {}", rule_description(&rule)), span)
}

fn convert_parse_error(error: Error<Rule>, source: &SourceContext) -> AssuranceError {
    let span = match error.location {
        pest::error::InputLocation::Pos(pos) => Span {
            start: pos,
            end: pos,
        },
        pest::error::InputLocation::Span((start, end)) => Span { start, end },
    };

    let message = match &error.variant {
        ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
            let mut expected: Vec<String> = positives.iter().map(rule_description).collect();
            expected.dedup();
            format!("expected {}", expected.join(" or "))
        }
        ErrorVariant::ParsingError { .. } => "syntax error".to_string(),
        ErrorVariant::CustomError { message } => message.clone(),
    };

    AssuranceError::Syntax {
        message,
        src: source.to_named_source(),
        span: to_source_span(span),
        help: balance_hint(&source.content),
    }
}

/// Suggests the most likely cause when quotes or braces do not balance.
fn balance_hint(content: &str) -> Option<String> {
    let mut in_string = false;
    let mut escaped = false;
    let mut depth: i64 = 0;
    for ch in content.chars() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
    }
    if in_string {
        Some("a string is missing its closing quote".into())
    } else if depth > 0 {
        Some("a '{' block is missing its closing brace".into())
    } else if depth < 0 {
        Some("there is a '}' without a matching '{'".into())
    } else {
        None
    }
}
