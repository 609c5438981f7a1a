//! Handles all user-facing output for the CLI.
//!
//! Colouring, JSON rendering and the per-command summaries live here so the
//! command handlers only deal with library calls.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::config::Theme;
use crate::highlight::HighlightedSpan;
use crate::index::NodeIndex;

// ============================================================================
// HIGHLIGHTED SOURCE
// ============================================================================

/// Writes `source` with every span coloured by `theme`. Spans must be sorted;
/// a span overlapping an earlier one is printed uncoloured.
pub fn write_highlighted(
    out: &mut dyn WriteColor,
    source: &str,
    spans: &[HighlightedSpan],
    theme: &Theme,
) -> io::Result<()> {
    let mut cursor = 0;
    for span in spans {
        if span.offset < cursor {
            continue;
        }
        let (Some(before), Some(text)) = (
            source.get(cursor..span.offset),
            source.get(span.offset..span.end()),
        ) else {
            continue;
        };
        out.write_all(before.as_bytes())?;
        out.set_color(ColorSpec::new().set_fg(theme.color(span.category)))?;
        out.write_all(text.as_bytes())?;
        out.reset()?;
        cursor = span.end();
    }
    out.write_all(source.get(cursor..).unwrap_or_default().as_bytes())?;
    out.flush()
}

pub fn print_highlighted(
    source: &str,
    spans: &[HighlightedSpan],
    theme: &Theme,
    choice: ColorChoice,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    write_highlighted(&mut stdout, source, spans, theme)
}

#[derive(Serialize)]
struct SpanListing<'a> {
    file: String,
    spans: &'a [HighlightedSpan],
}

pub fn print_spans_json(file: &Path, spans: &[HighlightedSpan]) -> io::Result<()> {
    let listing = SpanListing {
        file: file.display().to_string(),
        spans,
    };
    print_json(&listing)
}

pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, value)?;
    writeln!(lock)
}

// ============================================================================
// NODE LISTING
// ============================================================================

/// One line per node: url, kind, status and a shortened content hash.
pub fn print_nodes(file: &Path, index: &NodeIndex, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    writeln!(stdout, "{}", file.display())?;
    stdout.reset()?;

    for node in index.iter() {
        let hash = index.content_hash(&node.id).unwrap_or_default();
        writeln!(
            stdout,
            "  {:<32} {:<13} {:<12} {}",
            node.url,
            node.kind.as_str(),
            node.status,
            hash.get(..12).unwrap_or(hash)
        )?;
    }
    Ok(())
}

// ============================================================================
// CHECK SUMMARY
// ============================================================================

pub fn print_check_summary(
    files: usize,
    errors: usize,
    warnings: usize,
    choice: ColorChoice,
) -> io::Result<()> {
    let mut stderr = StandardStream::stderr(choice);
    let color = if errors > 0 {
        Color::Red
    } else if warnings > 0 {
        Color::Yellow
    } else {
        Color::Green
    };
    stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(stderr, "checked {files} file(s)")?;
    stderr.reset()?;
    writeln!(stderr, ": {errors} error(s), {warnings} warning(s)")
}
