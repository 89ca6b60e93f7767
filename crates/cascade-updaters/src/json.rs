use std::collections::BTreeMap;
use std::ops::Range;

use serde::Serialize;
use serde_json::Value;

const DEFAULT_INDENT: &str = "  ";

/// A JSON value embedded in a text file, together with its byte span.
///
/// Text outside `span` is a header or trailer that does not belong to the
/// document, such as a license comment or trailing newlines.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument {
    pub value: Value,
    pub span: Range<usize>,
}

/// Locates and parses the top-level object or array in `text`.
///
/// Every `{` or `[` outside an already parsed value is tried as a document
/// start and the longest value wins, so brackets inside a leading comment do
/// not shadow the real document.
///
/// # Errors
///
/// Returns the error of parsing the whole text when no object or array can be
/// found.
pub fn parse_document(text: &str) -> Result<JsonDocument, serde_json::Error> {
    let mut best: Option<JsonDocument> = None;
    let mut resume = 0;

    for (start, c) in text.char_indices() {
        if start < resume || !matches!(c, '{' | '[') {
            continue;
        }
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        let Some(Ok(value)) = stream.next() else {
            continue;
        };
        let end = start + stream.byte_offset();
        resume = end;
        if best.as_ref().is_none_or(|doc| doc.span.len() < end - start) {
            best = Some(JsonDocument {
                value,
                span: start..end,
            });
        }
    }

    match best {
        Some(document) => Ok(document),
        None => serde_json::from_str(text).map(|value| JsonDocument {
            value,
            span: 0..text.len(),
        }),
    }
}

/// Detects the indentation unit of a text document.
///
/// Returns `"\t"` when tab-indented lines dominate, otherwise the most common
/// step between consecutive space indentation levels. A document without any
/// indentation yields an empty string.
#[must_use]
pub fn detect_indent(text: &str) -> String {
    let mut tab_lines = 0usize;
    let mut space_lines = 0usize;
    let mut steps: BTreeMap<usize, usize> = BTreeMap::new();
    let mut previous = 0usize;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with('\t') {
            tab_lines += 1;
            continue;
        }

        let leading = line.len() - line.trim_start_matches(' ').len();
        if leading > 0 {
            space_lines += 1;
        }

        let step = leading.abs_diff(previous);
        if step > 0 {
            *steps.entry(step).or_default() += 1;
        }
        previous = leading;
    }

    if tab_lines > 0 && tab_lines >= space_lines {
        return "\t".to_string();
    }

    steps
        .iter()
        .max_by(|(a_step, a_count), (b_step, b_count)| {
            a_count.cmp(b_count).then(b_step.cmp(a_step))
        })
        .map(|(step, _)| " ".repeat(*step))
        .unwrap_or_default()
}

/// Serializes `value` in the shape of `original`.
///
/// The indentation unit is taken from the document inside `original`, and
/// every byte before and after that document is carried over verbatim, so
/// headers, comments and trailing newlines survive.
/// An empty `original` yields two-space indentation and a trailing newline.
#[must_use]
pub fn json_stringify(value: &Value, original: &str) -> String {
    let trimmed = original.trim();
    if trimmed.is_empty() {
        let mut rendered = render(value, DEFAULT_INDENT).unwrap_or_default();
        rendered.push('\n');
        return rendered;
    }

    let span = parse_document(original).map_or_else(
        |_| delimited_span(value, original),
        |document| document.span,
    );
    let indent = detect_indent(&original[span.clone()]);
    let Some(rendered) = render(value, &indent) else {
        return original.to_string();
    };

    format!("{}{rendered}{}", &original[..span.start], &original[span.end..])
}

/// Span between the first opening and last closing delimiter, for originals
/// that no longer parse.
fn delimited_span(value: &Value, original: &str) -> Range<usize> {
    let (open, close) = if value.is_array() { ('[', ']') } else { ('{', '}') };
    let start = original.find(open).unwrap_or(0);
    let end = original
        .rfind(close)
        .map_or(original.len(), |idx| idx + close.len_utf8());
    if start <= end { start..end } else { 0..original.len() }
}

fn render(value: &Value, indent: &str) -> Option<String> {
    if indent.is_empty() {
        return serde_json::to_string(value).ok();
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).ok()?;
    String::from_utf8(buf).ok()
}
