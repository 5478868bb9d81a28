//! Ordered block-rule table.
//!
//! Each line is tested against a fixed rule order; the first rule that
//! matches wins and the paragraph fallback catches the rest. Rules are
//! structural byte scans over a [`LineCursor`], one function per rule,
//! mirroring the order the state machine dispatches in.

use crate::cursor::LineCursor;
use crate::Options;

/// Which block rule matched a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Opening code fence, optional language tag.
    CodeFenceStart,
    /// `- ` bullet item.
    UnorderedItem,
    /// `1. ` numbered item.
    OrderedItem,
    /// `|---|---|` separator row; renders as nothing.
    TableSeparator,
    /// `|cell|cell|` row.
    TableRow,
    /// `#`-prefixed heading.
    Heading,
    /// `![caption](path)` image.
    Figure,
    /// A literal `<br />` line.
    LineBreak,
    /// Fallback for everything else.
    Paragraph,
}

/// Classify a line against the rule table, first match wins.
pub fn classify(line: &str) -> BlockKind {
    if is_code_fence_start(line) {
        BlockKind::CodeFenceStart
    } else if is_unordered_item(line) {
        BlockKind::UnorderedItem
    } else if is_ordered_item(line) {
        BlockKind::OrderedItem
    } else if is_table_separator(line) {
        BlockKind::TableSeparator
    } else if is_table_row(line) {
        BlockKind::TableRow
    } else if is_heading(line) {
        BlockKind::Heading
    } else if parse_figure(line).is_some() {
        BlockKind::Figure
    } else if is_line_break(line) {
        BlockKind::LineBreak
    } else {
        BlockKind::Paragraph
    }
}

/// Render the markup for a classified line.
///
/// Stateless: list containers, table open/close and fence bookkeeping are
/// the state machine's job. The fence-start rendering here is the
/// non-editor form (tag text already dropped).
pub fn render(line: &str, kind: BlockKind, options: &Options) -> String {
    match kind {
        BlockKind::CodeFenceStart => "<pre><code>".to_string(),
        BlockKind::UnorderedItem => render_unordered_item(line),
        BlockKind::OrderedItem => render_ordered_item(line),
        BlockKind::TableSeparator => String::new(),
        BlockKind::TableRow => render_table_row(line),
        BlockKind::Heading => render_heading(line),
        BlockKind::Figure => render_figure(line, options),
        BlockKind::LineBreak => "<br />".to_string(),
        BlockKind::Paragraph => render_paragraph(line),
    }
}

fn is_code_fence_start(line: &str) -> bool {
    let mut cursor = LineCursor::new(line);
    cursor.skip_whitespace();
    cursor.eat_bytes(b"```")
}

/// The raw language tag after an opening fence (may be empty).
pub(crate) fn fence_info(line: &str) -> &str {
    let mut cursor = LineCursor::new(line);
    cursor.skip_whitespace();
    if cursor.eat_bytes(b"```") { cursor.rest() } else { "" }
}

/// Whether a line inside a code block closes it: content, three
/// backticks, optional trailing whitespace.
pub(crate) fn is_closing_fence(line: &str) -> bool {
    line.trim_end().ends_with("```")
}

/// Markup for a closing-fence line. Content before the backticks is kept
/// verbatim, not escaped.
pub(crate) fn render_fence_close(line: &str) -> String {
    let trimmed = line.trim_end();
    let prefix = &trimmed[..trimmed.len() - 3];
    format!("{prefix}</code></pre>")
}

fn is_unordered_item(line: &str) -> bool {
    let mut cursor = LineCursor::new(line);
    cursor.skip_whitespace();
    cursor.eat(b'-') && (cursor.eat(b' ') || cursor.eat(b'\t')) && !cursor.rest().is_empty()
}

fn render_unordered_item(line: &str) -> String {
    let mut cursor = LineCursor::new(line);
    cursor.skip_whitespace();
    cursor.eat(b'-');
    cursor.bump(); // the single whitespace after the dash
    format!("<li>{}", cursor.rest())
}

fn is_ordered_item(line: &str) -> bool {
    let mut cursor = LineCursor::new(line);
    cursor.skip_whitespace();
    cursor.skip_digits() > 0
        && cursor.eat(b'.')
        && (cursor.eat(b' ') || cursor.eat(b'\t'))
        && !cursor.rest().is_empty()
}

fn render_ordered_item(line: &str) -> String {
    // The numeral text is retained verbatim in the item content.
    let mut cursor = LineCursor::new(line);
    cursor.skip_whitespace();
    format!("<li>{}", cursor.rest())
}

/// Nesting depth of a list item from its leading whitespace width.
///
/// Two spaces are one depth level; a stray odd space floors down.
pub(crate) fn list_depth(line: &str) -> usize {
    let mut cursor = LineCursor::new(line);
    let width = cursor.skip_whitespace();
    if width % 2 == 1 { width - 1 } else { width }
}

fn is_table_separator(line: &str) -> bool {
    let bytes = line.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'|' || bytes[bytes.len() - 1] != b'|' {
        return false;
    }
    bytes[1..bytes.len() - 1]
        .iter()
        .all(|&b| matches!(b, b'-' | b'|' | b' ' | b'\t'))
}

fn is_table_row(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 3 && bytes[0] == b'|' && bytes[bytes.len() - 1] == b'|'
}

fn render_table_row(line: &str) -> String {
    let interior = &line[1..line.len() - 1];
    let mut row = String::with_capacity(line.len() + 16);
    row.push_str("<tr>");
    for cell in interior.split('|') {
        row.push_str("<td>");
        row.push_str(cell.trim());
        row.push_str("</td>");
    }
    row.push_str("</tr>");
    row
}

fn is_heading(line: &str) -> bool {
    let mut cursor = LineCursor::new(line);
    cursor.skip_whitespace();
    cursor.skip_while(|b| b == b'#') > 0
        && (cursor.eat(b' ') || cursor.eat(b'\t'))
        && !cursor.rest().is_empty()
}

fn render_heading(line: &str) -> String {
    let mut cursor = LineCursor::new(line);
    cursor.skip_whitespace();
    let hashes = cursor.skip_while(|b| b == b'#');
    cursor.bump(); // the single whitespace after the hashes
    let text = cursor.rest();
    // One `#` maps to h2, not h1; the level is not capped.
    let level = hashes + 1;
    format!("<h{level} id=\"{}\">{text}</h{level}>", heading_id(text))
}

/// Heading id: the heading text with bold markers and inline-code
/// backticks stripped. No other punctuation is sanitized.
fn heading_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let bytes = text.as_bytes();
    let mut pos = 0;
    while pos < text.len() {
        match bytes[pos] {
            b'`' => pos += 1,
            b'*' if pos + 1 < text.len() && bytes[pos + 1] == b'*' => pos += 2,
            _ => {
                let ch_len = text[pos..].chars().next().map_or(1, char::len_utf8);
                id.push_str(&text[pos..pos + ch_len]);
                pos += ch_len;
            }
        }
    }
    id
}

/// Parsed parts of a figure line.
pub(crate) struct FigureParts<'a> {
    pub caption: &'a str,
    pub path: &'a str,
    /// Text after the image syntax, passed through unchanged.
    pub trailing: &'a str,
}

/// Match `![caption](path)` at the start of a line (after indentation).
///
/// The scan is greedy like the rest of the rule table: caption runs to
/// the last `](` that still leaves a non-empty path ending at the last
/// `)` of the line.
pub(crate) fn parse_figure(line: &str) -> Option<FigureParts<'_>> {
    let mut cursor = LineCursor::new(line);
    cursor.skip_whitespace();
    if !cursor.eat_bytes(b"![") {
        return None;
    }
    let rest = cursor.rest();
    let close = rest.rfind(')')?;
    let bytes = rest.as_bytes();
    // last "](" that leaves at least one byte of path before the ')'
    let mut sep = None;
    for i in (0..close.saturating_sub(2)).rev() {
        if bytes[i] == b']' && bytes[i + 1] == b'(' {
            sep = Some(i);
            break;
        }
    }
    let sep = sep?;
    Some(FigureParts {
        caption: &rest[..sep],
        path: &rest[sep + 2..close],
        trailing: &rest[close + 1..],
    })
}

/// Width encoded in a figure path as `__<digits>.` before the extension.
pub(crate) fn figure_width(path: &str) -> Option<&str> {
    let bytes = path.as_bytes();
    let mut pos = 0;
    while let Some(found) = path[pos..].find("__") {
        let digits_start = pos + found + 2;
        let mut end = digits_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        // digits, a dot, and at least one character of extension
        if end > digits_start && bytes.get(end) == Some(&b'.') && end + 1 < bytes.len() {
            return Some(&path[digits_start..end]);
        }
        pos = pos + found + 1;
    }
    None
}

fn render_figure(line: &str, options: &Options) -> String {
    // classify() guarantees the parse succeeds
    let Some(parts) = parse_figure(line) else {
        return line.to_string();
    };
    let src = if options.namespace.is_empty() {
        format!("/src/pages/{}", parts.path)
    } else {
        format!("/src/pages/{}/{}", options.namespace, parts.path)
    };
    let mut out = String::with_capacity(line.len() + 48);
    out.push_str("<figure><img src=\"");
    out.push_str(&src);
    out.push('"');
    if let Some(width) = figure_width(parts.path) {
        out.push_str(&format!(" style=\"width: {width}px;\""));
    }
    out.push('>');
    if !parts.caption.is_empty() {
        out.push_str("<figcaption>");
        out.push_str(parts.caption);
        out.push_str("</figcaption>");
    }
    out.push_str("</figure>");
    out.push_str(parts.trailing);
    out
}

fn is_line_break(line: &str) -> bool {
    let mut cursor = LineCursor::new(line);
    cursor.eat_bytes(b"<br") && {
        cursor.skip_whitespace();
        cursor.eat_bytes(b"/>") && cursor.is_eol()
    }
}

fn render_paragraph(line: &str) -> String {
    if looks_like_block_markup(line) {
        return line.to_string();
    }
    if line.trim().is_empty() {
        return String::new();
    }
    format!("<p>{line}</p>")
}

/// Known block-level tag names checked by the paragraph fallback.
const BLOCK_TAGS: &[&str] = &["ul", "ol", "li", "blockquote", "pre", "img", "code"];

/// Whether a line already looks like block markup: `<`, optional `/`,
/// then a known block tag name or `h` plus a digit.
fn looks_like_block_markup(line: &str) -> bool {
    let bytes = line.as_bytes();
    for open in memchr::memchr_iter(b'<', bytes) {
        let mut after = &line[open + 1..];
        if let Some(stripped) = after.strip_prefix('/') {
            after = stripped;
        }
        let after_bytes = after.as_bytes();
        if after_bytes.first() == Some(&b'h') && after_bytes.get(1).is_some_and(u8::is_ascii_digit)
        {
            return true;
        }
        if BLOCK_TAGS.iter().any(|tag| after.starts_with(tag)) {
            return true;
        }
    }
    false
}
