//! Linear scans over a flat token sequence.
//!
//! The document tree is never materialized: a token's kind is re-derived
//! from its markup, and section structure is recovered by walking the
//! flat sequence forward or backward from a start index. Every scan is a
//! pure function returning an optional index; a failed scan is the
//! caller's empty-text fallback, not an error.

/// Kind of an indexed token, re-derived by substring inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Second-level heading: owns a section and serves as breadcrumb.
    SectionHeading,
    /// Third- or fourth-level heading.
    SubHeading,
    /// Paragraph (possibly a merged run of paragraphs).
    Paragraph,
    /// Anything else; filtered out before indexing.
    Other,
}

/// Classify a token by the markup it carries.
pub fn kind_of(token: &str) -> TokenKind {
    if token.contains("<h2") {
        TokenKind::SectionHeading
    } else if token.contains("<h3") || token.contains("<h4") {
        TokenKind::SubHeading
    } else if token.contains("<p>") {
        TokenKind::Paragraph
    } else {
        TokenKind::Other
    }
}

/// Index of the next paragraph token strictly after `from`.
pub fn next_paragraph(tokens: &[String], from: usize) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(from + 1)
        .find(|(_, token)| kind_of(token) == TokenKind::Paragraph)
        .map(|(idx, _)| idx)
}

/// Index of the next paragraph after `from`, unless a heading intervenes.
pub fn next_paragraph_in_section(tokens: &[String], from: usize) -> Option<usize> {
    for (idx, token) in tokens.iter().enumerate().skip(from + 1) {
        match kind_of(token) {
            TokenKind::Paragraph => return Some(idx),
            TokenKind::SectionHeading | TokenKind::SubHeading => return None,
            TokenKind::Other => {}
        }
    }
    None
}

/// Index of the nearest heading of any indexed level before `from`.
pub fn prev_heading(tokens: &[String], from: usize) -> Option<usize> {
    tokens[..from]
        .iter()
        .rposition(|token| {
            matches!(
                kind_of(token),
                TokenKind::SectionHeading | TokenKind::SubHeading
            )
        })
}

/// Index of the nearest second-level heading before `from`.
pub fn prev_section_heading(tokens: &[String], from: usize) -> Option<usize> {
    tokens[..from]
        .iter()
        .rposition(|token| kind_of(token) == TokenKind::SectionHeading)
}
