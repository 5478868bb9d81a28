//! marksift: line-oriented Markdown to HTML compiler with section search
//!
//! This crate is the text core of a documentation site: it compiles
//! markdown articles into HTML fragments one line at a time, then lets a
//! search page locate query matches and rebuild their section context
//! (enclosing heading, breadcrumb, description) from the flat output.
//!
//! # Design Principles
//! - No AST: one markup token per input line, structure recovered by scans
//! - No regex: rule matching is byte-level scanning
//! - Silent degradation: malformed input never fails, it renders unbalanced
//! - No shared state: each document gets a fresh parser

pub mod block;
pub mod cursor;
pub mod escape;
pub mod inline;
pub mod normalize;
pub mod search;
pub mod source;

// Re-export primary types
pub use block::BlockParser;
pub use search::{search, Document, MatchRecord, SearchResults};
pub use source::{load_documents, DocumentSource, FsSource, SourceError};

/// Parsing options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Page namespace segment used to root figure URLs
    /// (`/src/pages/<namespace>/<path>`). Empty by default.
    pub namespace: String,
}

/// Run the full pipeline (normalize, block pass, inline pass) and return
/// the markup token sequence.
///
/// # Example
/// ```
/// let tokens = marksift::to_tokens("# Intro\n\nHello **world**");
/// assert_eq!(tokens[0], "<h2 id=\"Intro\">Intro</h2>");
/// assert_eq!(tokens[1], "<p>Hello <strong>world</strong></p>");
/// ```
pub fn to_tokens(input: &str) -> Vec<String> {
    to_tokens_with_options(input, &Options::default())
}

/// Run the full pipeline with options.
pub fn to_tokens_with_options(input: &str, options: &Options) -> Vec<String> {
    let lines = normalize::normalize(input);
    let mut tokens = BlockParser::new(options).parse(&lines);
    inline::transform_all(&mut tokens);
    tokens
}

/// Convert markdown to a single HTML fragment string.
///
/// This is the primary API for simple use cases.
///
/// # Example
/// ```
/// let html = marksift::to_html("# Hello\n\nWorld");
/// assert!(html.contains("<h2 id=\"Hello\">Hello</h2>"));
/// assert!(html.contains("<p>World</p>"));
/// ```
pub fn to_html(input: &str) -> String {
    to_tokens(input).concat()
}

/// Convert markdown to HTML with options.
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    to_tokens_with_options(input, options).concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(to_html("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_heading_is_one_level_down() {
        let html = to_html("# Hello");
        assert!(html.contains("<h2 id=\"Hello\">Hello</h2>"), "Got: {html}");
        assert!(!html.contains("<h1"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_html(""), "");
        assert_eq!(to_tokens(""), Vec::<String>::new());
    }

    #[test]
    fn test_inline_in_heading() {
        let html = to_html("# The `gap` property");
        assert!(
            html.contains("id=\"The gap property\""),
            "Got: {html}"
        );
        assert!(html.contains("<code>gap</code>"), "Got: {html}");
    }

    #[test]
    fn test_complex_document() {
        let input = "# Main Title\n\nFirst paragraph.\n\n## Section\n\n- one\n- two\n\nDone.";
        let tokens = to_tokens(input);
        assert_eq!(
            tokens,
            vec![
                "<h2 id=\"Main Title\">Main Title</h2>",
                "<p>First paragraph.</p>",
                "<h3 id=\"Section\">Section</h3>",
                "<ul><li>one</li>",
                "<li>two</li></ul>",
                "<p>Done.</p>",
            ]
        );
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let input = "# A\n\n```\ncode < here\n```\n\n- x\n  - y\n\n|a|b|\n|-|-|\n|1|2|";
        assert_eq!(to_tokens(input), to_tokens(input));
    }

    #[test]
    fn test_options_namespace_roots_figures() {
        let options = Options {
            namespace: "grid".to_string(),
        };
        let html = to_html_with_options("![axes](axes__420.png)", &options);
        assert!(
            html.contains("src=\"/src/pages/grid/axes__420.png\""),
            "Got: {html}"
        );
        assert!(html.contains("width: 420px;"), "Got: {html}");
    }
}
