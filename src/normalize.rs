//! Input normalization: newline canonicalization and line splitting.
//!
//! Runs before any block rule sees the text. Carriage returns are folded
//! into line feeds and runs of blank lines collapse to a single blank
//! line, so the block pass only ever deals with `\n`-separated lines and
//! at most one empty line between blocks.

/// Normalize raw document text into an ordered sequence of lines.
///
/// - `\r\n` and bare `\r` both become a single `\n`
/// - runs of two or more consecutive `\n` collapse to exactly two
///   (one blank line)
/// - the result is split on `\n`
///
/// Never fails; empty input yields a single empty line.
///
/// # Example
/// ```
/// let lines = marksift::normalize::normalize("a\r\n\r\n\r\nb");
/// assert_eq!(lines, vec!["a", "", "b"]);
/// ```
pub fn normalize(input: &str) -> Vec<String> {
    let bytes = input.as_bytes();
    let mut text = Vec::with_capacity(bytes.len());
    let mut newline_run = 0usize;

    let mut pos = 0;
    while pos < bytes.len() {
        let b = bytes[pos];
        let is_newline = match b {
            b'\r' => {
                // \r\n counts as one line ending
                if pos + 1 < bytes.len() && bytes[pos + 1] == b'\n' {
                    pos += 1;
                }
                true
            }
            b'\n' => true,
            _ => false,
        };

        if is_newline {
            newline_run += 1;
            // at most two consecutive newlines survive
            if newline_run <= 2 {
                text.push(b'\n');
            }
        } else {
            newline_run = 0;
            text.push(b);
        }
        pos += 1;
    }

    // Only ASCII bytes were rewritten, so UTF-8 validity is preserved.
    let text = String::from_utf8(text).unwrap_or_default();
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), vec![""]);
    }

    #[test]
    fn test_single_line() {
        assert_eq!(normalize("hello"), vec!["hello"]);
    }

    #[test]
    fn test_crlf() {
        assert_eq!(normalize("a\r\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_bare_cr() {
        assert_eq!(normalize("a\rb"), vec!["a", "b"]);
    }

    #[test]
    fn test_blank_run_collapses() {
        assert_eq!(normalize("a\n\n\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_single_blank_kept() {
        assert_eq!(normalize("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_mixed_line_endings() {
        assert_eq!(normalize("a\r\n\r\rb\nc"), vec!["a", "", "b", "c"]);
    }

    #[test]
    fn test_trailing_newline() {
        assert_eq!(normalize("a\n"), vec!["a", ""]);
    }

    #[test]
    fn test_whitespace_lines_not_collapsed() {
        // A line of spaces is not a newline run; it survives as its own line.
        assert_eq!(normalize("a\n  \n\nb"), vec!["a", "  ", "", "b"]);
    }

    #[test]
    fn test_unicode_passthrough() {
        assert_eq!(normalize("héllo\r\nwörld"), vec!["héllo", "wörld"]);
    }
}
