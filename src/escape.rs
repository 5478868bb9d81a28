//! Entity escaping and plain-text extraction.
//!
//! Fast-path optimized: scans for the first escapable character,
//! then bulk-copies segments between escapes.

use memchr::memchr3;

/// Escape one line of code-block content.
///
/// Angle brackets and spaces are replaced with their entity equivalents
/// so the block's literal content is not interpreted as markup and its
/// indentation survives rendering.
///
/// # Example
/// ```
/// let escaped = marksift::escape::escape_code_line("if a < b {");
/// assert_eq!(escaped, "if&nbsp;a&nbsp;&#60;&nbsp;b&nbsp;{");
/// ```
pub fn escape_code_line(line: &str) -> String {
    let input = line.as_bytes();
    let mut pos = match memchr3(b'<', b'>', b' ', input) {
        Some(p) => p,
        None => return line.to_string(),
    };

    let mut out = Vec::with_capacity(input.len() + input.len() / 2);
    out.extend_from_slice(&input[..pos]);

    while pos < input.len() {
        let scan_start = pos;
        while pos < input.len() && !matches!(input[pos], b'<' | b'>' | b' ') {
            pos += 1;
        }
        if pos > scan_start {
            out.extend_from_slice(&input[scan_start..pos]);
        }
        if pos < input.len() {
            let escape_seq = match input[pos] {
                b'<' => b"&#60;" as &[u8],
                b'>' => b"&#62;",
                b' ' => b"&nbsp;",
                _ => unreachable!(),
            };
            out.extend_from_slice(escape_seq);
            pos += 1;
        }
    }

    // Only ASCII was rewritten, so UTF-8 validity is preserved.
    String::from_utf8(out).unwrap_or_default()
}

/// Strip markup tags from a token, keeping only its visible text.
///
/// A tag is `<`, at least one non-`>` character, then `>`; an
/// unterminated tag at the end of the token is stripped to the end. A
/// bare `<>` is not a tag and stays literal.
pub fn strip_tags(s: &str) -> String {
    let input = s.as_bytes();
    let mut out = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        let b = input[pos];
        if b == b'<' && pos + 1 < input.len() && input[pos + 1] != b'>' {
            // consume through the closing '>' or to end of token
            pos += 2;
            while pos < input.len() && input[pos] != b'>' {
                pos += 1;
            }
            if pos < input.len() {
                pos += 1; // the '>'
            }
        } else {
            out.push(b);
            pos += 1;
        }
    }

    String::from_utf8(out).unwrap_or_default()
}

/// Decode HTML character entities into plain characters.
pub fn decode_entities(s: &str) -> String {
    html_escape::decode_html_entities(s).into_owned()
}

/// Visible text of a token: tags stripped, entities decoded.
pub fn plain_text(s: &str) -> String {
    decode_entities(&strip_tags(s))
}
