//! Inline substitution pass.
//!
//! Runs over every token the block pass emitted, code-block content
//! included, in a fixed order: links, then bold emphasis, then inline
//! code. Each substitution is a hand-rolled scan; emphasis does not
//! nest and no markdown escaping is recognized.

use memchr::memchr;

/// Apply all inline substitutions to one token.
pub fn transform(token: &str) -> String {
    replace_code(&replace_strong(&replace_links(token)))
}

/// Apply the inline pass to every token in place.
pub fn transform_all(tokens: &mut [String]) {
    for token in tokens {
        let replaced = transform(token);
        if replaced != *token {
            *token = replaced;
        }
    }
}

/// `[text](url)` → `<a href="url">text</a>`.
///
/// The scan is greedy: text runs from a `[` to the last `](` that still
/// leaves a non-empty url ending at the last `)` after it. Adjacent
/// links on one line therefore collapse into a single anchor; that
/// matches the rest of the rule table's greedy behavior.
fn replace_links(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;

    while let Some(found) = s[pos..].find('[') {
        let open = pos + found;
        match match_link(&s[open + 1..]) {
            Some(link) => {
                out.push_str(&s[pos..open]);
                out.push_str("<a href=\"");
                out.push_str(link.url);
                out.push_str("\">");
                out.push_str(link.text);
                out.push_str("</a>");
                pos = open + 1 + link.consumed;
            }
            None => {
                out.push_str(&s[pos..open + 1]);
                pos = open + 1;
            }
        }
    }
    out.push_str(&s[pos..]);
    out
}

struct LinkParts<'a> {
    text: &'a str,
    url: &'a str,
    /// Bytes consumed after the opening bracket.
    consumed: usize,
}

/// Match the remainder of a link after its opening `[`.
fn match_link(after: &str) -> Option<LinkParts<'_>> {
    let close = after.rfind(')')?;
    let bytes = after.as_bytes();
    // last "](" that leaves at least one byte of url before the ')'
    let mut sep = None;
    for i in (0..close.saturating_sub(2)).rev() {
        if bytes[i] == b']' && bytes[i + 1] == b'(' {
            sep = Some(i);
            break;
        }
    }
    let sep = sep?;
    if sep == 0 {
        return None; // empty link text
    }
    Some(LinkParts {
        text: &after[..sep],
        url: &after[sep + 2..close],
        consumed: close + 1,
    })
}

/// `**text**` → `<strong>text</strong>`; content may not contain `*`.
fn replace_strong(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut segment_start = 0;
    let mut pos = 0;

    while pos + 1 < bytes.len() {
        if bytes[pos] == b'*' && bytes[pos + 1] == b'*' {
            let content_start = pos + 2;
            let mut end = content_start;
            while end < bytes.len() && bytes[end] != b'*' {
                end += 1;
            }
            if end > content_start && end + 1 < bytes.len() && bytes[end + 1] == b'*' {
                out.push_str(&s[segment_start..pos]);
                out.push_str("<strong>");
                out.push_str(&s[content_start..end]);
                out.push_str("</strong>");
                pos = end + 2;
                segment_start = pos;
                continue;
            }
        }
        pos += 1;
    }
    out.push_str(&s[segment_start..]);
    out
}

/// `` `text` `` → `<code>text</code>`; content may not contain a backtick.
fn replace_code(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut segment_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'`' {
            match memchr(b'`', &bytes[pos + 1..]) {
                Some(0) | None => {
                    // empty span or no closer: the backtick stays literal
                    pos += 1;
                }
                Some(gap) => {
                    let end = pos + 1 + gap;
                    out.push_str(&s[segment_start..pos]);
                    out.push_str("<code>");
                    out.push_str(&s[pos + 1..end]);
                    out.push_str("</code>");
                    pos = end + 1;
                    segment_start = pos;
                }
            }
        } else {
            pos += 1;
        }
    }
    out.push_str(&s[segment_start..]);
    out
}
