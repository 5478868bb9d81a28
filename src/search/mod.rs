//! Section indexing and query matching over parsed documents.
//!
//! The indexer walks each document's token sequence, keeps only the
//! tokens worth presenting (second- to fourth-level headings and
//! paragraphs), merges paragraph runs, and derives one match record per
//! query hit: the matched section's title, its enclosing second-level
//! heading as breadcrumb, and nearby description text.

pub mod scan;

use serde::Serialize;

use crate::escape;
use crate::Options;

use scan::TokenKind;

/// A named document paired with its fully transformed token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub tokens: Vec<String>,
}

impl Document {
    /// Wrap an already-parsed token sequence.
    pub fn new(name: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            name: name.into(),
            tokens,
        }
    }

    /// Run the full pipeline over raw markdown.
    pub fn parse(name: impl Into<String>, raw: &str, options: &Options) -> Self {
        Self::new(name, crate::to_tokens_with_options(raw, options))
    }
}

/// One accepted query hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Name of the document the hit came from.
    pub source: String,
    /// Enclosing second-level heading, tag-stripped, ordinal prefix removed.
    pub breadcrumb: String,
    /// Nearest enclosing heading (the heading itself for heading hits).
    pub title: String,
    /// Description text for the matched section.
    pub description: String,
    /// Tag-stripped title text used as the intra-page link fragment.
    pub anchor: String,
}

impl MatchRecord {
    /// Link target for the presentation layer: `/<source>/#<anchor>`.
    pub fn href(&self) -> String {
        format!("/{}/#{}", self.source, self.anchor)
    }

    /// Breadcrumb line for the presentation layer: `<source> > <breadcrumb>`.
    pub fn route(&self) -> String {
        format!("{} > {}", self.source, self.breadcrumb)
    }
}

/// Ordered match records plus the accepted count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct SearchResults {
    pub records: Vec<MatchRecord>,
    pub total: usize,
}

/// Find every match for `query` across `documents`, in discovery order.
///
/// Matching is a case-insensitive substring test against each token's
/// visible text. An empty query matches nothing. Records whose derived
/// title equals the immediately preceding accepted title are suppressed;
/// the comparison carries across document boundaries.
pub fn search(documents: &[Document], query: &str) -> SearchResults {
    if query.is_empty() {
        return SearchResults::default();
    }
    let needle = query.to_lowercase();

    let mut records = Vec::new();
    let mut previous_title: Option<String> = None;

    for document in documents {
        let tokens = index_tokens(&document.tokens);
        for (idx, token) in tokens.iter().enumerate() {
            let visible = escape::plain_text(token);
            if !visible.to_lowercase().contains(&needle) {
                continue;
            }

            let hit = derive_hit(&tokens, idx);
            let title = escape::plain_text(&hit.title_markup);
            let accepted = previous_title.as_deref() != Some(title.as_str());
            previous_title = Some(title.clone());
            if !accepted {
                continue;
            }

            records.push(MatchRecord {
                source: document.name.clone(),
                breadcrumb: strip_ordinal_prefix(&escape::plain_text(&hit.breadcrumb_markup)),
                anchor: escape::strip_tags(&hit.title_markup),
                description: escape::plain_text(&hit.description_markup),
                title,
            });
        }
    }

    SearchResults {
        total: records.len(),
        records,
    }
}

/// Raw markup pieces of one hit before tag stripping.
struct Hit {
    title_markup: String,
    breadcrumb_markup: String,
    description_markup: String,
}

/// Reconstruct title/breadcrumb/description for the token at `idx`.
fn derive_hit(tokens: &[String], idx: usize) -> Hit {
    let token = &tokens[idx];
    let take = |found: Option<usize>| -> String {
        found.map(|i| tokens[i].clone()).unwrap_or_default()
    };

    match scan::kind_of(token) {
        TokenKind::SectionHeading => Hit {
            title_markup: token.clone(),
            breadcrumb_markup: token.clone(),
            description_markup: take(scan::next_paragraph_in_section(tokens, idx)),
        },
        TokenKind::SubHeading => Hit {
            title_markup: token.clone(),
            breadcrumb_markup: take(scan::prev_section_heading(tokens, idx)),
            description_markup: take(scan::next_paragraph(tokens, idx)),
        },
        // Paragraph (and, defensively, anything else that slipped through)
        _ => {
            let title_idx = scan::prev_heading(tokens, idx);
            let breadcrumb_markup = match title_idx {
                Some(i) if scan::kind_of(&tokens[i]) == TokenKind::SectionHeading => {
                    tokens[i].clone()
                }
                // a subheading title: keep scanning backward past it
                Some(i) => take(scan::prev_section_heading(tokens, i)),
                None => String::new(),
            };
            Hit {
                title_markup: take(title_idx),
                breadcrumb_markup,
                description_markup: token.clone(),
            }
        }
    }
}

/// Restrict a document's tokens to the indexable kinds and merge runs of
/// consecutive paragraphs into a single combined token.
fn index_tokens(tokens: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut in_paragraph_run = false;
    for token in tokens {
        match scan::kind_of(token) {
            TokenKind::Other => continue,
            TokenKind::Paragraph => {
                if in_paragraph_run {
                    if let Some(last) = out.last_mut() {
                        last.push_str(token);
                    }
                } else {
                    out.push(token.clone());
                }
                in_paragraph_run = true;
            }
            _ => {
                out.push(token.clone());
                in_paragraph_run = false;
            }
        }
    }
    out
}

/// Strip a leading `<digits>.` ordinal prefix from breadcrumb text.
fn strip_ordinal_prefix(s: &str) -> String {
    let trimmed = s.trim_start();
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && trimmed.as_bytes().get(digits) == Some(&b'.') {
        trimmed[digits + 1..].trim_start().to_string()
    } else {
        s.to_string()
    }
}
