//! Block-level pass: the stateful per-line fold.
//!
//! Lines are classified by the rule table and emitted as one markup
//! string per input line. Cross-line structure (open code blocks, an
//! open table, nested lists) lives in the parser state; closing tags
//! that belong to already-emitted structure are appended to the
//! previous output token, since a single line can only append to itself
//! or the line before it.

pub mod rule;

use smallvec::SmallVec;

use crate::escape;
use crate::Options;

use rule::BlockKind;

/// Block parser state for one document.
pub struct BlockParser<'a> {
    options: &'a Options,
    /// Output tokens, one per consumed line; empties are dropped at the end.
    tokens: Vec<String>,
    /// Token index of the opening fence while a code block is open.
    code_open: Option<usize>,
    /// Inside a fenced block tagged `editor`: content passes unescaped.
    editor: bool,
    table_open: bool,
    /// Tracked indentation width of the innermost open list item.
    list_depth: Option<usize>,
    /// Closing tags for every open list container and item, innermost last.
    list_stack: SmallVec<[&'static str; 8]>,
}

impl<'a> BlockParser<'a> {
    /// Create a parser for one document.
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            tokens: Vec::new(),
            code_open: None,
            editor: false,
            table_open: false,
            list_depth: None,
            list_stack: SmallVec::new(),
        }
    }

    /// Run the block pass over normalized lines.
    ///
    /// Consumes the parser: state never leaks between documents.
    /// Unterminated constructs at end of input are not force-closed.
    pub fn parse(mut self, lines: &[String]) -> Vec<String> {
        for line in lines {
            self.feed(line);
        }
        self.tokens.retain(|token| !token.is_empty());
        self.tokens
    }

    fn feed(&mut self, line: &str) {
        if self.code_open.is_some() {
            self.code_line(line);
            return;
        }

        let kind = rule::classify(line);
        let token = match kind {
            BlockKind::CodeFenceStart => {
                self.code_open = Some(self.tokens.len());
                if rule::fence_info(line) == "editor" {
                    // control-only line; its visible content is dropped
                    self.editor = true;
                    String::new()
                } else {
                    rule::render(line, kind, self.options)
                }
            }
            BlockKind::UnorderedItem | BlockKind::OrderedItem => self.list_item(line, kind),
            BlockKind::TableRow => {
                let row = rule::render(line, kind, self.options);
                if self.table_open {
                    row
                } else {
                    self.table_open = true;
                    format!("<table>{}", promote_header_cells(&row))
                }
            }
            _ => {
                let token = rule::render(line, kind, self.options);
                if kind == BlockKind::Paragraph && line.trim().is_empty() {
                    self.blank_line();
                }
                token
            }
        };
        self.tokens.push(token);
    }

    /// A list item outside a code block. Depth transitions close or open
    /// containers; the new item's own closing tag stays pending on the
    /// stack until the next transition or blank line.
    fn list_item(&mut self, line: &str, kind: BlockKind) -> String {
        let (container_open, container_close) = match kind {
            BlockKind::OrderedItem => ("<ol>", "</ol>"),
            _ => ("<ul>", "</ul>"),
        };
        let depth = rule::list_depth(line);
        let mut token = rule::render(line, kind, self.options);

        match self.list_depth {
            Some(current) if depth < current => {
                // Close one container of the active kind per two columns,
                // then the item that finished at the target depth.
                let mut remaining = (current - depth) / 2;
                while remaining > 0 {
                    let Some(tag) = self.list_stack.pop() else {
                        break;
                    };
                    self.append_to_previous(tag);
                    if tag == container_close {
                        remaining -= 1;
                    }
                }
                if let Some(tag) = self.list_stack.pop() {
                    self.append_to_previous(tag);
                }
            }
            Some(current) if depth == current => {
                if let Some(tag) = self.list_stack.pop() {
                    self.append_to_previous(tag);
                }
            }
            // deeper than the current item, or no list open at all
            _ => {
                token = format!("{container_open}{token}");
                self.list_stack.push(container_close);
            }
        }

        self.list_depth = Some(depth);
        self.list_stack.push("</li>");
        token
    }

    /// Blank line outside a code block: drain every open list level,
    /// close an open table, and leave editor mode.
    fn blank_line(&mut self) {
        while let Some(tag) = self.list_stack.pop() {
            self.append_to_previous(tag);
        }
        self.list_depth = None;
        if self.table_open {
            self.append_to_previous("</table>");
            self.table_open = false;
        }
        self.editor = false;
    }

    /// A line inside an open code block.
    fn code_line(&mut self, line: &str) {
        let token = if rule::is_closing_fence(line) {
            self.code_open = None;
            self.editor = false;
            rule::render_fence_close(line)
        } else if line.trim().is_empty() {
            // placeholder keeps vertical spacing inside the block
            "\n\n".to_string()
        } else {
            let mut token = if self.editor {
                line.to_string()
            } else {
                escape::escape_code_line(line)
            };
            token.push('\n');
            token
        };
        self.tokens.push(token);
    }

    fn append_to_previous(&mut self, tag: &str) {
        if let Some(previous) = self.tokens.last_mut() {
            previous.push_str(tag);
        }
    }
}

/// The first row of a table run becomes the header row.
fn promote_header_cells(row: &str) -> String {
    row.replace("<td>", "<th>").replace("</td>", "</th>")
}
