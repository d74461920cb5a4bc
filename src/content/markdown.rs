//! Line-oriented markup renderer
//!
//! This is deliberately not a CommonMark parser. Each line of a post body is
//! classified on its own into one block, except inside fenced code where lines
//! are collected verbatim until the closing fence.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::inline::{parse_inline, split_code_spans, Inline};

lazy_static! {
    /// A stray metadata block left at the very top of a body
    static ref LEADING_FRONT_MATTER: Regex = Regex::new(r"^---(?s:.*?)---").unwrap();
}

const FENCE: &str = "```";

/// A rendered block, keyed by the line that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Zero-based line index; the closing fence line for code blocks
    pub key: usize,
    #[serde(flatten)]
    pub kind: BlockKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Heading { level: u8, text: String },
    Paragraph { inlines: Vec<Inline> },
    Quote { text: String },
    Code { language: Option<String>, code: String },
    /// Vertical space for a blank line
    Spacer,
}

/// Scanner state, switched by fence lines only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    InCodeBlock,
}

impl Mode {
    /// Mode after reading `line`
    pub fn next(self, line: &str) -> Mode {
        match (self, is_fence(line)) {
            (Mode::Normal, true) => Mode::InCodeBlock,
            (Mode::InCodeBlock, true) => Mode::Normal,
            (mode, false) => mode,
        }
    }
}

fn is_fence(line: &str) -> bool {
    line.starts_with(FENCE)
}

/// Render a post body into blocks.
///
/// An unterminated code fence is flushed as a final code block.
pub fn render(body: &str) -> Vec<Block> {
    let body = LEADING_FRONT_MATTER.replace(body, "");
    let body = body.trim();

    let mut blocks = Vec::new();
    let mut mode = Mode::Normal;
    let mut language: Option<String> = None;
    let mut code_lines: Vec<&str> = Vec::new();
    let mut last_index = 0;

    for (index, line) in body.lines().enumerate() {
        last_index = index;
        let next = mode.next(line);
        match (mode, next) {
            (Mode::Normal, Mode::InCodeBlock) => {
                let tag = line[FENCE.len()..].trim();
                language = (!tag.is_empty()).then(|| tag.to_string());
                code_lines.clear();
            }
            (Mode::InCodeBlock, Mode::Normal) => {
                blocks.push(code_block(index, language.take(), &code_lines));
                code_lines.clear();
            }
            (Mode::InCodeBlock, Mode::InCodeBlock) => code_lines.push(line),
            (Mode::Normal, Mode::Normal) => blocks.push(Block {
                key: index,
                kind: classify_line(line),
            }),
        }
        mode = next;
    }

    if mode == Mode::InCodeBlock {
        tracing::debug!("Unterminated code fence, flushing {} lines", code_lines.len());
        blocks.push(code_block(last_index, language, &code_lines));
    }

    blocks
}

fn code_block(key: usize, language: Option<String>, lines: &[&str]) -> Block {
    Block {
        key,
        kind: BlockKind::Code {
            language,
            code: lines.join("\n"),
        },
    }
}

/// Classify a line outside code blocks. Precedence: headings (`###` before
/// `##` before `#`), quotes, lines with inline code, plain paragraphs, blank.
pub fn classify_line(line: &str) -> BlockKind {
    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(text) = line.strip_prefix(prefix) {
            return BlockKind::Heading {
                level,
                text: text.to_string(),
            };
        }
    }

    if let Some(text) = line.strip_prefix("> ") {
        return BlockKind::Quote {
            text: text.to_string(),
        };
    }

    if line.trim().is_empty() {
        return BlockKind::Spacer;
    }

    if line.contains('`') {
        return BlockKind::Paragraph {
            inlines: split_code_spans(line),
        };
    }

    BlockKind::Paragraph {
        inlines: parse_inline(line),
    }
}
