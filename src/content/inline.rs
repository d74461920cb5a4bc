//! Inline span parsing for paragraph lines
//!
//! Substitutions run as ordered passes over the output of the previous pass:
//! math `$…$`, bold `**…**`, italic `*…*`, then links `[text](url)`. Every
//! pass scans leftmost-first and never overlaps its own matches, so bold is
//! always claimed before a single `*` can pair up inside it.

use serde::Serialize;

/// A span inside a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Code(String),
    /// `$…$` span, kept literal
    Math(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Link { label: Vec<Inline>, href: String },
}

/// Parse a paragraph line with math, emphasis and link substitution
pub fn parse_inline(line: &str) -> Vec<Inline> {
    let mut nodes = vec![Inline::Text(line.to_string())];
    for pass in [Pass::Math, Pass::Strong, Pass::Emphasis, Pass::Link] {
        nodes = pass.apply(nodes);
    }
    nodes
}

/// Split a line on backticks: odd segments are code, even segments text.
/// No other substitution applies to such lines.
pub fn split_code_spans(line: &str) -> Vec<Inline> {
    line.split('`')
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            if i % 2 == 1 {
                Inline::Code(part.to_string())
            } else {
                Inline::Text(part.to_string())
            }
        })
        .collect()
}

/// Flattened view of a span list: text is exploded into characters so the
/// delimiters can be matched, earlier matches stay as opaque nodes
#[derive(Debug, Clone)]
enum Piece {
    Char(char),
    Node(Inline),
}

#[derive(Debug, Clone, Copy)]
enum Pass {
    Math,
    Strong,
    Emphasis,
    Link,
}

impl Pass {
    fn apply(self, nodes: Vec<Inline>) -> Vec<Inline> {
        let pieces: Vec<Piece> = nodes
            .into_iter()
            .flat_map(|node| match node {
                Inline::Text(text) => text.chars().map(Piece::Char).collect::<Vec<_>>(),
                Inline::Strong(children) => vec![Piece::Node(Inline::Strong(self.apply(children)))],
                Inline::Emphasis(children) => {
                    vec![Piece::Node(Inline::Emphasis(self.apply(children)))]
                }
                other => vec![Piece::Node(other)],
            })
            .collect();

        let mut out = Vec::with_capacity(pieces.len());
        let mut i = 0;
        while i < pieces.len() {
            match self.match_at(&pieces, i) {
                Some((end, node)) => {
                    out.push(Piece::Node(node));
                    i = end;
                }
                None => {
                    out.push(pieces[i].clone());
                    i += 1;
                }
            }
        }
        from_pieces(out)
    }

    /// Try to match this pass's construct starting at `start`.
    /// Returns the index one past the match and the produced span.
    fn match_at(self, pieces: &[Piece], start: usize) -> Option<(usize, Inline)> {
        match self {
            Pass::Math => {
                let (open, close) = delimited(pieces, start, "$", '$')?;
                let text = collect_text(&pieces[open..close])?;
                Some((close + 1, Inline::Math(text)))
            }
            Pass::Strong => {
                let (open, close) = delimited(pieces, start, "**", '*')?;
                let children = from_pieces(pieces[open..close].to_vec());
                Some((close + 2, Inline::Strong(children)))
            }
            Pass::Emphasis => {
                let (open, close) = delimited(pieces, start, "*", '*')?;
                let children = from_pieces(pieces[open..close].to_vec());
                Some((close + 1, Inline::Emphasis(children)))
            }
            Pass::Link => {
                let label_start = start + expect(pieces, start, "[")?;
                let label_end = scan_until(pieces, label_start, ']');
                if label_end == label_start {
                    return None;
                }
                let href_start = label_end + expect(pieces, label_end, "](")?;
                let href_end = scan_until(pieces, href_start, ')');
                if href_end == href_start {
                    return None;
                }
                expect(pieces, href_end, ")")?;
                let href = collect_text(&pieces[href_start..href_end])?;
                let label = from_pieces(pieces[label_start..label_end].to_vec());
                Some((href_end + 1, Inline::Link { label, href }))
            }
        }
    }
}

/// Match `delim content delim` at `start`, where content is non-empty and
/// holds no `stop` character. Returns the content range.
fn delimited(pieces: &[Piece], start: usize, delim: &str, stop: char) -> Option<(usize, usize)> {
    let open = start + expect(pieces, start, delim)?;
    let close = scan_until(pieces, open, stop);
    if close == open {
        return None;
    }
    expect(pieces, close, delim)?;
    Some((open, close))
}

/// Length of `literal` if the pieces at `at` spell it out
fn expect(pieces: &[Piece], at: usize, literal: &str) -> Option<usize> {
    let mut len = 0;
    for (k, expected) in literal.chars().enumerate() {
        match pieces.get(at + k) {
            Some(Piece::Char(c)) if *c == expected => len += 1,
            _ => return None,
        }
    }
    Some(len)
}

/// Index of the first `stop` character at or after `from`, or the end
fn scan_until(pieces: &[Piece], from: usize, stop: char) -> usize {
    pieces[from.min(pieces.len())..]
        .iter()
        .position(|p| matches!(p, Piece::Char(c) if *c == stop))
        .map_or(pieces.len(), |pos| from + pos)
}

/// Plain text of a piece run, `None` if it contains a span
fn collect_text(pieces: &[Piece]) -> Option<String> {
    pieces
        .iter()
        .map(|p| match p {
            Piece::Char(c) => Some(*c),
            Piece::Node(_) => None,
        })
        .collect()
}

fn from_pieces(pieces: Vec<Piece>) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut text = String::new();
    for piece in pieces {
        match piece {
            Piece::Char(c) => text.push(c),
            Piece::Node(node) => {
                if !text.is_empty() {
                    nodes.push(Inline::Text(std::mem::take(&mut text)));
                }
                nodes.push(node);
            }
        }
    }
    if !text.is_empty() {
        nodes.push(Inline::Text(text));
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_bold_leaves_no_asterisks() {
        let spans = parse_inline("This is **bold** text");
        assert_eq!(
            spans,
            vec![
                text("This is "),
                Inline::Strong(vec![text("bold")]),
                text(" text"),
            ]
        );
    }

    #[test]
    fn test_bold_before_italic() {
        let spans = parse_inline("**strong** and *soft*");
        assert_eq!(
            spans,
            vec![
                Inline::Strong(vec![text("strong")]),
                text(" and "),
                Inline::Emphasis(vec![text("soft")]),
            ]
        );
    }

    #[test]
    fn test_math_is_atomic() {
        let spans = parse_inline("Solve $a*b*c$ now");
        assert_eq!(
            spans,
            vec![text("Solve "), Inline::Math("a*b*c".to_string()), text(" now")]
        );
    }

    #[test]
    fn test_link() {
        let spans = parse_inline("See [the docs](https://example.com/x).");
        assert_eq!(
            spans,
            vec![
                text("See "),
                Inline::Link {
                    label: vec![text("the docs")],
                    href: "https://example.com/x".to_string(),
                },
                text("."),
            ]
        );
    }

    #[test]
    fn test_link_inside_bold() {
        let spans = parse_inline("**[a](b)**");
        assert_eq!(
            spans,
            vec![Inline::Strong(vec![Inline::Link {
                label: vec![text("a")],
                href: "b".to_string(),
            }])]
        );
    }

    #[test]
    fn test_emphasis_label_in_link() {
        let spans = parse_inline("[*x*](u)");
        assert_eq!(
            spans,
            vec![Inline::Link {
                label: vec![Inline::Emphasis(vec![text("x")])],
                href: "u".to_string(),
            }]
        );
    }

    #[test]
    fn test_unbalanced_delimiters_stay_literal() {
        assert_eq!(parse_inline("2 * 3 = 6"), vec![text("2 * 3 = 6")]);
        assert_eq!(parse_inline("costs $5"), vec![text("costs $5")]);
        assert_eq!(parse_inline("[no link]"), vec![text("[no link]")]);
        assert_eq!(
            parse_inline("**a*"),
            vec![text("*"), Inline::Emphasis(vec![text("a")])]
        );
    }

    #[test]
    fn test_split_code_spans() {
        let spans = split_code_spans("Run `cargo build` then `ls`");
        assert_eq!(
            spans,
            vec![
                text("Run "),
                Inline::Code("cargo build".to_string()),
                text(" then "),
                Inline::Code("ls".to_string()),
            ]
        );
    }

    #[test]
    fn test_code_span_text_is_not_substituted() {
        let spans = split_code_spans("`x` is **not** bold");
        assert_eq!(
            spans,
            vec![Inline::Code("x".to_string()), text(" is **not** bold")]
        );
    }
}
