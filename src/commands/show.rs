//! Print a single rendered post

use anyhow::Result;

use crate::content::{render, BlockKind, Inline};
use crate::helpers::article_page;
use crate::Folio;

/// Print the post stored under `slug`, as HTML or as plain text
pub fn run(folio: &Folio, slug: &str, html: bool) -> Result<()> {
    let Some(post) = folio.find_post(slug) else {
        anyhow::bail!("Post not found: {}", slug);
    };
    let blocks = render(post.body.as_deref().unwrap_or_default());

    if html {
        print!("{}", article_page(&folio.config.title, &post, &blocks));
        return Ok(());
    }

    println!("{}", post.title);
    println!("{} by {} · {}", post.display_date, post.author, post.read_time);
    if !post.tags.is_empty() {
        println!("[{}]", post.tags.join(", "));
    }
    println!();

    for block in &blocks {
        match &block.kind {
            BlockKind::Heading { level, text } => {
                println!("{} {}", "#".repeat(*level as usize), text)
            }
            BlockKind::Paragraph { inlines } => println!("{}", plain_text(inlines)),
            BlockKind::Quote { text } => println!("  │ {}", text),
            BlockKind::Code { code, .. } => {
                for line in code.lines() {
                    println!("    {}", line);
                }
            }
            BlockKind::Spacer => println!(),
        }
    }

    Ok(())
}

/// Flatten spans to terminal text; links keep their target in parentheses
pub fn plain_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) | Inline::Code(text) | Inline::Math(text) => text.clone(),
            Inline::Strong(children) | Inline::Emphasis(children) => plain_text(children),
            Inline::Link { label, href } => format!("{} ({})", plain_text(label), href),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::inline::parse_inline;

    #[test]
    fn test_plain_text() {
        let spans = parse_inline("**Read** the [guide](https://x.io) on $O(n)$");
        assert_eq!(plain_text(&spans), "Read the guide (https://x.io) on O(n)");
    }
}
