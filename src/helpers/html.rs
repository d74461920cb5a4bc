//! HTML helper functions

use crate::content::{Block, BlockKind, Inline, Post};
use crate::query::{ListQuery, TagCount};
use crate::ListResponse;

use super::date::date_xml;
use super::url::{index_url, post_url, tag_url};

/// Tags shown on a post card
const CARD_TAGS: usize = 3;

/// Simple HTML escaping
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate an anchor tag that opens in a new browsing context
///
/// # Examples
/// ```ignore
/// external_link("https://example.com", "Example")
/// // -> <a href="https://example.com" target="_blank" rel="noopener noreferrer">Example</a>
/// ```
pub fn external_link(href: &str, inner_html: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        escape_html(href),
        inner_html
    )
}

/// Render inline spans to HTML
pub fn inlines_to_html(inlines: &[Inline]) -> String {
    let mut html = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => html.push_str(&escape_html(text)),
            Inline::Code(code) => {
                html.push_str(&format!("<code>{}</code>", escape_html(code)));
            }
            Inline::Math(math) => {
                html.push_str(&format!(r#"<span class="math">{}</span>"#, escape_html(math)));
            }
            Inline::Strong(children) => {
                html.push_str(&format!("<strong>{}</strong>", inlines_to_html(children)));
            }
            Inline::Emphasis(children) => {
                html.push_str(&format!("<em>{}</em>", inlines_to_html(children)));
            }
            Inline::Link { label, href } => {
                html.push_str(&external_link(href, &inlines_to_html(label)));
            }
        }
    }
    html
}

/// Render one block to HTML
pub fn block_to_html(block: &Block) -> String {
    match &block.kind {
        BlockKind::Heading { level, text } => {
            format!("<h{level}>{}</h{level}>", escape_html(text))
        }
        BlockKind::Paragraph { inlines } => format!("<p>{}</p>", inlines_to_html(inlines)),
        BlockKind::Quote { text } => format!("<blockquote>{}</blockquote>", escape_html(text)),
        BlockKind::Code { language, code } => match language {
            Some(lang) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(code)
            ),
            None => format!("<pre><code>{}</code></pre>", escape_html(code)),
        },
        BlockKind::Spacer => r#"<div class="spacer"></div>"#.to_string(),
    }
}

/// Render blocks to an HTML fragment, one block per line
pub fn blocks_to_html(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(block_to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

fn tag_links<'a>(tags: impl IntoIterator<Item = &'a String>) -> String {
    tags.into_iter()
        .map(|t| {
            format!(
                r#"<a class="tag" href="{}">{}</a>"#,
                escape_html(&tag_url(t)),
                escape_html(t)
            )
        })
        .collect()
}

fn post_card(post: &Post) -> String {
    format!(
        r#"<article class="card">
<p class="meta"><time datetime="{datetime}">{date}</time> &middot; {read_time}</p>
<h2><a href="{href}">{title}</a></h2>
<div class="tags">{tags}</div>
<p class="description">{description}</p>
</article>"#,
        datetime = date_xml(&post.date),
        date = escape_html(&post.display_date),
        read_time = escape_html(&post.read_time),
        href = escape_html(&post_url(&post.slug)),
        title = escape_html(&post.title),
        tags = tag_links(post.tags.iter().take(CARD_TAGS)),
        description = escape_html(&post.description),
    )
}

/// Blog index: search form, tag cloud and one card per post
pub fn index_page(
    site_title: &str,
    response: &ListResponse,
    query: &ListQuery,
    default_limit: usize,
    tags: &[TagCount],
) -> String {
    let page = &response.page;

    let tag_filter = match &query.tag {
        Some(tag) => format!(
            r#"<input type="hidden" name="tag" value="{}">"#,
            escape_html(tag)
        ),
        None => String::new(),
    };

    let tag_cloud = tags
        .iter()
        .map(|t| {
            format!(
                r#"<a class="tag" href="{}">{} ({})</a>"#,
                escape_html(&tag_url(&t.name)),
                escape_html(&t.name),
                t.count
            )
        })
        .collect::<String>();

    let notice = match &response.error {
        Some(error) => format!(r#"<p class="error">{}</p>"#, escape_html(error)),
        None if page.posts.is_empty() => r#"<p class="empty">No posts found.</p>"#.to_string(),
        None => String::new(),
    };

    let cards = page
        .posts
        .iter()
        .map(post_card)
        .collect::<Vec<_>>()
        .join("\n");

    let mut pager = Vec::new();
    if page.offset > 0 {
        pager.push(format!(
            r#"<a rel="prev" href="{}">Newer posts</a>"#,
            escape_html(&index_url(
                query,
                default_limit,
                page.offset.saturating_sub(page.limit)
            ))
        ));
    }
    if page.offset + page.posts.len() < page.total {
        pager.push(format!(
            r#"<a rel="next" href="{}">Older posts</a>"#,
            escape_html(&index_url(query, default_limit, page.offset + page.limit))
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Blog | {site}</title>
</head>
<body>
<header>
<h1>Blog Posts</h1>
<form method="get" action="/blog">
<input type="search" name="search" placeholder="Search articles..." value="{search}">
{tag_filter}
</form>
<nav class="tags">{tag_cloud}</nav>
</header>
{notice}
<section class="posts">
{cards}
</section>
<nav class="pager">{pager}</nav>
</body>
</html>
"#,
        site = escape_html(site_title),
        search = escape_html(query.search.as_deref().unwrap_or_default()),
        tag_filter = tag_filter,
        tag_cloud = tag_cloud,
        notice = notice,
        cards = cards,
        pager = pager.join(" "),
    )
}

/// Full article page for a post
pub fn article_page(site_title: &str, post: &Post, blocks: &[Block]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | {site}</title>
<meta name="description" content="{description}">
</head>
<body>
<nav><a href="/blog">&larr; Back to blog</a></nav>
<article>
<header>
<h1>{title}</h1>
<p class="meta"><time datetime="{datetime}">{date}</time> by {author} &middot; {read_time}</p>
<p class="description">{description}</p>
<div class="tags">{tags}</div>
</header>
{content}
</article>
</body>
</html>
"#,
        title = escape_html(&post.title),
        site = escape_html(site_title),
        description = escape_html(&post.description),
        datetime = date_xml(&post.date),
        date = escape_html(&post.display_date),
        author = escape_html(&post.author),
        read_time = escape_html(&post.read_time),
        tags = tag_links(&post.tags),
        content = blocks_to_html(blocks),
    )
}

/// Standard not-found page
pub fn not_found_page(site_title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Not Found | {site}</title>
</head>
<body>
<h1>404</h1>
<p>This page could not be found.</p>
<p><a href="/blog">Back to blog</a></p>
</body>
</html>
"#,
        site = escape_html(site_title)
    )
}
