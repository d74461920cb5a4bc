//! List site content

use anyhow::Result;

use crate::query::ListQuery;
use crate::{Folio, ListStatus};

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, query: &ListQuery) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let response = folio.list_posts(query);
            if response.status != ListStatus::Ok {
                anyhow::bail!(
                    "{} ({:?})",
                    response.error.unwrap_or_default(),
                    folio.content_dir
                );
            }

            let page = response.page;
            let end = page.offset + page.posts.len();
            println!(
                "Posts ({}-{} of {}):",
                (page.offset + 1).min(end),
                end,
                page.total
            );
            for post in page.posts {
                println!(
                    "  {} - {} [{}] {}",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug,
                    post.read_time
                );
            }
        }
        "tag" | "tags" => {
            let tags = folio.tag_summary();
            println!("Tags ({}):", tags.len());
            for tag in tags {
                println!("  {} ({})", tag.name, tag.count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}
