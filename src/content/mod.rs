//! Content module - loading, normalizing and rendering posts

mod frontmatter;
pub mod inline;
pub mod loader;
pub mod markdown;
mod post;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use inline::Inline;
pub use markdown::{render, Block, BlockKind};
pub use post::{estimate_read_minutes, Normalization, Post};
