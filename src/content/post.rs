//! Post model

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::FrontMatter;
use crate::helpers::{format_date, read_time_label};

/// Defaults applied while normalizing front-matter into a [`Post`]
#[derive(Debug, Clone)]
pub struct Normalization<'a> {
    /// Author used when neither `author` nor `authors` is set
    pub default_author: &'a str,
    /// strftime pattern for the display date
    pub date_format: &'a str,
    pub words_per_minute: usize,
    /// Timestamp used when the front-matter carries no usable date
    pub now: DateTime<Utc>,
}

/// A blog post
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// File name without extension, the lookup key
    pub slug: String,

    pub title: String,

    pub description: String,

    /// Publication timestamp, the only sort key
    #[serde(rename = "timestamp")]
    pub date: DateTime<Utc>,

    /// Long-form projection of `date`, e.g. "July 1, 2022"
    #[serde(rename = "date")]
    pub display_date: String,

    pub author: String,

    /// Tags in source order, duplicates kept
    pub tags: Vec<String>,

    pub published: bool,

    /// Estimated reading time in minutes
    pub read_minutes: usize,

    /// Reading time label, e.g. "2 min read"
    pub read_time: String,

    /// Whether listings should carry the body
    #[serde(skip)]
    pub include_content: bool,

    /// Raw body (detail projection, or listings when `include_content` is set)
    #[serde(rename = "content", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Post {
    /// Build a post from parsed front-matter, resolving every field's
    /// fallback chain in one place
    pub fn from_front_matter(slug: &str, fm: FrontMatter, body: &str, opts: &Normalization) -> Self {
        let date = resolve_date(slug, &fm, opts.now);
        let read_minutes = estimate_read_minutes(body, opts.words_per_minute);

        Self {
            slug: slug.to_string(),
            title: resolve_title(slug, fm.title),
            description: resolve_description(fm.description, fm.summary),
            display_date: format_date(&date, opts.date_format),
            date,
            author: resolve_author(fm.author, fm.authors, opts.default_author),
            tags: fm.tags,
            published: fm.published,
            read_minutes,
            read_time: read_time_label(read_minutes),
            include_content: fm.include_content,
            body: Some(body.to_string()),
        }
    }

    /// Listing projection: drops the body unless the post opted in
    pub fn into_listing(mut self) -> Self {
        if !self.include_content {
            self.body = None;
        }
        self
    }

    /// Case-insensitive substring match on title, description or any tag.
    /// `needle` must already be lowercase.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// Case-insensitive exact match against any tag
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

fn resolve_title(slug: &str, title: Option<String>) -> String {
    title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| slug.to_string())
}

fn resolve_description(description: Option<String>, summary: Option<String>) -> String {
    description
        .filter(|d| !d.is_empty())
        .or(summary)
        .unwrap_or_default()
}

fn resolve_author(author: Option<String>, authors: Vec<String>, default_author: &str) -> String {
    author
        .filter(|a| !a.is_empty())
        .or_else(|| authors.into_iter().next().filter(|a| !a.is_empty()))
        .unwrap_or_else(|| default_author.to_string())
}

fn resolve_date(slug: &str, fm: &FrontMatter, now: DateTime<Utc>) -> DateTime<Utc> {
    match (&fm.date, fm.parse_date()) {
        (_, Some(date)) => date,
        (Some(raw), None) => {
            tracing::warn!("Unparseable date {:?} in post {}, using current time", raw, slug);
            now
        }
        (None, None) => now,
    }
}

/// Minutes needed to read `body`, rounded up. An empty body reads in 0.
pub fn estimate_read_minutes(body: &str, words_per_minute: usize) -> usize {
    let words = body.split_whitespace().count();
    words.div_ceil(words_per_minute.max(1))
}
