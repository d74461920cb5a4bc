//! Listing queries - search, tag filter, ordering and pagination

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::content::Post;

/// Default page size when none is configured
pub const DEFAULT_LIMIT: usize = 10;

/// A validated listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Case-insensitive substring over title, description and tags
    pub search: Option<String>,
    /// Case-insensitive exact tag
    pub tag: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            tag: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Raw listing parameters as they arrive from a query string.
///
/// Everything is a string so that bad numbers fall back to defaults instead
/// of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListParams {
    /// Read parameters from a raw query string. The first occurrence of a
    /// repeated key wins; an undecodable string yields no parameters.
    pub fn from_query_string(raw: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw).unwrap_or_default();

        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "search" => &mut params.search,
                "tag" => &mut params.tag,
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }

    /// Resolve into a query; empty filters are dropped and unparseable or
    /// negative numbers use the defaults
    pub fn into_query(self, default_limit: usize) -> ListQuery {
        ListQuery {
            search: non_empty(self.search),
            tag: non_empty(self.tag),
            limit: parse_count(self.limit.as_deref()).unwrap_or(default_limit),
            offset: parse_count(self.offset.as_deref()).unwrap_or(0),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_count(value: Option<&str>) -> Option<usize> {
    value.and_then(|v| v.trim().parse::<usize>().ok())
}

/// One page of listing results
#[derive(Debug, Clone, Serialize)]
pub struct ListPage {
    pub posts: Vec<Post>,
    /// Matching posts before pagination
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl ListPage {
    pub fn empty(query: &ListQuery) -> Self {
        Self {
            posts: Vec::new(),
            total: 0,
            limit: query.limit,
            offset: query.offset,
        }
    }
}

/// Filter, sort and paginate `posts`.
///
/// Unpublished posts are always dropped. Posts with equal dates keep their
/// input order.
pub fn run(posts: Vec<Post>, query: &ListQuery) -> ListPage {
    let needle = query.search.as_ref().map(|s| s.to_lowercase());

    let mut matching: Vec<Post> = posts
        .into_iter()
        .filter(|post| post.published)
        .filter(|post| needle.as_deref().map_or(true, |n| post.matches_search(n)))
        .filter(|post| query.tag.as_deref().map_or(true, |t| post.has_tag(t)))
        .collect();

    // Vec::sort_by is stable
    matching.sort_by(|a, b| b.date.cmp(&a.date));

    let total = matching.len();
    let posts = matching
        .into_iter()
        .skip(query.offset)
        .take(query.limit)
        .map(Post::into_listing)
        .collect();

    ListPage {
        posts,
        total,
        limit: query.limit,
        offset: query.offset,
    }
}

/// A tag and the number of published posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Count tags over published posts, most used first, ties by name.
///
/// Tags differing only in case are one tag, shown with the first spelling
/// seen.
pub fn tag_summary(posts: &[Post]) -> Vec<TagCount> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tags: Vec<TagCount> = Vec::new();

    for post in posts.iter().filter(|p| p.published) {
        for tag in &post.tags {
            let at = *index.entry(tag.to_lowercase()).or_insert_with(|| {
                tags.push(TagCount {
                    name: tag.clone(),
                    count: 0,
                });
                tags.len() - 1
            });
            tags[at].count += 1;
        }
    }

    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    tags
}
