//! URL helpers for the HTML pages

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

use crate::query::ListQuery;

/// Unreserved characters stay readable
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a URL path segment
pub fn encode_url(path: &str) -> String {
    percent_encoding::utf8_percent_encode(path, SEGMENT).to_string()
}

/// Article page for a slug
pub fn post_url(slug: &str) -> String {
    format!("/blog/{}", encode_url(slug))
}

/// Blog index for `query`, starting at `offset`
///
/// Defaults are left out so the plain index stays at `/blog`.
pub fn index_url(query: &ListQuery, default_limit: usize, offset: usize) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if let Some(search) = &query.search {
        pairs.push(("search", search.clone()));
    }
    if let Some(tag) = &query.tag {
        pairs.push(("tag", tag.clone()));
    }
    if query.limit != default_limit {
        pairs.push(("limit", query.limit.to_string()));
    }
    if offset > 0 {
        pairs.push(("offset", offset.to_string()));
    }

    match serde_urlencoded::to_string(&pairs) {
        Ok(qs) if !qs.is_empty() => format!("/blog?{}", qs),
        _ => "/blog".to_string(),
    }
}

/// Blog index filtered to one tag
pub fn tag_url(tag: &str) -> String {
    let query = ListQuery {
        tag: Some(tag.to_string()),
        ..Default::default()
    };
    index_url(&query, query.limit, 0)
}
