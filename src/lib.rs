//! folio: the blog content pipeline behind a personal portfolio site
//!
//! Posts are flat files with a YAML front-matter header. This crate loads
//! them, answers listing queries (search, tag filter, pagination), resolves
//! single posts by slug and renders post bodies with a small line-oriented
//! markup renderer.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod query;
pub mod server;

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use content::loader::ContentLoader;
use content::Post;
use error::ContentError;
use query::{ListPage, ListQuery, TagCount};

/// Outcome of a listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Ok,
    /// Content directory is missing; an empty page is still a valid answer
    SourceUnavailable,
    /// Anything else went wrong while loading
    Failed,
}

/// Listing response, always renderable
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    #[serde(flatten)]
    pub page: ListPage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub status: ListStatus,
}

impl ListResponse {
    /// Answer `query` from the outcome of loading the content directory
    pub fn from_load(loaded: error::Result<Vec<Post>>, query: &ListQuery) -> Self {
        match loaded {
            Ok(posts) => Self {
                page: query::run(posts, query),
                error: None,
                status: ListStatus::Ok,
            },
            Err(ContentError::SourceUnavailable(dir)) => {
                tracing::warn!("Content directory not found: {:?}", dir);
                Self::degraded(query, "Data directory not found", ListStatus::SourceUnavailable)
            }
            Err(e) => {
                tracing::error!("Error reading blog posts: {}", e);
                Self::failed(query)
            }
        }
    }

    /// Empty page for an unexpected failure
    pub fn failed(query: &ListQuery) -> Self {
        Self::degraded(query, "Failed to read blog posts", ListStatus::Failed)
    }

    fn degraded(query: &ListQuery, error: &str, status: ListStatus) -> Self {
        Self {
            page: ListPage::empty(query),
            error: Some(error.to_string()),
            status,
        }
    }
}

/// The folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a site directory, reading `_config.yml`
    /// when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);

        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    fn loader(&self) -> ContentLoader<'_> {
        ContentLoader::new(&self.config, &self.content_dir)
    }

    /// Default listing query for this site
    pub fn default_query(&self) -> ListQuery {
        ListQuery {
            limit: self.config.per_page,
            ..Default::default()
        }
    }

    /// Run a listing query.
    ///
    /// Never fails: a missing content directory or a load error produce an
    /// empty page with `error` set.
    pub fn list_posts(&self, query: &ListQuery) -> ListResponse {
        ListResponse::from_load(self.loader().load_posts(), query)
    }

    /// Resolve one post by slug, body included.
    ///
    /// Missing, unpublished, unreadable and invalid slugs all yield `None`.
    pub fn find_post(&self, slug: &str) -> Option<Post> {
        match self.loader().load_post(slug) {
            Ok(post) => post,
            Err(ContentError::InvalidSlug(slug)) => {
                tracing::debug!("Rejected slug {:?}", slug);
                None
            }
            Err(e) => {
                tracing::error!("Error reading blog post {}: {}", slug, e);
                None
            }
        }
    }

    /// Tags over published posts with their counts; empty when the content
    /// cannot be read
    pub fn tag_summary(&self) -> Vec<TagCount> {
        match self.loader().load_posts() {
            Ok(posts) => query::tag_summary(&posts),
            Err(e) => {
                tracing::warn!("Cannot summarize tags: {}", e);
                Vec::new()
            }
        }
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, Folio) {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(&folio.content_dir).unwrap();
        (dir, folio)
    }

    #[test]
    fn test_missing_content_dir_degrades() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let response = folio.list_posts(&folio.default_query());
        assert_eq!(response.status, ListStatus::SourceUnavailable);
        assert_eq!(response.error.as_deref(), Some("Data directory not found"));
        assert!(response.page.posts.is_empty());
        assert_eq!(response.page.total, 0);
        assert_eq!(response.page.limit, 10);
    }

    #[test]
    fn test_load_failure_is_reported_as_failed() {
        let query = ListQuery {
            limit: 5,
            offset: 2,
            ..Default::default()
        };
        let loaded = Err(ContentError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        )));

        let response = ListResponse::from_load(loaded, &query);
        assert_eq!(response.status, ListStatus::Failed);
        assert_eq!(response.error.as_deref(), Some("Failed to read blog posts"));
        assert!(response.page.posts.is_empty());
        assert_eq!(
            (response.page.total, response.page.limit, response.page.offset),
            (0, 5, 2)
        );
    }

    #[test]
    fn test_unpublished_is_invisible_everywhere() {
        let (_dir, folio) = site();
        fs::write(
            folio.content_dir.join("hidden.mdx"),
            "---\ntitle: Hidden\npublished: false\n---\nsecret",
        )
        .unwrap();

        let response = folio.list_posts(&folio.default_query());
        assert_eq!(response.page.total, 0);
        assert!(folio.find_post("hidden").is_none());
        assert_eq!(
            format!("{:?}", folio.find_post("hidden")),
            format!("{:?}", folio.find_post("does-not-exist"))
        );
    }

    #[test]
    fn test_find_post_includes_body() {
        let (_dir, folio) = site();
        fs::write(
            folio.content_dir.join("hello.mdx"),
            "---\ntitle: Hello\n---\nHello there",
        )
        .unwrap();

        let post = folio.find_post("hello").unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.body.as_deref(), Some("Hello there"));
        assert!(folio.find_post("../hello").is_none());
    }

    #[test]
    fn test_config_file_is_honoured() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "content_dir: posts\nper_page: 3\n",
        )
        .unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.content_dir, dir.path().join("posts"));
        assert_eq!(folio.default_query().limit, 3);
    }
}
