//! Content loader - reads posts from the content directory

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Normalization, Post};
use crate::config::SiteConfig;
use crate::error::{ContentError, Result};

/// Loads posts from a flat directory of content files
pub struct ContentLoader<'a> {
    config: &'a SiteConfig,
    content_dir: PathBuf,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(config: &'a SiteConfig, content_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
        }
    }

    /// Load every published post, in file-name order.
    ///
    /// Files that fail to read or parse are skipped. A missing directory is
    /// reported as [`ContentError::SourceUnavailable`].
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        if !self.content_dir.is_dir() {
            return Err(ContentError::SourceUnavailable(self.content_dir.clone()));
        }

        let opts = self.normalization();
        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // The directory itself cannot be listed
                Err(e) if e.path() == Some(self.content_dir.as_path()) => {
                    return Err(ContentError::Io(e.into()));
                }
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            let Some(slug) = self.slug_of(path) else {
                continue;
            };
            if !path.is_file() {
                continue;
            }

            match load_post_file(path, &slug, &opts) {
                Ok(post) if post.published => posts.push(post),
                Ok(_) => tracing::debug!("Skipping unpublished post {}", slug),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", path, e),
            }
        }

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.content_dir);
        Ok(posts)
    }

    /// Load the post stored under `slug`.
    ///
    /// Returns `Ok(None)` when the file does not exist or is unpublished.
    pub fn load_post(&self, slug: &str) -> Result<Option<Post>> {
        if !is_valid_slug(slug) {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }

        let path = self
            .content_dir
            .join(format!("{}.{}", slug, self.config.extension));
        if !path.is_file() {
            return Ok(None);
        }

        let post = load_post_file(&path, slug, &self.normalization())?;
        Ok(post.published.then_some(post))
    }

    /// Slug for a content file, `None` if the extension does not match or
    /// the stem could not be looked up again
    fn slug_of(&self, path: &Path) -> Option<String> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        if ext != self.config.extension {
            return None;
        }
        path.file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| is_valid_slug(s))
            .map(|s| s.to_string())
    }

    fn normalization(&self) -> Normalization<'_> {
        Normalization {
            default_author: &self.config.default_author,
            date_format: &self.config.date_format,
            words_per_minute: self.config.words_per_minute,
            now: Utc::now(),
        }
    }
}

/// Whether `slug` names a single entry inside the content directory
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '\0'])
}

fn load_post_file(path: &Path, slug: &str, opts: &Normalization) -> Result<Post> {
    let content = fs::read_to_string(path)?;
    let (fm, body) = FrontMatter::parse(&content).map_err(|source| ContentError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Post::from_front_matter(slug, fm, body, opts))
}
