//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // Content
    /// Directory holding one file per post, relative to the site root
    pub content_dir: String,
    /// File extension of content files, without the dot
    pub extension: String,
    /// Author shown when a post names none
    pub default_author: String,

    // Display
    pub words_per_minute: usize,
    /// strftime pattern for display dates
    pub date_format: String,

    // Pagination
    pub per_page: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),

            content_dir: "data".to_string(),
            extension: "mdx".to_string(),
            default_author: "Anonymous".to_string(),

            words_per_minute: 200,
            date_format: "%B %-d, %Y".to_string(),

            per_page: 10,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "data");
        assert_eq!(config.extension, "mdx");
        assert_eq!(config.default_author, "Anonymous");
        assert_eq!(config.words_per_minute, 200);
        assert_eq!(config.per_page, 10);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
content_dir: posts
extension: md
per_page: 5
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.content_dir, "posts");
        assert_eq!(config.extension, "md");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.date_format, "%B %-d, %Y");
    }
}
