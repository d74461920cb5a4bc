//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;

const CONFIG_TEMPLATE: &str = r#"# Site
title: Portfolio
author: ''

# Content
content_dir: data
extension: mdx
default_author: Anonymous

# Display
words_per_minute: 200
date_format: '%B %-d, %Y'

# Pagination
per_page: 10
"#;

const WELCOME_POST: &str = r#"---
title: Hello World
description: The first post on this site.
date: {{ date }}
tags:
  - Meta
---

# Hello World

This post lives in a plain file. Edit it, or add more next to it.

## Writing

Paragraphs support **bold**, *italic*, inline math like $a^2 + b^2$ and
[links](https://example.com). Lines with backticks such as `folio list` show
inline code.

> Quotes are one line each.

```
fenced code stays verbatim
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    let config = SiteConfig::default();
    let content_dir = target_dir.join(&config.content_dir);
    fs::create_dir_all(&content_dir)?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let welcome = WELCOME_POST.replace("{{ date }}", &today);
    fs::write(
        content_dir.join(format!("hello-world.{}", config.extension)),
        welcome,
    )?;

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Folio;
    use tempfile::TempDir;

    #[test]
    fn test_init_site_is_loadable() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.content_dir, "data");

        let post = folio.find_post("hello-world").unwrap();
        assert_eq!(post.title, "Hello World");
        assert_eq!(post.tags, vec!["Meta"]);

        assert!(init_site(dir.path()).is_err());
    }
}
