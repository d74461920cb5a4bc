//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::loader::is_valid_slug;
use crate::Folio;

/// Create a new post file from a title; the slug defaults to the slugified
/// title
pub fn create_post(folio: &Folio, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Utc::now();

    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if !is_valid_slug(&slug) {
        anyhow::bail!("Invalid slug: {:?}", slug);
    }

    fs::create_dir_all(&folio.content_dir)?;

    let file_path = folio
        .content_dir
        .join(format!("{}.{}", slug, folio.config.extension));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\ndescription: ''\ndate: {}\nauthor: {}\ntags: []\npublished: false\n---\n\n",
        serde_json::to_string(title)?,
        now.format("%Y-%m-%d %H:%M:%S"),
        serde_json::to_string(&folio.config.author)?,
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created draft {:?}", file_path);

    Ok(file_path)
}
