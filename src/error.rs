//! Error types for the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while reading and normalizing content files
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content directory not found: {0}")]
    SourceUnavailable(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid front-matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),
}

pub type Result<T> = std::result::Result<T, ContentError>;
