//! # Content Module
//!
//! Blog posts live as markdown files in the configured content directory,
//! one `<slug>.md` per post, each starting with a TOML front matter block
//! fenced by `+++` lines:
//!
//! ```text
//! +++
//! title = "Typed props in Vue 3"
//! date = "2023-03-04"
//! summary = "Declaring component props with TypeScript."
//! tags = ["vue", "typescript"]
//! +++
//!
//! Markdown body...
//! ```
//!
//! Posts are read from disk on every request; nothing is cached in memory.

pub mod markdown;
pub mod pages;
pub mod sitemap;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    error::{ApiError, Result},
    utils, warning,
};

pub const FRONT_MATTER_FENCE: &str = "+++";
pub const POST_EXTENSION: &str = "md";

#[derive(Error, Debug, PartialEq)]
pub enum FrontMatterError {
    #[error("post does not start with a `+++` front matter block")]
    Missing,

    #[error("front matter block is not closed")]
    Unterminated,

    #[error("invalid front matter: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMeta {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub og_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub slug: String,
    #[serde(flatten)]
    pub meta: PostMeta,
    pub content: String,
}

impl Post {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        utils::parse_post_date(&self.meta.date)
    }

    pub fn formatted_date(&self) -> String {
        utils::format_post_date(&self.meta.date)
    }
}

/// Splits a post source into its front matter and markdown body.
pub fn parse_post(slug: &str, source: &str) -> std::result::Result<Post, FrontMatterError> {
    let source = source.trim_start_matches('\u{feff}');
    let mut lines = source.split_inclusive('\n');

    match lines.next() {
        Some(first) if first.trim_end() == FRONT_MATTER_FENCE => {}
        _ => return Err(FrontMatterError::Missing),
    }

    let mut front_matter = String::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == FRONT_MATTER_FENCE {
            closed = true;
            break;
        }
        front_matter.push_str(line);
    }

    if !closed {
        return Err(FrontMatterError::Unterminated);
    }

    let meta: PostMeta =
        toml::from_str(&front_matter).map_err(|e| FrontMatterError::Invalid(e.to_string()))?;
    let content: String = lines.collect();

    Ok(Post {
        slug: slug.to_string(),
        meta,
        content: content.trim_start_matches(['\r', '\n']).to_string(),
    })
}

/// Loads one post by slug.
///
/// # Errors
///
/// - [`ApiError::InvalidSlug`] if the slug could escape the content directory
/// - [`ApiError::NotFound`] if no such post exists
/// - [`ApiError::Config`] if the file exists but its front matter is broken
pub async fn load_post(dir: &Path, slug: &str) -> Result<Post> {
    let slug = utils::validate_slug(slug)?;
    let path = post_path(dir, slug);

    let source = match async_fs::read_to_string(&path).await {
        Ok(source) => source,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound(format!("post {slug}")));
        }
        Err(e) => return Err(e.into()),
    };

    parse_post(slug, &source).map_err(|e| ApiError::Config(format!("{}: {}", path.display(), e)))
}

/// Loads every post in `dir`, newest first.
///
/// Files whose name is not a valid slug are ignored. Files that cannot be
/// read or whose front matter does not parse are skipped with a warning. Posts with equal dates keep slug order.
pub async fn load_posts(dir: &Path) -> Result<Vec<Post>> {
    let mut entries = async_fs::read_dir(dir).await?;
    let mut posts = Vec::new();

    while let Some(entry) = entries.next().await {
        let path = entry?.path();
        let Some(slug) = post_slug(&path) else {
            continue;
        };

        let source = match async_fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) => {
                warning!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        match parse_post(&slug, &source) {
            Ok(post) => posts.push(post),
            Err(e) => warning!("Skipping {}: {}", path.display(), e),
        }
    }

    sort_posts(&mut posts);
    Ok(posts)
}

/// Newest first; unparsable dates sort last, ties broken by slug.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.parsed_date()
            .cmp(&a.parsed_date())
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

fn post_path(dir: &Path, slug: &str) -> PathBuf {
    dir.join(format!("{slug}.{POST_EXTENSION}"))
}

fn post_slug(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some(POST_EXTENSION) {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    utils::is_valid_slug(stem).then(|| stem.to_string())
}
