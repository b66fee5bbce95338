//! Content loader - finds post files and splits them into documents

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::markdown::first_heading;
use super::post::{slug_from_path, PostDocument};
use super::FrontMatter;
use crate::error::{Error, Result};

/// A post file found in the posts directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSource {
    pub path: PathBuf,
    pub slug: String,
}

/// List the post files of `posts_dir` in directory-listing order
pub fn enumerate_posts(posts_dir: &Path) -> Result<Vec<PostSource>> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(posts_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry.map_err(|e| Error::Read {
            path: e.path().unwrap_or(posts_dir).to_path_buf(),
            source: e.into(),
        })?;
        let path = entry.path();

        if !entry.file_type().is_file() || !is_markdown_file(path) {
            tracing::debug!("Skipping {:?}: not a markdown file", path);
            continue;
        }
        let Some(slug) = slug_from_path(path) else {
            tracing::debug!("Skipping {:?}: no usable file name", path);
            continue;
        };

        sources.push(PostSource {
            path: path.to_path_buf(),
            slug,
        });
    }

    Ok(sources)
}

/// Read a post file and split it into metadata and body
pub fn load_post(source: &PostSource, title_from_heading: bool) -> Result<PostDocument> {
    let raw = fs::read(&source.path).map_err(|e| Error::Read {
        path: source.path.clone(),
        source: e,
    })?;
    parse_post(source, &raw, title_from_heading)
}

/// Split already-read post bytes into a document
pub fn parse_post(
    source: &PostSource,
    raw: &[u8],
    title_from_heading: bool,
) -> Result<PostDocument> {
    let front_matter_error = |e| Error::FrontMatter {
        path: source.path.clone(),
        source: e,
    };

    let (fm, body) = FrontMatter::parse(raw).map_err(front_matter_error)?;
    let fallback_title = if title_from_heading {
        std::str::from_utf8(body).ok().and_then(first_heading)
    } else {
        None
    };
    let metadata = fm
        .into_metadata(source.slug.clone(), fallback_title)
        .map_err(front_matter_error)?;

    Ok(PostDocument {
        metadata,
        body: body.to_vec(),
    })
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
