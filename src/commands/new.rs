//! Create a new post

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::helpers::{format_date, FRONT_MATTER_DATE_FORMAT};
use crate::Site;

/// Write a post skeleton to `<posts_dir>/<slug>.md` and return its path.
/// The slug defaults to the slugified title; an existing file is never
/// overwritten.
pub fn create_post(site: &Site, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::Config("post title must not be empty".to_string()));
    }
    let slug = match slug {
        Some(s) => s.trim().to_string(),
        None => slug::slugify(title),
    };
    if slug.is_empty() || slug.contains(['/', '\\']) {
        return Err(Error::Config(format!("unusable post slug `{}`", slug)));
    }

    fs::create_dir_all(&site.posts_dir).map_err(|source| Error::Write {
        path: site.posts_dir.clone(),
        source,
    })?;

    let today = chrono::Local::now().date_naive();
    let content = skeleton(title, &format_date(today, FRONT_MATTER_DATE_FORMAT))?;

    let file_path = site.posts_dir.join(format!("{}.md", slug));
    let write_error = |source| Error::Write {
        path: file_path.clone(),
        source,
    };
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&file_path)
        .map_err(write_error)?;
    file.write_all(content.as_bytes()).map_err(write_error)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

fn skeleton(title: &str, date: &str) -> Result<String> {
    // serde_yaml quotes the title when plain YAML would misread it
    let yaml_title = serde_yaml::to_string(title)
        .map_err(|e| Error::Config(format!("cannot encode title: {}", e)))?;
    Ok(format!(
        "---\ntitle: {}\ndate: {}\n---\n# {}\n\n",
        yaml_title.trim_end(),
        date,
        title
    ))
}
