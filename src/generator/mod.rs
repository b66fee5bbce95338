//! Page rendering - template substitution, minification and output writing

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::content::{PostIndexEntry, RenderedPost};
use crate::error::{Error, Result};
use crate::helpers::format_date;
use crate::minify::Minifier;
use crate::templates::TemplateSet;

/// Renders one template per output file and writes it minified
pub struct PageRenderer<'t> {
    templates: &'t TemplateSet,
    minifier: Minifier,
}

impl<'t> PageRenderer<'t> {
    pub fn new(templates: &'t TemplateSet) -> Self {
        Self {
            templates,
            minifier: Minifier::new(),
        }
    }

    /// Render `template` with `payload`, minify it as `media_type` and write
    /// the result to `dest`, replacing any existing file
    pub fn render<P: Serialize>(
        &self,
        template: &str,
        payload: &P,
        media_type: &str,
        dest: &Path,
    ) -> Result<()> {
        let rendered = self.templates.render_to(template, payload, dest)?;
        let minified = self
            .minifier
            .minify(media_type, &rendered)
            .map_err(|source| Error::Minify {
                path: dest.to_path_buf(),
                source,
            })?;
        fs::write(dest, minified.as_bytes()).map_err(|source| Error::Write {
            path: dest.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            "Generated: {:?} ({} -> {} bytes)",
            dest,
            rendered.len(),
            minified.len()
        );
        Ok(())
    }
}

/// Fields every page and asset can use
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SiteFields<'a> {
    pub site_title: &'a str,
    pub author: &'a str,
    pub current_year: i32,
    pub code_highlight_style: &'a str,
}

/// Payload of a post page
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostPayload<'a> {
    #[serde(flatten)]
    pub site: SiteFields<'a>,
    pub title: &'a str,
    pub date: String,
    pub content: &'a str,
    pub inline_highlight_style: bool,
}

impl<'a> PostPayload<'a> {
    pub fn new(
        site: SiteFields<'a>,
        post: &'a RenderedPost,
        date_format: &str,
        inline_highlight_style: bool,
    ) -> Self {
        Self {
            site,
            title: &post.metadata.title,
            date: format_date(post.metadata.date, date_format),
            content: &post.html,
            inline_highlight_style,
        }
    }
}

/// One link on the index page
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexItem<'a> {
    pub title: &'a str,
    pub path: String,
    pub date: String,
}

/// Payload of the index page
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IndexPayload<'a> {
    #[serde(flatten)]
    pub site: SiteFields<'a>,
    pub posts: Vec<IndexItem<'a>>,
}

impl<'a> IndexPayload<'a> {
    /// `entries` must already be in display order
    pub fn new(site: SiteFields<'a>, entries: &'a [PostIndexEntry], date_format: &str) -> Self {
        let posts = entries
            .iter()
            .map(|entry| IndexItem {
                title: &entry.title,
                path: post_file_name(&entry.slug),
                date: format_date(entry.date, date_format),
            })
            .collect();
        Self { site, posts }
    }
}

/// Output file name of a post page
pub fn post_file_name(slug: &str) -> String {
    format!("{}.html", slug)
}
