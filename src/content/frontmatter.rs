//! Front-matter splitting and metadata extraction
//!
//! A post file looks like
//!
//! ```text
//! ---
//! title: "Hello"
//! date: 2024-03-01
//! ---
//! # Hello
//! ```
//!
//! The file must contain exactly two delimiter lines. Whatever precedes the
//! first one is discarded, the YAML between them is the metadata and
//! everything after the second one is the untouched Markdown body.

use serde::Deserialize;

use super::post::PostMetadata;
use crate::error::FrontMatterError;
use crate::helpers::parse_date;

/// Line separating front matter from the rest of the file
pub const DELIMITER: &[u8] = b"---";

/// Raw front-matter fields, before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
}

impl FrontMatter {
    /// Split a post file and parse its front matter.
    /// Returns (front_matter, body)
    pub fn parse(raw: &[u8]) -> Result<(Self, &[u8]), FrontMatterError> {
        let (yaml, body) = split(raw)?;

        if yaml.iter().all(u8::is_ascii_whitespace) {
            return Ok((FrontMatter::default(), body));
        }
        let fm: FrontMatter = serde_yaml::from_slice(yaml)?;
        Ok((fm, body))
    }

    /// Validate the required fields.
    ///
    /// `fallback_title` is used when the front matter has no usable title,
    /// e.g. the text of the body's first heading.
    pub fn into_metadata(
        self,
        slug: String,
        fallback_title: Option<String>,
    ) -> Result<PostMetadata, FrontMatterError> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or(fallback_title)
            .ok_or_else(|| {
                FrontMatterError::InvalidMetadata("missing required field `title`".to_string())
            })?;

        let raw_date = self.date.ok_or_else(|| {
            FrontMatterError::InvalidMetadata("missing required field `date`".to_string())
        })?;
        let date = parse_date(&raw_date).ok_or_else(|| {
            FrontMatterError::InvalidMetadata(format!(
                "`date` must look like YYYY-MM-DD, got `{}`",
                raw_date
            ))
        })?;

        Ok(PostMetadata { title, date, slug })
    }
}

/// Split a post file on its delimiter lines.
/// Returns (metadata, body)
pub fn split(raw: &[u8]) -> Result<(&[u8], &[u8]), FrontMatterError> {
    let mut delimiters: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    for line in raw.split_inclusive(|&b| b == b'\n') {
        let end = start + line.len();
        if line.trim_ascii_end() == DELIMITER {
            delimiters.push((start, end));
        }
        start = end;
    }

    match delimiters.as_slice() {
        [(_, open_end), (close_start, close_end)] => {
            Ok((&raw[*open_end..*close_start], &raw[*close_end..]))
        }
        found => Err(FrontMatterError::Malformed {
            delimiters: found.len(),
        }),
    }
}
