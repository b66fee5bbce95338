//! Post models

use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

/// Metadata of one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMetadata {
    /// Post title, never empty
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Source file name without its extension; names the output file
    pub slug: String,
}

/// A post split into metadata and its Markdown body
#[derive(Debug, Clone)]
pub struct PostDocument {
    pub metadata: PostMetadata,

    /// Raw markdown bytes
    pub body: Vec<u8>,
}

/// A post after markdown rendering
#[derive(Debug, Clone)]
pub struct RenderedPost {
    pub metadata: PostMetadata,

    /// Rendered HTML content
    pub html: String,
}

/// What the index page needs to link a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostIndexEntry {
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
}

impl From<&PostMetadata> for PostIndexEntry {
    fn from(meta: &PostMetadata) -> Self {
        Self {
            title: meta.title.clone(),
            slug: meta.slug.clone(),
            date: meta.date,
        }
    }
}

/// Append-only collection of index entries, in enumeration order
#[derive(Debug, Default)]
pub struct PostIndex {
    entries: Vec<PostIndexEntry>,
}

impl PostIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: PostIndexEntry) {
        self.entries.push(entry);
    }

    /// Newest first; posts sharing a date keep their enumeration order
    pub fn freeze(mut self) -> Vec<PostIndexEntry> {
        // sort_by is stable
        self.entries.sort_by(|a, b| b.date.cmp(&a.date));
        self.entries
    }
}

/// Slug for a post source file: its file name without the extension
pub fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(slug: &str, date: &str) -> PostIndexEntry {
        PostIndexEntry {
            title: slug.to_uppercase(),
            slug: slug.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn test_index_newest_first() {
        let mut index = PostIndex::new();
        index.push(entry("a", "2024-01-01"));
        index.push(entry("b", "2024-06-01"));
        index.push(entry("c", "2023-12-31"));

        let dates: Vec<String> = index
            .freeze()
            .iter()
            .map(|e| e.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-06-01", "2024-01-01", "2023-12-31"]);
    }

    #[test]
    fn test_index_ties_keep_enumeration_order() {
        let mut index = PostIndex::new();
        index.push(entry("first", "2024-01-01"));
        index.push(entry("newer", "2024-02-01"));
        index.push(entry("second", "2024-01-01"));
        index.push(entry("third", "2024-01-01"));

        let slugs: Vec<String> = index.freeze().into_iter().map(|e| e.slug).collect();
        assert_eq!(slugs, vec!["newer", "first", "second", "third"]);
    }

    #[test]
    fn test_slug_from_path() {
        assert_eq!(
            slug_from_path(&PathBuf::from("posts/hello-world.md")),
            Some("hello-world".to_string())
        );
        assert_eq!(
            slug_from_path(&PathBuf::from("posts/v1.2-notes.md")),
            Some("v1.2-notes".to_string())
        );
        assert_eq!(
            slug_from_path(&PathBuf::from("posts/no-extension")),
            Some("no-extension".to_string())
        );
    }
}
