//! Content module - post models, front matter and markdown rendering

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::{split, FrontMatter, DELIMITER};
pub use markdown::{first_heading, MarkdownRenderer};
pub use post::{
    slug_from_path, PostDocument, PostIndex, PostIndexEntry, PostMetadata, RenderedPost,
};
