//! Error types for every build stage

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Front-matter splitting and metadata errors
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("malformed front matter: expected 2 `---` delimiter lines, found {delimiters}")]
    Malformed { delimiters: usize },

    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("invalid metadata: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Syntax highlighting errors
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("tokenize error: {0}")]
    Tokenize(String),
}

/// Markdown rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("markdown parse error: {0}")]
    Markdown(String),

    #[error(transparent)]
    Highlight(#[from] HighlightError),
}

/// Minification errors
#[derive(Debug, Error)]
pub enum MinifyError {
    #[error("no minifier registered for media type `{0}`")]
    UnsupportedType(String),

    #[error("html: {0}")]
    Html(String),

    #[error("css: {0}")]
    Css(String),

    #[error("script: {0}")]
    Script(String),
}

/// Top-level build error, always carrying the file and stage that failed
#[derive(Debug, Error)]
pub enum Error {
    #[error("config: {0}")]
    Config(String),

    #[error("read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output directory {0:?} already exists, run `quire clean` first")]
    OutputExists(PathBuf),

    #[error("front matter of {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("render {path:?}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("template `{name}` for {path:?}: {source}")]
    Template {
        name: String,
        path: PathBuf,
        #[source]
        source: tera::Error,
    },

    #[error("minify {path:?}: {source}")]
    Minify {
        path: PathBuf,
        #[source]
        source: MinifyError,
    },

    #[error("posts {first:?} and {second:?} share the slug `{slug}`")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}
