//! quire: a small static blog generator
//!
//! Posts are Markdown files with YAML front matter. A build renders every post
//! through Tera templates with highlighted code blocks, writes an index page
//! and the shared stylesheet and script, and minifies everything it writes.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod highlight;
pub mod minify;
pub mod templates;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Post sources
    pub posts_dir: PathBuf,
    /// Template overrides
    pub templates_dir: PathBuf,
    /// Generation (output) directory
    pub output_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Open the site in `base_dir` with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let templates_dir = base_dir.join(&config.templates_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            templates_dir,
            output_dir,
        }
    }

    /// Generate the static site
    pub fn build(&self) -> Result<commands::build::BuildReport> {
        commands::build::run(self)
    }

    /// Remove the generation directory
    pub fn clean(&self) -> Result<bool> {
        commands::clean::run(self)
    }

    /// Create a new post skeleton
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }

    /// All posts, newest first
    pub fn list(&self) -> Result<Vec<content::PostIndexEntry>> {
        commands::list::collect(self)
    }
}
