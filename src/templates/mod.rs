//! Page templates using the Tera template engine
//!
//! The default templates are embedded in the binary. A file with the same name
//! in the site's templates directory replaces the embedded one.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

use crate::error::{Error, Result};

pub const LAYOUT: &str = "layout.html";
pub const POST: &str = "post.html";
pub const INDEX: &str = "index.html";
pub const STYLESHEET: &str = "layout.css";
pub const SCRIPT: &str = "dark-mode.js";

/// Embedded defaults, keyed by template name
const BUILTIN: &[(&str, &str)] = &[
    (LAYOUT, include_str!("default/layout.html")),
    (POST, include_str!("default/post.html")),
    (INDEX, include_str!("default/index.html")),
    (STYLESHEET, include_str!("default/layout.css")),
    (SCRIPT, include_str!("default/dark-mode.js")),
];

/// Name reported when the set as a whole fails to parse
const SET_NAME: &str = "template set";

/// Location reported for errors in the embedded templates
const BUILTIN_ORIGIN: &str = "<built-in>";

/// The parsed template set, shared by every page of a build
pub struct TemplateSet {
    tera: Tera,
    overridden: Vec<&'static str>,
}

impl TemplateSet {
    /// Load only the embedded templates
    pub fn builtin() -> Result<Self> {
        Self::from_sources(
            BUILTIN.iter().map(|(name, body)| (*name, body.to_string())).collect(),
            Vec::new(),
            Path::new(BUILTIN_ORIGIN),
        )
    }

    /// Load the embedded templates, replacing any that `dir` also provides.
    /// A missing `dir` means no overrides.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut sources = Vec::with_capacity(BUILTIN.len());
        let mut overridden = Vec::new();

        for (name, builtin) in BUILTIN {
            let path = dir.join(name);
            if path.is_file() {
                let body = fs::read_to_string(&path).map_err(|source| Error::Read {
                    path: path.clone(),
                    source,
                })?;
                tracing::debug!("Using template override {:?}", path);
                overridden.push(*name);
                sources.push((*name, body));
            } else {
                sources.push((*name, builtin.to_string()));
            }
        }

        Self::from_sources(sources, overridden, dir)
    }

    fn from_sources(
        sources: Vec<(&str, String)>,
        overridden: Vec<&'static str>,
        origin: &Path,
    ) -> Result<Self> {
        let mut tera = Tera::default();
        // Layout inheritance is resolved across the whole batch
        tera.add_raw_templates(sources)
            .map_err(|source| Error::Template {
                name: SET_NAME.to_string(),
                path: origin.to_path_buf(),
                source,
            })?;
        Ok(Self { tera, overridden })
    }

    /// Names of the templates taken from the site instead of the defaults
    pub fn overridden(&self) -> &[&'static str] {
        &self.overridden
    }

    /// Render `name` with a fresh context built from `payload`
    pub fn render<T: Serialize>(&self, name: &str, payload: &T) -> tera::Result<String> {
        let context = Context::from_serialize(payload)?;
        self.tera.render(name, &context)
    }

    /// Like [`TemplateSet::render`], reporting failures against `dest`
    pub fn render_to<T: Serialize>(
        &self,
        name: &str,
        payload: &T,
        dest: &Path,
    ) -> Result<String> {
        self.render(name, payload).map_err(|source| Error::Template {
            name: name.to_string(),
            path: PathBuf::from(dest),
            source,
        })
    }
}
