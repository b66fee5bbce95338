//! Minification of generated HTML, CSS and scripts
//!
//! [`Minifier::minify`] dispatches on the declared media type. Every routine
//! either returns reduced output or fails; unminified content is never passed
//! through.

use lazy_static::lazy_static;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use minify_js::{Session, TopLevelMode};
use regex::Regex;

use crate::error::MinifyError;

pub const HTML: &str = "text/html";
pub const CSS: &str = "text/css";
pub const JAVASCRIPT: &str = "text/javascript";

lazy_static! {
    static ref SCRIPT_TYPE: Regex = Regex::new(
        r"^(?:application|text)/(?:x-)?(?:(?:java|ecma|j|live)script(?:1\.[0-9])?|js)$|^module$"
    )
    .expect("script media type pattern is valid");
}

/// Reduction routine chosen for a media type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Html,
    Css,
    Script,
}

impl ContentKind {
    /// Recognise a media type, ignoring parameters such as `; charset=utf-8`
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            HTML => Some(ContentKind::Html),
            CSS => Some(ContentKind::Css),
            s if SCRIPT_TYPE.is_match(s) => Some(ContentKind::Script),
            _ => None,
        }
    }
}

/// Dispatches content to a type-specific minifier
pub struct Minifier {
    html: minify_html::Cfg,
}

impl Minifier {
    pub fn new() -> Self {
        let mut html = minify_html::Cfg::new();
        // Templates rely on explicit close tags around conditional fragments
        html.keep_closing_tags = true;
        html.keep_html_and_head_opening_tags = true;
        html.keep_comments = false;
        // Inline <style> and <script> bodies stay exactly as written
        html.minify_css = false;
        html.minify_js = false;
        html.remove_bangs = false;
        html.remove_processing_instructions = false;
        Self { html }
    }

    /// Minify `input` declared as `media_type`
    pub fn minify(&self, media_type: &str, input: &str) -> Result<String, MinifyError> {
        let kind = ContentKind::from_media_type(media_type)
            .ok_or_else(|| MinifyError::UnsupportedType(media_type.to_string()))?;
        match kind {
            ContentKind::Html => self.minify_html(input),
            ContentKind::Css => minify_css(input),
            ContentKind::Script => minify_script(input),
        }
    }

    fn minify_html(&self, input: &str) -> Result<String, MinifyError> {
        let out = minify_html::minify(input.as_bytes(), &self.html);
        String::from_utf8(out)
            .map_err(|_| MinifyError::Html("minification produced invalid UTF-8".to_string()))
    }
}

impl Default for Minifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Whitespace, comment and safe token reduction for a stylesheet
fn minify_css(input: &str) -> Result<String, MinifyError> {
    let mut sheet = StyleSheet::parse(input, ParserOptions::default())
        .map_err(|e| MinifyError::Css(e.to_string()))?;
    sheet
        .minify(MinifyOptions::default())
        .map_err(|e| MinifyError::Css(e.to_string()))?;
    let printed = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| MinifyError::Css(e.to_string()))?;
    Ok(printed.code)
}

/// Parse and reprint a classic (non-module) script.
/// Top-level names stay as written so inline handlers can still call them.
fn minify_script(input: &str) -> Result<String, MinifyError> {
    let session = Session::new();
    let mut out = Vec::with_capacity(input.len());
    minify_js::minify(&session, TopLevelMode::Global, input.as_bytes(), &mut out)
        .map_err(|e| MinifyError::Script(format!("{:?}", e)))?;
    String::from_utf8(out)
        .map_err(|_| MinifyError::Script("minification produced invalid UTF-8".to_string()))
}
