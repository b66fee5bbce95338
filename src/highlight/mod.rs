//! Syntax highlighting for code blocks
//!
//! Highlighted markup nests one classed `<span>` per scope rather than using
//! inline styles; the matching stylesheet is produced once per highlighter and
//! handed out by [`SyntaxHighlighter::style_sheet`].

mod css;
mod tokens;

pub use css::{BLOCK_CLASS, CODE_CLASS};
pub use tokens::{scope_classes, Coalesce, Token, Tokens, CLASS_PREFIX};

use syntect::highlighting::ThemeSet;
use syntect::parsing::{Scope, SyntaxReference, SyntaxSet};

use crate::config::HighlightConfig;
use crate::error::{Error, HighlightError, Result};
use crate::helpers::html_escape;

/// CSS produced from the configured theme, shared by every page of a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyleSheet(String);

impl HighlightStyleSheet {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How a lexer was chosen for a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerSource {
    Hint,
    Analysed,
    Fallback,
}

/// Highlighter configuration computed once and reused for every code block
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    style_sheet: HighlightStyleSheet,
}

impl SyntaxHighlighter {
    /// Build a highlighter for the configured theme
    pub fn new(config: &HighlightConfig) -> Result<Self> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(&config.theme).ok_or_else(|| {
            let known: Vec<&String> = themes.themes.keys().collect();
            Error::Config(format!(
                "unknown highlight theme `{}` (available: {:?})",
                config.theme, known
            ))
        })?;

        let css = css::theme_css(&theme, config.tab_width).map_err(|e| {
            Error::Config(format!("highlight theme `{}`: {}", config.theme, e))
        })?;

        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            style_sheet: HighlightStyleSheet(css),
        })
    }

    /// Resolve a lexer: exact hint, then content analysis, then plain text
    pub fn resolve(&self, source: &str, hint: &str) -> (&SyntaxReference, LexerSource) {
        let token = hint
            .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
            .next()
            .unwrap_or("");

        if !token.is_empty() {
            if let Some(syntax) = self.syntax_set.find_syntax_by_token(token) {
                return (syntax, LexerSource::Hint);
            }
        }
        if let Some(syntax) = self.syntax_set.find_syntax_by_first_line(source) {
            return (syntax, LexerSource::Analysed);
        }
        (self.syntax_set.find_syntax_plain_text(), LexerSource::Fallback)
    }

    /// Lazily tokenize `source` with adjacent same-scope tokens merged
    pub fn tokens<'a>(
        &'a self,
        source: &'a str,
        syntax: &SyntaxReference,
    ) -> Coalesce<Tokens<'a>> {
        Coalesce::new(Tokens::new(&self.syntax_set, syntax, source))
    }

    /// Render a code block as nested, classed HTML spans
    pub fn highlight(&self, source: &str, hint: &str) -> Result<String, HighlightError> {
        let (syntax, via) = self.resolve(source, hint);
        tracing::trace!("Highlighting block as {} ({:?})", syntax.name, via);

        let mut html = format!(
            r#"<pre class="{}" data-lang="{}"><code class="{}">"#,
            BLOCK_CLASS,
            html_escape(&syntax.name),
            CODE_CLASS
        );
        let mut open: Vec<Scope> = Vec::new();
        for token in self.tokens(source, syntax) {
            let token = token?;
            let shared = open
                .iter()
                .zip(&token.scopes)
                .take_while(|(a, b)| a == b)
                .count();
            for _ in shared..open.len() {
                html.push_str("</span>");
            }
            open.truncate(shared);
            for scope in &token.scopes[shared..] {
                html.push_str(&format!(r#"<span class="{}">"#, scope_classes(*scope)));
                open.push(*scope);
            }
            html.push_str(&html_escape(&token.text));
        }
        for _ in &open {
            html.push_str("</span>");
        }
        html.push_str("</code></pre>\n");
        Ok(html)
    }

    /// Stylesheet for the configured theme
    pub fn style_sheet(&self) -> &HighlightStyleSheet {
        &self.style_sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighter() -> SyntaxHighlighter {
        SyntaxHighlighter::new(&HighlightConfig::default()).unwrap()
    }

    #[test]
    fn test_unknown_theme_is_config_error() {
        let config = HighlightConfig {
            theme: "no-such-theme".to_string(),
            ..HighlightConfig::default()
        };
        assert!(matches!(
            SyntaxHighlighter::new(&config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_resolve_by_hint() {
        let h = highlighter();
        let (syntax, via) = h.resolve("fn main() {}", "rust");
        assert_eq!(syntax.name, "Rust");
        assert_eq!(via, LexerSource::Hint);

        let (syntax, _) = h.resolve("fn main() {}", "rust,ignore");
        assert_eq!(syntax.name, "Rust");
    }

    #[test]
    fn test_resolve_by_content() {
        let h = highlighter();
        let (syntax, via) = h.resolve("#!/bin/bash\necho hi\n", "");
        assert_eq!(via, LexerSource::Analysed);
        assert!(syntax.name.to_lowercase().contains("bash"));
    }

    #[test]
    fn test_resolve_falls_back_to_plain_text() {
        let h = highlighter();
        let (syntax, via) = h.resolve("just some words\n", "klingon");
        assert_eq!(via, LexerSource::Fallback);
        assert_eq!(syntax.name, "Plain Text");
    }

    #[test]
    fn test_highlight_uses_classes() {
        let h = highlighter();
        let html = h
            .highlight("fn main() { if true { return; } }\n", "rust")
            .unwrap();
        assert!(html.starts_with(
            r#"<pre class="highlight" data-lang="Rust"><code class="hl-code">"#
        ));
        assert!(html.contains("hl-keyword"));
        assert!(!html.contains("style="));
    }

    #[test]
    fn test_highlight_unknown_hint_still_renders() {
        let h = highlighter();
        let html = h.highlight("a < b && c\n", "not-a-language").unwrap();
        assert!(html.contains("a &lt; b &amp;&amp; c"));
    }

    #[test]
    fn test_highlight_is_deterministic() {
        let h = highlighter();
        let source = "def f(x):\n    return x * 2\n";
        assert_eq!(
            h.highlight(source, "python").unwrap(),
            h.highlight(source, "python").unwrap()
        );
    }

    #[test]
    fn test_style_sheet_uses_tab_width() {
        let config = HighlightConfig {
            tab_width: 8,
            ..HighlightConfig::default()
        };
        let h = SyntaxHighlighter::new(&config).unwrap();
        assert!(h.style_sheet().as_str().contains("tab-size: 8;"));
    }

    #[test]
    fn test_highlight_nests_scope_spans() {
        let h = highlighter();
        let html = h.highlight("fn main() {}\n", "rust").unwrap();
        assert!(html.contains(r#"<span class="hl-source hl-rust"><span class="#));
        assert_eq!(
            html.matches("<span").count(),
            html.matches("</span>").count()
        );
    }

    #[test]
    fn test_style_sheet_matches_emitted_classes() {
        let h = highlighter();
        let css = h.style_sheet().as_str();
        assert!(css.contains(".hl-code"));
        let html = h.highlight("// note\n", "rust").unwrap();
        assert!(html.contains("hl-comment"));
        assert!(css.contains(".hl-comment"));
    }
}
