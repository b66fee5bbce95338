//! Stylesheet generation for a syntect theme

use syntect::highlighting::Theme;
use syntect::html::{css_for_theme_with_class_style, ClassStyle};

use super::tokens::CLASS_PREFIX;

/// Class on the `<pre>` wrapping every highlighted block
pub const BLOCK_CLASS: &str = "highlight";

/// Class on the `<code>` element; syntect puts the theme's base colors on it
pub const CODE_CLASS: &str = "hl-code";

/// Class naming shared by the emitted spans and the generated rules
pub const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed {
    prefix: CLASS_PREFIX,
};

/// CSS rules for `theme`, preceded by the block's tab width.
///
/// Theme selectors such as `source.rust keyword` come out as descendant
/// selectors (`.hl-source.hl-rust .hl-keyword`), which match the nested
/// per-scope spans the highlighter writes.
pub fn theme_css(theme: &Theme, tab_width: usize) -> Result<String, syntect::Error> {
    let rules = css_for_theme_with_class_style(theme, CLASS_STYLE)?;
    Ok(format!(
        ".{} {{ tab-size: {1}; -moz-tab-size: {1}; }}\n{2}",
        BLOCK_CLASS, tab_width, rules
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use syntect::highlighting::{Color, ScopeSelectors, StyleModifier, ThemeItem, ThemeSet};

    #[test]
    fn test_theme_css_has_base_rule_and_scopes() {
        let themes = ThemeSet::load_defaults();
        let theme = &themes.themes["InspiredGitHub"];
        let css = theme_css(theme, 4).unwrap();
        assert!(css.starts_with(".highlight { tab-size: 4;"));
        assert!(css.contains(".hl-code"));
        assert!(css.contains(".hl-comment"));
        assert!(css.contains("color: #"));
    }

    #[test]
    fn test_theme_css_keeps_descendant_selectors() {
        let theme = Theme {
            scopes: vec![ThemeItem {
                scope: ScopeSelectors::from_str("source.rust keyword").unwrap(),
                style: StyleModifier {
                    foreground: Some(Color { r: 0xaa, g: 0, b: 0, a: 0xff }),
                    background: None,
                    font_style: None,
                },
            }],
            ..Theme::default()
        };
        let css = theme_css(&theme, 2).unwrap();
        assert!(css.contains(".hl-source.hl-rust .hl-keyword"));
        assert!(css.contains("#aa0000"));
    }

    #[test]
    fn test_theme_css_is_deterministic() {
        let themes = ThemeSet::load_defaults();
        let theme = &themes.themes["base16-ocean.dark"];
        assert_eq!(theme_css(theme, 2).unwrap(), theme_css(theme, 2).unwrap());
    }
}
