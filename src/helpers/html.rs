//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Opening anchor tag that opens its target in a new browsing context
///
/// # Examples
/// ```ignore
/// anchor_open("https://example.com", "") // -> <a href="https://example.com" target="_blank" rel="noopener">
/// ```
pub fn anchor_open(href: &str, title: &str) -> String {
    let mut tag = format!(r#"<a href="{}""#, html_escape(href));
    if !title.is_empty() {
        tag.push_str(&format!(r#" title="{}""#, html_escape(title)));
    }
    tag.push_str(r#" target="_blank" rel="noopener">"#);
    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_anchor_open() {
        assert_eq!(
            anchor_open("https://example.com/?a=1&b=2", ""),
            r#"<a href="https://example.com/?a=1&amp;b=2" target="_blank" rel="noopener">"#
        );
        assert!(anchor_open("/x", "Say \"hi\"").contains(r#"title="Say &quot;hi&quot;""#));
    }
}
