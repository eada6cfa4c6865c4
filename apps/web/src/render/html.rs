use std::fmt::Write;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds `path?k=v&…` with percent-encoded values, skipping empty ones.
/// The result is not yet HTML-escaped.
pub fn url_with_query(path: &str, params: &[(&str, &str)]) -> String {
    let mut url = path.to_string();
    let mut sep = '?';
    for (key, value) in params.iter().filter(|(_, v)| !v.is_empty()) {
        let _ = write!(url, "{sep}{key}={}", urlencoding::encode(value));
        sep = '&';
    }
    url
}

/// Only absolute `http`/`https` URLs may become links.
pub fn is_safe_url(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    url.starts_with("https://") || url.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_leaves_cyrillic_and_dunders_alone() {
        assert_eq!(escape("метод __init__"), "метод __init__");
    }

    #[test]
    fn test_url_with_query_encodes_and_skips_empty() {
        assert_eq!(
            url_with_query("/competency-matrix", &[("sheet", "SQL"), ("q", ""), ("layout", "grid")]),
            "/competency-matrix?sheet=SQL&layout=grid"
        );
        assert_eq!(
            url_with_query("/m", &[("q", "a&b c")]),
            "/m?q=a%26b%20c"
        );
        assert_eq!(url_with_query("/m", &[]), "/m");
    }

    #[test]
    fn test_only_http_urls_are_safe() {
        assert!(is_safe_url("https://docs.python.org/3/"));
        assert!(is_safe_url("HTTP://example.test"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url(" JavaScript:alert(1)"));
        assert!(!is_safe_url("data:text/html,<b>x</b>"));
        assert!(!is_safe_url("/relative/path"));
    }
}
