//! Server-side HTML rendering.

pub mod catalog;
pub mod chrome;
pub mod components;
pub mod flash;
pub mod home;
pub mod markdown;
pub mod module_viewer;
pub mod not_found;
pub mod registration;

pub use chrome::{layout, PageContext};

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Relative links and `http`, `https` or `mailto` targets. Anything else
/// (`javascript:`, `data:`) must not end up in an `href`.
pub fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    let scheme = match url.split_once(':') {
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => scheme,
        _ => return true,
    };
    ["http", "https", "mailto"]
        .iter()
        .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
}

#[cfg(test)]
mod tests {
    use super::{escape_html, is_safe_url};

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn only_known_schemes_are_safe() {
        assert!(is_safe_url("https://kubernetes.io/docs"));
        assert!(is_safe_url("/learning/devops"));
        assert!(is_safe_url("#section"));
        assert!(is_safe_url("mailto:help@example.com"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url(" JavaScript:alert(1)"));
        assert!(!is_safe_url("data:text/html,hi"));
    }
}
