//! Root-relative URL rewriting.
//!
//! Feed readers render items outside the site, so every `/path` reference must
//! carry the publishing domain.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `src` and `href` attributes whose value starts with a single `/`.
static ROOT_RELATIVE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?P<attr>src|href)=(?P<quote>["'])/(?P<next>[^/]|$)"#)
        .expect("attribute pattern is valid")
});

/// Rewrite every root-relative `src`/`href` attribute to an absolute URL.
///
/// Protocol-relative values (`//host/...`) are left alone. Applying the rewrite
/// to its own output changes nothing.
pub fn absolutize_html(html: &str, domain: &str) -> String {
    let domain = domain.trim_end_matches('/');
    ROOT_RELATIVE_ATTR
        .replace_all(html, |caps: &Captures| {
            format!(
                "{}={}{domain}/{}",
                &caps["attr"], &caps["quote"], &caps["next"]
            )
        })
        .into_owned()
}

/// Make a single root-relative URL absolute.
///
/// Absolute, protocol-relative and document-relative values are returned as is.
pub fn absolutize_url(url: &str, domain: &str) -> String {
    if url.starts_with('/') && !url.starts_with("//") {
        format!("{}{url}", domain.trim_end_matches('/'))
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "https://example.com";

    #[test]
    fn test_rewrites_img_src() {
        assert_eq!(
            absolutize_html(r#"<img src="/x.png">"#, DOMAIN),
            r#"<img src="https://example.com/x.png">"#
        );
    }

    #[test]
    fn test_rewrites_every_occurrence() {
        let html = r#"<img src="/a.png"><p><img src='/b.png'></p><a href="/posts/c">c</a>"#;
        let out = absolutize_html(html, DOMAIN);

        assert!(out.contains(r#"src="https://example.com/a.png""#));
        assert!(out.contains(r#"src='https://example.com/b.png'"#));
        assert!(out.contains(r#"href="https://example.com/posts/c""#));
        assert!(!out.contains(r#"="/"#));
    }

    #[test]
    fn test_leaves_other_urls() {
        let html = r#"<img src="//cdn.example/x.png"><img src="https://other.example/y.png"><img src="z.png">"#;
        assert_eq!(absolutize_html(html, DOMAIN), html);
    }

    #[test]
    fn test_root_itself() {
        assert_eq!(
            absolutize_html(r#"<a href="/">home</a>"#, DOMAIN),
            r#"<a href="https://example.com/">home</a>"#
        );
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let html = r#"<img src="/a.png"> <a href="/b">b</a> <img src="//cdn/c.png">"#;
        let once = absolutize_html(html, DOMAIN);
        let twice = absolutize_html(&once, DOMAIN);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "src=/not-an-attribute and path /a/b";
        assert_eq!(absolutize_html(text, DOMAIN), text);
    }

    #[test]
    fn test_absolutize_url() {
        assert_eq!(absolutize_url("/hero.png", DOMAIN), "https://example.com/hero.png");
        assert_eq!(
            absolutize_url("/hero.png", "https://example.com/"),
            "https://example.com/hero.png"
        );
        assert_eq!(
            absolutize_url("https://cdn.example/hero.png", DOMAIN),
            "https://cdn.example/hero.png"
        );
        assert_eq!(absolutize_url("//cdn.example/h.png", DOMAIN), "//cdn.example/h.png");
        assert_eq!(absolutize_url("hero.png", DOMAIN), "hero.png");
    }
}
