//! Markup scan over fetched page bodies.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::url_model::is_same_site;

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\ssrc\s*=\s*["']([^"']*)["']"#).expect("img pattern")
});

static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s+(?:[^>]*?\s+)?href\s*=\s*["']([^"']*)["']"#).expect("anchor pattern")
});

/// `src` values of `<img>` tags, in document order.
pub fn image_sources(body: &str) -> Vec<&str> {
    IMG_SRC
        .captures_iter(body)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// `href` values of `<a>` tags, in document order. Empty hrefs are kept.
pub fn anchor_targets(body: &str) -> Vec<&str> {
    ANCHOR_HREF
        .captures_iter(body)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// True when `link`, resolved against `base`, leaves `host` and its subdomains.
/// Links that cannot be resolved to a host count as foreign.
pub fn is_foreign(link: &str, base: Option<&Url>, host: &str) -> bool {
    let resolved = match base {
        Some(base) => base.join(link.trim()),
        None => Url::parse(link.trim()),
    };
    match resolved {
        Ok(u) => !u.host_str().is_some_and(|h| is_same_site(h, host)),
        Err(_) => true,
    }
}
