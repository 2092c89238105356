//! Lexical scorers: pure string heuristics over the URL text and host.

use regex::Regex;
use std::sync::LazyLock;

use super::vector::Signal;

/// One octet, 0..=255.
const OCTET: &str = r"(?:25[0-5]|2[0-4]\d|[01]?\d\d?)";

static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{OCTET}(?:\.{OCTET}){{3}}")).expect("dotted quad pattern")
});

/// Suspicious when the text contains a dotted quad with every octet <= 255,
/// including one embedded in a longer digit run (`256.10.10.10`).
pub fn ip_in_url(text: &str) -> Signal {
    Signal::flag(DOTTED_QUAD.is_match(text))
}

/// < 54 chars suspicious, 54..=75 neutral, > 75 legitimate.
pub fn url_length(text: &str) -> Signal {
    match text.chars().count() {
        0..=53 => Signal::Suspicious,
        54..=75 => Signal::Neutral,
        _ => Signal::Legitimate,
    }
}

/// Suspicious when the host is a known shortener or one of its subdomains.
pub fn shortening_service(host: &str, shorteners: &[String]) -> Signal {
    let host = host.to_ascii_lowercase();
    let hit = shorteners.iter().any(|s| {
        let s = s.to_ascii_lowercase();
        host == s || host.strip_suffix(s.as_str()).is_some_and(|rest| rest.ends_with('.'))
    });
    Signal::flag(hit)
}

pub fn at_symbol(text: &str) -> Signal {
    Signal::flag(text.contains('@'))
}

/// Suspicious when the last `//` starts past index 6, i.e. after the scheme.
pub fn double_slash(text: &str) -> Signal {
    Signal::flag(text.rfind("//").is_some_and(|pos| pos > 6))
}

/// Hyphenated hosts imitate brands (`paypal-login.com`).
pub fn prefix_suffix(host: &str) -> Signal {
    Signal::flag(host.contains('-'))
}

/// <= 3 labels legitimate, 4 neutral, more suspicious.
pub fn subdomain_depth(host: &str) -> Signal {
    match host.split('.').count() {
        0..=3 => Signal::Legitimate,
        4 => Signal::Neutral,
        _ => Signal::Suspicious,
    }
}

pub fn tls_in_scheme(scheme: &str) -> Signal {
    if scheme.eq_ignore_ascii_case("https") {
        Signal::Legitimate
    } else {
        Signal::Suspicious
    }
}

/// `https` spelled inside the host is a spoofing indicator.
pub fn https_token(host: &str) -> Signal {
    Signal::flag(host.to_ascii_lowercase().contains("https"))
}

pub fn server_form_handler(text: &str) -> Signal {
    Signal::flag(text.contains("about:blank"))
}

pub fn mail_submission(text: &str) -> Signal {
    Signal::flag(text.contains("mailto:"))
}
