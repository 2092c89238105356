//! URL normalization.
//!
//! Turns free text into a [`ScanUrl`] with scheme, host and path, or rejects
//! it with [`ScanError::InvalidUrl`] before any scorer runs.

mod host;

pub use host::{admits_host, is_same_site, registrable_domain};

use serde::Serialize;

use crate::config::HostRule;
use crate::error::{InvalidUrlReason, ScanError};

/// Non-blocking notice attached to a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// Plain `http` instead of `https`.
    InsecureScheme,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::InsecureScheme => {
                "This URL uses HTTP which is not secure. Prefer HTTPS whenever possible."
            }
        }
    }
}

/// A URL accepted by the normalizer.
///
/// `text` is the input as scanned (scheme prepended when missing); lexical
/// scorers read it verbatim. Host is non-empty, contains a `.`, and the path
/// is neither empty nor `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanUrl {
    text: String,
    scheme: String,
    host: String,
    path: String,
    query: Option<String>,
}

impl ScanUrl {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn advisory(&self) -> Option<Advisory> {
        (self.scheme == "http").then_some(Advisory::InsecureScheme)
    }
}

fn has_http_scheme(s: &str) -> bool {
    let lower = s.get(..8).unwrap_or(s).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Raw authority of a schemed URL: the text between `://` and the first
/// `/`, `?` or `#`.
fn authority(text: &str) -> &str {
    let rest = text.split_once("://").map_or(text, |(_, rest)| rest);
    let end = rest.find(|c: char| matches!(c, '/' | '?' | '#')).unwrap_or(rest.len());
    &rest[..end]
}

/// Validates and canonicalizes raw input.
///
/// Prepends `http://` when neither `http://` nor `https://` is present, so
/// normalizing an already normalized URL returns it unchanged.
pub fn normalize(raw: &str, rule: HostRule) -> Result<ScanUrl, ScanError> {
    let trimmed = raw.trim();
    let text = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let parsed = match url::Url::parse(&text) {
        Ok(u) => u,
        Err(url::ParseError::EmptyHost) => {
            return Err(ScanError::invalid(raw, InvalidUrlReason::EmptyHost))
        }
        Err(_) => return Err(ScanError::invalid(raw, InvalidUrlReason::Unparseable)),
    };

    let host = parsed.host_str().unwrap_or_default();
    if host.is_empty() {
        return Err(ScanError::invalid(raw, InvalidUrlReason::EmptyHost));
    }
    if !host.contains('.') {
        return Err(ScanError::invalid(raw, InvalidUrlReason::NoDot));
    }
    if host == "localhost" {
        return Err(ScanError::invalid(raw, InvalidUrlReason::Localhost));
    }
    if !admits_host(authority(&text), rule) {
        return Err(ScanError::invalid(raw, InvalidUrlReason::DisallowedHost));
    }
    let path = parsed.path();
    if path.is_empty() || path == "/" {
        return Err(ScanError::invalid(raw, InvalidUrlReason::RootPath));
    }

    let url = ScanUrl {
        scheme: parsed.scheme().to_string(),
        host: host.to_string(),
        path: path.to_string(),
        query: parsed.query().map(str::to_owned),
        text,
    };

    if let Some(advisory) = url.advisory() {
        tracing::warn!(url = %url.text, "{}", advisory.message());
    }

    Ok(url)
}
