//! Host admission, registrable domain and same-site checks.

use std::net::Ipv4Addr;

use crate::config::HostRule;

/// Second-level suffixes under which registrations take three labels.
const SECOND_LEVEL_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "me.uk", "com.au", "net.au", "org.au", "co.nz",
    "co.jp", "ne.jp", "co.in", "co.za", "com.br", "com.cn", "com.mx", "com.tr", "com.sg",
];

/// Whether the URL authority passes the configured host rule.
///
/// `authority` is the raw text between `://` and the path, before any IDN
/// encoding, so userinfo and ports are part of what the rule sees.
///
/// `Alphabetic`: the authority with dots removed is non-empty and purely
/// alphabetic (Unicode letters included).
/// `Permissive`: a trailing `:port` is allowed, and beyond the alphabetic form
/// also IPv4 literals and labels of alphanumerics or `-`.
pub fn admits_host(authority: &str, rule: HostRule) -> bool {
    let host = match rule {
        HostRule::Alphabetic => authority,
        HostRule::Permissive => strip_port(authority),
    };
    if !host.chars().any(|c| c != '.') {
        return false;
    }
    let alphabetic = host.chars().filter(|c| *c != '.').all(char::is_alphabetic);
    match rule {
        HostRule::Alphabetic => alphabetic,
        HostRule::Permissive => {
            alphabetic
                || host.parse::<Ipv4Addr>().is_ok()
                || host.split('.').all(|label| {
                    !label.is_empty() && label.chars().all(|c| c.is_alphanumeric() || c == '-')
                })
        }
    }
}

fn strip_port(authority: &str) -> &str {
    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    }
}

/// Registrable domain of `host`, used as the WHOIS key.
///
/// Takes the last two labels, or three under a known second-level suffix.
/// IP literals and single-label hosts have none.
pub fn registrable_domain(host: &str) -> Option<String> {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    if host.parse::<Ipv4Addr>().is_ok() || host.starts_with('[') {
        return None;
    }
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return None;
    }
    let last_two = labels[labels.len() - 2..].join(".");
    let take = if SECOND_LEVEL_SUFFIXES.contains(&last_two.as_str()) {
        3
    } else {
        2
    };
    if labels.len() < take {
        return None;
    }
    Some(labels[labels.len() - take..].join("."))
}

/// True when `candidate` is `host` or one of its subdomains.
pub fn is_same_site(candidate: &str, host: &str) -> bool {
    let candidate = candidate.trim_end_matches('.').to_ascii_lowercase();
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    match candidate.strip_suffix(host.as_str()) {
        Some("") => true,
        Some(rest) => rest.ends_with('.'),
        None => false,
    }
}
