//! Network scorers over the outcomes of the DNS lookup and page fetch.
//!
//! Each scorer takes the typed lookup result; the failure arm is the
//! scorer's suspicious branch.

use url::Url;

use super::markup;
use super::vector::Signal;
use crate::lookup::{LookupOutcome, Page};

const REQUEST_URL_SUSPICIOUS: f64 = 0.61;
const ANCHOR_SUSPICIOUS: f64 = 0.67;
const NEUTRAL_FROM: f64 = 0.31;
const MAX_REDIRECTS: u32 = 2;

/// Maps an unsafe fraction to a signal. No links at all is legitimate.
fn ratio_signal(unsafe_count: usize, total: usize, suspicious_from: f64) -> Signal {
    if total == 0 {
        return Signal::Legitimate;
    }
    let ratio = unsafe_count as f64 / total as f64;
    if ratio >= suspicious_from {
        Signal::Suspicious
    } else if ratio >= NEUTRAL_FROM {
        Signal::Neutral
    } else {
        Signal::Legitimate
    }
}

fn page_base(page: &Page) -> Option<Url> {
    Url::parse(&page.effective_url).ok()
}

pub fn dns_record(outcome: &LookupOutcome<()>) -> Signal {
    Signal::flag(outcome.is_err())
}

/// Share of `<img>` sources served from another site.
pub fn request_url(page: &LookupOutcome<Page>, host: &str) -> Signal {
    let Ok(page) = page else {
        return Signal::Suspicious;
    };
    let base = page_base(page);
    let sources = markup::image_sources(&page.body);
    let foreign = sources
        .iter()
        .filter(|src| markup::is_foreign(src, base.as_ref(), host))
        .count();
    ratio_signal(foreign, sources.len(), REQUEST_URL_SUSPICIOUS)
}

/// Share of anchors that are fragments, script or mail links, or foreign.
pub fn anchor_url(page: &LookupOutcome<Page>, host: &str) -> Signal {
    let Ok(page) = page else {
        return Signal::Suspicious;
    };
    let base = page_base(page);
    let anchors = markup::anchor_targets(&page.body);
    let unsafe_count = anchors
        .iter()
        .filter(|href| {
            let lower = href.to_ascii_lowercase();
            lower.contains('#')
                || lower.contains("javascript:")
                || lower.contains("mailto:")
                || markup::is_foreign(href, base.as_ref(), host)
        })
        .count();
    ratio_signal(unsafe_count, anchors.len(), ANCHOR_SUSPICIOUS)
}

/// More than two redirects before the final page is suspicious.
pub fn redirect_chain(page: &LookupOutcome<Page>) -> Signal {
    match page {
        Ok(page) => Signal::flag(page.redirect_count > MAX_REDIRECTS),
        Err(_) => Signal::Suspicious,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupFailure;
    use std::time::Duration;

    fn page(body: &str, redirects: u32) -> LookupOutcome<Page> {
        Ok(Page {
            body: body.to_string(),
            status: 200,
            effective_url: "https://example.com/page".to_string(),
            redirect_count: redirects,
        })
    }

    fn failed() -> LookupOutcome<Page> {
        Err(LookupFailure::Timeout(Duration::from_secs(5)))
    }

    fn imgs(own: usize, foreign: usize) -> String {
        let mut body = String::new();
        for i in 0..own {
            body.push_str(&format!(r#"<img src="/img/{i}.png">"#));
        }
        for i in 0..foreign {
            body.push_str(&format!(r#"<img src="https://cdn.other.net/{i}.png">"#));
        }
        body
    }

    #[test]
    fn ratio_thresholds() {
        assert_eq!(ratio_signal(0, 0, 0.61), Signal::Legitimate);
        assert_eq!(ratio_signal(3, 10, 0.61), Signal::Legitimate);
        assert_eq!(ratio_signal(31, 100, 0.61), Signal::Neutral);
        assert_eq!(ratio_signal(60, 100, 0.61), Signal::Neutral);
        assert_eq!(ratio_signal(61, 100, 0.61), Signal::Suspicious);
        assert_eq!(ratio_signal(66, 100, 0.67), Signal::Neutral);
        assert_eq!(ratio_signal(67, 100, 0.67), Signal::Suspicious);
    }

    #[test]
    fn dns_record_follows_outcome() {
        assert_eq!(dns_record(&Ok(())), Signal::Legitimate);
        let err: LookupOutcome<()> = Err(LookupFailure::NoAddress("x.example".into()));
        assert_eq!(dns_record(&err), Signal::Suspicious);
    }

    #[test]
    fn request_url_ratio() {
        assert_eq!(request_url(&page(&imgs(10, 0), 0), "example.com"), Signal::Legitimate);
        assert_eq!(request_url(&page(&imgs(6, 4), 0), "example.com"), Signal::Neutral);
        assert_eq!(request_url(&page(&imgs(3, 7), 0), "example.com"), Signal::Suspicious);
    }

    #[test]
    fn request_url_no_images_fetched_is_legitimate() {
        assert_eq!(request_url(&page("<p>hi</p>", 0), "example.com"), Signal::Legitimate);
    }

    #[test]
    fn request_url_fetch_failure_is_suspicious() {
        assert_eq!(request_url(&failed(), "example.com"), Signal::Suspicious);
    }

    #[test]
    fn anchor_url_counts_unsafe_targets() {
        let safe = r#"<a href="/a">a</a><a href="/b">b</a><a href="https://example.com/c">c</a>"#;
        assert_eq!(anchor_url(&page(safe, 0), "example.com"), Signal::Legitimate);

        let mixed = r##"<a href="/a">a</a><a href="#x">x</a><a href="/b">b</a>"##;
        assert_eq!(anchor_url(&page(mixed, 0), "example.com"), Signal::Neutral);

        let bad = r##"<a href="#">x</a><a href="javascript:go()">j</a><a href="mailto:a@b.c">m</a><a href="/ok">ok</a>"##;
        assert_eq!(anchor_url(&page(bad, 0), "example.com"), Signal::Suspicious);
    }

    #[test]
    fn anchor_url_failure_is_suspicious() {
        assert_eq!(anchor_url(&failed(), "example.com"), Signal::Suspicious);
    }

    #[test]
    fn redirect_chain_threshold() {
        assert_eq!(redirect_chain(&page("", 0)), Signal::Legitimate);
        assert_eq!(redirect_chain(&page("", 2)), Signal::Legitimate);
        assert_eq!(redirect_chain(&page("", 3)), Signal::Suspicious);
        assert_eq!(redirect_chain(&failed()), Signal::Suspicious);
    }
}
