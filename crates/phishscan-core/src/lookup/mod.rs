//! External lookups made once per scan: DNS, WHOIS and the page fetch.
//!
//! Every lookup returns a typed [`LookupOutcome`]; nothing here panics or
//! propagates past the scan. [`Probe`] is the seam the scanner depends on, so
//! tests can substitute canned outcomes for the network.

mod dns;
mod error;
mod page;
pub mod whois;

pub use dns::resolve;
pub use error::{classify_curl_error, FailureKind, LookupFailure};
pub use page::{fetch_blocking, fetch_page, Page, PageOptions};
pub use whois::{RegistrationRecord, WhoisClient};

use std::future::Future;
use std::time::Duration;

use crate::config::ScanConfig;

pub type LookupOutcome<T> = Result<T, LookupFailure>;

/// Source of the network-dependent signals for one scan.
#[allow(async_fn_in_trait)]
pub trait Probe {
    /// Resolve `host` to at least one address.
    async fn resolve(&self, host: &str) -> LookupOutcome<()>;
    /// Fetch the registration record for a registrable domain.
    async fn registration(&self, domain: &str) -> LookupOutcome<RegistrationRecord>;
    /// GET `url`, following redirects.
    async fn fetch_page(&self, url: &str) -> LookupOutcome<Page>;
}

/// Runs `fut` under `deadline`; expiry becomes [`LookupFailure::Timeout`].
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> LookupOutcome<T>
where
    F: Future<Output = LookupOutcome<T>>,
{
    tokio::time::timeout(deadline, fut)
        .await
        .unwrap_or(Err(LookupFailure::Timeout(deadline)))
}

/// [`Probe`] backed by the network, with the configured deadlines.
#[derive(Debug, Clone)]
pub struct LiveProbe {
    dns_timeout: Duration,
    whois_timeout: Duration,
    page: PageOptions,
    whois: WhoisClient,
}

impl LiveProbe {
    pub fn new(cfg: &ScanConfig) -> Self {
        Self {
            dns_timeout: cfg.dns_timeout(),
            whois_timeout: cfg.whois_timeout(),
            page: PageOptions {
                timeout: cfg.http_timeout(),
                max_redirections: cfg.max_redirections,
                max_body_bytes: cfg.max_body_bytes,
                user_agent: cfg.user_agent.clone(),
            },
            whois: WhoisClient::new(cfg.whois_server.clone()),
        }
    }
}

impl Probe for LiveProbe {
    async fn resolve(&self, host: &str) -> LookupOutcome<()> {
        dns::resolve(host, self.dns_timeout).await
    }

    async fn registration(&self, domain: &str) -> LookupOutcome<RegistrationRecord> {
        with_deadline(self.whois_timeout, self.whois.lookup(domain)).await
    }

    async fn fetch_page(&self, url: &str) -> LookupOutcome<Page> {
        // curl enforces the same limit; this bounds time spent waiting on the pool.
        let deadline = self.page.timeout + Duration::from_secs(1);
        with_deadline(deadline, page::fetch_page(url, &self.page)).await
    }
}
