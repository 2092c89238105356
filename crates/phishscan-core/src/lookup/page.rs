//! Page fetch for the markup and redirect scorers.
//!
//! Uses the curl crate (libcurl) for one GET that follows redirects and keeps
//! the body (capped), the final status, effective URL and redirect count.

use std::str;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::error::LookupFailure;

/// Fetched page shared by the Request-URL, Anchor-URL and Redirect scorers.
#[derive(Debug, Clone)]
pub struct Page {
    /// Body decoded lossily as UTF-8, truncated to the configured cap.
    pub body: String,
    /// Final HTTP status after redirects.
    pub status: u32,
    /// URL of the final response; relative links resolve against it.
    pub effective_url: String,
    pub redirect_count: u32,
}

/// Transfer limits for one page fetch.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub timeout: Duration,
    pub max_redirections: u32,
    pub max_body_bytes: usize,
    pub user_agent: String,
}

/// Sets the abort token when dropped, so a dropped scan stops its transfer.
struct AbortOnDrop(Arc<AtomicBool>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Performs the GET on the blocking pool. Dropping the returned future aborts
/// the transfer at the next curl progress callback.
pub async fn fetch_page(url: &str, opts: &PageOptions) -> Result<Page, LookupFailure> {
    let abort = Arc::new(AtomicBool::new(false));
    let _guard = AbortOnDrop(Arc::clone(&abort));
    let url = url.to_string();
    let opts = opts.clone();
    tokio::task::spawn_blocking(move || fetch_blocking(&url, &opts, &abort))
        .await
        .map_err(|e| LookupFailure::Worker(e.to_string()))?
}

/// Performs the GET in the current thread.
pub fn fetch_blocking(
    url: &str,
    opts: &PageOptions,
    abort: &AtomicBool,
) -> Result<Page, LookupFailure> {
    let mut body: Vec<u8> = Vec::new();
    let cap = opts.max_body_bytes;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    easy.connect_timeout(opts.timeout)?;
    easy.timeout(opts.timeout)?;
    easy.useragent(&opts.user_agent)?;
    // Empty string enables every encoding libcurl supports.
    easy.accept_encoding("")?;
    easy.progress(true)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            let room = cap.saturating_sub(body.len());
            body.extend_from_slice(&data[..data.len().min(room)]);
            Ok(data.len())
        })?;
        transfer.progress_function(|_, _, _, _| !abort.load(Ordering::Relaxed))?;
        if let Err(e) = transfer.perform() {
            if abort.load(Ordering::Relaxed) {
                return Err(LookupFailure::Aborted);
            }
            return Err(e.into());
        }
    }

    let status = easy.response_code()?;
    let redirect_count = easy.redirect_count()?;
    let effective_url = easy
        .effective_url()?
        .map(str::to_owned)
        .unwrap_or_else(|| url.to_string());

    tracing::debug!(
        url,
        status,
        redirect_count,
        bytes = body.len(),
        "page fetched"
    );

    Ok(Page {
        body: String::from_utf8_lossy(&body).into_owned(),
        status,
        effective_url,
        redirect_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_guard_sets_token_on_drop() {
        let token = Arc::new(AtomicBool::new(false));
        {
            let _guard = AbortOnDrop(Arc::clone(&token));
            assert!(!token.load(Ordering::Relaxed));
        }
        assert!(token.load(Ordering::Relaxed));
    }

    #[test]
    fn pre_aborted_transfer_fails_without_network() {
        let opts = PageOptions {
            timeout: Duration::from_secs(2),
            max_redirections: 3,
            max_body_bytes: 1024,
            user_agent: "test".to_string(),
        };
        let abort = AtomicBool::new(true);
        let err = fetch_blocking("http://127.0.0.1:9/", &opts, &abort).unwrap_err();
        assert!(matches!(err, LookupFailure::Aborted | LookupFailure::Curl(_)));
    }
}
