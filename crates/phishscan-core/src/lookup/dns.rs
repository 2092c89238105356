//! Host resolution with a deadline.

use std::time::Duration;

use super::error::LookupFailure;

/// Resolves `host` to at least one address within `deadline`.
pub async fn resolve(host: &str, deadline: Duration) -> Result<(), LookupFailure> {
    let lookup = tokio::net::lookup_host((host, 80));
    let mut addrs = tokio::time::timeout(deadline, lookup)
        .await
        .map_err(|_| LookupFailure::Timeout(deadline))??;
    match addrs.next() {
        Some(addr) => {
            tracing::trace!(host, %addr, "resolved");
            Ok(())
        }
        None => Err(LookupFailure::NoAddress(host.to_string())),
    }
}
