//! CLI command handlers, one per file.

pub(crate) mod features;
pub(crate) mod scan;

pub use features::run_features;
pub use scan::run_scan;

use phishscan_core::error::ScanError;

pub(crate) const URL_HINT: &str =
    "Please enter a full URL, including the path (e.g., https://example.com/path).";

/// Rejected input gets the usage hint; other failures pass through.
pub(crate) fn describe(err: ScanError) -> anyhow::Error {
    match err {
        ScanError::InvalidUrl { reason, .. } => anyhow::anyhow!("{URL_HINT} ({reason})"),
        other => other.into(),
    }
}
