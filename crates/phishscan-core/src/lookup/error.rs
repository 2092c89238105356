//! Lookup failure type and its classification.

use std::time::Duration;

/// High-level classification of a lookup failure, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Deadline expired (ours or curl's).
    Timeout,
    /// Network-level failure (connection refused/reset, DNS, TLS).
    Connection,
    /// The lookup ran but found nothing (no address, no registration).
    NotFound,
    Other,
}

/// Why a DNS, WHOIS or HTTP lookup produced no result.
///
/// Local to one scorer group: the affected features degrade to their
/// suspicious branch and the scan continues.
#[derive(Debug, thiserror::Error)]
pub enum LookupFailure {
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport: {0}")]
    Curl(#[from] curl::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("no address records for {0}")]
    NoAddress(String),
    #[error("no registration record for {0}")]
    NotRegistered(String),
    #[error("no registrable domain in {0}")]
    NoDomain(String),
    #[error("aborted")]
    Aborted,
    #[error("lookup worker failed: {0}")]
    Worker(String),
}

impl LookupFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            LookupFailure::Timeout(_) => FailureKind::Timeout,
            LookupFailure::Curl(e) => classify_curl_error(e),
            LookupFailure::Io(e) => classify_io_error(e),
            LookupFailure::NoAddress(_)
            | LookupFailure::NotRegistered(_)
            | LookupFailure::NoDomain(_) => FailureKind::NotFound,
            LookupFailure::Aborted | LookupFailure::Worker(_) => FailureKind::Other,
        }
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FailureKind::Connection;
    }
    FailureKind::Other
}

fn classify_io_error(e: &std::io::Error) -> FailureKind {
    use std::io::ErrorKind;
    match e.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => FailureKind::Timeout,
        ErrorKind::ConnectionRefused
        | ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::NotConnected
        | ErrorKind::BrokenPipe
        | ErrorKind::UnexpectedEof => FailureKind::Connection,
        _ => FailureKind::Other,
    }
}
