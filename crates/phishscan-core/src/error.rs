//! Scan-level errors surfaced to the caller.
//!
//! Lookup failures never appear here: they are absorbed into the affected
//! feature as a suspicious signal (see [`crate::lookup::LookupFailure`]).

use std::fmt;

use crate::classifier::ClassifierError;

/// Why the normalizer refused an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidUrlReason {
    /// Not parseable as a URL even after adding a scheme.
    Unparseable,
    EmptyHost,
    /// Host has no `.`.
    NoDot,
    Localhost,
    /// Host contains characters the active host rule does not admit.
    DisallowedHost,
    /// Path is empty or `/`.
    RootPath,
}

impl fmt::Display for InvalidUrlReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            InvalidUrlReason::Unparseable => "not a valid URL",
            InvalidUrlReason::EmptyHost => "missing host",
            InvalidUrlReason::NoDot => "host has no domain suffix",
            InvalidUrlReason::Localhost => "localhost is not scannable",
            InvalidUrlReason::DisallowedHost => "host contains disallowed characters",
            InvalidUrlReason::RootPath => "missing path",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Normalization rejected the input; no scorer ran.
    #[error("invalid URL {input:?}: {reason}")]
    InvalidUrl {
        input: String,
        reason: InvalidUrlReason,
    },
    /// The classifier boundary failed on a complete feature vector.
    #[error("classifier failed: {0}")]
    Classifier(#[from] ClassifierError),
}

impl ScanError {
    pub(crate) fn invalid(input: &str, reason: InvalidUrlReason) -> Self {
        ScanError::InvalidUrl {
            input: input.to_string(),
            reason,
        }
    }
}
