//! Feature extraction: heuristic scorers and the vector assembler.
//!
//! Lexical scorers read the URL only. Network and registration scorers read
//! the typed outcomes of the per-scan lookups, so assembly itself is pure and
//! never fails.

pub mod lexical;
pub mod markup;
pub mod network;
pub mod registration;
mod vector;

pub use vector::{FeatureVector, Signal, FEATURE_COLUMNS, FEATURE_COUNT, NO_EVIDENCE};

use chrono::{DateTime, Utc};

use crate::lookup::{LookupOutcome, Page, RegistrationRecord};
use crate::url_model::ScanUrl;

/// Results of the lookups made once per scan, shared read-only by the scorers.
#[derive(Debug)]
pub struct LookupOutcomes {
    pub dns: LookupOutcome<()>,
    pub registration: LookupOutcome<RegistrationRecord>,
    pub page: LookupOutcome<Page>,
}

impl LookupOutcomes {
    /// Log every absorbed failure; none of them escapes the scan.
    pub fn log_failures(&self, url: &ScanUrl) {
        if let Err(e) = &self.dns {
            tracing::debug!(host = url.host(), kind = ?e.kind(), "dns lookup failed: {}", e);
        }
        if let Err(e) = &self.registration {
            tracing::debug!(host = url.host(), kind = ?e.kind(), "whois lookup failed: {}", e);
        }
        if let Err(e) = &self.page {
            tracing::debug!(url = url.as_str(), kind = ?e.kind(), "page fetch failed: {}", e);
        }
    }
}

/// Builds the 30-slot vector in classifier order.
pub fn assemble(
    url: &ScanUrl,
    shorteners: &[String],
    outcomes: &LookupOutcomes,
    now: DateTime<Utc>,
) -> FeatureVector {
    let text = url.as_str();
    let host = url.host();
    let record = outcomes.registration.as_ref().ok();

    FeatureVector {
        having_ip_address: lexical::ip_in_url(text),
        url_length: lexical::url_length(text),
        shortening_service: lexical::shortening_service(host, shorteners),
        having_at_symbol: lexical::at_symbol(text),
        double_slash_redirecting: lexical::double_slash(text),
        prefix_suffix: lexical::prefix_suffix(host),
        having_sub_domain: lexical::subdomain_depth(host),
        ssl_final_state: lexical::tls_in_scheme(url.scheme()),
        domain_registration_length: registration::registration_length(record),
        favicon: NO_EVIDENCE,
        port: NO_EVIDENCE,
        https_token: lexical::https_token(host),
        request_url: network::request_url(&outcomes.page, host),
        url_of_anchor: network::anchor_url(&outcomes.page, host),
        links_in_tags: NO_EVIDENCE,
        sfh: lexical::server_form_handler(text),
        submitting_to_email: lexical::mail_submission(text),
        abnormal_url: registration::abnormal_url(record),
        redirect: network::redirect_chain(&outcomes.page),
        on_mouseover: NO_EVIDENCE,
        right_click: NO_EVIDENCE,
        popup_window: NO_EVIDENCE,
        iframe: NO_EVIDENCE,
        age_of_domain: registration::age_of_domain(record, now),
        dns_record: network::dns_record(&outcomes.dns),
        web_traffic: NO_EVIDENCE,
        page_rank: NO_EVIDENCE,
        google_index: NO_EVIDENCE,
        links_pointing_to_page: NO_EVIDENCE,
        statistical_report: NO_EVIDENCE,
    }
}
