//! One scan: normalize, run the lookups concurrently, assemble, classify.
//!
//! A [`Scanner`] is built once at startup with its classifier and probe and
//! shared by reference; scans keep no state between calls. Dropping a scan
//! future drops every in-flight lookup with it.

use chrono::Utc;
use serde::Serialize;

use crate::classifier::{Classifier, Label};
use crate::config::{HostRule, ScanConfig};
use crate::error::ScanError;
use crate::features::{assemble, FeatureVector, LookupOutcomes};
use crate::lookup::{LiveProbe, LookupFailure, Probe};
use crate::url_model::{normalize, registrable_domain, Advisory, ScanUrl};

/// Classifier output for one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub url: String,
    pub label: Label,
}

impl Verdict {
    pub fn is_safe(&self) -> bool {
        self.label == Label::Safe
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub verdict: Verdict,
    pub features: FeatureVector,
    pub advisories: Vec<Advisory>,
}

pub struct Scanner<C, P = LiveProbe> {
    shorteners: Vec<String>,
    host_rule: HostRule,
    classifier: C,
    probe: P,
}

impl<C: Classifier> Scanner<C, LiveProbe> {
    /// Scanner that performs real DNS, WHOIS and HTTP lookups.
    pub fn live(cfg: &ScanConfig, classifier: C) -> Self {
        Self::new(cfg, classifier, LiveProbe::new(cfg))
    }
}

impl<C: Classifier, P: Probe> Scanner<C, P> {
    pub fn new(cfg: &ScanConfig, classifier: C, probe: P) -> Self {
        Self {
            shorteners: cfg.shorteners.clone(),
            host_rule: cfg.host_rule,
            classifier,
            probe,
        }
    }

    pub fn normalize(&self, raw: &str) -> Result<ScanUrl, ScanError> {
        normalize(raw, self.host_rule)
    }

    /// Runs every scorer for an accepted URL. Never fails: lookup failures
    /// land on their suspicious branch.
    pub async fn extract(&self, url: &ScanUrl) -> FeatureVector {
        let host = url.host();
        let registration = async {
            match registrable_domain(host) {
                Some(domain) => self.probe.registration(&domain).await,
                None => Err(LookupFailure::NoDomain(host.to_string())),
            }
        };
        let (dns, registration, page) = tokio::join!(
            self.probe.resolve(host),
            registration,
            self.probe.fetch_page(url.as_str()),
        );
        let outcomes = LookupOutcomes {
            dns,
            registration,
            page,
        };
        outcomes.log_failures(url);
        assemble(url, &self.shorteners, &outcomes, Utc::now())
    }

    /// Normalizes and extracts without classifying.
    pub async fn features(&self, raw: &str) -> Result<FeatureVector, ScanError> {
        let url = self.normalize(raw)?;
        Ok(self.extract(&url).await)
    }

    pub async fn scan(&self, raw: &str) -> Result<ScanReport, ScanError> {
        let url = self.normalize(raw)?;
        let features = self.extract(&url).await;
        let label = self.classifier.predict(&features.to_positional())?;
        tracing::info!(url = url.as_str(), verdict = %label, "scan complete");
        Ok(ScanReport {
            verdict: Verdict {
                url: url.as_str().to_string(),
                label,
            },
            features,
            advisories: url.advisory().into_iter().collect(),
        })
    }
}
