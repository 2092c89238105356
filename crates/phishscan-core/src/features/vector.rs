//! Feature vector: 30 named ternary signals with a fixed positional order.

use serde::{Serialize, Serializer};

/// Number of slots the classifier expects.
pub const FEATURE_COUNT: usize = 30;

/// Canonical column names in classifier order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "having_IPhaving_IP_Address",
    "URLURL_Length",
    "Shortining_Service",
    "having_At_Symbol",
    "double_slash_redirecting",
    "Prefix_Suffix",
    "having_Sub_Domain",
    "SSLfinal_State",
    "Domain_registeration_length",
    "Favicon",
    "port",
    "HTTPS_token",
    "Request_URL",
    "URL_of_Anchor",
    "Links_in_tags",
    "SFH",
    "Submitting_to_email",
    "Abnormal_URL",
    "Redirect",
    "on_mouseover",
    "RightClick",
    "popUpWidnow",
    "Iframe",
    "age_of_domain",
    "DNSRecord",
    "web_traffic",
    "Page_Rank",
    "Google_Index",
    "Links_pointing_to_page",
    "Statistical_report",
];

/// Output of one heuristic scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Suspicious,
    Neutral,
    Legitimate,
}

impl Signal {
    pub const fn as_i8(self) -> i8 {
        match self {
            Signal::Suspicious => -1,
            Signal::Neutral => 0,
            Signal::Legitimate => 1,
        }
    }

    /// `Suspicious` when `flagged`, otherwise `Legitimate`.
    pub const fn flag(flagged: bool) -> Self {
        if flagged {
            Signal::Suspicious
        } else {
            Signal::Legitimate
        }
    }
}

impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.as_i8())
    }
}

/// Slot value for signals without a heuristic: no evidence of risk.
pub const NO_EVIDENCE: Signal = Signal::Legitimate;

/// Named form of the classifier input. Field order is the column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureVector {
    pub having_ip_address: Signal,
    pub url_length: Signal,
    pub shortening_service: Signal,
    pub having_at_symbol: Signal,
    pub double_slash_redirecting: Signal,
    pub prefix_suffix: Signal,
    pub having_sub_domain: Signal,
    pub ssl_final_state: Signal,
    pub domain_registration_length: Signal,
    pub favicon: Signal,
    pub port: Signal,
    pub https_token: Signal,
    pub request_url: Signal,
    pub url_of_anchor: Signal,
    pub links_in_tags: Signal,
    pub sfh: Signal,
    pub submitting_to_email: Signal,
    pub abnormal_url: Signal,
    pub redirect: Signal,
    pub on_mouseover: Signal,
    pub right_click: Signal,
    pub popup_window: Signal,
    pub iframe: Signal,
    pub age_of_domain: Signal,
    pub dns_record: Signal,
    pub web_traffic: Signal,
    pub page_rank: Signal,
    pub google_index: Signal,
    pub links_pointing_to_page: Signal,
    pub statistical_report: Signal,
}

impl FeatureVector {
    /// Signals in classifier order.
    pub fn signals(&self) -> [Signal; FEATURE_COUNT] {
        [
            self.having_ip_address,
            self.url_length,
            self.shortening_service,
            self.having_at_symbol,
            self.double_slash_redirecting,
            self.prefix_suffix,
            self.having_sub_domain,
            self.ssl_final_state,
            self.domain_registration_length,
            self.favicon,
            self.port,
            self.https_token,
            self.request_url,
            self.url_of_anchor,
            self.links_in_tags,
            self.sfh,
            self.submitting_to_email,
            self.abnormal_url,
            self.redirect,
            self.on_mouseover,
            self.right_click,
            self.popup_window,
            self.iframe,
            self.age_of_domain,
            self.dns_record,
            self.web_traffic,
            self.page_rank,
            self.google_index,
            self.links_pointing_to_page,
            self.statistical_report,
        ]
    }

    /// Positional form handed to the classifier boundary.
    pub fn to_positional(&self) -> [i8; FEATURE_COUNT] {
        self.signals().map(Signal::as_i8)
    }

    /// `(column, signal)` pairs in classifier order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, Signal)> {
        FEATURE_COLUMNS.into_iter().zip(self.signals())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(signal: Signal) -> FeatureVector {
        FeatureVector {
            having_ip_address: signal,
            url_length: signal,
            shortening_service: signal,
            having_at_symbol: signal,
            double_slash_redirecting: signal,
            prefix_suffix: signal,
            having_sub_domain: signal,
            ssl_final_state: signal,
            domain_registration_length: signal,
            favicon: signal,
            port: signal,
            https_token: signal,
            request_url: signal,
            url_of_anchor: signal,
            links_in_tags: signal,
            sfh: signal,
            submitting_to_email: signal,
            abnormal_url: signal,
            redirect: signal,
            on_mouseover: signal,
            right_click: signal,
            popup_window: signal,
            iframe: signal,
            age_of_domain: signal,
            dns_record: signal,
            web_traffic: signal,
            page_rank: signal,
            google_index: signal,
            links_pointing_to_page: signal,
            statistical_report: signal,
        }
    }

    #[test]
    fn signal_values() {
        assert_eq!(Signal::Suspicious.as_i8(), -1);
        assert_eq!(Signal::Neutral.as_i8(), 0);
        assert_eq!(Signal::Legitimate.as_i8(), 1);
        assert_eq!(Signal::flag(true), Signal::Suspicious);
        assert_eq!(Signal::flag(false), Signal::Legitimate);
    }

    #[test]
    fn positional_order_matches_columns() {
        let mut v = all(Signal::Legitimate);
        v.dns_record = Signal::Suspicious;
        v.url_length = Signal::Neutral;
        v.statistical_report = Signal::Suspicious;

        let p = v.to_positional();
        assert_eq!(p.len(), FEATURE_COUNT);
        assert_eq!(p[1], 0);
        assert_eq!(p[24], -1);
        assert_eq!(p[29], -1);
        assert_eq!(FEATURE_COLUMNS[1], "URLURL_Length");
        assert_eq!(FEATURE_COLUMNS[24], "DNSRecord");
        assert_eq!(FEATURE_COLUMNS[29], "Statistical_report");
        assert_eq!(p.iter().filter(|x| **x == 1).count(), 27);
    }

    #[test]
    fn columns_pairs_names_with_signals() {
        let mut v = all(Signal::Legitimate);
        v.age_of_domain = Signal::Suspicious;
        let flagged: Vec<&str> = v
            .columns()
            .filter(|(_, s)| *s == Signal::Suspicious)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(flagged, vec!["age_of_domain"]);
    }

    #[test]
    fn column_names_are_unique() {
        let mut names = FEATURE_COLUMNS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FEATURE_COUNT);
    }
}
