//! Registration lookups over the WHOIS protocol (TCP port 43).
//!
//! The server for a domain comes from configuration or from an IANA referral
//! for its TLD. Thin registries that only point at the registrar's server are
//! followed once.

mod parse;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use super::error::LookupFailure;

const IANA_SERVER: &str = "whois.iana.org:43";
/// Replies are cut at this size; registries stay well below it.
const MAX_REPLY_BYTES: u64 = 256 * 1024;

/// Registration metadata for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRecord {
    pub domain_name: Option<String>,
    pub registrar: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl RegistrationRecord {
    /// Whether the record names the registered domain.
    pub fn has_registrant(&self) -> bool {
        self.domain_name.is_some()
    }

    fn has_dates(&self) -> bool {
        self.creation_date.is_some() && self.expiration_date.is_some()
    }
}

fn with_port(server: &str) -> String {
    if server.contains(':') {
        server.to_string()
    } else {
        format!("{server}:43")
    }
}

/// Sends one query and reads the reply until the server closes.
pub async fn query(server: &str, query: &str) -> Result<String, LookupFailure> {
    let mut stream = TcpStream::connect(with_port(server)).await?;
    stream.write_all(format!("{query}\r\n").as_bytes()).await?;
    let mut reply = Vec::new();
    stream.take(MAX_REPLY_BYTES).read_to_end(&mut reply).await?;
    Ok(String::from_utf8_lossy(&reply).into_owned())
}

/// WHOIS client. Deadlines are applied by the caller around [`WhoisClient::lookup`].
#[derive(Debug, Clone, Default)]
pub struct WhoisClient {
    server: Option<String>,
}

impl WhoisClient {
    pub fn new(server: Option<String>) -> Self {
        Self { server }
    }

    async fn server_for(&self, domain: &str) -> Result<String, LookupFailure> {
        if let Some(server) = &self.server {
            return Ok(server.clone());
        }
        let tld = domain.rsplit('.').next().unwrap_or(domain);
        let reply = query(IANA_SERVER, tld).await?;
        parse::iana_referral(&reply).ok_or_else(|| LookupFailure::NotRegistered(domain.to_string()))
    }

    /// Looks up `domain`, following a registrar referral when the registry
    /// reply lacks dates.
    pub async fn lookup(&self, domain: &str) -> Result<RegistrationRecord, LookupFailure> {
        let server = self.server_for(domain).await?;
        tracing::debug!(domain, server = %server, "whois query");
        let reply = query(&server, domain).await?;
        let record = parse::parse_record(&reply)
            .ok_or_else(|| LookupFailure::NotRegistered(domain.to_string()))?;

        if record.has_dates() {
            return Ok(record);
        }
        let Some(referral) = parse::registrar_referral(&reply) else {
            return Ok(record);
        };
        if with_port(&referral) == with_port(&server) {
            return Ok(record);
        }
        tracing::debug!(domain, referral = %referral, "following registrar referral");
        match query(&referral, domain).await {
            Ok(text) => match parse::parse_record(&text) {
                Some(detail) => Ok(merge(record, detail)),
                None => Ok(record),
            },
            Err(e) => {
                tracing::debug!(domain, "registrar referral failed: {}", e);
                Ok(record)
            }
        }
    }
}

/// Registry values win; the registrar reply fills gaps.
fn merge(registry: RegistrationRecord, registrar: RegistrationRecord) -> RegistrationRecord {
    RegistrationRecord {
        domain_name: registry.domain_name.or(registrar.domain_name),
        registrar: registry.registrar.or(registrar.registrar),
        creation_date: registry.creation_date.or(registrar.creation_date),
        expiration_date: registry.expiration_date.or(registrar.expiration_date),
    }
}
