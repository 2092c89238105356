use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which hosts the URL normalizer admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostRule {
    /// Host minus dots must be purely alphabetic. IP literals and digits are rejected.
    #[default]
    Alphabetic,
    /// Also admits IPv4 literals and labels with digits or hyphens.
    Permissive,
}

/// Global configuration loaded from `~/.config/phishscan/config.toml`.
/// Keys missing from the file take their default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Total deadline for the page fetch (connect + transfer).
    pub http_timeout_secs: u64,
    /// Deadline for resolving the host.
    pub dns_timeout_secs: u64,
    /// Deadline for the whole registration lookup, referrals included.
    pub whois_timeout_secs: u64,
    /// Redirects curl follows before giving up.
    pub max_redirections: u32,
    /// Page bytes kept for the markup scan; the rest is discarded.
    pub max_body_bytes: usize,
    /// User-Agent sent with the page fetch.
    pub user_agent: String,
    /// Known URL shortener domains.
    pub shorteners: Vec<String>,
    /// Fixed WHOIS server (`host:port`). None = discover through IANA.
    pub whois_server: Option<String>,
    /// Host admission rule for the normalizer.
    pub host_rule: HostRule,
    /// Linear model file. None = built-in uniform model.
    pub model_path: Option<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: 5,
            dns_timeout_secs: 5,
            whois_timeout_secs: 5,
            max_redirections: 10,
            max_body_bytes: 2 * 1024 * 1024,
            user_agent: concat!("phishscan/", env!("CARGO_PKG_VERSION")).to_string(),
            shorteners: ["bit.ly", "goo.gl", "tinyurl.com", "ow.ly", "t.co", "is.gd"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            whois_server: None,
            host_rule: HostRule::Alphabetic,
            model_path: None,
        }
    }
}

impl ScanConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_secs(self.dns_timeout_secs.max(1))
    }

    pub fn whois_timeout(&self) -> Duration {
        Duration::from_secs(self.whois_timeout_secs.max(1))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("phishscan")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<ScanConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: ScanConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ScanConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ScanConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}
