//! Tests for argument parsing.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_scan() {
    match parse(&["phishscan", "scan", "https://example.com/login"]).command {
        CliCommand::Scan { url, json } => {
            assert_eq!(url, "https://example.com/login");
            assert!(!json);
        }
        _ => panic!("expected Scan"),
    }
}

#[test]
fn cli_parse_scan_json() {
    match parse(&["phishscan", "scan", "--json", "example.com/a"]).command {
        CliCommand::Scan { url, json } => {
            assert_eq!(url, "example.com/a");
            assert!(json);
        }
        _ => panic!("expected Scan with --json"),
    }
}

#[test]
fn cli_parse_features() {
    match parse(&["phishscan", "features", "http://bit.ly/abc", "--json"]).command {
        CliCommand::Features { url, json } => {
            assert_eq!(url, "http://bit.ly/abc");
            assert!(json);
        }
        _ => panic!("expected Features"),
    }
}

#[test]
fn cli_parse_global_config() {
    let cli = parse(&[
        "phishscan",
        "scan",
        "https://example.com/x",
        "--config",
        "/tmp/phishscan.toml",
    ]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/phishscan.toml")));
    assert!(parse(&["phishscan", "features", "a.com/x"]).config.is_none());
}

#[test]
fn cli_requires_url() {
    assert!(Cli::try_parse_from(["phishscan", "scan"]).is_err());
    assert!(Cli::try_parse_from(["phishscan"]).is_err());
    assert!(Cli::try_parse_from(["phishscan", "classify", "a.com/x"]).is_err());
}
