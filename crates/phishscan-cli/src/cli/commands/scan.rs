//! `phishscan scan` – classify one URL.

use anyhow::Result;
use phishscan_core::classifier::Classifier;
use phishscan_core::lookup::Probe;
use phishscan_core::scan::{ScanReport, Scanner};

use super::describe;

pub async fn run_scan<C: Classifier, P: Probe>(
    scanner: &Scanner<C, P>,
    url: &str,
    json: bool,
) -> Result<()> {
    let report = scanner.scan(url).await.map_err(describe)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&report));
    }
    Ok(())
}

pub(crate) fn render(report: &ScanReport) -> String {
    let mut out = format!(
        "URL: {}\nResult: {}\n",
        report.verdict.url, report.verdict.label
    );
    for advisory in &report.advisories {
        out.push_str(&format!("Warning: {}\n", advisory.message()));
    }
    out
}
