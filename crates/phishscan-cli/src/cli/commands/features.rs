//! `phishscan features` – print the feature vector.

use anyhow::Result;
use phishscan_core::classifier::Classifier;
use phishscan_core::features::FeatureVector;
use phishscan_core::lookup::Probe;
use phishscan_core::scan::Scanner;

use super::describe;

pub async fn run_features<C: Classifier, P: Probe>(
    scanner: &Scanner<C, P>,
    url: &str,
    json: bool,
) -> Result<()> {
    let features = scanner.features(url).await.map_err(describe)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&features)?);
    } else {
        print!("{}", render(&features));
    }
    Ok(())
}

pub(crate) fn render(features: &FeatureVector) -> String {
    features
        .columns()
        .map(|(name, signal)| format!("{:<30} {:>2}\n", name, signal.as_i8()))
        .collect()
}
