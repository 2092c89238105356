//! Classifier boundary.
//!
//! The classifier is positional: it sees the 30 signals in
//! [`FEATURE_COLUMNS`] order and nothing else. [`LinearClassifier`] is the
//! built-in model; any trained model can sit behind [`Classifier`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::features::{FEATURE_COLUMNS, FEATURE_COUNT};

/// Binary verdict label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Phishing = 0,
    Safe = 1,
}

impl Label {
    /// Maps a raw class. `1` is safe; `0` and `-1` are phishing.
    pub fn from_class(class: i64) -> Result<Self, ClassifierError> {
        match class {
            1 => Ok(Label::Safe),
            0 | -1 => Ok(Label::Phishing),
            other => Err(ClassifierError::UnknownLabel(other)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Phishing => f.write_str("PHISHING"),
            Label::Safe => f.write_str("SAFE"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("model file {path}: {source}")]
    ModelIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("model file {path}: {source}")]
    ModelFormat {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("model names unknown feature {0:?}")]
    UnknownFeature(String),
    #[error("model produced a non-finite score")]
    NonFinite,
    #[error("model produced unknown class {0}")]
    UnknownLabel(i64),
}

/// Opaque `predict(vector) -> label` boundary.
pub trait Classifier {
    fn predict(&self, features: &[i8; FEATURE_COUNT]) -> Result<Label, ClassifierError>;
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn predict(&self, features: &[i8; FEATURE_COUNT]) -> Result<Label, ClassifierError> {
        (**self).predict(features)
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&self, features: &[i8; FEATURE_COUNT]) -> Result<Label, ClassifierError> {
        (**self).predict(features)
    }
}

/// On-disk model: bias plus weights keyed by column name. Missing columns weigh 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub bias: f64,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

/// `bias + sum(weight * signal)`; a score >= 0 is safe.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearClassifier {
    bias: f64,
    weights: [f64; FEATURE_COUNT],
}

impl LinearClassifier {
    /// All weights 1, bias 0: a majority vote over the signals.
    pub fn uniform() -> Self {
        Self {
            bias: 0.0,
            weights: [1.0; FEATURE_COUNT],
        }
    }

    pub fn from_model(model: &LinearModel) -> Result<Self, ClassifierError> {
        let mut weights = [0.0; FEATURE_COUNT];
        for (name, weight) in &model.weights {
            let idx = FEATURE_COLUMNS
                .iter()
                .position(|c| *c == name.as_str())
                .ok_or_else(|| ClassifierError::UnknownFeature(name.clone()))?;
            weights[idx] = *weight;
        }
        Ok(Self {
            bias: model.bias,
            weights,
        })
    }

    /// Loads a TOML model file.
    pub fn from_path(path: &Path) -> Result<Self, ClassifierError> {
        let data = fs::read_to_string(path).map_err(|source| ClassifierError::ModelIo {
            path: path.display().to_string(),
            source,
        })?;
        let model: LinearModel =
            toml::from_str(&data).map_err(|source| ClassifierError::ModelFormat {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_model(&model)
    }

    pub fn score(&self, features: &[i8; FEATURE_COUNT]) -> f64 {
        self.weights
            .iter()
            .zip(features)
            .fold(self.bias, |acc, (w, x)| acc + w * f64::from(*x))
    }
}

impl Default for LinearClassifier {
    fn default() -> Self {
        Self::uniform()
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &[i8; FEATURE_COUNT]) -> Result<Label, ClassifierError> {
        let score = self.score(features);
        if !score.is_finite() {
            return Err(ClassifierError::NonFinite);
        }
        Label::from_class(if score >= 0.0 { 1 } else { 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_from_class() {
        assert_eq!(Label::from_class(1).unwrap(), Label::Safe);
        assert_eq!(Label::from_class(0).unwrap(), Label::Phishing);
        assert_eq!(Label::from_class(-1).unwrap(), Label::Phishing);
        assert!(matches!(
            Label::from_class(2),
            Err(ClassifierError::UnknownLabel(2))
        ));
        assert_eq!(Label::Safe as i32, 1);
        assert_eq!(Label::Phishing as i32, 0);
    }

    #[test]
    fn uniform_is_majority_vote() {
        let c = LinearClassifier::uniform();
        let mut v = [1i8; FEATURE_COUNT];
        assert_eq!(c.predict(&v).unwrap(), Label::Safe);
        for x in v.iter_mut().take(16) {
            *x = -1;
        }
        assert_eq!(c.predict(&v).unwrap(), Label::Phishing);
        v[15] = 1;
        assert_eq!(c.score(&v), 0.0);
        assert_eq!(c.predict(&v).unwrap(), Label::Safe);
    }

    #[test]
    fn weights_follow_column_names() {
        let model: LinearModel = toml::from_str(
            r#"
            bias = -0.5
            [weights]
            DNSRecord = 2.0
            "#,
        )
        .unwrap();
        let c = LinearClassifier::from_model(&model).unwrap();
        let mut v = [0i8; FEATURE_COUNT];
        assert_eq!(c.predict(&v).unwrap(), Label::Phishing);
        v[24] = 1;
        assert_eq!(c.score(&v), 1.5);
        assert_eq!(c.predict(&v).unwrap(), Label::Safe);
        v[0] = -1;
        assert_eq!(c.score(&v), 1.5);
    }

    #[test]
    fn unknown_feature_rejected() {
        let model = LinearModel {
            bias: 0.0,
            weights: [("NotAColumn".to_string(), 1.0)].into_iter().collect(),
        };
        assert!(matches!(
            LinearClassifier::from_model(&model),
            Err(ClassifierError::UnknownFeature(name)) if name == "NotAColumn"
        ));
    }

    #[test]
    fn non_finite_score_is_error() {
        let model = LinearModel {
            bias: f64::NAN,
            weights: BTreeMap::new(),
        };
        let c = LinearClassifier::from_model(&model).unwrap();
        assert!(matches!(
            c.predict(&[1; FEATURE_COUNT]),
            Err(ClassifierError::NonFinite)
        ));
    }

    #[test]
    fn from_path_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.toml");
        fs::write(&path, "bias = 1.0\n[weights]\nSSLfinal_State = 3.0\n").unwrap();
        let c = LinearClassifier::from_path(&path).unwrap();
        let mut v = [0i8; FEATURE_COUNT];
        v[7] = -1;
        assert_eq!(c.score(&v), -2.0);

        let missing = LinearClassifier::from_path(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ClassifierError::ModelIo { .. })));
    }
}
