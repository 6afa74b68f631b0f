use serde::Deserialize;

use super::{check_feature_names, sigmoid, Classifier};
use crate::error::{ModelError, PredictionError};
use crate::features::{FeatureVector, FEATURE_COUNT};

/// `sigmoid(intercept + coefficients · x)`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

fn default_name() -> String {
    "logistic".to_string()
}

impl LogisticModel {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::FeatureCount {
                expected: FEATURE_COUNT,
                found: self.coefficients.len(),
            });
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::UnsupportedFormat(
                "non-finite logistic parameter".to_string(),
            ));
        }
        check_feature_names(&self.feature_names)
    }
}

impl Classifier for LogisticModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let z = self
            .coefficients
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>();
        Ok(sigmoid(z + self.intercept))
    }
}
