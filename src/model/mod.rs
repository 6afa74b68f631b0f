//! Loading the pre-trained attrition classifier.
//!
//! The artifact is a JSON document, either an XGBoost model saved with
//! `Booster.save_model("*.json")` ([`xgboost`]) or a logistic model
//! (`"kind": "logistic"`, [`logistic`]). Loading happens once at startup and any
//! failure is fatal; the returned handle is read-only afterwards.

use std::path::Path;

use serde_json::Value;

use crate::error::{ModelError, PredictionError};
use crate::features::layout::feature_names;
use crate::features::{FeatureVector, FEATURE_COUNT};

pub mod logistic;
pub mod xgboost;

/// Artifact looked up in the working directory when nothing else is configured.
pub const DEFAULT_MODEL_FILE: &str = "modele_xgboost_attrition.json";

/// A binary classifier scoring the positive ("will leave") class.
pub trait Classifier {
    fn name(&self) -> &str;
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, PredictionError>;
}

/// Read and validate the model artifact at `path`.
pub fn load_model(path: &Path) -> Result<Box<dyn Classifier>, ModelError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ModelError::NotFound(path.to_path_buf())
        } else {
            ModelError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    // Any non-JSON input, pickles included, is a format error rather than an I/O one.
    let document: Value = serde_json::from_slice(&bytes).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let model = parse_model(document).map_err(|e| match e {
        ArtifactError::Json(source) => ModelError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ArtifactError::Model(e) => e,
    })?;

    tracing::info!(path = %path.display(), model = model.name(), "classifier loaded");
    Ok(model)
}

enum ArtifactError {
    Json(serde_json::Error),
    Model(ModelError),
}

impl From<ModelError> for ArtifactError {
    fn from(e: ModelError) -> Self {
        ArtifactError::Model(e)
    }
}

fn parse_model(document: Value) -> Result<Box<dyn Classifier>, ArtifactError> {
    if document.get("learner").is_some() {
        let doc: xgboost::XgbDocument =
            serde_json::from_value(document).map_err(ArtifactError::Json)?;
        return Ok(Box::new(xgboost::XgbModel::from_document(doc)?));
    }

    match document.get("kind").and_then(Value::as_str) {
        Some("logistic") => {
            let model: logistic::LogisticModel =
                serde_json::from_value(document).map_err(ArtifactError::Json)?;
            model.validate()?;
            Ok(Box::new(model))
        }
        Some(other) => Err(ModelError::UnsupportedFormat(format!("unknown model kind '{}'", other)).into()),
        None => Err(ModelError::UnsupportedFormat(
            "expected an XGBoost JSON model or a \"kind\": \"logistic\" document".to_string(),
        )
        .into()),
    }
}

/// Reject artifacts whose declared columns differ from the encoder layout.
///
/// An empty list means the artifact did not record feature names.
pub(crate) fn check_feature_names(declared: &[String]) -> Result<(), ModelError> {
    if declared.is_empty() {
        return Ok(());
    }
    if declared.len() != FEATURE_COUNT {
        return Err(ModelError::FeatureCount {
            expected: FEATURE_COUNT,
            found: declared.len(),
        });
    }
    for (position, (found, expected)) in declared.iter().zip(feature_names()).enumerate() {
        if found != expected {
            return Err(ModelError::FeatureMismatch {
                position,
                expected: expected.to_string(),
                found: found.clone(),
            });
        }
    }
    Ok(())
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_model(Path::new("/nonexistent/modele.json")).err().unwrap();
        assert!(matches!(err, ModelError::NotFound(_)));
        assert!(err.to_string().contains("was not found"));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"\x80\x04\x95\x1f\x00\x00\x00\x00\x00\x00\x00").unwrap();
        let err = load_model(f.path()).err().unwrap();
        assert!(matches!(err, ModelError::Parse { .. }));
        assert!(err.to_string().contains("not a valid model artifact"));
    }

    #[test]
    fn test_unknown_document_is_unsupported() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{"kind": "random_forest"}}"#).unwrap();
        let err = load_model(f.path()).err().unwrap();
        assert!(matches!(err, ModelError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_xgboost_fixture_from_disk() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", include_str!("../../fixtures/demo_xgboost_attrition.json")).unwrap();
        let model = load_model(f.path()).unwrap();
        assert!(model.name().starts_with("XGBoost"));
    }

    #[test]
    fn test_feature_names_checked_in_order() {
        let mut names: Vec<String> = feature_names().map(str::to_string).collect();
        assert!(check_feature_names(&names).is_ok());
        assert!(check_feature_names(&[]).is_ok());

        names.swap(0, 1);
        let err = check_feature_names(&names).unwrap_err();
        assert!(matches!(err, ModelError::FeatureMismatch { position: 0, .. }));

        names.pop();
        let err = check_feature_names(&names).unwrap_err();
        assert!(matches!(err, ModelError::FeatureCount { expected: 17, found: 16 }));
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(20.0) > 0.999);
        assert!(sigmoid(-20.0) < 0.001);
    }
}
