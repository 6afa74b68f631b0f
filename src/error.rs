use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the model artifact. All of them are fatal at startup.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("the file '{}' was not found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{}' is not a valid model artifact: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),
    #[error("unsupported objective '{0}' (expected binary:logistic)")]
    UnsupportedObjective(String),
    #[error("model expects {found} features, encoder produces {expected}")]
    FeatureCount { expected: usize, found: usize },
    #[error("feature {position} is '{found}' in the model but '{expected}' in the encoder")]
    FeatureMismatch {
        position: usize,
        expected: String,
        found: String,
    },
    #[error("tree {tree}: {reason}")]
    MalformedTree { tree: usize, reason: String },
}

/// A profile value outside the domain the form allows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} must be between {min} and {max}, got {value}")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: u32,
    pub min: u32,
    pub max: u32,
}

/// Per-request failures. They never affect the loaded classifier.
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("invalid profile: {0}")]
    Validation(#[from] ValidationError),
    #[error("classifier failed: {0}")]
    Classifier(String),
    #[error("classifier returned {0}, which is not a probability")]
    InvalidProbability(f64),
}
