use serde::Deserialize;

use super::{check_feature_names, sigmoid, Classifier};
use crate::error::{ModelError, PredictionError};
use crate::features::{FeatureVector, FEATURE_COUNT};

// ---------------------------------------------------------------------------
// On-disk format (subset of XGBoost's JSON model schema)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct XgbDocument {
    learner: Learner,
}

#[derive(Debug, Deserialize)]
struct Learner {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: GradientBooster,
    learner_model_param: LearnerModelParam,
    objective: Objective,
}

#[derive(Debug, Deserialize)]
struct GradientBooster {
    name: String,
    model: Option<GbtreeModel>,
}

#[derive(Debug, Deserialize)]
struct GbtreeModel {
    trees: Vec<RawTree>,
}

/// Trees are stored as parallel arrays indexed by node id.
/// For leaves, `split_conditions` holds the leaf value.
#[derive(Debug, Deserialize)]
struct RawTree {
    left_children: Vec<i64>,
    right_children: Vec<i64>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct LearnerModelParam {
    base_score: String,
    #[serde(default)]
    num_class: Option<String>,
    #[serde(default)]
    num_feature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Objective {
    name: String,
}

// ---------------------------------------------------------------------------
// Evaluated model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_raw(index: usize, raw: RawTree) -> Result<Self, ModelError> {
        let malformed = |reason: String| ModelError::MalformedTree { tree: index, reason };

        let n = raw.left_children.len();
        if n == 0 {
            return Err(malformed("no nodes".to_string()));
        }
        if raw.right_children.len() != n
            || raw.split_indices.len() != n
            || raw.split_conditions.len() != n
        {
            return Err(malformed("node arrays have different lengths".to_string()));
        }

        let mut nodes = Vec::with_capacity(n);
        for id in 0..n {
            let (left, right) = (raw.left_children[id], raw.right_children[id]);
            if left == -1 {
                nodes.push(Node::Leaf(raw.split_conditions[id]));
                continue;
            }
            // Children always follow their parent, which also rules out cycles.
            let child = |c: i64| -> Result<usize, ModelError> {
                usize::try_from(c)
                    .ok()
                    .filter(|&c| c > id && c < n)
                    .ok_or_else(|| malformed(format!("node {} has invalid child {}", id, c)))
            };
            let feature = usize::try_from(raw.split_indices[id])
                .ok()
                .filter(|&f| f < FEATURE_COUNT)
                .ok_or_else(|| {
                    malformed(format!(
                        "node {} splits on feature {} (model input has {})",
                        id, raw.split_indices[id], FEATURE_COUNT
                    ))
                })?;
            nodes.push(Node::Split {
                feature,
                threshold: raw.split_conditions[id] as f32,
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Tree { nodes })
    }

    fn leaf_value(&self, x: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // XGBoost compares in single precision.
                    id = if (x[feature] as f32) < threshold { left } else { right };
                }
            }
        }
    }
}

/// Gradient-boosted tree ensemble with a logistic link.
#[derive(Debug, Clone)]
pub struct XgbModel {
    name: String,
    trees: Vec<Tree>,
    base_margin: f64,
}

impl XgbModel {
    pub fn from_document(doc: XgbDocument) -> Result<Self, ModelError> {
        let learner = doc.learner;

        let objective = learner.objective.name;
        if objective != "binary:logistic" && objective != "reg:logistic" {
            return Err(ModelError::UnsupportedObjective(objective));
        }

        let booster = learner.gradient_booster;
        let model = match (booster.name.as_str(), booster.model) {
            ("gbtree", Some(model)) => model,
            (name, _) => {
                return Err(ModelError::UnsupportedFormat(format!(
                    "booster '{}' (only gbtree is supported)",
                    name
                )))
            }
        };

        let params = learner.learner_model_param;
        if let Some(num_class) = params.num_class.as_deref() {
            let classes = parse_param(num_class)?;
            if classes > 1.0 {
                return Err(ModelError::UnsupportedFormat(format!(
                    "multi-class model with {} classes",
                    classes
                )));
            }
        }
        if let Some(num_feature) = params.num_feature.as_deref() {
            let found = parse_param(num_feature)? as usize;
            if found != FEATURE_COUNT {
                return Err(ModelError::FeatureCount {
                    expected: FEATURE_COUNT,
                    found,
                });
            }
        }
        check_feature_names(&learner.feature_names)?;

        let base_score = parse_param(&params.base_score)?;
        if !(base_score > 0.0 && base_score < 1.0) {
            return Err(ModelError::UnsupportedFormat(format!(
                "base_score {} is not a probability",
                base_score
            )));
        }

        let trees = model
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, raw)| Tree::from_raw(i, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(XgbModel {
            name: format!("XGBoost ({} trees)", trees.len()),
            trees,
            base_margin: (base_score / (1.0 - base_score)).ln(),
        })
    }

    /// Raw score before the logistic link.
    pub fn margin(&self, features: &FeatureVector) -> f64 {
        let x = features.as_slice();
        self.base_margin + self.trees.iter().map(|t| t.leaf_value(x)).sum::<f64>()
    }
}

impl Classifier for XgbModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let margin = self.margin(features);
        if margin.is_nan() {
            return Err(PredictionError::Classifier(format!(
                "{} produced an undefined margin",
                self.name
            )));
        }
        Ok(sigmoid(margin))
    }
}

/// XGBoost stores scalars as strings, sometimes wrapped in a one-element
/// vector: `"5E-1"` or `"[5E-1]"`.
fn parse_param(raw: &str) -> Result<f64, ModelError> {
    let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']').trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| ModelError::UnsupportedFormat(format!("cannot parse model parameter '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::encode;
    use crate::models::{InputRecord, MaritalStatus, OverTime};

    const DEMO: &str = include_str!("../../fixtures/demo_xgboost_attrition.json");

    fn demo_model() -> XgbModel {
        let doc: XgbDocument = serde_json::from_str(DEMO).unwrap();
        XgbModel::from_document(doc).unwrap()
    }

    fn with_trees(trees: &str) -> String {
        DEMO.replacen("\"trees\": [", &format!("\"trees\": [{},", trees), 1)
    }

    #[test]
    fn test_parse_param_forms() {
        assert_eq!(parse_param("5E-1").unwrap(), 0.5);
        assert_eq!(parse_param("[2.5E-1]").unwrap(), 0.25);
        assert!(parse_param("half").is_err());
    }

    #[test]
    fn test_demo_model_default_profile() {
        let model = demo_model();
        assert_eq!(model.trees.len(), 3);
        let v = encode(&InputRecord::default());
        // -0.4 (no overtime) + 0.35 (young, single) - 0.3 (tenured, satisfied)
        assert!((model.margin(&v) - (-0.35)).abs() < 1e-9);
        let p = model.predict_probability(&v).unwrap();
        assert!((p - sigmoid(-0.35)).abs() < 1e-9);
    }

    #[test]
    fn test_demo_model_overtime_raises_risk() {
        let model = demo_model();
        let record = InputRecord {
            overtime: OverTime::Yes,
            ..InputRecord::default()
        };
        let p = model.predict_probability(&encode(&record)).unwrap();
        assert!((p - sigmoid(0.65)).abs() < 1e-9);
        assert!(p > 0.5);
    }

    #[test]
    fn test_split_goes_left_only_when_strictly_below() {
        let model = demo_model();
        // Age 31 is past the 30.5 split; marital status no longer matters.
        let older = InputRecord {
            age: 31,
            marital_status: MaritalStatus::Married,
            ..InputRecord::default()
        };
        assert!((model.margin(&encode(&older)) - (-0.95)).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_wrong_objective() {
        let json = DEMO.replace("binary:logistic", "multi:softprob");
        let doc: XgbDocument = serde_json::from_str(&json).unwrap();
        let err = XgbModel::from_document(doc).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedObjective(_)));
    }

    #[test]
    fn test_rejects_reordered_feature_names() {
        let json = DEMO.replacen("\"Age\",", "\"AGE\",", 1);
        let doc: XgbDocument = serde_json::from_str(&json).unwrap();
        let err = XgbModel::from_document(doc).unwrap_err();
        assert!(matches!(err, ModelError::FeatureMismatch { position: 0, .. }));
    }

    #[test]
    fn test_rejects_out_of_range_feature_index() {
        let json = with_trees(
            r#"{"left_children": [1, -1, -1], "right_children": [2, -1, -1],
                "split_indices": [40, 0, 0], "split_conditions": [0.5, 0.1, 0.2]}"#,
        );
        let doc: XgbDocument = serde_json::from_str(&json).unwrap();
        let err = XgbModel::from_document(doc).unwrap_err();
        assert!(matches!(err, ModelError::MalformedTree { tree: 0, .. }));
    }

    #[test]
    fn test_rejects_backward_child_reference() {
        let json = with_trees(
            r#"{"left_children": [0, -1], "right_children": [1, -1],
                "split_indices": [0, 0], "split_conditions": [0.5, 0.1]}"#,
        );
        let doc: XgbDocument = serde_json::from_str(&json).unwrap();
        assert!(XgbModel::from_document(doc).is_err());
    }

    #[test]
    fn test_rejects_dart_booster() {
        let json = DEMO.replace("\"name\": \"gbtree\"", "\"name\": \"dart\"");
        let doc: XgbDocument = serde_json::from_str(&json).unwrap();
        let err = XgbModel::from_document(doc).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedFormat(_)));
    }
}
