use serde::Serialize;

use crate::error::{PredictionError, ValidationError};
use crate::features::{encode, FeatureVector};
use crate::model::Classifier;
use crate::models::{InputRecord, RiskClass};

/// Probabilities strictly above this are HIGH risk.
pub const RISK_THRESHOLD: f64 = 0.5;

pub const HIGH_RISK_MESSAGE: &str =
    "Initiate retention interview immediately. Review salary and work-life balance.";
pub const LOW_RISK_MESSAGE: &str = "Maintain current engagement strategies.";

/// Outcome of one prediction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub probability: f64,
    pub risk_class: RiskClass,
    pub message: &'static str,
    /// The exact vector the classifier saw.
    #[serde(skip_serializing)]
    pub features: FeatureVector,
}

impl Prediction {
    pub fn percentage(&self) -> f64 {
        self.probability * 100.0
    }

    /// `0.73` → `"73.0%"`.
    pub fn display_percentage(&self) -> String {
        format!("{:.1}%", self.percentage())
    }
}

pub fn classify_risk(probability: f64) -> RiskClass {
    if probability > RISK_THRESHOLD {
        RiskClass::High
    } else {
        RiskClass::Low
    }
}

pub fn recommendation(risk: RiskClass) -> &'static str {
    match risk {
        RiskClass::High => HIGH_RISK_MESSAGE,
        RiskClass::Low => LOW_RISK_MESSAGE,
    }
}

/// `(field, value, min, max)` for every numeric field; ranges are inclusive.
fn numeric_fields(r: &InputRecord) -> [(&'static str, u32, u32, u32); 9] {
    [
        ("age", r.age, 18, 65),
        ("education", r.education, 1, 5),
        ("distance_from_home", r.distance_from_home, 1, 50),
        ("monthly_income", r.monthly_income, 1000, 50_000),
        ("stock_option_level", r.stock_option_level, 0, 3),
        ("job_satisfaction", r.job_satisfaction, 1, 4),
        ("environment_satisfaction", r.environment_satisfaction, 1, 4),
        ("years_at_company", r.years_at_company, 0, 40),
        ("years_in_current_role", r.years_in_current_role, 0, 20),
    ]
}

/// Check every numeric field against the range the form allows.
pub fn validate(record: &InputRecord) -> Result<(), ValidationError> {
    for (field, value, min, max) in numeric_fields(record) {
        if value < min || value > max {
            return Err(ValidationError {
                field,
                value,
                min,
                max,
            });
        }
    }
    Ok(())
}

/// Runs encode → classify → risk mapping against an injected classifier.
pub struct Predictor {
    classifier: Box<dyn Classifier>,
}

impl Predictor {
    pub fn new(classifier: Box<dyn Classifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    pub fn predict(&self, record: &InputRecord) -> Result<Prediction, PredictionError> {
        validate(record)?;
        let features = encode(record);
        tracing::debug!(features = ?features.as_slice(), "encoded profile");

        let probability = self.classifier.predict_probability(&features)?;
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(PredictionError::InvalidProbability(probability));
        }

        let risk_class = classify_risk(probability);
        tracing::info!(probability, risk = %risk_class, "prediction complete");

        Ok(Prediction {
            probability,
            risk_class,
            message: recommendation(risk_class),
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, JobRole, MaritalStatus, OverTime};

    struct Fixed(f64);

    impl Classifier for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict_probability(&self, _: &FeatureVector) -> Result<f64, PredictionError> {
            Ok(self.0)
        }
    }

    struct Failing;

    impl Classifier for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict_probability(&self, _: &FeatureVector) -> Result<f64, PredictionError> {
            Err(PredictionError::Classifier("shape mismatch".to_string()))
        }
    }

    fn predictor(p: f64) -> Predictor {
        Predictor::new(Box::new(Fixed(p)))
    }

    #[test]
    fn test_stub_073_is_high() {
        let prediction = predictor(0.73).predict(&InputRecord::default()).unwrap();
        assert_eq!(prediction.risk_class, RiskClass::High);
        assert_eq!(prediction.message, HIGH_RISK_MESSAGE);
        assert_eq!(prediction.display_percentage(), "73.0%");
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(classify_risk(0.5), RiskClass::Low);
        assert_eq!(classify_risk(0.500001), RiskClass::High);
        let at = predictor(0.5).predict(&InputRecord::default()).unwrap();
        assert_eq!(at.risk_class, RiskClass::Low);
        assert_eq!(at.message, LOW_RISK_MESSAGE);
    }

    #[test]
    fn test_predict_is_idempotent() {
        let p = predictor(0.31);
        let record = InputRecord {
            overtime: OverTime::Yes,
            job_role: JobRole::Manager,
            department: Department::ResearchDevelopment,
            marital_status: MaritalStatus::Married,
            ..InputRecord::default()
        };
        assert_eq!(p.predict(&record).unwrap(), p.predict(&record).unwrap());
    }

    #[test]
    fn test_prediction_carries_encoded_vector() {
        let record = InputRecord::default();
        let prediction = predictor(0.2).predict(&record).unwrap();
        assert_eq!(prediction.features, encode(&record));
    }

    #[test]
    fn test_out_of_range_profile_is_validation_error() {
        let record = InputRecord {
            age: 70,
            ..InputRecord::default()
        };
        let err = predictor(0.2).predict(&record).unwrap_err();
        match err {
            PredictionError::Validation(v) => {
                assert_eq!(v.field, "age");
                assert_eq!((v.min, v.max, v.value), (18, 65, 70));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let err = predictor(1.2).predict(&InputRecord::default()).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidProbability(_)));
        let err = predictor(f64::NAN).predict(&InputRecord::default()).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidProbability(_)));
    }

    #[test]
    fn test_classifier_failure_is_per_request() {
        let p = Predictor::new(Box::new(Failing));
        assert!(p.predict(&InputRecord::default()).is_err());
        assert!(p.predict(&InputRecord::default()).is_err());
        assert_eq!(p.classifier_name(), "failing");
    }
}
