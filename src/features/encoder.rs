use serde::ser::{Serialize, SerializeMap, Serializer};

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};
use crate::models::InputRecord;

/// Model input: one value per [`FEATURE_LAYOUT`] column, in layout order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// `(column name, value)` pairs in model order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_LAYOUT.iter().map(|c| c.name).zip(self.0.iter().copied())
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Encode a profile into the classifier's input vector.
///
/// Total over every [`InputRecord`]: fields absent from the layout are
/// ignored and reference categories produce all-zero one-hot blocks.
pub fn encode(record: &InputRecord) -> FeatureVector {
    let mut values = [0.0; FEATURE_COUNT];
    for (slot, column) in values.iter_mut().zip(FEATURE_LAYOUT.iter()) {
        *slot = column.rule.apply(record);
    }
    FeatureVector(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BusinessTravel, Department, EducationField, Gender, JobRole, MaritalStatus, OverTime,
    };

    fn value_of(v: &FeatureVector, name: &str) -> Option<f64> {
        v.iter().find(|(n, _)| *n == name).map(|(_, value)| value)
    }

    fn block_sum(v: &FeatureVector, prefix: &str) -> f64 {
        v.iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(_, value)| value)
            .sum()
    }

    #[test]
    fn test_manager_in_sales_working_overtime() {
        let record = InputRecord {
            overtime: OverTime::Yes,
            job_role: JobRole::Manager,
            department: Department::Sales,
            marital_status: MaritalStatus::Single,
            age: 30,
            job_satisfaction: 3,
            years_in_current_role: 2,
            years_at_company: 5,
            ..InputRecord::default()
        };
        let expected = [
            30.0, 3.0, 2.0, 5.0, 1.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, //
            0.0, 1.0,
        ];
        assert_eq!(encode(&record).as_slice(), &expected);
    }

    #[test]
    fn test_reference_categories_encode_to_zero() {
        let record = InputRecord {
            department: Department::HumanResources,
            marital_status: MaritalStatus::Divorced,
            job_role: JobRole::HealthcareRepresentative,
            ..InputRecord::default()
        };
        let v = encode(&record);
        assert_eq!(block_sum(&v, "JobRole_"), 0.0);
        assert_eq!(block_sum(&v, "Department_"), 0.0);
        assert_eq!(block_sum(&v, "MaritalStatus_"), 0.0);
    }

    #[test]
    fn test_one_hot_blocks_sum_to_at_most_one() {
        let departments = [
            Department::Sales,
            Department::ResearchDevelopment,
            Department::HumanResources,
        ];
        let statuses = [
            MaritalStatus::Single,
            MaritalStatus::Married,
            MaritalStatus::Divorced,
        ];
        for role in JobRole::ALL {
            for department in departments {
                for marital_status in statuses {
                    let record = InputRecord {
                        job_role: role,
                        department,
                        marital_status,
                        ..InputRecord::default()
                    };
                    let v = encode(&record);
                    let role_sum = block_sum(&v, "JobRole_");
                    let expected_role = if role == JobRole::HealthcareRepresentative { 0.0 } else { 1.0 };
                    assert_eq!(role_sum, expected_role, "{role}");
                    let expected_dept = if department == Department::HumanResources { 0.0 } else { 1.0 };
                    assert_eq!(block_sum(&v, "Department_"), expected_dept);
                    let expected_status = if marital_status == MaritalStatus::Divorced { 0.0 } else { 1.0 };
                    assert_eq!(block_sum(&v, "MaritalStatus_"), expected_status);
                }
            }
        }
    }

    #[test]
    fn test_display_only_fields_do_not_reach_the_model() {
        let base = InputRecord::default();
        let changed = InputRecord {
            gender: Gender::Female,
            education: 5,
            education_field: EducationField::Medical,
            business_travel: BusinessTravel::TravelFrequently,
            distance_from_home: 49,
            monthly_income: 42_000,
            stock_option_level: 3,
            environment_satisfaction: 1,
            ..base.clone()
        };
        assert_eq!(encode(&base), encode(&changed));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let record = InputRecord {
            job_role: JobRole::ResearchDirector,
            ..InputRecord::default()
        };
        let first = encode(&record);
        let second = encode(&record);
        let bits = |v: &FeatureVector| v.as_slice().iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&first), bits(&second));
    }

    #[test]
    fn test_get_and_serialize_keep_column_order() {
        let v = encode(&InputRecord::default());
        assert_eq!(value_of(&v, "Age"), Some(30.0));
        assert_eq!(value_of(&v, "JobRole_Sales Executive"), Some(1.0));
        assert_eq!(value_of(&v, "Gender"), None);

        let json = serde_json::to_string(&v).unwrap();
        let age = json.find("\"Age\"").unwrap();
        let single = json.find("\"MaritalStatus_Single\"").unwrap();
        assert!(age < single);
    }
}
