use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{
    BusinessTravel, Department, EducationField, Gender, InputRecord, JobRole, MaritalStatus,
    OverTime,
};

/// A partial profile. Each layer (config `[profile]`, `--profile` file, CLI
/// flags) sets only the fields it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverrides {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub education: Option<u32>,
    pub education_field: Option<EducationField>,
    pub department: Option<Department>,
    pub job_role: Option<JobRole>,
    pub business_travel: Option<BusinessTravel>,
    pub distance_from_home: Option<u32>,
    pub monthly_income: Option<u32>,
    pub overtime: Option<OverTime>,
    pub stock_option_level: Option<u32>,
    pub job_satisfaction: Option<u32>,
    pub environment_satisfaction: Option<u32>,
    pub years_at_company: Option<u32>,
    pub years_in_current_role: Option<u32>,
}

macro_rules! overlay {
    ($record:expr, $overrides:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $overrides.$field {
                $record.$field = value;
            }
        )+
    };
}

impl ProfileOverrides {
    /// Write every field this layer sets onto `record`.
    pub fn apply(&self, record: &mut InputRecord) {
        overlay!(
            record,
            self,
            age,
            gender,
            marital_status,
            education,
            education_field,
            department,
            job_role,
            business_travel,
            distance_from_home,
            monthly_income,
            overtime,
            stock_option_level,
            job_satisfaction,
            environment_satisfaction,
            years_at_company,
            years_in_current_role,
        );
    }
}

/// Read a profile file (TOML, same keys as the config `[profile]` table).
pub fn load_profile(path: &Path) -> Result<ProfileOverrides> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid profile {}", path.display()))
}

/// Fold layers over the built-in defaults; later layers win.
pub fn build_record<'a>(layers: impl IntoIterator<Item = &'a ProfileOverrides>) -> InputRecord {
    let mut record = InputRecord::default();
    for layer in layers {
        layer.apply(&mut record);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_later_layers_win() {
        let config = ProfileOverrides {
            age: Some(45),
            job_role: Some(JobRole::Manager),
            ..Default::default()
        };
        let cli = ProfileOverrides {
            age: Some(52),
            ..Default::default()
        };
        let record = build_record([&config, &cli]);
        assert_eq!(record.age, 52);
        assert_eq!(record.job_role, JobRole::Manager);
        assert_eq!(record.department, Department::Sales);
    }

    #[test]
    fn test_no_layers_gives_defaults() {
        assert_eq!(build_record(std::iter::empty()), InputRecord::default());
    }

    #[test]
    fn test_load_profile_toml() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"
age = 41
department = "Research & Development"
job_role = "Healthcare Representative"
business_travel = "Travel_Frequently"
overtime = "Yes"
"#
        )
        .unwrap();
        let overrides = load_profile(f.path()).unwrap();
        let record = build_record([&overrides]);
        assert_eq!(record.age, 41);
        assert_eq!(record.department, Department::ResearchDevelopment);
        assert_eq!(record.job_role, JobRole::HealthcareRepresentative);
        assert_eq!(record.business_travel, BusinessTravel::TravelFrequently);
        assert_eq!(record.overtime, OverTime::Yes);
    }

    #[test]
    fn test_unknown_category_in_profile_is_rejected() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "marital_status = \"Widowed\"").unwrap();
        assert!(load_profile(f.path()).is_err());
    }

    #[test]
    fn test_unknown_key_in_profile_is_rejected() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "salary = 9000").unwrap();
        assert!(load_profile(f.path()).is_err());
    }
}
