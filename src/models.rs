use serde::{Deserialize, Serialize};

/// Raw employee profile, one per interaction.
///
/// Only part of it feeds the classifier (see [`crate::features::layout`]); the
/// remaining fields are collected for the profile summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub age: u32,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub education: u32,
    pub education_field: EducationField,
    pub department: Department,
    pub job_role: JobRole,
    pub business_travel: BusinessTravel,
    pub distance_from_home: u32,
    pub monthly_income: u32,
    pub overtime: OverTime,
    pub stock_option_level: u32,
    pub job_satisfaction: u32,
    pub environment_satisfaction: u32,
    pub years_at_company: u32,
    pub years_in_current_role: u32,
}

impl Default for InputRecord {
    /// The profile the form opens with.
    fn default() -> Self {
        InputRecord {
            age: 30,
            gender: Gender::Male,
            marital_status: MaritalStatus::Single,
            education: 3,
            education_field: EducationField::LifeSciences,
            department: Department::Sales,
            job_role: JobRole::SalesExecutive,
            business_travel: BusinessTravel::NonTravel,
            distance_from_home: 5,
            monthly_income: 5000,
            overtime: OverTime::No,
            stock_option_level: 1,
            job_satisfaction: 3,
            environment_satisfaction: 3,
            years_at_company: 5,
            years_in_current_role: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
}

impl std::fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaritalStatus::Single => write!(f, "Single"),
            MaritalStatus::Married => write!(f, "Married"),
            MaritalStatus::Divorced => write!(f, "Divorced"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum EducationField {
    #[serde(rename = "Life Sciences")]
    LifeSciences,
    Medical,
    Marketing,
    #[serde(rename = "Technical Degree")]
    TechnicalDegree,
    Other,
}

impl std::fmt::Display for EducationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EducationField::LifeSciences => write!(f, "Life Sciences"),
            EducationField::Medical => write!(f, "Medical"),
            EducationField::Marketing => write!(f, "Marketing"),
            EducationField::TechnicalDegree => write!(f, "Technical Degree"),
            EducationField::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Department {
    Sales,
    #[serde(rename = "Research & Development")]
    #[value(name = "research-development")]
    ResearchDevelopment,
    #[serde(rename = "Human Resources")]
    HumanResources,
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Department::Sales => write!(f, "Sales"),
            Department::ResearchDevelopment => write!(f, "Research & Development"),
            Department::HumanResources => write!(f, "Human Resources"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum JobRole {
    #[serde(rename = "Sales Executive")]
    SalesExecutive,
    #[serde(rename = "Research Scientist")]
    ResearchScientist,
    #[serde(rename = "Laboratory Technician")]
    LaboratoryTechnician,
    #[serde(rename = "Manufacturing Director")]
    ManufacturingDirector,
    #[serde(rename = "Healthcare Representative")]
    HealthcareRepresentative,
    Manager,
    #[serde(rename = "Sales Representative")]
    SalesRepresentative,
    #[serde(rename = "Research Director")]
    ResearchDirector,
    #[serde(rename = "Human Resources")]
    HumanResources,
}

#[cfg(test)]
impl JobRole {
    /// Every role the form offers, in drop-down order.
    pub const ALL: [JobRole; 9] = [
        JobRole::SalesExecutive,
        JobRole::ResearchScientist,
        JobRole::LaboratoryTechnician,
        JobRole::ManufacturingDirector,
        JobRole::HealthcareRepresentative,
        JobRole::Manager,
        JobRole::SalesRepresentative,
        JobRole::ResearchDirector,
        JobRole::HumanResources,
    ];
}

impl std::fmt::Display for JobRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobRole::SalesExecutive => write!(f, "Sales Executive"),
            JobRole::ResearchScientist => write!(f, "Research Scientist"),
            JobRole::LaboratoryTechnician => write!(f, "Laboratory Technician"),
            JobRole::ManufacturingDirector => write!(f, "Manufacturing Director"),
            JobRole::HealthcareRepresentative => write!(f, "Healthcare Representative"),
            JobRole::Manager => write!(f, "Manager"),
            JobRole::SalesRepresentative => write!(f, "Sales Representative"),
            JobRole::ResearchDirector => write!(f, "Research Director"),
            JobRole::HumanResources => write!(f, "Human Resources"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum BusinessTravel {
    #[serde(rename = "Non-Travel")]
    NonTravel,
    #[serde(rename = "Travel_Rarely")]
    TravelRarely,
    #[serde(rename = "Travel_Frequently")]
    TravelFrequently,
}

impl std::fmt::Display for BusinessTravel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusinessTravel::NonTravel => write!(f, "Non-Travel"),
            BusinessTravel::TravelRarely => write!(f, "Travel_Rarely"),
            BusinessTravel::TravelFrequently => write!(f, "Travel_Frequently"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum OverTime {
    Yes,
    No,
}

impl std::fmt::Display for OverTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverTime::Yes => write!(f, "Yes"),
            OverTime::No => write!(f, "No"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskClass {
    Low,
    High,
}

impl std::fmt::Display for RiskClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskClass::Low => write!(f, "LOW"),
            RiskClass::High => write!(f, "HIGH"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_serialize_with_display_labels() {
        let json = serde_json::to_string(&Department::ResearchDevelopment).unwrap();
        assert_eq!(json, "\"Research & Development\"");
        let json = serde_json::to_string(&BusinessTravel::TravelRarely).unwrap();
        assert_eq!(json, "\"Travel_Rarely\"");
        assert_eq!(serde_json::to_string(&RiskClass::High).unwrap(), "\"HIGH\"");
    }

    #[test]
    fn test_display_matches_serde_label() {
        for role in JobRole::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let parsed: Result<MaritalStatus, _> = serde_json::from_str("\"Widowed\"");
        assert!(parsed.is_err());
    }
}
