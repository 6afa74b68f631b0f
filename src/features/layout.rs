use crate::models::{Department, InputRecord, JobRole, MaritalStatus, OverTime};

/// Number of columns the classifier consumes.
pub const FEATURE_COUNT: usize = 17;

/// Profile fields that reach the model unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Age,
    JobSatisfaction,
    YearsInCurrentRole,
    YearsAtCompany,
}

/// How a single column is derived from an [`InputRecord`].
///
/// One-hot rules name the category they indicate. A category without a column
/// in [`FEATURE_LAYOUT`] (Healthcare Representative, the Human Resources
/// department, Divorced) is the reference level and encodes as all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureRule {
    Passthrough(NumericField),
    /// 1 when the employee works overtime.
    OverTimeFlag,
    JobRole(JobRole),
    Department(Department),
    MaritalStatus(MaritalStatus),
}

impl FeatureRule {
    pub fn apply(&self, record: &InputRecord) -> f64 {
        match *self {
            FeatureRule::Passthrough(field) => f64::from(match field {
                NumericField::Age => record.age,
                NumericField::JobSatisfaction => record.job_satisfaction,
                NumericField::YearsInCurrentRole => record.years_in_current_role,
                NumericField::YearsAtCompany => record.years_at_company,
            }),
            FeatureRule::OverTimeFlag => indicator(record.overtime == OverTime::Yes),
            FeatureRule::JobRole(role) => indicator(record.job_role == role),
            FeatureRule::Department(dept) => indicator(record.department == dept),
            FeatureRule::MaritalStatus(status) => indicator(record.marital_status == status),
        }
    }

    /// The one-hot block this rule belongs to, if any.
    pub fn block(&self) -> Option<&'static str> {
        match self {
            FeatureRule::JobRole(_) => Some("JobRole"),
            FeatureRule::Department(_) => Some("Department"),
            FeatureRule::MaritalStatus(_) => Some("MaritalStatus"),
            FeatureRule::Passthrough(_) | FeatureRule::OverTimeFlag => None,
        }
    }
}

fn indicator(hit: bool) -> f64 {
    if hit {
        1.0
    } else {
        0.0
    }
}

/// A named column of the model input.
#[derive(Debug, Clone, Copy)]
pub struct FeatureColumn {
    pub name: &'static str,
    pub rule: FeatureRule,
}

const fn column(name: &'static str, rule: FeatureRule) -> FeatureColumn {
    FeatureColumn { name, rule }
}

/// Column order the classifier was trained on. Reordering this table changes
/// every prediction without any runtime error.
pub const FEATURE_LAYOUT: [FeatureColumn; FEATURE_COUNT] = [
    column("Age", FeatureRule::Passthrough(NumericField::Age)),
    column("JobSatisfaction", FeatureRule::Passthrough(NumericField::JobSatisfaction)),
    column("YearsInCurrentRole", FeatureRule::Passthrough(NumericField::YearsInCurrentRole)),
    column("YearsAtCompany", FeatureRule::Passthrough(NumericField::YearsAtCompany)),
    column("OverTime", FeatureRule::OverTimeFlag),
    column("JobRole_Human Resources", FeatureRule::JobRole(JobRole::HumanResources)),
    column("JobRole_Laboratory Technician", FeatureRule::JobRole(JobRole::LaboratoryTechnician)),
    column("JobRole_Manager", FeatureRule::JobRole(JobRole::Manager)),
    column("JobRole_Manufacturing Director", FeatureRule::JobRole(JobRole::ManufacturingDirector)),
    column("JobRole_Research Director", FeatureRule::JobRole(JobRole::ResearchDirector)),
    column("JobRole_Research Scientist", FeatureRule::JobRole(JobRole::ResearchScientist)),
    column("JobRole_Sales Executive", FeatureRule::JobRole(JobRole::SalesExecutive)),
    column("JobRole_Sales Representative", FeatureRule::JobRole(JobRole::SalesRepresentative)),
    column(
        "Department_Research & Development",
        FeatureRule::Department(Department::ResearchDevelopment),
    ),
    column("Department_Sales", FeatureRule::Department(Department::Sales)),
    column("MaritalStatus_Married", FeatureRule::MaritalStatus(MaritalStatus::Married)),
    column("MaritalStatus_Single", FeatureRule::MaritalStatus(MaritalStatus::Single)),
];

/// Column names in model order.
pub fn feature_names() -> impl Iterator<Item = &'static str> {
    FEATURE_LAYOUT.iter().map(|c| c.name)
}
