use std::path::PathBuf;

use clap::Parser;

use crate::models::{
    BusinessTravel, Department, EducationField, Gender, JobRole, MaritalStatus, OverTime,
};
use crate::profile::ProfileOverrides;

#[derive(Parser, Debug)]
#[command(
    name = "hr-attrition",
    about = "Estimate an employee's attrition risk with a pre-trained classifier",
    version
)]
pub struct Cli {
    /// Model artifact (XGBoost JSON or logistic JSON) [default: modele_xgboost_attrition.json]
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Config file [default: ./.hr-attrition/config.toml, fallback ~/.config/hr-attrition/config.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Profile file (TOML) applied on top of the config defaults
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// PDF output path; use without value to default to attrition-report.pdf
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "attrition-report.pdf")]
    pub pdf: Option<PathBuf>,

    /// Also render the probability gauge as a PNG image
    #[arg(long, value_name = "FILE")]
    pub gauge: Option<PathBuf>,

    /// Exit with status 1 when the risk is HIGH
    #[arg(long)]
    pub fail_on_high: bool,

    /// Show the encoded feature vector
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,

    #[command(flatten)]
    pub employee: EmployeeArgs,
}

/// The sixteen profile fields. Unset flags fall back to the profile file,
/// the config `[profile]` table, then the form defaults.
#[derive(clap::Args, Debug, Default)]
pub struct EmployeeArgs {
    #[arg(long, help_heading = "Personal Details", value_parser = clap::value_parser!(u32).range(18..=65))]
    pub age: Option<u32>,

    #[arg(long, help_heading = "Personal Details", value_enum)]
    pub gender: Option<Gender>,

    #[arg(long, help_heading = "Personal Details", value_enum)]
    pub marital_status: Option<MaritalStatus>,

    /// 1: Below College, 5: Doctor
    #[arg(long, help_heading = "Personal Details", value_parser = clap::value_parser!(u32).range(1..=5))]
    pub education: Option<u32>,

    #[arg(long, help_heading = "Personal Details", value_enum)]
    pub education_field: Option<EducationField>,

    #[arg(long, help_heading = "Job Information", value_enum)]
    pub department: Option<Department>,

    #[arg(long, help_heading = "Job Information", value_enum)]
    pub job_role: Option<JobRole>,

    #[arg(long, help_heading = "Job Information", value_enum)]
    pub business_travel: Option<BusinessTravel>,

    /// Distance from home in km
    #[arg(long, help_heading = "Job Information", value_parser = clap::value_parser!(u32).range(1..=50))]
    pub distance_from_home: Option<u32>,

    /// Monthly income in $
    #[arg(long, help_heading = "Compensation & Conditions", value_parser = clap::value_parser!(u32).range(1000..=50000))]
    pub monthly_income: Option<u32>,

    #[arg(long, help_heading = "Compensation & Conditions", value_enum)]
    pub overtime: Option<OverTime>,

    #[arg(long, help_heading = "Compensation & Conditions", value_parser = clap::value_parser!(u32).range(0..=3))]
    pub stock_option_level: Option<u32>,

    /// 1 (low) to 4 (very high)
    #[arg(long, help_heading = "Satisfaction & Tenure", value_parser = clap::value_parser!(u32).range(1..=4))]
    pub job_satisfaction: Option<u32>,

    /// 1 (low) to 4 (very high)
    #[arg(long, help_heading = "Satisfaction & Tenure", value_parser = clap::value_parser!(u32).range(1..=4))]
    pub environment_satisfaction: Option<u32>,

    #[arg(long, help_heading = "Satisfaction & Tenure", value_parser = clap::value_parser!(u32).range(0..=40))]
    pub years_at_company: Option<u32>,

    #[arg(long, help_heading = "Satisfaction & Tenure", value_parser = clap::value_parser!(u32).range(0..=20))]
    pub years_in_current_role: Option<u32>,
}

impl From<&EmployeeArgs> for ProfileOverrides {
    fn from(args: &EmployeeArgs) -> Self {
        ProfileOverrides {
            age: args.age,
            gender: args.gender,
            marital_status: args.marital_status,
            education: args.education,
            education_field: args.education_field,
            department: args.department,
            job_role: args.job_role,
            business_travel: args.business_travel,
            distance_from_home: args.distance_from_home,
            monthly_income: args.monthly_income,
            overtime: args.overtime,
            stock_option_level: args.stock_option_level,
            job_satisfaction: args.job_satisfaction,
            environment_satisfaction: args.environment_satisfaction,
            years_at_company: args.years_at_company,
            years_in_current_role: args.years_in_current_role,
        }
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Pdf,
}
