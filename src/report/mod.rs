//! Renderers for a prediction.
//!
//! - [`terminal`] — colored banner, text gauge and profile table; respects `--verbose` / `--quiet`.
//! - [`pdf`] — single-page PDF with gauge, recommendation, profile summary and model input.
//! - [`png`] — the gauge alone as a bitmap.
//! - [`gauge`] — band colours and half-circle geometry shared by the three.

pub mod gauge;
pub mod pdf;
pub mod png;
pub mod terminal;

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::features::FeatureVector;
use crate::models::InputRecord;
use crate::predict::Prediction;

pub const METHODOLOGY_NOTE: &str = "The model focuses on 17 specific factors including OverTime, \
Role, Age, and Satisfaction. Other inputs are collected for profile completeness.";

/// Everything a report shows about one interaction.
#[derive(Debug, Serialize)]
pub struct Assessment<'a> {
    pub model: &'a str,
    pub record: &'a InputRecord,
    pub features: &'a FeatureVector,
    pub prediction: &'a Prediction,
}

impl<'a> Assessment<'a> {
    pub fn new(model: &'a str, record: &'a InputRecord, prediction: &'a Prediction) -> Self {
        Assessment {
            model,
            record,
            features: &prediction.features,
            prediction,
        }
    }
}

/// Write the assessment as a pretty-printed JSON document, the only thing
/// `--report json` puts on stdout.
pub fn write_json<W: Write>(assessment: &Assessment<'_>, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, assessment)?;
    writeln!(out)?;
    Ok(())
}

/// The "Profile Summary" rows: key indicators as the form displays them.
pub fn profile_summary(record: &InputRecord) -> Vec<(&'static str, String)> {
    vec![
        ("Age", record.age.to_string()),
        ("Role", record.job_role.to_string()),
        ("Department", record.department.to_string()),
        ("Income", format!("${}", record.monthly_income)),
        ("OverTime", record.overtime.to_string()),
        ("Distance", format!("{} km", record.distance_from_home)),
    ]
}
