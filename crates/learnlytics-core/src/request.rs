//! Outbound request schema and the submission gate.
//!
//! The service has been observed speaking two request shapes. Which one a
//! session emits is fixed by a [`SchemaVersion`] chosen when the session is
//! built, never inferred from the data at the call site.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::GradeLevel;
use crate::error::ValidationError;
use crate::model::{MetricsModel, ValidationPolicy};

/// Which wire shape to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// One flat record; no per-subject metrics.
    #[default]
    Flat,
    /// Nested general metrics plus per-subject mock test scores.
    Structured,
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" | "simple" => Ok(SchemaVersion::Flat),
            "structured" | "extended" => Ok(SchemaVersion::Structured),
            other => Err(format!("unknown schema version: {other}")),
        }
    }
}

/// Parsed general metrics as they go on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralMetricValues {
    pub study_hours: f64,
    pub attendance: f64,
    pub participation: f64,
}

/// Per-subject metrics (structured schema).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectMetrics {
    pub mock_test_score: f64,
}

/// The request body for `POST /api/predict`, immutable once built.
///
/// Serializes untagged into exactly the JSON shape the selected schema
/// version calls for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionRequest {
    Structured {
        grade_level: GradeLevel,
        general_metrics: GeneralMetricValues,
        subjects: Vec<String>,
        subject_metrics: BTreeMap<String, SubjectMetrics>,
    },
    Flat {
        subjects: Vec<String>,
        grade_level: GradeLevel,
        study_hours: f64,
        attendance: f64,
        participation: f64,
    },
}

impl PredictionRequest {
    pub fn grade_level(&self) -> GradeLevel {
        match self {
            PredictionRequest::Flat { grade_level, .. }
            | PredictionRequest::Structured { grade_level, .. } => *grade_level,
        }
    }

    pub fn subjects(&self) -> &[String] {
        match self {
            PredictionRequest::Flat { subjects, .. }
            | PredictionRequest::Structured { subjects, .. } => subjects,
        }
    }
}

/// Check the submission gate without building a request.
///
/// Rules short-circuit in order: general metrics, subject selection, then
/// (structured schema only) per-subject mock scores.
pub fn validate(
    model: &MetricsModel,
    schema: SchemaVersion,
    policy: ValidationPolicy,
) -> Result<(), ValidationError> {
    for (name, raw) in model.general().fields() {
        let raw = raw.trim();
        if raw.is_empty() {
            if policy == ValidationPolicy::Strict {
                return Err(ValidationError::MissingGeneralMetric(name));
            }
            continue;
        }
        if raw.parse::<f64>().is_err() {
            return Err(ValidationError::MissingGeneralMetric(name));
        }
    }

    if model.subjects().is_empty() {
        return Err(ValidationError::NoSubjectsSelected);
    }

    if schema == SchemaVersion::Structured {
        for subject in model.subjects() {
            let present = model
                .mock_score(subject)
                .map(|raw| raw.trim().parse::<f64>().is_ok())
                .unwrap_or(false);
            if !present {
                return Err(ValidationError::MissingSubjectMetric(subject.clone()));
            }
        }
    }

    Ok(())
}

/// Build the outbound request for a validated model.
///
/// Validates first; on success every numeric field equals the parsed text
/// input exactly. Under the lenient policy, absent fields go out as zero,
/// matching the service's own defaulting.
pub fn build_request(
    model: &MetricsModel,
    schema: SchemaVersion,
    policy: ValidationPolicy,
) -> Result<PredictionRequest, ValidationError> {
    validate(model, schema, policy)?;

    let general = GeneralMetricValues {
        study_hours: parse_or_zero(&model.general().study_hours),
        attendance: parse_or_zero(&model.general().attendance),
        participation: parse_or_zero(&model.general().participation),
    };
    let subjects = model.subjects().to_vec();

    Ok(match schema {
        SchemaVersion::Flat => PredictionRequest::Flat {
            subjects,
            grade_level: model.grade_level(),
            study_hours: general.study_hours,
            attendance: general.attendance,
            participation: general.participation,
        },
        SchemaVersion::Structured => {
            let subject_metrics = model
                .subjects()
                .iter()
                .map(|subject| {
                    // Validation already guaranteed a numeric score.
                    let score = parse_or_zero(model.mock_score(subject).unwrap_or(""));
                    (subject.clone(), SubjectMetrics { mock_test_score: score })
                })
                .collect();
            PredictionRequest::Structured {
                grade_level: model.grade_level(),
                general_metrics: general,
                subjects,
                subject_metrics,
            }
        }
    })
}

fn parse_or_zero(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(0.0)
}
