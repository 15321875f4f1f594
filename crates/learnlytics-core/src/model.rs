//! The metrics model: everything collected between grade selection and
//! submission.
//!
//! Numeric fields hold the text exactly as the user entered it. Parsing
//! happens at the submission gate, so a half-filled form never loses input
//! and a correction never requires re-entering other fields.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::GradeLevel;
use crate::error::ModelError;

/// Raw user-entered general study metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralMetrics {
    /// Weekly study hours (expected 0-40).
    #[serde(default)]
    pub study_hours: String,
    /// Attendance percentage (expected 0-100).
    #[serde(default)]
    pub attendance: String,
    /// Class participation (expected 0-10).
    #[serde(default)]
    pub participation: String,
}

impl GeneralMetrics {
    /// Field name / raw value pairs in validation order.
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("study_hours", self.study_hours.as_str()),
            ("attendance", self.attendance.as_str()),
            ("participation", self.participation.as_str()),
        ]
    }
}

/// How strictly the submission gate treats the general metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// All three general metrics must be present and numeric.
    #[default]
    Strict,
    /// Absent fields are allowed and default to zero on the wire; present
    /// fields must still parse.
    Lenient,
}

impl FromStr for ValidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(ValidationPolicy::Strict),
            "lenient" => Ok(ValidationPolicy::Lenient),
            other => Err(format!("unknown validation policy: {other}")),
        }
    }
}

/// Everything collected for one prediction cycle.
///
/// Subject selection keeps insertion order (display order only) and is
/// always a subset of the grade level's catalog. Every selected subject has
/// a mock-score entry, created empty on selection and discarded on
/// deselection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsModel {
    grade_level: GradeLevel,
    #[serde(default)]
    general: GeneralMetrics,
    #[serde(default)]
    subjects: Vec<String>,
    #[serde(default)]
    mock_scores: HashMap<String, String>,
}

impl MetricsModel {
    /// Empty model for a freshly chosen grade level.
    pub fn new(grade_level: GradeLevel) -> Self {
        Self {
            grade_level,
            general: GeneralMetrics::default(),
            subjects: Vec::new(),
            mock_scores: HashMap::new(),
        }
    }

    pub fn grade_level(&self) -> GradeLevel {
        self.grade_level
    }

    pub fn general(&self) -> &GeneralMetrics {
        &self.general
    }

    pub fn general_mut(&mut self) -> &mut GeneralMetrics {
        &mut self.general
    }

    /// Selected subjects in selection order.
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn is_selected(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    /// Raw mock-score text for a selected subject.
    pub fn mock_score(&self, subject: &str) -> Option<&str> {
        self.mock_scores.get(subject).map(String::as_str)
    }

    /// Flip a subject's membership, returning whether it is now selected.
    ///
    /// Selecting creates an empty mock-score entry; deselecting discards it.
    /// Each call flips exactly once, so toggling twice restores the original
    /// membership.
    pub fn toggle_subject(&mut self, subject: &str) -> Result<bool, ModelError> {
        if !self.grade_level.offers(subject) {
            return Err(ModelError::UnknownSubject {
                subject: subject.to_string(),
                grade: self.grade_level.display_name().to_string(),
            });
        }
        if let Some(pos) = self.subjects.iter().position(|s| s == subject) {
            self.subjects.remove(pos);
            self.mock_scores.remove(subject);
            Ok(false)
        } else {
            self.subjects.push(subject.to_string());
            self.mock_scores.insert(subject.to_string(), String::new());
            Ok(true)
        }
    }

    /// Record the raw mock-test-score text for a selected subject.
    pub fn set_mock_score(&mut self, subject: &str, raw: &str) -> Result<(), ModelError> {
        if !self.is_selected(subject) {
            return Err(ModelError::NotSelected(subject.to_string()));
        }
        self.mock_scores.insert(subject.to_string(), raw.to_string());
        Ok(())
    }
}
