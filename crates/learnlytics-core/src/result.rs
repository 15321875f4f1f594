//! Inbound analysis model returned by the prediction service.
//!
//! The core never computes any of this; it only carries the response for
//! display. Both observed service variants parse into the same canonical
//! shapes: the richer variant's extra fields are optional and the simpler
//! variant's omissions default to empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The full analysis for one prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Mean of the predicted scores, as computed by the service.
    pub overall_average: f64,
    /// Per-subject predictions keyed by subject name.
    pub predictions: BTreeMap<String, SubjectPrediction>,
    /// Subjects the service flagged as needing attention.
    pub weak_subjects: Vec<WeakSubject>,
    /// Subjects the service flagged as strong (richer variant only).
    #[serde(default)]
    pub strong_subjects: Vec<String>,
    /// Advisory messages (richer variant only).
    #[serde(default)]
    pub insights: Vec<Insight>,
    /// Learning-resource bundles keyed by subject.
    pub resources: BTreeMap<String, ResourceBundle>,
}

/// One subject's predicted outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectPrediction {
    pub score: f64,
    /// Class mean the score is compared against.
    pub mean: f64,
    pub status: SubjectStatus,
    /// Letter grade (richer variant only).
    #[serde(default)]
    pub grade: Option<String>,
    /// Signed distance from the class mean (richer variant only).
    #[serde(default)]
    pub diff_from_mean: Option<f64>,
}

/// Strong/weak classification assigned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectStatus {
    Strong,
    /// The simpler service variant spells this `needs_improvement`.
    #[serde(alias = "needs_improvement")]
    Weak,
}

/// Canonical weak-subject entry.
///
/// The richer service variant sends `{ name, score, diff }` objects; the
/// simpler one sends bare subject names, which land here with no numerics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeakSubject {
    pub name: String,
    pub score: Option<f64>,
    pub diff: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeakSubjectRepr {
    Rich {
        name: String,
        #[serde(default)]
        score: Option<f64>,
        #[serde(default)]
        diff: Option<f64>,
    },
    Bare(String),
}

impl<'de> Deserialize<'de> for WeakSubject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match WeakSubjectRepr::deserialize(deserializer)? {
            WeakSubjectRepr::Rich { name, score, diff } => WeakSubject { name, score, diff },
            WeakSubjectRepr::Bare(name) => WeakSubject {
                name,
                score: None,
                diff: None,
            },
        })
    }
}

/// A short advisory message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
}

/// Grouped learning materials for one subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBundle {
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub practice: Vec<String>,
    #[serde(default)]
    pub books: Vec<String>,
    /// Absent in the simpler service variant.
    #[serde(default)]
    pub tips: Vec<String>,
}
