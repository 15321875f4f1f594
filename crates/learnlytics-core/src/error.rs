//! Error types for the wizard core.
//!
//! Every failure here is recoverable: validation and session errors leave the
//! collected metrics untouched so the user can correct and resubmit.

use thiserror::Error;

use crate::session::Stage;

/// A submission-gate violation.
///
/// Rules are checked in declaration order and the first violated rule is
/// surfaced; nothing is silently dropped or defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required general metric is empty or does not parse as a number.
    #[error("missing or non-numeric value for {0}")]
    MissingGeneralMetric(&'static str),

    /// The subject selection is empty.
    #[error("select at least one subject before requesting a prediction")]
    NoSubjectsSelected,

    /// A selected subject has no mock test score (structured schema only).
    /// Names the first offender in selection order.
    #[error("missing mock test score for {0}")]
    MissingSubjectMetric(String),
}

/// An invalid edit to the metrics model outside the submission gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The subject is not in the chosen grade level's catalog.
    #[error("subject '{subject}' is not offered for {grade}")]
    UnknownSubject { subject: String, grade: String },

    /// A mock score was supplied for a subject that is not selected.
    #[error("subject '{0}' is not selected")]
    NotSelected(String),
}

/// A stage-machine violation: the action is not legal right now.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The action belongs to a different stage.
    #[error("cannot {action} from the {stage} stage")]
    WrongStage {
        action: &'static str,
        stage: Stage,
    },

    /// A prediction request is already in flight.
    #[error("a prediction request is already in flight")]
    Busy,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
