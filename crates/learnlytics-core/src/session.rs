//! The wizard session: an explicit finite-state object gating the flow.
//!
//! All stage transitions and metric edits go through methods here, so the
//! whole flow is testable without a rendering environment. Submission is
//! split around the network call: [`Session::begin_submission`] validates
//! and produces the request, the driver awaits the transport, and
//! [`Session::complete_submission`] settles the outcome. The busy flag in
//! between keeps a second submission from starting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::GradeLevel;
use crate::error::SessionError;
use crate::model::{MetricsModel, ValidationPolicy};
use crate::request::{build_request, PredictionRequest, SchemaVersion};
use crate::result::PredictionResult;
use crate::traits::Predictor;

/// Where the user is in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Landing,
    GradeSelect,
    InputMetrics,
    Results,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Landing => write!(f, "landing"),
            Stage::GradeSelect => write!(f, "grade selection"),
            Stage::InputMetrics => write!(f, "input"),
            Stage::Results => write!(f, "results"),
        }
    }
}

/// Collapse/expand state for the resource groups on the results stage.
///
/// At most one group is open. Presentation state only; resets whenever the
/// held result is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionTracker {
    expanded: Option<String>,
}

impl ExpansionTracker {
    /// The currently open group, if any.
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn is_expanded(&self, subject: &str) -> bool {
        self.expanded.as_deref() == Some(subject)
    }

    /// Collapse when the key is already open, otherwise switch to it.
    pub fn toggle(&mut self, subject: &str) {
        if self.is_expanded(subject) {
            self.expanded = None;
        } else {
            self.expanded = Some(subject.to_string());
        }
    }

    pub fn reset(&mut self) {
        self.expanded = None;
    }
}

/// A single user's wizard session.
///
/// Owns the metrics model, the held result, the busy flag, and the
/// expansion tracker. Schema version and validation policy are fixed at
/// construction.
#[derive(Debug)]
pub struct Session {
    stage: Stage,
    schema: SchemaVersion,
    policy: ValidationPolicy,
    model: Option<MetricsModel>,
    result: Option<PredictionResult>,
    busy: bool,
    expansion: ExpansionTracker,
}

impl Session {
    pub fn new(schema: SchemaVersion, policy: ValidationPolicy) -> Self {
        Self {
            stage: Stage::Landing,
            schema,
            policy,
            model: None,
            result: None,
            busy: false,
            expansion: ExpansionTracker::default(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Whether a submission is awaiting the transport.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The metrics model, present from grade selection onward.
    pub fn model(&self) -> Option<&MetricsModel> {
        self.model.as_ref()
    }

    /// The held analysis, present on the results stage.
    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn expansion(&self) -> &ExpansionTracker {
        &self.expansion
    }

    fn expect_stage(&self, action: &'static str, expected: Stage) -> Result<(), SessionError> {
        if self.stage != expected {
            return Err(SessionError::WrongStage {
                action,
                stage: self.stage,
            });
        }
        Ok(())
    }

    fn model_for_edit(&mut self, action: &'static str) -> Result<&mut MetricsModel, SessionError> {
        let stage = self.stage;
        match (stage, self.model.as_mut()) {
            (Stage::InputMetrics, Some(model)) => Ok(model),
            _ => Err(SessionError::WrongStage { action, stage }),
        }
    }

    // --- Stage transitions -------------------------------------------------

    /// Landing → GradeSelect.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        self.expect_stage("begin", Stage::Landing)?;
        self.stage = Stage::GradeSelect;
        Ok(())
    }

    /// GradeSelect → InputMetrics. Resets everything collected so far; the
    /// chosen grade's catalog becomes the only valid selection pool.
    pub fn select_grade(&mut self, grade: GradeLevel) -> Result<(), SessionError> {
        self.expect_stage("select a grade level", Stage::GradeSelect)?;
        self.model = Some(MetricsModel::new(grade));
        self.stage = Stage::InputMetrics;
        Ok(())
    }

    /// InputMetrics → GradeSelect. Refused while a submission is in flight.
    pub fn back_to_grade_select(&mut self) -> Result<(), SessionError> {
        self.expect_stage("go back to grade selection", Stage::InputMetrics)?;
        if self.busy {
            return Err(SessionError::Busy);
        }
        self.stage = Stage::GradeSelect;
        Ok(())
    }

    /// Results → InputMetrics. Clears the previous analysis eagerly; the
    /// metrics model survives for correction and resubmission.
    pub fn new_prediction(&mut self) -> Result<(), SessionError> {
        self.expect_stage("start a new prediction", Stage::Results)?;
        self.result = None;
        self.expansion.reset();
        self.stage = Stage::InputMetrics;
        Ok(())
    }

    // --- Input-stage edits -------------------------------------------------

    pub fn set_study_hours(&mut self, raw: &str) -> Result<(), SessionError> {
        self.model_for_edit("edit study hours")?.general_mut().study_hours = raw.to_string();
        Ok(())
    }

    pub fn set_attendance(&mut self, raw: &str) -> Result<(), SessionError> {
        self.model_for_edit("edit attendance")?.general_mut().attendance = raw.to_string();
        Ok(())
    }

    pub fn set_participation(&mut self, raw: &str) -> Result<(), SessionError> {
        self.model_for_edit("edit participation")?.general_mut().participation = raw.to_string();
        Ok(())
    }

    /// Flip a subject's membership, returning whether it is now selected.
    pub fn toggle_subject(&mut self, subject: &str) -> Result<bool, SessionError> {
        let selected = self.model_for_edit("toggle a subject")?.toggle_subject(subject)?;
        Ok(selected)
    }

    /// Record the raw mock-test-score text for a selected subject.
    pub fn set_mock_score(&mut self, subject: &str, raw: &str) -> Result<(), SessionError> {
        self.model_for_edit("set a mock score")?.set_mock_score(subject, raw)?;
        Ok(())
    }

    // --- Submission --------------------------------------------------------

    /// Validate the model and produce the outbound request, marking the
    /// session busy. The caller performs the network call and settles it
    /// through [`Session::complete_submission`].
    pub fn begin_submission(&mut self) -> Result<PredictionRequest, SessionError> {
        if self.busy {
            return Err(SessionError::Busy);
        }
        let stage = self.stage;
        let model = match (stage, self.model.as_ref()) {
            (Stage::InputMetrics, Some(model)) => model,
            _ => {
                return Err(SessionError::WrongStage {
                    action: "submit",
                    stage,
                })
            }
        };
        let request = build_request(model, self.schema, self.policy)?;
        self.busy = true;
        Ok(request)
    }

    /// Settle the outcome of the call started by
    /// [`Session::begin_submission`].
    ///
    /// Success stores the analysis, resets the expansion tracker, and
    /// advances to the results stage. Failure is handed back to the caller;
    /// the session stays on the input stage with the model intact either
    /// way, and the busy flag is always cleared.
    pub fn complete_submission(
        &mut self,
        outcome: anyhow::Result<PredictionResult>,
    ) -> anyhow::Result<()> {
        if !self.busy {
            anyhow::bail!("no prediction request in flight");
        }
        self.busy = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.expansion.reset();
                self.stage = Stage::Results;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("prediction request failed: {err:#}");
                Err(err)
            }
        }
    }

    /// Run one full submission against a predictor: validate, call, settle.
    pub async fn submit(&mut self, predictor: &dyn Predictor) -> anyhow::Result<()> {
        let request = self.begin_submission()?;
        tracing::debug!(predictor = predictor.name(), grade = %request.grade_level(), "submitting");
        let outcome = predictor.predict(&request).await;
        self.complete_submission(outcome)
    }

    // --- Results stage -----------------------------------------------------

    /// Toggle one resource group open or closed.
    pub fn toggle_resource(&mut self, subject: &str) -> Result<(), SessionError> {
        self.expect_stage("expand a resource group", Stage::Results)?;
        self.expansion.toggle(subject);
        Ok(())
    }
}
