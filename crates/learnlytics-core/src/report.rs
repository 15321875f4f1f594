//! Persisted record of one completed prediction cycle.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::GradeLevel;
use crate::request::{PredictionRequest, SchemaVersion};
use crate::result::PredictionResult;

/// What went out and what came back, stamped and identifiable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub grade_level: GradeLevel,
    pub schema: SchemaVersion,
    pub request: PredictionRequest,
    pub result: PredictionResult,
}

impl PredictionReport {
    pub fn new(
        schema: SchemaVersion,
        request: PredictionRequest,
        result: PredictionResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            grade_level: request.grade_level(),
            schema,
            request,
            result,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        Ok(())
    }

    /// Read a report back from JSON.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse report: {}", path.display()))
    }
}
