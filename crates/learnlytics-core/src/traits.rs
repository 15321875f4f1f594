//! The transport-facing trait the wizard submits through.
//!
//! Implemented by the `learnlytics-client` crate; the session only sees
//! this seam, so the state machine is testable without a network.

use async_trait::async_trait;

use crate::request::PredictionRequest;
use crate::result::PredictionResult;

/// A collaborator that turns a request into an analysis, usually over HTTP.
///
/// Implementations must resolve to either a payload conforming to
/// [`PredictionResult`] or a definite error; timeouts and cancellation live
/// here, not in the session.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Short name for logs (e.g. "http", "mock").
    fn name(&self) -> &str;

    /// Submit one prediction request and await the analysis.
    async fn predict(&self, request: &PredictionRequest) -> anyhow::Result<PredictionResult>;
}
