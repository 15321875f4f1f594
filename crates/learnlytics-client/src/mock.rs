//! Mock predictor for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use learnlytics_core::request::PredictionRequest;
use learnlytics_core::result::PredictionResult;
use learnlytics_core::traits::Predictor;

use crate::error::ClientError;

/// A scripted predictor for driving the session without a server.
///
/// Records every request so tests can assert on what actually went out.
pub struct MockPredictor {
    /// Outcome returned on every call.
    outcome: Result<PredictionResult, String>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<PredictionRequest>>,
}

impl MockPredictor {
    /// A mock that always succeeds with the given analysis.
    pub fn with_result(result: PredictionResult) -> Self {
        Self {
            outcome: Ok(result),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// A mock that always fails as if the service returned `{error}`.
    pub fn with_service_error(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of calls made to this predictor.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The last request made to this predictor.
    pub fn last_request(&self) -> Option<PredictionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Predictor for MockPredictor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn predict(&self, request: &PredictionRequest) -> anyhow::Result<PredictionResult> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.outcome {
            Ok(result) => Ok(result.clone()),
            Err(message) => Err(ClientError::Service(message.clone()).into()),
        }
    }
}
