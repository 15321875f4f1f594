//! HTTP transport to the prediction service.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use learnlytics_core::catalog::GradeLevel;
use learnlytics_core::request::PredictionRequest;
use learnlytics_core::result::PredictionResult;
use learnlytics_core::traits::Predictor;

use crate::config::ClientConfig;
use crate::error::ClientError;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The real predictor: `POST /api/predict` against a running service.
pub struct HttpPredictor {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

/// Error body the service sends alongside non-2xx statuses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Response of `GET /api/subjects/{grade_level}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectList {
    pub subjects: Vec<String>,
    pub grade_level: GradeLevel,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

impl HttpPredictor {
    pub fn new(base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs,
            client,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(Some(config.api_url.clone()), Some(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout_secs)
        } else {
            ClientError::Network(err.to_string())
        }
    }

    /// Triage a response: pass 2xx through, otherwise classify the failure.
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
            return Err(ClientError::Service(parsed.error));
        }
        Err(ClientError::Api { status: code })
    }

    /// The subject catalog as the service sees it.
    #[instrument(skip(self), fields(grade = %grade))]
    pub async fn subjects(&self, grade: GradeLevel) -> Result<SubjectList, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/subjects/{}", self.base_url, grade))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let response = self.check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }

    /// Service liveness probe.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let response = self.check(response).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(grade = %request.grade_level()))]
    async fn predict(&self, request: &PredictionRequest) -> anyhow::Result<PredictionResult> {
        let response = self
            .client
            .post(format!("{}/api/predict", self.base_url))
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let response = self.check(response).await?;
        let result: PredictionResult = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnlytics_core::catalog::GradeLevel;
    use learnlytics_core::model::{MetricsModel, ValidationPolicy};
    use learnlytics_core::request::{build_request, SchemaVersion};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> PredictionRequest {
        let mut model = MetricsModel::new(GradeLevel::HighSchool);
        model.general_mut().study_hours = "8.5".into();
        model.general_mut().attendance = "85".into();
        model.general_mut().participation = "7.2".into();
        model.toggle_subject("HS Chemistry").unwrap();
        build_request(&model, SchemaVersion::Flat, ValidationPolicy::Strict).unwrap()
    }

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "overall_average": 75.0,
            "predictions": {
                "HS Chemistry": { "score": 75.0, "mean": 70.9, "status": "strong" }
            },
            "weak_subjects": [],
            "resources": {}
        })
    }

    #[tokio::test]
    async fn successful_prediction() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/predict"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "grade_level": "high_school",
                "study_hours": 8.5,
                "attendance": 85.0,
                "participation": 7.2,
                "subjects": ["HS Chemistry"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let predictor = HttpPredictor::new(Some(server.uri()), None);
        let result = predictor.predict(&sample_request()).await.unwrap();
        assert_eq!(result.predictions["HS Chemistry"].score, 75.0);
        assert_eq!(result.overall_average, 75.0);
    }

    #[tokio::test]
    async fn service_error_is_surfaced_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/predict"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "error": "grade_level required" })),
            )
            .mount(&server)
            .await;

        let predictor = HttpPredictor::new(Some(server.uri()), None);
        let err = predictor.predict(&sample_request()).await.unwrap_err();
        let client_err = err.downcast_ref::<ClientError>().unwrap();
        assert!(client_err.is_service());
        assert_eq!(client_err.user_message(), "grade_level required");
    }

    #[tokio::test]
    async fn non_json_error_body_becomes_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/predict"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let predictor = HttpPredictor::new(Some(server.uri()), None);
        let err = predictor.predict(&sample_request()).await.unwrap_err();
        let client_err = err.downcast_ref::<ClientError>().unwrap();
        assert!(matches!(client_err, ClientError::Api { status: 502 }));
        assert!(client_err.user_message().contains("could not reach"));
    }

    #[tokio::test]
    async fn malformed_success_body_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/predict"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })),
            )
            .mount(&server)
            .await;

        let predictor = HttpPredictor::new(Some(server.uri()), None);
        let err = predictor.predict(&sample_request()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        // Nothing listens on this port.
        let predictor = HttpPredictor::new(Some("http://127.0.0.1:1".to_string()), Some(1));
        let err = predictor.predict(&sample_request()).await.unwrap_err();
        let client_err = err.downcast_ref::<ClientError>().unwrap();
        assert!(!client_err.is_service());
    }

    #[tokio::test]
    async fn subjects_lookup() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/subjects/high_school"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "subjects": ["HS Algebra II", "HS Chemistry", "HS History", "HS Literature"],
                "grade_level": "high_school"
            })))
            .mount(&server)
            .await;

        let predictor = HttpPredictor::new(Some(server.uri()), None);
        let list = predictor.subjects(GradeLevel::HighSchool).await.unwrap();
        assert_eq!(list.grade_level, GradeLevel::HighSchool);
        assert_eq!(list.subjects.len(), 4);
    }

    #[tokio::test]
    async fn invalid_grade_subjects_lookup_surfaces_the_service_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/subjects/university"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "error": "Invalid grade level" })),
            )
            .mount(&server)
            .await;

        let predictor = HttpPredictor::new(Some(server.uri()), None);
        let err = predictor.subjects(GradeLevel::University).await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid grade level");
    }

    #[tokio::test]
    async fn health_probe() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "healthy",
                "timestamp": "2026-08-25T12:00:00"
            })))
            .mount(&server)
            .await;

        let predictor = HttpPredictor::new(Some(server.uri()), None);
        let health = predictor.health().await.unwrap();
        assert_eq!(health.status, "healthy");
    }
}
