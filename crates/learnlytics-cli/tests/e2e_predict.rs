//! End-to-end predict tests against a mocked prediction service.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_predict(args: Vec<String>) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("learnlytics").unwrap();
        cmd.args(&args).assert()
    })
    .await
    .unwrap()
}

fn analysis_body() -> serde_json::Value {
    serde_json::json!({
        "overall_average": 71.6,
        "predictions": {
            "HS Chemistry": { "score": 75.0, "mean": 70.9, "status": "strong" },
            "HS History": { "score": 68.2, "mean": 74.3, "status": "needs_improvement" }
        },
        "weak_subjects": ["HS History"],
        "resources": {
            "HS History": {
                "videos": ["Crash Course US History"],
                "practice": ["Quizlet History Decks"],
                "books": ["A People's History of the United States"]
            }
        }
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn full_cycle_renders_the_analysis() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .and(body_partial_json(serde_json::json!({
            "grade_level": "high_school",
            "subjects": ["HS Chemistry", "HS History"],
            "study_hours": 8.5,
            "attendance": 85.0,
            "participation": 7.2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .expect(1)
        .mount(&server)
        .await;

    let assert = run_predict(vec![
        "predict".into(),
        "--grade".into(),
        "high_school".into(),
        "--subjects".into(),
        "HS Chemistry,HS History".into(),
        "--study-hours".into(),
        "8.5".into(),
        "--attendance".into(),
        "85".into(),
        "--participation".into(),
        "7.2".into(),
        "--api-url".into(),
        server.uri(),
    ])
    .await;

    assert
        .success()
        .stdout(predicate::str::contains("Overall average: 71.6%"))
        .stdout(predicate::str::contains("HS Chemistry"))
        .stdout(predicate::str::contains("Subjects needing attention"))
        .stdout(predicate::str::contains("HS History"))
        .stdout(predicate::str::contains("Crash Course US History"));
}

#[tokio::test(flavor = "multi_thread")]
async fn structured_schema_sends_subject_metrics() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .and(body_partial_json(serde_json::json!({
            "grade_level": "high_school",
            "general_metrics": {
                "study_hours": 8.5,
                "attendance": 85.0,
                "participation": 7.2
            },
            "subject_metrics": {
                "HS Chemistry": { "mock_test_score": 75.0 }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "overall_average": 75.0,
            "predictions": {
                "HS Chemistry": {
                    "score": 75.0, "mean": 70.9, "status": "strong",
                    "grade": "B", "diff_from_mean": 4.1
                }
            },
            "weak_subjects": [],
            "strong_subjects": ["HS Chemistry"],
            "insights": [
                { "type": "success", "message": "Keep up the chemistry practice" }
            ],
            "resources": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let assert = run_predict(vec![
        "predict".into(),
        "--grade".into(),
        "high_school".into(),
        "--subjects".into(),
        "HS Chemistry".into(),
        "--study-hours".into(),
        "8.5".into(),
        "--attendance".into(),
        "85".into(),
        "--participation".into(),
        "7.2".into(),
        "--score".into(),
        "HS Chemistry=75".into(),
        "--schema".into(),
        "structured".into(),
        "--api-url".into(),
        server.uri(),
    ])
    .await;

    assert
        .success()
        .stdout(predicate::str::contains("Strong subjects: HS Chemistry"))
        .stdout(predicate::str::contains("Keep up the chemistry practice"));
}

#[tokio::test(flavor = "multi_thread")]
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

    let assert = run_predict(vec![
        "predict".into(),
        "--grade".into(),
        "high_school".into(),
        "--subjects".into(),
        "HS Chemistry".into(),
        "--study-hours".into(),
        "8.5".into(),
        "--attendance".into(),
        "85".into(),
        "--participation".into(),
        "7.2".into(),
        "--api-url".into(),
        server.uri(),
    ])
    .await;

    assert
        .failure()
        .stderr(predicate::str::contains("grade_level required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn output_flag_writes_a_report() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("report.json");

    Mock::given(method("POST"))
        .and(path("/api/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .mount(&server)
        .await;

    let assert = run_predict(vec![
        "predict".into(),
        "--grade".into(),
        "high_school".into(),
        "--subjects".into(),
        "HS Chemistry,HS History".into(),
        "--study-hours".into(),
        "8.5".into(),
        "--attendance".into(),
        "85".into(),
        "--participation".into(),
        "7.2".into(),
        "--api-url".into(),
        server.uri(),
        "--output".into(),
        report_path.display().to_string(),
    ])
    .await;

    assert.success();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["grade_level"], "high_school");
    assert_eq!(report["schema"], "flat");
    assert_eq!(report["request"]["study_hours"], 8.5);
    assert_eq!(report["result"]["overall_average"], 71.6);
}

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_service_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "timestamp": "2026-08-25T12:00:00"
        })))
        .mount(&server)
        .await;

    let assert = run_predict(vec![
        "health".into(),
        "--api-url".into(),
        server.uri(),
    ])
    .await;

    assert
        .success()
        .stdout(predicate::str::contains("healthy"));
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_subjects_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/subjects/university"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subjects": ["CSE Data Structures", "CSE Algorithms", "CSE Database Systems"],
            "grade_level": "university"
        })))
        .mount(&server)
        .await;

    let assert = run_predict(vec![
        "subjects".into(),
        "--grade".into(),
        "university".into(),
        "--remote".into(),
        "--api-url".into(),
        server.uri(),
    ])
    .await;

    assert
        .success()
        .stdout(predicate::str::contains("CSE Algorithms"));
}
