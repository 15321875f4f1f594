//! The `learnlytics predict` command.
//!
//! Drives the full wizard cycle non-interactively: grade selection, metric
//! entry, subject toggles, submission, and rendering of the returned
//! analysis.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use learnlytics_client::{load_config_from, ClientError, HttpPredictor};
use learnlytics_core::catalog::{GradeLevel, TUTORIAL_LINKS};
use learnlytics_core::report::PredictionReport;
use learnlytics_core::result::{InsightKind, PredictionResult, SubjectStatus};
use learnlytics_core::session::Session;
use learnlytics_core::traits::Predictor;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    grade: String,
    subjects: String,
    study_hours: Option<String>,
    attendance: Option<String>,
    participation: Option<String>,
    scores: Vec<String>,
    schema: Option<String>,
    policy: Option<String>,
    api_url: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(url) = api_url {
        config.api_url = url;
    }
    if let Some(s) = &schema {
        config.schema = s.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(p) = &policy {
        config.policy = p.parse().map_err(anyhow::Error::msg)?;
    }

    let grade: GradeLevel = grade.parse().map_err(anyhow::Error::msg)?;

    let mut session = Session::new(config.schema, config.policy);
    session.begin()?;
    session.select_grade(grade)?;

    if let Some(v) = &study_hours {
        session.set_study_hours(v)?;
    }
    if let Some(v) = &attendance {
        session.set_attendance(v)?;
    }
    if let Some(v) = &participation {
        session.set_participation(v)?;
    }

    for subject in subjects.split(',') {
        let subject = subject.trim();
        if subject.is_empty() {
            continue;
        }
        session.toggle_subject(subject)?;
    }

    for entry in &scores {
        let (subject, value) = entry
            .split_once('=')
            .with_context(|| format!("invalid --score '{entry}', expected SUBJECT=SCORE"))?;
        session.set_mock_score(subject.trim(), value.trim())?;
    }

    // Split submission so the request is available for the report.
    let request = session.begin_submission()?;
    let predictor = HttpPredictor::from_config(&config);
    let outcome = predictor.predict(&request).await;
    if let Err(err) = session.complete_submission(outcome) {
        if let Some(client_err) = err.downcast_ref::<ClientError>() {
            anyhow::bail!("{}", client_err.user_message());
        }
        return Err(err);
    }

    let result = session
        .result()
        .cloned()
        .context("session advanced without a result")?;
    render(&mut session, &result)?;

    if let Some(path) = output {
        let report = PredictionReport::new(config.schema, request, result);
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn render(session: &mut Session, result: &PredictionResult) -> Result<()> {
    println!("Overall average: {:.1}%", result.overall_average);
    println!();

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Predicted", "Class Mean", "Status", "Grade"]);
    for (subject, prediction) in &result.predictions {
        let status = match prediction.status {
            SubjectStatus::Strong => "strong",
            SubjectStatus::Weak => "needs work",
        };
        table.add_row(vec![
            Cell::new(subject),
            Cell::new(format!("{:.1}", prediction.score)),
            Cell::new(format!("{:.1}", prediction.mean)),
            Cell::new(status),
            Cell::new(prediction.grade.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");

    if !result.weak_subjects.is_empty() {
        println!("\nSubjects needing attention:");
        for weak in &result.weak_subjects {
            match weak.score {
                Some(score) => println!("  - {} (predicted {score:.1})", weak.name),
                None => println!("  - {}", weak.name),
            }
        }
    }

    if !result.strong_subjects.is_empty() {
        println!("\nStrong subjects: {}", result.strong_subjects.join(", "));
    }

    if !result.insights.is_empty() {
        println!();
        for insight in &result.insights {
            let tag = match insight.kind {
                InsightKind::Success => "+",
                InsightKind::Warning => "!",
                InsightKind::Info => "i",
            };
            println!("[{tag}] {}", insight.message);
        }
    }

    if !result.resources.is_empty() {
        println!("\nRecommended learning resources:");
        let subjects: Vec<String> = result.resources.keys().cloned().collect();
        for subject in subjects {
            // Expanding one group collapses the previous one.
            session.toggle_resource(&subject)?;
            let Some(open) = session.expansion().expanded() else {
                continue;
            };
            let bundle = &result.resources[open];
            println!("\n  {open}");
            print_group("Videos", &bundle.videos);
            print_group("Practice", &bundle.practice);
            print_group("Books", &bundle.books);
            print_group("Tips", &bundle.tips);
        }
    }

    if !result.weak_subjects.is_empty() {
        println!("\nGeneral study guides:");
        for link in TUTORIAL_LINKS {
            println!("  - {}: {}", link.name, link.url);
        }
    }

    Ok(())
}

fn print_group(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("    {label}:");
    for item in items {
        println!("      - {item}");
    }
}
