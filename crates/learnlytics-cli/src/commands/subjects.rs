//! The `learnlytics subjects` command.

use std::path::PathBuf;

use anyhow::Result;

use learnlytics_client::{load_config_from, HttpPredictor};
use learnlytics_core::catalog::GradeLevel;

pub async fn execute(
    grade: String,
    remote: bool,
    api_url: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let grade: GradeLevel = grade.parse().map_err(anyhow::Error::msg)?;

    if remote {
        let mut config = load_config_from(config_path.as_deref())?;
        if let Some(url) = api_url {
            config.api_url = url;
        }
        let predictor = HttpPredictor::from_config(&config);
        let list = predictor
            .subjects(grade)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;
        println!("{} (from {}):", grade.display_name(), predictor.base_url());
        for subject in &list.subjects {
            println!("  - {subject}");
        }
    } else {
        println!("{} ({}):", grade.display_name(), grade.description());
        for subject in grade.subjects() {
            println!("  - {subject}");
        }
    }

    Ok(())
}
