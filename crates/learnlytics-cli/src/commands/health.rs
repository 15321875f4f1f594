//! The `learnlytics health` command.

use std::path::PathBuf;

use anyhow::Result;

use learnlytics_client::{load_config_from, HttpPredictor};

pub async fn execute(api_url: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(url) = api_url {
        config.api_url = url;
    }

    let predictor = HttpPredictor::from_config(&config);
    match predictor.health().await {
        Ok(health) => {
            println!(
                "{} at {} (service time {})",
                health.status,
                predictor.base_url(),
                health.timestamp
            );
            Ok(())
        }
        Err(e) => anyhow::bail!("{}", e.user_message()),
    }
}
