//! The `learnlytics init` command.

use std::path::Path;

use anyhow::{Context, Result};

const STARTER_CONFIG: &str = r#"# learnlytics client configuration

# Base URL of the prediction service
api_url = "http://localhost:5000"

# Request timeout in seconds
timeout_secs = 30

# Request schema: "flat" or "structured"
schema = "flat"

# General-metric validation: "strict" or "lenient"
policy = "strict"
"#;

pub fn execute() -> Result<()> {
    let path = Path::new("learnlytics.toml");
    if path.exists() {
        println!("learnlytics.toml already exists, skipping");
        return Ok(());
    }
    std::fs::write(path, STARTER_CONFIG).context("failed to write learnlytics.toml")?;
    println!("Created learnlytics.toml");
    println!("Point api_url at your prediction service, then try `learnlytics predict --help`.");
    Ok(())
}
