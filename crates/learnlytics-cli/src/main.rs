//! learnlytics CLI — drives one wizard cycle against the prediction service.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "learnlytics", version, about = "Student performance prediction client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one prediction cycle and render the analysis
    Predict {
        /// Grade level: middle_school, high_school, or university
        #[arg(long)]
        grade: String,

        /// Subjects to predict, comma-separated (e.g. "HS Chemistry,HS History")
        #[arg(long)]
        subjects: String,

        /// Weekly study hours (0-40)
        #[arg(long)]
        study_hours: Option<String>,

        /// Attendance percentage (0-100)
        #[arg(long)]
        attendance: Option<String>,

        /// Class participation (0-10)
        #[arg(long)]
        participation: Option<String>,

        /// Mock test score for a subject, e.g. "HS Chemistry=75" (repeatable)
        #[arg(long = "score")]
        scores: Vec<String>,

        /// Request schema: flat or structured
        #[arg(long)]
        schema: Option<String>,

        /// Validation policy: strict or lenient
        #[arg(long)]
        policy: Option<String>,

        /// Prediction service base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Write a JSON report of the completed cycle
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the subject catalog for a grade level
    Subjects {
        /// Grade level
        #[arg(long)]
        grade: String,

        /// Ask the running service instead of the built-in catalog
        #[arg(long)]
        remote: bool,

        /// Prediction service base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check that the prediction service is reachable
    Health {
        /// Prediction service base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter learnlytics.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("learnlytics=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Predict {
            grade,
            subjects,
            study_hours,
            attendance,
            participation,
            scores,
            schema,
            policy,
            api_url,
            output,
            config,
        } => {
            commands::predict::execute(
                grade,
                subjects,
                study_hours,
                attendance,
                participation,
                scores,
                schema,
                policy,
                api_url,
                output,
                config,
            )
            .await
        }
        Commands::Subjects {
            grade,
            remote,
            api_url,
            config,
        } => commands::subjects::execute(grade, remote, api_url, config).await,
        Commands::Health { api_url, config } => commands::health::execute(api_url, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
