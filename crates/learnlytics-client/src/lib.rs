//! learnlytics-client — transport to the prediction service.
//!
//! Implements the core's [`Predictor`](learnlytics_core::traits::Predictor)
//! trait over HTTP, plus the service's subject-catalog and health lookups,
//! a scripted mock for tests, and configuration loading.

pub mod config;
pub mod error;
pub mod http;
pub mod mock;

pub use config::{load_config, load_config_from, ClientConfig};
pub use error::ClientError;
pub use http::HttpPredictor;
pub use mock::MockPredictor;
