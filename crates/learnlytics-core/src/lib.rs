//! learnlytics-core — Wizard state machine and prediction-service contracts.
//!
//! This crate defines the input-collection model, the stage-gated session
//! that governs the prediction flow, and the request/response shapes of the
//! external prediction service.

pub mod catalog;
pub mod error;
pub mod model;
pub mod report;
pub mod request;
pub mod result;
pub mod session;
pub mod traits;
