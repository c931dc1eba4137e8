//! Job posting scoring, role classification and lead triage.
//!
//! The [`workflows::jobs::scoring`] module holds the deterministic engine; intake
//! adapters and the lead workflow sit around it.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
