pub mod domain;
pub mod leads;
pub mod scoring;

pub use domain::{JobPosting, RecommendedAction, RoleCategory, ScoredJob, VerificationState};
pub use scoring::{BatchOutcome, ScoringConfig, ScoringEngine, ScoringProfile};
