use super::config::ActionThresholds;
use crate::workflows::jobs::domain::{RecommendedAction, VerificationState};

const CAREER_PAGE_MARKERS: &[&str] = &["career", "jobs."];

/// A link counts as the employer's own careers page when it mentions "career" or a `jobs.` host.
pub fn verification_state(apply_link: Option<&str>) -> VerificationState {
    let link = apply_link.unwrap_or_default().to_lowercase();
    if CAREER_PAGE_MARKERS.iter().any(|marker| link.contains(marker)) {
        VerificationState::CareerPageConfirmed
    } else {
        VerificationState::NeedsVerification
    }
}

/// Noise at or above the veto threshold always ignores; otherwise apply needs a confirmed
/// careers page and outreach falls back to the lower threshold.
pub fn decide_action(
    composite_score: u8,
    noise_score: u8,
    verification: VerificationState,
    thresholds: &ActionThresholds,
) -> RecommendedAction {
    if noise_score >= thresholds.noise_veto_threshold {
        return RecommendedAction::Ignore;
    }

    if composite_score >= thresholds.apply_threshold
        && verification == VerificationState::CareerPageConfirmed
    {
        return RecommendedAction::Apply;
    }

    if composite_score >= thresholds.outreach_threshold {
        return RecommendedAction::RecruiterOutreach;
    }

    RecommendedAction::Ignore
}
