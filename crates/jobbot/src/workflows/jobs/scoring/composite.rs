use super::config::{ScoreWeights, UnknownSalaryPolicy};

/// Score given to a posting without a usable salary under the neutral policy.
pub const NEUTRAL_SALARY_SCORE: u8 = 50;

/// Linear ramp reaching 100 at `target_salary_lpa`.
pub fn salary_score(salary_lpa: f64, target_salary_lpa: f64, policy: UnknownSalaryPolicy) -> u8 {
    if !(salary_lpa.is_finite() && salary_lpa > 0.0) {
        return match policy {
            UnknownSalaryPolicy::Neutral => NEUTRAL_SALARY_SCORE,
            UnknownSalaryPolicy::Penalize => 0,
        };
    }
    if target_salary_lpa <= 0.0 {
        return 0;
    }

    (100.0 * salary_lpa / target_salary_lpa)
        .round()
        .clamp(0.0, 100.0) as u8
}

pub fn composite_score(skill_score: u8, salary_score: u8, weights: ScoreWeights) -> u8 {
    let blended = f64::from(skill_score) * weights.skill_weight
        + f64::from(salary_score) * weights.salary_weight;
    blended.round().clamp(0.0, 100.0) as u8
}
