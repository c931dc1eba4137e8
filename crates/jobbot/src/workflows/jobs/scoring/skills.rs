use super::text::matching_keywords;

/// Coverage of the configured skill set within a posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMatch {
    pub score: u8,
    /// Matched keywords in configured order.
    pub matched: Vec<String>,
}

pub fn match_skills(text: &str, keywords: &[String]) -> SkillMatch {
    let matched: Vec<String> = matching_keywords(text, keywords)
        .into_iter()
        .map(str::to_string)
        .collect();

    SkillMatch {
        score: coverage_score(matched.len(), keywords.len()),
        matched,
    }
}

/// `round(100 * part / whole)` clamped to 0..=100; an empty whole scores zero.
pub(crate) fn coverage_score(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let ratio = (100.0 * part as f64 / whole as f64).round();
    ratio.clamp(0.0, 100.0) as u8
}
