use super::text::count_hits;

pub fn noise_hits(text: &str, keywords: &[String]) -> usize {
    count_hits(text, keywords)
}

/// `min(100, hits * multiplier)`.
pub fn noise_score(hits: usize, multiplier: u32) -> u8 {
    let raw = (hits as u64).saturating_mul(u64::from(multiplier));
    raw.min(100) as u8
}
