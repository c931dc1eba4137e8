use super::config::RoleKeywords;
use super::text::count_hits;
use crate::workflows::jobs::domain::RoleCategory;

/// Reject keywords win outright; otherwise the single role with the most hits is chosen.
/// Ties at the top and postings with no hits are rejected.
pub fn classify_role(
    text: &str,
    reject_keywords: &[String],
    roles: &[RoleKeywords],
) -> RoleCategory {
    if count_hits(text, reject_keywords) > 0 {
        return RoleCategory::Reject;
    }

    let mut best: Option<&RoleKeywords> = None;
    let mut best_hits = 0;
    let mut tied = false;

    for role in roles {
        let hits = count_hits(text, &role.keywords);
        if hits > best_hits {
            best = Some(role);
            best_hits = hits;
            tied = false;
        } else if hits == best_hits && hits > 0 {
            tied = true;
        }
    }

    match best {
        Some(role) if !tied => role.category(),
        _ => RoleCategory::Reject,
    }
}
