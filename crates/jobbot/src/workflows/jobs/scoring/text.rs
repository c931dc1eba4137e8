/// Joins the present fields into one lower-cased, single-spaced string.
pub fn normalize_fields<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut normalized = String::new();
    for field in fields.into_iter().flatten() {
        for word in strip_invisible(field).split_whitespace() {
            if !normalized.is_empty() {
                normalized.push(' ');
            }
            normalized.push_str(&word.to_lowercase());
        }
    }
    normalized
}

/// Canonical form for configured keywords so they compare against normalized text.
pub(crate) fn normalize_keyword(keyword: &str) -> String {
    normalize_fields([Some(keyword)])
}

/// Substring hits, in the order the keywords are configured.
pub(crate) fn matching_keywords<'k>(text: &str, keywords: &'k [String]) -> Vec<&'k str> {
    keywords
        .iter()
        .filter(|keyword| text.contains(keyword.as_str()))
        .map(String::as_str)
        .collect()
}

pub(crate) fn count_hits(text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|keyword| text.contains(keyword.as_str()))
        .count()
}

fn strip_invisible(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "")
}
