use once_cell::sync::Lazy;
use regex::Regex;

use crate::workflows::jobs::domain::JobPosting;

static LAKH_FIGURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*(?:lpa|lakhs|lakh|lac)").expect("valid regex")
});

static RUPEE_FIGURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*(?:inr|₹)").expect("valid regex"));

static BARE_FIGURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)").expect("valid regex"));

/// Figures above this are read as absolute rupees rather than lakhs.
const ABSOLUTE_AMOUNT_FLOOR: f64 = 10_000.0;
const RUPEES_PER_LAKH: f64 = 100_000.0;

/// Parses free-text compensation into lakhs per annum. Unparseable text yields `0.0`.
pub fn parse_salary(salary_text: &str) -> f64 {
    let cleaned = salary_text.replace(',', "").to_lowercase();
    if cleaned.trim().is_empty() {
        return 0.0;
    }

    if let Some(value) = first_figure(&LAKH_FIGURE, &cleaned) {
        return value;
    }

    if let Some(value) = first_figure(&RUPEE_FIGURE, &cleaned) {
        return disambiguate_unit(value);
    }

    first_figure(&BARE_FIGURE, &cleaned)
        .map(disambiguate_unit)
        .unwrap_or(0.0)
}

/// Converts a structured amount, only when it is quoted in `expected_currency`.
pub fn salary_from_amount(
    amount: Option<f64>,
    currency: Option<&str>,
    expected_currency: &str,
) -> f64 {
    let Some(amount) = amount.filter(|value| value.is_finite() && *value > 0.0) else {
        return 0.0;
    };

    match currency {
        Some(code) if code.trim().eq_ignore_ascii_case(expected_currency) => {
            disambiguate_unit(amount)
        }
        _ => 0.0,
    }
}

/// Salary text wins when it parses to a positive figure; the structured pair is the fallback.
pub(crate) fn resolve_salary(posting: &JobPosting, expected_currency: &str) -> f64 {
    let from_text = posting
        .salary_text
        .as_deref()
        .map(parse_salary)
        .unwrap_or(0.0);
    if from_text > 0.0 {
        return from_text;
    }

    salary_from_amount(
        posting.salary_max,
        posting.salary_currency.as_deref(),
        expected_currency,
    )
}

fn first_figure(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|figure| figure.as_str().parse::<f64>().ok())
}

fn disambiguate_unit(value: f64) -> f64 {
    if value > ABSOLUTE_AMOUNT_FLOOR {
        (value / RUPEES_PER_LAKH * 10.0).round() / 10.0
    } else {
        value
    }
}
