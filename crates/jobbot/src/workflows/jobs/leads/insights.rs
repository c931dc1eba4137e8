//! Lightweight helpers that turn a scored posting into follow-up material.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::Url;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid regex")
});

/// Second-level labels that sit under a two-letter country suffix (`acme.co.in`).
const COUNTRY_SECOND_LEVEL: &[&str] = &["co", "com", "ac", "org", "net", "gov", "edu"];

/// Skills worth growing into even when the current profile does not list them.
pub const DEFAULT_GROWTH_SKILLS: &[&str] = &["nlp", "fastapi", "docker", "kubernetes"];

/// Unique e-mail addresses in `text`, sorted.
pub fn detect_emails(text: &str) -> Vec<String> {
    EMAIL
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Registrable domain of an apply link, e.g. `careers.acme.co.in/x` -> `acme.co.in`.
pub fn company_domain(link: &str) -> Option<String> {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = Url::parse(trimmed)
        .or_else(|_| Url::parse(&format!("https://{trimmed}")))
        .ok()?;
    let host = parsed.host_str()?.trim_start_matches("www.").to_ascii_lowercase();

    let labels: Vec<&str> = host.split('.').filter(|label| !label.is_empty()).collect();
    if labels.len() < 2 || labels.iter().all(|label| label.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    let suffix = labels[labels.len() - 1];
    let second = labels[labels.len() - 2];
    let keep = if labels.len() >= 3 && suffix.len() == 2 && COUNTRY_SECOND_LEVEL.contains(&second)
    {
        3
    } else {
        2
    };
    Some(labels[labels.len() - keep..].join("."))
}

/// Resume bullet tailored to the skills a posting asked for.
pub fn resume_snippet(company: &str, matched_skills: &[String]) -> String {
    if matched_skills.is_empty() {
        return "• Delivered analytics & ML solutions using Python, SQL and Power BI.".to_string();
    }

    let highlighted = matched_skills
        .iter()
        .take(4)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let company = if company.trim().is_empty() {
        "the business"
    } else {
        company.trim()
    };
    format!(
        "• Worked end-to-end with {highlighted} to improve analytics impact at {company}.\n\
         • Built ML & forecasting workflows reducing manual effort."
    )
}

/// Growth skills the posting did not already cover, in the order given.
pub fn skill_gap(matched_skills: &[String], growth_skills: &[&str]) -> Vec<String> {
    growth_skills
        .iter()
        .filter(|skill| {
            !matched_skills
                .iter()
                .any(|matched| matched.eq_ignore_ascii_case(skill))
        })
        .map(|skill| skill.to_string())
        .collect()
}

pub fn mini_project_suggestion(missing_skills: &[String]) -> String {
    if missing_skills.is_empty() {
        return "Convert one portfolio project into a deployed Streamlit + API service.".to_string();
    }
    let focus = missing_skills
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("Mini-project: Build a small ML API covering {focus}, deploy on AWS, add Streamlit UI.")
}

/// Prepared talking points for a screening call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewAnswers {
    pub tell_me_about_yourself: String,
    pub why_hire_you: String,
    pub technical_strengths: String,
    pub company_fit: String,
}

impl InterviewAnswers {
    /// Answers with display headings, in interview order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("Tell Me About Yourself", self.tell_me_about_yourself.as_str()),
            ("Why Hire You", self.why_hire_you.as_str()),
            ("Technical Strengths", self.technical_strengths.as_str()),
            ("Company Fit", self.company_fit.as_str()),
        ]
    }
}

pub fn interview_answers(job_title: &str) -> InterviewAnswers {
    let title = match job_title.trim() {
        "" => "data and ML",
        title => title,
    };
    InterviewAnswers {
        tell_me_about_yourself: "I build data and ML systems end-to-end…".to_string(),
        why_hire_you: "I solve operational problems using analytics and automation…".to_string(),
        technical_strengths: "Forecasting, classification, feature engineering, SHAP…".to_string(),
        company_fit: format!("This role fits my background in {title} work…"),
    }
}
