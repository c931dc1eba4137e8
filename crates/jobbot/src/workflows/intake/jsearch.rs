use serde::Deserialize;
use serde_json::Value;

use super::non_blank;
use crate::workflows::jobs::domain::JobPosting;

/// Search response returned by the JSearch API. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsearchResponse {
    #[serde(default)]
    pub data: Vec<JsearchJob>,
}

impl JsearchResponse {
    pub fn into_postings(self) -> Vec<JobPosting> {
        self.data.into_iter().map(JsearchJob::into_posting).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JsearchJob {
    pub job_title: Option<String>,
    pub employer_name: Option<String>,
    pub job_city: Option<String>,
    pub job_country: Option<String>,
    pub job_salary: Option<Value>,
    pub job_min_salary: Option<Value>,
    pub job_max_salary: Option<Value>,
    pub job_salary_currency: Option<String>,
    pub job_description: Option<String>,
    pub job_apply_link: Option<String>,
    pub job_posted_at_datetime_utc: Option<String>,
    pub job_posted_at_timestamp: Option<Value>,
}

impl JsearchJob {
    pub fn into_posting(self) -> JobPosting {
        let salary_max = amount(self.job_max_salary.as_ref())
            .or_else(|| amount(self.job_min_salary.as_ref()));
        let posted_at = non_blank(self.job_posted_at_datetime_utc)
            .or_else(|| scalar_text(self.job_posted_at_timestamp.as_ref()));

        JobPosting {
            title: non_blank(self.job_title),
            company: non_blank(self.employer_name),
            location: non_blank(self.job_city).or_else(|| non_blank(self.job_country)),
            description: non_blank(self.job_description),
            salary_text: scalar_text(self.job_salary.as_ref()),
            salary_max,
            salary_currency: non_blank(self.job_salary_currency),
            apply_link: non_blank(self.job_apply_link),
            posted_at,
        }
    }
}

/// Strings and numbers as text; nulls, blanks and structured values drop out.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => non_blank(Some(text.clone())),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn amount(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    }?;
    (parsed > 0.0).then_some(parsed)
}
