use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::insights::detect_emails;
use crate::workflows::jobs::domain::{RecommendedAction, ScoredJob};

/// Identifier wrapper for logged leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Logged,
    Alerted,
}

impl LeadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::Logged => "logged",
            LeadStatus::Alerted => "alerted",
        }
    }
}

/// A scored posting the user chose to keep track of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub lead_id: LeadId,
    pub logged_at: DateTime<Utc>,
    pub source: String,
    pub job: ScoredJob,
    /// Contact addresses found in the description, `;`-separated.
    pub notes: String,
    pub status: LeadStatus,
}

impl LeadRecord {
    pub fn new(lead_id: LeadId, job: ScoredJob, source: String, logged_at: DateTime<Utc>) -> Self {
        let notes = detect_emails(job.posting.description()).join(";");
        Self {
            lead_id,
            logged_at,
            source,
            job,
            notes,
            status: LeadStatus::Logged,
        }
    }

    pub fn view(&self) -> LeadView {
        LeadView {
            lead_id: self.lead_id.clone(),
            status: self.status.label(),
            title: self.job.posting.title().to_string(),
            company: self.job.posting.company().to_string(),
            composite_score: self.job.composite_score,
            recommended_action: self.job.recommended_action,
            role_category: self.job.role_category.label().to_string(),
            logged_at: self.logged_at,
        }
    }

    /// Row in the column order of the job tracking sheet.
    pub fn sheet_row(&self) -> SheetRow {
        let job = &self.job;
        SheetRow {
            uid: self.lead_id.0.clone(),
            applied_on: self.logged_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            job_title: job.posting.title().to_string(),
            company: job.posting.company().to_string(),
            location: job.posting.location().to_string(),
            salary_lpa: job.salary_normalized,
            role_category: job.role_category.label().to_string(),
            apply_link: job.posting.apply_link().to_string(),
            source: self.source.clone(),
            skill_match: job.skill_score,
            score: job.composite_score,
            notes: self.notes.clone(),
            status: self.status.label().to_string(),
        }
    }
}

/// Public projection of a lead for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct LeadView {
    pub lead_id: LeadId,
    pub status: &'static str,
    pub title: String,
    pub company: String,
    pub composite_score: u8,
    pub recommended_action: RecommendedAction,
    pub role_category: String,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetRow {
    #[serde(rename = "UID")]
    pub uid: String,
    #[serde(rename = "Applied On")]
    pub applied_on: String,
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Salary (LPA)")]
    pub salary_lpa: f64,
    #[serde(rename = "Role Category")]
    pub role_category: String,
    #[serde(rename = "Apply Link")]
    pub apply_link: String,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Skill Match (%)")]
    pub skill_match: u8,
    #[serde(rename = "Score")]
    pub score: u8,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "Status")]
    pub status: String,
}
