use crate::infra::{InMemoryLeadNotifier, InMemoryLeadRepository};
use crate::routes::ProfileSummary;
use chrono::{DateTime, Utc};
use clap::Args;
use jobbot::config::AppConfig;
use jobbot::error::AppError;
use jobbot::workflows::intake::{import_postings_from_path, PostingFormat};
use jobbot::workflows::jobs::domain::ScoredJob;
use jobbot::workflows::jobs::leads::insights::{
    company_domain, interview_answers, mini_project_suggestion, resume_snippet, skill_gap,
    DEFAULT_GROWTH_SKILLS,
};
use jobbot::workflows::jobs::leads::{write_sheet, LeadService};
use jobbot::workflows::jobs::scoring::recency::UNKNOWN_AGE_DAYS;
use jobbot::workflows::jobs::scoring::{BatchOutcome, ScoringProfile};
use std::path::PathBuf;
use std::sync::Arc;

const CLI_SOURCE: &str = "cli";

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Posting export to score
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Export layout: json, jsearch or csv
    #[arg(long, default_value = "json")]
    pub(crate) format: PostingFormat,
    /// Scoring preset (hybrid, manager, radar). Defaults to JOBBOT_PROFILE.
    #[arg(long)]
    pub(crate) profile: Option<ScoringProfile>,
    /// JSON scoring config; takes precedence over the preset
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Write qualifying leads to this CSV in tracking-sheet layout
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Number of ranked postings to print
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
    /// Evaluation time (RFC 3339). Defaults to now.
    #[arg(long)]
    pub(crate) now: Option<DateTime<Utc>>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        format,
        profile,
        config,
        export,
        limit,
        now,
    } = args;

    let mut settings = AppConfig::load()?.scoring;
    if let Some(profile) = profile {
        settings.profile = profile;
    }
    if config.is_some() {
        settings.config_path = config;
    }
    let scoring = settings.resolve()?;

    let now = now.unwrap_or_else(Utc::now);
    let postings = import_postings_from_path(&input, format)?;
    let notifier = Arc::new(InMemoryLeadNotifier::default());
    let service = LeadService::new(
        Arc::new(InMemoryLeadRepository::default()),
        notifier.clone(),
        scoring,
    );
    let outcome = service.rank(postings, now);

    println!(
        "Scored {} postings from {} ({} profile)",
        outcome.jobs.len(),
        input.display(),
        settings.profile
    );
    for line in ranking_lines(&outcome, limit) {
        println!("{line}");
    }
    if outcome.skipped > 0 {
        println!("{} postings could not be scored", outcome.skipped);
    }
    println!("{}", outcome.summary());

    if let Some(top) = outcome.leads().next() {
        for line in follow_up_lines(top) {
            println!("{line}");
        }
    }

    if let Some(path) = export {
        let mut records = Vec::new();
        for job in outcome.leads() {
            let record = service.log_lead(job.clone(), CLI_SOURCE, now)?;
            service.alert(&record.lead_id)?;
            records.push(service.get(&record.lead_id)?);
        }

        let alerts = notifier.alerts();
        for alert in &alerts {
            println!("Alert: {}", alert.message);
        }

        let file = std::fs::File::create(&path)?;
        let written = write_sheet(file, &records)?;
        println!(
            "Exported {} leads to {} ({} high-match alerts)",
            written,
            path.display(),
            alerts.len()
        );
    }

    Ok(())
}

pub(crate) fn run_profiles() {
    for profile in ScoringProfile::ALL {
        match ProfileSummary::describe(profile) {
            Ok(summary) => println!(
                "{:<8} skills={:<3} roles={} target={} LPA min={} LPA age<={}d apply>={} outreach>={}",
                summary.name,
                summary.skill_keywords,
                summary.roles.join("|"),
                summary.target_salary_lpa,
                summary.min_salary_lpa,
                summary.max_posting_age_days,
                summary.apply_threshold,
                summary.outreach_threshold
            ),
            Err(err) => println!("{:<8} invalid preset: {}", profile.name(), err),
        }
    }
}

pub(crate) fn ranking_lines(outcome: &BatchOutcome, limit: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "{:>3}  {:>5}  {:>5}  {:>6}  {:>4}  {:<20}  {:<18}  {}",
        "#", "score", "skill", "lpa", "age", "role", "action", "posting"
    )];
    lines.extend(
        outcome
            .jobs
            .iter()
            .take(limit)
            .enumerate()
            .map(|(rank, job)| job_line(rank + 1, job)),
    );
    lines
}

fn job_line(rank: usize, job: &ScoredJob) -> String {
    let age = if job.age_days >= UNKNOWN_AGE_DAYS {
        "?".to_string()
    } else {
        job.age_days.to_string()
    };
    let marker = if job.qualifies { "*" } else { " " };
    format!(
        "{:>3}{} {:>5}  {:>5}  {:>6.1}  {:>4}  {:<20}  {:<18}  {} @ {}",
        rank,
        marker,
        job.composite_score,
        job.skill_score,
        job.salary_normalized,
        age,
        job.role_category.label(),
        job.recommended_action.label(),
        job.posting.title(),
        job.posting.company()
    )
}

fn follow_up_lines(job: &ScoredJob) -> Vec<String> {
    let missing = skill_gap(&job.matched_skills, DEFAULT_GROWTH_SKILLS);
    let mut lines = vec![format!(
        "\nTop lead: {} @ {}",
        job.posting.title(),
        job.posting.company()
    )];
    if let Some(domain) = company_domain(job.posting.apply_link()) {
        lines.push(format!("Company domain: {domain}"));
    }
    lines.push(resume_snippet(job.posting.company(), &job.matched_skills));
    let answers = interview_answers(job.posting.title());
    for (heading, answer) in answers.entries() {
        lines.push(format!("{heading}: {answer}"));
    }
    if !missing.is_empty() {
        lines.push(format!("Skill gap: {}", missing.join(", ")));
    }
    lines.push(mini_project_suggestion(&missing));
    lines
}
