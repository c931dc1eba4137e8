use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::non_blank;
use crate::workflows::jobs::domain::JobPosting;

#[derive(Debug, Default, Deserialize)]
struct PostingRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary_text: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary_max: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary_currency: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    apply_link: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    posted_at: Option<String>,
}

impl PostingRow {
    fn into_posting(self) -> JobPosting {
        // An unreadable amount is treated like a missing one.
        let salary_max = self
            .salary_max
            .and_then(|raw| raw.replace(',', "").parse::<f64>().ok());
        JobPosting {
            title: self.title,
            company: self.company,
            location: self.location,
            description: self.description,
            salary_text: self.salary_text,
            salary_max,
            salary_currency: self.salary_currency,
            apply_link: self.apply_link,
            posted_at: self.posted_at,
        }
    }
}

pub(super) fn parse_postings<R: Read>(reader: R) -> Result<Vec<JobPosting>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut postings = Vec::new();

    for row in csv_reader.deserialize::<PostingRow>() {
        postings.push(row?.into_posting());
    }

    Ok(postings)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(non_blank(opt))
}
