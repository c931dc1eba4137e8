//! Converts job-source exports into [`JobPosting`] records.

mod csv_rows;
mod jsearch;

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::workflows::jobs::domain::JobPosting;

pub use jsearch::{JsearchJob, JsearchResponse};

/// Layout of a posting export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostingFormat {
    /// A JSON array of postings in the engine's own field names.
    #[default]
    Json,
    /// A raw JSearch search response (`{"data": [...]}`).
    Jsearch,
    /// A CSV sheet with one posting per row.
    Csv,
}

impl PostingFormat {
    pub fn name(&self) -> &'static str {
        match self {
            PostingFormat::Json => "json",
            PostingFormat::Jsearch => "jsearch",
            PostingFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for PostingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PostingFormat {
    type Err = IntakeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "jsearch" => Ok(Self::Jsearch),
            "csv" => Ok(Self::Csv),
            other => Err(IntakeError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum IntakeError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    UnknownFormat(String),
}

impl fmt::Display for IntakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakeError::Io(err) => write!(f, "failed to read posting export: {}", err),
            IntakeError::Json(err) => write!(f, "invalid posting JSON: {}", err),
            IntakeError::Csv(err) => write!(f, "invalid posting CSV data: {}", err),
            IntakeError::UnknownFormat(format) => write!(
                f,
                "unknown posting format '{}' (expected json, jsearch or csv)",
                format
            ),
        }
    }
}

impl std::error::Error for IntakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntakeError::Io(err) => Some(err),
            IntakeError::Json(err) => Some(err),
            IntakeError::Csv(err) => Some(err),
            IntakeError::UnknownFormat(_) => None,
        }
    }
}

impl From<std::io::Error> for IntakeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for IntakeError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub fn import_postings<R: Read>(
    reader: R,
    format: PostingFormat,
) -> Result<Vec<JobPosting>, IntakeError> {
    let postings = match format {
        PostingFormat::Json => serde_json::from_reader::<_, Vec<JobPosting>>(reader)?,
        PostingFormat::Jsearch => {
            serde_json::from_reader::<_, JsearchResponse>(reader)?.into_postings()
        }
        PostingFormat::Csv => csv_rows::parse_postings(reader)?,
    };
    tracing::debug!(format = format.name(), count = postings.len(), "imported postings");
    Ok(postings)
}

pub fn import_postings_from_path<P: AsRef<Path>>(
    path: P,
    format: PostingFormat,
) -> Result<Vec<JobPosting>, IntakeError> {
    let file = std::fs::File::open(path)?;
    import_postings(std::io::BufReader::new(file), format)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("JSearch".parse::<PostingFormat>().ok(), Some(PostingFormat::Jsearch));
        assert_eq!(" csv ".parse::<PostingFormat>().ok(), Some(PostingFormat::Csv));
        match "xml".parse::<PostingFormat>() {
            Err(IntakeError::UnknownFormat(format)) => assert_eq!(format, "xml"),
            other => panic!("expected unknown format, got {other:?}"),
        }
    }

    #[test]
    fn json_arrays_tolerate_partial_postings() {
        let postings = import_postings(
            Cursor::new(r#"[{"title": "Analyst"}, {}]"#),
            PostingFormat::Json,
        )
        .expect("import succeeds");

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].title(), "Analyst");
        assert_eq!(postings[1], JobPosting::default());
    }

    #[test]
    fn malformed_json_is_reported() {
        let error = import_postings(Cursor::new("{not json"), PostingFormat::Json)
            .expect_err("expected json error");
        assert!(matches!(error, IntakeError::Json(_)));
        assert!(error.to_string().starts_with("invalid posting JSON"));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = import_postings_from_path("./does-not-exist.json", PostingFormat::Json)
            .expect_err("expected io error");

        match error {
            IntakeError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
