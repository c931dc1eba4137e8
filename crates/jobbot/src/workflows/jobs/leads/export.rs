use std::io::Write;

use super::domain::LeadRecord;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write lead sheet: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush lead sheet: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes leads as tracking-sheet rows; the header goes out with the first row.
pub fn write_sheet<W: Write>(writer: W, records: &[LeadRecord]) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record.sheet_row())?;
    }
    csv_writer.flush()?;
    Ok(records.len())
}
