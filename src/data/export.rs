use std::io::Write;
use std::path::Path;

use super::correlation::ReducedMatrix;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("writing correlation matrix")]
    Csv(#[from] csv::Error),
    #[error("flushing correlation matrix")]
    Io(#[from] std::io::Error),
    #[error("correlation matrix is empty")]
    Empty,
}

/// Write the matrix as CSV: a `column` header followed by the keys, then one
/// labelled row per key.
pub fn write_matrix<W: Write>(matrix: &ReducedMatrix, out: W) -> Result<(), ExportError> {
    if matrix.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut writer = csv::Writer::from_writer(out);

    let mut header = Vec::with_capacity(matrix.len() + 1);
    header.push("column".to_string());
    header.extend(matrix.keys.iter().cloned());
    writer.write_record(&header)?;

    for (key, row) in matrix.keys.iter().zip(&matrix.cells) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(key.clone());
        record.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_matrix(matrix: &ReducedMatrix, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_matrix(matrix, file)?;
    log::info!("Exported {}×{} correlation matrix to {}", matrix.len(), matrix.len(), path.display());
    Ok(())
}
