use std::path::PathBuf;

use thiserror::Error;

/// Run-level failures of the enrichment pipeline.
///
/// Per-row resolution failures never appear here — they are contained as
/// status strings in the output. Only file-level problems abort a run.
#[derive(Debug, Error)]
pub enum MotCheckError {
    #[error("input file not found: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("failed to read workbook: {0}")]
    WorkbookRead(#[from] calamine::Error),

    #[error("failed to write workbook: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
