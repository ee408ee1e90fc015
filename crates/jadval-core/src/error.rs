use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum JadvalError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("input file must be a PDF (.pdf extension): {0}")]
    NotAPdf(PathBuf),

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("no data extracted from PDF")]
    NoData,

    #[error("failed to write spreadsheet: {0}")]
    SpreadsheetWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
