pub mod pdftotext;

use crate::error::JadvalError;

/// A table detected on a page: rows of raw, nullable cell values in the
/// order they appear in the PDF (before any RTL reordering).
pub type Table = Vec<Vec<Option<String>>>;

/// Tables detected on a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageTables {
    pub page_number: usize,
    pub tables: Vec<Table>,
}

/// Trait for PDF table detection backends.
pub trait TableSource: Send + Sync {
    /// Detect tables in a PDF, returning one `PageTables` per page.
    ///
    /// Any failure aborts the whole document; there are no partial
    /// results.
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTables>, JadvalError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
