pub mod assemble;
pub mod bidi;
pub mod collect;
pub mod error;
pub mod extraction;

use assemble::{AssembleOptions, SheetSummary};
use collect::{CollectOptions, DataSet};
use error::JadvalError;
use extraction::TableSource;
use std::path::Path;

/// Options for the whole conversion pipeline.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub collect: CollectOptions,
    pub assemble: AssembleOptions,
}

/// Main API entry point: detect tables in a PDF and write them to a
/// styled, right-to-left xlsx file.
///
/// Extraction errors fail the whole document with no partial output. An
/// empty dataset after filtering is a normal unsuccessful outcome
/// (`JadvalError::NoData`), reported distinctly from extraction failure.
pub fn convert(
    pdf_bytes: &[u8],
    source: &dyn TableSource,
    output_path: &Path,
    opts: &ConvertOptions,
) -> Result<SheetSummary, JadvalError> {
    let pages = source.extract_tables(pdf_bytes)?;
    let dataset = DataSet::collect_pages(&pages, &opts.collect);
    assemble::assemble(&dataset, output_path, &opts.assemble)
}
