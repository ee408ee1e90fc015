use jadval_core::assemble::{self, AssembleOptions};
use jadval_core::collect::{CollectOptions, DataSet};
use jadval_core::error::JadvalError;
use jadval_core::extraction::pdftotext::PdftotextSource;
use jadval_core::extraction::TableSource;
use std::path::{Path, PathBuf};

use crate::Cli;

pub fn run(cli: Cli) -> Result<(), JadvalError> {
    let pdf_path = cli.input_pdf;
    if !pdf_path.exists() {
        return Err(JadvalError::InputNotFound(pdf_path));
    }
    let is_pdf = pdf_path
        .extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        return Err(JadvalError::NotAPdf(pdf_path));
    }

    // Output path priority: -o flag > positional argument > auto-derived.
    let excel_path = cli
        .output
        .or(cli.output_excel)
        .unwrap_or_else(|| default_output_path(&pdf_path));

    let rule = "=".repeat(60);
    println!("{rule}");
    println!("Persian PDF to Excel Converter");
    println!("{rule}");
    println!("Input PDF:     {}", pdf_path.display());
    println!("Output Excel:  {}", excel_path.display());
    println!("Sheet name:    {}", cli.sheet);
    println!("{rule}");
    println!();

    println!("Starting PDF processing...");
    let pdf_bytes = std::fs::read(&pdf_path)?;
    let source = PdftotextSource::new();
    let pages = source.extract_tables(&pdf_bytes)?;
    println!("PDF has {} pages", pages.len());

    let opts = CollectOptions {
        min_table_rows: cli.min_rows,
        min_columns: cli.min_cols,
    };
    let mut dataset = DataSet::default();
    for page in &pages {
        println!("Processing page {}...", page.page_number);
        dataset.collect_page(page, &opts);
    }

    if let Some(path) = &cli.dump_rows {
        let json = serde_json::to_string_pretty(&dataset)?;
        std::fs::write(path, json)?;
        eprintln!("Cleaned rows written to {}", path.display());
    }

    if dataset.is_empty() {
        return Err(JadvalError::NoData);
    }
    println!("Extracted {} rows from PDF", dataset.rows.len());
    println!();

    let assemble_opts = AssembleOptions {
        sheet_name: cli.sheet,
        font_name: cli.font,
    };
    let summary = assemble::assemble(&dataset, &excel_path, &assemble_opts)?;

    println!("Excel file created: {}", excel_path.display());
    println!(
        "  Total rows: {}, Total columns: {}",
        summary.rows, summary.cols
    );
    println!();
    println!("{rule}");
    println!("Conversion completed successfully!");
    println!("{rule}");

    Ok(())
}

/// `report.pdf` becomes `report_converted.xlsx` next to the input.
fn default_output_path(pdf_path: &Path) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".into());
    pdf_path.with_file_name(format!("{stem}_converted.xlsx"))
}
