mod commands;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jadval",
    version,
    about = "Convert tables in Persian/Arabic PDF files to Excel with RTL layout"
)]
pub struct Cli {
    /// Input PDF file path
    pub input_pdf: PathBuf,

    /// Output Excel file path (optional; defaults to <input>_converted.xlsx)
    pub output_excel: Option<PathBuf>,

    /// Output Excel file path (overrides the positional argument)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Worksheet name
    #[arg(short, long, default_value = "Data")]
    pub sheet: String,

    /// Font name (use "B Nazanin" if available for Persian text)
    #[arg(short, long, default_value = "Arial")]
    pub font: String,

    /// Minimum row count for a detected table to be kept
    #[arg(long, default_value_t = 3, value_name = "N")]
    pub min_rows: usize,

    /// Minimum cell count for a data row to be kept
    #[arg(long, default_value_t = 5, value_name = "N")]
    pub min_cols: usize,

    /// Write the cleaned rows as JSON to this file for inspection
    #[arg(long, value_name = "FILE")]
    pub dump_rows: Option<PathBuf>,
}

fn main() {
    // Bad usage, including zero arguments, prints usage and exits 1.
    // --help and --version still exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = commands::convert::run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
