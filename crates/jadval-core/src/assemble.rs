use crate::bidi;
use crate::collect::DataSet;
use crate::error::JadvalError;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use serde::Serialize;
use std::path::Path;

/// Spreadsheet column width bounds, in Excel width units.
pub const MIN_COLUMN_WIDTH: f64 = 12.0;
pub const MAX_COLUMN_WIDTH: f64 = 50.0;

/// Excel's hard limit on sheet name length.
const SHEET_NAME_LIMIT: usize = 31;

const HEADER_ROW_HEIGHT: f64 = 25.0;
const BODY_ROW_HEIGHT: f64 = 20.0;

/// Presentation settings for the output workbook.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub sheet_name: String,
    pub font_name: String,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        AssembleOptions {
            sheet_name: "Data".into(),
            font_name: "Arial".into(),
        }
    }
}

/// Dimensions of the written sheet.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SheetSummary {
    pub rows: usize,
    pub cols: usize,
}

/// Write the dataset to a styled xlsx file with RTL layout.
///
/// Rows are padded to a uniform column count, then each row's cell order
/// is reversed so the first logical column lands rightmost. The first
/// collected row becomes the header, literally: there is no header
/// detection heuristic.
pub fn assemble(
    dataset: &DataSet,
    output_path: &Path,
    opts: &AssembleOptions,
) -> Result<SheetSummary, JadvalError> {
    if dataset.is_empty() {
        return Err(JadvalError::NoData);
    }

    let grid = pad_and_reverse(&dataset.rows);
    let max_cols = grid[0].len();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(truncate_sheet_name(&opts.sheet_name))?;
    worksheet.set_right_to_left(true);

    let header_format = Format::new()
        .set_font_name(opts.font_name.as_str())
        .set_font_size(12)
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin);
    let numeric_format = Format::new()
        .set_font_name(opts.font_name.as_str())
        .set_font_size(11)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin);
    // Right alignment is the default reading-direction alignment for RTL
    // text.
    let text_format = Format::new()
        .set_font_name(opts.font_name.as_str())
        .set_font_size(11)
        .set_align(FormatAlign::Right)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin);

    for (row_idx, row) in grid.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            let format = if row_idx == 0 {
                &header_format
            } else if bidi::is_numeric_like(value) {
                &numeric_format
            } else {
                &text_format
            };
            worksheet.write_string_with_format(row_idx as u32, col_idx as u16, value.as_str(), format)?;
        }
    }

    for (col_idx, width) in column_widths(&grid).into_iter().enumerate() {
        worksheet.set_column_width(col_idx as u16, width)?;
    }

    worksheet.set_row_height(0, HEADER_ROW_HEIGHT)?;
    for row_idx in 1..grid.len() {
        worksheet.set_row_height(row_idx as u32, BODY_ROW_HEIGHT)?;
    }

    // Keep the header visible on scroll.
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(output_path)?;

    Ok(SheetSummary {
        rows: grid.len(),
        cols: max_cols,
    })
}

/// Pad every row on the right with empty cells to the maximum observed
/// length, then reverse each row's cell order for RTL column layout.
/// Padding happens before reversal, so missing trailing cells end up at
/// the left edge of the sheet.
pub fn pad_and_reverse(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let max_cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    rows.iter()
        .map(|row| {
            let mut padded = row.clone();
            padded.resize(max_cols, String::new());
            padded.reverse();
            padded
        })
        .collect()
}

/// Per-column width: longest cell in chars, scaled by 1.3 and clamped to
/// the [MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH] range.
pub fn column_widths(grid: &[Vec<String>]) -> Vec<f64> {
    let max_cols = grid.first().map(|r| r.len()).unwrap_or(0);
    (0..max_cols)
        .map(|col| {
            let longest = grid
                .iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0);
            (longest as f64 * 1.3).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

fn truncate_sheet_name(name: &str) -> String {
    name.chars().take(SHEET_NAME_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::DataSet;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn empty_dataset_is_a_failure_not_a_crash() {
        let dataset = DataSet::default();
        let dir = tempfile::tempdir().unwrap();
        let result = assemble(&dataset, &dir.path().join("out.xlsx"), &AssembleOptions::default());
        assert!(matches!(result, Err(JadvalError::NoData)));
    }

    #[test]
    fn rows_padded_to_uniform_width_then_reversed() {
        let rows = vec![row(&["a", "b", "c"]), row(&["d"])];
        let grid = pad_and_reverse(&rows);

        assert!(grid.iter().all(|r| r.len() == 3));
        assert_eq!(grid[0], row(&["c", "b", "a"]));
        // Padding fills trailing cells before reversal, so the single
        // cell of the short row ends up rightmost.
        assert_eq!(grid[1], row(&["", "", "d"]));
    }

    #[test]
    fn column_widths_clamped_to_bounds() {
        let grid = vec![row(&["ab", "a".repeat(100).as_str(), "1402/05/01"])];
        let widths = column_widths(&grid);

        assert_eq!(widths.len(), 3);
        assert_eq!(widths[0], MIN_COLUMN_WIDTH);
        assert_eq!(widths[1], MAX_COLUMN_WIDTH);
        assert!((widths[2] - 13.0).abs() < 1e-9);
        assert!(widths
            .iter()
            .all(|w| (MIN_COLUMN_WIDTH..=MAX_COLUMN_WIDTH).contains(w)));
    }

    #[test]
    fn column_width_counts_chars_not_bytes() {
        // 10 Persian chars (30 bytes in UTF-8) must measure as 10.
        let grid = vec![row(&["گزارشگزارش"])];
        let widths = column_widths(&grid);
        assert!((widths[0] - 13.0).abs() < 1e-9);
    }

    #[test]
    fn long_sheet_name_truncated_to_excel_limit() {
        let name = "a".repeat(40);
        assert_eq!(truncate_sheet_name(&name).chars().count(), 31);
        assert_eq!(truncate_sheet_name("Data"), "Data");
    }

    #[test]
    fn workbook_written_to_disk() {
        let dataset = DataSet {
            rows: vec![
                row(&["شرح", "تاریخ", "مبلغ"]),
                row(&["یلام شرازگ", "1402/05/01", "1,000"]),
            ],
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let summary = assemble(&dataset, &path, &AssembleOptions::default()).unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.cols, 3);
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
