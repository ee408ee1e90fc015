use crate::error::JadvalError;
use crate::extraction::{PageTables, Table, TableSource};
use std::io::Write;
use std::process::Command;

/// PDF table detection backend using pdftotext (from poppler-utils).
///
/// `pdftotext -layout` preserves the whitespace alignment of tables, so
/// columns can be reconstructed from character positions that are blank
/// on every line of a block.
pub struct PdftotextSource;

impl PdftotextSource {
    pub fn new() -> Self {
        PdftotextSource
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSource for PdftotextSource {
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTables>, JadvalError> {
        // Write PDF bytes to a temp file; it is removed when dropped.
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| JadvalError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| JadvalError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    JadvalError::PdftotextNotFound
                } else {
                    JadvalError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(JadvalError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);

        // pdftotext uses form feed \x0c as page separator; the output
        // ends with one, so drop the empty trailing fragment.
        let mut fragments: Vec<&str> = text.split('\x0c').collect();
        if fragments.len() > 1 && fragments.last().is_some_and(|f| f.trim().is_empty()) {
            fragments.pop();
        }

        let pages: Vec<PageTables> = fragments
            .iter()
            .enumerate()
            .map(|(i, page_text)| {
                let lines: Vec<&str> = page_text.lines().collect();
                PageTables {
                    page_number: i + 1,
                    tables: tables_from_layout(&lines),
                }
            })
            .collect();

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Reconstruct tables from the `-layout` text of one page.
///
/// Consecutive non-blank lines form a block. Within a block, character
/// positions that are blank on every line mark column separators (runs of
/// at least two, so single spaces inside a cell do not split it). A block
/// is a table when it yields at least two lines and two columns.
pub fn tables_from_layout(lines: &[&str]) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for &line in lines {
        if line.trim().is_empty() {
            if let Some(table) = table_from_block(&block) {
                tables.push(table);
            }
            block.clear();
        } else {
            block.push(line);
        }
    }
    if let Some(table) = table_from_block(&block) {
        tables.push(table);
    }

    tables
}

fn table_from_block(block: &[&str]) -> Option<Table> {
    if block.len() < 2 {
        return None;
    }

    // Work on chars, not bytes: Persian text is multi-byte in UTF-8.
    let rows: Vec<Vec<char>> = block.iter().map(|l| l.chars().collect()).collect();
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);

    let blank_everywhere: Vec<bool> = (0..width)
        .map(|col| {
            rows.iter()
                .all(|r| r.get(col).map(|c| c.is_whitespace()).unwrap_or(true))
        })
        .collect();

    let segments = column_segments(&blank_everywhere);
    if segments.len() < 2 {
        return None;
    }

    let table: Table = rows
        .iter()
        .map(|row| {
            segments
                .iter()
                .map(|&(start, end)| {
                    let end = end.min(row.len());
                    if start >= end {
                        return None;
                    }
                    let cell: String = row[start..end].iter().collect();
                    let trimmed = cell.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                })
                .collect()
        })
        .collect();

    Some(table)
}

/// Split character positions into column ranges. A separator is a run of
/// two or more positions that are blank on every line; runs touching the
/// edges of the block count regardless of length.
fn column_segments(blank_everywhere: &[bool]) -> Vec<(usize, usize)> {
    let width = blank_everywhere.len();
    let mut separator = vec![false; width];

    let mut i = 0;
    while i < width {
        if blank_everywhere[i] {
            let start = i;
            while i < width && blank_everywhere[i] {
                i += 1;
            }
            let run = i - start;
            if run >= 2 || start == 0 || i == width {
                for s in separator.iter_mut().take(i).skip(start) {
                    *s = true;
                }
            }
        } else {
            i += 1;
        }
    }

    let mut segments = Vec::new();
    let mut i = 0;
    while i < width {
        if !separator[i] {
            let start = i;
            while i < width && !separator[i] {
                i += 1;
            }
            segments.push((start, i));
        } else {
            i += 1;
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn aligned_block_becomes_table() {
        let lines = vec![
            "Name    Date        Amount",
            "Ali     1402/01/01  1,000",
            "Sara    1402/02/15  2,500",
        ];
        let tables = tables_from_layout(&lines);
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.len(), 3);
        assert_eq!(table[0], vec![cell("Name"), cell("Date"), cell("Amount")]);
        assert_eq!(table[1], vec![cell("Ali"), cell("1402/01/01"), cell("1,000")]);
        assert_eq!(table[2], vec![cell("Sara"), cell("1402/02/15"), cell("2,500")]);
    }

    #[test]
    fn blank_lines_split_blocks_into_separate_tables() {
        let lines = vec![
            "A     B",
            "1     2",
            "",
            "C     D",
            "3     4",
        ];
        let tables = tables_from_layout(&lines);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0][0], vec![cell("A"), cell("B")]);
        assert_eq!(tables[1][1], vec![cell("3"), cell("4")]);
    }

    #[test]
    fn prose_block_is_not_a_table() {
        let lines = vec![
            "This is a paragraph of running text with no column structure",
            "and a second line that also flows as ordinary prose here",
        ];
        assert!(tables_from_layout(&lines).is_empty());
    }

    #[test]
    fn single_line_block_is_not_a_table() {
        let lines = vec!["Header    Only"];
        assert!(tables_from_layout(&lines).is_empty());
    }

    #[test]
    fn missing_cell_is_none() {
        let lines = vec![
            "Name    Amount",
            "Ali     1,000",
            "Sara",
        ];
        let tables = tables_from_layout(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0][2], vec![cell("Sara"), None]);
    }

    #[test]
    fn single_space_inside_cell_does_not_split_column() {
        let lines = vec![
            "Full Name    Amount",
            "Ali Reza     1,000",
        ];
        let tables = tables_from_layout(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0][0], vec![cell("Full Name"), cell("Amount")]);
        assert_eq!(tables[0][1], vec![cell("Ali Reza"), cell("1,000")]);
    }

    #[test]
    fn persian_cells_survive_char_based_segmentation() {
        let lines = vec![
            "شرح      مبلغ",
            "گزارش    1,000",
        ];
        let tables = tables_from_layout(&lines);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0][0], vec![cell("شرح"), cell("مبلغ")]);
        assert_eq!(tables[0][1], vec![cell("گزارش"), cell("1,000")]);
    }
}
