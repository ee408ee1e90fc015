use crate::bidi;
use crate::extraction::PageTables;
use serde::Serialize;

/// Filtering thresholds for table and row collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectOptions {
    /// Tables with fewer rows than this are header blocks or noise.
    pub min_table_rows: usize,
    /// Rows with fewer cells than this are not data rows.
    pub min_columns: usize,
}

impl Default for CollectOptions {
    fn default() -> Self {
        CollectOptions {
            min_table_rows: 3,
            min_columns: 5,
        }
    }
}

/// Counters describing what collection kept and dropped.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CollectStats {
    pub pages: usize,
    pub tables_seen: usize,
    pub tables_kept: usize,
    pub rows_kept: usize,
    pub rows_skipped_short: usize,
    pub rows_skipped_blank: usize,
}

/// The flattened, filtered, cleaned sequence of table rows across all
/// pages, in encounter order. Rows carry no provenance; this is the sole
/// unit handed to spreadsheet assembly.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataSet {
    pub rows: Vec<Vec<String>>,
    pub stats: CollectStats,
}

impl DataSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ingest the tables of a single page.
    ///
    /// Tables below `min_table_rows` are skipped whole. Within a kept
    /// table, rows below `min_columns` are skipped, every cell is cleaned
    /// (trim, collapse whitespace, bidi fix), and rows whose cleaned
    /// cells are all empty are dropped as noise.
    pub fn collect_page(&mut self, page: &PageTables, opts: &CollectOptions) {
        self.stats.pages += 1;

        for table in &page.tables {
            self.stats.tables_seen += 1;
            if table.len() < opts.min_table_rows {
                continue;
            }
            self.stats.tables_kept += 1;

            for row in table {
                if row.len() < opts.min_columns {
                    self.stats.rows_skipped_short += 1;
                    continue;
                }

                let clean_row: Vec<String> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(raw) => clean_cell(raw),
                        None => String::new(),
                    })
                    .collect();

                if clean_row.iter().all(|c| c.is_empty()) {
                    self.stats.rows_skipped_blank += 1;
                    continue;
                }

                self.stats.rows_kept += 1;
                self.rows.push(clean_row);
            }
        }
    }

    /// Convenience wrapper over [`collect_page`](Self::collect_page).
    pub fn collect_pages(pages: &[PageTables], opts: &CollectOptions) -> DataSet {
        let mut dataset = DataSet::default();
        for page in pages {
            dataset.collect_page(page, opts);
        }
        dataset
    }
}

fn clean_cell(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    bidi::normalize(&collapsed)
}
