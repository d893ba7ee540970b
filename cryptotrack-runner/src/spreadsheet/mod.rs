//! Spreadsheet output for the latest snapshot.
//!
//! One sheet, one header row, one row per asset in fetch order. The file is
//! rewritten from scratch on every call; no earlier snapshot survives on disk.

mod csv_mirror;
mod xlsx;

use std::path::{Path, PathBuf};

use thiserror::Error;

use cryptotrack_core::domain::{AssetRow, AssetTable};

use crate::atomic_write::write_atomic;

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Crypto Data";

/// Column headers, in output order.
pub const HEADERS: [&str; 10] = [
    "Symbol",
    "Name",
    "Price (USD)",
    "Market Cap",
    "Volume (24h)",
    "24h Change %",
    "Circulating Supply",
    "Market Share %",
    "Volume/Market Cap Ratio",
    "Last Updated",
];

/// Extra character widths added to the longest value in a column.
pub const COLUMN_PADDING: usize = 2;

/// Header background fill (RGB).
pub const HEADER_FILL_RGB: u32 = 0x1F4E78;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("xlsx serialization failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One cell value before it is handed to a concrete format.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Stringified value, as used for CSV output and column sizing.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

fn optional(value: Option<f64>) -> Cell {
    value.map_or(Cell::Empty, Cell::Number)
}

/// Cells of one row, in `HEADERS` order.
pub fn row_cells(row: &AssetRow) -> Vec<Cell> {
    vec![
        Cell::Text(row.symbol.clone()),
        Cell::Text(row.name.clone()),
        Cell::Number(row.price),
        Cell::Number(row.market_cap),
        Cell::Number(row.volume_24h),
        Cell::Number(row.change_24h_pct),
        Cell::Number(row.circulating_supply),
        optional(row.market_share_pct),
        optional(row.volume_to_market_cap),
        Cell::Text(row.last_updated_display()),
    ]
}

pub fn table_cells(table: &AssetTable) -> Vec<Vec<Cell>> {
    table.rows.iter().map(row_cells).collect()
}

/// Longest stringified value per column (header included) plus padding.
pub fn column_widths(table: &AssetTable) -> Vec<usize> {
    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in table_cells(table) {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.display().chars().count());
        }
    }
    widths.into_iter().map(|w| w + COLUMN_PADDING).collect()
}

/// Writes snapshot tables as `.xlsx` (and optionally `.csv`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetWriter;

impl SpreadsheetWriter {
    /// Serialize the table to an in-memory workbook.
    pub fn to_xlsx_bytes(&self, table: &AssetTable) -> Result<Vec<u8>, SheetError> {
        xlsx::render_workbook(table)
    }

    /// Replace `path` with a workbook holding `table`.
    ///
    /// Returns the absolute path of the written file when it can be resolved.
    pub fn write(&self, table: &AssetTable, path: &Path) -> Result<PathBuf, SheetError> {
        let bytes = self.to_xlsx_bytes(table)?;
        replace_file(path, &bytes)
    }

    /// Replace `path` with a CSV copy of `table`.
    pub fn write_csv(&self, table: &AssetTable, path: &Path) -> Result<PathBuf, SheetError> {
        let bytes = csv_mirror::render_csv(table)?;
        replace_file(path, &bytes)
    }
}

fn replace_file(path: &Path, bytes: &[u8]) -> Result<PathBuf, SheetError> {
    write_atomic(path, bytes).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
}
