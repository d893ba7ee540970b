//! CSV copy of the snapshot table.

use cryptotrack_core::domain::AssetTable;

use super::{table_cells, Cell, SheetError, HEADERS};

pub(super) fn render_csv(table: &AssetTable) -> Result<Vec<u8>, SheetError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADERS)?;
    for cells in table_cells(table) {
        wtr.write_record(cells.iter().map(Cell::display))?;
    }
    wtr.into_inner()
        .map_err(|e| SheetError::Csv(csv::Error::from(e.into_error())))
}
