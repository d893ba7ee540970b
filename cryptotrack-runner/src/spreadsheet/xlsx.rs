//! `.xlsx` rendering via rust_xlsxwriter.

use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook};

use cryptotrack_core::domain::AssetTable;

use super::{column_widths, table_cells, Cell, SheetError, HEADERS, HEADER_FILL_RGB, SHEET_NAME};

pub(super) fn render_workbook(table: &AssetTable) -> Result<Vec<u8>, SheetError> {
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL_RGB))
        .set_pattern(FormatPattern::Solid);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, cells) in table_cells(table).iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(s) => {
                    sheet.write_string(row, col, s)?;
                }
                Cell::Number(n) => {
                    sheet.write_number(row, col, *n)?;
                }
                Cell::Empty => {}
            }
        }
    }

    for (col, width) in column_widths(table).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}
