//! Excel importer - marketplace sales export (.xlsx/.xls) → row records

use crate::error::{SellersolError, SellersolResult};
use crate::types::{CellValue, RowRecord};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Importer for marketplace order exports.
///
/// Reads the first worksheet only: row 1 supplies the column headers, every
/// later row becomes one [`RowRecord`]. Headers are taken as-is, without
/// normalization, so downstream lookups tolerate the casing the platform
/// happened to use.
pub struct SalesImporter {
    path: PathBuf,
}

impl SalesImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the file at the configured path.
    pub fn import(&self) -> SellersolResult<Vec<RowRecord>> {
        let bytes = std::fs::read(&self.path)?;
        import_bytes(&bytes)
    }
}

/// Import an uploaded spreadsheet buffer, first worksheet only.
///
/// An unparseable buffer is a [`SellersolError::Format`]. A workbook with no
/// worksheets, or a worksheet with no rows beyond the header, yields an empty
/// sequence rather than an error.
pub fn import_bytes(bytes: &[u8]) -> SellersolResult<Vec<RowRecord>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SellersolError::Format(e.to_string()))?;

    match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => Ok(rows_from_range(&range)),
        Some(Err(e)) => Err(SellersolError::Format(e.to_string())),
        None => Ok(Vec::new()),
    }
}

/// Import a named worksheet instead of the first one. Used to re-read the
/// full-data sheet of a generated report.
pub fn import_sheet_bytes(bytes: &[u8], sheet: &str) -> SellersolResult<Vec<RowRecord>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SellersolError::Format(e.to_string()))?;

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| SellersolError::Format(e.to_string()))?;
    Ok(rows_from_range(&range))
}

fn rows_from_range(range: &Range<Data>) -> Vec<RowRecord> {
    let (height, width) = range.get_size();
    if height < 2 {
        // Header only, or nothing at all
        return Vec::new();
    }

    // Row 1 cells, coerced to text, are the per-column headers
    let headers: Vec<String> = (0..width)
        .map(|col| header_text(range.get((0, col))))
        .collect();

    let mut rows = Vec::with_capacity(height - 1);
    for row in 1..height {
        let mut record = RowRecord::new();
        for (col, header) in headers.iter().enumerate() {
            if header.is_empty() {
                // Column has no header mapping, drop it silently
                continue;
            }
            if let Some(cell) = range.get((row, col)) {
                if matches!(cell, Data::Empty) {
                    continue;
                }
                record.push(header.clone(), convert_cell(cell));
            }
        }
        rows.push(record);
    }
    rows
}

fn header_text(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Float(f)) => f.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Dates stay as Excel serial numbers; the pipeline never does
        // date arithmetic on them
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook;

    fn workbook_buffer(header: &[&str], rows: &[Vec<CellValue>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (col, name) in header.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name).unwrap();
        }
        for (row_idx, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                let (r, c) = ((row_idx + 1) as u32, col as u16);
                match value {
                    CellValue::Text(s) => worksheet.write_string(r, c, s).unwrap(),
                    CellValue::Number(n) => worksheet.write_number(r, c, *n).unwrap(),
                    CellValue::Bool(b) => worksheet.write_boolean(r, c, *b).unwrap(),
                    CellValue::Empty => continue,
                };
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_import_returns_one_record_per_data_row() {
        let buffer = workbook_buffer(
            &["Produk", "Qty", "Total"],
            &[
                vec![text("Kopi Susu"), CellValue::Number(10.0), CellValue::Number(180000.0)],
                vec![text("Roti Bakar"), CellValue::Number(5.0), CellValue::Number(75000.0)],
            ],
        );

        let rows = import_bytes(&buffer).unwrap();

        assert_eq!(rows.len(), 2);
        let keys: Vec<&str> = rows[0].keys().collect();
        assert_eq!(keys, vec!["Produk", "Qty", "Total"]);
        assert_eq!(rows[0].get("Produk"), Some(&text("Kopi Susu")));
        assert_eq!(rows[1].get("Total"), Some(&CellValue::Number(75000.0)));
    }

    #[test]
    fn test_import_header_only_sheet_is_empty() {
        let buffer = workbook_buffer(&["Produk", "Qty"], &[]);
        assert_eq!(import_bytes(&buffer).unwrap(), Vec::new());
    }

    #[test]
    fn test_import_invalid_buffer_is_format_error() {
        let result = import_bytes(b"definitely not a spreadsheet");
        assert!(matches!(result, Err(SellersolError::Format(_))));
    }

    #[test]
    fn test_import_skips_empty_cells() {
        let buffer = workbook_buffer(
            &["Produk", "Qty"],
            &[vec![text("Kopi Hitam"), CellValue::Empty]],
        );

        let rows = import_bytes(&buffer).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("Qty"), None);
    }

    #[test]
    fn test_import_drops_columns_beyond_the_header() {
        // Three cells in the data row, but only two headers
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Produk").unwrap();
        worksheet.write_string(0, 1, "Qty").unwrap();
        worksheet.write_string(1, 0, "Teh Manis").unwrap();
        worksheet.write_number(1, 1, 3.0).unwrap();
        worksheet.write_string(1, 2, "orphan").unwrap();
        let buffer = workbook.save_to_buffer().unwrap();

        let rows = import_bytes(&buffer).unwrap();
        assert_eq!(rows.len(), 1);
        let keys: Vec<&str> = rows[0].keys().collect();
        assert_eq!(keys, vec!["Produk", "Qty"]);
    }

    #[test]
    fn test_import_numeric_header_is_coerced_to_text() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_number(0, 0, 2024.0).unwrap();
        worksheet.write_string(1, 0, "nilai").unwrap();
        let buffer = workbook.save_to_buffer().unwrap();

        let rows = import_bytes(&buffer).unwrap();
        assert_eq!(rows[0].get("2024"), Some(&text("nilai")));
    }

    #[test]
    fn test_import_named_sheet() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name("Pertama").unwrap();
        let second = workbook.add_worksheet();
        second.set_name("Kedua").unwrap();
        second.write_string(0, 0, "Produk").unwrap();
        second.write_string(1, 0, "Es Teh").unwrap();
        let buffer = workbook.save_to_buffer().unwrap();

        let rows = import_sheet_bytes(&buffer, "Kedua").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Produk"), Some(&text("Es Teh")));

        assert!(matches!(
            import_sheet_bytes(&buffer, "Ketiga"),
            Err(SellersolError::Format(_))
        ));
    }
}
