//! Excel report exporter - analysis report → two-sheet .xlsx buffer

use crate::core::summarize;
use crate::error::{SellersolError, SellersolResult};
use crate::excel::narrative;
use crate::types::{AnalysisReport, CellValue};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;

pub const SUMMARY_SHEET: &str = "Ringkasan Analisa";
pub const DATA_SHEET: &str = "Data Sumber Lengkap";

/// Rupiah display format for currency cells.
const CURRENCY_FORMAT: &str = "\"Rp\" #,##0";

/// Header-name fragments that mark a column as currency. Detection is purely
/// name-based; cell types are never inspected.
const CURRENCY_HINTS: &[&str] = &["harga", "total", "price", "amount"];

/// A column is currency-formatted when its header contains any of the known
/// fragments, case-insensitively.
pub fn is_currency_column(header: &str) -> bool {
    let lower = header.to_lowercase();
    CURRENCY_HINTS.iter().any(|hint| lower.contains(hint))
}

fn excel_err(e: XlsxError) -> SellersolError {
    SellersolError::Export(e.to_string())
}

/// Exporter for downloadable analysis reports.
///
/// Produces a workbook with a human-readable summary sheet (platform,
/// timestamp, flattened narrative, top-5 product table, grand total) and a
/// full-data sheet laid out exactly like the uploaded rows. Pure: consumes a
/// report, produces a buffer, touches nothing else.
pub struct ReportExporter<'a> {
    report: &'a AnalysisReport,
}

impl<'a> ReportExporter<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self { report }
    }

    /// Download filename for this report, whitespace in the platform name
    /// replaced by underscores.
    pub fn filename(&self) -> String {
        let platform: String = self
            .report
            .platform
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        format!("Laporan_Analisa_{platform}.xlsx")
    }

    /// Serialize the two-sheet workbook to an in-memory buffer.
    pub fn export_to_buffer(&self) -> SellersolResult<Vec<u8>> {
        let mut workbook = Workbook::new();

        let summary = workbook.add_worksheet();
        summary.set_name(SUMMARY_SHEET).map_err(excel_err)?;
        self.write_summary_sheet(summary)?;

        let data = workbook.add_worksheet();
        data.set_name(DATA_SHEET).map_err(excel_err)?;
        self.write_data_sheet(data)?;

        workbook.save_to_buffer().map_err(excel_err)
    }

    /// Write the workbook to a file.
    pub fn export(&self, path: &Path) -> SellersolResult<()> {
        let buffer = self.export_to_buffer()?;
        std::fs::write(path, buffer)?;
        Ok(())
    }

    fn write_summary_sheet(&self, worksheet: &mut Worksheet) -> SellersolResult<()> {
        let label = Format::new().set_bold();
        let section = Format::new().set_bold().set_font_size(12);
        let narrative_format = Format::new().set_text_wrap().set_align(FormatAlign::Top);
        let table_header = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x1E293B));
        let currency = Format::new().set_num_format(CURRENCY_FORMAT);
        let grand_label = Format::new().set_bold().set_border_top(FormatBorder::Double);
        let grand_value = Format::new()
            .set_bold()
            .set_num_format(CURRENCY_FORMAT)
            .set_border_top(FormatBorder::Double);

        worksheet.set_column_width(0, 40).map_err(excel_err)?;
        worksheet.set_column_width(1, 14).map_err(excel_err)?;
        worksheet.set_column_width(2, 18).map_err(excel_err)?;
        worksheet.set_column_width(3, 18).map_err(excel_err)?;

        worksheet
            .write_string_with_format(0, 0, "Platform", &label)
            .map_err(excel_err)?;
        worksheet
            .write_string(0, 1, &self.report.platform)
            .map_err(excel_err)?;

        worksheet
            .write_string_with_format(1, 0, "Dibuat", &label)
            .map_err(excel_err)?;
        worksheet
            .write_string(1, 1, self.report.created_at.format("%d/%m/%Y %H:%M").to_string())
            .map_err(excel_err)?;

        worksheet
            .write_string_with_format(3, 0, "Hasil Analisa AI", &section)
            .map_err(excel_err)?;

        // The narrative sits in one merged, wrapped, top-aligned cell; the
        // row is sized by the line estimate since cells do not auto-grow
        let flat = narrative::flatten_html(&self.report.narrative);
        worksheet
            .merge_range(4, 0, 4, 3, &flat, &narrative_format)
            .map_err(excel_err)?;
        worksheet
            .set_row_height(4, narrative::estimate_row_height(&flat))
            .map_err(excel_err)?;

        worksheet
            .write_string_with_format(6, 0, "Produk Terlaris", &section)
            .map_err(excel_err)?;
        worksheet
            .write_string_with_format(7, 0, "Produk", &table_header)
            .map_err(excel_err)?;
        worksheet
            .write_string_with_format(7, 1, "Qty", &table_header)
            .map_err(excel_err)?;
        worksheet
            .write_string_with_format(7, 2, "Total", &table_header)
            .map_err(excel_err)?;

        let summary = summarize(&self.report.rows);
        let mut row = 8u32;
        for product in &summary.top_products {
            worksheet
                .write_string(row, 0, &product.name)
                .map_err(excel_err)?;
            worksheet
                .write_number(row, 1, product.quantity)
                .map_err(excel_err)?;
            worksheet
                .write_number_with_format(row, 2, product.total, &currency)
                .map_err(excel_err)?;
            row += 1;
        }

        worksheet
            .write_string_with_format(row, 0, "Total Keseluruhan", &grand_label)
            .map_err(excel_err)?;
        worksheet
            .write_string_with_format(row, 1, "", &grand_label)
            .map_err(excel_err)?;
        worksheet
            .write_number_with_format(row, 2, summary.grand_total, &grand_value)
            .map_err(excel_err)?;

        Ok(())
    }

    fn write_data_sheet(&self, worksheet: &mut Worksheet) -> SellersolResult<()> {
        // Column layout follows the first record's key order
        let headers: Vec<String> = match self.report.rows.first() {
            Some(first) => first.keys().map(str::to_string).collect(),
            None => return Ok(()),
        };

        let header_format = Format::new().set_bold();
        let currency = Format::new().set_num_format(CURRENCY_FORMAT);
        let currency_columns: Vec<bool> = headers.iter().map(|h| is_currency_column(h)).collect();

        for (col, header) in headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, header, &header_format)
                .map_err(excel_err)?;
        }

        for (row_idx, record) in self.report.rows.iter().enumerate() {
            let row = (row_idx + 1) as u32;
            for (col_idx, header) in headers.iter().enumerate() {
                let Some(value) = record.get(header) else {
                    continue;
                };
                let col = col_idx as u16;
                match value {
                    CellValue::Number(n) if currency_columns[col_idx] => worksheet
                        .write_number_with_format(row, col, *n, &currency)
                        .map_err(excel_err)?,
                    CellValue::Number(n) => {
                        worksheet.write_number(row, col, *n).map_err(excel_err)?
                    }
                    CellValue::Text(s) => worksheet.write_string(row, col, s).map_err(excel_err)?,
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row, col, *b).map_err(excel_err)?
                    }
                    CellValue::Empty => continue,
                };
            }
        }

        worksheet.autofit();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_currency_detection_is_case_insensitive_substring_match() {
        assert!(is_currency_column("HARGA_SATUAN"));
        assert!(is_currency_column("hargaSatuan"));
        assert!(is_currency_column("Total"));
        assert!(is_currency_column("Unit Price"));
        assert!(is_currency_column("amountDue"));
        assert!(!is_currency_column("Kategori"));
        assert!(!is_currency_column("Qty"));
    }

    #[test]
    fn test_filename_replaces_whitespace() {
        let report = AnalysisReport::new("Tiktok Shop", "<p>ok</p>", Vec::new());
        let exporter = ReportExporter::new(&report);
        assert_eq!(exporter.filename(), "Laporan_Analisa_Tiktok_Shop.xlsx");
    }

    #[test]
    fn test_export_empty_rows_still_produces_a_workbook() {
        let report = AnalysisReport::new("Shopee", "<p>Tidak ada data.</p>", Vec::new());
        let buffer = ReportExporter::new(&report).export_to_buffer().unwrap();

        // xlsx is a zip container
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_export_with_rows_produces_a_workbook() {
        let mut row = RowRecord::new();
        row.push("Produk", CellValue::Text("Kopi".to_string()));
        row.push("Qty", CellValue::Number(2.0));
        row.push("Total", CellValue::Number(36000.0));

        let report = AnalysisReport::new("Tokopedia", "<h3>Ringkas</h3>", vec![row]);
        let buffer = ReportExporter::new(&report).export_to_buffer().unwrap();
        assert_eq!(&buffer[..2], b"PK");
    }
}
