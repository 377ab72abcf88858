//! Excel import/export module
//!
//! The spreadsheet round-trip at the heart of the pipeline:
//! - Import: marketplace sales export (.xlsx/.xls) → row records
//! - Export: analysis report → two-sheet .xlsx report buffer

mod exporter;
mod importer;
mod narrative;
mod sample;

pub use exporter::{is_currency_column, ReportExporter, DATA_SHEET, SUMMARY_SHEET};
pub use importer::{import_bytes, import_sheet_bytes, SalesImporter};
pub use narrative::{estimate_line_count, estimate_row_height, flatten_html};
pub use sample::{sample_workbook_buffer, write_sample_workbook, SAMPLE_FILENAME};
