//! SellerSol - marketplace sales analysis pipeline
//!
//! Turns an uploaded marketplace sales export into an AI-narrated analysis
//! report:
//!
//! - Import an .xlsx/.xls sales export into ordered row records
//! - Send a bounded row sample to a hosted analyst model for an
//!   HTML-flavored narrative
//! - Export a two-sheet report workbook: a readable summary (flattened
//!   narrative, top-5 products, grand total) plus the full source data
//!
//! The import and export halves are pure functions over buffers and records;
//! the AI client and the history store live at the edges.
//!
//! # Example
//!
//! ```no_run
//! use sellersol::excel::{import_bytes, ReportExporter};
//! use sellersol::types::AnalysisReport;
//!
//! let upload = std::fs::read("penjualan.xlsx")?;
//! let rows = import_bytes(&upload)?;
//!
//! let report = AnalysisReport::new("Shopee", "<p>Penjualan stabil.</p>", rows);
//! let workbook = ReportExporter::new(&report).export_to_buffer()?;
//! # let _ = workbook;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod ai;
pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod history;
pub mod types;

// Re-export commonly used types
pub use error::{SellersolError, SellersolResult};
pub use types::{AnalysisReport, CellValue, RowRecord};
