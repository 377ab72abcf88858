//! Demo sales workbook, offered so users can try the expected upload format

use crate::error::{SellersolError, SellersolResult};
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub const SAMPLE_FILENAME: &str = "Dummy_Data_Penjualan.xlsx";

const SHEET_NAME: &str = "Laporan Penjualan";

const HEADERS: &[&str] = &[
    "No", "Tanggal", "Produk", "Kategori", "Harga", "Qty", "Total", "Platform",
];

struct SampleRow {
    no: f64,
    tanggal: &'static str,
    produk: &'static str,
    kategori: &'static str,
    harga: f64,
    qty: f64,
    total: f64,
    platform: &'static str,
}

const ROWS: &[SampleRow] = &[
    SampleRow {
        no: 1.0,
        tanggal: "2023-10-01",
        produk: "Kopi Susu",
        kategori: "Minuman",
        harga: 18000.0,
        qty: 10.0,
        total: 180000.0,
        platform: "Shopee",
    },
    SampleRow {
        no: 2.0,
        tanggal: "2023-10-01",
        produk: "Roti Bakar",
        kategori: "Makanan",
        harga: 15000.0,
        qty: 5.0,
        total: 75000.0,
        platform: "Tokopedia",
    },
    SampleRow {
        no: 3.0,
        tanggal: "2023-10-02",
        produk: "Kopi Hitam",
        kategori: "Minuman",
        harga: 10000.0,
        qty: 20.0,
        total: 200000.0,
        platform: "Gojek",
    },
];

/// Build the demo workbook in memory.
pub fn sample_workbook_buffer() -> SellersolResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| SellersolError::Export(e.to_string()))?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| SellersolError::Export(e.to_string()))?;
    }

    for (idx, row) in ROWS.iter().enumerate() {
        let r = (idx + 1) as u32;
        worksheet
            .write_number(r, 0, row.no)
            .and_then(|ws| ws.write_string(r, 1, row.tanggal))
            .and_then(|ws| ws.write_string(r, 2, row.produk))
            .and_then(|ws| ws.write_string(r, 3, row.kategori))
            .and_then(|ws| ws.write_number(r, 4, row.harga))
            .and_then(|ws| ws.write_number(r, 5, row.qty))
            .and_then(|ws| ws.write_number(r, 6, row.total))
            .and_then(|ws| ws.write_string(r, 7, row.platform))
            .map_err(|e| SellersolError::Export(e.to_string()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| SellersolError::Export(e.to_string()))
}

/// Write the demo workbook to a file.
pub fn write_sample_workbook(path: &Path) -> SellersolResult<()> {
    let buffer = sample_workbook_buffer()?;
    std::fs::write(path, buffer)?;
    Ok(())
}
