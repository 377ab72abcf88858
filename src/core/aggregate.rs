//! Per-product aggregation for the report's summary sheet

use crate::types::RowRecord;
use std::cmp::Ordering;
use std::collections::HashMap;

/// How many best-selling products the summary table shows.
pub const TOP_PRODUCT_COUNT: usize = 5;

// Field name variants the marketplace exports are known to use
const PRODUCT_KEYS: &[&str] = &["Produk", "produk"];
const QTY_KEYS: &[&str] = &["Qty", "qty"];
const TOTAL_KEYS: &[&str] = &["Total", "total"];

/// Summed quantity and revenue for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductAggregate {
    pub name: String,
    pub quantity: f64,
    pub total: f64,
}

/// The summary sheet's numbers: best sellers plus the all-rows grand total.
#[derive(Debug, Clone, Default)]
pub struct SalesSummary {
    /// Top products by summed total, descending, at most [`TOP_PRODUCT_COUNT`].
    pub top_products: Vec<ProductAggregate>,
    /// Sum of every row's total field, not just the top products'.
    pub grand_total: f64,
}

/// Group rows by product name and sum quantity and total per product.
///
/// Missing numeric fields count as zero, rows without a product name still
/// contribute to the grand total, and an empty input yields an empty summary
/// rather than an error.
pub fn summarize(rows: &[RowRecord]) -> SalesSummary {
    let mut sums: HashMap<String, (f64, f64)> = HashMap::new();
    let mut seen_order: Vec<String> = Vec::new();
    let mut grand_total = 0.0;

    for row in rows {
        grand_total += row.number_or_zero(TOTAL_KEYS);

        let name = match row.get_any(PRODUCT_KEYS) {
            Some(value) => value.as_text(),
            None => continue,
        };
        if name.is_empty() {
            continue;
        }

        let entry = sums.entry(name.clone()).or_insert_with(|| {
            seen_order.push(name.clone());
            (0.0, 0.0)
        });
        entry.0 += row.number_or_zero(QTY_KEYS);
        entry.1 += row.number_or_zero(TOTAL_KEYS);
    }

    let mut top_products: Vec<ProductAggregate> = seen_order
        .into_iter()
        .map(|name| {
            let (quantity, total) = sums[&name];
            ProductAggregate {
                name,
                quantity,
                total,
            }
        })
        .collect();

    // Stable sort keeps first-seen order among equal totals
    top_products.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
    top_products.truncate(TOP_PRODUCT_COUNT);

    SalesSummary {
        top_products,
        grand_total,
    }
}
