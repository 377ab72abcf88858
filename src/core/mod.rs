//! Core aggregation logic for the sales summary

mod aggregate;

pub use aggregate::{summarize, ProductAggregate, SalesSummary, TOP_PRODUCT_COUNT};
