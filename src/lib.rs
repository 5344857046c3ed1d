//! # Sales Aggregator
//!
//! A library for turning raw sales records into the aggregates a sales dashboard
//! needs: headline metrics, a monthly revenue series, a top product ranking and a
//! revenue breakdown per category.
//!
//! ## Core Concepts
//!
//! - **Raw Record**: One sale with optional date, product, category, revenue and customer
//! - **Normalization**: Tokenized table rows are mapped to records once, resolving column aliases
//! - **Buckets**: Revenue is accumulated per month, product and category in first-seen order
//! - **Totality**: Every field has a default, so aggregation never fails on malformed records
//!
//! ## Example
//!
//! ```rust
//! use sales_aggregator::*;
//!
//! let records = vec![
//!     RawRecord::new("2024-01-15", "Laptop", "Electronics", 1200.0, "C001"),
//!     RawRecord::new("2024-01-20", "Mouse", "Electronics", 25.0, "C002"),
//!     RawRecord {
//!         revenue: Some(75.0),
//!         ..Default::default()
//!     },
//! ];
//!
//! let result = aggregate(&records);
//! assert_eq!(result.metrics.total_revenue, 1300);
//! assert_eq!(result.metrics.total_orders, 3);
//! assert_eq!(result.category_breakdown[1].name, "Other");
//! ```

pub mod engine;
pub mod error;
pub mod ingestion;
pub mod sample;
pub mod schema;
pub mod utils;

pub use engine::{AggregationConfig, RoundingMode, SalesAccumulator, SalesAggregator};
pub use error::{Result, SalesAggregationError};
pub use ingestion::*;
pub use sample::sample_records;
pub use schema::*;
pub use utils::*;

use std::borrow::Borrow;

/// Aggregates records with the default configuration.
pub fn aggregate<I, R>(records: I) -> AggregateResult
where
    I: IntoIterator<Item = R>,
    R: Borrow<RawRecord>,
{
    SalesAggregator::default().aggregate(records)
}

/// Normalizes tokenized rows and aggregates them with the given configuration.
pub fn aggregate_rows(
    rows: &[TokenizedRow],
    config: AggregationConfig,
) -> Result<AggregateResult> {
    let aggregator = SalesAggregator::new(config)?;
    let records = normalize_rows(rows);
    Ok(aggregator.aggregate(&records))
}
