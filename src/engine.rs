use crate::error::{Result, SalesAggregationError};
use crate::schema::*;
use crate::utils::{month_index, month_label};
use indexmap::{IndexMap, IndexSet};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Halves round toward positive infinity (2.5 -> 3, -2.5 -> -2).
    #[default]
    HalfUp,
    /// Halves round to the nearest even integer (2.5 -> 2, 3.5 -> 4).
    HalfEven,
}

impl RoundingMode {
    pub fn round(self, value: f64) -> i64 {
        if !value.is_finite() {
            warn!("Non-finite revenue total {} reported as 0", value);
            return 0;
        }

        let rounded = match self {
            RoundingMode::HalfUp => {
                let floor = value.floor();
                if value - floor >= 0.5 {
                    floor + 1.0
                } else {
                    floor
                }
            }
            RoundingMode::HalfEven => value.round_ties_even(),
        };
        rounded as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AggregationConfig {
    #[schemars(description = "Maximum number of entries in the product ranking")]
    pub top_products_limit: usize,

    #[schemars(description = "Category name used for records without one")]
    pub default_category: String,

    #[schemars(description = "Rounding rule applied to every revenue-derived output value")]
    pub rounding: RoundingMode,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            top_products_limit: DEFAULT_TOP_PRODUCTS,
            default_category: DEFAULT_CATEGORY.to_string(),
            rounding: RoundingMode::default(),
        }
    }
}

impl AggregationConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_products_limit == 0 {
            return Err(SalesAggregationError::InvalidTopProductsLimit(
                self.top_products_limit,
            ));
        }
        if self.default_category.trim().is_empty() {
            return Err(SalesAggregationError::InvalidDefaultCategory(
                self.default_category.clone(),
            ));
        }
        Ok(())
    }
}

/// Running, unrounded totals for a stream of records.
///
/// Bucket maps keep first-seen insertion order. Two accumulators built over
/// consecutive chunks can be combined with [`SalesAccumulator::merge`].
#[derive(Debug, Clone, Default)]
pub struct SalesAccumulator {
    total_revenue: f64,
    total_orders: usize,
    undated_revenue: f64,
    customers: IndexSet<String>,
    // keyed by month0
    months: IndexMap<usize, f64>,
    products: IndexMap<String, f64>,
    categories: IndexMap<String, f64>,
}

impl SalesAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, record: &RawRecord, default_category: &str) {
        let revenue = record.revenue_or_zero();

        self.total_revenue += revenue;
        self.total_orders += 1;

        if let Some(customer) = record.customer() {
            if !self.customers.contains(customer) {
                self.customers.insert(customer.to_string());
            }
        }

        match record.date().and_then(month_index) {
            Some(month) => *self.months.entry(month).or_insert(0.0) += revenue,
            None => {
                if let Some(raw) = record.date() {
                    debug!("Skipping unparseable date '{}' in monthly series", raw);
                }
                self.undated_revenue += revenue;
            }
        }

        if let Some(product) = record.product() {
            add_to_bucket(&mut self.products, product, revenue);
        }

        add_to_bucket(
            &mut self.categories,
            record.category_or(default_category),
            revenue,
        );
    }

    pub fn merge(&mut self, other: SalesAccumulator) {
        self.total_revenue += other.total_revenue;
        self.total_orders += other.total_orders;
        self.undated_revenue += other.undated_revenue;
        self.customers.extend(other.customers);

        for (month, revenue) in other.months {
            *self.months.entry(month).or_insert(0.0) += revenue;
        }
        for (product, revenue) in other.products {
            *self.products.entry(product).or_insert(0.0) += revenue;
        }
        for (category, revenue) in other.categories {
            *self.categories.entry(category).or_insert(0.0) += revenue;
        }
    }

    pub fn total_orders(&self) -> usize {
        self.total_orders
    }

    /// Revenue of records that did not land in any month bucket.
    pub fn undated_revenue(&self) -> f64 {
        self.undated_revenue
    }

    pub fn finish(self, top_products_limit: usize, rounding: RoundingMode) -> AggregateResult {
        let avg_order_value = if self.total_orders == 0 {
            0
        } else {
            rounding.round(self.total_revenue / self.total_orders as f64)
        };

        let metrics = SummaryMetrics {
            total_revenue: rounding.round(self.total_revenue),
            total_orders: self.total_orders,
            avg_order_value,
            unique_customers: self.customers.len(),
        };

        let monthly_series = self
            .months
            .into_iter()
            .map(|(month, revenue)| MonthlyRevenue {
                month: month_label(month).to_string(),
                revenue: rounding.round(revenue),
            })
            .collect();

        // Stable sort: equal revenue keeps first-seen order
        let mut ranked: Vec<(String, f64)> = self.products.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        let top_products = ranked
            .into_iter()
            .take(top_products_limit)
            .map(|(name, revenue)| NamedRevenue {
                name,
                revenue: rounding.round(revenue),
            })
            .collect();

        let category_breakdown = self
            .categories
            .into_iter()
            .map(|(name, revenue)| NamedRevenue {
                name,
                revenue: rounding.round(revenue),
            })
            .collect();

        AggregateResult {
            metrics,
            monthly_series,
            top_products,
            category_breakdown,
        }
    }
}

fn add_to_bucket(buckets: &mut IndexMap<String, f64>, key: &str, revenue: f64) {
    match buckets.get_mut(key) {
        Some(total) => *total += revenue,
        None => {
            buckets.insert(key.to_string(), revenue);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SalesAggregator {
    config: AggregationConfig,
}

impl SalesAggregator {
    pub fn new(config: AggregationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    pub fn accumulate<I, R>(&self, records: I) -> SalesAccumulator
    where
        I: IntoIterator<Item = R>,
        R: Borrow<RawRecord>,
    {
        let mut accumulator = SalesAccumulator::new();
        for record in records {
            accumulator.add_record(record.borrow(), &self.config.default_category);
        }
        accumulator
    }

    pub fn finish(&self, accumulator: SalesAccumulator) -> AggregateResult {
        debug!(
            "Finishing aggregation: {} months, {} products, {} categories, {} customers",
            accumulator.months.len(),
            accumulator.products.len(),
            accumulator.categories.len(),
            accumulator.customers.len()
        );
        accumulator.finish(self.config.top_products_limit, self.config.rounding)
    }

    pub fn aggregate<I, R>(&self, records: I) -> AggregateResult
    where
        I: IntoIterator<Item = R>,
        R: Borrow<RawRecord>,
    {
        let accumulator = self.accumulate(records);
        info!("Aggregating {} sales records", accumulator.total_orders());
        self.finish(accumulator)
    }
}
