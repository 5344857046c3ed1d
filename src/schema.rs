use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Category used when a record does not name one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Number of entries kept in the product ranking unless configured otherwise.
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "deserialize_text")]
    #[schemars(
        description = "Date of the sale, e.g. 2024-01-15. Unparseable or missing dates are left out of the monthly series."
    )]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "deserialize_text")]
    #[schemars(description = "Display name of the sold product")]
    pub product: Option<String>,

    #[serde(default, deserialize_with = "deserialize_text")]
    #[schemars(description = "Product category. Missing categories are reported as 'Other'.")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(
        description = "Revenue of the sale. Numbers and numeric strings are accepted; anything else counts as zero."
    )]
    pub revenue: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_text")]
    #[schemars(description = "Customer identifier used for the unique customer count")]
    pub customer: Option<String>,
}

impl RawRecord {
    pub fn new(
        date: impl Into<String>,
        product: impl Into<String>,
        category: impl Into<String>,
        revenue: f64,
        customer: impl Into<String>,
    ) -> Self {
        Self {
            date: Some(date.into()),
            product: Some(product.into()),
            category: Some(category.into()),
            revenue: Some(revenue),
            customer: Some(customer.into()),
        }
    }

    /// Revenue with the zero default applied. Negative zero is folded into `0.0`.
    pub fn revenue_or_zero(&self) -> f64 {
        match self.revenue {
            Some(value) if value.is_finite() => value + 0.0,
            _ => 0.0,
        }
    }

    pub fn date(&self) -> Option<&str> {
        present(&self.date)
    }

    pub fn product(&self) -> Option<&str> {
        present(&self.product)
    }

    /// Category with the fallback applied.
    pub fn category_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        present(&self.category).unwrap_or(fallback)
    }

    pub fn customer(&self) -> Option<&str> {
        present(&self.customer)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Accepts strings, numbers and booleans as text; null becomes `None`.
fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| crate::ingestion::cell_to_text(&v)))
}

/// Accepts numbers and numeric strings; any other shape becomes `None`.
fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| crate::ingestion::cell_to_amount(&v)))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    #[schemars(description = "Sum of all revenue, rounded")]
    pub total_revenue: i64,

    #[schemars(description = "Number of records aggregated")]
    pub total_orders: usize,

    #[schemars(
        description = "Total revenue divided by total orders, rounded. Zero when there are no orders."
    )]
    pub avg_order_value: i64,

    #[schemars(description = "Number of distinct customer identifiers")]
    pub unique_customers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MonthlyRevenue {
    #[schemars(description = "Three-letter month label, e.g. 'Jan'. Years are not distinguished.")]
    pub month: String,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NamedRevenue {
    pub name: String,
    pub revenue: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub metrics: SummaryMetrics,

    #[schemars(description = "Revenue per calendar month, in the order months were first seen")]
    pub monthly_series: Vec<MonthlyRevenue>,

    #[schemars(description = "Highest-revenue products, descending")]
    pub top_products: Vec<NamedRevenue>,

    #[schemars(description = "Revenue per category")]
    pub category_breakdown: Vec<NamedRevenue>,
}

impl AggregateResult {
    /// True when no orders were aggregated; `avg_order_value` is then a placeholder zero.
    pub fn is_empty(&self) -> bool {
        self.metrics.total_orders == 0
    }

    /// Each category's fraction of the summed category revenue.
    pub fn category_shares(&self) -> Vec<(String, f64)> {
        let total: i64 = self.category_breakdown.iter().map(|c| c.revenue).sum();

        self.category_breakdown
            .iter()
            .map(|c| {
                let share = if total == 0 {
                    0.0
                } else {
                    c.revenue as f64 / total as f64
                };
                (c.name.clone(), share)
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AggregateResult)
    }

    pub fn schema_as_json() -> serde_json::Result<String> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let result = AggregateResult {
            metrics: SummaryMetrics {
                total_revenue: 100,
                total_orders: 2,
                avg_order_value: 50,
                unique_customers: 1,
            },
            monthly_series: vec![MonthlyRevenue {
                month: "Jan".to_string(),
                revenue: 100,
            }],
            top_products: vec![NamedRevenue {
                name: "Laptop".to_string(),
                revenue: 100,
            }],
            category_breakdown: vec![NamedRevenue {
                name: "Electronics".to_string(),
                revenue: 100,
            }],
        };

        let json = result.to_json().unwrap();
        for key in [
            "totalRevenue",
            "totalOrders",
            "avgOrderValue",
            "uniqueCustomers",
            "monthlySeries",
            "topProducts",
            "categoryBreakdown",
        ] {
            assert!(json.contains(key), "missing key {}", key);
        }

        let back: AggregateResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_lenient_record_deserialization() {
        let record: RawRecord = serde_json::from_str(
            r#"{"date": "2024-01-15", "product": "Mouse", "revenue": "25.5", "customer": 1001}"#,
        )
        .unwrap();

        assert_eq!(record.revenue, Some(25.5));
        assert_eq!(record.customer(), Some("1001"));
        assert_eq!(record.category, None);
        assert_eq!(record.category_or(DEFAULT_CATEGORY), "Other");

        let record: RawRecord =
            serde_json::from_str(r#"{"revenue": "n/a", "category": "  ", "product": null}"#)
                .unwrap();
        assert_eq!(record.revenue, None);
        assert_eq!(record.revenue_or_zero(), 0.0);
        assert_eq!(record.category_or(DEFAULT_CATEGORY), "Other");
        assert_eq!(record.product(), None);
    }

    #[test]
    fn test_non_finite_revenue_counts_as_zero() {
        let record = RawRecord {
            revenue: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(record.revenue_or_zero(), 0.0);
    }

    #[test]
    fn test_negative_zero_revenue_is_positive_zero() {
        let record = RawRecord {
            revenue: Some(-0.0),
            ..Default::default()
        };
        assert!(record.revenue_or_zero().is_sign_positive());
    }

    #[test]
    fn test_category_shares() {
        let result = AggregateResult {
            category_breakdown: vec![
                NamedRevenue {
                    name: "A".to_string(),
                    revenue: 75,
                },
                NamedRevenue {
                    name: "B".to_string(),
                    revenue: 25,
                },
            ],
            ..Default::default()
        };

        let shares = result.category_shares();
        assert_eq!(shares[0].0, "A");
        assert!((shares[0].1 - 0.75).abs() < 1e-12);
        assert!((shares[1].1 - 0.25).abs() < 1e-12);

        let empty = AggregateResult::default();
        assert!(empty.is_empty());
        assert!(empty.category_shares().is_empty());
    }

    #[test]
    fn test_schema_generation() {
        let schema_json = AggregateResult::schema_as_json().unwrap();
        assert!(schema_json.contains("totalRevenue"));
        assert!(schema_json.contains("monthlySeries"));
        assert!(schema_json.contains("categoryBreakdown"));
    }
}
