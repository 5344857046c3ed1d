use crate::error::Result;
use crate::schema::RawRecord;
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

/// One row as produced by a tabular reader: column header to dynamically typed cell.
pub type TokenizedRow = IndexMap<String, Value>;

const DATE_COLUMNS: &[&str] = &["Date", "OrderDate", "date", "order_date"];
const PRODUCT_COLUMNS: &[&str] = &["Product", "ProductName", "product", "product_name"];
const CATEGORY_COLUMNS: &[&str] = &[
    "Category",
    "ProductCategory",
    "category",
    "product_category",
];
const REVENUE_COLUMNS: &[&str] = &["Revenue", "revenue"];
const CUSTOMER_COLUMNS: &[&str] = &["Customer", "CustomerID", "customer", "customer_id"];

/// Renders a cell as text. Blank strings, null and nested values yield `None`.
///
/// Numbers render with their JSON text, so a numeric `1001` and a string `"1001"`
/// become the same identifier.
pub fn cell_to_text(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reads a cell as a monetary amount. Only finite numbers and numeric strings qualify.
pub fn cell_to_amount(cell: &Value) -> Option<f64> {
    let amount = match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.filter(|value| value.is_finite())
}

fn first_text(row: &TokenizedRow, columns: &[&str]) -> Option<String> {
    columns
        .iter()
        .filter_map(|column| row.get(*column))
        .find_map(cell_to_text)
}

fn first_amount(row: &TokenizedRow, columns: &[&str]) -> Option<f64> {
    // A zero amount falls through to the next alias, as an empty cell would.
    columns
        .iter()
        .filter_map(|column| row.get(*column))
        .filter_map(cell_to_amount)
        .find(|amount| *amount != 0.0)
}

/// Resolves column aliases for one row into a `RawRecord`.
pub fn normalize_row(row: &TokenizedRow) -> RawRecord {
    RawRecord {
        date: first_text(row, DATE_COLUMNS),
        product: first_text(row, PRODUCT_COLUMNS),
        category: first_text(row, CATEGORY_COLUMNS),
        revenue: first_amount(row, REVENUE_COLUMNS),
        customer: first_text(row, CUSTOMER_COLUMNS),
    }
}

pub fn normalize_rows(rows: &[TokenizedRow]) -> Vec<RawRecord> {
    let records: Vec<RawRecord> = rows.iter().map(normalize_row).collect();
    debug!("Normalized {} tokenized rows", records.len());
    records
}

/// Parses a JSON array of row objects (e.g. a network payload) into records.
pub fn records_from_json(payload: &str) -> Result<Vec<RawRecord>> {
    let rows: Vec<TokenizedRow> = serde_json::from_str(payload)?;
    Ok(normalize_rows(&rows))
}
