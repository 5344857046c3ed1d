use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesAggregationError {
    #[error("Invalid top products limit {0}: must be at least 1")]
    InvalidTopProductsLimit(usize),

    #[error("Invalid default category '{0}': must not be blank")]
    InvalidDefaultCategory(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SalesAggregationError>;
