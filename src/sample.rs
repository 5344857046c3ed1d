use crate::schema::RawRecord;

/// Built-in demo dataset: ten sales across four months of 2024.
pub fn sample_records() -> Vec<RawRecord> {
    vec![
        RawRecord::new("2024-01-15", "Laptop", "Electronics", 1200.0, "C001"),
        RawRecord::new("2024-01-20", "Mouse", "Electronics", 25.0, "C002"),
        RawRecord::new("2024-02-10", "Keyboard", "Electronics", 75.0, "C003"),
        RawRecord::new("2024-02-15", "Desk", "Furniture", 350.0, "C001"),
        RawRecord::new("2024-03-05", "Chair", "Furniture", 250.0, "C004"),
        RawRecord::new("2024-03-12", "Monitor", "Electronics", 300.0, "C005"),
        RawRecord::new("2024-03-20", "Laptop", "Electronics", 1200.0, "C006"),
        RawRecord::new("2024-04-08", "Headphones", "Electronics", 150.0, "C002"),
        RawRecord::new("2024-04-15", "Desk Lamp", "Furniture", 45.0, "C007"),
        RawRecord::new("2024-04-22", "Notebook", "Office", 15.0, "C003"),
    ]
}

pub const SAMPLE_SOURCE_NAME: &str = "sample-sales-data.csv";
