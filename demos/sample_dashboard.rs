use sales_aggregator::sample::SAMPLE_SOURCE_NAME;
use sales_aggregator::*;

fn main() {
    println!("📊 Sales Aggregation Demo\n");
    println!("Analyzing: {}\n", SAMPLE_SOURCE_NAME);

    let records = sample_records();
    let result = aggregate(&records);

    println!("💰 Key Metrics:");
    println!("  Total Revenue:    ${:>8}", result.metrics.total_revenue);
    println!("  Total Orders:      {:>8}", result.metrics.total_orders);
    println!("  Avg Order Value:  ${:>8}", result.metrics.avg_order_value);
    println!("  Unique Customers:  {:>8}", result.metrics.unique_customers);

    println!("\n📈 Revenue Trend:");
    for point in &result.monthly_series {
        println!("  {}: ${:>8}", point.month, point.revenue);
    }

    println!("\n🏆 Top Products:");
    for (rank, product) in result.top_products.iter().enumerate() {
        println!("  {}. {:<12} ${:>8}", rank + 1, product.name, product.revenue);
    }

    println!("\n🗂️  Revenue by Category:");
    for (name, share) in result.category_shares() {
        println!("  {:<12} {:>5.0}%", name, share * 100.0);
    }

    match result.to_json() {
        Ok(json) => println!("\n📦 JSON:\n{}", json),
        Err(e) => eprintln!("❌ Error: {}", e),
    }
}
