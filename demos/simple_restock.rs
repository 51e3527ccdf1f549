//! 簡單補貨計算範例

use chrono::NaiveDate;
use restock::{
    LeadTimeSource, ReplenishmentConfig, ReplenishmentEngine, StockRecord, WarehouseDirectory,
    WarehouseRecord,
};
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 簡單補貨計算示例 ===\n");

    let mut directory = WarehouseDirectory::new();
    directory.insert(WarehouseRecord::new(
        "W1".to_string(),
        7,
        LeadTimeSource::FromFile,
    ));

    let records = vec![
        StockRecord::new(
            "W1".to_string(),
            "BIKE-001".to_string(),
            "M".to_string(),
            Decimal::from(300),
            Decimal::from(50),
        )
        .with_name("Bike".to_string()),
        StockRecord::new(
            "W1".to_string(),
            "HELMET-01".to_string(),
            "L".to_string(),
            Decimal::from(30),
            Decimal::from(90),
        )
        .with_name("Helmet".to_string()),
    ];

    let today = NaiveDate::from_ymd_opt(2025, 10, 6).ok_or("invalid date")?;
    let engine = ReplenishmentEngine::default();
    let plan = engine.run(&records, &directory, today);

    println!("基準日: {}", plan.today);
    for record in &plan.records {
        println!(
            "{}: 日銷 {}, 售罄 {} 天, 生產開始 {}, 緊急 {}, 補貨 {}",
            record.item.seller_article,
            record.sales_per_day,
            record.days_to_zero,
            record.production_start_date,
            record.is_urgent,
            record.quantity_to_reorder
        );
    }

    for shipment in &plan.shipments {
        println!(
            "倉庫 {} 出貨日 {} ({:?})",
            shipment.warehouse, shipment.shipment_date, shipment.status
        );
    }

    // 旺季：覆蓋 60 天，21 天內售罄即需關注
    let peak = ReplenishmentEngine::new(
        ReplenishmentConfig::new()
            .with_coverage_days(60)
            .with_attention_threshold(21),
    );
    let peak_plan = peak.run(&records, &directory, today);

    println!("\n旺季參數:");
    for summary in &peak_plan.summaries {
        println!(
            "{}: 需求 {}, 狀態 {:?}",
            summary.seller_article, summary.combined_needed_for_coverage, summary.status
        );
    }

    Ok(())
}
