//! 集成測試

use chrono::NaiveDate;
use restock::*;
use rstest::rstest;
use rust_decimal::Decimal;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()
}

fn days(n: i64) -> NaiveDate {
    calendar::add_days(today(), n)
}

fn item(warehouse: &str, article: &str, size: &str, sold: i64, stock: i64) -> StockRecord {
    StockRecord::new(
        warehouse.to_string(),
        article.to_string(),
        size.to_string(),
        Decimal::from(sold),
        Decimal::from(stock),
    )
}

fn directory(entries: &[(&str, u32)]) -> WarehouseDirectory {
    entries
        .iter()
        .map(|(name, lead)| WarehouseRecord::new(name.to_string(), *lead, LeadTimeSource::FromFile))
        .collect()
}

#[test]
fn test_fast_mover_is_urgent() {
    // 場景：W1 交期 7 天，月銷 300，庫存 50
    let engine = ReplenishmentEngine::default();
    let plan = engine.run(
        &[item("W1", "A", "M", 300, 50)],
        &directory(&[("W1", 7)]),
        today(),
    );

    let record = &plan.records[0];
    assert_eq!(record.sales_per_day, Decimal::from(10));
    assert_eq!(record.needed_for_coverage, Decimal::from(450));
    assert_eq!(record.days_to_zero, 5);
    assert_eq!(record.risk_date, days(5));
    assert_eq!(record.production_start_date, days(-2));
    assert!(record.is_urgent);
    assert_eq!(record.quantity_to_reorder, Decimal::from(400));
    assert_eq!(record.activity_tier, ActivityTier::Medium);

    assert_eq!(plan.stats.urgent_records, 1);
    assert_eq!(plan.summaries[0].status, SkuStatus::Critical);
}

#[test]
fn test_no_sales_never_urgent() {
    // 場景：無銷量、無庫存
    let engine = ReplenishmentEngine::default();
    let plan = engine.run(
        &[item("W1", "A", "M", 0, 0)],
        &directory(&[("W1", 7)]),
        today(),
    );

    let record = &plan.records[0];
    assert_eq!(record.days_to_zero, 999);
    assert!(!record.is_urgent);
    assert_eq!(record.quantity_to_reorder, Decimal::ZERO);
    assert_eq!(record.activity_tier, ActivityTier::Low);
    assert_eq!(plan.summaries[0].status, SkuStatus::Normal);
}

#[rstest]
#[case(300, 50, 5, 400)]
#[case(0, 0, 999, 0)]
#[case(30, 100, 100, 0)]
#[case(31, 0, 0, 47)]
#[case(7, 3, 12, 8)]
fn test_depletion_and_reorder(
    #[case] sold: i64,
    #[case] stock: i64,
    #[case] days_to_zero: i64,
    #[case] reorder: i64,
) {
    let engine = ReplenishmentEngine::default();
    let plan = engine.run(
        &[item("W1", "A", "M", sold, stock)],
        &directory(&[("W1", 7)]),
        today(),
    );

    let record = &plan.records[0];
    assert_eq!(record.days_to_zero, days_to_zero);
    assert_eq!(record.quantity_to_reorder, Decimal::from(reorder));
}

#[test]
fn test_short_lead_time_shipment() {
    // 場景：交期 3 天的倉庫，出貨日 = 今天 + 15
    let engine = ReplenishmentEngine::default();
    let plan = engine.run(
        &[item("W3", "A", "M", 30, 100)],
        &directory(&[("W3", 3)]),
        today(),
    );

    let shipment = plan.shipment_for("W3").unwrap();
    assert_eq!(shipment.shipment_date, days(15));
    assert_eq!(shipment.days_to_ship, 15);
    assert_eq!(shipment.status, ShipmentStatus::Normal);
    assert_eq!(shipment.total_sku_count, 1);
    assert!(!shipment.has_urgent_skus());
}

#[test]
fn test_cross_warehouse_summary() {
    // 場景：同一商品分布在兩個倉庫
    let engine = ReplenishmentEngine::default();
    let plan = engine.run(
        &[
            item("W1", "A", "M", 100, 400),
            item("W2", "A", "M", 200, 400),
        ],
        &directory(&[("W1", 7), ("W2", 7)]),
        today(),
    );

    assert_eq!(plan.summaries.len(), 1);
    let summary = &plan.summaries[0];
    assert_eq!(summary.total_units_sold, Decimal::from(300));
    assert_eq!(summary.total_units_in_stock, Decimal::from(800));
    assert_eq!(summary.combined_sales_per_day, Decimal::from(10));
    assert_eq!(summary.combined_needed_for_coverage, Decimal::from(450));
    assert_eq!(summary.warehouse_count, 2);
    // W2: 400 / (200/30) = 60 天
    assert_eq!(summary.min_days_to_zero, 60);
    assert_eq!(
        summary.earliest_production_start,
        ProductionStart::Scheduled(days(53))
    );
    assert_eq!(summary.status, SkuStatus::Normal);
}

#[test]
fn test_unknown_warehouse_uses_default_lead_time() {
    let engine = ReplenishmentEngine::new(ReplenishmentConfig::new().with_default_lead_time(10));
    let plan = engine.run(&[item("Тула", "A", "M", 30, 100)], &WarehouseDirectory::new(), today());

    assert_eq!(plan.records[0].lead_time_days, 10);
    assert_eq!(plan.shipments[0].shipment_date, days(22));
    // 目錄中沒有倉庫
    assert_eq!(plan.stats.total_warehouses, 0);
}

#[test]
fn test_shipment_ordering() {
    // 緊急倉庫在前，其餘按出貨日
    let config = ReplenishmentConfig::new()
        .with_shipment_date_basis(ShipmentDateBasis::EarliestProductionStart);
    let engine = ReplenishmentEngine::new(config);
    let plan = engine.run(
        &[
            item("Far", "A", "M", 30, 300),
            item("Near", "A", "M", 30, 30),
            item("Hot", "B", "S", 300, 10),
        ],
        &directory(&[("Far", 7), ("Near", 7), ("Hot", 7)]),
        today(),
    );

    let order: Vec<_> = plan.shipments.iter().map(|s| s.warehouse.as_str()).collect();
    assert_eq!(order, vec!["Hot", "Near", "Far"]);

    let hot = plan.shipment_for("Hot").unwrap();
    assert_eq!(hot.status, ShipmentStatus::Urgent);
    assert_eq!(hot.shipment_date, today());
    assert_eq!(hot.days_to_ship, 0);

    // Near: 售罄 30 天，生產開始 +23，出貨 +35
    let near = plan.shipment_for("Near").unwrap();
    assert_eq!(near.shipment_date, days(35));
    assert_eq!(near.status, ShipmentStatus::Normal);
}

#[test]
fn test_report_to_plan() {
    let report = "\
Отчет по складам,,,,,,
Склад,Артикул продавца,Размер,Наименование,Бренд,Продано,Остаток
Коледино,ART-1,M,Футболка,Acme,300,50
Казань,ART-1,M,Футболка,Acme,150,200
Коледино,ART-2,L,Платье,Zeta,15,60
Казань,ART-3,S,Куртка,North,0,12
";

    let mut workspace = Workspace::default();
    workspace
        .load_reference_table("warehouse,lead_time_days\nКоледино,7\nКазань,3\n".as_bytes())
        .unwrap();
    let summary = workspace
        .ingest(report.as_bytes(), &ReportLayout::default())
        .unwrap();
    assert_eq!(summary.records, 4);
    assert_eq!(summary.new_warehouses, 2);

    let plan = workspace.recompute(today());
    assert_eq!(plan.stats.total_records, 4);
    assert_eq!(plan.stats.total_warehouses, 2);
    assert_eq!(plan.stats.urgent_records, 1);

    // Казань 交期短，排在前面
    let order: Vec<_> = plan.shipments.iter().map(|s| s.warehouse.as_str()).collect();
    assert_eq!(order, vec!["Казань", "Коледино"]);

    let shirts = plan.query_summaries(&SummaryQuery::new().with_search("футболка"));
    assert_eq!(shirts.len(), 1);
    assert_eq!(shirts[0].total_units_sold, Decimal::from(450));
    assert_eq!(shirts[0].status, SkuStatus::Critical);

    let by_stock = plan.query_summaries(&SummaryQuery::new().with_sort(SummarySort::StockAscending));
    let articles: Vec<_> = by_stock.iter().map(|s| s.seller_article.as_str()).collect();
    assert_eq!(articles, vec!["ART-3", "ART-2", "ART-1"]);

    let kazan = plan.query_records(&RecordQuery::new().with_warehouse("Казань"));
    assert_eq!(kazan.len(), 2);

    let urgent_first = plan.query_records(
        &RecordQuery::new().with_sort(RecordSortKey::DaysToZero, SortDirection::Ascending),
    );
    assert_eq!(urgent_first[0].item.seller_article, "ART-1");
    assert_eq!(
        RowHighlight::of(urgent_first[0], workspace.config()),
        RowHighlight::Urgent
    );

    assert_eq!(
        distinct_articles(&plan.records),
        vec!["ART-1", "ART-2", "ART-3"]
    );
}

#[test]
fn test_lead_time_edit_flow() {
    let mut workspace = Workspace::default();
    workspace
        .ingest(
            "title\nСклад,Артикул продавца,Продано,Остаток\nW1,A,30,20\n".as_bytes(),
            &ReportLayout::default(),
        )
        .unwrap();

    // 1/天，20 天售罄，預設交期 7 天 → 生產開始 +13
    let before = workspace.recompute(today());
    assert!(!before.records[0].is_urgent);

    let change = workspace.edit_lead_time("W1", 45).unwrap();
    assert!(change.needs_confirmation);
    assert!(workspace.needs_recompute());

    let after = workspace.recompute(today());
    assert!(after.records[0].is_urgent);
    assert_eq!(after.shipments[0].shipment_date, days(57));
    assert_eq!(
        after.records[0].quantity_to_reorder,
        before.records[0].quantity_to_reorder
    );
}
