//! 每週補貨排程範例
//!
//! 匯入銷售報表、載入參考交期、調整單一倉庫交期，輸出出貨排程與商品總覽。
//! 以 `RUST_LOG=debug` 執行可看到各計算步驟。

use restock::{
    RecordQuery, RecordSortKey, ReportLayout, RowHighlight, SnapshotStore, SortDirection,
    SummaryQuery, SummarySort, Workspace,
};
use tracing_subscriber::EnvFilter;

const REPORT: &str = "\
Отчет о продажах по складам за 30 дней,,,,,,,
Склад,Артикул WB,Артикул продавца,Размер,Наименование,Бренд,Продано шт.,Текущий остаток
Коледино,1001,TS-BLK,M,Футболка базовая,Acme,420,60
Коледино,1001,TS-BLK,L,Футболка базовая,Acme,150,210
Казань,1001,TS-BLK,M,Футболка базовая,Acme,180,35
Казань,2002,DR-RED,S,Платье летнее,Zeta,45,90
Электросталь,2002,DR-RED,S,Платье летнее,Zeta,12,140
Электросталь,3003,JK-GRN,XL,Куртка,North,0,25
";

const REFERENCE: &str = "\
warehouse,lead_time_days
Коледино,7
Казань,5
Электросталь,10
";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("📦 ===== 每週補貨排程 =====");
    println!();

    let dir = tempfile::tempdir()?;
    let store = SnapshotStore::new(dir.path().join("workspace.json"));
    let mut workspace = Workspace::open(&store)?;

    println!("📋 步驟 1: 載入參考交期與銷售報表");
    workspace.load_reference_table(REFERENCE.as_bytes())?;
    let summary = workspace.ingest(REPORT.as_bytes(), &ReportLayout::default())?;
    println!(
        "   ✓ {} 筆快照，新倉庫 {} 個，略過 {} 列",
        summary.records, summary.new_warehouses, summary.skipped_rows
    );
    println!();

    println!("✏️  步驟 2: 調整倉庫交期");
    let change = workspace.edit_lead_time("Казань", 9)?;
    println!(
        "   ✓ {}: {} → {} 天",
        change.warehouse, change.previous_days, change.new_days
    );
    println!("   待重新計算的倉庫: {:?}", workspace.dirty_warehouses());
    println!();

    println!("🚀 步驟 3: 執行補貨計算");
    let today = chrono::Local::now().date_naive();
    let plan = workspace.recompute(today);
    println!(
        "   ✓ 商品 {}，倉庫 {}，緊急 {}",
        plan.stats.total_records, plan.stats.total_warehouses, plan.stats.urgent_records
    );
    println!();

    println!("🏬 倉庫目錄");
    for warehouse in workspace.warehouse_schedule(today) {
        println!(
            "   {:<14} 交期 {:>2} 天 ({:?})  預計出貨 {}",
            warehouse.name, warehouse.lead_time_days, warehouse.source, warehouse.shipment_date
        );
    }
    println!();

    println!("🚚 出貨排程");
    for shipment in &plan.shipments {
        println!(
            "   {:<14} {} ({} 天)  {:?}  緊急商品 {}/{}",
            shipment.warehouse,
            shipment.shipment_date,
            shipment.days_to_ship,
            shipment.status,
            shipment.urgent_sku_count,
            shipment.total_sku_count
        );
    }
    println!();

    println!("📊 商品總覽（按緊急程度）");
    let query = SummaryQuery::new().with_sort(SummarySort::Urgency);
    for sku in plan.query_summaries(&query) {
        println!(
            "   {:<8} {:<3} 銷量 {:>4} 庫存 {:>4} 日銷 {:.2} 售罄 {:>3} 天  {:?}",
            sku.seller_article,
            sku.size,
            sku.total_units_sold,
            sku.total_units_in_stock,
            sku.combined_sales_per_day,
            sku.min_days_to_zero,
            sku.status
        );
    }
    println!();

    println!("📝 補貨明細（按售罄天數）");
    let query = RecordQuery::new().with_sort(RecordSortKey::DaysToZero, SortDirection::Ascending);
    for record in plan.query_records(&query) {
        let marker = match RowHighlight::of(record, workspace.config()) {
            RowHighlight::Urgent => "🔴",
            RowHighlight::Warning => "🟡",
            RowHighlight::Plain => "  ",
        };
        println!(
            "   {} {:<14} {:<8} {:<3} 生產開始 {}  補貨 {}",
            marker,
            record.item.warehouse,
            record.item.seller_article,
            record.item.size,
            record.production_start_date,
            record.quantity_to_reorder
        );
    }

    workspace.save(&store)?;
    println!();
    println!("💾 快照已保存: {}", store.path().display());

    Ok(())
}
