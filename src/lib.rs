//! # Restock
//!
//! 倉庫補貨排程：由各倉銷售與庫存快照推算售罄日、生產開始日與緊急狀態，
//! 並彙總為倉庫出貨排程與跨倉商品總覽。
//!
//! ```no_run
//! use restock::{ReplenishmentEngine, ReportLayout, Workspace};
//!
//! let mut workspace = Workspace::default();
//! let report = std::fs::File::open("report.csv")?;
//! workspace.ingest(report, &ReportLayout::default())?;
//!
//! let plan = workspace.recompute(chrono::Local::now().date_naive());
//! for shipment in &plan.shipments {
//!     println!("{} {}", shipment.warehouse, shipment.shipment_date);
//! }
//! # let _ = ReplenishmentEngine::default();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use restock_calc::{
    filter::distinct_articles, DashboardStats, LeadTimeCalculator, RecordQuery, RecordSortKey,
    ReplenishmentCalculator, ReplenishmentEngine, ReplenishmentPlan, RowHighlight,
    ScheduledWarehouse, ShipmentAggregator, ShipmentStatus, SkuStatus, SkuSummary,
    SortDirection, SummaryAggregator, SummaryQuery, SummarySort, WarehouseShipment,
};
pub use restock_core::{
    calendar, ActivityTier, DerivedRecord, LeadTimeChange, LeadTimeSource, ProductionStart,
    ReferenceLeadTimes, ReplenishmentConfig, RestockError, ShipmentDateBasis, StockRecord,
    WarehouseDirectory, WarehouseRecord,
};
pub use restock_store::{
    parse_reference_table, parse_report, parse_workbook, DirtyTracker, IngestReport,
    IngestSummary, ReportLayout, Snapshot, SnapshotStore, StoreError, Workspace,
};
