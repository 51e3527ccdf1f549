//! # Restock Calculation Engine
//!
//! 補貨計算引擎：逐筆計算、倉庫出貨排程、跨倉商品彙總

pub mod calculator;
pub mod engine;
pub mod filter;
pub mod lead_time;
pub mod shipment;
pub mod stats;
pub mod summary;

// Re-export 主要類型
pub use calculator::ReplenishmentCalculator;
pub use engine::ReplenishmentEngine;
pub use filter::{RecordQuery, RecordSortKey, RowHighlight, SortDirection};
pub use lead_time::{LeadTimeCalculator, ScheduledWarehouse};
pub use shipment::{ShipmentAggregator, ShipmentStatus, WarehouseShipment};
pub use stats::DashboardStats;
pub use summary::{SkuStatus, SkuSummary, SummaryAggregator, SummaryQuery, SummarySort};

use chrono::NaiveDate;
use restock_core::DerivedRecord;

/// 一次完整計算的結果
#[derive(Debug, Clone)]
pub struct ReplenishmentPlan {
    /// 計算基準日
    pub today: NaiveDate,

    /// 明細計算結果（與輸入順序一致）
    pub records: Vec<DerivedRecord>,

    /// 倉庫出貨排程（已排序）
    pub shipments: Vec<WarehouseShipment>,

    /// 跨倉商品彙總（首次出現順序）
    pub summaries: Vec<SkuSummary>,

    /// 總覽統計
    pub stats: DashboardStats,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ReplenishmentPlan {
    /// 創建空的計算結果
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            today,
            records: Vec::new(),
            shipments: Vec::new(),
            summaries: Vec::new(),
            stats: DashboardStats::default(),
            calculation_time_ms: None,
        }
    }

    /// 緊急記錄
    pub fn urgent_records(&self) -> impl Iterator<Item = &DerivedRecord> {
        self.records.iter().filter(|r| r.is_urgent)
    }

    /// 查詢倉庫出貨排程
    pub fn shipment_for(&self, warehouse: &str) -> Option<&WarehouseShipment> {
        self.shipments.iter().find(|s| s.warehouse == warehouse)
    }

    /// 套用查詢條件的商品彙總
    pub fn query_summaries(&self, query: &SummaryQuery) -> Vec<SkuSummary> {
        query.apply(self.summaries.clone())
    }

    /// 套用查詢條件的明細
    pub fn query_records(&self, query: &RecordQuery) -> Vec<&DerivedRecord> {
        query.apply(&self.records)
    }
}
