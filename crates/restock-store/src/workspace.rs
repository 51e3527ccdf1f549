//! 工作區
//!
//! 持有一份快照與髒標記追蹤器。匯入報表、修改交期或調整參數後，
//! `recompute` 以完整計算產生新的補貨計畫。

use chrono::NaiveDate;
use restock_calc::{LeadTimeCalculator, ReplenishmentEngine, ReplenishmentPlan, ScheduledWarehouse};
use restock_core::{
    LeadTimeChange, LeadTimeSource, ReferenceLeadTimes, ReplenishmentConfig, StockRecord,
    WarehouseDirectory,
};
use std::io::Read;
use std::path::Path;

use crate::dirty_tracking::DirtyTracker;
use crate::ingest::{self, IngestReport, ReportLayout};
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::Result;

/// 匯入摘要
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub records: usize,
    pub skipped_rows: usize,
    pub new_warehouses: usize,
}

/// 補貨工作區
#[derive(Debug, Clone)]
pub struct Workspace {
    snapshot: Snapshot,
    engine: ReplenishmentEngine,
    tracker: DirtyTracker,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

impl Workspace {
    /// 由快照建立工作區，首次計算前視為全部待計算
    pub fn new(snapshot: Snapshot) -> Self {
        let engine = ReplenishmentEngine::new(snapshot.config.clone());
        let mut tracker = DirtyTracker::new();
        tracker.mark_all();

        Self {
            snapshot,
            engine,
            tracker,
        }
    }

    /// 從快照檔案開啟
    pub fn open(store: &SnapshotStore) -> Result<Self> {
        Ok(Self::new(store.load()?))
    }

    /// 保存到快照檔案
    pub fn save(&self, store: &SnapshotStore) -> Result<()> {
        store.save(&self.snapshot)
    }

    pub fn config(&self) -> &ReplenishmentConfig {
        &self.snapshot.config
    }

    pub fn directory(&self) -> &WarehouseDirectory {
        &self.snapshot.warehouses
    }

    pub fn stock_records(&self) -> &[StockRecord] {
        &self.snapshot.stock_records
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// 匯入銷售報表，取代現有庫存快照
    pub fn ingest<R: Read>(&mut self, reader: R, layout: &ReportLayout) -> Result<IngestSummary> {
        let report = ingest::parse_report(reader, layout)?;
        Ok(self.replace_stock(report))
    }

    /// 匯入 Excel 銷售報表，取代現有庫存快照
    pub fn ingest_workbook(
        &mut self,
        path: impl AsRef<Path>,
        layout: &ReportLayout,
    ) -> Result<IngestSummary> {
        let report = ingest::parse_workbook(path, layout)?;
        Ok(self.replace_stock(report))
    }

    /// 以解析好的報表取代庫存快照；既有倉庫與交期保留
    pub fn replace_stock(&mut self, report: IngestReport) -> IngestSummary {
        let new_warehouses = report.register_warehouses(
            &mut self.snapshot.warehouses,
            &self.snapshot.reference_lead_times,
            self.snapshot.config.default_lead_time_days,
        );

        let summary = IngestSummary {
            records: report.records.len(),
            skipped_rows: report.skipped_rows,
            new_warehouses,
        };
        self.snapshot.stock_records = report.records;
        self.tracker.mark_all();

        tracing::info!(
            "庫存快照已更新：{} 筆，新倉庫 {} 個",
            summary.records,
            summary.new_warehouses
        );
        summary
    }

    /// 載入參考交期表，未手動修改過的倉庫改用新參考值
    pub fn set_reference_lead_times(&mut self, reference: ReferenceLeadTimes) -> Result<()> {
        let default_days = self.snapshot.config.default_lead_time_days;
        let untouched: Vec<String> = self
            .snapshot
            .warehouses
            .iter()
            .filter(|w| w.source != LeadTimeSource::Edited)
            .map(|w| w.name.clone())
            .collect();

        for name in untouched {
            self.snapshot
                .warehouses
                .reset_to_reference(&name, &reference, default_days)?;
        }

        self.snapshot.reference_lead_times = reference;
        self.tracker.mark_all();
        Ok(())
    }

    /// 從 CSV 載入參考交期表
    pub fn load_reference_table<R: Read>(&mut self, reader: R) -> Result<()> {
        let reference = ingest::parse_reference_table(reader)?;
        tracing::info!("載入參考交期 {} 筆", reference.len());
        self.set_reference_lead_times(reference)
    }

    /// 修改倉庫交期
    pub fn edit_lead_time(&mut self, warehouse: &str, days: i64) -> Result<LeadTimeChange> {
        let change =
            self.snapshot
                .warehouses
                .edit_lead_time(warehouse, days, &self.snapshot.config)?;
        if change.is_changed() {
            self.tracker.mark_dirty(change.warehouse.clone());
        }
        Ok(change)
    }

    /// 恢復倉庫參考交期
    pub fn reset_lead_time(&mut self, warehouse: &str) -> Result<LeadTimeChange> {
        let change = self.snapshot.warehouses.reset_to_reference(
            warehouse,
            &self.snapshot.reference_lead_times,
            self.snapshot.config.default_lead_time_days,
        )?;
        if change.is_changed() {
            self.tracker.mark_dirty(change.warehouse.clone());
        }
        Ok(change)
    }

    /// 替換計算參數
    pub fn set_config(&mut self, config: ReplenishmentConfig) {
        self.engine = ReplenishmentEngine::new(config.clone());
        self.snapshot.config = config;
        self.tracker.mark_all();
    }

    /// 是否有尚未反映到計畫中的變更
    pub fn needs_recompute(&self) -> bool {
        self.tracker.has_changes()
    }

    /// 自上次計算後交期被修改的倉庫
    pub fn dirty_warehouses(&self) -> Vec<String> {
        self.tracker.get_dirty_warehouses()
    }

    /// 完整重新計算並清除髒標記
    pub fn recompute(&mut self, today: NaiveDate) -> ReplenishmentPlan {
        let dirty = self.tracker.get_dirty_warehouses();
        if !dirty.is_empty() {
            tracing::debug!("交期變更的倉庫: {:?}", dirty);
        }

        let plan = self
            .engine
            .run(&self.snapshot.stock_records, &self.snapshot.warehouses, today);
        self.tracker.clear();
        plan
    }

    /// 倉庫目錄檢視（按名稱排序，附預計出貨日）
    pub fn warehouse_schedule(&self, today: NaiveDate) -> Vec<ScheduledWarehouse> {
        LeadTimeCalculator::warehouse_schedule(
            &self.snapshot.warehouses,
            today,
            &self.snapshot.config,
        )
    }
}
