//! 工作區快照持久化
//!
//! 以 JSON 保存配置、倉庫目錄、庫存快照與參考交期，重新開啟時還原。

use restock_core::{ReferenceLeadTimes, ReplenishmentConfig, StockRecord, WarehouseDirectory};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// 可持久化的工作區狀態
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub config: ReplenishmentConfig,
    pub warehouses: WarehouseDirectory,
    pub stock_records: Vec<StockRecord>,
    pub reference_lead_times: ReferenceLeadTimes,
}

/// 快照檔案
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 讀取快照，檔案不存在時回傳空快照
    pub fn load(&self) -> Result<Snapshot> {
        if !self.path.exists() {
            tracing::debug!("快照檔案不存在，使用空工作區: {}", self.path.display());
            return Ok(Snapshot::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        tracing::info!(
            "載入快照：倉庫 {} 個，庫存快照 {} 筆",
            snapshot.warehouses.len(),
            snapshot.stock_records.len()
        );
        Ok(snapshot)
    }

    /// 寫入快照（先寫暫存檔再改名）
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(snapshot)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!("快照已保存: {}", self.path.display());
        Ok(())
    }
}
