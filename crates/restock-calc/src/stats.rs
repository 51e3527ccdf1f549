//! 總覽統計

use restock_core::{DerivedRecord, WarehouseDirectory};
use serde::{Deserialize, Serialize};

/// 總覽統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// 明細記錄數
    pub total_records: usize,

    /// 倉庫數
    pub total_warehouses: usize,

    /// 緊急記錄數
    pub urgent_records: usize,
}

impl DashboardStats {
    pub fn collect(records: &[DerivedRecord], directory: &WarehouseDirectory) -> Self {
        Self {
            total_records: records.len(),
            total_warehouses: directory.len(),
            urgent_records: records.iter().filter(|r| r.is_urgent).count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}
