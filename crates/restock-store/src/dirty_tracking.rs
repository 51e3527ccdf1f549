//! 髒標記追蹤
//!
//! 記錄自上次計算以來交期被修改的倉庫。只用來判斷是否需要重新計算，
//! 重新計算一律是完整計算。

use std::collections::HashSet;

/// 髒標記追蹤器
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty_warehouses: HashSet<String>,
    all_dirty: bool,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記倉庫為髒
    pub fn mark_dirty(&mut self, warehouse: String) {
        self.dirty_warehouses.insert(warehouse);
    }

    /// 標記全部資料為髒（例如重新匯入報表）
    pub fn mark_all(&mut self) {
        self.all_dirty = true;
    }

    /// 檢查倉庫是否為髒
    pub fn is_dirty(&self, warehouse: &str) -> bool {
        self.all_dirty || self.dirty_warehouses.contains(warehouse)
    }

    /// 是否有任何待重新計算的變更
    pub fn has_changes(&self) -> bool {
        self.all_dirty || !self.dirty_warehouses.is_empty()
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_warehouses.clear();
        self.all_dirty = false;
    }

    /// 獲取所有髒倉庫（排序）
    pub fn get_dirty_warehouses(&self) -> Vec<String> {
        let mut warehouses: Vec<String> = self.dirty_warehouses.iter().cloned().collect();
        warehouses.sort();
        warehouses
    }
}
