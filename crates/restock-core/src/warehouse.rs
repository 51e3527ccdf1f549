//! 倉庫與交期目錄

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::{ReplenishmentConfig, RestockError};

/// 交期來源（僅供顯示，不參與計算）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTimeSource {
    /// 來自參考交期表
    FromFile,
    /// 使用者手動修改
    Edited,
    /// 預設值
    Default,
}

/// 倉庫
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseRecord {
    /// 倉庫名稱（唯一鍵）
    pub name: String,

    /// 交期（天）
    pub lead_time_days: u32,

    /// 交期來源
    pub source: LeadTimeSource,
}

impl WarehouseRecord {
    /// 創建新的倉庫
    pub fn new(name: String, lead_time_days: u32, source: LeadTimeSource) -> Self {
        Self {
            name,
            lead_time_days,
            source,
        }
    }
}

/// 參考交期表（唯讀，按倉庫名稱排序）
///
/// 只在建立新倉庫與「恢復參考值」時查詢，日常計算不會讀取。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceLeadTimes {
    entries: BTreeMap<String, u32>,
}

impl ReferenceLeadTimes {
    /// 創建參考交期表
    pub fn new(entries: BTreeMap<String, u32>) -> Self {
        Self { entries }
    }

    /// 查詢參考交期
    pub fn get(&self, warehouse: &str) -> Option<u32> {
        self.entries.get(warehouse).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, u32)> for ReferenceLeadTimes {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// 交期修改結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadTimeChange {
    pub warehouse: String,
    pub previous_days: u32,
    pub new_days: u32,
    /// 交期超過確認閾值，呼叫端應提示使用者確認
    pub needs_confirmation: bool,
}

impl LeadTimeChange {
    /// 交期是否真的改變
    pub fn is_changed(&self) -> bool {
        self.previous_days != self.new_days
    }
}

/// 倉庫目錄（倉庫名稱 → 交期），保持建立順序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<WarehouseRecord>", into = "Vec<WarehouseRecord>")]
pub struct WarehouseDirectory {
    warehouses: Vec<WarehouseRecord>,
    index: HashMap<String, usize>,
}

impl WarehouseDirectory {
    /// 創建空目錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 查詢交期
    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.get(name).map(|w| w.lead_time_days)
    }

    /// 查詢交期，未知倉庫使用預設值
    pub fn lead_time_or(&self, name: &str, default_days: u32) -> u32 {
        self.lookup(name).unwrap_or(default_days)
    }

    /// 獲取倉庫
    pub fn get(&self, name: &str) -> Option<&WarehouseRecord> {
        self.index.get(name).map(|&i| &self.warehouses[i])
    }

    /// 新增或覆蓋倉庫
    pub fn insert(&mut self, record: WarehouseRecord) {
        match self.index.get(&record.name) {
            Some(&i) => self.warehouses[i] = record,
            None => {
                self.index.insert(record.name.clone(), self.warehouses.len());
                self.warehouses.push(record);
            }
        }
    }

    /// 首次遇到倉庫時登記：優先使用參考交期，否則使用預設值
    ///
    /// 已存在的倉庫保持不變。回傳是否為新倉庫。
    pub fn register(
        &mut self,
        name: &str,
        reference: &ReferenceLeadTimes,
        default_days: u32,
    ) -> bool {
        if self.index.contains_key(name) {
            return false;
        }

        let record = match reference.get(name) {
            Some(days) => WarehouseRecord::new(name.to_string(), days, LeadTimeSource::FromFile),
            None => WarehouseRecord::new(name.to_string(), default_days, LeadTimeSource::Default),
        };
        self.insert(record);
        true
    }

    /// 修改倉庫交期
    ///
    /// 負數交期與未知倉庫會被拒絕；超過確認閾值的交期會被接受並標記。
    pub fn edit_lead_time(
        &mut self,
        name: &str,
        days: i64,
        config: &ReplenishmentConfig,
    ) -> crate::Result<LeadTimeChange> {
        let new_days = u32::try_from(days).map_err(|_| RestockError::InvalidLeadTime {
            warehouse: name.to_string(),
            days,
        })?;

        let &i = self
            .index
            .get(name)
            .ok_or_else(|| RestockError::UnknownWarehouse(name.to_string()))?;

        let warehouse = &mut self.warehouses[i];
        let previous_days = warehouse.lead_time_days;
        warehouse.lead_time_days = new_days;
        warehouse.source = LeadTimeSource::Edited;

        let needs_confirmation = config.lead_time_needs_confirmation(new_days);
        if needs_confirmation {
            tracing::warn!("倉庫 {} 交期 {} 天超過確認閾值", name, new_days);
        }
        tracing::info!("倉庫 {} 交期更新: {} → {}", name, previous_days, new_days);

        Ok(LeadTimeChange {
            warehouse: name.to_string(),
            previous_days,
            new_days,
            needs_confirmation,
        })
    }

    /// 恢復參考交期（無參考值時恢復預設值）
    pub fn reset_to_reference(
        &mut self,
        name: &str,
        reference: &ReferenceLeadTimes,
        default_days: u32,
    ) -> crate::Result<LeadTimeChange> {
        let &i = self
            .index
            .get(name)
            .ok_or_else(|| RestockError::UnknownWarehouse(name.to_string()))?;

        let (new_days, source) = match reference.get(name) {
            Some(days) => (days, LeadTimeSource::FromFile),
            None => (default_days, LeadTimeSource::Default),
        };

        let warehouse = &mut self.warehouses[i];
        let previous_days = warehouse.lead_time_days;
        warehouse.lead_time_days = new_days;
        warehouse.source = source;

        Ok(LeadTimeChange {
            warehouse: name.to_string(),
            previous_days,
            new_days,
            needs_confirmation: false,
        })
    }

    /// 依建立順序遍歷
    pub fn iter(&self) -> impl Iterator<Item = &WarehouseRecord> {
        self.warehouses.iter()
    }

    /// 依名稱排序（目錄顯示用）
    pub fn sorted_by_name(&self) -> Vec<&WarehouseRecord> {
        let mut sorted: Vec<_> = self.warehouses.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    pub fn len(&self) -> usize {
        self.warehouses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warehouses.is_empty()
    }
}

impl From<Vec<WarehouseRecord>> for WarehouseDirectory {
    fn from(records: Vec<WarehouseRecord>) -> Self {
        let mut directory = Self::new();
        for record in records {
            directory.insert(record);
        }
        directory
    }
}

impl From<WarehouseDirectory> for Vec<WarehouseRecord> {
    fn from(directory: WarehouseDirectory) -> Self {
        directory.warehouses
    }
}

impl FromIterator<WarehouseRecord> for WarehouseDirectory {
    fn from_iter<I: IntoIterator<Item = WarehouseRecord>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> WarehouseDirectory {
        [
            WarehouseRecord::new("Подольск".to_string(), 5, LeadTimeSource::FromFile),
            WarehouseRecord::new("Казань".to_string(), 7, LeadTimeSource::Default),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup_and_fallback() {
        let directory = directory();

        assert_eq!(directory.lookup("Подольск"), Some(5));
        assert_eq!(directory.lookup("Тула"), None);
        assert_eq!(directory.lead_time_or("Тула", 7), 7);
    }

    #[test]
    fn test_register_prefers_reference() {
        let reference: ReferenceLeadTimes = [("Тула".to_string(), 4)].into_iter().collect();
        let mut directory = WarehouseDirectory::new();

        assert!(directory.register("Тула", &reference, 7));
        assert!(directory.register("Екатеринбург", &reference, 7));
        assert!(!directory.register("Тула", &reference, 7));

        let tula = directory.get("Тула").unwrap();
        assert_eq!(tula.lead_time_days, 4);
        assert_eq!(tula.source, LeadTimeSource::FromFile);

        let ekb = directory.get("Екатеринбург").unwrap();
        assert_eq!(ekb.lead_time_days, 7);
        assert_eq!(ekb.source, LeadTimeSource::Default);
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_edit_lead_time() {
        let mut directory = directory();
        let config = ReplenishmentConfig::default();

        let change = directory.edit_lead_time("Казань", 10, &config).unwrap();

        assert_eq!(change.previous_days, 7);
        assert_eq!(change.new_days, 10);
        assert!(change.is_changed());
        assert!(!change.needs_confirmation);
        assert_eq!(directory.get("Казань").unwrap().source, LeadTimeSource::Edited);
    }

    #[test]
    fn test_edit_lead_time_rejects_negative() {
        let mut directory = directory();
        let config = ReplenishmentConfig::default();

        let result = directory.edit_lead_time("Казань", -1, &config);

        assert!(matches!(result, Err(RestockError::InvalidLeadTime { days: -1, .. })));
        assert_eq!(directory.lookup("Казань"), Some(7));
    }

    #[test]
    fn test_edit_lead_time_unknown_warehouse() {
        let mut directory = directory();
        let config = ReplenishmentConfig::default();

        let result = directory.edit_lead_time("Тула", 3, &config);

        assert!(matches!(result, Err(RestockError::UnknownWarehouse(_))));
    }

    #[test]
    fn test_long_lead_time_needs_confirmation() {
        let mut directory = directory();
        let config = ReplenishmentConfig::default();

        let change = directory.edit_lead_time("Подольск", 45, &config).unwrap();

        assert!(change.needs_confirmation);
        assert_eq!(directory.lookup("Подольск"), Some(45));
    }

    #[test]
    fn test_reset_to_reference() {
        let reference: ReferenceLeadTimes = [("Подольск".to_string(), 5)].into_iter().collect();
        let mut directory = directory();
        let config = ReplenishmentConfig::default();
        directory.edit_lead_time("Подольск", 20, &config).unwrap();
        directory.edit_lead_time("Казань", 20, &config).unwrap();

        let change = directory.reset_to_reference("Подольск", &reference, 7).unwrap();
        assert_eq!(change.previous_days, 20);
        assert_eq!(change.new_days, 5);
        assert_eq!(directory.get("Подольск").unwrap().source, LeadTimeSource::FromFile);

        directory.reset_to_reference("Казань", &reference, 7).unwrap();
        assert_eq!(directory.get("Казань").unwrap().source, LeadTimeSource::Default);
        assert_eq!(directory.lookup("Казань"), Some(7));
    }

    #[test]
    fn test_sorted_by_name_keeps_insertion_order_intact() {
        let directory = directory();

        let sorted: Vec<_> = directory.sorted_by_name().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(sorted, vec!["Казань", "Подольск"]);

        let inserted: Vec<_> = directory.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(inserted, vec!["Подольск", "Казань"]);
    }

    #[test]
    fn test_directory_serde_rebuilds_index() {
        let directory = directory();

        let json = serde_json::to_string(&directory).unwrap();
        let restored: WarehouseDirectory = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.lookup("Казань"), Some(7));
        assert_eq!(restored, directory);
    }

    #[test]
    fn test_reference_lead_times_serialize_sorted() {
        let reference: ReferenceLeadTimes = [
            ("Тула".to_string(), 3),
            ("Казань".to_string(), 9),
            ("Подольск".to_string(), 5),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&reference).unwrap();

        assert_eq!(json, r#"{"Казань":9,"Подольск":5,"Тула":3}"#);
    }
}
