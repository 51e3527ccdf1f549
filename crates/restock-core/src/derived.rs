//! 補貨計算結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::StockRecord;

/// 銷售活躍度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityTier {
    Low,
    Medium,
    High,
}

/// 生產開始時點：已逾期（緊急）或具體日期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionStart {
    /// 生產開始日已過，必須立即生產
    Urgent,
    /// 最晚生產開始日
    Scheduled(NaiveDate),
}

impl ProductionStart {
    /// 合併兩個時點：任一緊急即緊急，否則取較早日期
    pub fn earliest(self, other: ProductionStart) -> ProductionStart {
        match (self, other) {
            (ProductionStart::Scheduled(a), ProductionStart::Scheduled(b)) => {
                ProductionStart::Scheduled(a.min(b))
            }
            _ => ProductionStart::Urgent,
        }
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, ProductionStart::Urgent)
    }

    /// 具體日期（緊急時為 None）
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ProductionStart::Urgent => None,
            ProductionStart::Scheduled(date) => Some(*date),
        }
    }
}

/// 單一倉庫 × 商品的補貨計算結果
///
/// 每次計算重新產生，不獨立持久化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    /// 原始快照
    pub item: StockRecord,

    /// 使用的交期（天）
    pub lead_time_days: u32,

    /// 日銷量
    pub sales_per_day: Decimal,

    /// 覆蓋期所需數量（向上取整）
    pub needed_for_coverage: Decimal,

    /// 售罄剩餘天數（向下取整，無銷量時為哨兵值）
    pub days_to_zero: i64,

    /// 預計售罄日
    pub risk_date: NaiveDate,

    /// 最晚生產開始日
    pub production_start_date: NaiveDate,

    /// 生產開始日已到或已過
    pub is_urgent: bool,

    /// 建議補貨數量
    pub quantity_to_reorder: Decimal,

    /// 銷售活躍度
    pub activity_tier: ActivityTier,
}

impl DerivedRecord {
    /// 生產開始時點
    pub fn production_start(&self) -> ProductionStart {
        if self.is_urgent {
            ProductionStart::Urgent
        } else {
            ProductionStart::Scheduled(self.production_start_date)
        }
    }

    pub fn warehouse(&self) -> &str {
        &self.item.warehouse
    }

    /// 跨倉彙總用的商品鍵（貨號, 尺碼）
    pub fn sku_key(&self) -> (&str, &str) {
        self.item.sku_key()
    }

    /// 是否需要補貨
    pub fn needs_reorder(&self) -> bool {
        self.quantity_to_reorder > Decimal::ZERO
    }
}
