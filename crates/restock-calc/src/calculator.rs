//! 單一倉庫 × 商品的補貨計算

use chrono::NaiveDate;
use restock_core::calendar;
use restock_core::{
    ActivityTier, DerivedRecord, ReplenishmentConfig, StockRecord, WarehouseDirectory,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::lead_time::LeadTimeCalculator;

/// 補貨計算器
///
/// 純函數：同樣的快照、交期與 `today` 永遠得到同樣的結果。
#[derive(Debug, Clone, Default)]
pub struct ReplenishmentCalculator {
    config: ReplenishmentConfig,
}

impl ReplenishmentCalculator {
    /// 創建新的補貨計算器
    pub fn new(config: ReplenishmentConfig) -> Self {
        Self { config }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &ReplenishmentConfig {
        &self.config
    }

    /// 計算單筆快照（交期取自倉庫目錄，未知倉庫使用預設交期）
    pub fn derive(
        &self,
        item: &StockRecord,
        directory: &WarehouseDirectory,
        today: NaiveDate,
    ) -> DerivedRecord {
        let default_days = self.config.default_lead_time_days;
        if directory.get(&item.warehouse).is_none() {
            tracing::debug!(
                "倉庫 {} 不在目錄中，使用預設交期 {} 天",
                item.warehouse,
                default_days
            );
        }
        let lead_time_days = directory.lead_time_or(&item.warehouse, default_days);

        self.derive_with_lead_time(item, lead_time_days, today)
    }

    /// 以指定交期計算單筆快照
    pub fn derive_with_lead_time(
        &self,
        item: &StockRecord,
        lead_time_days: u32,
        today: NaiveDate,
    ) -> DerivedRecord {
        let sales_per_day = self.sales_per_day(item.units_sold);
        let needed_for_coverage = self.coverage_quantity(item.units_sold);
        let days_to_zero = self.days_to_zero(item);

        let risk_date = calendar::add_days(today, days_to_zero);
        let production_start_date =
            LeadTimeCalculator::production_start_date(risk_date, lead_time_days);
        let is_urgent = production_start_date <= today;

        let quantity_to_reorder = (needed_for_coverage - item.units_in_stock)
            .ceil()
            .max(Decimal::ZERO);

        DerivedRecord {
            item: item.clone(),
            lead_time_days,
            sales_per_day,
            needed_for_coverage,
            days_to_zero,
            risk_date,
            production_start_date,
            is_urgent,
            quantity_to_reorder,
            activity_tier: self.activity_tier(sales_per_day),
        }
    }

    /// 批量計算，保持輸入順序
    pub fn derive_all(
        &self,
        items: &[StockRecord],
        directory: &WarehouseDirectory,
        today: NaiveDate,
    ) -> Vec<DerivedRecord> {
        items
            .iter()
            .map(|item| self.derive(item, directory, today))
            .collect()
    }

    /// 日銷量 = 銷量 / 統計窗口
    pub fn sales_per_day(&self, units_sold: Decimal) -> Decimal {
        units_sold / self.config.sales_window()
    }

    /// 覆蓋期所需數量 = ceil(日銷量 × 覆蓋天數)
    ///
    /// 先乘後除，避免日銷量的循環小數造成取整誤差。
    pub fn coverage_quantity(&self, units_sold: Decimal) -> Decimal {
        units_sold
            .checked_mul(Decimal::from(self.config.coverage_days))
            .map(|total| total / self.config.sales_window())
            .unwrap_or(Decimal::MAX)
            .ceil()
    }

    /// 售罄剩餘天數 = floor(庫存 / 日銷量)，無銷量時為哨兵值
    fn days_to_zero(&self, item: &StockRecord) -> i64 {
        if !item.has_sales() {
            return self.config.no_depletion_days;
        }

        item.units_in_stock
            .checked_mul(self.config.sales_window())
            .and_then(|total| total.checked_div(item.units_sold))
            .and_then(|days| days.floor().to_i64())
            .unwrap_or(i64::MAX)
    }

    /// 依日銷量判定活躍度
    pub fn activity_tier(&self, sales_per_day: Decimal) -> ActivityTier {
        if sales_per_day > self.config.high_activity_sales_per_day {
            ActivityTier::High
        } else if sales_per_day > self.config.medium_activity_sales_per_day {
            ActivityTier::Medium
        } else {
            ActivityTier::Low
        }
    }
}
