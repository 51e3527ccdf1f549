//! 補貨計算配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 未知倉庫的預設交期（天）
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 7;

/// 出貨前固定的運輸/處理緩衝（天），所有倉庫一律適用
pub const TRANSIT_BUFFER_DAYS: u32 = 12;

/// 銷量統計窗口（天）
pub const SALES_WINDOW_DAYS: u32 = 30;

/// 補貨覆蓋天數
pub const COVERAGE_DAYS: u32 = 45;

/// 無銷量時的「永不售罄」天數
pub const NO_DEPLETION_DAYS: i64 = 999;

/// 剩餘天數低於此值時需要關注
pub const ATTENTION_THRESHOLD_DAYS: i64 = 14;

/// 距出貨天數不超過此值時視為緊急
pub const SHIPMENT_URGENT_WITHIN_DAYS: i64 = 3;

/// 交期超過此值時需要人工確認
pub const LEAD_TIME_CONFIRM_THRESHOLD_DAYS: u32 = 30;

/// 倉庫出貨日期的計算基準
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentDateBasis {
    /// 今天 + 交期 + 運輸緩衝
    #[default]
    LeadTime,

    /// 最早生產開始日 + 運輸緩衝（舊公式）
    EarliestProductionStart,
}

/// 補貨計算參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplenishmentConfig {
    /// 預設交期（天）
    pub default_lead_time_days: u32,

    /// 運輸緩衝（天）
    pub transit_buffer_days: u32,

    /// 銷量統計窗口（天）
    pub sales_window_days: u32,

    /// 補貨覆蓋天數
    pub coverage_days: u32,

    /// 無銷量時的剩餘天數
    pub no_depletion_days: i64,

    /// 關注閾值（天）
    pub attention_threshold_days: i64,

    /// 高活躍度：日銷量大於此值
    pub high_activity_sales_per_day: Decimal,

    /// 中活躍度：日銷量大於此值
    pub medium_activity_sales_per_day: Decimal,

    /// 出貨緊急窗口（天）
    pub shipment_urgent_within_days: i64,

    /// 交期確認閾值（天）
    pub lead_time_confirm_threshold_days: u32,

    /// 出貨日期基準
    pub shipment_date_basis: ShipmentDateBasis,
}

impl ReplenishmentConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            default_lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            transit_buffer_days: TRANSIT_BUFFER_DAYS,
            sales_window_days: SALES_WINDOW_DAYS,
            coverage_days: COVERAGE_DAYS,
            no_depletion_days: NO_DEPLETION_DAYS,
            attention_threshold_days: ATTENTION_THRESHOLD_DAYS,
            high_activity_sales_per_day: Decimal::from(10),
            medium_activity_sales_per_day: Decimal::from(3),
            shipment_urgent_within_days: SHIPMENT_URGENT_WITHIN_DAYS,
            lead_time_confirm_threshold_days: LEAD_TIME_CONFIRM_THRESHOLD_DAYS,
            shipment_date_basis: ShipmentDateBasis::LeadTime,
        }
    }

    /// 建構器模式：設置預設交期
    pub fn with_default_lead_time(mut self, days: u32) -> Self {
        self.default_lead_time_days = days;
        self
    }

    /// 建構器模式：設置運輸緩衝
    pub fn with_transit_buffer(mut self, days: u32) -> Self {
        self.transit_buffer_days = days;
        self
    }

    /// 建構器模式：設置覆蓋天數
    pub fn with_coverage_days(mut self, days: u32) -> Self {
        self.coverage_days = days;
        self
    }

    /// 建構器模式：設置關注閾值
    pub fn with_attention_threshold(mut self, days: i64) -> Self {
        self.attention_threshold_days = days;
        self
    }

    /// 建構器模式：設置出貨日期基準
    pub fn with_shipment_date_basis(mut self, basis: ShipmentDateBasis) -> Self {
        self.shipment_date_basis = basis;
        self
    }

    /// 銷量窗口（Decimal，至少 1 天）
    pub fn sales_window(&self) -> Decimal {
        Decimal::from(self.sales_window_days.max(1))
    }

    /// 交期是否需要人工確認
    pub fn lead_time_needs_confirmation(&self, lead_time_days: u32) -> bool {
        lead_time_days > self.lead_time_confirm_threshold_days
    }
}

impl Default for ReplenishmentConfig {
    fn default() -> Self {
        Self::new()
    }
}
