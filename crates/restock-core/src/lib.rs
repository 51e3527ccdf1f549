//! # Restock Core
//!
//! 補貨計算的核心資料模型與類型定義

pub mod calendar;
pub mod config;
pub mod derived;
pub mod stock;
pub mod warehouse;

// Re-export 主要類型
pub use config::{ReplenishmentConfig, ShipmentDateBasis};
pub use derived::{ActivityTier, DerivedRecord, ProductionStart};
pub use stock::StockRecord;
pub use warehouse::{
    LeadTimeChange, LeadTimeSource, ReferenceLeadTimes, WarehouseDirectory, WarehouseRecord,
};

/// 補貨錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum RestockError {
    #[error("找不到倉庫: {0}")]
    UnknownWarehouse(String),

    #[error("無效的交期: 倉庫 {warehouse}, {days} 天")]
    InvalidLeadTime { warehouse: String, days: i64 },
}

pub type Result<T> = std::result::Result<T, RestockError>;
