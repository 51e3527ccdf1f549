//! 交期推算

use chrono::NaiveDate;
use restock_core::calendar;
use restock_core::{LeadTimeSource, ReplenishmentConfig, WarehouseDirectory};
use serde::Serialize;

/// 倉庫目錄檢視的一列：倉庫與預計出貨日
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledWarehouse {
    pub name: String,
    pub lead_time_days: u32,
    pub source: LeadTimeSource,
    pub shipment_date: NaiveDate,
}

/// 交期計算器
pub struct LeadTimeCalculator;

impl LeadTimeCalculator {
    /// 計算最晚生產開始日（售罄日向後推算交期）
    pub fn production_start_date(risk_date: NaiveDate, lead_time_days: u32) -> NaiveDate {
        calendar::subtract_days(risk_date, lead_time_days)
    }

    /// 計算倉庫出貨日（今天 + 交期 + 運輸緩衝）
    pub fn shipment_date(
        today: NaiveDate,
        lead_time_days: u32,
        config: &ReplenishmentConfig,
    ) -> NaiveDate {
        calendar::add_days(
            today,
            i64::from(lead_time_days) + i64::from(config.transit_buffer_days),
        )
    }

    /// 以生產開始日計算出貨日（生產開始日 + 運輸緩衝）
    pub fn shipment_date_from_production_start(
        production_start: NaiveDate,
        config: &ReplenishmentConfig,
    ) -> NaiveDate {
        calendar::add_days(production_start, i64::from(config.transit_buffer_days))
    }

    /// 總運送天數（交期 + 運輸緩衝）
    pub fn total_delivery_days(lead_time_days: u32, config: &ReplenishmentConfig) -> u32 {
        lead_time_days.saturating_add(config.transit_buffer_days)
    }

    /// 倉庫目錄按名稱排序，附上預計出貨日
    pub fn warehouse_schedule(
        directory: &WarehouseDirectory,
        today: NaiveDate,
        config: &ReplenishmentConfig,
    ) -> Vec<ScheduledWarehouse> {
        directory
            .sorted_by_name()
            .into_iter()
            .map(|w| ScheduledWarehouse {
                name: w.name.clone(),
                lead_time_days: w.lead_time_days,
                source: w.source,
                shipment_date: Self::shipment_date(today, w.lead_time_days, config),
            })
            .collect()
    }
}
