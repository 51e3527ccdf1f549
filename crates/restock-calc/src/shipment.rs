//! 倉庫出貨排程

use chrono::NaiveDate;
use restock_core::calendar;
use restock_core::{DerivedRecord, ProductionStart, ReplenishmentConfig, ShipmentDateBasis};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::lead_time::LeadTimeCalculator;

/// 出貨狀態（排序即緊急程度：逾期 → 緊急 → 正常）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Overdue,
    Urgent,
    Normal,
}

/// 單一倉庫的出貨排程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseShipment {
    /// 倉庫名稱
    pub warehouse: String,

    /// 交期（天）
    pub lead_time_days: u32,

    /// 倉庫內最早的生產開始時點
    pub earliest_production_start: ProductionStart,

    /// 出貨日
    pub shipment_date: NaiveDate,

    /// 距出貨天數（逾期時為 0）
    pub days_to_ship: i64,

    /// 出貨狀態
    pub status: ShipmentStatus,

    /// 商品數
    pub total_sku_count: usize,

    /// 緊急商品數
    pub urgent_sku_count: usize,
}

impl WarehouseShipment {
    pub fn has_urgent_skus(&self) -> bool {
        self.urgent_sku_count > 0
    }
}

/// 倉庫分組的中間狀態
struct WarehouseGroup<'a> {
    warehouse: &'a str,
    lead_time_days: u32,
    earliest: ProductionStart,
    total: usize,
    urgent: usize,
}

/// 出貨排程彙總器
pub struct ShipmentAggregator;

impl ShipmentAggregator {
    /// 依倉庫彙總，並按緊急程度與出貨日排序
    pub fn aggregate(
        records: &[DerivedRecord],
        today: NaiveDate,
        config: &ReplenishmentConfig,
    ) -> Vec<WarehouseShipment> {
        let groups = Self::group_by_warehouse(records);
        tracing::debug!("出貨排程: {} 筆記錄, {} 個倉庫", records.len(), groups.len());

        let mut shipments: Vec<WarehouseShipment> = groups
            .into_iter()
            .map(|group| Self::schedule(group, today, config))
            .collect();

        // sort_by 為穩定排序，同狀態同日期保持分組順序
        shipments.sort_by(|a, b| {
            a.status
                .cmp(&b.status)
                .then_with(|| a.shipment_date.cmp(&b.shipment_date))
        });

        shipments
    }

    /// 按倉庫分組（保持首次出現順序）
    fn group_by_warehouse(records: &[DerivedRecord]) -> Vec<WarehouseGroup<'_>> {
        let mut groups: Vec<WarehouseGroup<'_>> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for record in records {
            let i = *index.entry(record.warehouse()).or_insert_with(|| {
                groups.push(WarehouseGroup {
                    warehouse: record.warehouse(),
                    lead_time_days: record.lead_time_days,
                    earliest: record.production_start(),
                    total: 0,
                    urgent: 0,
                });
                groups.len() - 1
            });

            let group = &mut groups[i];
            group.total += 1;
            if record.is_urgent {
                group.urgent += 1;
            }
            group.earliest = group.earliest.earliest(record.production_start());
        }

        groups
    }

    /// 計算單一倉庫的出貨日與狀態
    fn schedule(
        group: WarehouseGroup<'_>,
        today: NaiveDate,
        config: &ReplenishmentConfig,
    ) -> WarehouseShipment {
        let shipment_date = match config.shipment_date_basis {
            ShipmentDateBasis::LeadTime => {
                LeadTimeCalculator::shipment_date(today, group.lead_time_days, config)
            }
            ShipmentDateBasis::EarliestProductionStart => match group.earliest {
                ProductionStart::Scheduled(start) => {
                    LeadTimeCalculator::shipment_date_from_production_start(start, config)
                }
                // 已需緊急生產：立即出貨
                ProductionStart::Urgent => today,
            },
        };

        let days_to_ship = calendar::days_between(today, shipment_date);
        let status = if shipment_date < today {
            ShipmentStatus::Overdue
        } else if days_to_ship <= config.shipment_urgent_within_days {
            ShipmentStatus::Urgent
        } else {
            ShipmentStatus::Normal
        };

        WarehouseShipment {
            warehouse: group.warehouse.to_string(),
            lead_time_days: group.lead_time_days,
            earliest_production_start: group.earliest,
            shipment_date,
            days_to_ship: days_to_ship.max(0),
            status,
            total_sku_count: group.total,
            urgent_sku_count: group.urgent,
        }
    }
}
