//! 補貨計算主流程

use chrono::NaiveDate;
use restock_core::{ReplenishmentConfig, StockRecord, WarehouseDirectory};

use crate::shipment::ShipmentAggregator;
use crate::summary::SummaryAggregator;
use crate::{DashboardStats, ReplenishmentCalculator, ReplenishmentPlan};

/// 補貨計算引擎
///
/// 每次計算只取一次 `today`，明細、出貨排程與商品彙總共用同一日期。
#[derive(Debug, Clone, Default)]
pub struct ReplenishmentEngine {
    calculator: ReplenishmentCalculator,
}

impl ReplenishmentEngine {
    /// 創建新的計算引擎
    pub fn new(config: ReplenishmentConfig) -> Self {
        Self {
            calculator: ReplenishmentCalculator::new(config),
        }
    }

    /// 獲取配置引用
    pub fn config(&self) -> &ReplenishmentConfig {
        self.calculator.config()
    }

    /// 獲取計算器引用
    pub fn calculator(&self) -> &ReplenishmentCalculator {
        &self.calculator
    }

    /// 以本機日期執行一次完整計算
    pub fn run_today(
        &self,
        records: &[StockRecord],
        directory: &WarehouseDirectory,
    ) -> ReplenishmentPlan {
        let today = chrono::Local::now().date_naive();
        self.run(records, directory, today)
    }

    /// 主計算入口
    pub fn run(
        &self,
        records: &[StockRecord],
        directory: &WarehouseDirectory,
        today: NaiveDate,
    ) -> ReplenishmentPlan {
        tracing::info!(
            "開始補貨計算：快照 {} 筆，倉庫 {} 個，基準日 {}",
            records.len(),
            directory.len(),
            today
        );

        let start_time = std::time::Instant::now();

        // Step 1: 逐筆計算
        tracing::debug!("Step 1: 逐筆計算");
        let derived = self.calculator.derive_all(records, directory, today);

        // Step 2: 倉庫出貨排程
        tracing::debug!("Step 2: 倉庫出貨排程");
        let shipments = ShipmentAggregator::aggregate(&derived, today, self.config());

        // Step 3: 跨倉商品彙總
        tracing::debug!("Step 3: 跨倉商品彙總");
        let summaries = SummaryAggregator::aggregate(&derived, self.config());

        let stats = DashboardStats::collect(&derived, directory);

        let mut plan = ReplenishmentPlan::empty(today);
        plan.records = derived;
        plan.shipments = shipments;
        plan.summaries = summaries;
        plan.stats = stats;
        plan.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("補貨計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "緊急記錄 {} 筆，倉庫排程 {} 個，商品彙總 {} 個",
            plan.stats.urgent_records,
            plan.shipments.len(),
            plan.summaries.len()
        );

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_core::{LeadTimeSource, ProductionStart, WarehouseRecord};
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 6).unwrap()
    }

    fn item(warehouse: &str, article: &str, sold: i64, stock: i64) -> StockRecord {
        StockRecord::new(
            warehouse.to_string(),
            article.to_string(),
            "M".to_string(),
            Decimal::from(sold),
            Decimal::from(stock),
        )
    }

    #[test]
    fn test_empty_pass() {
        let engine = ReplenishmentEngine::default();

        let plan = engine.run(&[], &WarehouseDirectory::new(), today());

        assert!(plan.records.is_empty());
        assert!(plan.shipments.is_empty());
        assert!(plan.summaries.is_empty());
        assert_eq!(plan.stats, DashboardStats::default());
        assert_eq!(plan.today, today());
    }

    #[test]
    fn test_full_pass() {
        let engine = ReplenishmentEngine::default();
        let directory: WarehouseDirectory = [
            WarehouseRecord::new("W1".to_string(), 7, LeadTimeSource::FromFile),
            WarehouseRecord::new("W2".to_string(), 3, LeadTimeSource::Edited),
        ]
        .into_iter()
        .collect();
        let records = vec![
            item("W1", "A", 100, 50),
            item("W2", "A", 200, 500),
            item("W2", "B", 300, 20),
        ];

        let plan = engine.run(&records, &directory, today());

        assert_eq!(plan.records.len(), 3);
        assert_eq!(plan.shipments.len(), 2);
        assert_eq!(plan.summaries.len(), 2);
        assert_eq!(plan.stats.total_records, 3);
        assert_eq!(plan.stats.total_warehouses, 2);
        assert_eq!(plan.stats.urgent_records, 1);
        assert!(plan.calculation_time_ms.is_some());

        // W2 交期較短，出貨日較早
        assert_eq!(plan.shipments[0].warehouse, "W2");
        assert_eq!(
            plan.shipment_for("W2").map(|s| s.earliest_production_start),
            Some(ProductionStart::Urgent)
        );
        assert_eq!(plan.urgent_records().count(), 1);
    }

    #[test]
    fn test_pass_is_idempotent() {
        let engine = ReplenishmentEngine::default();
        let directory = WarehouseDirectory::new();
        let records = vec![item("W1", "A", 100, 50), item("W1", "B", 0, 5)];

        let first = engine.run(&records, &directory, today());
        let second = engine.run(&records, &directory, today());

        assert_eq!(first.records, second.records);
        assert_eq!(first.shipments, second.shipments);
        assert_eq!(first.summaries, second.summaries);
    }

    #[test]
    fn test_run_today_uses_local_date() {
        let engine = ReplenishmentEngine::default();
        let records = vec![item("W1", "A", 30, 100)];

        let before = chrono::Local::now().date_naive();
        let plan = engine.run_today(&records, &WarehouseDirectory::new());
        let after = chrono::Local::now().date_naive();

        assert!(plan.today == before || plan.today == after);
        // 明細與出貨排程共用同一基準日
        assert_eq!(plan.records[0].risk_date, restock_core::calendar::add_days(plan.today, 100));
        assert_eq!(
            plan.shipments[0].shipment_date,
            restock_core::calendar::add_days(plan.today, 19)
        );
    }

    #[test]
    fn test_custom_policy_flows_through_pass() {
        // 覆蓋 30 天、關注閾值 40 天
        let config = ReplenishmentConfig::new()
            .with_coverage_days(30)
            .with_attention_threshold(40);
        let engine = ReplenishmentEngine::new(config);

        let plan = engine.run(&[item("W1", "A", 60, 60)], &WarehouseDirectory::new(), today());

        // 60/30 = 2/天，30 天需 60 件，庫存 60 件可撐 30 天
        assert_eq!(plan.records[0].needed_for_coverage, Decimal::from(60));
        assert_eq!(plan.records[0].quantity_to_reorder, Decimal::ZERO);
        assert_eq!(plan.summaries[0].status, crate::SkuStatus::Attention);
    }
}
