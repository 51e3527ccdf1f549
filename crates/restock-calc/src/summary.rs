//! 跨倉商品彙總

use restock_core::{DerivedRecord, ProductionStart, ReplenishmentConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::ReplenishmentCalculator;

/// 商品彙總狀態（排序即緊急程度）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkuStatus {
    /// 任一倉庫已需緊急生產
    Critical,
    /// 任一倉庫即將售罄
    Attention,
    Normal,
}

/// 單一商品（貨號 × 尺碼）的全公司彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuSummary {
    pub seller_article: String,
    pub size: String,
    pub name: String,
    pub brand: String,

    /// 各倉銷量合計
    pub total_units_sold: Decimal,

    /// 各倉庫存合計
    pub total_units_in_stock: Decimal,

    /// 合計日銷量（由合計銷量重新計算）
    pub combined_sales_per_day: Decimal,

    /// 合計覆蓋期所需數量
    pub combined_needed_for_coverage: Decimal,

    /// 最早生產開始時點
    pub earliest_production_start: ProductionStart,

    /// 各倉最短售罄天數
    pub min_days_to_zero: i64,

    /// 涉及倉庫數
    pub warehouse_count: usize,

    /// 緊急記錄數
    pub urgent_count: usize,

    pub status: SkuStatus,
}

/// 商品分組的中間狀態
struct SkuGroup<'a> {
    seller_article: &'a str,
    size: &'a str,
    name: &'a str,
    brand: &'a str,
    total_units_sold: Decimal,
    total_units_in_stock: Decimal,
    earliest: ProductionStart,
    min_days_to_zero: i64,
    warehouses: HashSet<&'a str>,
    urgent_count: usize,
}

impl<'a> SkuGroup<'a> {
    fn new(record: &'a DerivedRecord) -> Self {
        Self {
            seller_article: &record.item.seller_article,
            size: &record.item.size,
            name: &record.item.name,
            brand: &record.item.brand,
            total_units_sold: Decimal::ZERO,
            total_units_in_stock: Decimal::ZERO,
            earliest: record.production_start(),
            min_days_to_zero: record.days_to_zero,
            warehouses: HashSet::new(),
            urgent_count: 0,
        }
    }

    fn add(&mut self, record: &'a DerivedRecord) {
        self.total_units_sold = self.total_units_sold.saturating_add(record.item.units_sold);
        self.total_units_in_stock = self
            .total_units_in_stock
            .saturating_add(record.item.units_in_stock);
        self.earliest = self.earliest.earliest(record.production_start());
        self.min_days_to_zero = self.min_days_to_zero.min(record.days_to_zero);
        self.warehouses.insert(record.warehouse());
        if record.is_urgent {
            self.urgent_count += 1;
        }
        // 品名/品牌取第一個非空值
        if self.name.is_empty() {
            self.name = &record.item.name;
        }
        if self.brand.is_empty() {
            self.brand = &record.item.brand;
        }
    }
}

/// 跨倉商品彙總器
pub struct SummaryAggregator;

impl SummaryAggregator {
    /// 依（貨號, 尺碼）跨倉彙總，保持首次出現順序
    pub fn aggregate(records: &[DerivedRecord], config: &ReplenishmentConfig) -> Vec<SkuSummary> {
        let mut groups: Vec<SkuGroup<'_>> = Vec::new();
        let mut index: HashMap<(&str, &str), usize> = HashMap::new();

        for record in records {
            let i = *index.entry(record.sku_key()).or_insert_with(|| {
                groups.push(SkuGroup::new(record));
                groups.len() - 1
            });
            groups[i].add(record);
        }

        tracing::debug!("商品彙總: {} 筆記錄, {} 個商品", records.len(), groups.len());

        let calculator = ReplenishmentCalculator::new(config.clone());
        groups
            .into_iter()
            .map(|group| Self::summarize(group, &calculator))
            .collect()
    }

    fn summarize(group: SkuGroup<'_>, calculator: &ReplenishmentCalculator) -> SkuSummary {
        let config = calculator.config();
        let status = if group.urgent_count > 0 {
            SkuStatus::Critical
        } else if group.min_days_to_zero < config.attention_threshold_days {
            SkuStatus::Attention
        } else {
            SkuStatus::Normal
        };

        SkuSummary {
            seller_article: group.seller_article.to_string(),
            size: group.size.to_string(),
            name: group.name.to_string(),
            brand: group.brand.to_string(),
            total_units_sold: group.total_units_sold,
            total_units_in_stock: group.total_units_in_stock,
            combined_sales_per_day: calculator.sales_per_day(group.total_units_sold),
            combined_needed_for_coverage: calculator.coverage_quantity(group.total_units_sold),
            earliest_production_start: group.earliest,
            min_days_to_zero: group.min_days_to_zero,
            warehouse_count: group.warehouses.len(),
            urgent_count: group.urgent_count,
            status,
        }
    }
}

/// 彙總排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySort {
    /// 庫存由少到多
    StockAscending,
    /// 庫存由多到少
    StockDescending,
    /// 品名
    Name,
    /// 緊急程度，其次售罄天數
    Urgency,
}

/// 彙總查詢條件（只影響顯示哪些商品及其順序，不影響彙總數值）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// 關鍵字（貨號/品名/品牌，不分大小寫）
    pub search: Option<String>,

    /// 尺碼（完全相符）
    pub size: Option<String>,

    pub sort: Option<SummarySort>,
}

impl SummaryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置關鍵字
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// 建構器模式：設置尺碼
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// 建構器模式：設置排序
    pub fn with_sort(mut self, sort: SummarySort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// 檢查商品是否符合篩選條件
    pub fn matches(&self, summary: &SkuSummary) -> bool {
        if let Some(size) = self.size.as_deref().filter(|s| !s.is_empty()) {
            if summary.size != size {
                return false;
            }
        }

        match self.search_term() {
            Some(term) => [&summary.seller_article, &summary.name, &summary.brand]
                .iter()
                .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }

    /// 篩選並排序（穩定排序）
    pub fn apply(&self, summaries: Vec<SkuSummary>) -> Vec<SkuSummary> {
        let mut result: Vec<SkuSummary> =
            summaries.into_iter().filter(|s| self.matches(s)).collect();

        if let Some(sort) = self.sort {
            result.sort_by(|a, b| Self::compare(a, b, sort));
        }

        result
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn compare(a: &SkuSummary, b: &SkuSummary, sort: SummarySort) -> Ordering {
        match sort {
            SummarySort::StockAscending => a.total_units_in_stock.cmp(&b.total_units_in_stock),
            SummarySort::StockDescending => b.total_units_in_stock.cmp(&a.total_units_in_stock),
            SummarySort::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.seller_article.cmp(&b.seller_article)),
            SummarySort::Urgency => a
                .status
                .cmp(&b.status)
                .then_with(|| a.min_days_to_zero.cmp(&b.min_days_to_zero)),
        }
    }
}
