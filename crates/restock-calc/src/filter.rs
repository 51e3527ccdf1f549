//! 明細記錄篩選與排序

use restock_core::{DerivedRecord, ReplenishmentConfig};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 明細列標示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowHighlight {
    /// 已需緊急生產
    Urgent,
    /// 即將售罄
    Warning,
    Plain,
}

impl RowHighlight {
    /// 判定明細列標示
    pub fn of(record: &DerivedRecord, config: &ReplenishmentConfig) -> Self {
        if record.is_urgent {
            RowHighlight::Urgent
        } else if record.days_to_zero < config.attention_threshold_days {
            RowHighlight::Warning
        } else {
            RowHighlight::Plain
        }
    }
}

/// 排序欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSortKey {
    Warehouse,
    SellerArticle,
    Size,
    Name,
    Brand,
    UnitsSold,
    UnitsInStock,
    SalesPerDay,
    NeededForCoverage,
    QuantityToReorder,
    DaysToZero,
    ProductionStart,
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// 明細查詢條件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    /// 倉庫（完全相符）
    pub warehouse: Option<String>,

    /// 貨號（完全相符）
    pub seller_article: Option<String>,

    /// 關鍵字（品名/品牌，不分大小寫）
    pub search: Option<String>,

    pub sort: Option<(RecordSortKey, SortDirection)>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置倉庫
    pub fn with_warehouse(mut self, warehouse: impl Into<String>) -> Self {
        self.warehouse = Some(warehouse.into());
        self
    }

    /// 建構器模式：設置貨號
    pub fn with_seller_article(mut self, article: impl Into<String>) -> Self {
        self.seller_article = Some(article.into());
        self
    }

    /// 建構器模式：設置關鍵字
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// 建構器模式：設置排序
    pub fn with_sort(mut self, key: RecordSortKey, direction: SortDirection) -> Self {
        self.sort = Some((key, direction));
        self
    }

    /// 點擊欄位排序：同一欄位切換方向，新欄位從升序開始
    pub fn toggle_sort(&mut self, key: RecordSortKey) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == key => {
                Some((key, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == key => {
                Some((key, SortDirection::Ascending))
            }
            _ => Some((key, SortDirection::Ascending)),
        };
    }

    /// 檢查記錄是否符合篩選條件
    pub fn matches(&self, record: &DerivedRecord) -> bool {
        if let Some(warehouse) = non_empty(&self.warehouse) {
            if record.item.warehouse != warehouse {
                return false;
            }
        }

        if let Some(article) = non_empty(&self.seller_article) {
            if record.item.seller_article != article {
                return false;
            }
        }

        match non_empty(&self.search).map(str::to_lowercase) {
            Some(term) => {
                record.item.name.to_lowercase().contains(&term)
                    || record.item.brand.to_lowercase().contains(&term)
            }
            None => true,
        }
    }

    /// 篩選並排序（穩定排序）
    pub fn apply<'a>(&self, records: &'a [DerivedRecord]) -> Vec<&'a DerivedRecord> {
        let mut result: Vec<&DerivedRecord> =
            records.iter().filter(|r| self.matches(r)).collect();

        if let Some((key, direction)) = self.sort {
            result.sort_by(|a, b| {
                let ordering = compare(a, b, key);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        result
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare(a: &DerivedRecord, b: &DerivedRecord, key: RecordSortKey) -> Ordering {
    match key {
        RecordSortKey::Warehouse => compare_text(&a.item.warehouse, &b.item.warehouse),
        RecordSortKey::SellerArticle => {
            compare_text(&a.item.seller_article, &b.item.seller_article)
        }
        RecordSortKey::Size => compare_text(&a.item.size, &b.item.size),
        RecordSortKey::Name => compare_text(&a.item.name, &b.item.name),
        RecordSortKey::Brand => compare_text(&a.item.brand, &b.item.brand),
        RecordSortKey::UnitsSold => a.item.units_sold.cmp(&b.item.units_sold),
        RecordSortKey::UnitsInStock => a.item.units_in_stock.cmp(&b.item.units_in_stock),
        RecordSortKey::SalesPerDay => a.sales_per_day.cmp(&b.sales_per_day),
        RecordSortKey::NeededForCoverage => a.needed_for_coverage.cmp(&b.needed_for_coverage),
        RecordSortKey::QuantityToReorder => a.quantity_to_reorder.cmp(&b.quantity_to_reorder),
        RecordSortKey::DaysToZero => a.days_to_zero.cmp(&b.days_to_zero),
        RecordSortKey::ProductionStart => a.production_start_date.cmp(&b.production_start_date),
    }
}

/// 不重複的貨號列表（排序，略過空值）
pub fn distinct_articles(records: &[DerivedRecord]) -> Vec<String> {
    let mut articles: Vec<String> = records
        .iter()
        .map(|r| r.item.seller_article.clone())
        .filter(|a| !a.is_empty())
        .collect();
    articles.sort();
    articles.dedup();
    articles
}
