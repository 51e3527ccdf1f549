//! 銷售報表匯入
//!
//! 報表為 Excel 活頁簿（優先讀取「Исходные」工作表，否則第一個工作表）或 CSV，
//! 表頭前可有若干標題列。欄位以關鍵字比對（不分大小寫）：
//!   倉庫、賣家貨號、尺碼、品名、品牌、銷量、庫存
//! 倉庫與賣家貨號為必要欄位；數值欄位無法解析或為負數時視為 0。

use calamine::{open_workbook, Reader, Xlsx};
use restock_core::{ReferenceLeadTimes, RestockError, StockRecord, WarehouseDirectory};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::{Result, StoreError};

/// 原始資料工作表名稱
pub const SOURCE_SHEET: &str = "Исходные";

/// 報表版面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLayout {
    /// 表頭所在列（0 起算），之前的列為報表標題
    pub header_row: usize,
}

impl Default for ReportLayout {
    /// 原始報表第一列為標題，第二列為表頭
    fn default() -> Self {
        Self { header_row: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Warehouse,
    SellerArticle,
    Size,
    Name,
    Brand,
    UnitsSold,
    UnitsInStock,
}

/// 欄位關鍵字，依序比對，先符合者優先；同一欄位內越前面的關鍵字越優先
const COLUMN_KEYWORDS: &[(Column, &[&str])] = &[
    (Column::Warehouse, &["склад", "warehouse"]),
    (
        Column::SellerArticle,
        &["артикул продавца", "seller article", "артикул", "article", "sku"],
    ),
    (Column::Size, &["размер", "size"]),
    (Column::Name, &["наименование", "name"]),
    (Column::Brand, &["бренд", "brand"]),
    (Column::UnitsSold, &["продано", "выкупили", "sold"]),
    (Column::UnitsInStock, &["текущий остаток", "остаток", "stock"]),
];

fn classify(header: &str) -> Option<(Column, usize)> {
    let header = header.trim().to_lowercase();
    if header.is_empty() {
        return None;
    }

    COLUMN_KEYWORDS.iter().find_map(|(column, keywords)| {
        keywords
            .iter()
            .position(|keyword| header.contains(keyword))
            .map(|rank| (*column, rank))
    })
}

/// 欄位索引
#[derive(Debug, Default)]
struct ColumnMap {
    slots: Vec<(Column, usize, usize)>,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Result<Self> {
        let mut map = Self::default();

        for (idx, cell) in header.iter().enumerate() {
            let Some((column, rank)) = classify(cell) else {
                continue;
            };
            match map.slots.iter_mut().find(|(c, _, _)| *c == column) {
                Some(slot) if rank < slot.1 => *slot = (column, rank, idx),
                Some(_) => {}
                None => map.slots.push((column, rank, idx)),
            }
        }

        if map.index(Column::Warehouse).is_none() {
            return Err(StoreError::MissingColumn("warehouse"));
        }
        if map.index(Column::SellerArticle).is_none() {
            return Err(StoreError::MissingColumn("seller_article"));
        }

        Ok(map)
    }

    fn index(&self, column: Column) -> Option<usize> {
        self.slots
            .iter()
            .find(|(c, _, _)| *c == column)
            .map(|(_, _, idx)| *idx)
    }

    fn text(&self, row: &[String], column: Column) -> String {
        self.index(column)
            .and_then(|idx| row.get(idx))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    fn quantity(&self, row: &[String], column: Column) -> Decimal {
        self.index(column)
            .and_then(|idx| row.get(idx))
            .map(|v| parse_quantity(v))
            .unwrap_or(Decimal::ZERO)
    }
}

/// 解析數量：接受逗號小數與千分位空白，無法解析或為負數時為 0
pub fn parse_quantity(raw: &str) -> Decimal {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map(|value| value.max(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO)
}

/// 匯入結果
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// 有效快照
    pub records: Vec<StockRecord>,

    /// 因缺少倉庫或貨號而略過的列數
    pub skipped_rows: usize,
}

impl IngestReport {
    /// 依首次出現順序列出倉庫名稱
    pub fn warehouse_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.warehouse.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// 將新倉庫登記到目錄，回傳新增數量
    pub fn register_warehouses(
        &self,
        directory: &mut WarehouseDirectory,
        reference: &ReferenceLeadTimes,
        default_days: u32,
    ) -> usize {
        self.warehouse_names()
            .into_iter()
            .filter(|name| directory.register(name, reference, default_days))
            .count()
    }
}

/// 解析 CSV 銷售報表
pub fn parse_report<R: Read>(reader: R, layout: &ReportLayout) -> Result<IngestReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let rows = csv_reader.records().map(|row| {
        row.map(|record| record.iter().map(str::to_string).collect::<Vec<_>>())
            .map_err(StoreError::from)
    });

    collect_rows(rows, layout)
}

/// 解析 Excel 銷售報表
pub fn parse_workbook(path: impl AsRef<Path>, layout: &ReportLayout) -> Result<IngestReport> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .iter()
        .find(|name| name.as_str() == SOURCE_SHEET)
        .or_else(|| sheet_names.first())
        .cloned()
        .ok_or(StoreError::NoWorksheet)?;
    tracing::debug!("讀取工作表 {} ({})", sheet_name, path.display());

    let range = workbook.worksheet_range(&sheet_name)?;
    let rows = range
        .rows()
        .map(|row| Ok(row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>()));

    collect_rows(rows, layout)
}

/// 由逐列儲存格文字建立快照，CSV 與活頁簿共用
fn collect_rows<I>(rows: I, layout: &ReportLayout) -> Result<IngestReport>
where
    I: Iterator<Item = Result<Vec<String>>>,
{
    let mut rows = rows.skip(layout.header_row);
    let header = rows.next().ok_or(StoreError::EmptyDataset)??;
    let columns = ColumnMap::from_header(&header)?;

    let mut report = IngestReport::default();
    for row in rows {
        let row = row?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let warehouse = columns.text(&row, Column::Warehouse);
        let seller_article = columns.text(&row, Column::SellerArticle);
        if warehouse.is_empty() || seller_article.is_empty() {
            report.skipped_rows += 1;
            continue;
        }

        let record = StockRecord::new(
            warehouse,
            seller_article,
            columns.text(&row, Column::Size),
            columns.quantity(&row, Column::UnitsSold),
            columns.quantity(&row, Column::UnitsInStock),
        )
        .with_name(columns.text(&row, Column::Name))
        .with_brand(columns.text(&row, Column::Brand));

        report.records.push(record);
    }

    if report.skipped_rows > 0 {
        tracing::warn!("略過 {} 列：缺少倉庫或賣家貨號", report.skipped_rows);
    }
    if report.records.is_empty() {
        return Err(StoreError::EmptyDataset);
    }

    tracing::info!(
        "報表匯入完成：{} 筆快照，{} 個倉庫",
        report.records.len(),
        report.warehouse_names().len()
    );

    Ok(report)
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    warehouse: String,
    lead_time_days: i64,
}

/// 解析參考交期表（欄位：warehouse, lead_time_days）
pub fn parse_reference_table<R: Read>(reader: R) -> Result<ReferenceLeadTimes> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for result in csv_reader.deserialize() {
        let row: ReferenceRow = result?;
        let days = u32::try_from(row.lead_time_days).map_err(|_| {
            RestockError::InvalidLeadTime {
                warehouse: row.warehouse.clone(),
                days: row.lead_time_days,
            }
        })?;
        entries.push((row.warehouse, days));
    }

    Ok(entries.into_iter().collect())
}
