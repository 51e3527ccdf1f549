//! # Restock Store
//!
//! 報表匯入、快照持久化與工作區狀態

pub mod dirty_tracking;
pub mod ingest;
pub mod snapshot;
pub mod workspace;

// Re-export 主要類型
pub use dirty_tracking::DirtyTracker;
pub use ingest::{parse_reference_table, parse_report, parse_workbook, IngestReport, ReportLayout};
pub use snapshot::{Snapshot, SnapshotStore};
pub use workspace::{IngestSummary, Workspace};

use restock_core::RestockError;

/// 匯入與持久化錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("報表沒有任何有效資料")]
    EmptyDataset,

    #[error("報表缺少必要欄位: {0}")]
    MissingColumn(&'static str),

    #[error("活頁簿沒有任何工作表")]
    NoWorksheet,

    #[error("CSV 解析錯誤: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel 解析錯誤: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("IO 錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 錯誤: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] RestockError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
