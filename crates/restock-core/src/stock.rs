//! 倉庫庫存快照模型

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// 單一倉庫 × 商品 × 尺碼的銷售/庫存快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// 記錄ID
    pub id: Uuid,

    /// 倉庫名稱
    pub warehouse: String,

    /// 賣家貨號
    pub seller_article: String,

    /// 尺碼
    pub size: String,

    /// 品名
    #[serde(default)]
    pub name: String,

    /// 品牌
    #[serde(default)]
    pub brand: String,

    /// 近 30 天銷量
    #[serde(deserialize_with = "non_negative")]
    pub units_sold: Decimal,

    /// 現有庫存
    #[serde(deserialize_with = "non_negative")]
    pub units_in_stock: Decimal,
}

/// 反序列化時與 `StockRecord::new` 一樣將負數視為 0
fn non_negative<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    <Decimal as Deserialize>::deserialize(deserializer).map(|value| value.max(Decimal::ZERO))
}

impl StockRecord {
    /// 創建新的庫存快照
    ///
    /// 負數數量視為 0
    pub fn new(
        warehouse: String,
        seller_article: String,
        size: String,
        units_sold: Decimal,
        units_in_stock: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            warehouse,
            seller_article,
            size,
            name: String::new(),
            brand: String::new(),
            units_sold: units_sold.max(Decimal::ZERO),
            units_in_stock: units_in_stock.max(Decimal::ZERO),
        }
    }

    /// 建構器模式：設置品名
    pub fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }

    /// 建構器模式：設置品牌
    pub fn with_brand(mut self, brand: String) -> Self {
        self.brand = brand;
        self
    }

    /// 跨倉彙總用的商品鍵（貨號, 尺碼）
    pub fn sku_key(&self) -> (&str, &str) {
        (&self.seller_article, &self.size)
    }

    /// 是否有銷量
    pub fn has_sales(&self) -> bool {
        self.units_sold > Decimal::ZERO
    }
}
