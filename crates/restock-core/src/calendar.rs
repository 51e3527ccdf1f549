//! 日曆日推算
//!
//! 所有日期以自然日計算（不區分工作日），超出日期範圍時取邊界值。

use chrono::{Days, NaiveDate};

/// 向前（正數）或向後（負數）推算自然日
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
            .unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// 向後推算自然日
pub fn subtract_days(date: NaiveDate, days: u32) -> NaiveDate {
    add_days(date, -i64::from(days))
}

/// 兩個日期之間的自然日數（`to` 早於 `from` 時為負數）
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
