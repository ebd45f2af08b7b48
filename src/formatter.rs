//! Formatter Module
//!
//! 抽出された値をレポート用の文字列に変換するモジュール。

use chrono::{NaiveDateTime, Timelike};
use std::fmt::Write as _;
use tracing::warn;

use crate::api::DateFormat;
use crate::types::CellValue;

/// スカラー値のフォーマッター
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug, Clone)]
pub(crate) struct ValueFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,
}

impl ValueFormatter {
    pub fn new(date_format: DateFormat) -> Self {
        Self {
            date_formatter: DateFormatter { date_format },
        }
    }

    /// セル値を文字列に変換
    ///
    /// - 文字列: そのまま
    /// - 数値: 最短の10進表記（`42`, `1.5`）
    /// - 論理値: `true` / `false`
    /// - 日付: `DateFormat`に従う
    /// - エラー値: エラーテキスト
    /// - 空セル: 空文字列
    pub fn format_cell(&self, value: &CellValue) -> String {
        match value {
            CellValue::String(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Date(dt) => self.date_formatter.format(dt),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::new(DateFormat::Iso8601)
    }
}

/// 日付フォーマッター
#[derive(Debug, Clone)]
pub(crate) struct DateFormatter {
    date_format: DateFormat,
}

impl DateFormatter {
    pub fn format(&self, value: &NaiveDateTime) -> String {
        match &self.date_format {
            DateFormat::Iso8601 => format_iso8601(value),
            DateFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", value.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => {
                        warn!(format = %format_str, "date format not applicable, using ISO 8601");
                        format_iso8601(value)
                    }
                }
            }
        }
    }
}

/// ISO 8601形式（時刻が0時0分0秒の場合は日付のみ）
fn format_iso8601(value: &NaiveDateTime) -> String {
    if value.num_seconds_from_midnight() == 0 && value.nanosecond() == 0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// 数値を文字列に変換
///
/// 整数値は小数点なし（`42`）、非有限値は`NaN` / `Infinity` / `-Infinity`。
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        // -0 も 0 として出力
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .unwrap()
    }

    #[test]
    fn test_format_strings_and_empty() {
        let formatter = ValueFormatter::default();
        assert_eq!(formatter.format_cell(&CellValue::from("Attack")), "Attack");
        assert_eq!(formatter.format_cell(&CellValue::from("")), "");
        assert_eq!(formatter.format_cell(&CellValue::Empty), "");
    }

    #[test]
    fn test_format_numbers() {
        let formatter = ValueFormatter::default();
        assert_eq!(formatter.format_cell(&CellValue::Number(42.0)), "42");
        assert_eq!(formatter.format_cell(&CellValue::Number(1.5)), "1.5");
        assert_eq!(formatter.format_cell(&CellValue::Number(-0.25)), "-0.25");
        assert_eq!(formatter.format_cell(&CellValue::Number(-0.0)), "0");
        assert_eq!(formatter.format_cell(&CellValue::Number(f64::NAN)), "NaN");
        assert_eq!(
            formatter.format_cell(&CellValue::Number(f64::NEG_INFINITY)),
            "-Infinity"
        );
    }

    #[test]
    fn test_format_bool_and_error() {
        let formatter = ValueFormatter::default();
        assert_eq!(formatter.format_cell(&CellValue::Bool(true)), "true");
        assert_eq!(formatter.format_cell(&CellValue::Bool(false)), "false");
        assert_eq!(
            formatter.format_cell(&CellValue::Error("#DIV/0!".to_string())),
            "#DIV/0!"
        );
    }

    #[test]
    fn test_format_date_iso8601() {
        let formatter = ValueFormatter::default();
        assert_eq!(
            formatter.format_cell(&CellValue::Date(datetime(2025, 1, 2, 0, 0, 0))),
            "2025-01-02"
        );
        assert_eq!(
            formatter.format_cell(&CellValue::Date(datetime(2025, 1, 2, 9, 30, 5))),
            "2025-01-02T09:30:05"
        );
    }

    #[test]
    fn test_format_date_offset_specifier_falls_back_to_iso() {
        let formatter = ValueFormatter::new(DateFormat::Custom("%Y %z".to_string()));
        assert_eq!(
            formatter.format_cell(&CellValue::Date(datetime(2024, 1, 15, 0, 0, 0))),
            "2024-01-15"
        );
    }

    #[test]
    fn test_format_date_custom() {
        let formatter = ValueFormatter::new(DateFormat::Custom("%d/%m/%Y".to_string()));
        assert_eq!(
            formatter.format_cell(&CellValue::Date(datetime(2025, 11, 20, 0, 0, 0))),
            "20/11/2025"
        );
    }
}
