//! Output Format Module
//!
//! 抽出結果をレポート文書に変換する出力フォーマットを提供するモジュール。

mod formatters;

use chrono::NaiveDateTime;
use std::io::Write;

use crate::api::{DateFormat, ReportFormat};
use crate::error::ExtractError;
use crate::formatter::ValueFormatter;
use crate::types::ExtractionResult;

pub(crate) use formatters::{JsonFormatter, TextFormatter};

/// レポートフォーマッター
///
/// 同じ抽出結果からは、生成日時を除いてバイト単位で同一の出力を生成します。
///
/// # 使用例
///
/// ```rust
/// use chrono::NaiveDate;
/// use xlsxcolumns::{extract_columns, ColumnSelection, DateFormat, ReportFormat, ReportFormatter};
///
/// # fn main() -> Result<(), xlsxcolumns::ExtractError> {
/// let result = extract_columns(&[], &ColumnSelection::default(), "empty.xlsx");
/// let generated_at = NaiveDate::from_ymd_opt(2025, 1, 2)
///     .and_then(|d| d.and_hms_opt(15, 4, 5))
///     .unwrap();
///
/// let formatter = ReportFormatter::new(ReportFormat::Text, DateFormat::Iso8601);
/// let report = formatter.render_to_string(&result, generated_at)?;
/// assert!(report.starts_with("Extracted Data from: empty.xlsx\nTotal Rows: 0\n"));
/// assert!(report.contains("Generated on: 1/2/2025, 3:04:05 PM\n"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    format: ReportFormat,
    values: ValueFormatter,
}

impl ReportFormatter {
    pub fn new(format: ReportFormat, date_format: DateFormat) -> Self {
        Self {
            format,
            values: ValueFormatter::new(date_format),
        }
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// 抽出結果を指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `result` - 抽出結果
    /// * `generated_at` - レポートに記載する生成日時（ローカル時刻）
    /// * `writer` - 出力先のライター
    pub fn render<W: Write>(
        &self,
        result: &ExtractionResult,
        generated_at: NaiveDateTime,
        writer: &mut W,
    ) -> Result<(), ExtractError> {
        match self.format {
            ReportFormat::Text => TextFormatter.render(result, generated_at, &self.values, writer),
            ReportFormat::Json => JsonFormatter.render(result, generated_at, &self.values, writer),
        }
    }

    /// 抽出結果を文字列として出力する
    pub fn render_to_string(
        &self,
        result: &ExtractionResult,
        generated_at: NaiveDateTime,
    ) -> Result<String, ExtractError> {
        let mut buffer = Vec::new();
        self.render(result, generated_at, &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| {
            ExtractError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(ReportFormat::Text, DateFormat::Iso8601)
    }
}

/// 出力ファイル名を生成する
///
/// 入力ファイル名の最後の拡張子を取り除き、`extracted_columns_`を前置します。
///
/// ```rust
/// use xlsxcolumns::{report_file_name, ReportFormat};
///
/// assert_eq!(
///     report_file_name("events.v2.xlsx", ReportFormat::Text),
///     "extracted_columns_events.v2.txt"
/// );
/// ```
pub fn report_file_name(source_name: &str, format: ReportFormat) -> String {
    format!(
        "extracted_columns_{}.{}",
        strip_extension(source_name),
        format.extension()
    )
}

/// 最後の拡張子（`.`に続く1文字以上の`.`と`/`以外の文字列）を取り除く
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => {
            let ext = &name[idx + 1..];
            if ext.is_empty() || ext.contains('/') {
                name
            } else {
                &name[..idx]
            }
        }
        None => name,
    }
}
