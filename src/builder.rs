//! Builder Module
//!
//! Fluent Builder APIを提供し、`Extractor`インスタンスを段階的に構築する。

use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, info};

use crate::api::{ColumnSelection, DateFormat, ReportFormat, SpreadsheetKind};
use crate::error::ExtractError;
use crate::extractor::extract_columns;
use crate::output::{report_file_name, ReportFormatter};
use crate::parser::{RowSource, WorkbookSource};
use crate::types::{ExtractionResult, Row};

/// 抽出処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ExtractionConfig {
    /// 抽出する列
    pub columns: ColumnSelection,

    /// 日付形式
    pub date_format: DateFormat,

    /// レポートの出力フォーマット
    pub report_format: ReportFormat,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            columns: ColumnSelection::default(),
            date_format: DateFormat::Iso8601,
            report_format: ReportFormat::Text,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcolumns::{ColumnSelection, ColumnSpec, ExtractorBuilder, ReportFormat};
///
/// # fn main() -> Result<(), xlsxcolumns::ExtractError> {
/// let extractor = ExtractorBuilder::new()
///     .with_columns(ColumnSelection::new(vec![
///         ColumnSpec::from_letter("C", "Event Types")?,
///         ColumnSpec::from_letter("D", "Trigger Texts")?,
///     ]))
///     .with_report_format(ReportFormat::Json)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtractorBuilder {
    /// 内部設定（構築中）
    config: ExtractionConfig,
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 列: C, D, E, F, H, I, J, K
    /// - 日付形式: ISO 8601
    /// - 出力フォーマット: テキスト
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// 抽出する列を指定する
    pub fn with_columns(mut self, columns: ColumnSelection) -> Self {
        self.config.columns = columns;
        self
    }

    /// 日付セルの出力形式を指定する
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// レポートの出力フォーマットを指定する
    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.config.report_format = format;
        self
    }

    /// 設定を検証し、`Extractor`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ExtractError::Config(String)`: 設定の検証に失敗した場合
    ///   * 列選択が空、ラベルが空、ラベルが重複
    ///   * カスタム日付形式が空、または不正な書式指定子を含む
    pub fn build(self) -> Result<Extractor, ExtractError> {
        // 1. 列選択の検証
        self.config.columns.validate()?;

        // 2. カスタム日付形式の検証
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            let invalid = || {
                ExtractError::Config(format!("Invalid date format string: '{}'", format_str))
            };
            if format_str.is_empty()
                || StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error))
            {
                return Err(invalid());
            }

            // オフセット指定子（%z など）は日付のみの値では出力できない
            let test_date = NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|d| d.and_hms_opt(12, 30, 45))
                .ok_or_else(|| ExtractError::Config("Failed to create test date".to_string()))?;
            let mut buffer = String::new();
            write!(buffer, "{}", test_date.format(format_str)).map_err(|_| invalid())?;
        }

        Ok(Extractor::new(self.config))
    }
}

/// 完成したレポート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// 推奨される出力ファイル名（例: `extracted_columns_events.txt`）
    pub file_name: String,

    /// レポート本文
    pub content: String,
}

/// 抽出処理のファサード
///
/// ファイル名の検証、デコード、列の抽出、レポートの生成を順に実行します。
/// 状態を持たないため、同じインスタンスで複数のファイルを処理できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs;
/// use xlsxcolumns::ExtractorBuilder;
///
/// # fn main() -> Result<(), xlsxcolumns::ExtractError> {
/// let extractor = ExtractorBuilder::new().build()?;
/// let report = extractor.convert_file("events.xlsx")?;
/// fs::write(&report.file_name, &report.content)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Extractor {
    config: ExtractionConfig,
    formatter: ReportFormatter,
}

impl Extractor {
    pub(crate) fn new(config: ExtractionConfig) -> Self {
        Self {
            formatter: ReportFormatter::new(config.report_format, config.date_format.clone()),
            config,
        }
    }

    pub fn columns(&self) -> &ColumnSelection {
        &self.config.columns
    }

    pub fn report_format(&self) -> ReportFormat {
        self.config.report_format
    }

    /// パスで指定されたExcelファイルから列を抽出する
    ///
    /// 拡張子の検証はファイルを開く前に行います。
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionResult, ExtractError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        SpreadsheetKind::from_file_name(&file_name)?;
        let input = File::open(path)?;
        self.extract_reader(input, &file_name)
    }

    /// リーダーからExcelファイルを読み込み、列を抽出する
    ///
    /// # 引数
    ///
    /// * `input` - Excelファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
    /// * `file_name` - 入力ファイル名（拡張子の検証とレポートに使用）
    ///
    /// # 戻り値
    ///
    /// * `Ok(ExtractionResult)` - 抽出に成功した場合
    /// * `Err(ExtractError::UnsupportedFormat)` - 拡張子が`.xlsx` / `.xls`以外
    /// * `Err(ExtractError::Parse)` - デコードに失敗した場合
    pub fn extract_reader<R: Read + Seek>(
        &self,
        input: R,
        file_name: &str,
    ) -> Result<ExtractionResult, ExtractError> {
        let kind = SpreadsheetKind::from_file_name(file_name)?;
        debug!(file = file_name, ?kind, "opening workbook");

        let source = WorkbookSource::open(input)?;
        self.extract_source(source, file_name)
    }

    /// 任意の行ソースから列を抽出する
    pub fn extract_source<S: RowSource>(
        &self,
        source: S,
        file_name: &str,
    ) -> Result<ExtractionResult, ExtractError> {
        let rows: Vec<Row> = source.decode()?;
        let result = extract_columns(&rows, &self.config.columns, file_name);

        info!(
            file = file_name,
            rows = result.total_rows(),
            lists = result.recovered_list_count(),
            "extraction completed"
        );
        Ok(result)
    }

    /// 抽出結果をレポート文書に変換する（生成日時は現在のローカル時刻）
    pub fn render(&self, result: &ExtractionResult) -> Result<Report, ExtractError> {
        self.render_at(result, Local::now().naive_local())
    }

    /// 抽出結果を指定した生成日時でレポート文書に変換する
    pub fn render_at(
        &self,
        result: &ExtractionResult,
        generated_at: NaiveDateTime,
    ) -> Result<Report, ExtractError> {
        let content = self.formatter.render_to_string(result, generated_at)?;
        Ok(Report {
            file_name: report_file_name(result.source_name(), self.config.report_format),
            content,
        })
    }

    /// Excelファイルを読み込み、レポートを生成する
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<Report, ExtractError> {
        let result = self.extract_file(path)?;
        self.render(&result)
    }

    /// リーダーからExcelファイルを読み込み、レポートを生成する
    pub fn convert<R: Read + Seek>(&self, input: R, file_name: &str) -> Result<Report, ExtractError> {
        let result = self.extract_reader(input, file_name)?;
        self.render(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ColumnSpec;
    use crate::types::CellValue;
    use std::io::Cursor;

    #[test]
    fn test_builder_defaults() {
        let builder = ExtractorBuilder::new();
        assert_eq!(builder.config.columns, ColumnSelection::default());
        assert_eq!(builder.config.date_format, DateFormat::Iso8601);
        assert_eq!(builder.config.report_format, ReportFormat::Text);
    }

    #[test]
    fn test_builder_method_chaining() {
        let extractor = ExtractorBuilder::new()
            .with_columns(ColumnSelection::new(vec![ColumnSpec::new(0, "A")]))
            .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()))
            .with_report_format(ReportFormat::Json)
            .build()
            .unwrap();

        assert_eq!(extractor.columns().len(), 1);
        assert_eq!(extractor.report_format(), ReportFormat::Json);
    }

    #[test]
    fn test_build_with_empty_columns() {
        let result = ExtractorBuilder::new()
            .with_columns(ColumnSelection::new(vec![]))
            .build();
        assert!(matches!(result, Err(ExtractError::Config(_))));
    }

    #[test]
    fn test_build_with_invalid_custom_date_format() {
        for format in ["", "%Q", "%z", "%Y-%m-%d %:z", "%Z"] {
            let result = ExtractorBuilder::new()
                .with_date_format(DateFormat::Custom(format.to_string()))
                .build();
            match result {
                Err(ExtractError::Config(msg)) => assert!(msg.contains("Invalid date format")),
                _ => panic!("Expected Config error for '{}'", format),
            }
        }
    }

    #[test]
    fn test_unsupported_extension_is_rejected_before_decoding() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        // 内容は不正だが、拡張子の検証が先に行われる
        let result = extractor.extract_reader(Cursor::new(Vec::new()), "notes.csv");
        match result {
            Err(ExtractError::UnsupportedFormat { file_name }) => assert_eq!(file_name, "notes.csv"),
            _ => panic!("Expected UnsupportedFormat"),
        }
    }

    #[test]
    fn test_extract_file_rejects_extension_without_opening() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        let result = extractor.extract_file("does/not/exist.txt");
        assert!(matches!(result, Err(ExtractError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_corrupt_workbook_is_a_decode_failure() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        let result = extractor.extract_reader(Cursor::new(b"garbage".to_vec()), "broken.xlsx");
        assert!(matches!(result, Err(ExtractError::Parse(_))));
    }

    #[test]
    fn test_extract_source_and_render() {
        let extractor = ExtractorBuilder::new()
            .with_columns(ColumnSelection::new(vec![ColumnSpec::new(2, "C")]))
            .build()
            .unwrap();

        let rows: Vec<Row> = vec![
            vec![CellValue::Empty, CellValue::Empty, CellValue::from("header")],
            vec![CellValue::Empty, CellValue::Empty, CellValue::from("a")],
            vec![CellValue::Empty, CellValue::Empty, CellValue::from("['x','y']")],
        ];
        let result = extractor.extract_source(rows, "sheet.xlsx").unwrap();
        assert_eq!(result.total_rows(), 2);

        let generated_at = chrono::NaiveDate::from_ymd_opt(2025, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .unwrap();
        let report = extractor.render_at(&result, generated_at).unwrap();

        assert_eq!(report.file_name, "extracted_columns_sheet.txt");
        assert!(report.content.contains("Generated on: 12/31/2025, 11:59:59 PM\n"));
        assert!(report.content.contains("C:\n[\n  'a',\n  ['x', 'y']\n]\n"));
    }

    #[test]
    fn test_render_is_deterministic_for_fixed_timestamp() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        let result = extractor.extract_source(Vec::<Row>::new(), "empty.xlsx").unwrap();
        let generated_at = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap();

        let first = extractor.render_at(&result, generated_at).unwrap();
        let second = extractor.render_at(&result, generated_at).unwrap();
        assert_eq!(first, second);
    }
}
