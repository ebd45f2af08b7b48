//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

use crate::error::ExtractError;
use crate::formatter::ValueFormatter;
use crate::types::{CellValue, ExtractionResult, RecoveredValue};

/// 区切り線の幅
const SEPARATOR_WIDTH: usize = 80;

/// プレーンテキスト形式のフォーマッター
pub(crate) struct TextFormatter;

impl TextFormatter {
    pub fn render<W: Write>(
        &self,
        result: &ExtractionResult,
        generated_at: NaiveDateTime,
        values: &ValueFormatter,
        writer: &mut W,
    ) -> Result<(), ExtractError> {
        writeln!(writer, "Extracted Data from: {}", result.source_name())?;
        writeln!(writer, "Total Rows: {}", result.total_rows())?;
        writeln!(
            writer,
            "Generated on: {}",
            generated_at.format("%-m/%-d/%Y, %-I:%M:%S %p")
        )?;
        writeln!(writer)?;
        writeln!(writer, "{}", "=".repeat(SEPARATOR_WIDTH))?;
        writeln!(writer)?;

        for column in result.columns() {
            writeln!(writer, "{}:", column.label())?;
            writeln!(writer, "[")?;

            let last = column.values().len().saturating_sub(1);
            for (idx, value) in column.values().iter().enumerate() {
                match value {
                    RecoveredValue::List(items) => {
                        let quoted: Vec<String> =
                            items.iter().map(|item| format!("'{}'", item)).collect();
                        write!(writer, "  [{}]", quoted.join(", "))?;
                    }
                    RecoveredValue::Scalar(cell) => {
                        write!(writer, "  '{}'", values.format_cell(cell))?;
                    }
                }
                if idx < last {
                    write!(writer, ",")?;
                }
                writeln!(writer)?;
            }

            writeln!(writer, "]")?;
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    total_rows: usize,
    generated_at: String,
    columns: Vec<JsonColumn<'a>>,
}

#[derive(Serialize)]
struct JsonColumn<'a> {
    label: &'a str,
    column: String,
    values: Vec<Value>,
}

/// JSON形式のフォーマッター
pub(crate) struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        result: &ExtractionResult,
        generated_at: NaiveDateTime,
        values: &ValueFormatter,
        writer: &mut W,
    ) -> Result<(), ExtractError> {
        let report = JsonReport {
            source: result.source_name(),
            total_rows: result.total_rows(),
            generated_at: generated_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            columns: result
                .columns()
                .iter()
                .map(|column| JsonColumn {
                    label: column.label(),
                    column: column.letter(),
                    values: column
                        .values()
                        .iter()
                        .map(|value| json_value(value, values))
                        .collect(),
                })
                .collect(),
        };

        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}

fn json_value(value: &RecoveredValue, values: &ValueFormatter) -> Value {
    match value {
        RecoveredValue::List(items) => Value::from(items.clone()),
        RecoveredValue::Scalar(CellValue::Number(n)) => {
            serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number)
        }
        RecoveredValue::Scalar(CellValue::Bool(b)) => Value::Bool(*b),
        RecoveredValue::Scalar(cell) => Value::String(values.format_cell(cell)),
    }
}
