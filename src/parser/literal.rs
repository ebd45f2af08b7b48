//! List Literal Parser
//!
//! セル内に文字列として保存されたリストリテラル（例: `"['Add', 'Stir']"`）を
//! 文字列のリストに復元する。
//!
//! 復元は単純な置換ヒューリスティックで行います。シングルクォートをすべて
//! ダブルクォートに置き換え、厳密なJSON配列としてパースします。要素内の
//! アポストロフィやエスケープされたクォートは考慮しないため、
//! `"['It's ok']"`のような値は復元に失敗し、元の文字列のまま返されます。

use serde_json::Value;

use crate::formatter::format_number;
use crate::types::{CellValue, RecoveredValue};

/// セル値からリストリテラルを復元する
///
/// # 引数
///
/// * `cell` - 抽出対象のセル値
///
/// # 戻り値
///
/// * `RecoveredValue::List` - 前後の空白を除いた文字列が`[`で始まり`]`で終わり、
///   クォート置換後にJSON配列としてパースできた場合
/// * `RecoveredValue::Scalar` - それ以外（文字列以外のセル、復元失敗）。
///   値はトリム前の元の値のまま
///
/// 復元の失敗はエラーとして扱いません。
///
/// # 使用例
///
/// ```rust
/// use xlsxcolumns::{parse_list_literal, CellValue, RecoveredValue};
///
/// let value = parse_list_literal(&CellValue::from("['Add', 'Stir']"));
/// assert_eq!(
///     value,
///     RecoveredValue::List(vec!["Add".to_string(), "Stir".to_string()])
/// );
///
/// let value = parse_list_literal(&CellValue::from("[unterminated"));
/// assert_eq!(value, RecoveredValue::Scalar(CellValue::from("[unterminated")));
/// ```
pub fn parse_list_literal(cell: &CellValue) -> RecoveredValue {
    match cell.as_str().and_then(recover_list) {
        Some(items) => RecoveredValue::List(items),
        None => RecoveredValue::Scalar(cell.clone()),
    }
}

fn recover_list(text: &str) -> Option<Vec<String>> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
        return None;
    }

    let normalized = trimmed.replace('\'', "\"");
    match serde_json::from_str::<Value>(&normalized) {
        Ok(Value::Array(elements)) => Some(elements.iter().map(element_text).collect()),
        _ => None,
    }
}

/// JSON配列の要素を文字列に変換する
///
/// 数値は最短の10進表記（`1.0` → `1`、`1e2` → `100`）、真偽値・`null`はその
/// 表記、入れ子の配列は要素をカンマで連結（入れ子内の`null`は空文字列）、
/// オブジェクトはコンパクトなJSON表記になります。
fn element_text(element: &Value) -> String {
    match element {
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => element_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
