//! Column Extractor
//!
//! デコード済みの行から固定位置の列を取り出し、各セルにリストリテラルの
//! 復元を適用する。

use tracing::debug;

use crate::api::ColumnSelection;
use crate::parser::parse_list_literal;
use crate::types::{CellValue, ExtractedColumn, ExtractionResult, Row};

/// 行リストから選択された列を抽出する
///
/// 行0はヘッダー行として常に読み飛ばします。行の長さが列位置に満たない場合、
/// そのセルは空文字列として扱います。空セルと、`0`・`NaN`・`false`の値も
/// 同様に空文字列になります。
///
/// # 引数
///
/// * `rows` - デコード済みの行（行0 = ヘッダー）
/// * `selection` - 抽出する列
/// * `source_name` - 入力ファイル名（レポートに記載）
///
/// # 戻り値
///
/// 各列の値の数がデータ行数（`rows.len() - 1`、空の場合は0）と等しい抽出結果
///
/// # 使用例
///
/// ```rust
/// use xlsxcolumns::{extract_columns, CellValue, ColumnSelection, ColumnSpec, RecoveredValue};
///
/// let rows = vec![
///     vec![CellValue::from("A"), CellValue::from("B"), CellValue::from("C")],
///     vec![CellValue::Empty, CellValue::Empty, CellValue::from("a")],
///     vec![CellValue::Empty, CellValue::Empty, CellValue::from("['x','y']")],
/// ];
/// let selection = ColumnSelection::new(vec![ColumnSpec::new(2, "C")]);
/// let result = extract_columns(&rows, &selection, "sheet.xlsx");
///
/// assert_eq!(result.total_rows(), 2);
/// assert_eq!(
///     result.column("C").unwrap(),
///     &[
///         RecoveredValue::Scalar(CellValue::from("a")),
///         RecoveredValue::List(vec!["x".to_string(), "y".to_string()]),
///     ]
/// );
/// ```
pub fn extract_columns(
    rows: &[Row],
    selection: &ColumnSelection,
    source_name: &str,
) -> ExtractionResult {
    let data_rows = rows.get(1..).unwrap_or(&[]);

    let columns: Vec<ExtractedColumn> = selection
        .iter()
        .map(|spec| ExtractedColumn {
            position: spec.position(),
            label: spec.label().to_string(),
            values: data_rows
                .iter()
                .map(|row| parse_list_literal(&cell_at(row, spec.position())))
                .collect(),
        })
        .collect();

    debug!(
        source = source_name,
        rows = data_rows.len(),
        columns = columns.len(),
        "extracted columns"
    );

    ExtractionResult {
        source_name: source_name.to_string(),
        total_rows: data_rows.len(),
        columns,
    }
}

/// 指定位置のセルを取得
///
/// 欠損セル・空セルに加え、偽とみなされる値（数値の`0`と`NaN`、論理値の`false`）も
/// 空文字列になります。
fn cell_at(row: &Row, position: usize) -> CellValue {
    match row.get(position) {
        None | Some(CellValue::Empty) | Some(CellValue::Bool(false)) => {
            CellValue::String(String::new())
        }
        Some(CellValue::Number(n)) if *n == 0.0 || n.is_nan() => CellValue::String(String::new()),
        Some(cell) => cell.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ColumnSpec;
    use crate::types::RecoveredValue;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    fn row_with(position: usize, value: CellValue) -> Row {
        let mut row = vec![CellValue::Empty; position];
        row.push(value);
        row
    }

    #[test]
    fn test_header_row_is_skipped() {
        let rows = vec![
            row_with(2, text("Expected Event Types")),
            row_with(2, text("a")),
            row_with(2, text("['x','y']")),
        ];
        let result = extract_columns(&rows, &ColumnSelection::default(), "events.xlsx");

        assert_eq!(result.total_rows(), 2);
        assert_eq!(result.source_name(), "events.xlsx");
        assert_eq!(
            result.column("Column C (Expected Event Types)").unwrap(),
            &[
                RecoveredValue::Scalar(text("a")),
                RecoveredValue::List(vec!["x".to_string(), "y".to_string()]),
            ]
        );
    }

    #[test]
    fn test_every_column_has_data_row_count() {
        let rows = vec![
            vec![text("h"); 11],
            vec![text("v"); 11],
            vec![text("v"); 3],
            Vec::new(),
        ];
        let result = extract_columns(&rows, &ColumnSelection::default(), "x.xlsx");

        assert_eq!(result.total_rows(), 3);
        assert_eq!(result.columns().len(), 8);
        for column in result.columns() {
            assert_eq!(column.values().len(), 3);
        }
    }

    #[test]
    fn test_missing_and_empty_cells_become_empty_strings() {
        let rows = vec![
            vec![text("h")],
            vec![CellValue::Empty, CellValue::Empty, CellValue::Empty],
            vec![text("short")],
        ];
        let selection = ColumnSelection::new(vec![ColumnSpec::new(2, "C")]);
        let result = extract_columns(&rows, &selection, "x.xlsx");

        assert_eq!(
            result.column("C").unwrap(),
            &[
                RecoveredValue::Scalar(text("")),
                RecoveredValue::Scalar(text("")),
            ]
        );
    }

    #[test]
    fn test_falsy_cells_become_empty_strings() {
        let rows = vec![
            vec![text("h")],
            vec![CellValue::Number(0.0)],
            vec![CellValue::Bool(false)],
            vec![CellValue::Number(f64::NAN)],
            vec![CellValue::Number(-0.0)],
        ];
        let selection = ColumnSelection::new(vec![ColumnSpec::new(0, "A")]);
        let result = extract_columns(&rows, &selection, "x.xlsx");

        assert_eq!(
            result.column("A").unwrap(),
            &[
                RecoveredValue::Scalar(text("")),
                RecoveredValue::Scalar(text("")),
                RecoveredValue::Scalar(text("")),
                RecoveredValue::Scalar(text("")),
            ]
        );
    }

    #[test]
    fn test_truthy_non_string_cells_are_kept() {
        let rows = vec![
            vec![text("h")],
            vec![CellValue::Number(3.0)],
            vec![CellValue::Bool(true)],
            vec![CellValue::Error("#N/A".to_string())],
        ];
        let selection = ColumnSelection::new(vec![ColumnSpec::new(0, "A")]);
        let result = extract_columns(&rows, &selection, "x.xlsx");

        assert_eq!(
            result.column("A").unwrap(),
            &[
                RecoveredValue::Scalar(CellValue::Number(3.0)),
                RecoveredValue::Scalar(CellValue::Bool(true)),
                RecoveredValue::Scalar(CellValue::Error("#N/A".to_string())),
            ]
        );
    }

    #[test]
    fn test_header_only_and_no_rows() {
        let header_only = vec![vec![text("h"); 11]];
        let result = extract_columns(&header_only, &ColumnSelection::default(), "x.xlsx");
        assert_eq!(result.total_rows(), 0);
        assert!(result.columns().iter().all(|c| c.values().is_empty()));

        let result = extract_columns(&[], &ColumnSelection::default(), "x.xlsx");
        assert_eq!(result.total_rows(), 0);
        assert_eq!(result.columns().len(), 8);
    }

    #[test]
    fn test_column_order_follows_selection() {
        let rows = vec![vec![text("h")], vec![text("a"), text("b")]];
        let selection = ColumnSelection::new(vec![
            ColumnSpec::new(1, "second"),
            ColumnSpec::new(0, "first"),
        ]);
        let result = extract_columns(&rows, &selection, "x.xlsx");

        let labels: Vec<&str> = result.columns().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["second", "first"]);
        assert_eq!(result.columns()[0].values()[0], RecoveredValue::Scalar(text("b")));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_cell() -> impl Strategy<Value = CellValue> {
            prop_oneof![
                Just(CellValue::Empty),
                any::<f64>().prop_map(CellValue::Number),
                "[a-z' \\[\\],]{0,12}".prop_map(CellValue::String),
            ]
        }

        proptest! {
            #[test]
            fn test_sequences_match_data_row_count(
                rows in proptest::collection::vec(proptest::collection::vec(arb_cell(), 0..14), 0..20)
            ) {
                let result = extract_columns(&rows, &ColumnSelection::default(), "p.xlsx");
                let expected = rows.len().saturating_sub(1);
                prop_assert_eq!(result.total_rows(), expected);
                for column in result.columns() {
                    prop_assert_eq!(column.values().len(), expected);
                }
            }
        }
    }
}
