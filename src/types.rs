//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDateTime;

/// セルの値を表す列挙型
///
/// リストリテラルの復元対象になるのは`String`のみです。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 文字列
    String(String),

    /// 数値（f64）
    Number(f64),

    /// 日付・日時
    Date(NaiveDateTime),

    /// 論理値
    Bool(bool),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定（空セルまたは空文字列）
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// 文字列セルの場合は内容を返す
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// 1行分のセル（インデックス = 絶対列位置）
pub type Row = Vec<CellValue>;

/// リストリテラル復元の結果
///
/// 1セルにつき必ずどちらか一方の形になります。
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveredValue {
    /// 元のセル値（復元対象外、または復元失敗）
    Scalar(CellValue),

    /// 復元されたリスト
    List(Vec<String>),
}

impl RecoveredValue {
    pub fn is_list(&self) -> bool {
        matches!(self, RecoveredValue::List(_))
    }
}

/// 1列分の抽出結果
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedColumn {
    /// 列インデックス（0始まり）
    pub(crate) position: usize,

    /// 表示用ラベル
    pub(crate) label: String,

    /// データ行ごとの値（行順）
    pub(crate) values: Vec<RecoveredValue>,
}

impl ExtractedColumn {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[RecoveredValue] {
        &self.values
    }

    /// A1形式の列文字
    pub fn letter(&self) -> String {
        crate::api::col_index_to_letter(self.position)
    }
}

/// 抽出処理の結果
///
/// 生成後は変更されません。すべての列の値の数はデータ行数
/// （ヘッダー行を除く行数）と一致します。
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    /// 入力ファイル名
    pub(crate) source_name: String,

    /// データ行数（ヘッダー行を除く）
    pub(crate) total_rows: usize,

    /// 列選択の順序どおりの抽出結果
    pub(crate) columns: Vec<ExtractedColumn>,
}

impl ExtractionResult {
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn columns(&self) -> &[ExtractedColumn] {
        &self.columns
    }

    /// ラベルで列の値を取得する
    pub fn column(&self, label: &str) -> Option<&[RecoveredValue]> {
        self.columns
            .iter()
            .find(|column| column.label == label)
            .map(|column| column.values.as_slice())
    }

    /// 復元されたリストの総数（全列合計）
    pub fn recovered_list_count(&self) -> usize {
        self.columns
            .iter()
            .flat_map(|column| column.values.iter())
            .filter(|value| value.is_list())
            .count()
    }
}
