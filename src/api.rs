//! Public API Types
//!
//! 公開APIで使用する設定型を定義するモジュール。

use crate::error::ExtractError;

/// 抽出対象の列（位置とラベルの組）
///
/// `position`はシート上の絶対列インデックス（0始まり、A列 = 0）です。
/// ヘッダー行のテキストからは決定されません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    position: usize,
    label: String,
}

impl ColumnSpec {
    /// 列インデックスとラベルから生成する
    pub fn new(position: usize, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }

    /// A1形式の列文字（例: `"C"`, `"AA"`）から生成する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxcolumns::ColumnSpec;
    ///
    /// let spec = ColumnSpec::from_letter("K", "Column K (Argument Texts)").unwrap();
    /// assert_eq!(spec.position(), 10);
    /// ```
    pub fn from_letter(letter: &str, label: impl Into<String>) -> Result<Self, ExtractError> {
        let position = letter_to_col_index(letter).ok_or_else(|| {
            ExtractError::Config(format!("Invalid column letter: '{}'", letter))
        })?;
        Ok(Self::new(position, label))
    }

    /// 列インデックス（0始まり）
    pub fn position(&self) -> usize {
        self.position
    }

    /// 表示用ラベル
    pub fn label(&self) -> &str {
        &self.label
    }

    /// A1形式の列文字
    pub fn letter(&self) -> String {
        col_index_to_letter(self.position)
    }
}

/// 抽出する列の固定リスト
///
/// 順序はレポートの出力順序になります。デフォルトは C, D, E, F, H, I, J, K の8列です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    columns: Vec<ColumnSpec>,
}

impl ColumnSelection {
    /// 任意の列リストから生成する（検証は`ExtractorBuilder::build()`で行う）
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnSpec> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 空でないこと、ラベルが空でなく重複しないことを検証する
    pub(crate) fn validate(&self) -> Result<(), ExtractError> {
        if self.columns.is_empty() {
            return Err(ExtractError::Config(
                "Column selection is empty".to_string(),
            ));
        }

        for (idx, spec) in self.columns.iter().enumerate() {
            if spec.label.trim().is_empty() {
                return Err(ExtractError::Config(format!(
                    "Column {} has an empty label",
                    spec.letter()
                )));
            }
            if self.columns[..idx].iter().any(|other| other.label == spec.label) {
                return Err(ExtractError::Config(format!(
                    "Duplicate column label: '{}'",
                    spec.label
                )));
            }
        }

        Ok(())
    }
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self::new(vec![
            ColumnSpec::new(2, "Column C (Expected Event Types)"),
            ColumnSpec::new(3, "Column D (Expected Trigger Texts)"),
            ColumnSpec::new(4, "Column E (Expected Arguments Roles)"),
            ColumnSpec::new(5, "Column F (Expected Argument Texts)"),
            ColumnSpec::new(7, "Column H (Event Types)"),
            ColumnSpec::new(8, "Column I (Trigger Texts)"),
            ColumnSpec::new(9, "Column J (Argument Roles)"),
            ColumnSpec::new(10, "Column K (Argument Texts)"),
        ])
    }
}

impl<'a> IntoIterator for &'a ColumnSelection {
    type Item = &'a ColumnSpec;
    type IntoIter = std::slice::Iter<'a, ColumnSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// 日付セルの出力形式
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DateFormat {
    /// ISO 8601形式
    ///
    /// 時刻部分が0の場合は`2025-11-20`、それ以外は`2025-11-20T09:30:00`
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// 例: `DateFormat::Custom("%d/%m/%Y".to_string())`
    Custom(String),
}

/// レポートの出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportFormat {
    /// プレーンテキスト（デフォルト）
    ///
    /// ```text
    /// Column C (Expected Event Types):
    /// [
    ///   'a',
    ///   ['x', 'y']
    /// ]
    /// ```
    Text,

    /// JSON形式
    ///
    /// 復元されたリストは配列、その他の値はJSONのスカラー値として出力します。
    Json,
}

impl ReportFormat {
    /// 出力ファイル名の拡張子
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// 受け付けるスプレッドシート形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetKind {
    /// Office Open XML（`.xlsx`）
    Xlsx,
    /// BIFF（`.xls`）
    Xls,
}

impl SpreadsheetKind {
    /// ファイル名の拡張子から形式を判定する
    ///
    /// 拡張子の比較は大文字・小文字を区別します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(SpreadsheetKind)` - `.xlsx`または`.xls`で終わる場合
    /// * `Err(ExtractError::UnsupportedFormat)` - それ以外の場合
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        if file_name.ends_with(".xlsx") {
            Ok(SpreadsheetKind::Xlsx)
        } else if file_name.ends_with(".xls") {
            Ok(SpreadsheetKind::Xls)
        } else {
            Err(ExtractError::UnsupportedFormat {
                file_name: file_name.to_string(),
            })
        }
    }
}

/// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
pub(crate) fn col_index_to_letter(mut col: usize) -> String {
    let mut result = String::new();
    loop {
        let remainder = col % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result
}

/// 列文字を列インデックスに変換（"A" -> 0, "AA" -> 26）
fn letter_to_col_index(letter: &str) -> Option<usize> {
    if letter.is_empty() || letter.len() > 3 {
        return None;
    }

    let mut index = 0usize;
    for ch in letter.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let value = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index * 26 + value;
    }
    Some(index - 1)
}
