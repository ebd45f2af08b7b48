//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxcolumnsクレート全体で使用するエラー型
///
/// ファイル名の検証、ワークブックのデコード、レポート出力の各段階で
/// 発生するエラーを統一的に扱います。
///
/// リストリテラルの復元失敗はエラーではありません。該当セルは
/// 元の値のまま出力されます。
///
/// # エラーの種類
///
/// - `UnsupportedFormat`: 拡張子が`.xlsx` / `.xls`以外
/// - `Parse`: ワークブックのデコードに失敗（calamine由来）
/// - `Io`: I/O操作中に発生したエラー
/// - `Config`: ビルダー設定の検証に失敗
/// - `SecurityViolation`: 入力サイズ制限に違反
/// - `Json`: JSONレポートのシリアライズに失敗
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxcolumns::{ExtractError, ExtractorBuilder};
///
/// # fn main() -> Result<(), ExtractError> {
/// let extractor = ExtractorBuilder::new().build()?;
/// match extractor.extract_file("notes.csv") {
///     Err(ExtractError::UnsupportedFormat { file_name }) => {
///         eprintln!("rejected: {}", file_name);
///     }
///     other => {
///         other?;
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum ExtractError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックのデコード中に発生したエラー
    ///
    /// 破損したファイル、シートのないワークブックなどが原因となります。
    /// 発生した時点で処理は中断され、抽出結果は生成されません。
    #[error("Error processing file: {0}")]
    Parse(#[from] calamine::Error),

    /// サポートされていないファイル形式
    ///
    /// ファイル名が`.xlsx`または`.xls`で終わらない場合に、デコード前に返されます。
    #[error("Please upload a valid Excel file (.xlsx or .xls): {file_name}")]
    UnsupportedFormat {
        /// 拒否されたファイル名
        file_name: String,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtractorBuilder::build()`時に、空の列選択や重複したラベルなどが
    /// 検出された場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// JSONレポートの生成エラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
