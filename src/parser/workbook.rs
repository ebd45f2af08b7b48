//! Workbook Row Source
//!
//! calamineを使用して、ワークブックの最初のシートを行の列に展開する。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use std::io::{Cursor, Read, Seek};
use tracing::debug;

use crate::error::ExtractError;
use crate::security::SecurityConfig;
use crate::types::{CellValue, Row};

/// 行データの供給元
///
/// 抽出処理は、このトレイトを通じてデコード済みのグリッドを受け取ります。
/// 行0はヘッダー行として扱われます。
pub trait RowSource {
    /// 最初のシートの全行を返す
    fn decode(self) -> Result<Vec<Row>, ExtractError>;
}

impl RowSource for Vec<Row> {
    fn decode(self) -> Result<Vec<Row>, ExtractError> {
        Ok(self)
    }
}

/// calamineによるワークブックの行ソース
///
/// XLSX / XLS の判定はファイル内容から行います。
pub struct WorkbookSource {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookSource {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - Excelファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookSource)` - ワークブックの読み込みに成功した場合
    /// * `Err(ExtractError::SecurityViolation)` - 入力サイズが上限を超える場合
    /// * `Err(ExtractError::Parse)` - ファイルが破損している、またはExcel形式でない場合
    pub fn open<R: Read + Seek>(reader: R) -> Result<Self, ExtractError> {
        Self::open_with_config(reader, &SecurityConfig::default())
    }

    pub(crate) fn open_with_config<R: Read + Seek>(
        mut reader: R,
        security_config: &SecurityConfig,
    ) -> Result<Self, ExtractError> {
        // セキュリティ: ファイルサイズ制限を適用
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;
        security_config.check_input_size(bytes_read as u64)?;

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        Ok(Self { workbook })
    }

    /// シート名の一覧
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }
}

impl RowSource for WorkbookSource {
    fn decode(mut self) -> Result<Vec<Row>, ExtractError> {
        let names = self.sheet_names();
        let sheet_name = names
            .first()
            .cloned()
            .ok_or(calamine::Error::Msg("Workbook contains no sheets"))?;
        if names.len() > 1 {
            debug!(skipped = ?&names[1..], "only the first sheet is decoded");
        }

        let range = self
            .workbook
            .worksheet_range_at(0)
            .ok_or(calamine::Error::Msg("Workbook contains no sheets"))??;

        let rows = range_to_rows(&range);
        debug!(sheet = %sheet_name, rows = rows.len(), "decoded first sheet");
        Ok(rows)
    }
}

/// calamineの範囲を絶対座標の行リストに変換する
///
/// 使用範囲がA1から始まらない場合、先頭の行と列を空セルで埋めます。
fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Row> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Empty; start_col as usize];
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }
    rows
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::Date(datetime),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::String(s.clone())),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
