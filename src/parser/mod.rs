//! Parser Module
//!
//! 行ソース（calamineによるワークブックのデコード）と
//! セル内リストリテラルの復元を提供します。

mod literal;
mod workbook;

pub use literal::parse_list_literal;
pub use workbook::{RowSource, WorkbookSource};
