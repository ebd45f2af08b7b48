//! xlsxcolumns - Extract fixed Excel columns and recover list literals
//!
//! This crate reads the first sheet of an Excel workbook (XLSX or XLS), extracts a
//! fixed set of columns (C, D, E, F, H, I, J, K by default), skips the header row,
//! and recovers list values that were stored as bracketed string literals such as
//! `"['Add', 'Stir']"`. The result is rendered as a plain-text report.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs;
//! use xlsxcolumns::ExtractorBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new().build()?;
//!
//!     // Decode, extract and render in one step
//!     let report = extractor.convert_file("events.xlsx")?;
//!
//!     // report.file_name == "extracted_columns_events.txt"
//!     fs::write(&report.file_name, &report.content)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Working with the extraction result
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxcolumns::{ExtractorBuilder, RecoveredValue};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = ExtractorBuilder::new().build()?;
//! let result = extractor.extract_reader(File::open("events.xlsx")?, "events.xlsx")?;
//!
//! for column in result.columns() {
//!     for value in column.values() {
//!         if let RecoveredValue::List(items) = value {
//!             println!("{}: {:?}", column.label(), items);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Without a workbook
//!
//! The pipeline pieces are plain functions over already-decoded rows:
//!
//! ```rust
//! use xlsxcolumns::{parse_list_literal, CellValue, RecoveredValue};
//!
//! assert_eq!(
//!     parse_list_literal(&CellValue::from("['Add', 'Stir']")),
//!     RecoveredValue::List(vec!["Add".to_string(), "Stir".to_string()])
//! );
//! ```

mod api;
mod builder;
mod error;
mod extractor;
mod formatter;
mod output;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{ColumnSelection, ColumnSpec, DateFormat, ReportFormat, SpreadsheetKind};
pub use builder::{Extractor, ExtractorBuilder, Report};
pub use error::ExtractError;
pub use extractor::extract_columns;
pub use output::{report_file_name, ReportFormatter};
pub use parser::{parse_list_literal, RowSource, WorkbookSource};
pub use types::{CellValue, ExtractedColumn, ExtractionResult, RecoveredValue, Row};
