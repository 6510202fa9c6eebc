//! a1notation - Pure-Rust parser and formatter for spreadsheet A1 range notation
//!
//! スプレッドシートのセル・範囲参照（例: `Sheet1!A1:B2`, `'My Sheet'!A:A`, `A1`）を
//! 構造化された`Range`に変換し、またその逆を行うクレートです。
//!
//! # Quick Start
//!
//! ```rust
//! use a1notation::parse;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let range = parse("Sheet1!A1:B2")?;
//!
//!     assert_eq!(range.sheet_name(), Some("Sheet1"));
//!     assert_eq!(range.left(), Some(1));
//!     assert_eq!(range.top(), Some(1));
//!     assert_eq!(range.right(), Some(2));
//!     assert_eq!(range.bottom(), Some(2));
//!
//!     // 元の文字列に戻す
//!     assert_eq!(range.format(), "Sheet1!A1:B2");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Whole Rows and Columns
//!
//! 列または行だけを持つ範囲は、列全体・行全体を表します。
//!
//! ```rust
//! use a1notation::Range;
//!
//! # fn main() -> Result<(), a1notation::A1NotationError> {
//! let columns: Range = "'My Custom Sheet'!A:C".parse()?;
//! assert_eq!(columns.left(), Some(1));
//! assert_eq!(columns.right(), Some(3));
//! assert_eq!(columns.top(), None);
//!
//! let rows: Range = "2:5".parse()?;
//! assert_eq!(rows.sheet_name(), None);
//! assert_eq!(rows.to_string(), "2:5");
//! # Ok(())
//! # }
//! ```
//!
//! # Building Ranges
//!
//! ```rust
//! use a1notation::{Range, RangeBuilder};
//!
//! # fn main() -> Result<(), a1notation::A1NotationError> {
//! // 位置引数で指定（右端・下端を省略すると単一セル）
//! let cell = Range::new(Some("Sheet1"), Some(3), Some(2), None, None)?;
//! assert_eq!(cell.format(), "Sheet1!C2");
//!
//! // ビルダーで指定
//! let block = RangeBuilder::new()
//!     .with_sheet_name("A1")
//!     .with_columns(1, 2)
//!     .with_rows(1, 10)
//!     .build()?;
//! // セル参照に見えるシート名は引用符で囲まれる
//! assert_eq!(block.format(), "'A1'!A1:B10");
//! # Ok(())
//! # }
//! ```

mod column;
mod error;
mod parser;
mod range;
mod scanner;

// 公開API
pub use column::{decode_column, encode_column};
pub use error::A1NotationError;
pub use parser::parse;
pub use range::{escape_sheet_name, Range, RangeBuilder};
