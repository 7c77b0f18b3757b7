//! # rowbook-writer
//!
//! Streams loosely-typed records into XLSX workbooks.
//!
//! Each sheet takes its header from the keys of its first record. Every later
//! record becomes one row in input order: fields missing from a record leave a
//! blank cell and fields outside the header are ignored. Records are pulled
//! lazily in a single pass, so a sheet never needs to be fully materialized.
//!
//! Writes are all-or-nothing. Sheet names are checked before any I/O and the
//! finished container is renamed into place only once every sheet is written.
//!
//! ## Writing one sheet
//!
//! ```no_run
//! use rowbook_writer::{write_sheet, Record};
//!
//! let records = vec![
//!     Record::new().with("a", "1").with("b", "2"),
//!     Record::new().with("a", "3").with("b", "4"),
//! ];
//! write_sheet(&records, "out.xlsx", "Report", Some("secret")).unwrap();
//! ```
//!
//! ## Writing several sheets
//!
//! ```no_run
//! use rowbook_writer::{write_sheets, Record};
//!
//! // Sources can be lazy; each is consumed once, in sheet order
//! let source = |start: i64| (start..1_000).step_by(2).map(|i| Record::new().with("n", i));
//! write_sheets([("Evens", source(0)), ("Odds", source(1))], "book.xlsx", None).unwrap();
//! ```
//!
//! ## Checking a name up front
//!
//! ```
//! use rowbook_writer::validate_sheet_name;
//!
//! assert!(validate_sheet_name("Q1 Sales"));
//! assert!(!validate_sheet_name("Q1/Q2"));
//! ```

mod codec;
mod coerce;
mod error;
mod options;
mod persist;
mod schema;
mod sheet_name;
mod writer;

pub use codec::{MAX_COLUMNS, MAX_ROWS, MAX_STRING_LEN};
pub use coerce::{coerce, Cell, MAX_DATE_YEAR, MAX_EXACT_INT, MIN_DATE_YEAR};
pub use error::{Result, WriteError};
pub use options::{StreamingPolicy, WriteOptions};
pub use rowbook_types::{Record, Value, ValueKind};
pub use schema::{infer_header, Header};
pub use sheet_name::{
    check_sheet_name, validate_sheet_name, FORBIDDEN_SHEET_NAME_CHARS, MAX_SHEET_NAME_LEN,
};
pub use writer::{
    write_sheet, write_sheet_with_options, write_sheets, write_sheets_with_options, SheetReport,
    WriteReport,
};
