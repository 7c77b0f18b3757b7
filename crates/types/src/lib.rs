//! # rowbook-types
//!
//! Value and record definitions shared across the rowbook crates.
//!
//! A [`Record`] is one input row: an insertion-ordered mapping from field name
//! to a typed [`Value`]. Records are usually built in code or decoded from JSON:
//!
//! ```
//! use rowbook_types::{Record, Value};
//!
//! let record = Record::new().with("name", "Alice").with("age", 30);
//! assert_eq!(record.get("age"), Some(&Value::Int(30)));
//!
//! let records = rowbook_types::records_from_json_str(r#"[{"a": 1, "b": [1, 2]}]"#).unwrap();
//! assert!(matches!(records[0].get("b"), Some(Value::Nested(_))));
//! ```

mod error;
mod record;
mod value;

pub use error::{RecordError, Result};
pub use record::{records_from_json_str, Record};
pub use value::{Value, ValueKind};
