//! Sheet name rules.
//!
//! The predicate and the [`WriteError::InvalidSheetName`] message describe the
//! same constraint; keep them in sync.

use crate::error::{Result, WriteError};
use std::collections::HashSet;

/// Maximum sheet name length, in characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters not allowed anywhere in a sheet name.
pub const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Return true if `name` is at most 31 characters and contains none of
/// `[ ] : * ? / \`
///
/// # Example
/// ```
/// use rowbook_writer::validate_sheet_name;
///
/// assert!(validate_sheet_name("Test"));
/// assert!(!validate_sheet_name("Test*"));
/// ```
#[must_use]
pub fn validate_sheet_name(name: &str) -> bool {
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return false;
    }
    !name.contains(&FORBIDDEN_SHEET_NAME_CHARS[..])
}

/// Like [`validate_sheet_name`], but returns the canonical error
pub fn check_sheet_name(name: &str) -> Result<()> {
    if validate_sheet_name(name) {
        Ok(())
    } else {
        Err(WriteError::InvalidSheetName {
            name: name.to_string(),
        })
    }
}

/// Pre-flight pass over every sheet name of a workbook, in input order.
///
/// All names are checked against [`validate_sheet_name`] first, so the first
/// invalid name wins over any duplicate that appears earlier.
pub(crate) fn preflight_sheet_names<'a, I>(names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let names = names.into_iter();

    for name in names.clone() {
        check_sheet_name(name)?;
    }

    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.to_lowercase()) {
            return Err(WriteError::DuplicateSheetName {
                name: name.to_string(),
            });
        }
    }

    Ok(())
}
