//! Single- and multi-sheet write pipeline.
//!
//! Every call runs the same steps: pre-flight the sheet names, open one
//! codec, stream each sheet's records through header inference and cell
//! coercion, then persist the finished container atomically.

use crate::codec::XlsxCodec;
use crate::coerce::{coerce, Cell};
use crate::error::{Result, WriteError};
use crate::options::{StreamingPolicy, WriteOptions};
use crate::persist::persist_atomically;
use crate::schema::infer_header;
use crate::sheet_name::preflight_sheet_names;
use rowbook_types::Record;
use std::borrow::Borrow;
use std::path::Path;

/// What one sheet of a finished workbook holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    pub name: String,
    pub columns: usize,
    /// Rows written, header row included
    pub rows: u32,
}

impl SheetReport {
    /// Rows written below the header
    #[must_use]
    pub fn data_rows(&self) -> u32 {
        self.rows.saturating_sub(1)
    }
}

/// Summary of a successful write, sheets in output order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub sheets: Vec<SheetReport>,
}

/// Write `records` to a single-sheet workbook at `path`.
///
/// The sheet name is validated before anything touches the filesystem. A
/// non-empty `password` protects the sheet. The file at `path` exists after
/// the call only if the whole workbook was written.
///
/// # Example
/// ```no_run
/// use rowbook_writer::{write_sheet, Record};
///
/// let records: Vec<Record> = (0..10)
///     .map(|i| Record::new().with("a", i).with("b", "x"))
///     .collect();
/// write_sheet(&records, "out.xlsx", "Report", None).unwrap();
/// ```
pub fn write_sheet<I>(
    records: I,
    path: impl AsRef<Path>,
    sheet_name: &str,
    password: Option<&str>,
) -> Result<()>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    write_sheet_with_options(records, path, sheet_name, password, &WriteOptions::default())
        .map(|_| ())
}

/// Like [`write_sheet`], with explicit options and a report of what was written
pub fn write_sheet_with_options<I>(
    records: I,
    path: impl AsRef<Path>,
    sheet_name: &str,
    password: Option<&str>,
    options: &WriteOptions,
) -> Result<WriteReport>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    write_sheets_with_options(
        std::iter::once((sheet_name, records)),
        path,
        password,
        options,
    )
}

/// Write several named record sequences to one workbook at `path`.
///
/// Sheets appear in input order. Every name is checked before any sheet is
/// written: the first invalid name fails the call, then any name repeated
/// case-insensitively. `password` applies to every sheet.
pub fn write_sheets<S, N, I>(sheets: S, path: impl AsRef<Path>, password: Option<&str>) -> Result<()>
where
    S: IntoIterator<Item = (N, I)>,
    N: AsRef<str>,
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    write_sheets_with_options(sheets, path, password, &WriteOptions::default()).map(|_| ())
}

/// Like [`write_sheets`], with explicit options and a report of what was written
pub fn write_sheets_with_options<S, N, I>(
    sheets: S,
    path: impl AsRef<Path>,
    password: Option<&str>,
    options: &WriteOptions,
) -> Result<WriteReport>
where
    S: IntoIterator<Item = (N, I)>,
    N: AsRef<str>,
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    let path = path.as_ref();

    // Only the (name, source) pairs are collected; records stay lazy
    let sheets: Vec<(N, I)> = sheets.into_iter().collect();
    preflight_sheet_names(sheets.iter().map(|(name, _)| name.as_ref()))?;
    if sheets.is_empty() {
        return Err(WriteError::EmptyWorkbook);
    }

    tracing::debug!(
        "Writing {} sheet(s) to {} (constant_memory={})",
        sheets.len(),
        path.display(),
        options.streaming.constant_memory
    );

    let mut codec = XlsxCodec::new(options, password)?;
    let mut report = WriteReport::default();
    for (name, records) in sheets {
        let sheet = emit_sheet(&mut codec, name.as_ref(), records, &options.streaming)?;
        report.sheets.push(sheet);
    }

    persist_atomically(path, |tmp| codec.save(tmp))?;

    tracing::info!(
        "Wrote workbook {} with {} sheet(s)",
        path.display(),
        report.sheets.len()
    );
    Ok(report)
}

fn emit_sheet<I>(
    codec: &mut XlsxCodec,
    name: &str,
    records: I,
    policy: &StreamingPolicy,
) -> Result<SheetReport>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    let mut records = records.into_iter().peekable();
    let header = infer_header(&mut records);
    let mut sink = codec.add_sheet(name)?;

    // No columns means nothing to place; later records cannot add any
    if !header.is_empty() {
        sink.write_header(&header)?;

        let mut data_rows = 0usize;
        for record in records {
            let record: &Record = record.borrow();
            let row = sink.next_row()?;
            for (col, field) in header.iter().enumerate() {
                let cell = match record.get(field) {
                    Some(value) => coerce(value, field, name)?,
                    None => Cell::Blank,
                };
                sink.write_cell(row, col, cell)?;
            }

            data_rows += 1;
            if policy.progress_every > 0 && data_rows % policy.progress_every == 0 {
                tracing::debug!("Sheet '{}': {} rows written", name, data_rows);
            }
        }
    }

    let rows = sink.rows_written();
    sink.finish();
    tracing::debug!(
        "Finished sheet '{}': {} columns, {} rows",
        name,
        header.len(),
        rows
    );

    Ok(SheetReport {
        name: name.to_string(),
        columns: header.len(),
        rows,
    })
}
