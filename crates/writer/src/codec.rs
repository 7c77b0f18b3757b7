//! Workbook codec adapter over `rust_xlsxwriter`.
//!
//! Owns the in-progress [`Workbook`] for exactly one write call. Nothing
//! reaches the destination path until [`XlsxCodec::save`] runs inside
//! [`crate::persist`].

use crate::coerce::Cell;
use crate::error::{Result, WriteError};
use crate::options::WriteOptions;
use crate::schema::Header;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet};
use std::borrow::Cow;
use std::path::Path;

/// Rows per worksheet, header included.
pub const MAX_ROWS: u32 = 1_048_576;
/// Columns per worksheet.
pub const MAX_COLUMNS: u16 = 16_384;
/// Characters per string cell; longer text is truncated.
pub const MAX_STRING_LEN: usize = 32_767;

struct CellFormats {
    header: Option<Format>,
    date: Format,
    datetime: Format,
    time: Format,
}

pub(crate) struct XlsxCodec {
    workbook: Workbook,
    formats: CellFormats,
    password: Option<String>,
    constant_memory: bool,
    autofit: bool,
}

impl XlsxCodec {
    /// `password` protects every worksheet added afterwards; empty means none.
    pub(crate) fn new(options: &WriteOptions, password: Option<&str>) -> Result<Self> {
        let mut workbook = Workbook::new();
        if let Some(dir) = &options.streaming.tempdir {
            workbook.set_tempdir(dir)?;
        }

        Ok(XlsxCodec {
            workbook,
            formats: CellFormats {
                header: options.bold_header.then(|| Format::new().set_bold()),
                date: Format::new().set_num_format(&options.date_format),
                datetime: Format::new().set_num_format(&options.datetime_format),
                time: Format::new().set_num_format(&options.time_format),
            },
            password: password.filter(|p| !p.is_empty()).map(str::to_string),
            constant_memory: options.streaming.constant_memory,
            autofit: options.autofit,
        })
    }

    /// Append a worksheet named `name`; sheets keep the order they are added in.
    pub(crate) fn add_sheet<'a>(&'a mut self, name: &'a str) -> Result<SheetSink<'a>> {
        let worksheet = if self.constant_memory {
            self.workbook.add_worksheet_with_constant_memory()
        } else {
            self.workbook.add_worksheet()
        };
        worksheet.set_name(name)?;
        if let Some(password) = &self.password {
            worksheet.protect_with_password(password);
        }

        Ok(SheetSink {
            worksheet,
            formats: &self.formats,
            // Constant-memory sheets only hold the current row, so widths
            // would be measured from the last row alone
            autofit: self.autofit && !self.constant_memory,
            sheet: name,
            cursor: 0,
        })
    }

    /// Encode the whole container to `path`.
    pub(crate) fn save(mut self, path: &Path) -> Result<()> {
        self.workbook.save(path).map_err(|err| match err {
            rust_xlsxwriter::XlsxError::IoError(source) => WriteError::io(path, source),
            other => WriteError::Codec(other),
        })
    }
}

/// Row-by-row writer for one worksheet; rows must arrive in order.
pub(crate) struct SheetSink<'a> {
    worksheet: &'a mut Worksheet,
    formats: &'a CellFormats,
    autofit: bool,
    sheet: &'a str,
    cursor: u32,
}

impl SheetSink<'_> {
    pub(crate) fn write_header(&mut self, header: &Header) -> Result<()> {
        if header.len() > usize::from(MAX_COLUMNS) {
            return Err(WriteError::TooManyColumns {
                sheet: self.sheet.to_string(),
                columns: header.len(),
                limit: MAX_COLUMNS,
            });
        }

        let row = self.next_row()?;
        for (col, name) in header.iter().enumerate() {
            let col = col as ColNum;
            let text = truncate_text(name);
            match &self.formats.header {
                Some(format) => self.worksheet.write_string_with_format(row, col, text, format)?,
                None => self.worksheet.write_string(row, col, text)?,
            };
        }
        Ok(())
    }

    /// Reserve the next row index, enforcing the per-sheet row limit.
    pub(crate) fn next_row(&mut self) -> Result<RowNum> {
        if self.cursor >= MAX_ROWS {
            return Err(WriteError::TooManyRows {
                sheet: self.sheet.to_string(),
                limit: MAX_ROWS,
            });
        }
        let row = self.cursor;
        self.cursor += 1;
        Ok(row)
    }

    pub(crate) fn write_cell(&mut self, row: RowNum, col: usize, cell: Cell<'_>) -> Result<()> {
        let col = col as ColNum;
        match cell {
            Cell::Blank => return Ok(()),
            Cell::Bool(b) => self.worksheet.write_boolean(row, col, b)?,
            Cell::Number(n) => self.worksheet.write_number(row, col, n)?,
            Cell::String(s) => self.worksheet.write_string(row, col, truncate_text(&s))?,
            Cell::Date(d) => {
                self.worksheet
                    .write_datetime_with_format(row, col, &d, &self.formats.date)?
            }
            Cell::DateTime(dt) => {
                self.worksheet
                    .write_datetime_with_format(row, col, &dt, &self.formats.datetime)?
            }
            Cell::Time(t) => {
                self.worksheet
                    .write_datetime_with_format(row, col, &t, &self.formats.time)?
            }
        };
        Ok(())
    }

    /// Number of rows written so far, header included.
    pub(crate) fn rows_written(&self) -> u32 {
        self.cursor
    }

    pub(crate) fn finish(self) {
        if self.autofit {
            self.worksheet.autofit();
        }
    }
}

fn truncate_text(text: &str) -> Cow<'_, str> {
    // Byte length bounds char count, so most strings skip the scan
    if text.len() <= MAX_STRING_LEN || text.chars().count() <= MAX_STRING_LEN {
        return Cow::Borrowed(text);
    }
    tracing::warn!(
        "Truncating string cell of {} characters to {}",
        text.chars().count(),
        MAX_STRING_LEN
    );
    Cow::Owned(text.chars().take(MAX_STRING_LEN).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::StreamingPolicy;

    #[test]
    fn test_truncate_short_text_borrows() {
        assert!(matches!(truncate_text("abc"), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "x".repeat(MAX_STRING_LEN + 10);
        let out = truncate_text(&long);
        assert_eq!(out.chars().count(), MAX_STRING_LEN);
    }

    #[test]
    fn test_truncate_counts_characters() {
        // Under the limit in characters, over it in bytes
        let text = "é".repeat(MAX_STRING_LEN);
        assert!(matches!(truncate_text(&text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_row_limit() {
        let options = WriteOptions::default();
        let mut codec = XlsxCodec::new(&options, None).unwrap();
        let mut sink = codec.add_sheet("Data").unwrap();
        sink.cursor = MAX_ROWS - 1;

        assert_eq!(sink.next_row().unwrap(), MAX_ROWS - 1);
        let err = sink.next_row().unwrap_err();
        assert!(matches!(
            err,
            WriteError::TooManyRows { ref sheet, limit: MAX_ROWS } if sheet == "Data"
        ));
    }

    #[test]
    fn test_column_limit() {
        let options = WriteOptions::default();
        let mut codec = XlsxCodec::new(&options, None).unwrap();
        let mut sink = codec.add_sheet("Wide").unwrap();
        let header = Header::new((0..=usize::from(MAX_COLUMNS)).map(|i| format!("c{i}")).collect());

        let err = sink.write_header(&header).unwrap_err();
        assert!(matches!(err, WriteError::TooManyColumns { columns: 16_385, .. }));
        assert_eq!(sink.rows_written(), 0);
    }

    #[test]
    fn test_autofit_only_for_buffered_sheets() {
        let streamed = WriteOptions::default();
        let mut codec = XlsxCodec::new(&streamed, None).unwrap();
        assert!(!codec.add_sheet("S").unwrap().autofit);

        let buffered = WriteOptions::default().with_streaming(StreamingPolicy::in_memory());
        let mut codec = XlsxCodec::new(&buffered, None).unwrap();
        assert!(codec.add_sheet("S").unwrap().autofit);

        let off = buffered.with_autofit(false);
        let mut codec = XlsxCodec::new(&off, None).unwrap();
        assert!(!codec.add_sheet("S").unwrap().autofit);
    }

    #[test]
    fn test_empty_password_is_no_password() {
        let options = WriteOptions::default();
        let codec = XlsxCodec::new(&options, Some("")).unwrap();
        assert!(codec.password.is_none());
    }
}
