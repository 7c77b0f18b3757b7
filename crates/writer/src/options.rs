use std::path::PathBuf;

/// How rows are buffered on their way into the workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingPolicy {
    /// Flush each completed row to the codec's scratch files instead of
    /// keeping the whole worksheet in memory (default: true)
    pub constant_memory: bool,
    /// Emit a progress event every this many data rows; 0 disables (default: 100,000)
    pub progress_every: usize,
    /// Directory for the codec's scratch files (default: system temp dir)
    pub tempdir: Option<PathBuf>,
}

impl Default for StreamingPolicy {
    fn default() -> Self {
        StreamingPolicy {
            constant_memory: true,
            progress_every: 100_000,
            tempdir: None,
        }
    }
}

impl StreamingPolicy {
    /// Keep every worksheet in memory until the workbook is saved
    #[must_use]
    pub fn in_memory() -> Self {
        StreamingPolicy {
            constant_memory: false,
            ..Default::default()
        }
    }

    /// Set the progress interval
    #[must_use]
    pub fn with_progress_every(mut self, rows: usize) -> Self {
        self.progress_every = rows;
        self
    }

    /// Set the scratch directory
    #[must_use]
    pub fn with_tempdir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.tempdir = Some(dir.into());
        self
    }
}

/// Workbook write options
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Render the header row in bold (default: false)
    pub bold_header: bool,
    /// Fit column widths to their content when a sheet is finished (default: true).
    /// Only applies with `streaming.constant_memory` off, since a constant-memory
    /// sheet no longer holds its earlier rows.
    pub autofit: bool,
    /// Number format for date cells
    pub date_format: String,
    /// Number format for date-time cells
    pub datetime_format: String,
    /// Number format for time cells
    pub time_format: String,
    /// Row buffering policy
    pub streaming: StreamingPolicy,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            bold_header: false,
            autofit: true,
            date_format: "yyyy-mm-dd".to_string(),
            datetime_format: "yyyy-mm-ddThh:mm:ss".to_string(),
            time_format: "hh:mm:ss".to_string(),
            streaming: StreamingPolicy::default(),
        }
    }
}

impl WriteOptions {
    /// Set whether the header row is bold
    #[must_use]
    pub fn with_bold_header(mut self, bold: bool) -> Self {
        self.bold_header = bold;
        self
    }

    /// Set whether columns are autofitted
    #[must_use]
    pub fn with_autofit(mut self, autofit: bool) -> Self {
        self.autofit = autofit;
        self
    }

    /// Set the date number format
    #[must_use]
    pub fn with_date_format<S: Into<String>>(mut self, format: S) -> Self {
        self.date_format = format.into();
        self
    }

    /// Set the date-time number format
    #[must_use]
    pub fn with_datetime_format<S: Into<String>>(mut self, format: S) -> Self {
        self.datetime_format = format.into();
        self
    }

    /// Set the time number format
    #[must_use]
    pub fn with_time_format<S: Into<String>>(mut self, format: S) -> Self {
        self.time_format = format.into();
        self
    }

    /// Set the streaming policy
    #[must_use]
    pub fn with_streaming(mut self, streaming: StreamingPolicy) -> Self {
        self.streaming = streaming;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = WriteOptions::default();
        assert!(options.autofit);
        assert!(!options.bold_header);
        assert_eq!(options.datetime_format, "yyyy-mm-ddThh:mm:ss");
        assert!(options.streaming.constant_memory);
        assert_eq!(options.streaming.progress_every, 100_000);
    }

    #[test]
    fn test_builders() {
        let options = WriteOptions::default()
            .with_bold_header(true)
            .with_autofit(false)
            .with_date_format("dd/mm/yyyy")
            .with_streaming(StreamingPolicy::in_memory().with_progress_every(0));

        assert!(options.bold_header);
        assert!(!options.autofit);
        assert_eq!(options.date_format, "dd/mm/yyyy");
        assert!(!options.streaming.constant_memory);
        assert_eq!(options.streaming.progress_every, 0);
    }
}
