//! Header inference from the first record of a sheet.

use rowbook_types::Record;
use std::borrow::Borrow;
use std::iter::Peekable;

/// Ordered column names of a sheet, fixed once derived
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Build a header from explicit column names
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Header { columns }
    }

    /// Derive the header from the keys of `record`, in insertion order
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Header {
            columns: record.keys().map(str::to_string).collect(),
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// Derive the header of a record stream by peeking at its first element.
///
/// Nothing is consumed: the first record is still yielded by `records`
/// afterwards. An empty stream yields an empty header.
pub fn infer_header<I>(records: &mut Peekable<I>) -> Header
where
    I: Iterator,
    I::Item: Borrow<Record>,
{
    records
        .peek()
        .map(|first| Header::from_record(first.borrow()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_header_from_first_record() {
        let records = [
            record(&[("a", "1"), ("b", "2")]),
            record(&[("b", "4"), ("a", "3"), ("c", "5")]),
        ];
        let mut iter = records.iter().peekable();

        let header = infer_header(&mut iter);
        assert_eq!(header.columns(), ["a", "b"]);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let records = vec![record(&[("a", "1")]), record(&[("a", "2")])];
        let mut iter = records.into_iter().peekable();

        let _ = infer_header(&mut iter);
        assert_eq!(iter.count(), 2);
    }

    #[test]
    fn test_empty_stream_gives_empty_header() {
        let mut iter = std::iter::empty::<Record>().peekable();
        let header = infer_header(&mut iter);
        assert!(header.is_empty());
    }

    #[test]
    fn test_lazy_source_is_pulled_once() {
        let mut pulled = 0;
        let source = (0..1_000).map(|i| {
            pulled += 1;
            Record::new().with("i", i)
        });
        let mut iter = source.peekable();
        let header = infer_header(&mut iter);
        drop(iter);

        assert_eq!(header.columns(), ["i"]);
        assert_eq!(pulled, 1);
    }
}
