use crate::core::measured::MeasuredValue;
use crate::core::models::element::MAX_ATOMIC_NUMBER;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors that abort the load of a whole reference file.
///
/// Malformed individual numeric cells are not errors: they load as unknown values.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Malformed data in '{path}' at line {line}: {kind}")]
    Malformed {
        path: String,
        line: usize,
        kind: MalformedKind,
    },
}

impl DataLoadError {
    /// Path of the file whose load failed.
    pub fn path(&self) -> &str {
        match self {
            Self::Io { path, .. } | Self::Csv { path, .. } | Self::Malformed { path, .. } => path,
        }
    }

    /// Line number of the offending row for structural errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Malformed { line, .. } => Some(*line),
            Self::Csv { source, .. } => source.position().map(|p| p.line() as usize),
            Self::Io { .. } => None,
        }
    }
}

/// The structural reason a row could not be loaded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedKind {
    #[error("expected at least {expected} columns, found {found}")]
    TooFewColumns { expected: usize, found: usize },
    #[error("invalid integer in column '{column}' (value: '{value}')")]
    InvalidInteger { column: &'static str, value: String },
    #[error("required column '{column}' is empty")]
    MissingField { column: &'static str },
    #[error("atomic number {0} is outside 1..={max}", max = MAX_ATOMIC_NUMBER)]
    AtomicNumberOutOfRange(u32),
    #[error("duplicate element with Z = {0}")]
    DuplicateAtomicNumber(u32),
    #[error("duplicate element symbol '{0}'")]
    DuplicateSymbol(String),
    #[error("duplicate element name '{0}'")]
    DuplicateName(String),
    #[error("no element with Z = {0}")]
    UnknownElement(u32),
    #[error("duplicate nuclide with Z = {z}, A = {a}")]
    DuplicateNuclide { z: u32, a: u32 },
    #[error("no nuclide with Z = {z}, A = {a}")]
    UnknownNuclide { z: u32, a: u32 },
}

/// A parsed delimited file: every data row with its 1-based line number.
///
/// The header row is skipped, blank lines are ignored and lines starting with `#` are
/// treated as comments. Cells are trimmed.
#[derive(Debug)]
pub struct DelimitedFile {
    path: String,
    records: Vec<(usize, StringRecord)>,
}

impl DelimitedFile {
    pub fn open(path: &Path) -> Result<Self, DataLoadError> {
        let file = File::open(path).map_err(|e| DataLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_reader(file, &path.to_string_lossy())
    }

    /// Reads delimited text from any reader; `origin` names the source in error messages.
    pub fn from_reader<R: Read>(reader: R, origin: &str) -> Result<Self, DataLoadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| DataLoadError::Csv {
                path: origin.to_string(),
                source: e,
            })?;
            let line = record.position().map_or(0, |p| p.line() as usize);
            records.push((line, record));
        }

        Ok(Self {
            path: origin.to_string(),
            records,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the data rows, failing on the first row with fewer than `min_columns` cells.
    pub fn rows(&self, min_columns: usize) -> impl Iterator<Item = Result<Row<'_>, DataLoadError>> {
        self.records.iter().map(move |(line, record)| {
            let row = Row {
                path: &self.path,
                line: *line,
                record,
            };
            if record.len() < min_columns {
                Err(row.malformed(MalformedKind::TooFewColumns {
                    expected: min_columns,
                    found: record.len(),
                }))
            } else {
                Ok(row)
            }
        })
    }
}

/// One data row of a [`DelimitedFile`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    path: &'a str,
    line: usize,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn text(&self, column: usize) -> &'a str {
        self.record.get(column).unwrap_or("")
    }

    pub fn required_text(&self, column: usize, name: &'static str) -> Result<&'a str, DataLoadError> {
        let text = self.text(column);
        if text.is_empty() {
            return Err(self.malformed(MalformedKind::MissingField { column: name }));
        }
        Ok(text)
    }

    pub fn required_u32(&self, column: usize, name: &'static str) -> Result<u32, DataLoadError> {
        let text = self.required_text(column, name)?;
        text.parse::<u32>().map_err(|_| {
            self.malformed(MalformedKind::InvalidInteger {
                column: name,
                value: text.to_string(),
            })
        })
    }

    /// Parses a measured cell. Blank cells and malformed text both load as unknown;
    /// malformed text is reported through a warning.
    pub fn measured(&self, column: usize, name: &'static str) -> MeasuredValue {
        let text = self.text(column);
        let value = MeasuredValue::from_text(text);
        if value.is_unknown() && !text.is_empty() {
            tracing::warn!(
                "'{}', line {}: unparsable value '{}' in column '{}' loaded as unknown",
                self.path,
                self.line,
                text,
                name
            );
        }
        value
    }

    pub fn malformed(&self, kind: MalformedKind) -> DataLoadError {
        DataLoadError::Malformed {
            path: self.path.to_string(),
            line: self.line,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parse(text: &str) -> DelimitedFile {
        DelimitedFile::from_reader(text.as_bytes(), "test.dat").unwrap()
    }

    #[test]
    fn header_is_skipped_and_lines_are_numbered_from_the_file_start() {
        let file = parse("Z,Symbol\n1,H\n2,He\n");
        let lines: Vec<usize> = file.rows(2).map(|r| r.unwrap().line()).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let file = parse("Z,Symbol\n# comment\n1,H\n\n2,He\n");
        assert_eq!(file.len(), 2);
        let last = file.rows(2).last().unwrap().unwrap();
        assert_eq!(last.text(1), "He");
    }

    #[test]
    fn cells_are_trimmed() {
        let file = parse("Z,Symbol\n 1 ,  H \n");
        let row = file.rows(2).next().unwrap().unwrap();
        assert_eq!(row.required_u32(0, "Z").unwrap(), 1);
        assert_eq!(row.text(1), "H");
    }

    #[test]
    fn short_row_is_reported_with_path_and_line() {
        let file = parse("Z,Symbol,Name\n1,H,Hydrogen\n2,He\n");
        let err = file.rows(3).find_map(Result::err).unwrap();
        match err {
            DataLoadError::Malformed { path, line, kind } => {
                assert_eq!(path, "test.dat");
                assert_eq!(line, 3);
                assert_eq!(
                    kind,
                    MalformedKind::TooFewColumns {
                        expected: 3,
                        found: 2
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_required_integer_is_structural() {
        let file = parse("Z,Symbol\nx,H\n");
        let row = file.rows(2).next().unwrap().unwrap();
        let err = row.required_u32(0, "Z").unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(matches!(
            err,
            DataLoadError::Malformed {
                kind: MalformedKind::InvalidInteger { column: "Z", .. },
                ..
            }
        ));
    }

    #[test]
    fn empty_required_field_is_structural() {
        let file = parse("Z,Symbol\n1,\n");
        let row = file.rows(2).next().unwrap().unwrap();
        assert!(matches!(
            row.required_text(1, "Symbol"),
            Err(DataLoadError::Malformed {
                kind: MalformedKind::MissingField { column: "Symbol" },
                ..
            })
        ));
    }

    #[test]
    fn malformed_measured_cell_becomes_unknown() {
        let file = parse("Z,Mass\n1,1.008(1)\n2,bogus\n3,\n");
        let masses: Vec<MeasuredValue> = file
            .rows(2)
            .map(|r| r.unwrap().measured(1, "Mass"))
            .collect();
        assert!(!masses[0].is_unknown());
        assert!(masses[1].is_unknown());
        assert!(masses[2].is_unknown());
    }

    #[test]
    fn open_reads_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elements.dat");
        fs::write(&path, "Z,Symbol\n1,H\n").unwrap();
        let file = DelimitedFile::open(&path).unwrap();
        assert_eq!(file.len(), 1);
        assert_eq!(file.path(), path.to_string_lossy());
    }

    #[test]
    fn open_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = DelimitedFile::open(&dir.path().join("missing.dat"));
        assert!(matches!(result, Err(DataLoadError::Io { .. })));
    }
}
