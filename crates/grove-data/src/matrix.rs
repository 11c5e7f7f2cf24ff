use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use csv::StringRecord;
use tracing::{debug, instrument};

use crate::{DataAccess, DataError};

/// Row-major in-memory table of `f64` values with named columns.
///
/// # File format
///
/// [`DataMatrix::load`] and [`DataMatrix::from_reader`] accept plain text where
/// the first line holds the variable names and every following non-blank line
/// holds one row. The separator is detected from the header line:
///
/// - `,` if the header contains a comma
/// - `;` if the header contains a semicolon
/// - any run of whitespace otherwise
///
/// Comma and semicolon files are parsed as CSV, so fields may be quoted and
/// surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct DataMatrix {
    variable_names: Vec<String>,
    values: Vec<f64>,
    num_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    Delimiter(u8),
    Whitespace,
}

impl Separator {
    fn detect(header: &str) -> Self {
        if header.contains(',') {
            Self::Delimiter(b',')
        } else if header.contains(';') {
            Self::Delimiter(b';')
        } else {
            Self::Whitespace
        }
    }
}

impl DataMatrix {
    /// Builds a matrix from variable names and rows.
    ///
    /// Every row must contain exactly one value per variable; otherwise
    /// [`DataError::RowLength`] is returned with the 1-based row number.
    pub fn new(variable_names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, DataError> {
        let expected = variable_names.len();
        let num_rows = rows.len();
        let mut values = Vec::with_capacity(num_rows * expected);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != expected {
                return Err(DataError::RowLength {
                    line: i + 1,
                    expected,
                    got: row.len(),
                });
            }
            values.extend(row);
        }
        Ok(Self {
            variable_names,
            values,
            num_rows,
        })
    }

    /// Reads a delimited text file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load<P>(path: P) -> Result<Self, DataError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads delimited text from any reader.
    ///
    /// Line numbers in errors are 1-based and count the header line.
    pub fn from_reader<R>(mut reader: R) -> Result<Self, DataError>
    where
        R: Read,
    {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| DataError::Read { source })?;
        let header = text.lines().next().ok_or(DataError::EmptyInput)?;
        let separator = Separator::detect(header);

        let mut rows = RowCollector::default();
        match separator {
            Separator::Delimiter(delimiter) => {
                let mut reader = csv::ReaderBuilder::new()
                    .has_headers(true)
                    .flexible(true)
                    .delimiter(delimiter)
                    .trim(csv::Trim::All)
                    .from_reader(text.as_bytes());
                let header = reader.headers().map_err(csv_error)?.clone();
                rows.set_header(&header)?;
                for (i, record) in reader.records().enumerate() {
                    let record = record.map_err(csv_error)?;
                    let line = record
                        .position()
                        .and_then(|pos| usize::try_from(pos.line()).ok())
                        .unwrap_or(i + 2);
                    rows.push(&record, line)?;
                }
            }
            Separator::Whitespace => {
                rows.set_header(&StringRecord::from(
                    header.split_whitespace().collect::<Vec<_>>(),
                ))?;
                for (i, line) in text.lines().enumerate().skip(1) {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let record = StringRecord::from(line.split_whitespace().collect::<Vec<_>>());
                    rows.push(&record, i + 1)?;
                }
            }
        }

        debug!(
            num_rows = rows.num_rows,
            num_cols = rows.variable_names.len(),
            ?separator,
            "loaded data matrix"
        );
        Ok(Self {
            variable_names: rows.variable_names,
            values: rows.values,
            num_rows: rows.num_rows,
        })
    }

    /// Returns the variable names in column order.
    #[must_use]
    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }
}

fn csv_error(source: csv::Error) -> DataError {
    DataError::CsvParse {
        line: source.position().map_or(0, csv::Position::line),
        source,
    }
}

#[derive(Debug, Default)]
struct RowCollector {
    variable_names: Vec<String>,
    values: Vec<f64>,
    num_rows: usize,
}

impl RowCollector {
    fn set_header(&mut self, header: &StringRecord) -> Result<(), DataError> {
        if header.is_empty() {
            return Err(DataError::EmptyInput);
        }
        self.variable_names = header.iter().map(str::to_owned).collect();
        Ok(())
    }

    fn push(&mut self, record: &StringRecord, line: usize) -> Result<(), DataError> {
        let expected = self.variable_names.len();
        if record.len() != expected {
            return Err(DataError::RowLength {
                line,
                expected,
                got: record.len(),
            });
        }
        for token in record {
            let value = token.parse::<f64>().map_err(|_| DataError::InvalidValue {
                line,
                token: token.to_owned(),
            })?;
            self.values.push(value);
        }
        self.num_rows += 1;
        Ok(())
    }
}

impl DataAccess for DataMatrix {
    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.variable_names.len()
    }

    fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            col < self.variable_names.len(),
            "column {col} out of range for {} variables",
            self.variable_names.len()
        );
        self.values[row * self.variable_names.len() + col]
    }

    fn variable_id(&self, name: &str) -> Result<usize, DataError> {
        self.variable_names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| DataError::UnknownVariable {
                name: name.to_owned(),
            })
    }
}
