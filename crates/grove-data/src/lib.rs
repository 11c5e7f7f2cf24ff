//! Tabular data access for the Grove ensemble utilities.
//!
//! This crate provides the read-only data layer consumed by the statistical
//! routines in `grove-stats`:
//!
//! - **Data access**: the [`DataAccess`] trait, a row/column view over `f64` cells
//!   with variable-name lookup
//! - **In-memory matrix**: [`DataMatrix`], a row-major implementation loaded from
//!   delimited text files
//! - **Text helpers**: [`text::split_string`] and the single-line
//!   [`text::load_double_vector_from_file`] loader
//!
//! # Examples
//!
//! ## Building a matrix in memory
//!
//! ```
//! use grove_data::{DataAccess, DataMatrix};
//!
//! let data = DataMatrix::new(
//!     vec!["time".to_owned(), "status".to_owned()],
//!     vec![vec![5.0, 1.0], vec![3.0, 0.0]],
//! )
//! .unwrap();
//!
//! let time = data.variable_id("time").unwrap();
//! assert_eq!(data.get(1, time), 3.0);
//! ```
//!
//! ## Reading a delimited file
//!
//! ```
//! use grove_data::{DataAccess, DataMatrix};
//!
//! let text = "time,status\n5,1\n3,0\n";
//! let data = DataMatrix::from_reader(text.as_bytes()).unwrap();
//! assert_eq!(data.num_rows(), 2);
//! ```

use std::{io, path::PathBuf};

pub use self::{access::*, matrix::*};

mod access;
mod matrix;
pub mod text;

/// Errors raised while resolving variables or reading tabular data.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DataError {
    #[display("variable '{name}' not found in data")]
    UnknownVariable { name: String },
    #[display("could not open data file: {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("could not read data")]
    Read { source: io::Error },
    #[display("malformed delimited data near line {line}")]
    CsvParse { line: u64, source: csv::Error },
    #[display("data has no header line")]
    EmptyInput,
    #[display("invalid value '{token}' on line {line}")]
    InvalidValue { line: usize, token: String },
    #[display("line {line} has {got} values, expected {expected}")]
    RowLength {
        line: usize,
        expected: usize,
        got: usize,
    },
}
