//! Plain-text helpers shared by the data readers.

use std::{
    fs::File,
    io::{self, BufRead as _, BufReader},
    path::{Path, PathBuf},
};

use tracing::{debug, instrument};

/// Errors raised by [`load_double_vector_from_file`].
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("could not open file: {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("could not read file: {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("invalid number '{token}' in file: {}", path.display())]
    InvalidToken { path: PathBuf, token: String },
}

/// Splits `input` at every `split_char`.
///
/// Behaves like reading delimited tokens from a stream: empty tokens between
/// two separators are kept, but a trailing separator does not produce a
/// trailing empty token, and empty input yields no tokens at all.
///
/// # Examples
///
/// ```
/// use grove_data::text::split_string;
///
/// assert_eq!(split_string("a,b,,c", ','), ["a", "b", "", "c"]);
/// assert_eq!(split_string("a,b,", ','), ["a", "b"]);
/// assert!(split_string("", ',').is_empty());
/// ```
#[must_use]
pub fn split_string(input: &str, split_char: char) -> Vec<String> {
    let mut tokens = input.split(split_char).map(str::to_owned).collect::<Vec<_>>();
    if input.is_empty() || input.ends_with(split_char) {
        tokens.pop();
    }
    tokens
}

/// Loads whitespace-separated floating-point numbers from the first line of a file.
///
/// Every line after the first is ignored. An empty file yields an empty vector.
///
/// # Errors
///
/// - [`LoadError::Open`] if the file cannot be opened
/// - [`LoadError::Read`] if reading the first line fails
/// - [`LoadError::InvalidToken`] if a token on the first line is not a number
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_double_vector_from_file<P>(path: P) -> Result<Vec<f64>, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let values = line
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| LoadError::InvalidToken {
                path: path.to_path_buf(),
                token: token.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = values.len(), "loaded values");
    Ok(values)
}
