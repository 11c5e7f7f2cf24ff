use crate::DataError;

/// Read-only row/column access to a numeric table.
///
/// Rows are samples, columns are variables. Implementations own their
/// storage; consumers only ever read through this trait.
pub trait DataAccess {
    /// Number of rows (samples).
    fn num_rows(&self) -> usize;

    /// Number of columns (variables).
    fn num_cols(&self) -> usize;

    /// Returns the value at `row` and column `col`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `row` or `col` is out of range.
    fn get(&self, row: usize, col: usize) -> f64;

    /// Resolves a variable name to its column index.
    ///
    /// Returns [`DataError::UnknownVariable`] if no column has that name.
    fn variable_id(&self, name: &str) -> Result<usize, DataError>;

    /// Returns the distinct values of column `col` over `row_ids`.
    ///
    /// The result is sorted in ascending order with duplicates removed, so
    /// its length is the number of levels observed in those rows. All NaN
    /// cells of the same sign count as a single level.
    ///
    /// # Examples
    ///
    /// ```
    /// use grove_data::{DataAccess, DataMatrix};
    ///
    /// let data = DataMatrix::new(
    ///     vec!["x".to_owned()],
    ///     vec![vec![3.0], vec![1.0], vec![3.0], vec![2.0]],
    /// )
    /// .unwrap();
    /// assert_eq!(data.all_values(&[0, 1, 2, 3], 0), vec![1.0, 2.0, 3.0]);
    /// assert_eq!(data.all_values(&[0, 2], 0), vec![3.0]);
    /// ```
    #[allow(clippy::float_cmp)]
    fn all_values(&self, row_ids: &[usize], col: usize) -> Vec<f64> {
        let mut values = row_ids
            .iter()
            .map(|&row| self.get(row, col))
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        values.dedup_by(|a, b| a == b || (a.is_nan() && b.is_nan()));
        values
    }
}
