//! Validation of unordered categorical variables.
//!
//! Split candidates on an unordered variable are encoded as a bitmask over its
//! levels, one bit per level in a native machine word with one bit reserved.
//! A variable is therefore only usable if its levels are positive integers and
//! there are at most [`MAX_UNORDERED_LEVELS`] of them.
//!
//! Validation failures are ordinary values: [`check_unordered_variables`]
//! returns the first [`UnorderedVariableError`] it finds, and its `Display`
//! output is the message to show to the user.

use grove_data::DataAccess;
use tracing::debug;

/// Maximum number of distinct levels of an unordered variable.
pub const MAX_UNORDERED_LEVELS: usize = usize::BITS as usize - 1;

/// Reason an unordered variable cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum UnorderedVariableError {
    #[display("Unordered categorical variable {variable} not found in data.")]
    UnknownVariable { variable: String },
    #[display(
        "Too many levels in unordered categorical variable {variable}. Only {max_levels} levels allowed on this system."
    )]
    TooManyLevels { variable: String, max_levels: usize },
    #[display("Not all values in unordered categorical variable {variable} are positive integers.")]
    NotPositiveIntegers { variable: String },
}

/// Checks that every named variable can be treated as unordered categorical.
///
/// Variables are checked in order and the first failure is returned. For each
/// variable the level count is checked before the values themselves.
///
/// # Examples
///
/// ```
/// use grove_data::DataMatrix;
/// use grove_stats::categorical::{UnorderedVariableError, check_unordered_variables};
///
/// let data = DataMatrix::new(
///     vec!["color".to_owned(), "weight".to_owned()],
///     vec![vec![1.0, 0.5], vec![3.0, 1.5], vec![2.0, 2.0]],
/// )
/// .unwrap();
///
/// assert_eq!(check_unordered_variables(&data, &["color"]), Ok(()));
///
/// let err = check_unordered_variables(&data, &["color", "weight"]).unwrap_err();
/// assert!(matches!(err, UnorderedVariableError::NotPositiveIntegers { .. }));
/// assert!(err.to_string().contains("weight"));
/// ```
pub fn check_unordered_variables<D, S>(
    data: &D,
    variable_names: &[S],
) -> Result<(), UnorderedVariableError>
where
    D: DataAccess + ?Sized,
    S: AsRef<str>,
{
    let row_ids = (0..data.num_rows()).collect::<Vec<_>>();

    for variable in variable_names {
        let variable = variable.as_ref();
        let col = data
            .variable_id(variable)
            .map_err(|_| UnorderedVariableError::UnknownVariable {
                variable: variable.to_owned(),
            })?;
        let levels = data.all_values(&row_ids, col);

        if levels.len() > MAX_UNORDERED_LEVELS {
            return Err(UnorderedVariableError::TooManyLevels {
                variable: variable.to_owned(),
                max_levels: MAX_UNORDERED_LEVELS,
            });
        }
        if !check_positive_integers(&levels) {
            return Err(UnorderedVariableError::NotPositiveIntegers {
                variable: variable.to_owned(),
            });
        }
        debug!(variable, num_levels = levels.len(), "unordered variable ok");
    }

    Ok(())
}

/// Returns `true` if every value is a finite integer of at least 1.
///
/// # Examples
///
/// ```
/// use grove_stats::categorical::check_positive_integers;
///
/// assert!(check_positive_integers(&[1.0, 2.0, 17.0]));
/// assert!(!check_positive_integers(&[1.0, 2.5]));
/// assert!(!check_positive_integers(&[0.0, 1.0]));
/// ```
#[allow(clippy::float_cmp)]
#[must_use]
pub fn check_positive_integers(values: &[f64]) -> bool {
    values
        .iter()
        .all(|&value| value.is_finite() && value >= 1.0 && value.floor() == value)
}

#[cfg(test)]
mod tests {
    use grove_data::DataMatrix;

    use super::*;

    fn single_column(name: &str, values: &[f64]) -> DataMatrix {
        DataMatrix::new(
            vec![name.to_owned()],
            values.iter().map(|&v| vec![v]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_positive_integers_pass() {
        let data = single_column("group", &[1.0, 2.0, 3.0, 2.0, 1.0]);
        assert_eq!(check_unordered_variables(&data, &["group"]), Ok(()));
    }

    #[test]
    fn test_fractional_value_fails() {
        let data = single_column("group", &[1.5, 2.0]);
        let err = check_unordered_variables(&data, &["group"]).unwrap_err();
        assert_eq!(
            err,
            UnorderedVariableError::NotPositiveIntegers {
                variable: "group".to_owned()
            }
        );
        assert_eq!(
            err.to_string(),
            "Not all values in unordered categorical variable group are positive integers."
        );
    }

    #[test]
    fn test_zero_and_negative_values_fail() {
        let data = single_column("group", &[0.0, 1.0, 2.0]);
        assert!(check_unordered_variables(&data, &["group"]).is_err());

        let data = single_column("group", &[-1.0, 1.0]);
        assert!(check_unordered_variables(&data, &["group"]).is_err());
    }

    #[test]
    fn test_non_finite_values_fail() {
        assert!(!check_positive_integers(&[f64::INFINITY]));
        assert!(!check_positive_integers(&[f64::NAN]));
    }

    #[test]
    fn test_many_missing_values_count_as_one_level() {
        let mut values = vec![f64::NAN; MAX_UNORDERED_LEVELS + 5];
        values.push(1.0);
        let data = single_column("group", &values);
        let err = check_unordered_variables(&data, &["group"]).unwrap_err();
        assert!(matches!(err, UnorderedVariableError::NotPositiveIntegers { .. }));
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_level_limit() {
        let at_limit = (1..=MAX_UNORDERED_LEVELS).map(|v| v as f64).collect::<Vec<_>>();
        let data = single_column("code", &at_limit);
        assert_eq!(check_unordered_variables(&data, &["code"]), Ok(()));

        let over_limit = (1..=MAX_UNORDERED_LEVELS + 1)
            .map(|v| v as f64)
            .collect::<Vec<_>>();
        let data = single_column("code", &over_limit);
        let err = check_unordered_variables(&data, &["code"]).unwrap_err();
        assert_eq!(
            err,
            UnorderedVariableError::TooManyLevels {
                variable: "code".to_owned(),
                max_levels: MAX_UNORDERED_LEVELS,
            }
        );
        assert!(err.to_string().contains("code"));
        assert!(err.to_string().contains(&MAX_UNORDERED_LEVELS.to_string()));
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_level_count_checked_before_values() {
        let values = (0..=MAX_UNORDERED_LEVELS)
            .map(|v| v as f64 + 0.5)
            .collect::<Vec<_>>();
        let data = single_column("code", &values);
        let err = check_unordered_variables(&data, &["code"]).unwrap_err();
        assert!(matches!(err, UnorderedVariableError::TooManyLevels { .. }));
    }

    #[test]
    fn test_first_failing_variable_wins() {
        let data = DataMatrix::new(
            vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
            vec![vec![1.0, 0.0, 0.5], vec![2.0, 1.0, 1.0]],
        )
        .unwrap();

        let err = check_unordered_variables(&data, &["a", "b", "c"]).unwrap_err();
        assert_eq!(
            err,
            UnorderedVariableError::NotPositiveIntegers {
                variable: "b".to_owned()
            }
        );
    }

    #[test]
    fn test_unknown_variable() {
        let data = single_column("group", &[1.0]);
        let err = check_unordered_variables(&data, &["missing".to_owned()]).unwrap_err();
        assert_eq!(
            err,
            UnorderedVariableError::UnknownVariable {
                variable: "missing".to_owned()
            }
        );
    }

    #[test]
    fn test_no_variables() {
        let data = single_column("group", &[0.5]);
        let names: [&str; 0] = [];
        assert_eq!(check_unordered_variables(&data, &names), Ok(()));
    }
}
