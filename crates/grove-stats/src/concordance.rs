//! Concordance index (C-index) for survival predictions.
//!
//! The concordance index is the fraction of comparable sample pairs whose
//! predicted risk ordering agrees with the observed outcome ordering. A
//! sample with an earlier event should have received a higher risk score.
//!
//! # Permissible pairs
//!
//! Censoring (status `0`) hides the true event time, so not every pair can
//! be ordered. A pair of samples `i` and `j` is skipped when:
//!
//! - the earlier of the two observations is censored, or
//! - both times are equal and both statuses are equal.
//!
//! Every other pair is permissible. It scores `1` when the sample with the
//! earlier time has the strictly higher risk, `0.5` when both risks are equal,
//! and `0` otherwise. The index is the total score divided by the number of
//! permissible pairs.
//!
//! ```text
//! (time, status, risk)
//!   0: (5, 1, 0.2)
//!   1: (3, 1, 0.8)   pair (0, 1): permissible, concordant      -> 1
//!   2: (3, 0, 0.5)   pair (0, 2): earlier sample 2 censored    -> skipped
//!                    pair (1, 2): same time, different status -> 0
//!
//! C-index = 1 / 2 = 0.5
//! ```
//!
//! # Parallel evaluation
//!
//! The pair scan is quadratic in the number of samples.
//! [`concordance_index_parallel`] splits the outer loop into contiguous chunks
//! with [`equal_split_ranges`] and evaluates each chunk on a scoped thread.
//! Pair scores are multiples of `0.5`, so the per-chunk sums are exact and the
//! result matches [`concordance_index`] for any realistic sample count.

use std::{
    iter,
    ops::{AddAssign, Range},
    thread,
};

use grove_data::DataAccess;
use tracing::{debug, instrument};

use crate::partition::{PartitionError, equal_split_ranges};

/// Errors returned by the concordance evaluators.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConcordanceError {
    #[display("{num_sample_ids} sample IDs given for {num_predictions} predictions")]
    SampleCountMismatch {
        num_predictions: usize,
        num_sample_ids: usize,
    },
    #[display("sample row {row} is out of range for {num_rows} rows")]
    SampleOutOfRange { row: usize, num_rows: usize },
    #[display("column {col} is out of range for {num_cols} columns")]
    ColumnOutOfRange { col: usize, num_cols: usize },
    #[display("no permissible pairs, concordance index is undefined")]
    NoPermissiblePairs,
    #[display("failed to partition samples across threads")]
    Partition(PartitionError),
}

/// Running totals of a concordance scan.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConcordanceCounts {
    /// Sum of pair scores (`1` per concordant pair, `0.5` per tied prediction).
    pub concordant: f64,
    /// Number of permissible pairs.
    pub permissible: u64,
}

impl AddAssign for ConcordanceCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.concordant += rhs.concordant;
        self.permissible += rhs.permissible;
    }
}

impl ConcordanceCounts {
    /// Returns `concordant / permissible`.
    ///
    /// # Errors
    ///
    /// Returns [`ConcordanceError::NoPermissiblePairs`] if no pair was permissible.
    #[expect(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> Result<f64, ConcordanceError> {
        if self.permissible == 0 {
            return Err(ConcordanceError::NoPermissiblePairs);
        }
        Ok(self.concordant / self.permissible as f64)
    }
}

#[derive(Debug, Clone, Copy)]
struct Outcome {
    time: f64,
    status: f64,
}

/// Computes the concordance index of `predicted_risk` against observed outcomes.
///
/// # Arguments
///
/// * `data` - Data holding the observed times and statuses
/// * `predicted_risk` - Risk score per evaluated sample, e.g. summed cumulative hazard
/// * `dependent_col` - Column of observed times
/// * `status_col` - Column of event indicators (`0` = censored, anything else = event)
/// * `sample_ids` - Row of each evaluated sample; empty means sample `i` is row `i`
///
/// # Errors
///
/// - [`ConcordanceError::SampleCountMismatch`] if `sample_ids` is non-empty and its
///   length differs from `predicted_risk`
/// - [`ConcordanceError::SampleOutOfRange`] / [`ConcordanceError::ColumnOutOfRange`]
///   if a row or column does not exist in `data`
/// - [`ConcordanceError::NoPermissiblePairs`] if no pair can be compared
///
/// # Examples
///
/// ```
/// use grove_data::DataMatrix;
/// use grove_stats::concordance::concordance_index;
///
/// let data = DataMatrix::new(
///     vec!["time".to_owned(), "status".to_owned()],
///     vec![vec![5.0, 1.0], vec![3.0, 1.0], vec![3.0, 0.0]],
/// )
/// .unwrap();
///
/// let c_index = concordance_index(&data, &[0.2, 0.8, 0.5], 0, 1, &[]).unwrap();
/// assert_eq!(c_index, 0.5);
/// ```
#[instrument(skip_all, fields(num_samples = predicted_risk.len()))]
pub fn concordance_index<D>(
    data: &D,
    predicted_risk: &[f64],
    dependent_col: usize,
    status_col: usize,
    sample_ids: &[usize],
) -> Result<f64, ConcordanceError>
where
    D: DataAccess + ?Sized,
{
    let outcomes = resolve_outcomes(
        data,
        predicted_risk.len(),
        dependent_col,
        status_col,
        sample_ids,
    )?;
    let counts = count_pairs(&outcomes, predicted_risk, 0..outcomes.len());
    debug!(
        concordant = counts.concordant,
        permissible = counts.permissible,
        "concordance pairs counted"
    );
    counts.ratio()
}

/// Like [`concordance_index`], but scans the pairs on `num_threads` scoped threads.
///
/// Sample `i` is compared against every later sample on the thread that owns
/// `i`, so early chunks carry more pairs than late ones.
///
/// # Errors
///
/// Same as [`concordance_index`], plus [`ConcordanceError::Partition`] if
/// `num_threads` is zero.
#[instrument(skip_all, fields(num_samples = predicted_risk.len(), num_threads = num_threads))]
pub fn concordance_index_parallel<D>(
    data: &D,
    predicted_risk: &[f64],
    dependent_col: usize,
    status_col: usize,
    sample_ids: &[usize],
    num_threads: usize,
) -> Result<f64, ConcordanceError>
where
    D: DataAccess + ?Sized,
{
    if num_threads == 0 {
        return Err(ConcordanceError::Partition(PartitionError::ZeroParts));
    }
    let outcomes = resolve_outcomes(
        data,
        predicted_risk.len(),
        dependent_col,
        status_col,
        sample_ids,
    )?;
    if outcomes.is_empty() {
        return ConcordanceCounts::default().ratio();
    }

    let chunks = equal_split_ranges(0, outcomes.len() - 1, num_threads)
        .map_err(ConcordanceError::Partition)?;
    debug!(num_chunks = chunks.len(), "dispatching concordance chunks");

    let mut partials = vec![ConcordanceCounts::default(); chunks.len()];
    thread::scope(|s| {
        for (partial, chunk) in iter::zip(&mut partials, chunks) {
            let outcomes = &outcomes;
            s.spawn(move || {
                *partial = count_pairs(outcomes, predicted_risk, chunk);
            });
        }
    });

    let mut counts = ConcordanceCounts::default();
    for partial in partials {
        counts += partial;
    }
    debug!(
        concordant = counts.concordant,
        permissible = counts.permissible,
        "concordance pairs counted"
    );
    counts.ratio()
}

fn resolve_outcomes<D>(
    data: &D,
    num_samples: usize,
    dependent_col: usize,
    status_col: usize,
    sample_ids: &[usize],
) -> Result<Vec<Outcome>, ConcordanceError>
where
    D: DataAccess + ?Sized,
{
    if !sample_ids.is_empty() && sample_ids.len() != num_samples {
        return Err(ConcordanceError::SampleCountMismatch {
            num_predictions: num_samples,
            num_sample_ids: sample_ids.len(),
        });
    }

    let num_cols = data.num_cols();
    for col in [dependent_col, status_col] {
        if col >= num_cols {
            return Err(ConcordanceError::ColumnOutOfRange { col, num_cols });
        }
    }

    let num_rows = data.num_rows();
    (0..num_samples)
        .map(|i| {
            let row = if sample_ids.is_empty() { i } else { sample_ids[i] };
            if row >= num_rows {
                return Err(ConcordanceError::SampleOutOfRange { row, num_rows });
            }
            Ok(Outcome {
                time: data.get(row, dependent_col),
                status: data.get(row, status_col),
            })
        })
        .collect()
}

/// Scores every pair `(i, j)` with `i` in `rows` and `j > i`.
fn count_pairs(outcomes: &[Outcome], risk: &[f64], rows: Range<usize>) -> ConcordanceCounts {
    let mut counts = ConcordanceCounts::default();
    for i in rows {
        for j in i + 1..outcomes.len() {
            if let Some(score) = score_pair(outcomes[i], risk[i], outcomes[j], risk[j]) {
                counts.concordant += score;
                counts.permissible += 1;
            }
        }
    }
    counts
}

#[allow(clippy::float_cmp)]
fn score_pair(a: Outcome, risk_a: f64, b: Outcome, risk_b: f64) -> Option<f64> {
    if a.time < b.time && a.status == 0.0 {
        return None;
    }
    if b.time < a.time && b.status == 0.0 {
        return None;
    }
    if a.time == b.time && a.status == b.status {
        return None;
    }

    if (a.time < b.time && risk_a > risk_b) || (b.time < a.time && risk_b > risk_a) {
        Some(1.0)
    } else if risk_a == risk_b {
        Some(0.5)
    } else {
        Some(0.0)
    }
}
