//! Balanced partitioning of index ranges for work distribution.
//!
//! A closed range `[start, end]` is cut into contiguous parts whose lengths
//! differ by at most one element. The result is expressed as a boundary list
//! `b0 < b1 < ... < bk` with `b0 == start` and `bk == end + 1`; part `i`
//! covers `b[i]..b[i + 1]`.
//!
//! ```text
//! equal_split(0, 9, 3)
//!
//!   0 1 2 3 | 4 5 6 | 7 8 9
//!   ^         ^       ^     ^
//!   0         4       7     10
//! ```
//!
//! Long parts (`ceil(L / n)` elements) come first, followed by short parts
//! (`floor(L / n)` elements), where `L` is the range length.

use std::ops::Range;

/// Errors returned by [`equal_split`] and [`equal_split_ranges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PartitionError {
    #[display("number of parts must be at least 1")]
    ZeroParts,
    #[display("range end {end} is before range start {start}")]
    EmptyRange { start: usize, end: usize },
    #[display("range end {end} has no successor")]
    EndOverflow { end: usize },
}

/// Splits the closed range `[start, end]` into `num_parts` near-equal parts.
///
/// Returns `num_parts + 1` boundaries. If more parts are requested than there
/// are elements, every element becomes its own part and only `end - start + 2`
/// boundaries are returned.
///
/// # Errors
///
/// - [`PartitionError::ZeroParts`] if `num_parts == 0`
/// - [`PartitionError::EmptyRange`] if `end < start`
/// - [`PartitionError::EndOverflow`] if `end == usize::MAX`
///
/// # Examples
///
/// ```
/// use grove_stats::partition::equal_split;
///
/// assert_eq!(equal_split(0, 9, 1).unwrap(), vec![0, 10]);
/// assert_eq!(equal_split(0, 9, 3).unwrap(), vec![0, 4, 7, 10]);
/// assert_eq!(equal_split(0, 2, 10).unwrap(), vec![0, 1, 2, 3]);
/// ```
pub fn equal_split(
    start: usize,
    end: usize,
    num_parts: usize,
) -> Result<Vec<usize>, PartitionError> {
    if num_parts == 0 {
        return Err(PartitionError::ZeroParts);
    }
    if end < start {
        return Err(PartitionError::EmptyRange { start, end });
    }
    let stop = end
        .checked_add(1)
        .ok_or(PartitionError::EndOverflow { end })?;

    if num_parts == 1 {
        return Ok(vec![start, stop]);
    }

    let length = stop - start;
    if num_parts > length {
        return Ok((start..=stop).collect());
    }

    let part_length_short = length / num_parts;
    let part_length_long = length.div_ceil(num_parts);
    let cut_pos = length % num_parts;
    let long_end = start + cut_pos * part_length_long;

    let mut boundaries = Vec::with_capacity(num_parts + 1);
    boundaries.extend((start..long_end).step_by(part_length_long));
    boundaries.extend((long_end..=stop).step_by(part_length_short));
    Ok(boundaries)
}

/// Like [`equal_split`], but returns the parts as half-open ranges.
///
/// # Examples
///
/// ```
/// use grove_stats::partition::equal_split_ranges;
///
/// let ranges = equal_split_ranges(10, 19, 4).unwrap();
/// assert_eq!(ranges, vec![10..13, 13..16, 16..18, 18..20]);
/// ```
pub fn equal_split_ranges(
    start: usize,
    end: usize,
    num_parts: usize,
) -> Result<Vec<Range<usize>>, PartitionError> {
    let boundaries = equal_split(start, end, num_parts)?;
    Ok(boundaries.windows(2).map(|w| w[0]..w[1]).collect())
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg64;

    use super::*;

    fn assert_valid_partition(start: usize, end: usize, num_parts: usize) {
        let boundaries = equal_split(start, end, num_parts).unwrap();
        let length = end - start + 1;

        assert_eq!(boundaries.first(), Some(&start));
        assert_eq!(boundaries.last(), Some(&(end + 1)));
        assert!(
            boundaries.windows(2).all(|w| w[0] < w[1]),
            "boundaries not strictly increasing: {boundaries:?}"
        );

        if num_parts <= length {
            assert_eq!(boundaries.len(), num_parts + 1);
        } else {
            assert_eq!(boundaries.len(), length + 1);
        }

        let lengths = boundaries.windows(2).map(|w| w[1] - w[0]);
        let min = lengths.clone().min().unwrap();
        let max = lengths.max().unwrap();
        assert!(
            max - min <= 1,
            "unbalanced parts for ({start}, {end}, {num_parts}): {boundaries:?}"
        );
    }

    #[test]
    fn test_single_part() {
        assert_eq!(equal_split(0, 9, 1).unwrap(), vec![0, 10]);
        assert_eq!(equal_split(5, 5, 1).unwrap(), vec![5, 6]);
    }

    #[test]
    fn test_long_parts_first() {
        assert_eq!(equal_split(0, 9, 3).unwrap(), vec![0, 4, 7, 10]);
        assert_eq!(equal_split(0, 10, 3).unwrap(), vec![0, 4, 8, 11]);
        assert_eq!(equal_split(3, 12, 4).unwrap(), vec![3, 6, 9, 11, 13]);
    }

    #[test]
    fn test_exact_division() {
        assert_eq!(equal_split(0, 11, 4).unwrap(), vec![0, 3, 6, 9, 12]);
        assert_eq!(equal_split(1, 4, 4).unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_more_parts_than_elements() {
        assert_eq!(equal_split(0, 2, 10).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(equal_split(7, 7, 2).unwrap(), vec![7, 8]);
    }

    #[test]
    fn test_invalid_arguments() {
        assert_eq!(equal_split(0, 9, 0), Err(PartitionError::ZeroParts));
        assert_eq!(
            equal_split(5, 4, 2),
            Err(PartitionError::EmptyRange { start: 5, end: 4 })
        );
        assert_eq!(
            equal_split(0, usize::MAX, 2),
            Err(PartitionError::EndOverflow { end: usize::MAX })
        );
    }

    #[test]
    fn test_all_small_ranges_are_balanced() {
        for start in 0..4 {
            for length in 1..40 {
                let end = start + length - 1;
                for num_parts in 1..=length + 3 {
                    assert_valid_partition(start, end, num_parts);
                }
            }
        }
    }

    #[test]
    fn test_random_ranges_cover_input_exactly() {
        let mut rng = Pcg64::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let start = rng.random_range(0..1000);
            let end = start + rng.random_range(0..5000);
            let num_parts = rng.random_range(1..64);

            assert_valid_partition(start, end, num_parts);

            let covered = equal_split_ranges(start, end, num_parts)
                .unwrap()
                .into_iter()
                .flatten()
                .collect::<Vec<_>>();
            assert_eq!(covered, (start..=end).collect::<Vec<_>>());
        }
    }
}
