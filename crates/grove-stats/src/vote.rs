//! Majority voting over class counts with random tie-breaking.
//!
//! The random generator is always supplied by the caller as `&mut R`, so a
//! sequence of votes is reproducible from a fixed seed and call order. The
//! generator is only advanced when a tie actually has to be broken.
//!
//! Tied values are collected in the iteration order of the count mapping.
//! Use an ordered map such as [`BTreeMap`] when the same seed must pick the
//! same value across runs; a `HashMap` iterates in a per-process order.

use std::{cmp::Ordering, collections::BTreeMap};

use rand::Rng;

/// Error returned by [`most_frequent_value`] when there is nothing to vote on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no class counts to vote on")]
pub struct EmptyVoteError;

/// Returns the value with the highest count, breaking ties uniformly at random.
///
/// # Arguments
///
/// * `class_counts` - Value to occurrence count pairs, e.g. `&BTreeMap<K, usize>`
/// * `rng` - Generator used to pick among tied values
///
/// # Errors
///
/// Returns [`EmptyVoteError`] if `class_counts` yields no entries.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use grove_stats::vote::most_frequent_value;
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64;
///
/// let mut rng = Pcg64::seed_from_u64(42);
/// let counts = BTreeMap::from([('a', 3), ('b', 5), ('c', 1)]);
/// assert_eq!(most_frequent_value(&counts, &mut rng), Ok('b'));
/// ```
pub fn most_frequent_value<'a, K, I, R>(class_counts: I, rng: &mut R) -> Result<K, EmptyVoteError>
where
    I: IntoIterator<Item = (&'a K, &'a usize)>,
    K: Clone + 'a,
    R: Rng + ?Sized,
{
    let mut max_count = 0;
    let mut major_classes = vec![];
    for (value, &count) in class_counts {
        match count.cmp(&max_count) {
            Ordering::Greater => {
                max_count = count;
                major_classes.clear();
                major_classes.push(value);
            }
            Ordering::Equal => major_classes.push(value),
            Ordering::Less => {}
        }
    }

    match major_classes.as_slice() {
        [] => Err(EmptyVoteError),
        [value] => Ok((*value).clone()),
        tied => Ok(tied[rng.random_range(0..tied.len())].clone()),
    }
}

/// Tallies values into a class-count mapping.
///
/// # Examples
///
/// ```
/// use grove_stats::vote::count_values;
///
/// let counts = count_values([2, 1, 2, 3, 2]);
/// assert_eq!(counts[&2], 3);
/// assert_eq!(counts.len(), 3);
/// ```
#[must_use]
pub fn count_values<K, I>(values: I) -> BTreeMap<K, usize>
where
    I: IntoIterator<Item = K>,
    K: Ord,
{
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{RngCore as _, SeedableRng as _};
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn test_unique_maximum_is_deterministic() {
        let counts = BTreeMap::from([("A", 3), ("B", 5), ("C", 1)]);
        let mut rng = Pcg64::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(most_frequent_value(&counts, &mut rng), Ok("B"));
        }
    }

    #[test]
    fn test_unique_maximum_does_not_advance_rng() {
        let counts = BTreeMap::from([(1, 2), (2, 7)]);
        let mut rng = Pcg64::seed_from_u64(7);
        let mut untouched = rng.clone();

        most_frequent_value(&counts, &mut rng).unwrap();
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    fn test_tie_advances_caller_rng() {
        let counts = BTreeMap::from([(1, 4), (2, 4), (3, 4)]);
        let mut rng = Pcg64::seed_from_u64(7);
        let mut reference = rng.clone();

        let first = most_frequent_value(&counts, &mut rng).unwrap();
        let second = most_frequent_value(&counts, &mut rng).unwrap();

        let tied = [1, 2, 3];
        assert_eq!(first, tied[reference.random_range(0..3)]);
        assert_eq!(second, tied[reference.random_range(0..3)]);
        assert_eq!(rng.next_u64(), reference.next_u64());
    }

    #[test]
    fn test_same_seed_reproduces_votes() {
        let counts = BTreeMap::from([('x', 2), ('y', 2), ('z', 1)]);
        let run = |seed| {
            let mut rng = Pcg64::seed_from_u64(seed);
            (0..20)
                .map(|_| most_frequent_value(&counts, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    #[expect(clippy::cast_precision_loss)]
    fn test_tie_is_roughly_uniform() {
        let counts = BTreeMap::from([("A", 5), ("B", 5)]);
        let mut rng = Pcg64::seed_from_u64(2024);
        let trials = 10_000;
        let a_count = (0..trials)
            .filter(|_| most_frequent_value(&counts, &mut rng).unwrap() == "A")
            .count();
        let fraction = a_count as f64 / f64::from(trials);
        assert!((0.47..=0.53).contains(&fraction), "fraction = {fraction}");
    }

    #[test]
    fn test_later_higher_count_replaces_ties() {
        let counts = BTreeMap::from([(1, 2), (2, 2), (3, 9)]);
        let mut rng = Pcg64::seed_from_u64(0);
        assert_eq!(most_frequent_value(&counts, &mut rng), Ok(3));
    }

    #[test]
    fn test_accepts_hash_map() {
        let counts = HashMap::from([(10_u32, 1_usize), (20, 3)]);
        let mut rng = Pcg64::seed_from_u64(0);
        assert_eq!(most_frequent_value(&counts, &mut rng), Ok(20));
    }

    #[test]
    fn test_empty_counts() {
        let counts = BTreeMap::<u32, usize>::new();
        let mut rng = Pcg64::seed_from_u64(0);
        assert_eq!(most_frequent_value(&counts, &mut rng), Err(EmptyVoteError));
    }

    #[test]
    fn test_count_values() {
        let counts = count_values(["b", "a", "b"]);
        assert_eq!(counts, BTreeMap::from([("a", 1), ("b", 2)]));
    }
}
