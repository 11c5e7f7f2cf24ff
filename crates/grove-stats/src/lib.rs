//! Statistical building blocks for random-forest style ensemble learners.
//!
//! This crate provides the numerically sensitive helpers around forest
//! training and evaluation:
//!
//! - **Partitioning**: Split index ranges into balanced chunks for parallel work
//! - **Voting**: Resolve majority votes with reproducible random tie-breaking
//! - **Concordance**: Score survival predictions against censored outcomes
//! - **Categorical validation**: Check that unordered variables can be bit-encoded
//! - **Formatting**: Human-readable durations and rounding helpers
//!
//! Tabular inputs are read through [`grove_data::DataAccess`].
//!
//! # Modules
//!
//! - [`partition`]: Near-equal range partitioning
//! - [`vote`]: Majority vote over class counts
//! - [`concordance`]: Concordance index (C-index), sequential and multi-threaded
//! - [`categorical`]: Unordered categorical variable validation
//! - [`format`]: Duration and number formatting
//!
//! # Examples
//!
//! ## Distributing work
//!
//! ```
//! use grove_stats::partition::equal_split;
//!
//! // 10 trees over 3 workers: 4 + 3 + 3
//! let boundaries = equal_split(0, 9, 3).unwrap();
//! assert_eq!(boundaries, vec![0, 4, 7, 10]);
//! ```
//!
//! ## Scoring survival predictions
//!
//! ```
//! use grove_data::{DataAccess, DataMatrix};
//! use grove_stats::concordance::concordance_index;
//!
//! let data = DataMatrix::from_reader("time status\n1 1\n2 1\n3 0\n".as_bytes()).unwrap();
//! let time = data.variable_id("time").unwrap();
//! let status = data.variable_id("status").unwrap();
//!
//! let c_index = concordance_index(&data, &[3.0, 2.0, 1.0], time, status, &[]).unwrap();
//! assert_eq!(c_index, 1.0);
//! ```
//!
//! ## Resolving a vote
//!
//! ```
//! use grove_stats::vote::{count_values, most_frequent_value};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64;
//!
//! let mut rng = Pcg64::seed_from_u64(7);
//! let counts = count_values([1, 2, 2, 3]);
//! assert_eq!(most_frequent_value(&counts, &mut rng), Ok(2));
//! ```

pub mod categorical;
pub mod concordance;
pub mod format;
pub mod partition;
pub mod vote;
