use std::{collections::BTreeMap, path::PathBuf};

use grove_stats::vote;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;
use serde::Serialize;
use tracing::{debug, info};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct VoteArg {
    /// Path to the labels file (one line of whitespace-separated integer class labels)
    labels: PathBuf,
    /// Seed for tie-breaking (default: random)
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path (default: stdout)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct VoteReport {
    winner: i64,
    counts: BTreeMap<i64, usize>,
    seed: u64,
}

#[expect(clippy::cast_possible_truncation)]
#[allow(clippy::float_cmp)]
fn to_label(value: f64) -> anyhow::Result<i64> {
    if !value.is_finite() || value.trunc() != value {
        anyhow::bail!("class label {value} is not an integer");
    }
    Ok(value as i64)
}

pub(crate) fn run(arg: &VoteArg) -> anyhow::Result<()> {
    let values = util::read_values_file("labels", &arg.labels)?;
    let labels = values
        .into_iter()
        .map(to_label)
        .collect::<anyhow::Result<Vec<_>>>()?;

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    debug!(seed, num_labels = labels.len(), "resolving vote");
    let mut rng = Pcg64::seed_from_u64(seed);

    let counts = vote::count_values(labels);
    let winner = vote::most_frequent_value(&counts, &mut rng)?;
    info!(winner, num_classes = counts.len(), "majority class resolved");

    let report = VoteReport {
        winner,
        counts,
        seed,
    };
    Output::save_json(&report, arg.output.as_deref())
}
