use std::path::PathBuf;

use grove_stats::partition;
use serde::Serialize;
use tracing::info;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SplitArg {
    /// First index of the range
    #[arg(long, default_value_t = 0)]
    start: usize,
    /// Last index of the range (inclusive)
    #[arg(long)]
    end: usize,
    /// Number of parts
    #[arg(long)]
    parts: usize,
    /// Output file path (default: stdout)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SplitReport {
    boundaries: Vec<usize>,
    part_lengths: Vec<usize>,
}

pub(crate) fn run(arg: &SplitArg) -> anyhow::Result<()> {
    let boundaries = partition::equal_split(arg.start, arg.end, arg.parts)?;
    let part_lengths = part_lengths(&boundaries);
    info!(
        start = arg.start,
        end = arg.end,
        requested = arg.parts,
        produced = part_lengths.len(),
        "range split"
    );

    let report = SplitReport {
        boundaries,
        part_lengths,
    };
    Output::save_json(&report, arg.output.as_deref())
}

fn part_lengths(boundaries: &[usize]) -> Vec<usize> {
    boundaries.windows(2).map(|w| w[1] - w[0]).collect()
}
