use std::{num::NonZeroUsize, path::PathBuf, time::Instant};

use anyhow::Context;
use chrono::{DateTime, Utc};
use grove_data::{DataAccess, DataMatrix};
use grove_stats::{
    concordance::{self, ConcordanceError},
    format::beautify_time,
};
use serde::Serialize;
use tracing::info;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CIndexArg {
    /// Path to the data file (first line holds variable names)
    data: PathBuf,
    /// Path to the predictions file (one line of whitespace-separated risk scores)
    predictions: PathBuf,
    /// Name of the observed time variable
    #[arg(long, default_value = "time")]
    time: String,
    /// Name of the event status variable (0 = censored)
    #[arg(long, default_value = "status")]
    status: String,
    /// Data rows the predictions refer to (comma-separated, default: all rows in order)
    #[arg(long, value_delimiter = ',')]
    sample_ids: Vec<usize>,
    /// Number of threads used to scan sample pairs
    #[arg(long, default_value_t = NonZeroUsize::MIN)]
    threads: NonZeroUsize,
    /// Output file path (default: stdout)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CIndexReport {
    c_index: f64,
    num_samples: usize,
    num_threads: usize,
    evaluated_at: DateTime<Utc>,
}

pub(crate) fn run(arg: &CIndexArg) -> anyhow::Result<()> {
    let data = util::read_data_file(&arg.data)?;
    let predictions = util::read_values_file("predictions", &arg.predictions)?;
    let time_col = data.variable_id(&arg.time)?;
    let status_col = data.variable_id(&arg.status)?;
    info!(
        num_rows = data.num_rows(),
        num_predictions = predictions.len(),
        "inputs loaded"
    );

    let start = Instant::now();
    let c_index = evaluate(
        &data,
        &predictions,
        time_col,
        status_col,
        &arg.sample_ids,
        arg.threads,
    )
    .context("Failed to compute concordance index")?;
    info!(
        c_index,
        elapsed = %beautify_time(start.elapsed().as_secs()),
        "concordance index computed"
    );

    let report = CIndexReport {
        c_index,
        num_samples: predictions.len(),
        num_threads: arg.threads.get(),
        evaluated_at: Utc::now(),
    };
    Output::save_json(&report, arg.output.as_deref())
}

fn evaluate(
    data: &DataMatrix,
    predictions: &[f64],
    time_col: usize,
    status_col: usize,
    sample_ids: &[usize],
    threads: NonZeroUsize,
) -> Result<f64, ConcordanceError> {
    if threads.get() == 1 {
        concordance::concordance_index(data, predictions, time_col, status_col, sample_ids)
    } else {
        concordance::concordance_index_parallel(
            data,
            predictions,
            time_col,
            status_col,
            sample_ids,
            threads.get(),
        )
    }
}
