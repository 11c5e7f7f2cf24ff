use std::path::PathBuf;

use grove_data::DataMatrix;
use grove_stats::categorical::{self, UnorderedVariableError};
use tracing::info;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CheckCategoricalArg {
    /// Path to the data file (first line holds variable names)
    data: PathBuf,
    /// Unordered categorical variables to check (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    variables: Vec<String>,
}

pub(crate) fn run(arg: &CheckCategoricalArg) -> anyhow::Result<()> {
    let data = util::read_data_file(&arg.data)?;
    check(&data, &arg.variables)?;

    info!(
        num_variables = arg.variables.len(),
        "all unordered variables are valid"
    );
    println!("OK: {}", arg.variables.join(", "));
    Ok(())
}

fn check(data: &DataMatrix, variables: &[String]) -> anyhow::Result<()> {
    match categorical::check_unordered_variables(data, variables) {
        Ok(()) => Ok(()),
        Err(e @ UnorderedVariableError::UnknownVariable { .. }) => anyhow::bail!(
            "{e} (available variables: {})",
            data.variable_names().join(", ")
        ),
        Err(e) => anyhow::bail!("{e}"),
    }
}
