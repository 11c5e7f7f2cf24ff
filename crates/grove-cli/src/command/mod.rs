use std::io;

use clap::{Parser, Subcommand};

use self::{
    c_index::CIndexArg, check_categorical::CheckCategoricalArg, split::SplitArg, vote::VoteArg,
};

mod c_index;
mod check_categorical;
mod split;
mod vote;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all log output except errors
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Split an index range into near-equal parts
    Split(#[clap(flatten)] SplitArg),
    /// Compute the concordance index of risk predictions
    CIndex(#[clap(flatten)] CIndexArg),
    /// Validate unordered categorical variables in a data file
    CheckCategorical(#[clap(flatten)] CheckCategoricalArg),
    /// Resolve the majority class of a list of labels
    Vote(#[clap(flatten)] VoteArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    let filter = match (args.verbose, args.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match args.mode {
        Mode::Split(arg) => split::run(&arg)?,
        Mode::CIndex(arg) => c_index::run(&arg)?,
        Mode::CheckCategorical(arg) => check_categorical::run(&arg)?,
        Mode::Vote(arg) => vote::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_index_parses_without_threads() {
        let args = CommandArgs::try_parse_from(["grove", "c-index", "data.csv", "risk.txt"]).unwrap();
        assert!(matches!(args.mode, Mode::CIndex(_)));
    }

    #[test]
    fn test_c_index_rejects_zero_threads() {
        let result = CommandArgs::try_parse_from([
            "grove",
            "c-index",
            "data.csv",
            "risk.txt",
            "--threads",
            "0",
        ]);
        assert!(result.is_err());

        let result = CommandArgs::try_parse_from([
            "grove",
            "c-index",
            "data.csv",
            "risk.txt",
            "--threads",
            "4",
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_check_categorical_requires_variables() {
        let result = CommandArgs::try_parse_from(["grove", "check-categorical", "data.csv"]);
        assert!(result.is_err());

        let args = CommandArgs::try_parse_from([
            "grove",
            "check-categorical",
            "data.csv",
            "--variables",
            "a,b",
            "--quiet",
        ])
        .unwrap();
        assert!(args.quiet);
        assert!(matches!(args.mode, Mode::CheckCategorical(_)));
    }
}
