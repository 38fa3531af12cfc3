//! Small helpers shared across CLI tests.

use clap::Parser;

use super::{Cli, CliError, ConversionSummary, run_cli};

/// Parses `args` as if typed after the binary name.
pub(super) fn parse(args: &[&str]) -> Cli {
    let argv = std::iter::once("netopo").chain(args.iter().copied());
    match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => panic!("arguments {args:?} must parse: {err}"),
    }
}

pub(super) fn run(args: &[&str]) -> ConversionSummary {
    match run_cli(parse(args)) {
        Ok(summary) => summary,
        Err(err) => panic!("command {args:?} must succeed: {err}"),
    }
}

pub(super) fn run_expecting_error(args: &[&str]) -> CliError {
    match run_cli(parse(args)) {
        Ok(_) => panic!("command {args:?} must fail"),
        Err(err) => err,
    }
}
