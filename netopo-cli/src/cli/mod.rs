//! Command-line interface for generating datacenter topologies and converting
//! them into graph representations.

mod commands;

pub use commands::{
    Cli, CliError, Command, ConversionSummary, ConvertCommand, ExtraLink, Generator, LinkSetting,
    ParseExtraLinkError, PolicyArg, TargetKind, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
