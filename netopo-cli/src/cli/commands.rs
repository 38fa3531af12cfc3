//! Command implementations and argument parsing for the netopo CLI.

use std::{
    fmt,
    io::{self, Write},
    str::FromStr,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use netopo_core::{
    AdapterError, CapacityUnit, ConversionReport, DatacenterTopology, DelayUnit, Edge,
    GraphAdapter, SimpleGraph, SkippedEdge, TopologyError, UnsupportedPolicy, bcube_topology,
    fat_tree_topology, three_tier_topology, two_tier_topology,
};
use petgraph::graph::UnGraph;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "netopo",
    about = "Generate network topologies and convert them into graphs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a datacenter topology and convert it into a graph.
    Convert(ConvertCommand),
}

/// Graph representation to convert into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TargetKind {
    /// Multigraph that keeps self-loops and parallel edges.
    #[default]
    Multigraph,
    /// Simple graph that refuses self-loops and parallel edges.
    Simple,
}

impl TargetKind {
    /// Returns the label used on the command line and in summaries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Multigraph => "multigraph",
            Self::Simple => "simple",
        }
    }
}

/// Command-line spelling of [`UnsupportedPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Fail on the first edge the target cannot hold.
    #[default]
    Abort,
    /// Drop such edges and list them in the summary.
    Skip,
}

impl From<PolicyArg> for UnsupportedPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Abort => Self::Abort,
            PolicyArg::Skip => Self::Skip,
        }
    }
}

/// Options accepted by the `convert` command.
#[derive(Debug, Args, Clone)]
pub struct ConvertCommand {
    /// Graph representation to produce.
    #[arg(long, value_enum, default_value_t = TargetKind::Multigraph)]
    pub target: TargetKind,

    /// What to do with edges the target cannot represent.
    #[arg(long = "on-unsupported", value_enum, default_value_t = PolicyArg::Abort)]
    pub on_unsupported: PolicyArg,

    /// Capacity assigned to every link.
    #[arg(long)]
    pub capacity: Option<f64>,

    /// Unit of `--capacity`.
    #[arg(long = "capacity-unit", default_value = "Gbps")]
    pub capacity_unit: CapacityUnit,

    /// Delay assigned to every link.
    #[arg(long)]
    pub delay: Option<f64>,

    /// Unit of `--delay`.
    #[arg(long = "delay-unit", default_value = "ms")]
    pub delay_unit: DelayUnit,

    /// Additional link between two generated nodes, written `SRC:DST`.
    /// May repeat; loops and duplicates of generated links are allowed.
    #[arg(long = "extra-link", value_name = "SRC:DST")]
    pub extra_links: Vec<ExtraLink>,

    /// Topology generator to run.
    #[command(subcommand)]
    pub generator: Generator,
}

/// Datacenter topology generators.
#[derive(Debug, Subcommand, Clone, Copy)]
pub enum Generator {
    /// K-ary fat tree.
    FatTree {
        /// Switch port count; must be positive and even.
        #[arg(long)]
        k: usize,
    },
    /// Two-tier spine and leaf fabric.
    TwoTier {
        /// Number of core switches.
        #[arg(long)]
        core: usize,
        /// Number of edge switches.
        #[arg(long)]
        edge: usize,
        /// Servers per edge switch.
        #[arg(long)]
        hosts: usize,
    },
    /// Three-tier core, aggregation and edge fabric.
    ThreeTier {
        /// Number of core switches.
        #[arg(long)]
        core: usize,
        /// Number of aggregation switches.
        #[arg(long)]
        aggregation: usize,
        /// Edge switches per aggregation switch.
        #[arg(long)]
        edge: usize,
        /// Servers per edge switch.
        #[arg(long)]
        hosts: usize,
    },
    /// BCube server-centric fabric.
    Bcube {
        /// Ports per switch.
        #[arg(long)]
        n: usize,
        /// Recursion level.
        #[arg(long)]
        k: u32,
    },
}

impl Generator {
    const fn label(self) -> &'static str {
        match self {
            Self::FatTree { .. } => "fat-tree",
            Self::TwoTier { .. } => "two-tier",
            Self::ThreeTier { .. } => "three-tier",
            Self::Bcube { .. } => "bcube",
        }
    }
}

/// A link added to a generated fabric, such as a redundant uplink or a
/// loopback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraLink {
    /// Identifier of the first endpoint.
    pub source: usize,
    /// Identifier of the second endpoint.
    pub target: usize,
}

/// Error raised when an `--extra-link` value is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected `SRC:DST` with numeric node identifiers, got `{raw}`")]
pub struct ParseExtraLinkError {
    raw: String,
}

impl FromStr for ExtraLink {
    type Err = ParseExtraLinkError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseExtraLinkError {
            raw: raw.to_owned(),
        };
        let (source, target) = raw.split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            source: source.trim().parse().map_err(|_| invalid())?,
            target: target.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for ExtraLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.target)
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Topology generation or link configuration failed.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// Conversion into the requested graph failed.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
    /// An `--extra-link` endpoint does not name a generated node.
    #[error("extra link {link} references node {node}, which the generated topology lacks")]
    UnknownNode {
        /// Link as supplied on the command line.
        link: ExtraLink,
        /// Missing endpoint.
        node: usize,
    },
}

impl CliError {
    /// Returns the stable error code of the underlying failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Topology(error) => error.code().as_str(),
            Self::Adapter(error) => error.code().as_str(),
            Self::UnknownNode { .. } => "CLI_UNKNOWN_NODE",
        }
    }
}

/// A link attribute applied uniformly during conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSetting<U> {
    /// Assigned value.
    pub value: f64,
    /// Unit of `value`.
    pub unit: U,
}

/// Outcome of a `convert` command.
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// Name of the generated topology.
    pub topology: String,
    /// Graph representation produced.
    pub target: TargetKind,
    /// Policy applied to unsupported edges.
    pub policy: UnsupportedPolicy,
    /// Number of switches in the topology.
    pub switches: usize,
    /// Number of servers in the topology.
    pub servers: usize,
    /// Capacity assigned to every link, if requested.
    pub capacity: Option<LinkSetting<CapacityUnit>>,
    /// Delay assigned to every link, if requested.
    pub delay: Option<LinkSetting<DelayUnit>>,
    /// Counts and skipped edges reported by the adapter.
    pub report: ConversionReport,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when generation or conversion fails.
///
/// # Examples
/// ```
/// use netopo_cli::cli::{Cli, run_cli};
/// use clap::Parser;
///
/// let cli = Cli::try_parse_from(["netopo", "convert", "fat-tree", "--k", "4"])?;
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.report.vertices(), 36);
/// assert_eq!(summary.report.edges(), 48);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ConversionSummary, CliError> {
    match cli.command {
        Command::Convert(convert) => {
            Span::current().record("command", field::display("convert"));
            run_convert(convert)
        }
    }
}

#[instrument(
    name = "cli.convert",
    err,
    skip(command),
    fields(
        generator = command.generator.label(),
        representation = command.target.as_str(),
        policy = field::Empty,
    ),
)]
pub(super) fn run_convert(command: ConvertCommand) -> Result<ConversionSummary, CliError> {
    let policy = UnsupportedPolicy::from(command.on_unsupported);
    Span::current().record("policy", field::display(policy));

    let mut datacenter = generate(command.generator)?;
    add_extra_links(&mut datacenter, &command.extra_links)?;
    let capacity = command.capacity.map(|value| LinkSetting {
        value,
        unit: command.capacity_unit,
    });
    let delay = command.delay.map(|value| LinkSetting {
        value,
        unit: command.delay_unit,
    });
    let topology = datacenter.topology_mut();
    if let Some(setting) = capacity {
        topology.set_capacities_constant(setting.value, setting.unit);
    }
    if let Some(setting) = delay {
        topology.set_delays_constant(setting.value, setting.unit);
    }

    let adapter = GraphAdapter::new().with_unsupported_policy(policy);
    let topology = datacenter.topology();
    let report = match command.target {
        TargetKind::Multigraph => {
            adapter
                .convert_with_report::<UnGraph<usize, Edge>, _, _>(topology)?
                .1
        }
        TargetKind::Simple => {
            adapter
                .convert_with_report::<SimpleGraph<usize, Edge>, _, _>(topology)?
                .1
        }
    };

    info!(
        vertices = report.vertices(),
        edges = report.edges(),
        skipped = report.skipped().len(),
        "conversion completed"
    );
    Ok(ConversionSummary {
        topology: topology.name().unwrap_or_default().to_owned(),
        target: command.target,
        policy,
        switches: datacenter.number_of_switches(),
        servers: datacenter.number_of_servers(),
        capacity,
        delay,
        report,
    })
}

#[instrument(name = "cli.generate", err)]
pub(super) fn generate(generator: Generator) -> Result<DatacenterTopology, CliError> {
    let topology = match generator {
        Generator::FatTree { k } => fat_tree_topology(k)?,
        Generator::TwoTier { core, edge, hosts } => two_tier_topology(core, edge, hosts)?,
        Generator::ThreeTier {
            core,
            aggregation,
            edge,
            hosts,
        } => three_tier_topology(core, aggregation, edge, hosts)?,
        Generator::Bcube { n, k } => bcube_topology(n, k)?,
    };
    Ok(topology)
}

fn add_extra_links(datacenter: &mut DatacenterTopology, links: &[ExtraLink]) -> Result<(), CliError> {
    let topology = datacenter.topology_mut();
    for &link in links {
        let missing = [link.source, link.target]
            .into_iter()
            .find(|node| !topology.contains_node(node));
        if let Some(node) = missing {
            return Err(CliError::UnknownNode { link, node });
        }
        topology.add_edge(link.source, link.target, Edge::new());
    }
    Ok(())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ConversionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "topology: {}", summary.topology)?;
    writeln!(
        writer,
        "target: {} (on unsupported: {})",
        summary.target.as_str(),
        summary.policy
    )?;
    writeln!(
        writer,
        "switches: {}, servers: {}",
        summary.switches, summary.servers
    )?;
    if let Some(LinkSetting { value, unit }) = summary.capacity {
        writeln!(writer, "capacity: {value} {unit}")?;
    }
    if let Some(LinkSetting { value, unit }) = summary.delay {
        writeln!(writer, "delay: {value} {unit}")?;
    }
    writeln!(writer, "vertices: {}", summary.report.vertices())?;
    writeln!(writer, "edges: {}", summary.report.edges())?;
    let skipped = summary.report.skipped();
    writeln!(writer, "skipped: {}", skipped.len())?;
    for edge in skipped {
        write_skipped(&mut writer, edge)?;
    }
    Ok(())
}

fn write_skipped(writer: &mut impl Write, edge: &SkippedEdge) -> io::Result<()> {
    writeln!(
        writer,
        "{}\t{}\t{}\t{}",
        edge.edge_index(),
        edge.source_node(),
        edge.target_node(),
        edge.violation()
    )
}
