//! Unit tests for CLI parsing, execution and rendering.

use super::commands::generate;
use super::test_helpers::{parse, run, run_expecting_error};
use super::{
    Cli, CliError, Command, ConversionSummary, ConvertCommand, ExtraLink, Generator, LinkSetting,
    PolicyArg, TargetKind, render_summary,
};

use clap::Parser;
use netopo_core::{
    AdapterError, CapacityUnit, ConversionReport, DelayUnit, GraphAdapter, StructureViolation,
    TopologyError, TopologyErrorCode, UnsupportedPolicy,
};
use rstest::rstest;
use tracing::Level;

use netopo_test_support::tracing::RecordingLayer;

#[rstest]
fn convert_defaults_to_multigraph_and_abort() {
    let Cli {
        command: Command::Convert(command),
    } = parse(&["convert", "fat-tree", "--k", "4"]);
    assert_eq!(command.target, TargetKind::Multigraph);
    assert_eq!(command.on_unsupported, PolicyArg::Abort);
    assert_eq!(command.capacity_unit, CapacityUnit::Gbps);
    assert_eq!(command.delay_unit, DelayUnit::Milliseconds);
    assert!(matches!(command.generator, Generator::FatTree { k: 4 }));
}

#[rstest]
fn unknown_units_are_rejected_by_the_parser() {
    let result = Cli::try_parse_from([
        "netopo",
        "convert",
        "--capacity",
        "1",
        "--capacity-unit",
        "furlongs",
        "fat-tree",
        "--k",
        "4",
    ]);
    assert!(result.is_err());
}

#[rstest]
#[case::fat_tree(&["convert", "fat-tree", "--k", "8"], 80, 128)]
#[case::two_tier(&["convert", "two-tier", "--core", "10", "--edge", "20", "--hosts", "30"], 30, 600)]
#[case::three_tier(
    &["convert", "three-tier", "--core", "10", "--aggregation", "20", "--edge", "5", "--hosts", "6"],
    130,
    600,
)]
#[case::bcube(&["convert", "bcube", "--n", "2", "--k", "3"], 32, 16)]
fn generators_report_switch_and_server_counts(
    #[case] args: &[&str],
    #[case] switches: usize,
    #[case] servers: usize,
) {
    let summary = run(args);
    assert_eq!(summary.switches, switches);
    assert_eq!(summary.servers, servers);
    assert_eq!(summary.report.vertices(), switches + servers);
    assert!(summary.report.is_complete());
}

#[rstest]
#[case(TargetKind::Multigraph)]
#[case(TargetKind::Simple)]
fn both_targets_hold_generated_fabrics(#[case] target: TargetKind) {
    let summary = run(&["convert", "--target", target.as_str(), "fat-tree", "--k", "4"]);
    assert_eq!(summary.target, target);
    assert_eq!(summary.report.edges(), 48);
}

#[rstest]
fn link_settings_are_recorded() {
    let summary = run(&[
        "convert",
        "--capacity",
        "40",
        "--capacity-unit",
        "gbps",
        "--delay",
        "2.5",
        "--delay-unit",
        "us",
        "bcube",
        "--n",
        "2",
        "--k",
        "1",
    ]);
    assert_eq!(
        summary.capacity,
        Some(LinkSetting {
            value: 40.0,
            unit: CapacityUnit::Gbps
        })
    );
    assert_eq!(
        summary.delay,
        Some(LinkSetting {
            value: 2.5,
            unit: DelayUnit::Microseconds
        })
    );
}

#[rstest]
fn invalid_generator_parameters_surface_topology_errors() {
    let err = run_expecting_error(&["convert", "fat-tree", "--k", "11"]);
    assert_eq!(err.code(), "TOPOLOGY_INVALID_PARAMETER");
    assert!(matches!(
        err,
        CliError::Topology(TopologyError::InvalidParameter { parameter: "k", .. })
    ));
}

#[rstest]
fn generate_maps_each_generator() {
    let topology = generate(Generator::TwoTier {
        core: 1,
        edge: 2,
        hosts: 3,
    })
    .expect("parameters are valid");
    assert_eq!(topology.number_of_servers(), 6);

    let err = generate(Generator::Bcube { n: 0, k: 1 }).expect_err("n = 0 is invalid");
    assert!(matches!(
        err,
        CliError::Topology(ref error) if error.code() == TopologyErrorCode::InvalidParameter
    ));
}

#[rstest]
fn render_summary_lists_counts_settings_and_skips() {
    let mut topology: netopo_core::Topology = netopo_core::Topology::new();
    topology.add_edge("a", "a", netopo_core::Edge::new());
    topology.add_edge("a", "b", netopo_core::Edge::new());
    let (_, report) = GraphAdapter::new()
        .with_unsupported_policy(UnsupportedPolicy::Skip)
        .convert_with_report::<netopo_core::SimpleGraph<String, netopo_core::Edge>, _, _>(
            &topology,
        )
        .expect("skip policy never fails");
    assert_eq!(report.skipped()[0].violation(), StructureViolation::SelfLoop);

    let summary = ConversionSummary {
        topology: "demo".to_owned(),
        target: TargetKind::Simple,
        policy: UnsupportedPolicy::Skip,
        switches: 1,
        servers: 1,
        capacity: Some(LinkSetting {
            value: 10.0,
            unit: CapacityUnit::Gbps,
        }),
        delay: None,
        report,
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer).expect("writing to a Vec cannot fail");
    let rendered = String::from_utf8(buffer).expect("summary is UTF-8");
    assert_eq!(
        rendered,
        "topology: demo\n\
         target: simple (on unsupported: skip)\n\
         switches: 1, servers: 1\n\
         capacity: 10 Gbps\n\
         vertices: 2\n\
         edges: 1\n\
         skipped: 1\n\
         0\ta\ta\tself-loop\n"
    );
}

#[rstest]
fn empty_report_renders_without_skips() {
    let summary = ConversionSummary {
        topology: String::new(),
        target: TargetKind::Multigraph,
        policy: UnsupportedPolicy::Abort,
        switches: 0,
        servers: 0,
        capacity: None,
        delay: None,
        report: ConversionReport::default(),
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer).expect("writing to a Vec cannot fail");
    let rendered = String::from_utf8(buffer).expect("summary is UTF-8");
    assert!(rendered.ends_with("skipped: 0\n"));
}

#[rstest]
fn run_cli_records_command_spans() {
    let cli = parse(&["convert", "--on-unsupported", "skip", "bcube", "--n", "2", "--k", "1"]);
    let (outcome, layer) = RecordingLayer::capture(|| super::run_cli(cli));
    assert!(outcome.is_ok());

    let run_span = layer.span_named("cli.run").expect("cli.run span must exist");
    assert_eq!(run_span.field("command"), Some("convert"));
    let convert_span = layer
        .span_named("cli.convert")
        .expect("cli.convert span must exist");
    assert_eq!(convert_span.field("generator"), Some("bcube"));
    assert_eq!(convert_span.field("representation"), Some("multigraph"));
    assert_eq!(convert_span.field("policy"), Some("skip"));
    assert!(layer.span_named("core.bcube").is_some());
    assert!(layer.span_named("core.convert").is_some());

    let completed = layer
        .events_at(Level::INFO)
        .into_iter()
        .find(|event| event.message() == Some("conversion completed"))
        .expect("completion event must be emitted");
    assert_eq!(completed.field("vertices"), Some("8"));
    assert_eq!(completed.field("edges"), Some("8"));
}

#[rstest]
fn convert_command_can_be_built_directly() {
    let command = ConvertCommand {
        target: TargetKind::Simple,
        on_unsupported: PolicyArg::Abort,
        capacity: None,
        capacity_unit: CapacityUnit::Mbps,
        delay: None,
        delay_unit: DelayUnit::Milliseconds,
        extra_links: Vec::new(),
        generator: Generator::FatTree { k: 2 },
    };
    let summary = super::run_cli(Cli {
        command: Command::Convert(command),
    })
    .expect("k = 2 is valid");
    assert_eq!(summary.topology, "fat_tree_topology(2)");
    assert_eq!(summary.report.vertices(), 7);
}

#[rstest]
#[case("3:7", ExtraLink { source: 3, target: 7 })]
#[case(" 0 : 0 ", ExtraLink { source: 0, target: 0 })]
fn extra_links_parse(#[case] raw: &str, #[case] expected: ExtraLink) {
    let link: ExtraLink = raw.parse().expect("link must parse");
    assert_eq!(link, expected);
}

#[rstest]
#[case("3")]
#[case("a:1")]
#[case("1:-2")]
fn malformed_extra_links_are_rejected_by_the_parser(#[case] raw: &str) {
    let result = Cli::try_parse_from([
        "netopo",
        "convert",
        "--extra-link",
        raw,
        "fat-tree",
        "--k",
        "2",
    ]);
    assert!(result.is_err());
}

#[rstest]
fn multigraph_keeps_extra_loops_and_parallels() {
    let summary = run(&[
        "convert",
        "--extra-link",
        "0:0",
        "--extra-link",
        "0:1",
        "fat-tree",
        "--k",
        "2",
    ]);
    assert_eq!(summary.report.vertices(), 7);
    assert_eq!(summary.report.edges(), 8);
    assert!(summary.report.is_complete());
}

#[rstest]
fn simple_target_aborts_on_extra_loop() {
    let err = run_expecting_error(&[
        "convert",
        "--target",
        "simple",
        "--extra-link",
        "0:0",
        "fat-tree",
        "--k",
        "2",
    ]);
    assert_eq!(err.code(), "ADAPTER_UNSUPPORTED_STRUCTURE");
    assert!(matches!(
        err,
        CliError::Adapter(AdapterError::UnsupportedStructure {
            violation: StructureViolation::SelfLoop,
            edge_index: 6,
            ..
        })
    ));
}

#[rstest]
fn simple_target_skips_extra_links_and_renders_them() {
    let summary = run(&[
        "convert",
        "--target",
        "simple",
        "--on-unsupported",
        "skip",
        "--extra-link",
        "0:0",
        "--extra-link",
        "0:1",
        "fat-tree",
        "--k",
        "2",
    ]);
    assert_eq!(summary.report.edges(), 6);
    let skipped: Vec<(usize, StructureViolation)> = summary
        .report
        .skipped()
        .iter()
        .map(|edge| (edge.edge_index(), edge.violation()))
        .collect();
    assert_eq!(
        skipped,
        [
            (6, StructureViolation::SelfLoop),
            (7, StructureViolation::ParallelEdge),
        ]
    );

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer).expect("writing to a Vec cannot fail");
    let rendered = String::from_utf8(buffer).expect("summary is UTF-8");
    assert!(rendered.ends_with("skipped: 2\n6\t0\t0\tself-loop\n7\t0\t1\tparallel edge\n"));
}

#[rstest]
fn extra_link_to_missing_node_is_rejected() {
    let err = run_expecting_error(&["convert", "--extra-link", "0:99", "fat-tree", "--k", "2"]);
    assert_eq!(err.code(), "CLI_UNKNOWN_NODE");
    assert!(matches!(err, CliError::UnknownNode { node: 99, .. }));
}
