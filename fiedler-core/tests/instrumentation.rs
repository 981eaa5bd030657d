//! Instrumentation emitted while clustering.

use fiedler_core::{FiedlerError, Graph, SpectralClusteringBuilder};
use fiedler_test_support::{graphs::disjoint_triangles, tracing::with_recording};
use rstest::rstest;
use tracing::Level;

#[rstest]
fn run_emits_stage_spans() {
    let (layer, result) = with_recording(|| {
        SpectralClusteringBuilder::new()
            .build()
            .and_then(|clustering| clustering.run(&Graph::reference()))
    });
    result.expect("reference graph must cluster");

    let run = layer.span("core.run").expect("run span must close");
    assert_eq!(run.fields.get("graph").map(String::as_str), Some("reference"));
    assert_eq!(run.fields.get("nodes").map(String::as_str), Some("16"));
    assert_eq!(run.fields.get("edges").map(String::as_str), Some("23"));

    let decompose = layer
        .span("core.decompose")
        .expect("decompose span must close");
    assert_eq!(
        decompose.fields.get("dimension").map(String::as_str),
        Some("16")
    );

    let clusters: Vec<String> = layer
        .spans()
        .into_iter()
        .filter(|span| span.name == "core.cluster")
        .filter_map(|span| span.fields.get("clusters").cloned())
        .collect();
    assert_eq!(clusters, vec!["2", "3", "4"]);
}

#[rstest]
fn disconnected_graph_logs_a_warning() {
    let (layer, result) = with_recording(|| {
        SpectralClusteringBuilder::new()
            .with_cluster_counts([2])
            .build()
            .and_then(|clustering| clustering.run(&disjoint_triangles(2)))
    });
    result.expect("disconnected graphs still cluster");

    let warnings = layer.events_at(Level::WARN);
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].fields.get("components").map(String::as_str),
        Some("2")
    );
}

#[rstest]
fn connected_graph_logs_no_warning() {
    let (layer, _) = with_recording(|| {
        SpectralClusteringBuilder::new()
            .build()
            .and_then(|clustering| clustering.run(&Graph::reference()))
    });
    assert!(layer.events_at(Level::WARN).is_empty());
}

#[rstest]
fn failed_run_records_the_error() {
    let graph = Graph::from_edges("edge", [(0, 1)]).expect("graph is valid");
    let (layer, result) = with_recording(|| {
        SpectralClusteringBuilder::new()
            .build()
            .and_then(|clustering| clustering.run(&graph))
    });
    assert!(matches!(result, Err(FiedlerError::GraphTooSmall { .. })));
    let errors = layer.events_at(Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0]
            .fields
            .get("error")
            .is_some_and(|message| message.contains("at least 3"))
    );
}
