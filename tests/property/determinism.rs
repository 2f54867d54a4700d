//! Property-based tests for determinism guarantees

use proptest::prelude::*;
use ska::graph::fingerprint;
use ska::graph::{union, CollisionAction, Graph, MergeOptions};
use ska::render::render_tree;

/// Construct a flat graph with the given files, skipping duplicate keys.
fn build_graph(files: &[(String, Vec<u8>)]) -> Graph {
    let mut graph = Graph::with_directory_root("root");
    for (name, content) in files {
        if graph.find_child(graph.root(), name).is_some() {
            continue;
        }
        let id = graph.add_file(name.clone());
        graph.set_content(id, content).unwrap();
        graph.add_child(graph.root(), id).unwrap();
    }
    graph
}

fn file_set() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    proptest::collection::vec(
        (
            proptest::string::string_regex("[a-z]{1,6}\\.txt").unwrap(),
            any::<Vec<u8>>(),
        ),
        0..8,
    )
}

/// Fingerprint computation is deterministic and content-sensitive.
#[test]
fn test_fingerprint_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(any::<Vec<u8>>(), any::<Vec<u8>>()),
            |(content1, content2)| {
                let fp1 = fingerprint::content_fingerprint(&content1);
                let fp2 = fingerprint::content_fingerprint(&content2);

                if content1 == content2 {
                    assert_eq!(fp1, fp2);
                } else {
                    assert_ne!(fp1, fp2);
                }

                Ok(())
            },
        )
        .unwrap();
}

/// Union output is structurally identical across runs on equal inputs.
#[test]
fn test_union_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(file_set(), file_set()), |(control_files, overlay_files)| {
            let opts = MergeOptions::new(CollisionAction::Overwrite).unwrap();

            let first = union(
                &opts,
                build_graph(&control_files),
                vec![build_graph(&overlay_files)],
            )
            .unwrap();
            let second = union(
                &opts,
                build_graph(&control_files),
                vec![build_graph(&overlay_files)],
            )
            .unwrap();

            assert_eq!(render_tree(&first), render_tree(&second));
            Ok(())
        })
        .unwrap();
}

/// A union with no overlays leaves the graph unchanged.
#[test]
fn test_union_without_overlays_is_identity_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&file_set(), |files| {
            let opts = MergeOptions::new(CollisionAction::Error).unwrap();
            let before = render_tree(&build_graph(&files));
            let merged = union(&opts, build_graph(&files), vec![]).unwrap();

            assert_eq!(render_tree(&merged), before);
            Ok(())
        })
        .unwrap();
}
