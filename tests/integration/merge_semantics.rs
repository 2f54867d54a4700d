//! Merge semantics across multiple inputs built from the filesystem.

use ska::graph::{union, CollisionAction, MergeOptions};
use ska::render::render_tree;
use ska::source::build_tree;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn options(action: CollisionAction) -> MergeOptions {
    MergeOptions::new(action).unwrap()
}

fn write_input(base: &Path, name: &str, files: &[(&str, &str)]) -> std::path::PathBuf {
    let root = base.join(name).join("tpl");
    for (rel, content) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    root
}

#[test]
fn test_three_way_merge_with_common_directory() {
    let temp_dir = TempDir::new().unwrap();
    let control_root = write_input(
        temp_dir.path(),
        "control",
        &[
            ("common_dir/control_file1.txt", "c1"),
            ("control_only_file.txt", "c"),
        ],
    );
    let overlay1_root = write_input(
        temp_dir.path(),
        "overlay1",
        &[
            ("common_dir/add1_file2.txt", "a1"),
            ("add1_only_dir/add1_file3.txt", "a13"),
        ],
    );
    let overlay2_root = write_input(
        temp_dir.path(),
        "overlay2",
        &[
            ("common_dir/add2_file4.txt", "a2"),
            ("add2_only_file.txt", "a"),
        ],
    );

    let control = build_tree(&control_root).unwrap().graph;
    let overlay1 = build_tree(&overlay1_root).unwrap().graph;
    let overlay2 = build_tree(&overlay2_root).unwrap().graph;

    let merged = union(
        &options(CollisionAction::Error),
        control,
        vec![overlay1, overlay2],
    )
    .unwrap();
    let root = merged.root();

    assert_eq!(merged.children(root).len(), 4);

    let common = merged.find_child(root, "common_dir").unwrap();
    assert_eq!(merged.children(common).len(), 3);
    assert!(merged.find_child(common, "control_file1.txt").is_some());
    assert!(merged.find_child(common, "add1_file2.txt").is_some());
    assert!(merged.find_child(common, "add2_file4.txt").is_some());

    assert!(merged.find_child(root, "control_only_file.txt").is_some());
    assert!(merged.find_child(root, "add1_only_dir").is_some());
    assert!(merged.find_child(root, "add2_only_file.txt").is_some());
}

#[test]
fn test_remerging_same_overlay_adds_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let control_root = write_input(temp_dir.path(), "control", &[("base.txt", "base")]);
    let overlay_root = write_input(temp_dir.path(), "overlay", &[("extra.txt", "extra")]);

    let opts = options(CollisionAction::Error);
    let control = build_tree(&control_root).unwrap().graph;
    let overlay = build_tree(&overlay_root).unwrap().graph;
    let once = union(&opts, control, vec![overlay]).unwrap();
    let once_lines = render_tree(&once);

    let overlay_again = build_tree(&overlay_root).unwrap().graph;
    let twice = union(&opts, once, vec![overlay_again]).unwrap();

    assert_eq!(render_tree(&twice), once_lines);
}

#[test]
fn test_merge_is_deterministic_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let control_root = write_input(
        temp_dir.path(),
        "control",
        &[("shared/one.txt", "1"), ("top.txt", "t")],
    );
    let overlay_root = write_input(
        temp_dir.path(),
        "overlay",
        &[("shared/two.txt", "2"), ("other.txt", "o")],
    );

    let opts = options(CollisionAction::Overwrite);
    let run = || {
        let control = build_tree(&control_root).unwrap().graph;
        let overlay = build_tree(&overlay_root).unwrap().graph;
        render_tree(&union(&opts, control, vec![overlay]).unwrap())
    };

    assert_eq!(run(), run());
}

#[test]
fn test_error_policy_aborts_whole_merge() {
    let temp_dir = TempDir::new().unwrap();
    let control_root = write_input(
        temp_dir.path(),
        "control",
        &[("conflict.txt", "control"), ("keep.txt", "k")],
    );
    let overlay_root = write_input(temp_dir.path(), "overlay", &[("conflict.txt", "overlay")]);

    let control = build_tree(&control_root).unwrap().graph;
    let overlay = build_tree(&overlay_root).unwrap().graph;

    let result = union(&options(CollisionAction::Error), control, vec![overlay]);
    match result {
        Err(ska::error::GraphError::ContentCollision { key, .. }) => {
            assert_eq!(key, "conflict.txt");
        }
        other => panic!("expected ContentCollision, got {other:?}"),
    }
}
