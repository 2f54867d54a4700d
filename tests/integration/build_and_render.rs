//! End-to-end tests: build graphs from real directories, merge, render.

use ska::graph::{union, CollisionAction, MergeOptions, NodeKind};
use ska::render::render_tree;
use ska::source::build_tree;
use std::fs;
use tempfile::TempDir;

fn options(action: CollisionAction) -> MergeOptions {
    MergeOptions::new(action).unwrap()
}

#[test]
fn test_build_and_render_listing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("tpl");
    fs::create_dir(&root).unwrap();
    fs::create_dir(root.join("src")).unwrap();
    fs::write(root.join("src").join("main.rs"), "fn main() {}").unwrap();
    fs::write(root.join("README.tmpl"), "# {{ .Name }}").unwrap();

    let built = build_tree(&root).unwrap();
    let lines = render_tree(&built.graph);

    assert_eq!(
        lines,
        vec![
            "[DIR] tpl",
            "  [FILE:TEMPLATE] README.tmpl",
            "  [DIR] src",
            "    [FILE:COPY] main.rs",
        ]
    );
}

#[test]
fn test_merge_two_directory_trees() {
    // Control:                     Overlay:
    // tpl/                         tpl/
    //   dir1/                        dir1/
    //     f1.txt                       f2.txt
    //   f_root.txt                   dir2/
    //                                  f3.txt
    //                                f_add.txt
    let temp_dir = TempDir::new().unwrap();
    let control_root = temp_dir.path().join("control").join("tpl");
    fs::create_dir_all(control_root.join("dir1")).unwrap();
    fs::write(control_root.join("dir1").join("f1.txt"), "one").unwrap();
    fs::write(control_root.join("f_root.txt"), "root file").unwrap();

    let overlay_root = temp_dir.path().join("overlay").join("tpl");
    fs::create_dir_all(overlay_root.join("dir1")).unwrap();
    fs::create_dir_all(overlay_root.join("dir2")).unwrap();
    fs::write(overlay_root.join("dir1").join("f2.txt"), "two").unwrap();
    fs::write(overlay_root.join("dir2").join("f3.txt"), "three").unwrap();
    fs::write(overlay_root.join("f_add.txt"), "added").unwrap();

    let control = build_tree(&control_root).unwrap().graph;
    let overlay = build_tree(&overlay_root).unwrap().graph;

    let merged = union(&options(CollisionAction::Error), control, vec![overlay]).unwrap();
    let root = merged.root();

    assert_eq!(merged.key(root).unwrap(), "tpl");
    assert_eq!(merged.children(root).len(), 4);

    let dir1 = merged.find_child(root, "dir1").unwrap();
    assert_eq!(merged.kind(dir1).unwrap(), NodeKind::Directory);
    assert_eq!(merged.children(dir1).len(), 2);
    assert!(merged.find_child(dir1, "f1.txt").is_some());
    assert!(merged.find_child(dir1, "f2.txt").is_some());

    let dir2 = merged.find_child(root, "dir2").unwrap();
    assert!(merged.find_child(dir2, "f3.txt").is_some());
    assert!(merged.find_child(root, "f_add.txt").is_some());
}

#[test]
fn test_merge_mismatched_roots_from_filesystem() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");
    fs::create_dir(&a).unwrap();
    fs::create_dir(&b).unwrap();

    let control = build_tree(&a).unwrap().graph;
    let overlay = build_tree(&b).unwrap().graph;

    let err = union(&options(CollisionAction::Error), control, vec![overlay]).unwrap_err();
    assert!(matches!(
        err,
        ska::error::GraphError::MismatchedRoot { .. }
    ));
}

#[test]
fn test_merge_resolves_file_collision_from_filesystem() {
    let temp_dir = TempDir::new().unwrap();
    let control_root = temp_dir.path().join("control").join("tpl");
    let overlay_root = temp_dir.path().join("overlay").join("tpl");
    fs::create_dir_all(&control_root).unwrap();
    fs::create_dir_all(&overlay_root).unwrap();
    fs::write(control_root.join("conf.yaml"), "control: true").unwrap();
    fs::write(overlay_root.join("conf.yaml"), "overlay: true").unwrap();

    let control = build_tree(&control_root).unwrap().graph;
    let overlay = build_tree(&overlay_root).unwrap().graph;
    let overlay_fp = {
        let id = overlay.find_child(overlay.root(), "conf.yaml").unwrap();
        overlay.fingerprint(id).unwrap().unwrap()
    };

    let merged = union(&options(CollisionAction::Yield), control, vec![overlay]).unwrap();
    let conf = merged.find_child(merged.root(), "conf.yaml").unwrap();
    assert_eq!(merged.fingerprint(conf).unwrap().unwrap(), overlay_fp);
}
