use crate::paths::*;
use std::path::{Path, PathBuf};

#[test]
fn test_clean_path_folds_dots() {
    assert_eq!(clean_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
    assert_eq!(clean_path(Path::new("./list")), PathBuf::from("list"));
    assert_eq!(clean_path(Path::new("../up/x")), PathBuf::from("../up/x"));
    assert_eq!(clean_path(Path::new("a/..")), PathBuf::from("."));
    assert_eq!(clean_path(Path::new("/../root")), PathBuf::from("/root"));
}

#[test]
fn test_with_suffix_keeps_existing_extension() {
    assert_eq!(with_suffix(Path::new("dir/list"), "go"), PathBuf::from("dir/list.go"));
    assert_eq!(with_suffix(Path::new("v1.2/main"), "6"), PathBuf::from("v1.2/main.6"));
    assert_eq!(with_suffix(Path::new("gen.int"), "go"), PathBuf::from("gen.int.go"));
}

#[test]
fn test_unit_for_target_strips_source_extension() {
    assert_eq!(unit_for_target(Path::new("./prog/main.go")), PathBuf::from("prog/main"));
    assert_eq!(unit_for_target(Path::new("prog/main")), PathBuf::from("prog/main"));
    assert_eq!(unit_for_target(Path::new("main.got")), PathBuf::from("main.got"));
}
