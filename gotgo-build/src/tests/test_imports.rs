use crate::imports::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

#[test]
fn test_single_and_grouped_imports() {
    let source = r#"package main

import "fmt"
import str "strings"
import (
	"./list"
	. "./dot"
	_ `./blank`
	http "net/http"
)

func main() { fmt.Println("import \"not/this\"") }
"#;
    assert_eq!(
        import_paths(source).unwrap(),
        vec!["fmt", "strings", "./list", "./dot", "./blank", "net/http"]
    );
}

#[test]
fn test_no_imports() {
    assert!(import_paths("package util\n\nfunc F() {}\n").unwrap().is_empty());
}

#[test]
fn test_local_imports_resolve_against_file_directory() {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("app");
    fs::create_dir(&app).unwrap();
    let main = app.join("main.go");
    fs::write(
        &main,
        "package main\nimport (\n\t\"os\"\n\t\"./list\"\n\t\"../shared/util\"\n)\n",
    )
    .unwrap();

    let imports: Vec<PathBuf> = local_imports(&main).unwrap().into_iter().collect();
    assert_eq!(
        imports,
        vec![
            crate::clean_path(&app.join("list")),
            crate::clean_path(&dir.path().join("shared/util")),
        ]
    );
}

#[test]
fn test_local_imports_of_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = local_imports(&dir.path().join("absent.go")).unwrap_err();
    assert!(matches!(err, crate::BuildError::Io { .. }));
}

#[test]
fn test_local_imports_of_unscannable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.go");
    fs::write(&path, "package bad\nvar s = \"unterminated\n").unwrap();

    let err = local_imports(&path).unwrap_err();
    assert!(matches!(err, crate::BuildError::Scan { .. }));
}
