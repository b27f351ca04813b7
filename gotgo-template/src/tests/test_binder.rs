use crate::binder::*;
use crate::header::{parse_header, TemplateHeader, ANY_TYPE};
use crate::lexer::TokenStream;

fn header(source: &str) -> TemplateHeader {
    let mut stream = TokenStream::new(source).unwrap();
    parse_header(&mut stream).unwrap()
}

fn bind(source: &str, args: &[&str]) -> Bindings {
    Bindings::bind(&header(source), args)
}

#[test]
fn test_defaulting_reuses_first_binding_when_constraint_names_it() {
    let bindings = bind("package pair(type T0, type T1 T0)", &[]);
    assert_eq!(bindings.concrete("T0"), Some(ANY_TYPE));
    assert_eq!(bindings.concrete("T1"), Some(ANY_TYPE));

    let bindings = bind("package pair(type T0, type T1 T0)", &["int"]);
    assert_eq!(bindings.concrete("T0"), Some("int"));
    assert_eq!(bindings.concrete("T1"), Some("int"));
}

#[test]
fn test_defaulting_leaves_other_parameters_abstract() {
    let bindings = bind("package pair(type T0, type T1 float64)", &[]);
    assert_eq!(bindings.concrete("T1"), Some("float64"));

    let bindings = bind("package pair(type T0 int, type T1 T2)", &["string"]);
    assert_eq!(bindings.concrete("T0"), Some("string"));
    assert_eq!(bindings.concrete("T1"), Some("T2"));
}

#[test]
fn test_fallback_policy() {
    let header = header("package p(type A, type B A, type C int, type D B)");
    let first = header.first_param();

    assert_eq!(fallback_for(0, &header.params[0], first), Fallback::Abstract);
    assert_eq!(fallback_for(1, &header.params[1], first), Fallback::SameAsFirst);
    assert_eq!(fallback_for(2, &header.params[2], first), Fallback::Abstract);
    assert_eq!(fallback_for(3, &header.params[3], first), Fallback::Abstract);
}

#[test]
fn test_first_parameter_naming_itself_stays_abstract() {
    let bindings = bind("package p(type A A)", &[]);
    assert_eq!(bindings.concrete("A"), Some("A"));
}

#[test]
fn test_qualified_argument_synthesizes_import() {
    let bindings = bind("package client(type T)", &["net/http.Client"]);

    assert_eq!(
        bindings.imports(),
        &[ImportSpec {
            alias: "T".to_string(),
            path: "net/http".to_string(),
        }]
    );
    assert_eq!(bindings.concrete("T"), Some("T.Client"));
    assert_eq!(bindings.imports()[0].to_string(), "import T \"net/http\"");
}

#[test]
fn test_qualified_pointer_argument_keeps_marker() {
    let bindings = bind("package client(type T)", &["*bytes.Buffer"]);

    assert_eq!(bindings.imports()[0].path, "bytes");
    assert_eq!(bindings.concrete("T"), Some("*T.Buffer"));
}

#[test]
fn test_qualified_array_argument_keeps_length() {
    let bindings = bind("package p(type T)", &["[4]net.IP"]);

    assert_eq!(bindings.imports()[0].to_string(), "import T \"net\"");
    assert_eq!(bindings.concrete("T"), Some("[4]T.IP"));
}

#[test]
fn test_qualified_slice_of_pointers_keeps_markers() {
    let bindings = bind("package p(type T)", &["[]*bytes.Buffer"]);

    assert_eq!(bindings.imports()[0].path, "bytes");
    assert_eq!(bindings.concrete("T"), Some("[]*T.Buffer"));
}

#[test]
fn test_unqualified_arguments_add_no_imports() {
    let bindings = bind("package m(type K, type V)", &["string", "[]int"]);

    assert!(bindings.imports().is_empty());
    assert_eq!(bindings.concrete("K"), Some("string"));
    assert_eq!(bindings.concrete("V"), Some("[]int"));
}

#[test]
fn test_excess_arguments_are_ignored() {
    let bindings = bind("package one(type T)", &["int", "other.Type", "float64"]);

    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings.concrete("T"), Some("int"));
    assert!(bindings.imports().is_empty());
}

#[test]
fn test_conversion_depends_on_interface_literal() {
    let bindings = bind(
        "package p(type A interface{ String() string }, type B int, type C)",
        &["myStringer", "myInt", "any"],
    );

    assert!(!bindings.get("A").unwrap().needs_conversion);
    assert!(bindings.get("B").unwrap().needs_conversion);
    assert!(!bindings.get("C").unwrap().needs_conversion);
}

#[test]
fn test_same_as_first_abstract_type_uses_first_constraint() {
    let bindings = bind("package p(type A int, type B A)", &["myInt", "yourInt"]);
    let b = bindings.get("B").unwrap();

    assert_eq!(b.concrete, "yourInt");
    assert_eq!(b.abstract_type, "int");
    assert!(b.needs_conversion);
}

#[test]
fn test_bindings_iterate_in_declaration_order() {
    let bindings = bind("package p(type Z, type A, type M)", &["z", "a", "m"]);
    let order: Vec<&str> = bindings.iter().map(|(name, _)| name).collect();
    assert_eq!(order, vec!["Z", "A", "M"]);
}
