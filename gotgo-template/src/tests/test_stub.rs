use crate::binder::Bindings;
use crate::header::parse_header;
use crate::lexer::TokenStream;
use crate::stub::*;
use pretty_assertions::assert_eq;

fn stub(source: &str, args: &[&str], prefix: &str) -> String {
    let mut stream = TokenStream::new(source).unwrap();
    let header = parse_header(&mut stream).unwrap();
    let bindings = Bindings::bind(&header, args);
    let mut out = String::new();
    write_stub(&mut out, &bindings, prefix);
    out
}

#[test]
fn test_stub_name_uses_prefix() {
    assert_eq!(stub_name(""), "testTypes");
    assert_eq!(stub_name("Vec"), "VectestTypes");
}

#[test]
fn test_interface_parameter_passed_without_conversion() {
    assert_eq!(
        stub("package p(type T)", &["int"], ""),
        "\n// testTypes fails to compile if a type argument does not fit its parameter.\n\
         func testTypes(arg0 int) {\n    \
         f := func(interface{}) { }\n    \
         f(arg0)\n\
         }\n"
    );
}

#[test]
fn test_concrete_parameter_is_converted() {
    assert_eq!(
        stub(
            "package num(type N float64, type S interface{ String() string })",
            &["celsius", "celsius"],
            "Temp"
        ),
        "\n// TemptestTypes fails to compile if a type argument does not fit its parameter.\n\
         func TemptestTypes(arg0 celsius, arg1 celsius) {\n    \
         f := func(float64, interface{String()string}) { }\n    \
         f(float64(arg0), arg1)\n\
         }\n"
    );
}

#[test]
fn test_same_as_first_uses_first_abstract_type() {
    let out = stub("package pair(type A int, type B A)", &["myInt"], "");
    assert!(out.contains("func testTypes(arg0 myInt, arg1 myInt) {"));
    assert!(out.contains("f := func(int, int) { }"));
    assert!(out.contains("f(int(arg0), int(arg1))"));
}

#[test]
fn test_pointer_abstract_type_is_parenthesised() {
    let out = stub("package p(type P *node)", &["*node"], "");
    assert!(out.contains("f((*node)(arg0))"));
}

#[test]
fn test_qualified_binding_in_stub_parameters() {
    let out = stub("package p(type T)", &["net/http.Client"], "");
    assert!(out.contains("func testTypes(arg0 T.Client) {"));
}
