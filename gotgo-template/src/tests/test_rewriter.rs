use crate::binder::Bindings;
use crate::header::parse_header;
use crate::lexer::TokenStream;
use crate::rewriter::Rewriter;
use pretty_assertions::assert_eq;

fn rewrite(source: &str, args: &[&str], prefix: &str) -> String {
    let mut stream = TokenStream::new(source).unwrap();
    let header = parse_header(&mut stream).unwrap();
    let bindings = Bindings::bind(&header, args);
    Rewriter::new(&bindings, &header.package_name, prefix).rewrite(&mut stream, header.body_start)
}

#[test]
fn test_parameter_names_are_substituted() {
    let source = "package list(type T)\nfunc Push(xs []T, x T) []T { return append(xs, x) }\n";
    assert_eq!(
        rewrite(source, &["int"], ""),
        "\nfunc Push(xs []int, x int) []int { return append(xs, x) }\n"
    );
}

#[test]
fn test_unmatched_bindings_pass_body_through_byte_for_byte() {
    let body = "\n\n// Sum adds   things.\nfunc Sum(a, b int) int {\n\treturn a + b /* T */\n}\n\n";
    let source = format!("package sum(type Unused){body}");
    assert_eq!(rewrite(&source, &["float64"], "Pre"), body);
}

#[test]
fn test_package_qualifier_replaced_by_prefix() {
    let source = "package P(type T)\nfunc f() { P.G(); P . H(); var P int; _ = P }\n";
    assert_eq!(
        rewrite(source, &["int"], "Vec"),
        "\nfunc f() { VecG(); Vec H(); var P int; _ = P }\n"
    );
}

#[test]
fn test_empty_prefix_drops_qualifier() {
    let source = "package stack(type T)\nvar s = stack.New()\n";
    assert_eq!(rewrite(source, &["int"], ""), "\nvar s = New()\n");
}

#[test]
fn test_strings_and_comments_are_not_substituted() {
    let source = "package p(type T)\nvar s = \"T\" // T here\nvar t T\n";
    assert_eq!(
        rewrite(source, &["rune"], ""),
        "\nvar s = \"T\" // T here\nvar t rune\n"
    );
}

#[test]
fn test_field_and_method_names_are_substituted_lexically() {
    // Shadowing is not scope aware: every identifier token named T is rewritten.
    let source = "package p(type T)\nfunc f(T int) { x.T = T }\n";
    assert_eq!(
        rewrite(source, &["string"], ""),
        "\nfunc f(string int) { x.string = string }\n"
    );
}

#[test]
fn test_qualified_binding_uses_alias() {
    let source = "package p(type T)\nvar c *T\n";
    assert_eq!(rewrite(source, &["net/http.Client"], ""), "\nvar c *T.Client\n");
}

#[test]
fn test_trailing_package_identifier_is_kept() {
    let source = "package p(type T)\nvar x = p";
    assert_eq!(rewrite(source, &["int"], "Z"), "\nvar x = p");
}
