// Gotgo Validation Stub
// Emits a function that only compiles if every binding converts to its abstract type

use crate::binder::Bindings;

/// Appended to the prefix to name the generated function
pub const STUB_SUFFIX: &str = "testTypes";

/// Name of the validation function for `prefix`
pub fn stub_name(prefix: &str) -> String {
    format!("{prefix}{STUB_SUFFIX}")
}

/// Write the validation function to `out`.
///
/// Stub parameters use the concrete types; the inner function uses the
/// abstract ones, and each argument is converted unless its abstract type is
/// an interface literal.
pub fn write_stub(out: &mut String, bindings: &Bindings, prefix: &str) {
    let params = bindings
        .iter()
        .enumerate()
        .map(|(i, (_, b))| format!("arg{i} {}", b.concrete))
        .collect::<Vec<_>>()
        .join(", ");

    let abstract_types = bindings
        .iter()
        .map(|(_, b)| b.abstract_type.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let call_args = bindings
        .iter()
        .enumerate()
        .map(|(i, (_, b))| {
            let arg = format!("arg{i}");
            if b.needs_conversion {
                conversion(&b.abstract_type, &arg)
            } else {
                arg
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let name = stub_name(prefix);
    out.push_str(&format!(
        "\n// {name} fails to compile if a type argument does not fit its parameter.\n\
         func {name}({params}) {{\n    \
         f := func({abstract_types}) {{ }}\n    \
         f({call_args})\n\
         }}\n"
    ));
}

/// Explicit conversion `T(arg)`, parenthesising types that would otherwise misparse
fn conversion(ty: &str, arg: &str) -> String {
    if ty.starts_with('*') || ty.starts_with("<-") || ty.starts_with("func") {
        format!("({ty})({arg})")
    } else {
        format!("{ty}({arg})")
    }
}
