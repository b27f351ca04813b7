// Gotgo Instantiation
// Header parser -> type binder -> rewriter -> stub generator over one token stream

use crate::binder::Bindings;
use crate::error::{TemplateError, TemplateResult};
use crate::header::{parse_header, TemplateHeader};
use crate::lexer::TokenStream;
use crate::rewriter::Rewriter;
use crate::stub::write_stub;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Caller overrides for one instantiation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Output package name; the template's declared name when `None`
    pub package_name: Option<String>,
    /// Replaces `pkg.` qualifiers and prefixes the stub function name
    pub prefix: String,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// Everything produced by a successful instantiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instantiation {
    pub header: TemplateHeader,
    pub bindings: Bindings,
    pub output: String,
}

/// Instantiate `source` with `args`, returning the parsed pieces and the output
pub fn instantiate<S: AsRef<str>>(
    source: &str,
    args: &[S],
    options: &GenerateOptions,
) -> TemplateResult<Instantiation> {
    let mut stream = TokenStream::new(source)?;
    let header = parse_header(&mut stream)?;
    let bindings = Bindings::bind(&header, args);

    let package_name = options
        .package_name
        .as_deref()
        .unwrap_or(&header.package_name);

    debug!(
        template_package = %header.package_name,
        package = %package_name,
        params = header.params.len(),
        imports = bindings.imports().len(),
        "instantiating template"
    );

    let mut output = String::with_capacity(source.len() + 256);
    output.push_str("package ");
    output.push_str(package_name);
    output.push_str("\n\n");
    for import in bindings.imports() {
        output.push_str(&import.to_string());
        output.push('\n');
    }

    Rewriter::new(&bindings, &header.package_name, &options.prefix).rewrite_into(
        &mut stream,
        header.body_start,
        &mut output,
    );
    write_stub(&mut output, &bindings, &options.prefix);

    Ok(Instantiation {
        header,
        bindings,
        output,
    })
}

/// Instantiate template text, returning only the generated source
pub fn generate<S: AsRef<str>>(
    source: &str,
    args: &[S],
    options: &GenerateOptions,
) -> TemplateResult<String> {
    instantiate(source, args, options).map(|inst| inst.output)
}

/// Read and instantiate the template at `path`
pub fn generate_file<S: AsRef<str>>(
    path: impl AsRef<Path>,
    args: &[S],
    options: &GenerateOptions,
) -> TemplateResult<String> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| TemplateError::io(path, e))?;
    generate(&source, args, options)
}
