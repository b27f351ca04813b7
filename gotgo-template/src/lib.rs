// Gotgo Template Library
// Source-to-source instantiation of generic templates for the host language

pub mod binder;
pub mod error;
pub mod generate;
pub mod header;
pub mod lexer;
pub mod rewriter;
pub mod span;
pub mod stub;

pub use binder::{fallback_for, Binding, Bindings, Fallback, ImportSpec};
pub use error::*;
pub use generate::{generate, generate_file, instantiate, GenerateOptions, Instantiation};
pub use header::{parse_header, ParamDecl, TemplateHeader, ANY_TYPE};
pub use lexer::{tokenize, Keyword, Token, TokenKind, TokenStream};
pub use rewriter::Rewriter;
pub use span::Span;
pub use stub::{stub_name, STUB_SUFFIX};

// Re-export lexer rule for manual testing
pub use lexer::Rule;

/// Extension every template file carries
pub const TEMPLATE_EXTENSION: &str = "got";

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests;
