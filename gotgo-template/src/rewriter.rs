// Gotgo Template Rewriter
// Single left-to-right pass copying the template body with substitutions applied

use crate::binder::Bindings;
use crate::lexer::{TokenKind, TokenStream};
use tracing::debug;

/// Substitutes bound parameter names and rewrites `pkg.` qualifiers.
///
/// Matching is purely lexical: any identifier token equal to a parameter name
/// is replaced, including locals that shadow it.
#[derive(Debug, Clone, Copy)]
pub struct Rewriter<'a> {
    bindings: &'a Bindings,
    package: &'a str,
    prefix: &'a str,
}

impl<'a> Rewriter<'a> {
    pub fn new(bindings: &'a Bindings, package: &'a str, prefix: &'a str) -> Self {
        Self {
            bindings,
            package,
            prefix,
        }
    }

    /// Rewrite everything from `start` to end of source into `out`
    pub fn rewrite_into(&self, stream: &mut TokenStream<'_>, start: usize, out: &mut String) {
        let source = stream.source();
        let mut last_copied = start;
        let mut substitutions = 0usize;
        let mut qualifiers = 0usize;

        loop {
            let token = stream.next_token();
            if token.is_eof() {
                break;
            }
            if token.kind != TokenKind::Ident || token.span.start < start {
                continue;
            }

            if token.text == self.package && stream.peek().kind == TokenKind::Period {
                let period = stream.next_token();
                out.push_str(&source[last_copied..token.span.start]);
                out.push_str(self.prefix);
                last_copied = period.span.end;
                qualifiers += 1;
            } else if let Some(concrete) = self.bindings.concrete(token.text) {
                out.push_str(&source[last_copied..token.span.start]);
                out.push_str(concrete);
                last_copied = token.span.end;
                substitutions += 1;
            }
        }

        out.push_str(&source[last_copied..]);
        debug!(substitutions, qualifiers, "rewrote template body");
    }

    /// Convenience wrapper returning the rewritten body
    pub fn rewrite(&self, stream: &mut TokenStream<'_>, start: usize) -> String {
        let mut out = String::with_capacity(stream.source().len().saturating_sub(start));
        self.rewrite_into(stream, start, &mut out);
        out
    }
}
