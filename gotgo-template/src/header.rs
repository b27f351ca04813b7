// Gotgo Template Header
// Parses `package name(type T0, type T1 constraint, ...)` off the front of a template

use crate::error::{TemplateError, TemplateResult};
use crate::lexer::{Keyword, Token, TokenKind, TokenStream};
use crate::span::Span;

/// Type text used for a parameter declared without a constraint
pub const ANY_TYPE: &str = "interface{}";

/// One declared type parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    /// Concatenated token text of the constraint, `interface{}` when absent
    pub raw_type: String,
    pub span: Span,
}

impl ParamDecl {
    /// Whether the constraint is an interface literal (contains a brace)
    pub fn is_interface_literal(&self) -> bool {
        self.raw_type.contains('{')
    }
}

/// The parsed pseudo package clause of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateHeader {
    pub package_name: String,
    /// Never empty; order defines positional binding
    pub params: Vec<ParamDecl>,
    /// Byte offset just past the closing `)`; the rewriter starts here
    pub body_start: usize,
}

impl TemplateHeader {
    pub fn first_param(&self) -> &ParamDecl {
        &self.params[0]
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

/// Parse the template header, leaving `stream` positioned on the first body token
pub fn parse_header(stream: &mut TokenStream<'_>) -> TemplateResult<TemplateHeader> {
    let src = stream.source();

    let mut token = stream.next_token();
    while !token.is_keyword(Keyword::Package) {
        if token.is_eof() {
            return Err(TemplateError::malformed(
                src,
                token.span,
                "no package clause",
            ));
        }
        token = stream.next_token();
    }

    let name = stream.next_token();
    if name.kind != TokenKind::Ident {
        return Err(TemplateError::malformed(
            src,
            name.span,
            format!("expected package identifier, not {}", name.describe()),
        ));
    }

    let open = stream.next_token();
    if open.kind != TokenKind::LParen {
        return Err(TemplateError::malformed(
            src,
            open.span,
            format!(
                "expected `(` after package `{}`, not {}",
                name.text,
                open.describe()
            ),
        ));
    }

    let mut params = Vec::new();
    loop {
        let (param, delimiter) = parse_param(stream)?;
        params.push(param);

        match delimiter.kind {
            TokenKind::Comma => continue,
            TokenKind::RParen => {
                return Ok(TemplateHeader {
                    package_name: name.text.to_string(),
                    params,
                    body_start: delimiter.span.end,
                });
            }
            _ => {
                return Err(TemplateError::malformed(
                    src,
                    delimiter.span,
                    format!(
                        "unexpected {} in type parameter list",
                        delimiter.describe()
                    ),
                ));
            }
        }
    }
}

/// Parse `type Name constraint`, returning the delimiter that ended it
fn parse_param<'src>(
    stream: &mut TokenStream<'src>,
) -> TemplateResult<(ParamDecl, Token<'src>)> {
    let src = stream.source();

    let keyword = stream.next_token();
    if !keyword.is_keyword(Keyword::Type) {
        return Err(TemplateError::malformed(
            src,
            keyword.span,
            format!("expected 'type', not {}", keyword.describe()),
        ));
    }

    let ident = stream.next_token();
    if ident.kind != TokenKind::Ident {
        return Err(TemplateError::malformed(
            src,
            ident.span,
            format!("identifier expected, not {}", ident.describe()),
        ));
    }

    let (raw_type, delimiter) = collect_raw_type(stream);

    Ok((
        ParamDecl {
            name: ident.text.to_string(),
            raw_type,
            span: Span::new(keyword.span.start, ident.span.end),
        },
        delimiter,
    ))
}

/// Concatenate constraint tokens up to a `,` or `)` at bracket depth zero.
///
/// Adjacent word tokens keep one separating space so `chan int` survives;
/// everything else is joined without whitespace.
fn collect_raw_type<'src>(stream: &mut TokenStream<'src>) -> (String, Token<'src>) {
    let mut raw = String::new();
    let mut depth = 0usize;
    let mut previous: Option<TokenKind> = None;

    loop {
        let token = stream.next_token();
        match token.kind {
            TokenKind::Eof => break (finish_raw_type(raw), token),
            TokenKind::Comma | TokenKind::RParen if depth == 0 => {
                break (finish_raw_type(raw), token);
            }
            TokenKind::LParen | TokenKind::LBrace | TokenKind::LBrack => depth += 1,
            TokenKind::RParen | TokenKind::RBrace | TokenKind::RBrack => {
                depth = depth.saturating_sub(1)
            }
            _ => {}
        }

        if previous.is_some_and(|p| p.is_word()) && token.kind.is_word() {
            raw.push(' ');
        }
        raw.push_str(token.text);
        previous = Some(token.kind);
    }
}

fn finish_raw_type(raw: String) -> String {
    if raw.is_empty() {
        ANY_TYPE.to_string()
    } else {
        raw
    }
}
