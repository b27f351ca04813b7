// Gotgo Template Lexer
// Pest-backed tokenizer producing (offset, kind, text) triples over template source

use crate::error::{TemplateError, TemplateResult};
use crate::span::Span;
use pest::Parser;
use pest_derive::Parser;
use std::fmt;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct TemplateLexer;

/// Host-language reserved words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl Keyword {
    pub fn lookup(text: &str) -> Option<Self> {
        let keyword = match text {
            "break" => Keyword::Break,
            "case" => Keyword::Case,
            "chan" => Keyword::Chan,
            "const" => Keyword::Const,
            "continue" => Keyword::Continue,
            "default" => Keyword::Default,
            "defer" => Keyword::Defer,
            "else" => Keyword::Else,
            "fallthrough" => Keyword::Fallthrough,
            "for" => Keyword::For,
            "func" => Keyword::Func,
            "go" => Keyword::Go,
            "goto" => Keyword::Goto,
            "if" => Keyword::If,
            "import" => Keyword::Import,
            "interface" => Keyword::Interface,
            "map" => Keyword::Map,
            "package" => Keyword::Package,
            "range" => Keyword::Range,
            "return" => Keyword::Return,
            "select" => Keyword::Select,
            "struct" => Keyword::Struct,
            "switch" => Keyword::Switch,
            "type" => Keyword::Type,
            "var" => Keyword::Var,
            _ => return None,
        };
        Some(keyword)
    }
}

/// Token classification used by the header parser and rewriter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Keyword(Keyword),
    Number,
    Rune,
    String,
    Operator,
    Period,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBrack,
    RBrack,
    Eof,
}

impl TokenKind {
    /// Identifiers, keywords and literals need a separator when printed back to back
    pub fn is_word(&self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Keyword(_)
                | TokenKind::Number
                | TokenKind::Rune
                | TokenKind::String
        )
    }

    fn from_rule(rule: Rule, text: &str) -> Option<Self> {
        let kind = match rule {
            Rule::keyword => TokenKind::Keyword(Keyword::lookup(text)?),
            Rule::identifier => TokenKind::Ident,
            Rule::number => TokenKind::Number,
            Rule::rune => TokenKind::Rune,
            Rule::string => TokenKind::String,
            Rule::operator => TokenKind::Operator,
            Rule::period => TokenKind::Period,
            Rule::comma => TokenKind::Comma,
            Rule::lparen => TokenKind::LParen,
            Rule::rparen => TokenKind::RParen,
            Rule::lbrace => TokenKind::LBrace,
            Rule::rbrace => TokenKind::RBrace,
            Rule::lbrack => TokenKind::LBrack,
            Rule::rbrack => TokenKind::RBrack,
            _ => return None,
        };
        Some(kind)
    }
}

/// A single scanned token; `text` borrows the exact source bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl Token<'_> {
    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == name
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Text used in diagnostics, with a readable name for end of input
    pub fn describe(&self) -> String {
        if self.is_eof() {
            "end of input".to_string()
        } else {
            format!("`{}`", self.text)
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Scan the whole source into a token vector terminated by an `Eof` token
pub fn tokenize(source: &str) -> TemplateResult<Vec<Token<'_>>> {
    let mut pairs = TemplateLexer::parse(Rule::tokens, source)
        .map_err(|e| TemplateError::from_pest_error(e, source))?;

    let mut tokens = Vec::new();
    if let Some(root) = pairs.next() {
        for pair in root.into_inner() {
            let text = pair.as_str();
            if let Some(kind) = TokenKind::from_rule(pair.as_rule(), text) {
                tokens.push(Token {
                    kind,
                    text,
                    span: pair.as_span().into(),
                });
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        text: "",
        span: Span::point(source.len()),
    });

    Ok(tokens)
}

/// Forward-only cursor over scanned tokens with one token of lookahead.
///
/// Once exhausted it keeps yielding the trailing `Eof` token.
#[derive(Debug, Clone)]
pub struct TokenStream<'src> {
    source: &'src str,
    tokens: Vec<Token<'src>>,
    position: usize,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str) -> TemplateResult<Self> {
        Ok(Self {
            source,
            tokens: tokenize(source)?,
            position: 0,
        })
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Pull the next token, advancing the cursor
    pub fn next_token(&mut self) -> Token<'src> {
        let token = self.current();
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    /// Look at the next token without consuming it
    pub fn peek(&self) -> Token<'src> {
        self.current()
    }

    fn current(&self) -> Token<'src> {
        self.tokens[self.position]
    }
}
