//! Local import discovery
//!
//! Only relative imports (paths starting with `.`) name units the driver
//! builds itself; everything else belongs to the installed library.

use crate::error::{BuildError, BuildResult};
use crate::paths::clean_path;
use gotgo_template::{Keyword, TokenKind, TokenStream};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Every import path declared in `source`, unquoted, in order of appearance
pub fn import_paths(source: &str) -> gotgo_template::TemplateResult<Vec<String>> {
    let mut stream = TokenStream::new(source)?;
    let mut paths = Vec::new();

    loop {
        let token = stream.next_token();
        if token.is_eof() {
            break;
        }
        if !token.is_keyword(Keyword::Import) {
            continue;
        }

        if stream.peek().kind == TokenKind::LParen {
            stream.next_token();
            loop {
                let spec = stream.next_token();
                match spec.kind {
                    TokenKind::RParen | TokenKind::Eof => break,
                    TokenKind::String => paths.push(unquote(spec.text)),
                    _ => {}
                }
            }
        } else {
            // Optional name, `.` or `_` before the path
            let mut spec = stream.next_token();
            if matches!(spec.kind, TokenKind::Ident | TokenKind::Period) {
                spec = stream.next_token();
            }
            if spec.kind == TokenKind::String {
                paths.push(unquote(spec.text));
            }
        }
    }

    Ok(paths)
}

/// Relative imports of the source file at `file`, resolved against its directory
pub fn local_imports(file: &Path) -> BuildResult<BTreeSet<PathBuf>> {
    let source = fs::read_to_string(file).map_err(|e| BuildError::io(file, e))?;
    let paths = import_paths(&source).map_err(|source| BuildError::Scan {
        path: file.to_path_buf(),
        source,
    })?;

    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    Ok(paths
        .into_iter()
        .filter(|p| p.starts_with('.'))
        .map(|p| clean_path(&dir.join(p)))
        .collect())
}

fn unquote(literal: &str) -> String {
    let inner = literal
        .get(1..literal.len().saturating_sub(1))
        .unwrap_or_default();
    if literal.starts_with('`') {
        inner.to_string()
    } else {
        inner.replace("\\\\", "\\").replace("\\\"", "\"")
    }
}
