// Gotgo Type Binder
// Binds declared type parameters to caller-supplied concrete types

use crate::header::{ParamDecl, TemplateHeader};
use indexmap::IndexMap;
use std::fmt;
use tracing::debug;

/// Resolved binding for one type parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Type text substituted for the parameter name in the body
    pub concrete: String,
    /// Abstract type the validation stub converts to
    pub abstract_type: String,
    /// False when the abstract type is an interface literal
    pub needs_conversion: bool,
}

/// Import synthesized for a qualified type argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub alias: String,
    pub path: String,
}

impl fmt::Display for ImportSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import {} \"{}\"", self.alias, self.path)
    }
}

/// How a parameter without a supplied argument is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Constraint names the first parameter: reuse its concrete type
    SameAsFirst,
    /// Leave the parameter bound to its own constraint text
    Abstract,
}

/// Default policy for under-supplied argument lists.
///
/// The first parameter never refers to itself, so it always falls back to its
/// own constraint.
pub fn fallback_for(index: usize, param: &ParamDecl, first: &ParamDecl) -> Fallback {
    if index > 0 && param.raw_type == first.name {
        Fallback::SameAsFirst
    } else {
        Fallback::Abstract
    }
}

/// Parameter bindings plus the imports they require. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    entries: IndexMap<String, Binding>,
    imports: Vec<ImportSpec>,
}

impl Bindings {
    /// Bind every declared parameter; only the first `params.len()` arguments are used
    pub fn bind<S: AsRef<str>>(header: &TemplateHeader, args: &[S]) -> Self {
        let first = header.first_param();
        let mut entries: IndexMap<String, Binding> = IndexMap::new();
        let mut imports = Vec::new();

        if args.len() > header.params.len() {
            debug!(
                supplied = args.len(),
                declared = header.params.len(),
                "ignoring excess type arguments"
            );
        }

        for (index, param) in header.params.iter().enumerate() {
            let concrete = match args.get(index) {
                Some(arg) => {
                    let (concrete, import) = qualify(&param.name, arg.as_ref());
                    imports.extend(import);
                    concrete
                }
                None => match fallback_for(index, param, first) {
                    Fallback::SameAsFirst => entries
                        .get(&first.name)
                        .map(|b| b.concrete.clone())
                        .unwrap_or_else(|| first.raw_type.clone()),
                    Fallback::Abstract => param.raw_type.clone(),
                },
            };

            let abstract_type = if index > 0 && param.raw_type == first.name {
                first.raw_type.clone()
            } else {
                param.raw_type.clone()
            };
            let needs_conversion = !abstract_type.contains('{');

            debug!(param = %param.name, %concrete, %abstract_type, "bound type parameter");

            entries.insert(
                param.name.clone(),
                Binding {
                    concrete,
                    abstract_type,
                    needs_conversion,
                },
            );
        }

        Self { entries, imports }
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.entries.get(name)
    }

    /// Concrete type text for `name`, if it is a bound parameter
    pub fn concrete(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|b| b.concrete.as_str())
    }

    /// Bindings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.entries.iter().map(|(name, b)| (name.as_str(), b))
    }

    pub fn imports(&self) -> &[ImportSpec] {
        &self.imports
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split `path.Type` into an import aliased to `alias` and the local type text.
///
/// Leading pointer and array or slice groups stay on the bound type:
/// `*net/http.Client` binds `*alias.Client` and `[4]net.IP` binds `[4]alias.IP`.
fn qualify(alias: &str, arg: &str) -> (String, Option<ImportSpec>) {
    let (markers, qualified) = arg.split_at(type_prefix_len(arg));
    let dot = match qualified.rfind('.') {
        Some(dot) if dot > 0 => dot,
        _ => return (arg.to_string(), None),
    };

    let import = ImportSpec {
        alias: alias.to_string(),
        path: qualified[..dot].to_string(),
    };
    let concrete = format!("{markers}{alias}{}", &qualified[dot..]);
    (concrete, Some(import))
}

/// Byte length of the `*` and `[...]` groups in front of the element type
fn type_prefix_len(arg: &str) -> usize {
    let mut rest = arg;
    loop {
        if let Some(tail) = rest.strip_prefix('*') {
            rest = tail;
        } else if rest.starts_with('[') {
            match rest.find(']') {
                Some(close) => rest = &rest[close + 1..],
                None => break,
            }
        } else {
            break;
        }
    }
    arg.len() - rest.len()
}
