//! @dose
//! purpose: Data model shared by every pipeline stage. The parser produces
//!     [`ParsedPackage`] values, the filter borrows them and the rewriter builds
//!     fresh [`RewrittenDecl`] values from what it borrowed.
//!
//! when-editing:
//!     - !A new field on TypeDecl or FuncDecl must be filled in by parser/go.rs
//!
//! invariants:
//!     - No stage mutates the output of an earlier one
//!     - Signature, type and comment text is kept verbatim from the source

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Every parsed file of one Go package, keyed by file path.
///
/// Files are kept in a `BTreeMap` so iteration follows path order.
#[derive(Debug, Clone, Default)]
pub struct ParsedPackage {
    pub name: String,
    pub files: BTreeMap<PathBuf, ParsedFile>,
}

impl ParsedPackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: BTreeMap::new(),
        }
    }
}

/// A single source file and its top-level declarations in source order.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub package: String,
    pub decls: Vec<Declaration>,
}

/// A top-level declaration.
#[derive(Debug, Clone)]
pub enum Declaration {
    Type(TypeDecl),
    Func(FuncDecl),
    /// Imports, consts, vars and anything else the pipeline never emits.
    Other { kind: String },
}

/// Type parameter list of a generic type or function, e.g. `[K comparable, V any]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParams {
    /// Verbatim source text including the brackets
    pub text: String,
    /// Parameter names in declaration order (`["K", "V"]`)
    pub names: Vec<String>,
}

/// One type spec, taken either from `type X ...` or from a `type ( ... )` group.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub name: String,
    pub exported: bool,
    /// `type X = Y` in the source
    pub is_alias: bool,
    pub type_params: Option<TypeParams>,
    pub doc: Option<String>,
    /// Line comment on the same line as the spec, e.g. `// in meters`
    pub comment: Option<String>,
}

/// One parameter group of a function signature.
///
/// `(a, b int)` is a single group with two names; `(int, string)` is two
/// groups with no names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub names: Vec<String>,
    /// Verbatim type text (without the `...` of a variadic group)
    pub ty: String,
    pub variadic: bool,
}

#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub name: String,
    pub exported: bool,
    pub has_receiver: bool,
    pub type_params: Option<TypeParams>,
    pub params: Vec<Param>,
    /// Verbatim result text, e.g. `error` or `(int, error)`
    pub result: Option<String>,
    /// Verbatim text from `func` up to (not including) the body
    pub signature: String,
    pub doc: Option<String>,
}

impl FuncDecl {
    /// Whether the last parameter group is `...T`.
    pub fn is_variadic(&self) -> bool {
        self.params.last().map(|p| p.variadic).unwrap_or(false)
    }
}

/// `type <Name> = <qualifier>.<Name>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasLine {
    pub name: String,
    pub qualifier: String,
    pub type_params: Option<TypeParams>,
    pub doc: Option<String>,
    pub comment: Option<String>,
}

/// A forwarding function: the original signature and a single call as body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubFunction {
    pub name: String,
    pub signature: String,
    pub qualifier: String,
    /// Explicit type arguments for a generic callee
    pub type_args: Vec<String>,
    pub args: Vec<String>,
    /// Append `...` to the last argument
    pub spread_last: bool,
    pub doc: Option<String>,
}

impl StubFunction {
    /// The forwarding call, e.g. `yi.Foo(a, b)`.
    pub fn call(&self) -> String {
        let mut call = format!("{}.{}", self.qualifier, self.name);
        if !self.type_args.is_empty() {
            call.push('[');
            call.push_str(&self.type_args.join(", "));
            call.push(']');
        }
        call.push('(');
        call.push_str(&self.args.join(", "));
        if self.spread_last && !self.args.is_empty() {
            call.push_str("...");
        }
        call.push(')');
        call
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewrittenDecl {
    Alias(AliasLine),
    Stub(StubFunction),
}

impl RewrittenDecl {
    pub fn name(&self) -> &str {
        match self {
            RewrittenDecl::Alias(a) => &a.name,
            RewrittenDecl::Stub(s) => &s.name,
        }
    }

    pub fn doc(&self) -> Option<&str> {
        match self {
            RewrittenDecl::Alias(a) => a.doc.as_deref(),
            RewrittenDecl::Stub(s) => s.doc.as_deref(),
        }
    }
}
