//! @dose
//! purpose: gocopycat generates Go facade packages. Every exported type of a
//!     source package becomes `type X = pkg.X`; every exported free function
//!     becomes a stub with the same signature that forwards to `pkg.F(...)`.
//!
//! invariants:
//!     - The pipeline is parse -> filter -> rewrite -> emit
//!
//! do-not:
//!     - Never print Go source directly; all output goes through the emitter

pub mod cli;
pub mod commands;
pub mod config;
pub mod emitter;
pub mod filter;
pub mod formatter;
pub mod parser;
pub mod qualifier;
pub mod rewrite;
pub mod types;

// Re-export main types for convenience
pub use cli::{Cli, CopyArgs};
pub use config::{Config, ConfigError, Options};
pub use emitter::{emit_files, emit_stream, EmitError, FacadeUnit};
pub use filter::{classify, Exported};
pub use formatter::{render_decls, render_file, FileHeader};
pub use parser::{parse_dir, ParseError, ParseOptions};
pub use qualifier::{Qualifier, QualifierStyle, ResolutionError};
pub use rewrite::{rewrite_file, RewriteOptions};
pub use types::{
    AliasLine, Declaration, FuncDecl, Param, ParsedFile, ParsedPackage, RewrittenDecl,
    StubFunction, TypeDecl, TypeParams,
};
