//! @dose
//! purpose: Command-line interface for gocopycat, defined with the clap derive macros.
//!
//! when-editing:
//!     - !Flags here override gocopycat.toml (merged in config::Options::resolve)
//!
//! invariants:
//!     - --dir is the only required argument
//!     - Without --to everything goes to stdout; with --to one file per source file
//!
//! gotchas:
//!     - --gopath falls back to the GOPATH environment variable
//!     - --from is kept as an alias of --dir

use crate::qualifier::QualifierStyle;
use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gocopycat")]
#[command(
    author,
    version,
    about = "Generate Go facades: alias exported types, forward exported functions"
)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub copy: CopyArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct CopyArgs {
    /// Go source directory to be parsed
    #[arg(short, long, visible_alias = "from", value_name = "DIR")]
    pub dir: PathBuf,

    /// Only copy declarations of this package (default: every package found)
    #[arg(short, long, value_name = "NAME")]
    pub pkg: Option<String>,

    /// Destination directory for generated files (default: stdout)
    #[arg(short, long, value_name = "DIR")]
    pub to: Option<PathBuf>,

    /// Import path of the source package (default: derived from GOPATH)
    #[arg(long, value_name = "PATH")]
    pub import_path: Option<String>,

    /// Go workspace root used to derive import paths
    #[arg(long, env = "GOPATH", value_name = "DIR")]
    pub gopath: Option<PathBuf>,

    /// Prefix forwarded names with the package name or the import path
    #[arg(long, value_enum)]
    pub qualifier: Option<QualifierStyle>,

    /// Package clause of generated files (default: source package name)
    #[arg(long, value_name = "NAME")]
    pub package_name: Option<String>,

    /// Don't write a package clause in generated files
    #[arg(long)]
    pub no_package_clause: bool,

    /// Don't write an import of the source package in generated files
    #[arg(long)]
    pub no_import: bool,

    /// Drop doc comments from generated declarations
    #[arg(long)]
    pub no_comments: bool,

    /// Forward variadic parameters as `args...`
    #[arg(long)]
    pub spread_variadic: bool,

    /// Also parse _test.go files
    #[arg(long)]
    pub include_tests: bool,

    /// Configuration file (default: ./gocopycat.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
