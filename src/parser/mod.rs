//! @dose
//! purpose: Directory parser. Reads every `.go` file directly inside a directory
//!     and groups the parsed files by their declared package name.
//!
//! when-editing:
//!     - !Any unreadable file or syntax error aborts the whole parse
//!
//! invariants:
//!     - Packages are keyed in a BTreeMap and files are read in file-name order,
//!       so two parses of an unchanged directory are identical
//!     - Sub-directories are never entered (one directory is one package set)
//!
//! gotchas:
//!     - `_test.go` files are skipped unless ParseOptions::include_tests is set

mod go;

use crate::types::ParsedPackage;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

pub use go::{is_exported, GoParser};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Syntax error in {}:{}:{}", .path.display(), .line, .column)]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },
    #[error("Missing package clause in {}", .0.display())]
    MissingPackage(PathBuf),
    #[error("Failed to load Go grammar: {0}")]
    Language(String),
}

/// Options for [`parse_dir`]
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Also parse `_test.go` files
    pub include_tests: bool,
}

/// Parse a directory of Go files into packages keyed by package name.
pub fn parse_dir(
    dir: &Path,
    options: &ParseOptions,
) -> Result<BTreeMap<String, ParsedPackage>, ParseError> {
    let parser = GoParser::new();
    let mut packages: BTreeMap<String, ParsedPackage> = BTreeMap::new();

    for path in collect_go_files(dir, options)? {
        let source = fs::read_to_string(&path).map_err(|source| ParseError::Io {
            path: path.clone(),
            source,
        })?;

        let file = parser.parse_file(&source, &path)?;
        log::debug!(
            "Parsed {} (package {}, {} declarations)",
            path.display(),
            file.package,
            file.decls.len()
        );

        packages
            .entry(file.package.clone())
            .or_insert_with(|| ParsedPackage::new(file.package.clone()))
            .files
            .insert(path, file);
    }

    Ok(packages)
}

fn collect_go_files(dir: &Path, options: &ParseOptions) -> Result<Vec<PathBuf>, ParseError> {
    if !dir.is_dir() {
        return Err(ParseError::Io {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ParseError::Io {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf()),
            source: e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("directory walk failed")),
        })?;

        if entry.file_type().is_file() && is_go_source(entry.path(), options) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// `.go` files, minus tests (unless asked for) and the names the go tool ignores.
fn is_go_source(path: &Path, options: &ParseOptions) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if !name.ends_with(".go") || name.starts_with('.') || name.starts_with('_') {
        return false;
    }
    options.include_tests || !name.ends_with("_test.go")
}
