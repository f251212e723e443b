//! @dose
//! purpose: The copy command. Parses a directory, rewrites exported declarations
//!     and emits the facade to stdout or to a destination directory.
//!
//! invariants:
//!     - The first error aborts the run; nothing is rolled back
//!     - Stream output is written only after every package was rewritten
//!
//! flows:
//!     - Options: merge gocopycat.toml with flags
//!     - Parse: every package in --dir, sorted by name
//!     - Per package: resolve the qualifier, rewrite each file, emit

use crate::cli::CopyArgs;
use crate::config::{Config, Options};
use crate::emitter::{emit_files, emit_stream, FacadeUnit};
use crate::formatter::FileHeader;
use crate::parser::{parse_dir, ParseOptions};
use crate::qualifier::{resolve_import_path, Qualifier, QualifierStyle, ResolutionError};
use crate::rewrite::rewrite_file;
use crate::types::ParsedPackage;
use anyhow::{Context, Result};
use std::io;
use std::path::Path;

pub fn run_copy(args: &CopyArgs, cwd: &Path) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load(cwd),
    };
    let options = Options::resolve(args, &config)?;
    copy_with(&options)
}

/// Run the whole pipeline for already merged options.
pub fn copy_with(options: &Options) -> Result<()> {
    let parse_options = ParseOptions {
        include_tests: options.include_tests,
    };
    let packages = parse_dir(&options.dir, &parse_options).with_context(|| {
        format!("Failed to parse directory {}", options.dir.display())
    })?;

    let selected: Vec<&ParsedPackage> = packages
        .values()
        .filter(|p| match &options.pkg {
            Some(name) => &p.name == name,
            None => true,
        })
        .collect();

    for skipped in packages.values().filter(|p| !selected.iter().any(|s| s.name == p.name)) {
        log::debug!("Skipping package {}", skipped.name);
    }
    if selected.is_empty() {
        if let Some(name) = &options.pkg {
            log::warn!(
                "No package named {} in {}",
                name,
                options.dir.display()
            );
        }
    }

    let mut stream_units = Vec::new();

    for package in selected {
        let qualifier = resolve_qualifier(options, package)?;
        let units = facade_units(package, &qualifier, options);

        match &options.to {
            Some(dest) => {
                let header = file_header(options, package, &qualifier);
                emit_files(dest, &header, &units).with_context(|| {
                    format!("Failed to write facade of package {}", package.name)
                })?;
            }
            None => stream_units.extend(units),
        }
    }

    if options.to.is_none() {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        emit_stream(&mut out, &stream_units)?;
    }

    Ok(())
}

fn facade_units(
    package: &ParsedPackage,
    qualifier: &Qualifier,
    options: &Options,
) -> Vec<FacadeUnit> {
    package
        .files
        .values()
        .map(|file| FacadeUnit {
            source: file.path.clone(),
            decls: rewrite_file(file, qualifier, &options.rewrite),
        })
        .collect()
}

/// The import path is only looked up when something prints it.
fn resolve_qualifier(
    options: &Options,
    package: &ParsedPackage,
) -> Result<Qualifier, ResolutionError> {
    let needs_import_path = options.rewrite.style == QualifierStyle::Full
        || (options.to.is_some() && options.import);

    let import_path = match &options.import_path {
        Some(path) => Some(path.clone()),
        None if needs_import_path => {
            let root = options
                .workspace_root
                .as_deref()
                .ok_or(ResolutionError::NoWorkspaceRoot)?;
            Some(resolve_import_path(&options.dir, root)?)
        }
        None => None,
    };

    Ok(Qualifier::new(package.name.clone(), import_path))
}

fn file_header(options: &Options, package: &ParsedPackage, qualifier: &Qualifier) -> FileHeader {
    FileHeader {
        package: options.package_clause.then(|| {
            options
                .package_name
                .clone()
                .unwrap_or_else(|| package.name.clone())
        }),
        import: if options.import {
            qualifier.import_line()
        } else {
            None
        },
    }
}
