//! @dose
//! purpose: Output stage. Streams rendered facades to a writer or writes one file
//!     per source file into a destination directory.
//!
//! invariants:
//!     - A destination file only ever holds declarations from its own source file
//!     - Each file handle lives for exactly one source file and is closed on drop
//!     - The first failure stops the loop; files written before it are kept
//!
//! gotchas:
//!     - The destination directory is not created here; a missing directory
//!       surfaces as EmitError::Create

use crate::formatter::{render_decls, render_file, FileHeader};
use crate::types::RewrittenDecl;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Source path {} has no file name", .0.display())]
    NoFileName(PathBuf),
}

/// Rewritten declarations of one source file.
#[derive(Debug, Clone)]
pub struct FacadeUnit {
    pub source: PathBuf,
    pub decls: Vec<RewrittenDecl>,
}

/// Write every unit to `out`, one blank line between non-empty units.
pub fn emit_stream<W: Write>(out: &mut W, units: &[FacadeUnit]) -> Result<(), EmitError> {
    let rendered: Vec<String> = units
        .iter()
        .map(|u| render_decls(&u.decls))
        .filter(|text| !text.is_empty())
        .collect();

    let write_err = |source: io::Error| EmitError::Write {
        path: PathBuf::from("<stdout>"),
        source,
    };
    out.write_all(rendered.join("\n").as_bytes())
        .map_err(write_err)?;
    out.flush().map_err(write_err)
}

/// Write `<dest>/<basename>` for every unit and return the paths written.
pub fn emit_files(
    dest: &Path,
    header: &FileHeader,
    units: &[FacadeUnit],
) -> Result<Vec<PathBuf>, EmitError> {
    let mut written = Vec::with_capacity(units.len());

    for unit in units {
        let name = unit
            .source
            .file_name()
            .ok_or_else(|| EmitError::NoFileName(unit.source.clone()))?;
        let path = dest.join(name);

        write_unit(&path, header, unit)?;
        log::info!(
            "Wrote {} ({} declarations)",
            path.display(),
            unit.decls.len()
        );
        written.push(path);
    }

    Ok(written)
}

fn write_unit(path: &Path, header: &FileHeader, unit: &FacadeUnit) -> Result<(), EmitError> {
    let file = File::create(path).map_err(|source| EmitError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let write_err = |source: io::Error| EmitError::Write {
        path: path.to_path_buf(),
        source,
    };
    writer
        .write_all(render_file(header, &unit.decls).as_bytes())
        .map_err(write_err)?;
    writer.flush().map_err(write_err)
}
