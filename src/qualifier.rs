//! @dose
//! purpose: Package-qualifier resolution. The qualifier is what goes in front of
//!     every forwarded name: `yi.Foo`.
//!
//! when-editing:
//!     - Short style uses the parsed package name, Full style the import path
//!
//! invariants:
//!     - An import path is either explicit or derived from where the source
//!       directory sits under a GOPATH-style workspace root
//!
//! do-not:
//!     - Never read `GOPATH` here; the workspace root is always passed in

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]*$").unwrap());

#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("Source directory {} does not exist", .0.display())]
    MissingDir(PathBuf),
    #[error("Source directory {} is not under workspace root {}", .dir.display(), .root.display())]
    NotUnderRoot { dir: PathBuf, root: PathBuf },
    #[error("No workspace root: pass --import-path, --gopath or set GOPATH")]
    NoWorkspaceRoot,
    #[error("'{0}' is not a valid Go package name")]
    InvalidPackageName(String),
}

/// Which form of the source package prefixes forwarded names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QualifierStyle {
    /// The package name (`ivy`)
    #[default]
    Short,
    /// The import path (`robpike.io/ivy`)
    Full,
}

/// The source package as seen from the generated facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qualifier {
    /// Declared package name of the source
    pub name: String,
    pub import_path: Option<String>,
}

impl Qualifier {
    pub fn new(name: impl Into<String>, import_path: Option<String>) -> Self {
        Self {
            name: name.into(),
            import_path,
        }
    }

    /// Text placed before `.Name`; full style falls back to the name when no
    /// import path is known.
    pub fn prefix(&self, style: QualifierStyle) -> &str {
        match style {
            QualifierStyle::Short => &self.name,
            QualifierStyle::Full => self.import_path.as_deref().unwrap_or(&self.name),
        }
    }

    /// `import "path"`, or `import name "path"` when the package name is not
    /// the last path segment.
    pub fn import_line(&self) -> Option<String> {
        let path = self.import_path.as_deref()?;
        if short_name(path) == self.name {
            Some(format!("import \"{}\"", path))
        } else {
            Some(format!("import {} \"{}\"", self.name, path))
        }
    }
}

/// Last segment of an import path: `robpike.io/ivy` -> `ivy`.
pub fn short_name(import_path: &str) -> &str {
    let trimmed = import_path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Import path of `dir` relative to `root`, `/`-separated.
///
/// `<gopath>/src/example.org/pkg` with root `<gopath>/src` gives
/// `example.org/pkg`.
pub fn resolve_import_path(dir: &Path, root: &Path) -> Result<String, ResolutionError> {
    let dir_abs = dir
        .canonicalize()
        .map_err(|_| ResolutionError::MissingDir(dir.to_path_buf()))?;
    let root_abs = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

    let not_under_root = || ResolutionError::NotUnderRoot {
        dir: dir_abs.clone(),
        root: root_abs.clone(),
    };

    let relative = dir_abs.strip_prefix(&root_abs).map_err(|_| not_under_root())?;
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if segments.is_empty() {
        return Err(not_under_root());
    }
    Ok(segments.join("/"))
}

/// Source root inside a GOPATH entry.
pub fn workspace_root(gopath: &Path) -> PathBuf {
    gopath.join("src")
}

/// First non-empty entry of a GOPATH-style path list.
pub fn first_gopath_entry(value: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(value).find(|p| !p.as_os_str().is_empty())
}

/// The go tool's fallback when GOPATH is unset.
pub fn default_gopath() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("go"))
}

pub fn validate_package_name(name: &str) -> Result<(), ResolutionError> {
    if name != "_" && IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(ResolutionError::InvalidPackageName(name.to_string()))
    }
}
