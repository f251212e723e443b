//! @dose
//! purpose: Configuration file parsing for gocopycat.toml, and the merge of file
//!     values with command-line flags into the [`Options`] the pipeline runs with.
//!
//! when-editing:
//!     - New [output] keys need a matching flag and a line in Options::resolve
//!
//! invariants:
//!     - Config::load returns default config if gocopycat.toml doesn't exist
//!     - Command-line flags always win over file values
//!     - GOPATH is read by clap at the CLI boundary, never from inside the pipeline
//!
//! gotchas:
//!     - An explicit --config that cannot be read is an error; the implicit
//!       ./gocopycat.toml only warns and falls back to defaults
//!     - GOPATH may be a list; only the first entry is used

use crate::cli::CopyArgs;
use crate::qualifier::{
    default_gopath, first_gopath_entry, validate_package_name, workspace_root, QualifierStyle,
    ResolutionError,
};
use crate::rewrite::RewriteOptions;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "gocopycat.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure matching gocopycat.toml
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SourceConfig {
    /// Also parse `_test.go` files
    pub include_tests: bool,

    /// Workspace root used to derive import paths (overridden by --gopath/GOPATH)
    pub gopath: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub qualifier: QualifierStyle,

    /// Write `package <name>` at the top of generated files
    pub package_clause: bool,

    /// Write an import of the source package in generated files
    pub import: bool,

    /// Carry doc comments over
    pub comments: bool,

    pub spread_variadic: bool,

    /// Package clause name (defaults to the source package name)
    pub package_name: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            qualifier: QualifierStyle::Short,
            package_clause: true,
            import: true,
            comments: true,
            spread_variadic: false,
            package_name: None,
        }
    }
}

impl Config {
    /// Load configuration from gocopycat.toml in the given directory
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match Self::from_path(&config_path) {
            Ok(config) => {
                log::debug!("Loaded config from {}", config_path.display());
                config
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load an explicitly named configuration file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Everything one run needs, after flags and config file are merged.
#[derive(Debug, Clone)]
pub struct Options {
    pub dir: PathBuf,
    pub pkg: Option<String>,
    pub to: Option<PathBuf>,
    pub import_path: Option<String>,
    /// `<gopath>/src`, when a GOPATH is known
    pub workspace_root: Option<PathBuf>,
    pub include_tests: bool,
    pub package_clause: bool,
    pub import: bool,
    pub package_name: Option<String>,
    pub rewrite: RewriteOptions,
}

impl Options {
    pub fn resolve(args: &CopyArgs, config: &Config) -> Result<Self, ResolutionError> {
        let output = &config.output;

        let package_name = args
            .package_name
            .clone()
            .or_else(|| output.package_name.clone());
        if let Some(name) = &package_name {
            validate_package_name(name)?;
        }

        let gopath = args
            .gopath
            .as_deref()
            .and_then(|p| first_gopath_entry(p.as_os_str()))
            .or_else(|| config.source.gopath.clone())
            .or_else(default_gopath);

        Ok(Self {
            dir: args.dir.clone(),
            pkg: args.pkg.clone().filter(|p| !p.is_empty()),
            to: args.to.clone(),
            import_path: args.import_path.clone().filter(|p| !p.is_empty()),
            workspace_root: gopath.as_deref().map(workspace_root),
            include_tests: args.include_tests || config.source.include_tests,
            package_clause: !args.no_package_clause && output.package_clause,
            import: !args.no_import && output.import,
            package_name,
            rewrite: RewriteOptions {
                style: args.qualifier.unwrap_or(output.qualifier),
                comments: !args.no_comments && output.comments,
                spread_variadic: args.spread_variadic || output.spread_variadic,
            },
        })
    }
}
