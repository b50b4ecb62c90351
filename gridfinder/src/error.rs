//! Errors surfaced by the command-line driver.

use std::fmt;
use std::path::PathBuf;

use gridfinder_core::GridError;

/// Anything that can stop a CLI command.
#[derive(Debug)]
pub enum CliError {
    /// Reading or writing a file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A JSON document could not be parsed or written.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The configuration file is not valid TOML for [`RunConfig`](crate::RunConfig).
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The grid inputs were rejected.
    Grid(GridError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Json { path, source } => write!(f, "{}: invalid JSON: {source}", path.display()),
            Self::Config { path, source } => {
                write!(f, "{}: invalid configuration: {source}", path.display())
            }
            Self::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Config { source, .. } => Some(source),
            Self::Grid(e) => Some(e),
        }
    }
}

impl From<GridError> for CliError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
