//! Error types for the command-line front end
//!
//! Covers:
//! - Usage errors (missing upstream / downstream)
//! - File IO with the offending path
//! - Document parsing with the offending source
//! - `helm` execution failures
//! - Analysis and report serialization

use std::path::PathBuf;

use hvm_analyzer::{AnalyzeError, Category};
use hvm_values::ConvertError;

/// Errors during a values analysis run
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// No upstream source flag given
    #[error("no upstream values source specified; use one of --upstream, --chart or --release")]
    MissingUpstream,

    /// No downstream file given
    #[error("missing --downstream flag")]
    MissingDownstream,

    /// IO error reading or writing a file
    #[error("io error on {path}: {source}")]
    Io {
        /// File or directory being accessed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid YAML
    #[error("failed to parse {origin}: {source}")]
    Parse {
        /// File path or fetched source the text came from
        origin: String,
        /// Parser error
        #[source]
        source: ConvertError,
    },

    /// `helm` executable could not be started
    #[error("failed to execute {binary}: {source}")]
    HelmSpawn {
        /// Executable that was run
        binary: PathBuf,
        /// Spawn error
        #[source]
        source: std::io::Error,
    },

    /// `helm` exited unsuccessfully
    #[error("helm command failed ({command}): {stderr}")]
    Helm {
        /// Command line as executed
        command: String,
        /// Trimmed standard error of the command
        stderr: String,
    },

    /// Chart produced no values at all
    #[error("chart {chart} (version: {version}) has empty values")]
    EmptyChartValues {
        /// Chart reference
        chart: String,
        /// Requested version, `latest` when none was given
        version: String,
    },

    /// Analysis rejected its inputs
    #[error("analysis failed: {0}")]
    Analyze(#[from] AnalyzeError),

    /// Report could not be rendered
    #[error("failed to render {category} values: {source}")]
    Render {
        /// Report being rendered
        category: Category,
        /// Serializer error
        #[source]
        source: ConvertError,
    },
}

impl CliError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create parse error for a named document
    pub fn parse_error(origin: impl Into<String>, source: ConvertError) -> Self {
        Self::Parse {
            origin: origin.into(),
            source,
        }
    }

    /// Whether the error is a usage mistake rather than a runtime failure
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::MissingUpstream | Self::MissingDownstream)
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;
