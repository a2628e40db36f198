//! Error types for the analyzer

use std::fmt::{self, Display, Formatter};

use hvm_values::{PathError, ValueKind};

/// Which input document an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Baseline chart values
    Upstream,
    /// Customized values under analysis
    Downstream,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream => f.write_str("upstream"),
            Self::Downstream => f.write_str("downstream"),
        }
    }
}

/// Errors rejecting or aborting an analysis
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    /// Document root is not a mapping
    #[error("{side} document must be a mapping at the root, got {kind}")]
    NotAMapping {
        /// Offending document
        side: Side,
        /// Shape found at the root
        kind: ValueKind,
    },

    /// Configured shallow-override section is not a valid key path
    #[error("invalid shallow-override section '{name}': {source}")]
    InvalidSection {
        /// Section as configured
        name: String,
        /// Parse failure
        #[source]
        source: PathError,
    },

    /// Key-path operation failed on an output tree
    #[error("internal path error: {0}")]
    Path(#[from] PathError),
}

impl AnalyzeError {
    /// Create not-a-mapping error
    #[must_use]
    pub fn not_a_mapping(side: Side, kind: ValueKind) -> Self {
        Self::NotAMapping { side, kind }
    }
}

/// Result type alias for analyzer operations
pub type AnalyzeResult<T> = Result<T, AnalyzeError>;
