//! Helm Values Analyzer
//!
//! Classifies every value of a downstream values document against an
//! upstream baseline and produces a minimal ("optimized") document.
//!
//! # Categories
//!
//! - **unsupported**: key absent upstream
//! - **commented**: key absent upstream but present as a disabled entry in
//!   the raw upstream text
//! - **redundant**: value equal to upstream (lenient scalar equality)
//! - **optimized**: everything else, i.e. the real overrides
//!
//! # Example
//!
//! ```rust,ignore
//! use hvm_analyzer::{Analyzer, AnalyzerConfig};
//! use hvm_values::Value;
//!
//! let upstream = Value::from_yaml_str(&chart_text)?;
//! let downstream = Value::from_yaml_str(&values_text)?;
//!
//! let result = Analyzer::new(AnalyzerConfig::default())
//!     .analyze(&upstream, &downstream, Some(&chart_text))?;
//! println!("{} redundant values", result.summary().redundant);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod comment;
pub mod config;
pub mod engine;
pub mod error;
pub mod result;

// Re-exports for convenience
pub use comment::{is_disabled_in_source, CommentIndex};
pub use config::{AnalyzerConfig, DEFAULT_SHALLOW_SECTION};
pub use engine::Analyzer;
pub use error::{AnalyzeError, AnalyzeResult, Side};
pub use result::{Category, ClassificationResult, ClassificationSummary};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
