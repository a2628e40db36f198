//! Run configuration
//!
//! Built once from command-line flags plus an [`EnvSnapshot`], then passed by
//! reference; nothing reads the process environment after start-up.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use hvm_analyzer::AnalyzerConfig;

/// Default report directory
pub const DEFAULT_OUTPUT_DIR: &str = "values-analysis";

/// Where upstream values come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamSource {
    /// Local values file
    File(PathBuf),
    /// Chart reference, local chart directory or local values file
    Chart {
        /// Chart reference as given
        name: String,
        /// Version constraint, latest when `None`
        version: Option<String>,
    },
    /// Values of an installed release
    Release {
        /// Release name
        name: String,
        /// Revision, current when 0
        revision: u32,
    },
}

impl Display for UpstreamSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Chart { name, version } => {
                write!(f, "chart {name} (version: {})", version.as_deref().unwrap_or("latest"))
            }
            Self::Release { name, revision } => write!(f, "release {name} (revision: {revision})"),
        }
    }
}

/// Report file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML documents
    #[default]
    Yaml,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// File extension for reports
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(format!("unsupported output format: {other}")),
        }
    }
}

/// Report destination and presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory receiving report files
    pub dir: PathBuf,
    /// Report file format
    pub format: OutputFormat,
    /// Also print the optimized document to stdout
    pub stdout: bool,
    /// Log the size reduction of the optimized document
    pub optimize: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::default(),
            stdout: false,
            optimize: false,
        }
    }
}

/// Cluster access settings handed to `helm`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KubeSettings {
    /// kubeconfig context
    pub context: Option<String>,
    /// kubeconfig file
    pub kubeconfig: Option<PathBuf>,
    /// Release namespace
    pub namespace: Option<String>,
}

/// Environment variables consulted at start-up
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    /// `HELM_KUBECONTEXT`
    pub helm_kube_context: Option<String>,
    /// `KUBECONFIG`
    pub kubeconfig: Option<PathBuf>,
}

impl EnvSnapshot {
    /// Read the current process environment
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            helm_kube_context: non_empty_var("HELM_KUBECONTEXT"),
            kubeconfig: non_empty_var("KUBECONFIG").map(PathBuf::from),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

impl KubeSettings {
    /// Fill unset fields from the environment
    #[must_use]
    pub fn with_env_fallback(mut self, env: &EnvSnapshot) -> Self {
        if self.context.is_none() {
            self.context.clone_from(&env.helm_kube_context);
        }
        if self.kubeconfig.is_none() {
            self.kubeconfig.clone_from(&env.kubeconfig);
        }
        self
    }
}

/// Complete configuration of one analysis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Upstream values source
    pub upstream: UpstreamSource,
    /// Downstream values file
    pub downstream: PathBuf,
    /// Report settings
    pub output: OutputConfig,
    /// Cluster access for release lookups
    pub kube: KubeSettings,
    /// Classification settings
    pub analyzer: AnalyzerConfig,
}

impl RunConfig {
    /// Create configuration with default output and analyzer settings
    #[must_use]
    pub fn new(upstream: UpstreamSource, downstream: impl Into<PathBuf>) -> Self {
        Self {
            upstream,
            downstream: downstream.into(),
            output: OutputConfig::default(),
            kube: KubeSettings::default(),
            analyzer: AnalyzerConfig::default(),
        }
    }

    /// With report directory
    #[inline]
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.dir = dir.into();
        self
    }

    /// With report format
    #[inline]
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output.format = format;
        self
    }

    /// With stdout printing of the optimized document
    #[inline]
    #[must_use]
    pub fn with_stdout(mut self, stdout: bool) -> Self {
        self.output.stdout = stdout;
        self
    }

    /// With size-reduction reporting
    #[inline]
    #[must_use]
    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.output.optimize = optimize;
        self
    }

    /// With cluster access settings
    #[inline]
    #[must_use]
    pub fn with_kube(mut self, kube: KubeSettings) -> Self {
        self.kube = kube;
        self
    }

    /// With analyzer settings
    #[inline]
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: AnalyzerConfig) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Report directory
    #[inline]
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output.dir
    }
}
