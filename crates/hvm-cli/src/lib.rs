//! Helm Values Manager command-line front end
//!
//! Resolves upstream values (local file, chart or installed release), loads
//! the downstream values file, classifies it and writes one report per
//! category into the output directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use hvm_cli::{run, HelmClient, RunConfig, UpstreamSource};
//!
//! let config = RunConfig::new(UpstreamSource::File("chart.yaml".into()), "values.yaml");
//! let helm = HelmClient::new(config.kube.clone());
//! let outcome = run(&config, &helm, &mut std::io::stdout())?;
//! println!("{} reports written", outcome.written.len());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod config;
pub mod error;
pub mod helm;
pub mod logging;
pub mod output;
pub mod run;
pub mod source;

pub use cli::{build_command, parse_config};
pub use config::{EnvSnapshot, KubeSettings, OutputConfig, OutputFormat, RunConfig, UpstreamSource};
pub use error::{CliError, CliResult};
pub use helm::{HelmClient, ValuesFetcher};
pub use logging::init_tracing;
pub use output::{ReportPaths, ReportWriter};
pub use run::{run, RunOutcome};
pub use source::{resolve_upstream, UpstreamDocument};
