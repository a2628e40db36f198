//! `helm` executable integration
//!
//! Upstream values that do not come from a local file are fetched through
//! [`ValuesFetcher`]. [`HelmClient`] implements it by shelling out to `helm`;
//! tests substitute an in-memory fetcher.

use std::path::PathBuf;
use std::process::Command;

use crate::config::KubeSettings;
use crate::error::{CliError, CliResult};

/// Source of raw upstream values text
pub trait ValuesFetcher {
    /// Default values text of a chart, comments preserved
    ///
    /// # Errors
    /// Returns [`CliError::HelmSpawn`] or [`CliError::Helm`] when the values
    /// cannot be obtained
    fn chart_values(&self, chart: &str, version: Option<&str>) -> CliResult<String>;

    /// Computed values of an installed release
    ///
    /// # Errors
    /// Same as [`ValuesFetcher::chart_values`]
    fn release_values(&self, release: &str, revision: u32) -> CliResult<String>;
}

/// `helm` command-line client
#[derive(Debug, Clone)]
pub struct HelmClient {
    binary: PathBuf,
    kube: KubeSettings,
}

impl HelmClient {
    /// Client running `helm` from `PATH`
    #[must_use]
    pub fn new(kube: KubeSettings) -> Self {
        Self {
            binary: PathBuf::from("helm"),
            kube,
        }
    }

    /// With explicit executable
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Arguments for `helm show values`
    #[must_use]
    pub fn show_values_args(chart: &str, version: Option<&str>) -> Vec<String> {
        let mut args = vec!["show".to_string(), "values".to_string()];
        if let Some(version) = version {
            args.push("--version".to_string());
            args.push(version.to_string());
        }
        args.push(chart.to_string());
        args
    }

    /// Arguments for `helm get values`
    #[must_use]
    pub fn get_values_args(&self, release: &str, revision: u32) -> Vec<String> {
        let mut args = vec![
            "get".to_string(),
            "values".to_string(),
            release.to_string(),
            "--all".to_string(),
            "--output".to_string(),
            "yaml".to_string(),
        ];
        if revision > 0 {
            args.push("--revision".to_string());
            args.push(revision.to_string());
        }
        if let Some(namespace) = &self.kube.namespace {
            args.push("--namespace".to_string());
            args.push(namespace.clone());
        }
        if let Some(context) = &self.kube.context {
            args.push("--kube-context".to_string());
            args.push(context.clone());
        }
        if let Some(kubeconfig) = &self.kube.kubeconfig {
            args.push("--kubeconfig".to_string());
            args.push(kubeconfig.display().to_string());
        }
        args
    }

    fn execute(&self, args: &[String]) -> CliResult<String> {
        let command = format!("{} {}", self.binary.display(), args.join(" "));
        tracing::debug!(%command, "executing helm");

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| CliError::HelmSpawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CliError::Helm {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ValuesFetcher for HelmClient {
    fn chart_values(&self, chart: &str, version: Option<&str>) -> CliResult<String> {
        match version {
            Some(version) => tracing::info!(chart, version, "fetching chart values"),
            None => tracing::info!(chart, "fetching chart values (latest version)"),
        }
        self.execute(&Self::show_values_args(chart, version))
    }

    fn release_values(&self, release: &str, revision: u32) -> CliResult<String> {
        tracing::info!(release, revision, "fetching release values");
        self.execute(&self.get_values_args(release, revision))
    }
}
