//! Command-line definition and translation into [`RunConfig`]

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use hvm_analyzer::AnalyzerConfig;

use crate::config::{
    EnvSnapshot, KubeSettings, OutputFormat, RunConfig, UpstreamSource, DEFAULT_OUTPUT_DIR,
};
use crate::error::{CliError, CliResult};

/// Default `--log-level`
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the `helm-values-manager` command
#[must_use]
pub fn build_command() -> Command {
    Command::new("helm-values-manager")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Detect unsupported, commented and redundant values in a Helm values file")
        .arg(
            Arg::new("upstream")
                .long("upstream")
                .value_parser(value_parser!(PathBuf))
                .help("Upstream values file"),
        )
        .arg(
            Arg::new("chart")
                .long("chart")
                .help("Chart to read upstream values from (repo/chart, OCI URL, archive or local path)"),
        )
        .arg(
            Arg::new("chart-version")
                .long("chart-version")
                .help("Chart version for --chart (latest when omitted)"),
        )
        .arg(
            Arg::new("release")
                .long("release")
                .visible_alias("repo")
                .help("Installed release to read upstream values from"),
        )
        .arg(
            Arg::new("revision")
                .long("revision")
                .default_value("0")
                .value_parser(value_parser!(u32))
                .help("Release revision for --release (0 for the current revision)"),
        )
        .arg(
            Arg::new("namespace")
                .long("namespace")
                .help("Namespace of the release"),
        )
        .arg(
            Arg::new("kube-context")
                .long("kube-context")
                .help("kubeconfig context to use (defaults to $HELM_KUBECONTEXT)"),
        )
        .arg(
            Arg::new("kubeconfig")
                .long("kubeconfig")
                .value_parser(value_parser!(PathBuf))
                .help("kubeconfig file to use (defaults to $KUBECONFIG)"),
        )
        .arg(
            Arg::new("downstream")
                .long("downstream")
                .value_parser(value_parser!(PathBuf))
                .help("Downstream values file to analyze"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .default_value(DEFAULT_OUTPUT_DIR)
                .value_parser(value_parser!(PathBuf))
                .help("Directory for report files"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .default_value("yaml")
                .value_parser(["yaml", "json"])
                .help("Report file format"),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .action(ArgAction::SetTrue)
                .help("Also print the optimized values to stdout"),
        )
        .arg(
            Arg::new("optimize")
                .long("optimize")
                .action(ArgAction::SetTrue)
                .help("Report the size reduction of the optimized values"),
        )
        .arg(
            Arg::new("shallow-section")
                .long("shallow-section")
                .action(ArgAction::Append)
                .help("Top-level section re-checked key by key (repeatable)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .default_value(DEFAULT_LOG_LEVEL)
                .help("Log filter used when RUST_LOG is unset"),
        )
}

/// Translate parsed arguments into a run configuration
///
/// # Errors
/// Returns [`CliError::MissingUpstream`] or [`CliError::MissingDownstream`]
/// when a required source is absent.
pub fn parse_config(matches: &ArgMatches, env: &EnvSnapshot) -> CliResult<RunConfig> {
    let upstream = select_upstream(matches)?;
    let downstream = matches
        .get_one::<PathBuf>("downstream")
        .cloned()
        .ok_or(CliError::MissingDownstream)?;

    let format = matches
        .get_one::<String>("format")
        .and_then(|raw| raw.parse::<OutputFormat>().ok())
        .unwrap_or_default();

    let kube = KubeSettings {
        context: matches.get_one::<String>("kube-context").cloned(),
        kubeconfig: matches.get_one::<PathBuf>("kubeconfig").cloned(),
        namespace: matches.get_one::<String>("namespace").cloned(),
    }
    .with_env_fallback(env);

    let analyzer = match matches.get_many::<String>("shallow-section") {
        Some(sections) => AnalyzerConfig::new().with_shallow_sections(sections),
        None => AnalyzerConfig::default(),
    };

    let mut config = RunConfig::new(upstream, downstream)
        .with_format(format)
        .with_stdout(matches.get_flag("stdout"))
        .with_optimize(matches.get_flag("optimize"))
        .with_kube(kube)
        .with_analyzer(analyzer);
    if let Some(dir) = matches.get_one::<PathBuf>("outdir") {
        config = config.with_output_dir(dir);
    }
    Ok(config)
}

/// Log level requested on the command line
#[must_use]
pub fn log_level(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("log-level")
        .map_or(DEFAULT_LOG_LEVEL, String::as_str)
}

fn select_upstream(matches: &ArgMatches) -> CliResult<UpstreamSource> {
    let file = matches.get_one::<PathBuf>("upstream");
    let chart = matches.get_one::<String>("chart");
    let release = matches.get_one::<String>("release");

    let source = if let Some(path) = file {
        UpstreamSource::File(path.clone())
    } else if let Some(name) = chart {
        UpstreamSource::Chart {
            name: name.clone(),
            version: matches.get_one::<String>("chart-version").cloned(),
        }
    } else if let Some(name) = release {
        UpstreamSource::Release {
            name: name.clone(),
            revision: matches.get_one::<u32>("revision").copied().unwrap_or(0),
        }
    } else {
        return Err(CliError::MissingUpstream);
    };

    let ignored: Vec<&str> = [
        (chart.is_some() && file.is_some(), "--chart"),
        (release.is_some() && (file.is_some() || chart.is_some()), "--release"),
    ]
    .into_iter()
    .filter_map(|(ignored, flag)| ignored.then_some(flag))
    .collect();
    if !ignored.is_empty() {
        tracing::warn!(selected = %source, "ignoring lower-priority upstream flags: {}", ignored.join(", "));
    }

    Ok(source)
}
