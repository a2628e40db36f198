use std::process::ExitCode;

use anyhow::Context;
use hvm_cli::cli::log_level;
use hvm_cli::{build_command, init_tracing, parse_config, run, EnvSnapshot, HelmClient};

fn main() -> ExitCode {
    let mut command = build_command();
    let matches = command.clone().get_matches();
    init_tracing(log_level(&matches));

    let config = match parse_config(&matches, &EnvSnapshot::from_process()) {
        Ok(config) => config,
        Err(err) => {
            debug_assert!(err.is_usage());
            tracing::error!("{err}");
            eprintln!("{}", command.render_usage());
            return ExitCode::from(2);
        }
    };

    match try_main(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(config: &hvm_cli::RunConfig) -> anyhow::Result<()> {
    let helm = HelmClient::new(config.kube.clone());
    let outcome = run(config, &helm, &mut std::io::stdout().lock())
        .with_context(|| format!("analysis of {} failed", config.downstream.display()))?;

    tracing::info!(
        reports = outcome.written.len(),
        outdir = %config.output_dir().display(),
        "analysis complete"
    );
    Ok(())
}
