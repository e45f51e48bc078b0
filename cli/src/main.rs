use clap::Parser;
use humanizer_cli::commands::{cli, diagnostics, humanize};
use humanizer_cli::logging;
use humanizer_core::api as core_api;
use humanizer_core::error::CliError;
use tracing_appender::non_blocking::WorkerGuard;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let mut log_guard = None;
    let exit = match real_main(&mut log_guard).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "humanize failed");
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    // process::exit skips destructors; flush the log writer first.
    drop(log_guard);
    std::process::exit(exit);
}

async fn real_main(log_guard: &mut Option<WorkerGuard>) -> Result<i32, CliError> {
    let args = cli::Args::try_parse().map_err(|e| CliError::Command(e.to_string()))?;

    if args.wants_diagnostics() {
        return run_diagnostics(log_guard).await;
    }

    let cfg = core_api::load_default().map_err(|e| CliError::Config(e.to_string()))?;
    let setup = logging::init_tracing(&cfg.logging);
    *log_guard = setup.guard;
    for problem in &setup.problems {
        tracing::warn!("logging degraded: {}", problem);
    }
    if !args.rest.is_empty() {
        tracing::debug!(args = ?args.rest, "ignoring extra arguments");
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    humanize::run_humanize(&cfg, &mut stdin.lock(), &mut stdout.lock()).await?;
    Ok(0)
}

/// Always exits 0; configuration and logging problems show up in the report.
async fn run_diagnostics(log_guard: &mut Option<WorkerGuard>) -> Result<i32, CliError> {
    let mut issues = Vec::new();
    let cfg = match core_api::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            issues.push(format!("config error: {e}"));
            core_api::AppConfig::default()
        }
    };
    let setup = logging::init_tracing(&cfg.logging);
    *log_guard = setup.guard;
    issues.extend(
        setup
            .problems
            .into_iter()
            .map(|p| format!("logging setup failed: {p}")),
    );

    let mut stderr = std::io::stderr().lock();
    diagnostics::run_diagnostics(cfg, issues, &mut stderr).await?;
    Ok(0)
}
