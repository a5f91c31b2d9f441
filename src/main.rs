mod analyze;
mod config;
mod parser;
mod reports;
mod scanner;
mod validate;

use clap::Parser;
use config::{AnalyzerConfig, DEFAULT_CONFIG_FILE};
use reports::{HandlerReport, Report, ReportKind};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// A Rust CLI tool that scans Django application logs and tallies request
/// events per handler path and severity level.
#[derive(Parser, Debug)]
#[command(name = "logtally", version, about)]
pub struct Cli {
    /// Log files to analyze
    #[arg(value_name = "LOG_FILES", required = true)]
    log_files: Vec<PathBuf>,

    /// Report to produce (default: from config, "handlers")
    #[arg(short, long)]
    report: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Max files scanned concurrently (overrides config; 0 = all cores)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Extra logging (per-file scan results)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    tracing::debug!(?cli, "parsed CLI arguments");

    match run(&cli).await {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

/// Validate inputs, pick the report and run the analysis.
async fn run(cli: &Cli) -> Result<String, String> {
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path, true),
        None => AnalyzerConfig::load(&PathBuf::from(DEFAULT_CONFIG_FILE), false),
    }
    .map_err(|e| e.to_string())?;

    validate::validate_files(&cli.log_files).map_err(|e| e.to_string())?;

    let report_name = cli.report.as_deref().unwrap_or(&config.report.default);
    let kind = report_name
        .parse::<ReportKind>()
        .map_err(|e| e.to_string())?;

    let mut scan = config.scan;
    if let Some(workers) = cli.workers {
        scan.max_workers = workers;
    }
    let workers = scan.effective_workers();

    tracing::info!(report = %kind, files = cli.log_files.len(), "starting analysis");

    match kind {
        ReportKind::Handlers => {
            let report =
                HandlerReport::with_widths(config.report.handler_width, config.report.level_width);
            let report = analyze::analyze_logs(&cli.log_files, report, workers)
                .await
                .map_err(|e| format!("failed to analyze logs: {e}"))?;
            tracing::info!(
                total = report.total_requests(),
                handlers = report.handlers().count(),
                "report ready"
            );
            Ok(report.render())
        }
    }
}
