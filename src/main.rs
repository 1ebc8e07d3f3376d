use anyhow::Context;
use clap::{Parser, Subcommand};
use nuview_pipeline::commands::{self, Outcome};
use nuview_pipeline::AppConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nuview-pipeline", version, about = "Funding opportunity pipeline: scrape, QC, dashboard outputs")]
struct Cli {
    #[arg(long, global = true, help = "TOML config file (default: ./nuview.toml if present)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Data directory holding the input JSON files")]
    data_dir: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Debug logging")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run all opportunity sources and write opportunities.json + forecast.json
    Scrape,
    /// Validate inputs and write qc_report.json; exits non-zero on FAIL
    Qc,
    /// Write programs.json and priority_matrix.csv from opportunities.json
    Generate,
    /// scrape, qc, then generate if QC passed
    All,
}

fn init_tracing(level: &str, verbose: bool) {
    let directive = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    // local time, target and level like the service logs
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.paths.rebase(dir);
    }

    init_tracing(&config.logging.level, cli.verbose);
    info!("Starting with config: {:?}", config.paths);

    let outcome = match cli.command {
        Commands::Scrape => {
            commands::scrape::run(&config)?;
            Outcome::Success
        }
        Commands::Qc => {
            if commands::qc::run(&config)?.passed() {
                Outcome::Success
            } else {
                Outcome::QcFailed
            }
        }
        Commands::Generate => {
            commands::generate::run(&config)?;
            Outcome::Success
        }
        Commands::All => commands::run_all(&config)?,
    };
    Ok(outcome)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::QcFailed) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("nuview-pipeline error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
