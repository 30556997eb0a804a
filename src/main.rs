use anyhow::{Context, Result};
use canvass::manager::Manager;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Simulate survey runs with probabilistic consent and analyze the responses.
#[derive(Debug, Parser)]
#[command(version, about, propagate_version = true)]
struct Cli {
    /// Directory holding `config.toml` and one `run-NNNN` directory per run.
    #[arg(long)]
    sim_dir: PathBuf,

    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Start a new run and perform its first simulation pass.
    Create,

    /// Perform one more simulation pass on an existing run.
    Resume {
        #[arg(long)]
        run_idx: usize,
    },

    /// Write `results.json` for every run.
    Analyze,

    /// Print every participant of a run with their answers.
    Report {
        #[arg(long)]
        run_idx: usize,
    },

    /// Remove every run directory.
    Clean,
}

impl Action {
    fn apply(self, mgr: &Manager) -> Result<()> {
        match self {
            Self::Create => mgr.create_run().context("failed to create run"),
            Self::Resume { run_idx } => mgr
                .resume_run(run_idx)
                .with_context(|| format!("failed to resume run {run_idx}")),
            Self::Analyze => mgr.analyze_sim().context("failed to analyze runs"),
            Self::Report { run_idx } => mgr
                .report_run(run_idx)
                .with_context(|| format!("failed to report run {run_idx}")),
            Self::Clean => mgr.clean_sim().context("failed to clean runs"),
        }
    }
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    log::info!("{cli:#?}");

    let result = Manager::new(&cli.sim_dir)
        .with_context(|| format!("failed to open simulation dir {:?}", cli.sim_dir))
        .and_then(|mgr| cli.action.apply(&mgr));

    if let Err(error) = result {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}
