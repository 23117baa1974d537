//! Training Binary
//!
//! Loads or builds every table, resumes the latest blueprint and trains
//! until `Q` is entered, `TRAIN_DURATION` elapses, or the configured
//! iteration count is reached.
//!
//! Options: --config <path>, --threads <n>, --iterations <n>

use clap::Parser;
use nlhe_solver::context::Config;
use nlhe_solver::context::TrainingContext;
use nlhe_solver::mccfr::TrainerManager;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about = "Train a blueprint strategy", long_about = None)]
struct Args {
    /// JSON config; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// override the worker count
    #[arg(long)]
    threads: Option<usize>,
    /// stop after this many iterations
    #[arg(long)]
    iterations: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    nlhe_solver::log();
    nlhe_solver::brb();
    let args = Args::parse();
    let mut config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    if args.threads.is_some() {
        config.schedule.threads = args.threads;
    }
    if args.iterations.is_some() {
        config.schedule.iterations = args.iterations;
    }
    config.validate()?;
    let context = TrainingContext::learn(config)?;
    TrainerManager::new(Arc::new(context)).train()
}
