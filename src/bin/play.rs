//! Play Binary
//!
//! Sits one human against the trained blueprint in the remaining seats.
//!
//! Options: --config <path>, --seat <n>, --hands <n>

use clap::Parser;
use nlhe_solver::context::Config;
use nlhe_solver::context::TrainingContext;
use nlhe_solver::gameplay::Table;
use nlhe_solver::players::HumanPlayer;
use nlhe_solver::players::Player;
use nlhe_solver::players::PolicyPlayer;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about = "Play against the blueprint", long_about = None)]
struct Args {
    /// JSON config; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// the human's seat, 0 posts the small blind
    #[arg(long, default_value_t = 0)]
    seat: usize,
    /// hands to play
    #[arg(long, default_value_t = 10)]
    hands: usize,
}

fn main() -> anyhow::Result<()> {
    nlhe_solver::log();
    let args = Args::parse();
    let config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    let seed = config.schedule.seed;
    let context = Arc::new(TrainingContext::learn(config)?);
    anyhow::ensure!(args.seat < context.rules().players, "no seat {}", args.seat);
    let players = (0..context.rules().players)
        .map(|seat| match seat == args.seat {
            true => Box::new(HumanPlayer::new(seed)) as Box<dyn Player>,
            false => Box::new(PolicyPlayer::new(context.clone(), seed + seat as u64)) as Box<dyn Player>,
        })
        .collect::<Vec<_>>();
    let ref mut rng = SmallRng::seed_from_u64(seed);
    let mut table = Table::new(context.rules(), players, context.evaluator());
    let totals = table.session(args.hands, rng);
    log::info!("{:<32}{:<32}", "your result", totals[args.seat]);
    Ok(())
}
