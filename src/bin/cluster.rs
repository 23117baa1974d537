//! Abstraction Binary
//!
//! Builds the evaluator and abstraction tables that are missing under the
//! configured directory, or reruns kmeans for one street seeded from its
//! current clusters.
//!
//! Options: --config <path>, --refine <street>

use clap::Parser;
use nlhe_solver::abstraction::AbstractionTables;
use nlhe_solver::cards::Evaluator;
use nlhe_solver::cards::Street;
use nlhe_solver::context::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Build hand abstraction tables", long_about = None)]
struct Args {
    /// JSON config; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// refine the clusters of one street (flop, turn or river)
    #[arg(long)]
    refine: Option<String>,
}

fn main() -> anyhow::Result<()> {
    nlhe_solver::log();
    let args = Args::parse();
    let config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    let ref dir = config.dir;
    match args.refine {
        Some(street) => {
            let street = Street::try_from(street.as_str()).map_err(anyhow::Error::msg)?;
            AbstractionTables::refine(dir, &config.abstraction, street)
        }
        None => {
            let evaluator = Evaluator::learn(dir, nlhe_solver::EVALUATOR_TABLE_CARDS)?;
            AbstractionTables::learn(dir, &evaluator, &config.abstraction)?;
            log::info!("{:<32}{:<32}", "abstraction ready", dir.display());
            Ok(())
        }
    }
}
