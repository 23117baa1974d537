//! Multi-player No-Limit Hold'em blueprint solver.
//!
//! Three subsystems cooperate:
//!
//! - `gameplay`: the game tree state machine of chance, decision and terminal nodes
//! - `indexing`, `clustering`, `abstraction`: canonical hand indices and the bucket tables built from them
//! - `mccfr`: external sampling MCCFR over abstracted information sets, shared by many worker threads
#![allow(dead_code)]

pub mod abstraction;
pub mod cards;
pub mod clustering;
pub mod context;
pub mod gameplay;
pub mod indexing;
pub mod mccfr;
pub mod players;
pub mod save;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Stack sizes, bets and pots in chips.
pub type Chips = i32;
/// Seat index around the table (seat 0 posts the small blind).
pub type Position = usize;
/// Distance metrics and clustering error.
pub type Energy = f32;
/// Expected values, regrets, and payoffs.
pub type Utility = f32;
/// Strategy weights, sampling distributions, and equities.
pub type Probability = f32;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// GAME TREE PARAMETERS
// ============================================================================
/// Number of players at the table.
pub const N: usize = 6;
/// Starting stack of every seat, in chips.
pub const STACK: Chips = 10_000;
/// Big blind amount.
pub const B_BLIND: Chips = 100;
/// Small blind amount.
pub const S_BLIND: Chips = 50;
/// Raise sizes as fractions of the pot after calling, ascending.
pub const RAISE_RATIOS: [f32; 3] = [0.5, 1.0, 2.0];

// ============================================================================
// EVALUATOR
// ============================================================================
/// Largest hand size tabulated by default; bigger hands reduce over 5-card subsets.
pub const EVALUATOR_TABLE_CARDS: usize = 7;

// ============================================================================
// ABSTRACTION
// Histograms are clustered into per-street buckets. Preflop stays lossless.
// ============================================================================
/// Equity histogram resolution for flop and turn EMD features.
pub const EQUITY_BINS: usize = 50;
/// Monte Carlo runouts per flop hand when sampling its equity histogram.
pub const EQUITY_SAMPLES_FLOP: usize = 512;
/// Monte Carlo boards per preflop hand when sampling its equity histogram.
pub const EQUITY_SAMPLES_PREFLOP: usize = 2048;
/// Number of flop buckets.
pub const KMEANS_FLOP_CLUSTER_COUNT: usize = 200;
/// Number of turn buckets.
pub const KMEANS_TURN_CLUSTER_COUNT: usize = 200;
/// Number of river buckets.
pub const KMEANS_RIVER_CLUSTER_COUNT: usize = 1000;
/// Number of preflop opponent archetypes used by OCHS river features.
pub const KMEANS_OCHS_CLUSTER_COUNT: usize = 16;
/// Upper bound on Lloyd iterations per restart.
pub const KMEANS_TRAINING_ITERATIONS: usize = 64;
/// Independent k-means++ restarts; the lowest mean distance wins.
pub const KMEANS_RESTARTS: usize = 2;

// ============================================================================
// REGRET MATCHING
// ============================================================================
/// Floor for cumulative regret storage (prevents unbounded negative growth).
pub const REGRET_MIN: Utility = -310_000_000.;

// ============================================================================
// PRUNING
// PRUNING_THRESHOLD > REGRET_MIN so floored actions can recover.
// ============================================================================
/// Actions with regret below this are skipped by the pruned traversal.
pub const PRUNING_THRESHOLD: Utility = -300_000_000.;
/// Iterations before pruned traversals are considered at all.
pub const PRUNING_WARMUP: usize = 200_000;
/// Probability that an eligible iteration still runs the unpruned traversal.
pub const PRUNING_EXPLORE: Probability = 0.05;

// ============================================================================
// TRAINING INFRASTRUCTURE
// ============================================================================
/// Iterations between average strategy updates.
pub const STRATEGY_INTERVAL: usize = 10_000;
/// Interval between bulk discounts of regrets and visit counts.
pub const DISCOUNT_INTERVAL: std::time::Duration = std::time::Duration::from_secs(600);
/// Training time after which discounting stops.
pub const DISCOUNT_CUTOFF: std::time::Duration = std::time::Duration::from_secs(24_000);
/// Interval between progress log messages during training.
pub const TRAINING_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);
/// Interval between infoset store checkpoints.
pub const CHECKPOINT_INTERVAL: std::time::Duration = std::time::Duration::from_secs(3_600);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Global interrupt flag for graceful shutdown coordination.
static INTERRUPTED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);
/// Optional training deadline from TRAIN_DURATION env var.
static DEADLINE: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();

/// Check if graceful shutdown was requested (via stdin "Q") or deadline reached.
pub fn interrupted() -> bool {
    INTERRUPTED.load(std::sync::atomic::Ordering::Relaxed)
        || DEADLINE
            .get()
            .map_or(false, |d| std::time::Instant::now() >= *d)
}

/// Register graceful interrupt handler. Type "Q" + Enter to stop training.
/// Optionally set TRAIN_DURATION env var (e.g., "2h", "30m") for timed runs.
pub fn brb() {
    if let Ok(duration) = std::env::var("TRAIN_DURATION") {
        if let Some(deadline) = parse_duration(&duration) {
            let _ = DEADLINE.set(std::time::Instant::now() + deadline);
            log::info!("training will stop after {}", duration);
        }
    }
    std::thread::spawn(|| {
        loop {
            let ref mut buffer = String::new();
            match std::io::stdin().read_line(buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) if buffer.trim().to_uppercase() == "Q" => {
                    log::warn!("graceful interrupt requested, stopping workers...");
                    INTERRUPTED.store(true, std::sync::atomic::Ordering::Relaxed);
                    break;
                }
                Ok(_) => continue,
            }
        }
    });
}

/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.len().saturating_sub(1));
    let value: u64 = num.parse().ok()?;
    match unit {
        "s" => Some(std::time::Duration::from_secs(value)),
        "m" => Some(std::time::Duration::from_secs(value * 60)),
        "h" => Some(std::time::Duration::from_secs(value * 3600)),
        "d" => Some(std::time::Duration::from_secs(value * 86400)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(parse_duration("30s"), Some(std::time::Duration::from_secs(30)));
        assert_eq!(parse_duration("5m"), Some(std::time::Duration::from_secs(300)));
        assert_eq!(parse_duration("2h"), Some(std::time::Duration::from_secs(7200)));
        assert_eq!(parse_duration("1d"), Some(std::time::Duration::from_secs(86400)));
        assert_eq!(parse_duration("1w"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn pruning_above_floor() {
        assert!(PRUNING_THRESHOLD > REGRET_MIN);
    }
}
