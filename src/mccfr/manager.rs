use super::progress::Progress;
use super::store::Store;
use super::trainer::Trainer;
use crate::context::TrainingContext;
use crate::save::Blob;
use parking_lot::Mutex;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// Maintenance owned by one worker each, so that no duty needs a barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Duty {
    Strategy = 0,
    Discount = 1,
    Report = 2,
    Checkpoint = 3,
}

impl Duty {
    const ALL: [Self; 4] = [Self::Strategy, Self::Discount, Self::Report, Self::Checkpoint];
    /// duties of worker `index` out of `threads`; a small pool doubles up
    fn of(index: usize, threads: usize) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|duty| *duty as usize % threads == index)
            .collect()
    }
}

/// Runs a pool of trainers over one shared infoset store.
///
/// Every worker loops over iterations drawn from a shared counter until
/// interrupted or out of iterations. Besides training, worker 0 updates
/// the average strategy, worker 1 discounts, worker 2 logs progress and
/// worker 3 writes checkpoints, each on its own countdown. None of these
/// stop the other workers, so a checkpoint may interleave with updates.
/// A failed checkpoint stops every worker and `train` returns the error.
pub struct TrainerManager {
    context: Arc<TrainingContext>,
    iterations: AtomicUsize,
    nodes: AtomicUsize,
    checkpoints: AtomicUsize,
    /// set when a worker fails, so the others stop too
    failed: AtomicBool,
    start: Instant,
    /// one writer at a time for checkpoint files
    saving: Mutex<()>,
}

impl TrainerManager {
    pub fn new(context: Arc<TrainingContext>) -> Self {
        Self {
            context,
            iterations: AtomicUsize::new(0),
            nodes: AtomicUsize::new(0),
            checkpoints: AtomicUsize::new(0),
            failed: AtomicBool::new(false),
            start: Instant::now(),
            saving: Mutex::new(()),
        }
    }
    pub fn context(&self) -> &TrainingContext {
        &self.context
    }
    /// checkpoints written so far
    pub fn checkpoints(&self) -> usize {
        self.checkpoints.load(Ordering::Relaxed)
    }

    /// trains until interrupted, then writes a final checkpoint
    pub fn train(&self) -> anyhow::Result<()> {
        let threads = self.context.schedule().threads();
        log::info!("{:<32}{:<32}", "training workers", threads);
        std::thread::scope(|s| {
            let workers = (0..threads)
                .map(|index| s.spawn(move || self.work(index, threads)))
                .collect::<Vec<_>>();
            workers
                .into_iter()
                .map(|worker| worker.join().expect("training worker panicked"))
                .collect::<anyhow::Result<Vec<()>>>()
        })?;
        self.report();
        self.checkpoint()?;
        self.context.store().save(&Store::latest(&self.context.config().dir))
    }

    fn work(&self, index: usize, threads: usize) -> anyhow::Result<()> {
        let context = self.context.as_ref();
        let schedule = context.schedule();
        let duties = Duty::of(index, threads);
        let discount = schedule.discount();
        let mut trainer = Trainer::new(context, self.seed(index));
        let mut strategized = 0;
        let mut discounted = self.start;
        let mut reported = self.start;
        let mut saved = self.start;
        while !crate::interrupted() && !self.failed.load(Ordering::Relaxed) {
            let t = self.iterations.fetch_add(1, Ordering::Relaxed) + 1;
            if schedule.iterations.is_some_and(|n| t > n) {
                self.iterations.fetch_sub(1, Ordering::Relaxed);
                break;
            }
            if duties.contains(&Duty::Strategy) && t - strategized >= schedule.strategy_interval {
                strategized = t;
                for traverser in 0..context.rules().players {
                    let ref root = trainer.root();
                    trainer.update_strategy(root, traverser);
                }
            }
            trainer.iterate(t);
            self.nodes.fetch_add(trainer.take_nodes(), Ordering::Relaxed);
            let now = Instant::now();
            if duties.contains(&Duty::Discount) && now.duration_since(discounted) >= discount.interval() {
                discounted = now;
                if let Some(factor) = discount.factor(self.elapsed()) {
                    log::debug!("{:<32}{:<32}", "discounting", factor);
                    context.store().discount(factor);
                }
            }
            if duties.contains(&Duty::Report) && now.duration_since(reported) >= schedule.log_interval {
                reported = now;
                self.report();
            }
            if duties.contains(&Duty::Checkpoint) && now.duration_since(saved) >= schedule.checkpoint_interval {
                saved = now;
                if let Err(e) = self.checkpoint() {
                    log::error!("{:<32}{:<32}", "checkpoint failed, stopping", e);
                    self.failed.store(true, Ordering::Relaxed);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// timestamped snapshot of the store
    pub fn checkpoint(&self) -> anyhow::Result<()> {
        let _guard = self.saving.lock();
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)?
            .as_secs();
        let ref path = Store::path(&self.context.config().dir, secs);
        self.context.store().save(path)?;
        self.checkpoints.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn seed(&self, index: usize) -> u64 {
        let ref mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.context.schedule().seed.hash(hasher);
        index.hash(hasher);
        hasher.finish()
    }
}

impl Progress for TrainerManager {
    fn epoch(&self) -> usize {
        self.iterations.load(Ordering::Relaxed)
    }
    fn nodes(&self) -> usize {
        self.nodes.load(Ordering::Relaxed)
    }
    fn infos(&self) -> usize {
        self.context.store().len()
    }
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstraction::Lossless;
    use crate::cards::Evaluator;
    use crate::context::Config;
    use crate::gameplay::Rules;
    use crate::mccfr::Schedule;

    fn manager(dir: &std::path::Path, threads: usize, iterations: usize) -> TrainerManager {
        scheduled(
            dir,
            Schedule {
                threads: Some(threads),
                iterations: Some(iterations),
                strategy_interval: 10,
                ..Schedule::default()
            },
        )
    }

    fn scheduled(dir: &std::path::Path, schedule: Schedule) -> TrainerManager {
        let config = Config {
            dir: dir.to_path_buf(),
            rules: Rules {
                players: 2,
                stack: 500,
                ..Rules::default()
            },
            schedule,
            ..Config::default()
        };
        let context = TrainingContext::new(
            config,
            Box::new(Evaluator::shared()),
            Box::new(Lossless::default()),
            Store::default(),
        );
        TrainerManager::new(Arc::new(context))
    }

    #[test]
    fn duties_cover_small_pools() {
        assert_eq!(Duty::of(0, 1), Duty::ALL.to_vec());
        assert_eq!(Duty::of(0, 2), vec![Duty::Strategy, Duty::Report]);
        assert_eq!(Duty::of(1, 2), vec![Duty::Discount, Duty::Checkpoint]);
        assert_eq!(Duty::of(3, 8), vec![Duty::Checkpoint]);
        assert!(Duty::of(5, 8).is_empty());
    }

    #[test]
    fn trains_for_the_configured_iterations() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(dir.path(), 4, 200);
        manager.train().unwrap();
        assert_eq!(manager.epoch(), 200);
        assert!(manager.nodes() > 200);
        assert!(manager.infos() > 0);
        let resumed = Store::resume(dir.path()).unwrap();
        assert_eq!(resumed.len(), manager.infos());
    }

    #[test]
    fn strategy_counts_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager(dir.path(), 1, 100);
        manager.train().unwrap();
        let store = manager.context().store();
        let visits = store
            .keys()
            .iter()
            .filter_map(|key| store.get(key))
            .map(|infoset| infoset.counts().iter().sum::<f32>())
            .sum::<f32>();
        assert!(visits > 0.);
    }

    #[test]
    fn checkpoints_on_a_millisecond_interval() {
        let dir = tempfile::tempdir().unwrap();
        let manager = scheduled(
            dir.path(),
            Schedule {
                threads: Some(1),
                iterations: Some(2000),
                checkpoint_interval: Duration::from_millis(1),
                log_interval: Duration::from_millis(1),
                ..Schedule::default()
            },
        );
        manager.train().unwrap();
        assert!(manager.checkpoints() > 1);
        let stamped = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("blueprint.") && name != "blueprint.bin")
            .count();
        assert!(stamped > 0);
    }

    #[test]
    fn discounts_untouched_infosets() {
        let dir = tempfile::tempdir().unwrap();
        let manager = scheduled(
            dir.path(),
            Schedule {
                threads: Some(1),
                iterations: Some(2000),
                discount_interval: Duration::from_millis(1),
                ..Schedule::default()
            },
        );
        let ref key = crate::mccfr::InfosetKey::from("never reached");
        let sentinel = manager.context().store().obtain(key, 2);
        sentinel.add_regret(0, 100., f32::MIN);
        sentinel.visit(0);
        manager.train().unwrap();
        let regret = sentinel.regret(0);
        assert!(regret < 100., "regret {regret} was never discounted");
        assert!(regret > 0.);
        assert!(sentinel.counts()[0] < 1.);
    }

    #[test]
    fn failed_checkpoint_stops_every_worker() {
        let dir = tempfile::tempdir().unwrap();
        let ref blocker = dir.path().join("blocker");
        std::fs::write(blocker, b"not a directory").unwrap();
        let budget = 1_000_000;
        let manager = scheduled(
            &blocker.join("nested"),
            Schedule {
                threads: Some(4),
                iterations: Some(budget),
                checkpoint_interval: Duration::ZERO,
                ..Schedule::default()
            },
        );
        assert!(manager.train().is_err());
        assert_eq!(manager.checkpoints(), 0);
        assert!(manager.epoch() < budget);
    }
}
