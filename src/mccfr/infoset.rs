use crate::Probability;
use crate::Utility;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

/// f32 cell shared between threads without a lock
#[derive(Debug, Default)]
struct Cell(AtomicU32);

impl Cell {
    fn new(x: f32) -> Self {
        Self(AtomicU32::new(x.to_bits()))
    }
    fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
    fn set(&self, x: f32) {
        self.0.store(x.to_bits(), Ordering::Relaxed)
    }
    /// load, modify, store. two writers racing here can lose an update
    fn update(&self, f: impl FnOnce(f32) -> f32) {
        self.set(f(self.get()))
    }
}

/// Regrets and visit counts of one information set, indexed by the
/// position of each action among the legal actions there.
///
/// Cells are updated with relaxed load-then-store rather than a lock or
/// a compare-and-swap loop. Concurrent traversals through the same
/// infoset may overwrite each other's increments; training tolerates the
/// noise and never blocks on it.
#[derive(Debug)]
pub struct Infoset {
    regrets: Vec<Cell>,
    counts: Vec<Cell>,
}

impl Infoset {
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "infoset without actions");
        Self {
            regrets: (0..n).map(|_| Cell::default()).collect(),
            counts: (0..n).map(|_| Cell::default()).collect(),
        }
    }
    pub fn len(&self) -> usize {
        self.regrets.len()
    }
    pub fn regret(&self, action: usize) -> Utility {
        self.regrets[action].get()
    }
    pub fn regrets(&self) -> Vec<Utility> {
        self.regrets.iter().map(Cell::get).collect()
    }
    pub fn counts(&self) -> Vec<f32> {
        self.counts.iter().map(Cell::get).collect()
    }

    /// regret matching: positive regrets normalized, uniform if none
    pub fn strategy(&self) -> Vec<Probability> {
        Self::normalize(self.regrets.iter().map(Cell::get).map(|r| r.max(0.)).collect())
    }
    /// normalized visit counts: the policy used at play time
    pub fn average(&self) -> Vec<Probability> {
        Self::normalize(self.counts())
    }

    pub fn add_regret(&self, action: usize, delta: Utility, floor: Utility) {
        self.regrets[action].update(|r| (r + delta).max(floor));
    }
    pub fn visit(&self, action: usize) {
        self.counts[action].update(|c| c + 1.);
    }
    pub fn discount(&self, factor: f32) {
        for cell in self.regrets.iter().chain(self.counts.iter()) {
            cell.update(|x| x * factor);
        }
    }

    fn normalize(weights: Vec<f32>) -> Vec<Probability> {
        let n = weights.len();
        let sum = weights.iter().sum::<f32>();
        if sum > f32::EPSILON {
            weights.into_iter().map(|w| w / sum).collect()
        } else {
            vec![1. / n as Probability; n]
        }
    }
}

/// (regrets, counts) isomorphism
impl From<(Vec<Utility>, Vec<f32>)> for Infoset {
    fn from((regrets, counts): (Vec<Utility>, Vec<f32>)) -> Self {
        assert_eq!(regrets.len(), counts.len(), "regrets and counts disagree");
        Self {
            regrets: regrets.into_iter().map(Cell::new).collect(),
            counts: counts.into_iter().map(Cell::new).collect(),
        }
    }
}

impl From<&Infoset> for (Vec<Utility>, Vec<f32>) {
    fn from(infoset: &Infoset) -> Self {
        (infoset.regrets(), infoset.counts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_without_positive_regret() {
        let infoset = Infoset::from((vec![-3., 0., -1., -8.], vec![0.; 4]));
        assert_eq!(infoset.strategy(), vec![0.25; 4]);
        assert_eq!(infoset.average(), vec![0.25; 4]);
    }

    #[test]
    fn regret_matching_ignores_negative_regret() {
        let infoset = Infoset::from((vec![3., -5., 1.], vec![0.; 3]));
        assert_eq!(infoset.strategy(), vec![0.75, 0., 0.25]);
    }

    #[test]
    fn average_follows_visits() {
        let infoset = Infoset::new(2);
        infoset.visit(1);
        infoset.visit(1);
        infoset.visit(0);
        let average = infoset.average();
        assert!((average[0] - 1. / 3.).abs() < 1e-6);
        assert!((average[1] - 2. / 3.).abs() < 1e-6);
    }

    #[test]
    fn regrets_stop_at_the_floor() {
        let infoset = Infoset::new(2);
        infoset.add_regret(0, -50., -100.);
        infoset.add_regret(0, -80., -100.);
        infoset.add_regret(1, 7., -100.);
        assert_eq!(infoset.regrets(), vec![-100., 7.]);
    }

    #[test]
    fn discount_scales_everything() {
        let infoset = Infoset::from((vec![4., -2.], vec![10., 6.]));
        infoset.discount(0.5);
        assert_eq!(infoset.regrets(), vec![2., -1.]);
        assert_eq!(infoset.counts(), vec![5., 3.]);
    }

    #[test]
    fn concurrent_updates_stay_finite() {
        let infoset = Infoset::new(3);
        std::thread::scope(|s| {
            for t in 0..4 {
                let infoset = &infoset;
                s.spawn(move || {
                    for i in 0..1_000 {
                        infoset.add_regret(i % 3, t as f32, -1.);
                        infoset.visit(i % 3);
                    }
                });
            }
        });
        assert!(infoset.regrets().iter().all(|r| r.is_finite() && *r >= 0.));
        assert!(infoset.counts().iter().all(|c| *c > 0. && *c <= 4_000.));
    }
}
