use super::combinatorics::choose;
use super::combinatorics::colex;
use super::combinatorics::uncolex;

/// bits per round in a packed Shape
const WIDTH: usize = 3;
/// most cards a single round may deal
pub const MAX_ROUND_CARDS: usize = (1 << WIDTH) - 1;

/// How many cards one suit holds in each round.
///
/// Two suits with the same Shape are interchangeable up to the ranks
/// they hold, which is what makes suit isomorphism tractable: the
/// canonical index only has to order suits by Shape, then by the rank
/// index within that Shape.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Shape(u32);

impl Shape {
    pub fn count(&self, round: usize) -> usize {
        ((self.0 >> (WIDTH * round)) & MAX_ROUND_CARDS as u32) as usize
    }
    pub fn total(&self, depth: usize) -> usize {
        (0..depth).map(|r| self.count(r)).sum()
    }
    /// number of distinct rank assignments a suit of this Shape can hold
    pub fn capacity(&self, depth: usize) -> u64 {
        let mut used = 0;
        let mut size = 1;
        for round in 0..depth {
            let n = self.count(round);
            size *= choose(13 - used, n);
            used += n;
        }
        size
    }

    /// rank masks of one suit, one per round, to (Shape, rank index).
    /// each round's ranks are ranked among the ranks the suit has not used yet.
    pub fn encode(masks: &[u16]) -> (Self, u64) {
        let mut used = 0u16;
        let mut index = 0u64;
        let mut radix = 1u64;
        let mut counts = Vec::with_capacity(masks.len());
        for mask in masks.iter().copied() {
            assert!(mask & used == 0, "rank dealt twice in one suit");
            let available = 13 - used.count_ones() as usize;
            let n = mask.count_ones() as usize;
            let positions = (0..13u16)
                .filter(|r| mask & (1 << r) != 0)
                .map(|r| (r - (used & ((1 << r) - 1)).count_ones() as u16) as usize);
            index += radix * colex(positions);
            radix *= choose(available, n);
            used |= mask;
            counts.push(n);
        }
        (Self::from(counts.as_slice()), index)
    }

    /// inverse of encode
    pub fn decode(&self, depth: usize, mut index: u64) -> Vec<u16> {
        let mut used = 0u16;
        let mut masks = Vec::with_capacity(depth);
        for round in 0..depth {
            let n = self.count(round);
            let available = 13 - used.count_ones() as usize;
            let base = choose(available, n);
            let positions = uncolex(index % base, n);
            index /= base;
            let free = (0..13u16)
                .filter(|r| used & (1 << r) == 0)
                .collect::<Vec<_>>();
            let mask = positions
                .into_iter()
                .map(|p| 1u16 << free[p])
                .fold(0u16, |a, b| a | b);
            used |= mask;
            masks.push(mask);
        }
        masks
    }

    /// every Shape whose counts fit within the given rounds,
    /// in descending order
    pub fn enumerate(rounds: &[usize]) -> Vec<Self> {
        let mut shapes = vec![Vec::<usize>::new()];
        for n in rounds.iter().copied() {
            shapes = shapes
                .into_iter()
                .flat_map(|prefix| {
                    (0..=n).map(move |k| {
                        let mut counts = prefix.clone();
                        counts.push(k);
                        counts
                    })
                })
                .filter(|counts| counts.iter().sum::<usize>() <= 13)
                .collect();
        }
        let mut shapes = shapes
            .iter()
            .map(|counts| Self::from(counts.as_slice()))
            .collect::<Vec<_>>();
        shapes.sort_by(|a, b| b.cmp(a));
        shapes
    }
}

/// per-round counts isomorphism
impl From<&[usize]> for Shape {
    fn from(counts: &[usize]) -> Self {
        Self(
            counts
                .iter()
                .enumerate()
                .inspect(|(_, n)| assert!(**n <= MAX_ROUND_CARDS, "too many cards in round"))
                .map(|(r, n)| (*n as u32) << (WIDTH * r))
                .fold(0u32, |a, b| a | b),
        )
    }
}
