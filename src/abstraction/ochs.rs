use super::equity;
use crate::Probability;
use crate::cards::Card;
use crate::cards::Evaluate;
use crate::cards::Hand;
use crate::cards::HandIterator;
use crate::indexing::HandIndexer;
use crate::save::Blob;
use std::io::Read;
use std::io::Write;

/// Opponent archetypes for opponent cluster hand strength.
///
/// Every one of the 169 canonical starting hands belongs to one of a few
/// archetypes, found by clustering preflop equity histograms. A river
/// hand is then described by its win rate against each archetype rather
/// than against a single uniformly random opponent.
#[derive(Debug, Clone, PartialEq)]
pub struct Opponents {
    archetypes: Vec<u32>,
    k: usize,
    /// archetype of every two-card hand, by lower and higher card
    pairs: Vec<u32>,
}

impl Opponents {
    pub fn k(&self) -> usize {
        self.k
    }
    /// archetype of each canonical preflop index
    pub fn archetypes(&self) -> &[u32] {
        &self.archetypes
    }
    pub fn archetype(&self, hole: Hand) -> usize {
        let cards = hole.cards();
        assert_eq!(cards.len(), 2, "hole cards");
        self.pairs[Self::slot(cards[0], cards[1])] as usize
    }

    fn slot(lo: Card, hi: Card) -> usize {
        u8::from(lo) as usize * 52 + u8::from(hi) as usize
    }

    /// win rate of the hero's river hand against each archetype.
    /// an archetype the hero and board block entirely scores a coin flip.
    pub fn features(&self, evaluator: &dyn Evaluate, hole: Hand, board: Hand) -> Vec<Probability> {
        assert_eq!(board.size(), 5, "river features need a full board");
        let ref dead = Hand::add(hole, board);
        let ours = evaluator.evaluate(*dead);
        let mut scores = vec![0f32; self.k];
        let mut counts = vec![0usize; self.k];
        for villain in HandIterator::from((2, *dead)) {
            let k = self.archetype(villain);
            let theirs = evaluator.evaluate(Hand::add(villain, board));
            scores[k] += match ours.cmp(&theirs) {
                std::cmp::Ordering::Greater => 1.,
                std::cmp::Ordering::Equal => 0.5,
                std::cmp::Ordering::Less => 0.,
            };
            counts[k] += 1;
        }
        scores
            .into_iter()
            .zip(counts)
            .map(|(s, n)| match n {
                0 => 0.5,
                n => s / n as Probability,
            })
            .collect()
    }

    /// preflop equity histogram of each canonical starting hand
    pub fn histograms(evaluator: &dyn Evaluate, bins: usize, samples: usize, seed: u64) -> Vec<f32> {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;
        use rayon::prelude::*;
        let ref indexer = HandIndexer::new(&[2]);
        (0..indexer.size(0))
            .into_par_iter()
            .map(|i| {
                let ref mut rng = SmallRng::seed_from_u64(seed ^ i);
                let cards = indexer.unindex(0, i).expect("index within preflop");
                equity::histogram(evaluator, Hand::from(cards), Hand::empty(), bins, samples, rng)
            })
            .flatten_iter()
            .collect()
    }
}

/// archetype of each canonical preflop index
impl From<(Vec<u32>, usize)> for Opponents {
    fn from((archetypes, k): (Vec<u32>, usize)) -> Self {
        let indexer = HandIndexer::new(&[2]);
        assert_eq!(archetypes.len() as u64, indexer.size(0), "one archetype per starting hand");
        assert!(archetypes.iter().all(|a| (*a as usize) < k), "archetype out of range");
        let mut pairs = vec![0u32; 52 * 52];
        for hole in HandIterator::from((2, Hand::empty())) {
            let cards = hole.cards();
            let index = indexer.index_last_round(&cards);
            pairs[Self::slot(cards[0], cards[1])] = archetypes[index as usize];
        }
        Self {
            archetypes,
            k,
            pairs,
        }
    }
}

impl Blob for Opponents {
    fn name() -> &'static str {
        "opponents"
    }
    fn write<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        crate::save::write_u32s(writer, &[self.k as u32])?;
        crate::save::write_u32s(writer, &self.archetypes)
    }
    fn read<R: Read>(reader: &mut R) -> anyhow::Result<Self> {
        let k = crate::save::read_u32s(reader)?;
        anyhow::ensure!(k.len() == 1, "malformed archetype count");
        let archetypes = crate::save::read_u32s(reader)?;
        anyhow::ensure!(archetypes.len() == 169, "expected 169 starting hands");
        anyhow::ensure!(
            archetypes.iter().all(|a| *a < k[0]),
            "archetype out of range"
        );
        Ok(Self::from((archetypes, k[0] as usize)))
    }
}
