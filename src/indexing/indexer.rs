use super::configuration::Configuration;
use super::configuration::Suited;
use super::shape::MAX_ROUND_CARDS;
use super::shape::Shape;
use crate::cards::Card;
use crate::cards::Hand;
use crate::cards::Rank;
use crate::cards::Street;
use crate::cards::Suit;
use std::collections::HashMap;

/// Perfect index of card combinations up to suit isomorphism.
///
/// Cards arrive in rounds, e.g. `[2, 5]` for hole cards then a river
/// board, or `[2, 3, 1, 1]` to keep every street apart. Two deals map to the same index exactly when a
/// relabeling of the four suits carries one onto the other, round by
/// round. Indices of round `r` are dense in `0..size(r)`.
///
/// Each suit is summarized by its [`Shape`] and a rank index; the hand
/// is the multiset of those four summaries, which is what suit
/// relabeling leaves unchanged.
#[derive(Debug, Clone)]
pub struct HandIndexer {
    rounds: Vec<usize>,
    configurations: Vec<Vec<Configuration>>,
    lookup: Vec<HashMap<[Shape; 4], usize>>,
}

impl HandIndexer {
    /// panics on an empty layout, a round of zero cards,
    /// or more cards than a deck holds
    pub fn new(rounds: &[usize]) -> Self {
        assert!(!rounds.is_empty(), "indexer needs at least one round");
        assert!(rounds.iter().all(|n| *n > 0), "round of zero cards");
        assert!(
            rounds.iter().all(|n| *n <= MAX_ROUND_CARDS),
            "round larger than {} cards",
            MAX_ROUND_CARDS
        );
        assert!(rounds.iter().sum::<usize>() <= 52, "more cards than a deck");
        let configurations = (1..=rounds.len())
            .map(|depth| Configuration::enumerate(&rounds[..depth]))
            .collect::<Vec<_>>();
        let lookup = configurations
            .iter()
            .map(|round| {
                round
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (c.shapes(), i))
                    .collect::<HashMap<_, _>>()
            })
            .collect();
        Self {
            rounds: rounds.to_vec(),
            configurations,
            lookup,
        }
    }

    pub fn rounds(&self) -> &[usize] {
        &self.rounds
    }
    /// number of cards seen through this round
    pub fn cards(&self, round: usize) -> usize {
        self.rounds[..=round].iter().sum()
    }
    /// number of canonical classes in this round
    pub fn size(&self, round: usize) -> u64 {
        self.configurations[round]
            .last()
            .map(|c| c.offset() + c.size())
            .unwrap_or(0)
    }

    /// index of the full deal, cards ordered by round
    pub fn index_last_round(&self, cards: &[Card]) -> u64 {
        self.index_round(self.rounds.len() - 1, cards)
    }

    /// index of the deal through this round. extra cards
    /// belonging to later rounds are ignored.
    pub fn index_round(&self, round: usize, cards: &[Card]) -> u64 {
        assert!(round < self.rounds.len(), "no round {}", round);
        assert!(
            cards.len() >= self.cards(round),
            "round {} needs {} cards, got {}",
            round,
            self.cards(round),
            cards.len()
        );
        let ref hands = self.split(round, cards);
        let mut suits = Suit::all()
            .iter()
            .map(|suit| {
                let masks = hands
                    .iter()
                    .map(|hand| u16::from(hand.of(suit)))
                    .collect::<Vec<_>>();
                Shape::encode(&masks)
            })
            .collect::<Vec<Suited>>();
        suits.sort_by(|a, b| b.cmp(a));
        let suits = [suits[0], suits[1], suits[2], suits[3]];
        let shapes = suits.map(|(shape, _)| shape);
        let configuration = self
            .lookup
            .get(round)
            .and_then(|lookup| lookup.get(&shapes))
            .map(|i| &self.configurations[round][*i])
            .expect("dealt cards match round layout");
        configuration.offset() + configuration.index(&suits)
    }

    /// a canonical representative of this index, cards ordered by round
    /// and ascending within each round. None past the end of the round.
    pub fn unindex(&self, round: usize, index: u64) -> Option<Vec<Card>> {
        if round >= self.rounds.len() || index >= self.size(round) {
            return None;
        }
        let ref configurations = self.configurations[round];
        let position = configurations.partition_point(|c| c.offset() <= index) - 1;
        let configuration = &configurations[position];
        let suits = configuration.unindex(index - configuration.offset());
        let mut hands = vec![Hand::empty(); round + 1];
        for (suit, (shape, local)) in Suit::all().iter().zip(suits) {
            for (r, mask) in shape.decode(round + 1, local).into_iter().enumerate() {
                for rank in (0..13u8).filter(|r| mask & (1 << r) != 0) {
                    hands[r].insert(Card::from((Rank::from(rank), *suit)));
                }
            }
        }
        Some(hands.into_iter().flat_map(Vec::<Card>::from).collect())
    }

    /// the representative of this deal's class
    pub fn canonical(&self, round: usize, cards: &[Card]) -> Vec<Card> {
        self.unindex(round, self.index_round(round, cards))
            .expect("index within round")
    }

    /// the cards of each round through this one, rejecting duplicates
    fn split(&self, round: usize, cards: &[Card]) -> Vec<Hand> {
        let mut start = 0;
        let hands = self.rounds[..=round]
            .iter()
            .map(|n| {
                let hand = Hand::from(&cards[start..start + n]);
                start += n;
                hand
            })
            .collect::<Vec<_>>();
        assert!(
            hands.iter().copied().fold(Hand::empty(), Hand::add).size() == start,
            "duplicate cards"
        );
        hands
    }
}

/// hole cards plus every community card through this street
impl From<Street> for HandIndexer {
    fn from(street: Street) -> Self {
        Self::new(&street.rounds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashSet;

    fn permutations() -> Vec<[u8; 4]> {
        let mut all = Vec::new();
        for a in 0..4u8 {
            for b in (0..4).filter(|b| *b != a) {
                for c in (0..4).filter(|c| *c != a && *c != b) {
                    let d = 6 - a - b - c;
                    all.push([a, b, c, d]);
                }
            }
        }
        all
    }

    fn relabel(cards: &[Card], perm: &[u8; 4]) -> Vec<Card> {
        cards
            .iter()
            .map(|c| Card::from((c.rank(), Suit::from(perm[u8::from(c.suit()) as usize]))))
            .collect()
    }

    /// suit-relabeling orbit representative by brute force
    fn orbit(indexer: &HandIndexer, round: usize, cards: &[Card]) -> Vec<u64> {
        permutations()
            .iter()
            .map(|perm| {
                let ref cards = relabel(cards, perm);
                indexer
                    .split(round, cards)
                    .into_iter()
                    .map(u64::from)
                    .collect::<Vec<_>>()
            })
            .min()
            .unwrap()
    }

    fn deal(rng: &mut SmallRng, n: usize) -> Vec<Card> {
        let mut deck = Deck::new();
        (0..n).map(|_| deck.draw(rng)).collect()
    }

    #[test]
    fn street_sizes() {
        for street in Street::all() {
            let indexer = HandIndexer::from(*street);
            assert_eq!(indexer.size(street.round()), street.n_isomorphisms() as u64);
        }
    }

    #[test]
    fn intermediate_sizes() {
        let indexer = HandIndexer::from(Street::Rive);
        assert_eq!(indexer.size(0), 169);
        assert_eq!(indexer.size(1), 123_156_254);
        let streets = HandIndexer::new(&[2, 3, 1]);
        assert_eq!(streets.size(1), 1_286_792);
        assert_eq!(streets.size(2), 55_190_538);
    }

    #[test]
    fn preflop_classes() {
        let indexer = HandIndexer::new(&[2]);
        let mut seen = HashSet::new();
        for a in 0..52u8 {
            for b in a + 1..52 {
                let cards = [Card::from(a), Card::from(b)];
                let index = indexer.index_last_round(&cards);
                assert!(index < 169);
                seen.insert(index);
            }
        }
        assert_eq!(seen.len(), 169);
    }

    #[test]
    fn preflop_exact_isomorphism() {
        let indexer = HandIndexer::new(&[2]);
        let mut classes = std::collections::HashMap::new();
        for a in 0..52u8 {
            for b in a + 1..52 {
                let ref cards = [Card::from(a), Card::from(b)];
                let index = indexer.index_last_round(cards);
                let orbit = orbit(&indexer, 0, cards);
                assert_eq!(*classes.entry(index).or_insert(orbit.clone()), orbit);
            }
        }
    }

    #[test]
    fn permutation_invariance() {
        let ref mut rng = SmallRng::seed_from_u64(7);
        let indexer = HandIndexer::from(Street::Rive);
        for _ in 0..200 {
            let ref cards = deal(rng, 7);
            for round in 0..2 {
                let index = indexer.index_round(round, cards);
                for perm in permutations() {
                    assert_eq!(indexer.index_round(round, &relabel(cards, &perm)), index);
                }
            }
        }
    }

    #[test]
    fn distinct_classes_distinct_indices() {
        let ref mut rng = SmallRng::seed_from_u64(11);
        let indexer = HandIndexer::new(&[2, 3]);
        let mut classes = std::collections::HashMap::new();
        let mut orbits = std::collections::HashMap::new();
        for _ in 0..5_000 {
            let ref cards = deal(rng, 5);
            let index = indexer.index_last_round(cards);
            let orbit = orbit(&indexer, 1, cards);
            assert_eq!(*classes.entry(index).or_insert(orbit.clone()), orbit);
            assert_eq!(*orbits.entry(orbit).or_insert(index), index);
        }
    }

    #[test]
    fn round_order_matters() {
        let indexer = HandIndexer::new(&[2, 3]);
        let a = Card::parse("As Ks 2s 7h 9d").unwrap();
        let b = Card::parse("As 2s Ks 7h 9d").unwrap();
        assert_ne!(indexer.index_last_round(&a), indexer.index_last_round(&b));
        let c = Card::parse("Ks As 2s 9d 7h").unwrap();
        assert_eq!(indexer.index_last_round(&a), indexer.index_last_round(&c));
    }

    #[test]
    fn unindex_roundtrip() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let indexer = HandIndexer::new(&[2, 3, 1, 1]);
        for round in 0..4 {
            let size = indexer.size(round);
            for index in (0..200).map(|_| rand::Rng::random_range(rng, 0..size)).chain([0, size - 1]) {
                let cards = indexer.unindex(round, index).unwrap();
                assert_eq!(cards.len(), indexer.cards(round));
                assert_eq!(Hand::from(cards.as_slice()).size(), cards.len());
                assert_eq!(indexer.index_round(round, &cards), index);
            }
            assert!(indexer.unindex(round, size).is_none());
        }
    }

    #[test]
    fn canonical_is_isomorphic() {
        let indexer = HandIndexer::from(Street::Turn);
        let ref mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..100 {
            let ref cards = deal(rng, 6);
            let canonical = indexer.canonical(1, cards);
            assert_eq!(orbit(&indexer, 1, &canonical), orbit(&indexer, 1, cards));
        }
    }

    #[test]
    #[should_panic]
    fn rejects_empty_round() {
        HandIndexer::new(&[2, 0]);
    }

    #[test]
    #[should_panic]
    fn rejects_duplicates() {
        let indexer = HandIndexer::new(&[2, 3]);
        indexer.index_last_round(&Card::parse("As Ks As 7h 9d").unwrap());
    }
}
