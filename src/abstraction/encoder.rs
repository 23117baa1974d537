use super::tables::AbstractionTables;
use crate::cards::Card;
use crate::cards::Hand;
use crate::cards::Street;
use crate::indexing::HandIndexer;

/// Maps what one seat can see to the bucket that names its infoset.
///
/// `board` holds the community cards visible so far; its length names
/// the street and the order of its cards is irrelevant.
pub trait Encoder: Send + Sync {
    fn bucket(&self, hole: Hand, board: &[Card]) -> usize;
}

/// One indexer per street, each covering hole cards and the board so far.
#[derive(Debug, Clone)]
pub struct Indexers {
    streets: Vec<HandIndexer>,
}

impl Default for Indexers {
    fn default() -> Self {
        Self {
            streets: Street::all().iter().map(|s| Self::indexer(*s)).collect(),
        }
    }
}

impl Indexers {
    pub fn indexer(street: Street) -> HandIndexer {
        HandIndexer::from(street)
    }
    pub fn size(&self, street: Street) -> u64 {
        self.streets[street as usize].size(street.round())
    }
    /// canonical index of hole cards and board on the board's street
    pub fn index(&self, hole: Hand, board: &[Card]) -> (Street, u64) {
        assert_eq!(hole.size(), 2, "two hole cards");
        let street = Street::from(board.len());
        let observed = hole.cards().into_iter().chain(board.iter().copied()).collect::<Vec<_>>();
        let index = self.streets[street as usize].index_last_round(&observed);
        (street, index)
    }
}

impl Encoder for AbstractionTables {
    fn bucket(&self, hole: Hand, board: &[Card]) -> usize {
        let (street, index) = self.indexers.index(hole, board);
        match street {
            Street::Pref => index as usize,
            Street::Flop => self.flop[index as usize] as usize,
            Street::Turn => self.turn[index as usize] as usize,
            Street::Rive => self.river[index as usize] as usize,
        }
    }
}

/// Buckets every hand by its own canonical index: suit isomorphism is
/// the only information thrown away. Needs no tables, so it suits small
/// games and tests.
#[derive(Debug, Clone, Default)]
pub struct Lossless(Indexers);

impl Encoder for Lossless {
    fn bucket(&self, hole: Hand, board: &[Card]) -> usize {
        self.0.index(hole, board).1 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstraction::Opponents;

    fn cards(s: &str) -> Vec<Card> {
        Card::parse(s).unwrap()
    }
    fn hand(s: &str) -> Hand {
        Hand::try_from(s).unwrap()
    }

    #[test]
    fn lossless_preflop_is_canonical() {
        let encoder = Lossless::default();
        let aa = encoder.bucket(hand("As Ah"), &[]);
        assert_eq!(aa, encoder.bucket(hand("Ac Ad"), &[]));
        assert_ne!(aa, encoder.bucket(hand("Ks Kh"), &[]));
        assert!(aa < 169);
    }

    #[test]
    fn lossless_respects_suit_relabeling() {
        let encoder = Lossless::default();
        let a = encoder.bucket(hand("As Kd"), &cards("Qs Js 2h 3c"));
        let b = encoder.bucket(hand("Ah Kc"), &cards("Qh Jh 2s 3d"));
        assert_eq!(a, b);
        let c = encoder.bucket(hand("As Kd"), &cards("Qs 3c Js 2h"));
        assert_eq!(a, c);
        let d = encoder.bucket(hand("As Kd"), &cards("Qs Js 2h 3s"));
        assert_ne!(a, d);
    }

    #[test]
    fn tables_look_up_buckets() {
        let indexers = Indexers::default();
        let flop = (0..indexers.size(Street::Flop)).map(|i| (i % 7) as u32).collect::<Vec<_>>();
        let turn = vec![3u32; indexers.size(Street::Turn) as usize];
        let tables = AbstractionTables {
            flop,
            turn,
            river: Vec::new(),
            opponents: Opponents::from((vec![0; 169], 1)),
            indexers: indexers.clone(),
        };
        let ref board = cards("Qs Js 2h 3c");
        let hole = hand("As Kd");
        let (_, index) = indexers.index(hole, &board[..3]);
        assert_eq!(tables.bucket(hole, &board[..3]), (index % 7) as usize);
        assert_eq!(tables.bucket(hole, board), 3);
        assert_eq!(tables.buckets(Street::Flop), 7);
        assert_eq!(tables.buckets(Street::Pref), 169);
    }

    #[test]
    fn tables_reject_wrong_sizes() {
        let opponents = Opponents::from((vec![0; 169], 1));
        assert!(AbstractionTables::from_parts(vec![0], vec![0], vec![0], opponents).is_err());
    }
}
