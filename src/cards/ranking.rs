/// A poker hand's category.
///
/// This is the coarse part of a hand's value; [`Kickers`] break ties
/// within a category. Declaration order is strength order.
///
/// [`Kickers`]: super::kicks::Kickers
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard,      // 5 kickers
    OnePair,       // pair + 3 kickers
    TwoPair,       // high pair, low pair + 1 kicker
    ThreeOAK,      // trips + 2 kickers
    Straight,      // high card
    Flush,         // 5 kickers
    FullHouse,     // trips, pair
    FourOAK,       // quads + 1 kicker
    StraightFlush, // high card
}

impl Ranking {
    pub const fn all() -> [Ranking; 9] {
        [
            Ranking::HighCard,
            Ranking::OnePair,
            Ranking::TwoPair,
            Ranking::ThreeOAK,
            Ranking::Straight,
            Ranking::Flush,
            Ranking::FullHouse,
            Ranking::FourOAK,
            Ranking::StraightFlush,
        ]
    }
    /// length of the ordered kicker list for this category
    pub const fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard | Ranking::Flush => 5,
            Ranking::OnePair => 4,
            Ranking::TwoPair | Ranking::ThreeOAK => 3,
            Ranking::FullHouse | Ranking::FourOAK => 2,
            Ranking::Straight | Ranking::StraightFlush => 1,
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::HighCard => write!(f, "HighCard"),
            Ranking::OnePair => write!(f, "OnePair"),
            Ranking::TwoPair => write!(f, "TwoPair"),
            Ranking::ThreeOAK => write!(f, "ThreeOfAKind"),
            Ranking::Straight => write!(f, "Straight"),
            Ranking::Flush => write!(f, "Flush"),
            Ranking::FullHouse => write!(f, "FullHouse"),
            Ranking::FourOAK => write!(f, "FourOfAKind"),
            Ranking::StraightFlush => write!(f, "StraightFlush"),
        }
    }
}
