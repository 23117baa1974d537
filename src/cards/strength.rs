use super::card::Card;
use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;

/// rank-prime products of the ten straights, with the straight's high card.
/// the wheel A2345 plays as a five-high straight.
const STRAIGHTS: [(u32, Rank); 10] = [
    (8_610, Rank::Five),
    (2_310, Rank::Six),
    (15_015, Rank::Seven),
    (85_085, Rank::Eight),
    (323_323, Rank::Nine),
    (1_062_347, Rank::Ten),
    (2_800_733, Rank::Jack),
    (6_678_671, Rank::Queen),
    (14_535_931, Rank::King),
    (31_367_009, Rank::Ace),
];

/// suit-prime products of the four flushes.
const FLUSHES: [u32; 4] = [32, 243, 3_125, 16_807];

/// A 5-card hand's strength.
///
/// Compared lexicographically: category first, then the ordered kicker
/// list. Equal strengths are exact ties.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    value: Ranking,
    kicks: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.value
    }
    pub fn kickers(&self) -> Kickers {
        self.kicks
    }

    fn straight(product: u32) -> Option<Rank> {
        STRAIGHTS
            .iter()
            .find(|(p, _)| *p == product)
            .map(|(_, high)| *high)
    }
    fn flush(product: u32) -> bool {
        FLUSHES.contains(&product)
    }
    /// ranks grouped by multiplicity, largest group first,
    /// higher rank first within equal multiplicity
    fn groups(cards: &[Card]) -> Vec<(usize, Rank)> {
        let mut groups = Rank::all()
            .into_iter()
            .map(|r| (cards.iter().filter(|c| c.rank() == r).count(), r))
            .filter(|(n, _)| *n > 0)
            .collect::<Vec<_>>();
        groups.sort_by(|a, b| b.cmp(a));
        groups
    }
    fn classify(cards: &[Card]) -> Self {
        let rank_product = cards.iter().map(|c| c.rank().prime()).product::<u32>();
        let suit_product = cards.iter().map(|c| c.suit().prime()).product::<u32>();
        let straight = Self::straight(rank_product);
        let flush = Self::flush(suit_product);
        let groups = Self::groups(cards);
        let shape = groups.iter().map(|(n, _)| *n).collect::<Vec<_>>();
        let ranks = groups.iter().map(|(_, r)| *r).collect::<Vec<_>>();
        let (value, kicks) = match (straight, flush, shape.as_slice()) {
            (Some(high), true, _) => (Ranking::StraightFlush, vec![high]),
            (_, _, [4, 1]) => (Ranking::FourOAK, ranks),
            (_, _, [3, 2]) => (Ranking::FullHouse, ranks),
            (_, true, _) => (Ranking::Flush, ranks),
            (Some(high), false, _) => (Ranking::Straight, vec![high]),
            (_, _, [3, 1, 1]) => (Ranking::ThreeOAK, ranks),
            (_, _, [2, 2, 1]) => (Ranking::TwoPair, ranks),
            (_, _, [2, 1, 1, 1]) => (Ranking::OnePair, ranks),
            (_, _, [1, 1, 1, 1, 1]) => (Ranking::HighCard, ranks),
            _ => unreachable!("five cards always form a category"),
        };
        Self::from((value, Kickers::from(kicks)))
    }
}

/// only 5-card hands have a strength of their own.
/// larger hands go through the Evaluator, which takes the best subset.
impl TryFrom<Hand> for Strength {
    type Error = anyhow::Error;
    fn try_from(hand: Hand) -> Result<Self, Self::Error> {
        match hand.size() {
            5 => {
                let mut cards = hand.cards();
                cards.sort_by(|a, b| b.cmp(a));
                Ok(Self::classify(&cards))
            }
            n => Err(anyhow::anyhow!("strength requires 5 cards, got {}", n)),
        }
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((value, kicks): (Ranking, Kickers)) -> Self {
        Self { value, kicks }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<14}{}", self.value, self.kicks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strength(s: &str) -> Strength {
        Strength::try_from(Hand::try_from(s).unwrap()).unwrap()
    }
    fn kicks(ranks: Vec<Rank>) -> Kickers {
        Kickers::from(ranks)
    }

    #[test]
    fn straight_products_match_primes() {
        let primes = Rank::all().map(|r| r.prime());
        for (i, (product, high)) in STRAIGHTS.iter().enumerate().skip(1) {
            assert_eq!(*product, primes[i - 1..i + 4].iter().product::<u32>());
            assert_eq!(*high, Rank::from((i + 3) as u8));
        }
        assert_eq!(STRAIGHTS[0].0, Rank::Ace.prime() * primes[0..4].iter().product::<u32>());
    }

    #[test]
    fn flush_products_match_primes() {
        for (suit, product) in super::super::suit::Suit::all().iter().zip(FLUSHES) {
            assert_eq!(suit.prime().pow(5), product);
        }
    }

    #[test]
    fn rejects_wrong_size() {
        assert!(Strength::try_from(Hand::try_from("As Kh Qd Jc").unwrap()).is_err());
        assert!(Strength::try_from(Hand::try_from("As Kh Qd Jc 9s 8s").unwrap()).is_err());
    }

    #[rustfmt::skip]
    #[test]
    fn high_card() {
        let s = strength("As Kh Qd Jc 9s");
        assert_eq!(s, Strength::from((Ranking::HighCard, kicks(vec![Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Nine]))));
    }

    #[rustfmt::skip]
    #[test]
    fn one_pair() {
        let s = strength("As Ah Kd Qc Js");
        assert_eq!(s, Strength::from((Ranking::OnePair, kicks(vec![Rank::Ace, Rank::King, Rank::Queen, Rank::Jack]))));
    }

    #[rustfmt::skip]
    #[test]
    fn two_pair() {
        let s = strength("Ks Kh Ad Ac Qs");
        assert_eq!(s, Strength::from((Ranking::TwoPair, kicks(vec![Rank::Ace, Rank::King, Rank::Queen]))));
    }

    #[rustfmt::skip]
    #[test]
    fn three_oak() {
        let s = strength("As Ah Ad Kc Qs");
        assert_eq!(s, Strength::from((Ranking::ThreeOAK, kicks(vec![Rank::Ace, Rank::King, Rank::Queen]))));
    }

    #[test]
    fn straight() {
        let s = strength("Ts 9h 8d 7c 6s");
        assert_eq!(s, Strength::from((Ranking::Straight, kicks(vec![Rank::Ten]))));
    }

    #[test]
    fn broadway_straight() {
        let s = strength("As Kh Qd Jc Ts");
        assert_eq!(s, Strength::from((Ranking::Straight, kicks(vec![Rank::Ace]))));
    }

    #[test]
    fn wheel_straight() {
        let s = strength("5s 4h 3d 2c As");
        assert_eq!(s, Strength::from((Ranking::Straight, kicks(vec![Rank::Five]))));
        assert!(s < strength("6s 5h 4d 3c 2s"));
        assert!(s > strength("As Ah Ad Kc Qs"));
        assert!(s > strength("As Kh Qd Jc 9s"));
    }

    #[rustfmt::skip]
    #[test]
    fn flush() {
        let s = strength("As Ks Qs Js 9s");
        assert_eq!(s, Strength::from((Ranking::Flush, kicks(vec![Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Nine]))));
    }

    #[test]
    fn full_house() {
        let s = strength("Ks Kh Kd As Ah");
        assert_eq!(s, Strength::from((Ranking::FullHouse, kicks(vec![Rank::King, Rank::Ace]))));
        assert!(s < strength("As Ah Ad Ks Kh"));
    }

    #[test]
    fn four_oak() {
        let s = strength("As Ah Ad Ac Ks");
        assert_eq!(s, Strength::from((Ranking::FourOAK, kicks(vec![Rank::Ace, Rank::King]))));
    }

    #[test]
    fn straight_flush() {
        let s = strength("Ts 9s 8s 7s 6s");
        assert_eq!(s, Strength::from((Ranking::StraightFlush, kicks(vec![Rank::Ten]))));
    }

    #[test]
    fn wheel_straight_flush() {
        let s = strength("5s 4s 3s 2s As");
        assert_eq!(s, Strength::from((Ranking::StraightFlush, kicks(vec![Rank::Five]))));
        assert!(s > strength("As Ah Ad Ac Ks"));
    }

    #[test]
    fn category_boundaries() {
        let ordered = [
            "As Kh Qd Jc 9s",
            "2s 2h 3d 4c 5d",
            "2s 2h 3d 3c 4s",
            "2s 2h 2d 3c 4s",
            "5s 4h 3d 2c As",
            "2s 3s 4s 5s 7s",
            "2s 2h 2d 3c 3s",
            "2s 2h 2d 2c 3s",
            "5s 4s 3s 2s As",
        ];
        let strengths = ordered.map(strength);
        assert!(strengths.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn kicker_tiebreaks() {
        assert!(strength("As Ah Kd Qc Js") > strength("As Ah Kd Qc Ts"));
        assert!(strength("Ks Kh Qd Qc As") > strength("Ks Kh Qd Qc Js"));
        assert!(strength("As Ah Ad 2c 3s") < strength("As Ah Ad 2c 4s"));
        assert!(strength("As Ks Qs Js 9s") > strength("As Ks Qs Js 8s"));
        assert_eq!(strength("As Kh Qd Jc 9s"), strength("Ac Kd Qh Js 9c"));
    }
}
