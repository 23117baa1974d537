use crate::Probability;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Evaluate;
use crate::cards::Hand;
use crate::cards::HandIterator;
use crate::cards::Street;
use rand::Rng;

/// showdown payoff of hero against one opponent: 1 win, 0.5 tie, 0 loss
pub fn showdown(evaluator: &dyn Evaluate, hero: Hand, villain: Hand, board: Hand) -> Probability {
    let ours = evaluator.evaluate(Hand::add(hero, board));
    let theirs = evaluator.evaluate(Hand::add(villain, board));
    match ours.cmp(&theirs) {
        std::cmp::Ordering::Greater => 1.,
        std::cmp::Ordering::Equal => 0.5,
        std::cmp::Ordering::Less => 0.,
    }
}

/// exact river equity against every opponent hole the hero does not block
pub fn river_equity(evaluator: &dyn Evaluate, hole: Hand, board: Hand) -> Probability {
    assert_eq!(board.size(), 5, "river equity needs a full board");
    let ref dead = Hand::add(hole, board);
    let ours = evaluator.evaluate(*dead);
    let (score, count) = HandIterator::from((2, *dead))
        .map(|villain| evaluator.evaluate(Hand::add(villain, board)))
        .map(|theirs| match ours.cmp(&theirs) {
            std::cmp::Ordering::Greater => 1.,
            std::cmp::Ordering::Equal => 0.5,
            std::cmp::Ordering::Less => 0.,
        })
        .fold((0f32, 0usize), |(s, n), x| (s + x, n + 1));
    score / count as Probability
}

/// histogram bin of an equity in [0, 1]
pub fn bin(equity: Probability, bins: usize) -> usize {
    ((equity * bins as Probability) as usize).min(bins - 1)
}

/// Distribution of river equity over the runouts of a partial board.
///
/// Turn boards enumerate all 46 rivers. Earlier boards sample `samples`
/// runouts uniformly from the cards nobody at this seat has seen.
pub fn histogram<R: Rng>(
    evaluator: &dyn Evaluate,
    hole: Hand,
    board: Hand,
    bins: usize,
    samples: usize,
    rng: &mut R,
) -> Vec<Probability> {
    let dead = Hand::add(hole, board);
    let mut counts = vec![0f32; bins];
    match Street::from(board.size()) {
        Street::Rive => counts[bin(river_equity(evaluator, hole, board), bins)] += 1.,
        Street::Turn => {
            for river in HandIterator::from((1, dead)) {
                let board = Hand::add(board, river);
                counts[bin(river_equity(evaluator, hole, board), bins)] += 1.;
            }
        }
        street => {
            let missing = 5 - street.n_public();
            for _ in 0..samples {
                let runout = Deck::without(dead).deal(missing, rng);
                let board = Hand::add(board, runout);
                counts[bin(river_equity(evaluator, hole, board), bins)] += 1.;
            }
        }
    }
    let total = counts.iter().sum::<f32>();
    counts.iter().map(|c| c / total).collect()
}

/// split an observed deal into hole cards and board
pub fn split(observed: &[Card]) -> (Hand, Hand) {
    assert!(observed.len() >= 2, "observed deal without hole cards");
    (Hand::from(&observed[..2]), Hand::from(&observed[2..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Evaluator;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn hand(s: &str) -> Hand {
        Hand::try_from(s).unwrap()
    }

    #[test]
    fn nuts_on_the_river() {
        let e = Evaluator::shared();
        let equity = river_equity(e, hand("As Ks"), hand("Qs Js Ts 2c 3d"));
        assert_eq!(equity, 1.);
    }

    #[test]
    fn board_plays_ties() {
        let e = Evaluator::shared();
        // royal flush on board: everyone chops
        let equity = river_equity(e, hand("2c 3d"), hand("As Ks Qs Js Ts"));
        assert_eq!(equity, 0.5);
    }

    #[test]
    fn showdown_payoffs() {
        let e = Evaluator::shared();
        let board = hand("2c 7d 9h Js Kc");
        assert_eq!(showdown(e, hand("Ah Ad"), hand("3c 4d"), board), 1.);
        assert_eq!(showdown(e, hand("3c 4d"), hand("Ah Ad"), board), 0.);
        assert_eq!(showdown(e, hand("Ah 3s"), hand("As 3h"), board), 0.5);
    }

    #[test]
    fn bins_cover_unit_interval() {
        assert_eq!(bin(0., 10), 0);
        assert_eq!(bin(0.999, 10), 9);
        assert_eq!(bin(1., 10), 9);
        assert_eq!(bin(0.5, 10), 5);
    }

    #[test]
    fn turn_histogram_is_distribution() {
        let e = Evaluator::shared();
        let ref mut rng = SmallRng::seed_from_u64(0);
        let h = histogram(e, hand("Ah Kh"), hand("Qh Jh 2c 3d"), 10, 0, rng);
        assert_eq!(h.len(), 10);
        assert!((h.iter().sum::<f32>() - 1.).abs() < 1e-5);
        // nine hearts and three tens complete the nuts
        assert!(h[9] >= 11. / 46.);
    }

    #[test]
    fn flop_histogram_is_distribution() {
        let e = Evaluator::shared();
        let ref mut rng = SmallRng::seed_from_u64(1);
        let h = histogram(e, hand("7c 2d"), hand("Ks Qs 9h"), 5, 16, rng);
        assert!((h.iter().sum::<f32>() - 1.).abs() < 1e-5);
        assert!(h[0] > h[4]);
    }
}
