use super::player::Player;
use crate::Probability;
use crate::cards::Street;
use crate::context::TrainingContext;
use crate::gameplay::Action;
use crate::gameplay::State;
use crate::mccfr::InfosetKey;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;
use std::sync::Arc;

/// Plays the trained blueprint.
///
/// Preflop decisions follow the average strategy, the only one
/// accumulated for that round. Later rounds follow regret matching over
/// the current regrets. Infosets never met in training are played
/// uniformly.
pub struct PolicyPlayer {
    context: Arc<TrainingContext>,
    rng: SmallRng,
}

impl PolicyPlayer {
    pub fn new(context: Arc<TrainingContext>, seed: u64) -> Self {
        Self {
            context,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// distribution over `state.legal()` for the seat to move
    pub fn policy(&self, state: &State) -> Vec<Probability> {
        let n = state.legal().len();
        let ref key = InfosetKey::new(state, self.context.encoder());
        match self.context.store().get(key) {
            Some(infoset) if infoset.len() == n => match state.street() {
                Street::Pref => infoset.average(),
                _ => infoset.strategy(),
            },
            Some(_) | None => {
                log::debug!("{:<32}{:<32}", "unseen infoset", key);
                vec![1. / n as Probability; n]
            }
        }
    }
}

impl Player for PolicyPlayer {
    fn next_action(&mut self, state: &State) -> Action {
        let actions = state.legal();
        let policy = self.policy(state);
        let i = WeightedIndex::new(&policy)
            .expect("policy is a distribution")
            .sample(&mut self.rng);
        actions[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstraction::Encoder;
    use crate::cards::Card;
    use crate::cards::Evaluator;
    use crate::cards::Hand;
    use crate::context::Config;
    use crate::gameplay::Node;
    use crate::gameplay::Rules;
    use crate::mccfr::Store;

    struct Blind;
    impl Encoder for Blind {
        fn bucket(&self, _: Hand, board: &[Card]) -> usize {
            board.len()
        }
    }

    fn context() -> Arc<TrainingContext> {
        let config = Config {
            rules: Rules {
                players: 2,
                ..Rules::default()
            },
            ..Config::default()
        };
        Arc::new(TrainingContext::new(
            config,
            Box::new(Evaluator::shared()),
            Box::new(Blind),
            Store::default(),
        ))
    }

    fn opening(rng: &mut SmallRng, context: &TrainingContext) -> State {
        match Node::root(context.rules()) {
            Node::Chance(root) => root.deal(rng).state().clone(),
            _ => panic!("expected a chance root"),
        }
    }

    #[test]
    fn unseen_infosets_are_uniform() {
        let context = context();
        let player = PolicyPlayer::new(context.clone(), 0);
        let ref state = opening(&mut SmallRng::seed_from_u64(0), &context);
        let policy = player.policy(state);
        assert_eq!(policy.len(), state.legal().len());
        assert!(policy.iter().all(|p| (p - policy[0]).abs() < 1e-6));
    }

    #[test]
    fn preflop_follows_the_average() {
        let context = context();
        let ref state = opening(&mut SmallRng::seed_from_u64(1), &context);
        let actions = state.legal();
        let infoset = context.store().obtain(&InfosetKey::from("|0"), actions.len());
        let fold = actions.iter().position(|a| *a == Action::Fold).unwrap();
        infoset.visit(fold);
        infoset.add_regret(0, 1_000., crate::REGRET_MIN);
        let mut player = PolicyPlayer::new(context.clone(), 2);
        for _ in 0..20 {
            assert_eq!(player.next_action(state), Action::Fold);
        }
    }
}
