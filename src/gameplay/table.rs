use super::node::Node;
use super::rules::Rules;
use super::state::State;
use crate::Chips;
use crate::cards::Evaluate;
use crate::players::Player;
use rand::Rng;
use std::sync::Arc;

/// Walks one hand at a time through the state machine, asking each
/// seat's player for its decisions.
pub struct Table<'a> {
    rules: Arc<Rules>,
    players: Vec<Box<dyn Player>>,
    evaluator: &'a dyn Evaluate,
}

impl<'a> Table<'a> {
    pub fn new(rules: Arc<Rules>, players: Vec<Box<dyn Player>>, evaluator: &'a dyn Evaluate) -> Self {
        assert_eq!(players.len(), rules.players, "one player per seat");
        Self {
            rules,
            players,
            evaluator,
        }
    }

    /// plays a full hand and returns the settled terminal state
    pub fn play<R: Rng>(&mut self, rng: &mut R) -> State {
        let mut node = Node::root(self.rules.clone());
        loop {
            node = match node {
                Node::Chance(ref state) => {
                    let next = state.deal(rng);
                    log::debug!("{:<32}{:<32}", "dealt", format!("{}", next.state().community()));
                    next
                }
                Node::Play(ref state) => {
                    let seat = state.to_move();
                    let action = self.players[seat].next_action(state);
                    log::info!("{:<32}{:<32}", format!("seat {}", seat), action);
                    state.apply(action)
                }
                Node::Terminal(ref state) => {
                    let settled = state.settled(self.evaluator);
                    for (i, seat) in settled.seats().iter().enumerate() {
                        log::info!("{:<32}{:<32}", format!("seat {} {}", i, seat.hole()), seat.reward());
                    }
                    return settled;
                }
            };
        }
    }

    /// plays `hands` independent hands and sums every seat's result
    pub fn session<R: Rng>(&mut self, hands: usize, rng: &mut R) -> Vec<Chips> {
        let mut totals = vec![0; self.rules.players];
        for _ in 0..hands {
            let settled = self.play(rng);
            for (total, seat) in totals.iter_mut().zip(settled.seats()) {
                *total += seat.reward();
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Evaluator;
    use crate::gameplay::Action;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// calls or checks whenever it can, otherwise shoves
    struct Station;
    impl Player for Station {
        fn next_action(&mut self, state: &State) -> Action {
            let legal = state.legal();
            legal
                .iter()
                .copied()
                .find(|a| matches!(a, Action::Call(_)))
                .unwrap_or(legal[0])
        }
    }
    /// folds whenever facing a bet
    struct Nit;
    impl Player for Nit {
        fn next_action(&mut self, state: &State) -> Action {
            match state.to_call() {
                0 => Action::Call(0),
                _ => Action::Fold,
            }
        }
    }

    #[test]
    fn stations_reach_showdown() {
        let ref mut rng = SmallRng::seed_from_u64(3);
        let rules = Arc::new(Rules {
            players: 3,
            ..Rules::default()
        });
        let players: Vec<Box<dyn Player>> = vec![Box::new(Station), Box::new(Station), Box::new(Station)];
        let mut table = Table::new(rules, players, Evaluator::shared());
        let settled = table.play(rng);
        assert_eq!(settled.board().len(), 5);
        assert!(settled.seats().iter().all(|s| s.spent() == crate::B_BLIND));
        assert_eq!(settled.seats().iter().map(|s| s.reward()).sum::<Chips>(), 0);
    }

    #[test]
    fn nits_give_up_the_blinds() {
        let ref mut rng = SmallRng::seed_from_u64(4);
        let rules = Arc::new(Rules {
            players: 3,
            ..Rules::default()
        });
        let players: Vec<Box<dyn Player>> = vec![Box::new(Nit), Box::new(Nit), Box::new(Nit)];
        let mut table = Table::new(rules, players, Evaluator::shared());
        let totals = table.session(5, rng);
        assert_eq!(totals, vec![-250, 250, 0]);
    }
}
