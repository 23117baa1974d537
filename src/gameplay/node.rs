use super::action::Action;
use super::rules::Rules;
use super::state::State;
use rand::Rng;
use std::sync::Arc;

/// A state tagged by what happens next.
#[derive(Debug, Clone)]
pub enum Node {
    /// cards are about to be dealt
    Chance(State),
    /// the seat to move chooses among legal actions
    Play(State),
    /// the hand is over and can be settled
    Terminal(State),
}

impl Node {
    pub fn root(rules: Arc<Rules>) -> Self {
        State::root(rules)
    }
    pub fn state(&self) -> &State {
        match self {
            Self::Chance(state) | Self::Play(state) | Self::Terminal(state) => state,
        }
    }
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }
    /// legal actions at a decision, nothing elsewhere
    pub fn actions(&self) -> Vec<Action> {
        match self {
            Self::Play(state) => state.legal(),
            _ => Vec::new(),
        }
    }
    /// The single sampled deal of a chance node, one child per legal
    /// action at a decision, nothing at a terminal.
    pub fn children<R: Rng>(&self, rng: &mut R) -> Vec<Node> {
        match self {
            Self::Chance(state) => vec![state.deal(rng)],
            Self::Play(state) => state.legal().into_iter().map(|a| state.apply(a)).collect(),
            Self::Terminal(_) => Vec::new(),
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Chance(state) => write!(f, "chance {} [{}]", state.street(), state.history()),
            Self::Play(state) => write!(
                f,
                "seat {} to act on {} [{}]",
                state.to_move(),
                state.street(),
                state.history()
            ),
            Self::Terminal(state) => write!(f, "terminal pot {} [{}]", state.pot(), state.history()),
        }
    }
}
