use crate::gameplay::Action;
use crate::gameplay::State;

/// Chooses an action for the seat to move.
///
/// Implementors only ever see states where `state.to_move()` is their
/// seat, and must answer with one of `state.legal()`.
pub trait Player {
    fn next_action(&mut self, state: &State) -> Action;
}
