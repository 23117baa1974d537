use super::action::Action;
use crate::Chips;
use crate::cards::Hand;

/// One player's view of the chips and cards in a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    stack: Chips,
    /// committed this betting round
    bet: Chips,
    /// committed this hand, across every round
    spent: Chips,
    reward: Chips,
    alive: bool,
    /// acted since the betting was last reopened
    acted: bool,
    hole: Hand,
    last: Option<Action>,
}

impl From<Chips> for Seat {
    fn from(stack: Chips) -> Self {
        Self {
            stack,
            bet: 0,
            spent: 0,
            reward: 0,
            alive: true,
            acted: false,
            hole: Hand::empty(),
            last: None,
        }
    }
}

impl Seat {
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn bet(&self) -> Chips {
        self.bet
    }
    pub fn spent(&self) -> Chips {
        self.spent
    }
    pub fn reward(&self) -> Chips {
        self.reward
    }
    pub fn hole(&self) -> Hand {
        self.hole
    }
    pub fn last(&self) -> Option<Action> {
        self.last
    }
    pub fn is_alive(&self) -> bool {
        self.alive
    }
    pub fn is_all_in(&self) -> bool {
        self.alive && self.stack == 0
    }
    /// still in the hand with chips behind
    pub fn can_act(&self) -> bool {
        self.alive && self.stack > 0
    }
    pub fn has_acted(&self) -> bool {
        self.acted
    }

    pub(super) fn put(&mut self, chips: Chips) {
        assert!(chips >= 0, "negative bet");
        assert!(chips <= self.stack, "bet beyond stack");
        self.stack -= chips;
        self.bet += chips;
        self.spent += chips;
    }
    pub(super) fn act(&mut self, action: Action) {
        if let Action::Fold = action {
            self.alive = false;
        }
        self.put(action.chips());
        self.acted = true;
        self.last = Some(action);
    }
    pub(super) fn reopen(&mut self) {
        self.acted = false;
    }
    pub(super) fn next_round(&mut self) {
        self.bet = 0;
        self.acted = false;
    }
    pub(super) fn deal(&mut self, hole: Hand) {
        assert_eq!(hole.size(), 2, "two hole cards");
        self.hole = hole;
    }
    pub(super) fn settle(&mut self, reward: Chips) {
        self.reward = reward;
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let status = match (self.alive, self.stack) {
            (false, _) => "F",
            (true, 0) => "S",
            (true, _) => "P",
        };
        write!(f, "{} {:<6} {:>7} {:>6}", status, self.hole, self.stack, self.spent)
    }
}
