use crate::Chips;
use crate::Position;
use crate::cards::Card;
use crate::cards::Hand;
use crate::cards::Street;

/// Public information about the betting round in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Community {
    street: Street,
    to_move: Position,
    last_to_act: Option<Position>,
    /// smallest legal raise increment
    min_raise: Chips,
    /// whether raising is allowed; a short all-in closes it
    open: bool,
    /// actions taken this round
    actions: usize,
    /// community cards in the order they were dealt
    board: Vec<Card>,
}

impl Community {
    pub(super) fn new(street: Street, min_raise: Chips) -> Self {
        Self {
            street,
            to_move: 0,
            last_to_act: None,
            min_raise,
            open: true,
            actions: 0,
            board: Vec::with_capacity(5),
        }
    }

    pub fn street(&self) -> Street {
        self.street
    }
    pub fn to_move(&self) -> Position {
        self.to_move
    }
    pub fn last_to_act(&self) -> Option<Position> {
        self.last_to_act
    }
    pub fn min_raise(&self) -> Chips {
        self.min_raise
    }
    pub fn is_open(&self) -> bool {
        self.open
    }
    pub fn actions(&self) -> usize {
        self.actions
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn cards(&self) -> Hand {
        Hand::from(self.board.as_slice())
    }
    /// whether this street's community cards are on the table
    pub fn is_dealt(&self) -> bool {
        self.board.len() == self.street.n_public()
    }

    pub(super) fn reveal(&mut self, cards: Hand) {
        assert!(!self.is_dealt(), "{} already dealt", self.street);
        self.board.extend(cards);
        assert_eq!(self.board.len(), self.street.n_public(), "wrong card count");
    }
    pub(super) fn record(&mut self, actor: Position) {
        self.last_to_act = Some(actor);
        self.actions += 1;
    }
    pub(super) fn seat(&mut self, to_move: Position) {
        self.to_move = to_move;
    }
    pub(super) fn reopen(&mut self, increment: Chips) {
        self.min_raise = increment;
        self.open = true;
    }
    pub(super) fn close(&mut self) {
        self.open = false;
    }
    /// fresh round on the next street, keeping the board dealt so far
    pub(super) fn advance(&self, min_raise: Chips) -> Self {
        Self {
            street: self.street.next(),
            board: self.board.clone(),
            ..Self::new(self.street.next(), min_raise)
        }
    }
}

impl std::fmt::Display for Community {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<8}", self.street)?;
        for card in self.board.iter() {
            write!(f, " {}", card)?;
        }
        Ok(())
    }
}
