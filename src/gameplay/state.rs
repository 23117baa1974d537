use super::action::Action;
use super::community::Community;
use super::node::Node;
use super::rules::Rules;
use super::seat::Seat;
use super::showdown::Entry;
use super::showdown::Showdown;
use crate::Chips;
use crate::Position;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Evaluate;
use crate::cards::Hand;
use crate::cards::Street;
use rand::Rng;
use std::sync::Arc;

/// Everything known about a hand between two events.
///
/// States are values: every transition clones the parent and returns the
/// child wrapped in the [`Node`] variant that says who moves next. Nothing
/// is cached on a state, so a traversal can rebuild any subtree on demand.
///
/// Seat 0 posts the small blind and seat 1 the big blind, which puts the
/// dealer in the last seat. Preflop action opens at seat `2 % n`, later
/// streets at the first seat still able to act.
#[derive(Debug, Clone)]
pub struct State {
    rules: Arc<Rules>,
    community: Community,
    seats: Vec<Seat>,
    /// serialized betting so far, streets separated by '/'
    history: String,
}

impl State {
    /// blinds posted, no cards dealt
    pub fn root(rules: Arc<Rules>) -> Node {
        let mut seats = vec![Seat::from(rules.stack); rules.players];
        let sb = rules.small_blind.min(seats[0].stack());
        let bb = rules.big_blind.min(seats[1].stack());
        seats[0].put(sb);
        seats[1].put(bb);
        let state = Self {
            community: Community::new(Street::Pref, rules.big_blind),
            rules,
            seats,
            history: String::new(),
        };
        state.conserve();
        Node::Chance(state)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }
    pub fn community(&self) -> &Community {
        &self.community
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn seat(&self, position: Position) -> &Seat {
        &self.seats[position]
    }
    pub fn history(&self) -> &str {
        &self.history
    }
    pub fn street(&self) -> Street {
        self.community.street()
    }
    pub fn board(&self) -> &[Card] {
        self.community.board()
    }
    pub fn to_move(&self) -> Position {
        self.community.to_move()
    }
    pub fn actor(&self) -> &Seat {
        &self.seats[self.to_move()]
    }
    /// chips committed by everyone this hand
    pub fn pot(&self) -> Chips {
        self.seats.iter().map(Seat::spent).sum()
    }
    pub fn max_bet(&self) -> Chips {
        self.seats.iter().map(Seat::bet).max().unwrap_or(0)
    }
    pub fn to_call(&self) -> Chips {
        self.max_bet() - self.actor().bet()
    }
    pub fn n_alive(&self) -> usize {
        self.seats.iter().filter(|s| s.is_alive()).count()
    }
    /// every card held by a seat or on the board
    pub fn dead(&self) -> Hand {
        self.seats
            .iter()
            .map(Seat::hole)
            .fold(self.community.cards(), Hand::add)
    }
    fn is_dealt(&self) -> bool {
        match self.street() {
            Street::Pref => self.seats.iter().all(|s| s.hole().size() == 2),
            _ => self.community.is_dealt(),
        }
    }

    /// Legal actions of the seat to move, in child order: pot-fraction
    /// raises ascending, all in, fold, call.
    pub fn legal(&self) -> Vec<Action> {
        let actor = self.actor();
        assert!(actor.can_act(), "seat {} cannot act", self.to_move());
        let stack = actor.stack();
        let call = self.to_call();
        let mut actions = Vec::with_capacity(self.rules.raise_ratios.len() + 3);
        if self.community.is_open() {
            let pot = self.pot() + call;
            for ratio in self.rules.raise_ratios.iter() {
                let amount = call + (ratio * pot as f32) as Chips;
                if amount - call < self.community.min_raise() || amount >= stack {
                    continue;
                }
                if actions.last() == Some(&Action::Raise(amount)) {
                    continue;
                }
                actions.push(Action::Raise(amount));
            }
        }
        if stack > 0 {
            actions.push(Action::AllIn(stack));
        }
        if call > 0 {
            actions.push(Action::Fold);
        }
        if call < stack {
            actions.push(Action::Call(call));
        }
        actions
    }

    /// Child after the seat to move takes `action`.
    ///
    /// A raise, or an all in whose raise part reaches the minimum raise,
    /// reopens the betting for everyone else. A shorter all in leaves it
    /// closed: seats that already acted may call the difference but no
    /// further pot-fraction raises are offered this round.
    pub fn apply(&self, action: Action) -> Node {
        assert!(self.legal().contains(&action), "illegal action {}", action);
        let actor = self.to_move();
        let before = self.max_bet();
        let mut child = self.clone();
        child.seats[actor].act(action);
        child.community.record(actor);
        child.history.push_str(&action.token());
        if action.is_aggressive() {
            let increment = child.seats[actor].bet() - before;
            if increment >= child.community.min_raise() {
                child.community.reopen(increment);
                for (i, seat) in child.seats.iter_mut().enumerate() {
                    if i != actor {
                        seat.reopen();
                    }
                }
            } else if increment > 0 {
                child.community.close();
            }
        }
        child.conserve();
        if child.n_alive() == 1 {
            return Node::Terminal(child);
        }
        let next = (actor + 1) % child.seats.len();
        child.proceed(next)
    }

    /// Deals the cards of this chance node.
    pub fn deal<R: Rng>(&self, rng: &mut R) -> Node {
        assert!(!self.is_dealt(), "cards already dealt on {}", self.street());
        let mut child = self.clone();
        let mut deck = Deck::without(self.dead());
        match self.street() {
            Street::Pref => child.seats.iter_mut().for_each(|s| s.deal(deck.hole(rng))),
            street => child.community.reveal(deck.reveal(street, rng)),
        }
        child.conserve();
        assert!(child.n_alive() >= 2, "fewer than two players in hand");
        let start = match child.street() {
            Street::Pref => 2 % child.seats.len(),
            _ => 0,
        };
        child.proceed(start)
    }

    /// Net chips won or lost by every seat at a finished hand.
    ///
    /// Hands are only compared when more than one seat is alive; a lone
    /// survivor takes the pot without a showdown.
    pub fn settle(&self, evaluator: &dyn Evaluate) -> Vec<Chips> {
        let contested = self.n_alive() > 1;
        assert!(
            !contested || self.community.board().len() == 5,
            "showdown before the river"
        );
        let entries = self
            .seats
            .iter()
            .map(|seat| Entry {
                spent: seat.spent(),
                alive: seat.is_alive(),
                strength: match contested && seat.is_alive() {
                    true => evaluator.evaluate(Hand::add(seat.hole(), self.community.cards())),
                    false => 0,
                },
            })
            .collect::<Vec<_>>();
        Showdown::from((entries, self.rules.remainder)).rewards()
    }
    /// the same state with every seat's reward filled in
    pub fn settled(&self, evaluator: &dyn Evaluate) -> Self {
        let mut state = self.clone();
        for (seat, reward) in state.seats.iter_mut().zip(self.settle(evaluator)) {
            seat.settle(reward);
        }
        state
    }

    /// next seat owing an action, searching from `from` in seat order
    fn pending(&self, from: Position) -> Option<Position> {
        let n = self.seats.len();
        let max = self.max_bet();
        let actors = self.seats.iter().filter(|s| s.can_act()).count();
        (0..n).map(|k| (from + k) % n).find(|i| {
            let seat = &self.seats[*i];
            seat.can_act() && (seat.bet() < max || (!seat.has_acted() && actors > 1))
        })
    }
    /// hand the move to the next seat owing an action, or close the round
    fn proceed(mut self, from: Position) -> Node {
        match self.pending(from) {
            Some(actor) => {
                self.community.seat(actor);
                Node::Play(self)
            }
            None if self.street().is_last() => Node::Terminal(self),
            None => {
                self.community = self.community.advance(self.rules.big_blind);
                self.seats.iter_mut().for_each(Seat::next_round);
                self.history.push('/');
                Node::Chance(self)
            }
        }
    }
    /// chips on the table never change during a hand
    fn conserve(&self) {
        let total = self.seats.iter().map(|s| s.stack() + s.spent()).sum::<Chips>();
        assert_eq!(total, self.rules.buy_in(), "chip conservation violated");
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{} pot {}", self.community, self.pot())?;
        for (i, seat) in self.seats.iter().enumerate() {
            writeln!(f, "{} {}", i, seat)?;
        }
        write!(f, "{}", self.history)
    }
}
