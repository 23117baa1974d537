use super::card::Card;
use super::hand::Hand;
use super::street::Street;
use rand::Rng;

/// Deck extends much of Hand functionality, with ability to remove cards
/// from itself. Cards are drawn uniformly without replacement.
#[derive(Debug, Clone, Copy)]
pub struct Deck(Hand);

impl From<Deck> for Hand {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}
impl From<Hand> for Deck {
    fn from(hand: Hand) -> Self {
        Self(hand)
    }
}

impl Deck {
    pub fn new() -> Self {
        Self(Hand::full())
    }
    /// a fresh deck without the given dead cards
    pub fn without(dead: Hand) -> Self {
        Self(dead.complement())
    }
    pub fn size(&self) -> usize {
        self.0.size()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }
    /// remove a specific card from the deck
    pub fn remove(&mut self, card: Card) {
        self.0.remove(card);
    }
    /// remove a random card from the deck
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Card {
        assert!(self.0.size() > 0, "draw from empty deck");
        let i = rng.random_range(0..self.0.size());
        let card = self.0.into_iter().nth(i).expect("index within deck size");
        self.remove(card);
        card
    }
    /// remove n random cards from the deck
    pub fn deal<R: Rng>(&mut self, n: usize, rng: &mut R) -> Hand {
        (0..n)
            .map(|_| self.draw(rng))
            .map(Hand::from)
            .fold(Hand::empty(), Hand::add)
    }
    /// the community cards revealed when entering this street
    pub fn reveal<R: Rng>(&mut self, street: Street, rng: &mut R) -> Hand {
        self.deal(street.n_revealed(), rng)
    }
    /// two hole cards
    pub fn hole<R: Rng>(&mut self, rng: &mut R) -> Hand {
        self.deal(2, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn draws_without_replacement() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let mut deck = Deck::new();
        let drawn = (0..52)
            .map(|_| deck.draw(rng))
            .map(Hand::from)
            .fold(Hand::empty(), Hand::add);
        assert_eq!(drawn, Hand::full());
        assert_eq!(deck.size(), 0);
    }

    #[test]
    fn dead_cards_excluded() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let dead = Hand::try_from("As Ks Qs").unwrap();
        let mut deck = Deck::without(dead);
        let dealt = deck.deal(49, rng);
        assert!(!dealt.intersects(&dead));
        assert_eq!(dealt.size(), 49);
    }

    #[test]
    fn reveal_sizes() {
        let ref mut rng = SmallRng::seed_from_u64(2);
        let mut deck = Deck::new();
        assert_eq!(deck.hole(rng).size(), 2);
        assert_eq!(deck.reveal(Street::Flop, rng).size(), 3);
        assert_eq!(deck.reveal(Street::Turn, rng).size(), 1);
        assert_eq!(deck.reveal(Street::Rive, rng).size(), 1);
        assert_eq!(deck.size(), 52 - 7);
    }
}
