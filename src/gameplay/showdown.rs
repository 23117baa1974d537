use super::remainder::Remainder;
use crate::Chips;
use crate::cards::Ordinal;

/// One seat's stake in the pot at the end of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub spent: Chips,
    pub alive: bool,
    /// hand strength; ignored for folded seats
    pub strength: Ordinal,
}

/// Splits the pot among live seats, layer by layer of contribution.
///
/// Every distinct amount committed by a live seat closes a side pot. The
/// layer between two such amounts is paid for by every seat that reached
/// it, folded or not, and is won by the strongest live seats that reached
/// it. With equal contributions this is a single pot split among the best
/// hands.
///
/// Entries are in seat order starting left of the dealer, which decides
/// who receives odd chips under [`Remainder::Leftmost`].
pub struct Showdown {
    entries: Vec<Entry>,
    remainder: Remainder,
}

impl From<(Vec<Entry>, Remainder)> for Showdown {
    fn from((entries, remainder): (Vec<Entry>, Remainder)) -> Self {
        assert!(entries.iter().any(|e| e.alive), "no players in hand");
        Self { entries, remainder }
    }
}

impl Showdown {
    pub fn pot(&self) -> Chips {
        self.entries.iter().map(|e| e.spent).sum()
    }

    /// chips won by each seat, before subtracting what it put in
    pub fn winnings(&self) -> Vec<Chips> {
        let mut winnings = vec![0; self.entries.len()];
        let mut levels = self
            .entries
            .iter()
            .filter(|e| e.alive)
            .map(|e| e.spent)
            .collect::<Vec<Chips>>();
        levels.sort_unstable();
        levels.dedup();
        // uncalled chips above the deepest live stake go to the top layer
        let top = self.entries.iter().map(|e| e.spent).max().unwrap_or(0);
        if let Some(last) = levels.last_mut() {
            *last = top;
        }
        let mut prev = 0;
        for level in levels {
            let layer = self.layer(prev, level);
            let winners = self.winners(prev);
            self.distribute(layer, &winners, &mut winnings);
            prev = level;
        }
        winnings
    }

    /// net chip change of each seat
    pub fn rewards(&self) -> Vec<Chips> {
        self.winnings()
            .into_iter()
            .zip(self.entries.iter())
            .map(|(won, e)| won - e.spent)
            .collect()
    }

    fn layer(&self, prev: Chips, next: Chips) -> Chips {
        self.entries
            .iter()
            .map(|e| e.spent.min(next) - e.spent.min(prev))
            .sum()
    }
    /// strongest live seats that contributed above `prev`
    fn winners(&self, prev: Chips) -> Vec<usize> {
        let eligible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive)
            .filter(|(_, e)| e.spent > prev)
            .collect::<Vec<_>>();
        // a lone contender takes the layer without comparing hands
        if eligible.len() == 1 {
            return vec![eligible[0].0];
        }
        let best = eligible.iter().map(|(_, e)| e.strength).max().expect("eligible seats");
        eligible
            .into_iter()
            .filter(|(_, e)| e.strength == best)
            .map(|(i, _)| i)
            .collect()
    }
    fn distribute(&self, layer: Chips, winners: &[usize], winnings: &mut [Chips]) {
        let n = winners.len() as Chips;
        let share = layer / n;
        let odd = layer % n;
        for (k, i) in winners.iter().enumerate() {
            winnings[*i] += share;
            if self.remainder == Remainder::Leftmost && (k as Chips) < odd {
                winnings[*i] += 1;
            }
        }
    }
}
