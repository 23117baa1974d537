use super::remainder::Remainder;
use crate::Chips;

/// Table parameters shared by every node of a hand.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Rules {
    pub players: usize,
    pub stack: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// raise sizes as fractions of the pot after calling, ascending
    pub raise_ratios: Vec<f32>,
    pub remainder: Remainder,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            players: crate::N,
            stack: crate::STACK,
            small_blind: crate::S_BLIND,
            big_blind: crate::B_BLIND,
            raise_ratios: crate::RAISE_RATIOS.to_vec(),
            remainder: Remainder::default(),
        }
    }
}

impl Rules {
    /// chips in play at every node of the hand
    pub fn buy_in(&self) -> Chips {
        self.stack * self.players as Chips
    }
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.players >= 2, "need at least two players");
        anyhow::ensure!(self.players <= 22, "not enough cards for {} players", self.players);
        anyhow::ensure!(self.small_blind > 0, "small blind must be positive");
        anyhow::ensure!(self.big_blind >= self.small_blind, "big blind below small blind");
        anyhow::ensure!(self.stack >= self.big_blind, "stack below big blind");
        anyhow::ensure!(
            self.raise_ratios.windows(2).all(|w| w[0] < w[1]),
            "raise ratios must ascend"
        );
        anyhow::ensure!(
            self.raise_ratios.iter().all(|r| *r > 0.),
            "raise ratios must be positive"
        );
        Ok(())
    }
}
