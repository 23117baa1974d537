/// Betting round of a hand.
///
/// The variant names the cards already revealed: on the `Flop` three
/// community cards are visible, and so on.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Street {
    Pref = 0isize,
    Flop = 1isize,
    Turn = 2isize,
    Rive = 3isize,
}

impl Street {
    pub const fn all() -> &'static [Self] {
        &[Self::Pref, Self::Flop, Self::Turn, Self::Rive]
    }
    pub const fn next(&self) -> Self {
        match self {
            Self::Pref => Self::Flop,
            Self::Flop => Self::Turn,
            Self::Turn => Self::Rive,
            Self::Rive => panic!("terminal"),
        }
    }
    pub const fn prev(&self) -> Self {
        match self {
            Self::Pref => Self::Pref,
            Self::Flop => Self::Pref,
            Self::Turn => Self::Flop,
            Self::Rive => Self::Turn,
        }
    }
    pub const fn is_last(&self) -> bool {
        matches!(self, Self::Rive)
    }
    /// community cards visible on this street
    pub const fn n_public(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::Rive => 5,
        }
    }
    /// hole plus community cards visible on this street
    pub const fn n_observed(&self) -> usize {
        self.n_public() + 2
    }
    /// cards dealt when entering this street
    pub const fn n_revealed(&self) -> usize {
        match self {
            Self::Pref => 2,
            Self::Flop => 3,
            Self::Turn => 1,
            Self::Rive => 1,
        }
    }
    /// canonical hole + board classes up to suit isomorphism
    pub const fn n_isomorphisms(&self) -> usize {
        match self {
            Self::Pref => 0_________169,
            Self::Flop => 0___1_286_792,
            Self::Turn => 0__13_960_050,
            Self::Rive => 0_123_156_254,
        }
    }
    /// round layout consumed by the hand indexer: the hole cards,
    /// then the whole board as a single round, so the order in which
    /// community cards arrived does not split classes
    pub fn rounds(&self) -> Vec<usize> {
        match self {
            Self::Pref => vec![2],
            street => vec![2, street.n_public()],
        }
    }
    /// index of this street's last round in [`Self::rounds`]
    pub fn round(&self) -> usize {
        self.rounds().len() - 1
    }
}

impl From<usize> for Street {
    fn from(n: usize) -> Self {
        match n {
            0 => Self::Pref,
            3 => Self::Flop,
            4 => Self::Turn,
            5 => Self::Rive,
            _ => panic!("no street with {} community cards", n),
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Pref => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::Rive => write!(f, "river"),
        }
    }
}

impl TryFrom<&str> for Street {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "preflop" | "pref" | "p" => Ok(Self::Pref),
            "flop" | "f" => Ok(Self::Flop),
            "turn" | "t" => Ok(Self::Turn),
            "river" | "rive" | "r" => Ok(Self::Rive),
            _ => Err(format!("invalid street: {}", s)),
        }
    }
}

impl crate::Arbitrary for Street {
    fn random() -> Self {
        match rand::random_range(0..4) {
            0 => Self::Pref,
            1 => Self::Flop,
            2 => Self::Turn,
            _ => Self::Rive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_layout() {
        assert_eq!(Street::Pref.rounds(), vec![2]);
        assert_eq!(Street::Flop.rounds(), vec![2, 3]);
        assert_eq!(Street::Turn.rounds(), vec![2, 4]);
        assert_eq!(Street::Rive.rounds(), vec![2, 5]);
        assert_eq!(Street::Pref.round(), 0);
        assert_eq!(Street::Rive.round(), 1);
    }

    #[test]
    fn observed_counts() {
        for street in Street::all() {
            assert_eq!(street.rounds().iter().sum::<usize>(), street.n_observed());
            assert_eq!(Street::from(street.n_public()), *street);
        }
    }

    #[test]
    fn display_parse() {
        for street in Street::all() {
            assert_eq!(Street::try_from(street.to_string().as_str()), Ok(*street));
        }
    }
}
