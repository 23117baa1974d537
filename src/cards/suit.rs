/// Card suit: clubs, diamonds, hearts, spades.
///
/// Suits are strategically interchangeable: only the pattern of suit
/// matches matters. The ordering (C < D < H < S) is arbitrary but
/// consistent, which the hand indexer relies on when it relabels suits.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    #[default]
    C = 0,
    D = 1,
    H = 2,
    S = 3,
}

impl Suit {
    /// All four suits in canonical order.
    pub const fn all() -> [Suit; 4] {
        [Suit::C, Suit::D, Suit::H, Suit::S]
    }
    /// The prime assigned to this suit for product-based flush detection.
    pub const fn prime(&self) -> u32 {
        match self {
            Suit::C => 2,
            Suit::D => 3,
            Suit::H => 5,
            Suit::S => 7,
        }
    }
}

/// u8 isomorphism
impl From<u8> for Suit {
    fn from(n: u8) -> Suit {
        match n {
            0 => Suit::C,
            1 => Suit::D,
            2 => Suit::H,
            3 => Suit::S,
            _ => unreachable!("invalid suit"),
        }
    }
}
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

/// u64 representation
/// every card bit of this suit in a Hand
impl From<Suit> for u64 {
    fn from(s: Suit) -> u64 {
        match s {
            Suit::C => 0x0001111111111111,
            Suit::D => 0x0002222222222222,
            Suit::H => 0x0004444444444444,
            Suit::S => 0x0008888888888888,
        }
    }
}

/// str isomorphism
impl TryFrom<&str> for Suit {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "c" | "♣" => Ok(Suit::C),
            "d" | "♦" => Ok(Suit::D),
            "h" | "♥" => Ok(Suit::H),
            "s" | "♠" => Ok(Suit::S),
            _ => Err(format!("invalid suit str: {}", s)),
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Suit::C => write!(f, "c"),
            Suit::D => write!(f, "d"),
            Suit::H => write!(f, "h"),
            Suit::S => write!(f, "s"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        for suit in Suit::all() {
            assert!(suit == Suit::from(u8::from(suit)));
        }
    }

    #[test]
    fn masks_partition_deck() {
        let union = Suit::all()
            .iter()
            .map(|s| u64::from(*s))
            .fold(0u64, |a, b| a | b);
        let total = Suit::all()
            .iter()
            .map(|s| u64::from(*s).count_ones())
            .sum::<u32>();
        assert_eq!(union, (1 << 52) - 1);
        assert_eq!(total, 52);
    }

    #[test]
    fn parse_str() {
        assert_eq!(Suit::try_from("S"), Ok(Suit::S));
        assert_eq!(Suit::try_from("♥"), Ok(Suit::H));
        assert!(Suit::try_from("x").is_err());
    }
}
