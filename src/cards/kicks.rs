use super::rank::Rank;

/// An ordered list of up to five ranks that breaks ties within a
/// [`Ranking`] category, e.g. `[trips, pair]` for a full house.
///
/// Ranks are packed most-significant nibble first, each stored as
/// `rank + 1` so that an absent slot is zero. Comparing the packed
/// integers is the same as comparing the lists lexicographically.
///
/// [`Ranking`]: super::ranking::Ranking
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Kickers(u32);

impl Kickers {
    pub fn len(&self) -> usize {
        Vec::<Rank>::from(*self).len()
    }
    pub fn first(&self) -> Option<Rank> {
        Vec::<Rank>::from(*self).first().copied()
    }
}

/// u32 isomorphism
impl From<Kickers> for u32 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}
impl From<u32> for Kickers {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

/// Vec<Rank> isomorphism, order preserving
impl From<Kickers> for Vec<Rank> {
    fn from(k: Kickers) -> Self {
        (0..5)
            .rev()
            .map(|slot| (k.0 >> (slot * 4)) & 0xF)
            .take_while(|nibble| *nibble > 0)
            .map(|nibble| Rank::from((nibble - 1) as u8))
            .collect()
    }
}
impl From<Vec<Rank>> for Kickers {
    fn from(ranks: Vec<Rank>) -> Self {
        assert!(ranks.len() <= 5, "at most five kickers");
        Self(
            ranks
                .iter()
                .zip((0..5).rev())
                .map(|(rank, slot)| (u8::from(*rank) as u32 + 1) << (slot * 4))
                .fold(0u32, |a, b| a | b),
        )
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in Vec::<Rank>::from(*self) {
            write!(f, "{}", rank)?;
        }
        Ok(())
    }
}
