use super::hand::Hand;
use super::strength::Strength;
use crate::indexing::choose;
use crate::save::Blob;
use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use rayon::prelude::*;
use std::io::Read;
use std::io::Write;
use std::path::Path;

/// Dense rank of a hand's best 5-card strength. Higher is better and
/// equal ordinals are exact ties. Zero is never produced.
pub type Ordinal = u16;

/// Anything that can score a 5 to 7 card hand for showdown.
pub trait Evaluate: Send + Sync {
    fn evaluate(&self, hand: Hand) -> Ordinal;
}

impl<E: Evaluate + ?Sized> Evaluate for &E {
    fn evaluate(&self, hand: Hand) -> Ordinal {
        (**self).evaluate(hand)
    }
}

/// Table lookup evaluator.
///
/// One table per hand size, indexed by the colexicographic rank of the
/// hand's cards. The 5-card table collapses every [`Strength`] to its
/// ordinal among the 7,462 distinct strengths; each larger table holds
/// the best of its one-card-smaller subsets. Hands bigger than the largest
/// table fall back to the best subset that does have a table.
pub struct Evaluator {
    tables: Vec<Table>,
}

impl Evaluator {
    /// build tables for 5 through `max` cards in memory
    pub fn build(max: usize) -> Self {
        assert!((5..=7).contains(&max), "tables cover 5 to 7 cards");
        let mut tables = vec![Table::five()];
        for _ in 6..=max {
            tables.push(Table::extend(&tables[tables.len() - 1]));
        }
        Self { tables }
    }

    /// load every table up to `max` cards from `dir`, building and saving
    /// whichever are missing along with everything built from them
    pub fn learn(dir: &Path, max: usize) -> anyhow::Result<Self> {
        assert!((5..=7).contains(&max), "tables cover 5 to 7 cards");
        let mut tables = Vec::<Table>::new();
        let mut stale = false;
        for n in 5..=max {
            let ref path = Table::path(dir, n);
            let table = match (stale, Table::done(path)) {
                (false, true) => Table::load(path)?,
                _ => {
                    stale = true;
                    let table = match tables.last() {
                        None => Table::five(),
                        Some(previous) => Table::extend(previous),
                    };
                    table.save(path)?;
                    table
                }
            };
            anyhow::ensure!(table.cards == n, "table {} holds {} card hands", n, table.cards);
            tables.push(table);
        }
        Ok(Self { tables })
    }

    /// largest tabulated hand size
    pub fn max(&self) -> usize {
        self.tables.len() + 4
    }

    /// 5-card tables built once per test binary
    #[cfg(test)]
    pub fn shared() -> &'static Self {
        static EVALUATOR: std::sync::OnceLock<Evaluator> = std::sync::OnceLock::new();
        EVALUATOR.get_or_init(|| Self::build(5))
    }
}

impl Evaluate for Evaluator {
    fn evaluate(&self, hand: Hand) -> Ordinal {
        let n = hand.size();
        assert!(n >= 5, "cannot evaluate {} cards", n);
        match self.tables.get(n - 5) {
            Some(table) => table.get(hand),
            None => hand
                .map(|card| {
                    let mut subset = hand;
                    subset.remove(card);
                    self.evaluate(subset)
                })
                .max()
                .unwrap_or_default(),
        }
    }
}

/// Ordinals of every hand of one size.
struct Table {
    cards: usize,
    values: Vec<Ordinal>,
}

impl Table {
    fn path(dir: &Path, n: usize) -> std::path::PathBuf {
        dir.join(format!("{}.{}.bin", Self::name(), n))
    }

    /// colexicographic rank of a hand among hands of its size
    fn colex(hand: Hand) -> usize {
        hand.enumerate()
            .map(|(i, card)| choose(u8::from(card) as usize, i + 1) as usize)
            .sum()
    }

    /// the hand at this colexicographic rank
    fn uncolex(index: usize, n: usize) -> Hand {
        let mut index = index as u64;
        let mut hand = Hand::empty();
        let mut bound = 52;
        for i in (1..=n).rev() {
            let card = (i - 1..bound)
                .rev()
                .find(|c| choose(*c, i) <= index)
                .expect("rank within table");
            index -= choose(card, i);
            hand.insert(super::card::Card::from(card as u8));
            bound = card;
        }
        hand
    }

    fn get(&self, hand: Hand) -> Ordinal {
        self.values[Self::colex(hand)]
    }

    fn five() -> Self {
        log::info!("{:<32}{:<32}", "building evaluator", "5 cards");
        let size = choose(52, 5) as usize;
        let strengths = (0..size)
            .into_par_iter()
            .map(|i| Self::uncolex(i, 5))
            .map(|hand| Strength::try_from(hand).expect("five cards"))
            .collect::<Vec<_>>();
        let mut distinct = strengths.clone();
        distinct.par_sort_unstable();
        distinct.dedup();
        log::info!("{:<32}{:<32}", "distinct strengths", distinct.len());
        let values = strengths
            .par_iter()
            .map(|s| distinct.binary_search(s).expect("strength was collected") + 1)
            .map(|ordinal| ordinal as Ordinal)
            .collect();
        Self { cards: 5, values }
    }

    /// each hand of one more card takes the best of its subsets
    fn extend(smaller: &Self) -> Self {
        let n = smaller.cards + 1;
        log::info!("{:<32}{:<32}", "building evaluator", format!("{} cards", n));
        let size = choose(52, n) as usize;
        let values = (0..size)
            .into_par_iter()
            .map(|i| Self::uncolex(i, n))
            .map(|hand| {
                hand.map(|card| {
                    let mut subset = hand;
                    subset.remove(card);
                    smaller.get(subset)
                })
                .max()
                .unwrap_or_default()
            })
            .collect();
        Self { cards: n, values }
    }
}

impl Blob for Table {
    fn name() -> &'static str {
        "evaluator"
    }
    fn write<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        writer.write_u16::<BE>(self.cards as u16)?;
        crate::save::write_u16s(writer, &self.values)
    }
    fn read<R: Read>(reader: &mut R) -> anyhow::Result<Self> {
        let cards = reader.read_u16::<BE>()? as usize;
        let values = crate::save::read_u16s(reader)?;
        anyhow::ensure!(values.len() as u64 == choose(52, cards), "truncated table");
        Ok(Self { cards, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Ranking;

    fn evaluator() -> &'static Evaluator {
        Evaluator::shared()
    }
    fn hand(s: &str) -> Hand {
        Hand::try_from(s).unwrap()
    }

    #[test]
    fn colex_roundtrip() {
        for i in [0, 1, 2_598_959, 1_234_567] {
            assert_eq!(Table::colex(Table::uncolex(i, 5)), i);
        }
        assert_eq!(Table::colex(hand("2c 2d 2h 2s 3c")), 0);
    }

    #[test]
    fn distinct_strength_count() {
        let max = evaluator().tables[0].values.iter().max().copied();
        assert_eq!(max, Some(7462));
        assert_eq!(evaluator().tables[0].values.iter().min().copied(), Some(1));
    }

    #[test]
    fn consistent_with_strength() {
        let e = evaluator();
        for (a, b) in [
            ("As Kh Qd Jc 9s", "2s 2h 3d 4c 5d"),
            ("5s 4h 3d 2c As", "6s 5h 4d 3c 2s"),
            ("As Ah Ad Kc Qs", "5s 4h 3d 2c As"),
            ("Ks Kh Kd As Ah", "As Ah Ad Ks Kh"),
            ("As Ah Ad Ac Ks", "5s 4s 3s 2s As"),
        ] {
            assert!(e.evaluate(hand(a)) < e.evaluate(hand(b)), "{} < {}", a, b);
            let sa = Strength::try_from(hand(a)).unwrap();
            let sb = Strength::try_from(hand(b)).unwrap();
            assert!(sa < sb);
        }
        assert_eq!(e.evaluate(hand("As Kh Qd Jc 9s")), e.evaluate(hand("Ac Kd Qh Js 9c")));
    }

    #[test]
    fn royal_flush_is_best() {
        assert_eq!(evaluator().evaluate(hand("As Ks Qs Js Ts")), 7462);
        assert_eq!(evaluator().evaluate(hand("7c 5d 4h 3s 2c")), 1);
    }

    #[test]
    fn seven_cards_take_best_five() {
        let e = evaluator();
        let seven = hand("As Ks Qs Js Ts 2c 2d");
        assert_eq!(e.evaluate(seven), e.evaluate(hand("As Ks Qs Js Ts")));
        let seven = hand("Ah Ad 7c 7d 2s 3s 9h");
        let best = hand("Ah Ad 7c 7d 9h");
        assert_eq!(e.evaluate(seven), e.evaluate(best));
        assert_eq!(
            Strength::try_from(best).unwrap().ranking(),
            Ranking::TwoPair
        );
    }

    #[test]
    fn persistence() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = Table::path(dir.path(), 5);
        evaluator().tables[0].save(path).unwrap();
        let loaded = Table::load(path).unwrap();
        assert_eq!(loaded.cards, 5);
        assert_eq!(loaded.values, evaluator().tables[0].values);
    }

    #[test]
    #[should_panic]
    fn rejects_four_cards() {
        evaluator().evaluate(hand("As Ks Qs Js"));
    }
}
