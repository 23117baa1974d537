/// Pascal's triangle up to a full deck
const PASCAL: [[u64; 53]; 53] = {
    let mut table = [[0u64; 53]; 53];
    let mut n = 0;
    while n < 53 {
        table[n][0] = 1;
        let mut k = 1;
        while k <= n {
            table[n][k] = table[n - 1][k - 1] + table[n - 1][k];
            k += 1;
        }
        n += 1;
    }
    table
};

/// n choose k, for n within a deck
pub const fn choose(n: usize, k: usize) -> u64 {
    if k > n { 0 } else { PASCAL[n][k] }
}

/// n choose k for any n, exact as long as the result fits.
/// multiset groups can exceed the deck-sized table.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u128, |x, i| x * (n - i) as u128 / (i + 1) as u128) as u64
}

/// colexicographic rank of a strictly increasing sequence
pub fn colex<I>(ascending: I) -> u64
where
    I: IntoIterator<Item = usize>,
{
    ascending
        .into_iter()
        .enumerate()
        .map(|(i, p)| binomial(p as u64, i as u64 + 1))
        .sum()
}

/// inverse of colex: the k strictly increasing values of this rank
pub fn uncolex(mut index: u64, k: usize) -> Vec<usize> {
    let mut values = vec![0usize; k];
    for i in (0..k).rev() {
        let width = i as u64 + 1;
        let mut lo = i as u64;
        let mut hi = lo + 1;
        while binomial(hi, width) <= index {
            hi *= 2;
        }
        // largest b in [lo, hi) with C(b, width) <= index
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if binomial(mid, width) <= index {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        index -= binomial(lo, width);
        values[i] = lo as usize;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_agrees_with_binomial() {
        for n in 0..53 {
            for k in 0..=n {
                assert_eq!(choose(n, k), binomial(n as u64, k as u64));
            }
        }
        assert_eq!(choose(52, 2), 1326);
        assert_eq!(choose(52, 5), 2_598_960);
        assert_eq!(choose(52, 7), 133_784_560);
        assert_eq!(choose(3, 5), 0);
    }

    #[test]
    fn colex_is_dense() {
        let mut ranks = Vec::new();
        for a in 0..9 {
            for b in a + 1..9 {
                for c in b + 1..9 {
                    ranks.push(colex([a, b, c]));
                }
            }
        }
        ranks.sort();
        assert_eq!(ranks, (0..choose(9, 3)).collect::<Vec<_>>());
    }

    #[test]
    fn uncolex_inverts() {
        for index in 0..choose(13, 4) {
            let values = uncolex(index, 4);
            assert!(values.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(colex(values), index);
        }
        assert_eq!(uncolex(0, 0), Vec::<usize>::new());
        assert_eq!(uncolex(123_456_789, 1), vec![123_456_789]);
    }
}
