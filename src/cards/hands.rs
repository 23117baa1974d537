use super::hand::Hand;

/// HandIterator iterates over all hands of n cards that avoid a mask of
/// blocked cards. It holds a single u64 (and the mask) rather than the
/// full list, always iterates in the same ascending order, and advances
/// with Gosper's hack.
pub struct HandIterator {
    next: u64,
    mask: u64,
}

impl HandIterator {
    /// number of hands this iterator yields in total
    pub fn combinations(&self) -> usize {
        let n = 52 - Hand::from(self.mask).size();
        let k = Hand::from(self.next).size();
        (0..k).fold(1, |x, i| x * (n - i) / (i + 1))
    }

    fn exhausted(&self) -> bool {
        self.next == 0 || (64 - 52) > self.next.leading_zeros()
    }

    fn permute(&self) -> u64 {
        let  x = /* 000_100                       */ self.next;
        let  a = /* 000_111 <- 000_100 || 000_110 */ x | (x - 1);
        let  b = /* 001_000 <-                    */ a.wrapping_add(1);
        let  c = /* 111_000 <-                    */ !   a;
        let  d = /* 001_000 <- 111_000 && 001_000 */ c & b;
        let  e = /* 000_111 <-                    */ d.wrapping_sub(1);
        let  f = /*         << xxx                */ 1 + x.trailing_zeros();
        let  g = /* 000_000 <-                    */ e.checked_shr(f).unwrap_or(0);
        let  h = /* 001_000 <- 001_000 || 000_000 */ b | g;
        h
    }

    fn advance(&mut self) {
        loop {
            self.next = self.permute();
            if self.exhausted() || self.next & self.mask == 0 {
                break;
            }
        }
    }
}

impl Iterator for HandIterator {
    type Item = Hand;
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted() {
            None
        } else {
            let hand = Hand::from(self.next);
            self.advance();
            Some(hand)
        }
    }
}

/// size and mask are immutable and must be decided at construction
impl From<(usize, Hand)> for HandIterator {
    fn from((n, mask): (usize, Hand)) -> Self {
        assert!(n > 0, "hands of zero cards");
        let mut this = Self {
            next: (1 << n) - 1,
            mask: u64::from(mask),
        };
        while !this.exhausted() && this.next & this.mask > 0 {
            this.next = this.permute();
        }
        this
    }
}
