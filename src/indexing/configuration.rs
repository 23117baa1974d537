use super::combinatorics::binomial;
use super::combinatorics::colex;
use super::combinatorics::uncolex;
use super::shape::Shape;

/// One suit's contribution to a hand: its Shape and its rank index.
pub type Suited = (Shape, u64);

/// The multiset of four suit Shapes a hand can have, sorted descending.
///
/// Every hand with this multiset of Shapes lands in a contiguous block
/// of indices starting at `offset`. Within the block, runs of equal
/// Shapes are indexed as multisets of rank indices, then combined in
/// mixed radix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    shapes: [Shape; 4],
    depth: usize,
    offset: u64,
    size: u64,
}

impl Configuration {
    pub fn shapes(&self) -> [Shape; 4] {
        self.shapes
    }
    pub fn offset(&self) -> u64 {
        self.offset
    }
    pub fn size(&self) -> u64 {
        self.size
    }

    /// every Configuration that deals exactly these rounds, with
    /// offsets assigned in enumeration order
    pub fn enumerate(rounds: &[usize]) -> Vec<Self> {
        let ref shapes = Shape::enumerate(rounds);
        let mut found = Vec::new();
        Self::search(shapes, 0, &mut Vec::with_capacity(4), rounds.to_vec(), &mut found);
        let mut offset = 0;
        found
            .into_iter()
            .map(|shapes| {
                let mut this = Self {
                    shapes,
                    depth: rounds.len(),
                    offset,
                    size: 0,
                };
                this.size = this
                    .groups()
                    .map(|(shape, _, m)| Self::multisets(shape.capacity(this.depth), m))
                    .product();
                offset += this.size;
                this
            })
            .collect()
    }

    /// depth-first search over non-increasing Shape sequences
    /// whose per-round counts sum to the rounds
    fn search(
        shapes: &[Shape],
        start: usize,
        chosen: &mut Vec<Shape>,
        remaining: Vec<usize>,
        found: &mut Vec<[Shape; 4]>,
    ) {
        if chosen.len() == 4 {
            if remaining.iter().all(|n| *n == 0) {
                found.push([chosen[0], chosen[1], chosen[2], chosen[3]]);
            }
            return;
        }
        for (i, shape) in shapes.iter().enumerate().skip(start) {
            if remaining
                .iter()
                .enumerate()
                .all(|(r, n)| shape.count(r) <= *n)
            {
                let remaining = remaining
                    .iter()
                    .enumerate()
                    .map(|(r, n)| n - shape.count(r))
                    .collect();
                chosen.push(*shape);
                Self::search(shapes, i, chosen, remaining, found);
                chosen.pop();
            }
        }
    }

    /// multisets of size m drawn from n items
    fn multisets(n: u64, m: usize) -> u64 {
        binomial(n + m as u64 - 1, m as u64)
    }

    /// runs of equal Shapes as (shape, start, length)
    fn groups(&self) -> impl Iterator<Item = (Shape, usize, usize)> + '_ {
        (0..4)
            .filter(|i| *i == 0 || self.shapes[*i] != self.shapes[*i - 1])
            .map(|start| {
                let shape = self.shapes[start];
                let length = self.shapes[start..]
                    .iter()
                    .take_while(|s| **s == shape)
                    .count();
                (shape, start, length)
            })
    }

    /// index within this block of suits sorted descending
    pub fn index(&self, suits: &[Suited; 4]) -> u64 {
        let mut index = 0;
        let mut radix = 1;
        for (shape, start, m) in self.groups() {
            let local = colex(
                suits[start..start + m]
                    .iter()
                    .rev()
                    .enumerate()
                    .map(|(i, (_, a))| *a as usize + i),
            );
            index += radix * local;
            radix *= Self::multisets(shape.capacity(self.depth), m);
        }
        index
    }

    /// inverse of index, suits sorted descending
    pub fn unindex(&self, mut index: u64) -> [Suited; 4] {
        let mut suits = [(Shape::default(), 0u64); 4];
        for (shape, start, m) in self.groups() {
            let base = Self::multisets(shape.capacity(self.depth), m);
            let ascending = uncolex(index % base, m);
            index /= base;
            for (i, b) in ascending.into_iter().enumerate() {
                suits[start + m - 1 - i] = (shape, (b - i) as u64);
            }
        }
        suits
    }
}
