//! Suit-isomorphic canonical indexing of hole and community cards.
mod combinatorics;
mod configuration;
mod indexer;
mod shape;

pub use combinatorics::*;
pub use indexer::*;
