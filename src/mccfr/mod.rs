//! Monte Carlo counterfactual regret minimization over the abstracted game.
//!
//! Workers share one [`Store`] of infosets keyed by betting history and
//! card bucket. Each iteration runs an external-sampling traversal per
//! seat; the average strategy is accumulated separately over the first
//! betting round.
mod discount;
mod infoset;
mod key;
mod manager;
mod progress;
mod schedule;
mod store;
mod trainer;

pub use discount::*;
pub use infoset::*;
pub use key::*;
pub use manager::*;
pub use progress::*;
pub use schedule::*;
pub use store::*;
pub use trainer::*;
