//! Binary persistence of every artifact the solver builds or learns.
//!
//! Evaluator tables, equity histograms, cluster assignments and the
//! infoset store all share one framing: a magic header, a tag naming the
//! artifact, a big-endian body, and a footer.
mod blob;
mod codec;

pub use blob::*;
pub use codec::*;
