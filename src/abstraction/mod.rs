//! Card abstraction: equity features, opponent archetypes, and the
//! per-street bucket tables that name every infoset.
mod encoder;
mod equity;
mod ochs;
mod tables;

pub use encoder::*;
pub use equity::*;
pub use ochs::*;
pub use tables::*;
