mod action;
mod community;
mod node;
mod remainder;
mod rules;
mod seat;
mod showdown;
mod state;
mod table;

pub use action::*;
pub use community::*;
pub use node::*;
pub use remainder::*;
pub use rules::*;
pub use seat::*;
pub use showdown::*;
pub use state::*;
pub use table::*;
