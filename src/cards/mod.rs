mod card;
mod deck;
mod evaluator;
mod hand;
mod hands;
mod kicks;
mod rank;
mod ranking;
mod street;
mod strength;
mod suit;

pub use card::*;
pub use deck::*;
pub use evaluator::*;
pub use hand::*;
pub use hands::*;
pub use kicks::*;
pub use rank::*;
pub use ranking::*;
pub use street::*;
pub use strength::*;
pub use suit::*;
