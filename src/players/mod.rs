//! Decision makers that can sit at a [`crate::gameplay::Table`].
#[cfg(feature = "server")]
mod human;
mod player;
mod policy;
mod translation;

#[cfg(feature = "server")]
pub use human::*;
pub use player::*;
pub use policy::*;
pub use translation::*;
