//! Core types: player identification, per-player maps, and randomness.

pub mod player;
pub mod rng;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
