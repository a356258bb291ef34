//! Game engine trait boundary between the search and concrete games.

pub mod engine;

pub use engine::GameEngine;
