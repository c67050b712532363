//! Decision engine: minimax search plus the difficulty policy.

pub mod policy;
pub mod search;

pub use policy::{choose_move, Difficulty, Engine, Strategy};
pub use search::{best_move, search, SearchResult};
