#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod error;
pub mod types;
pub mod rules;
pub mod board;
pub mod state;
pub mod hash;
pub mod rng;
pub mod persist;

pub mod engine {
    pub mod apply;
    pub mod lethal;
}

pub mod solver;

// Re-exports: stable minimal API surface for external callers
pub use crate::board::Board;
pub use crate::engine::apply::{apply_generated, apply_move, end_turn, lunge_sequence};
pub use crate::engine::lethal::has_instant_win;
pub use crate::error::{Error, Result};
pub use crate::hash::{state_key, StateKey};
pub use crate::persist::CacheStore;
pub use crate::rng::rng_for_run;
pub use crate::solver::{
    search, BatchConfig, BatchDriver, BatchOutcome, InMemoryTT, ProofRecord, ProofStatus,
    SearchConfig, SearchResult, TranspositionTable,
};
pub use crate::state::{is_terminal, legal_moves, Fighter, GameState, Move};
pub use crate::types::{winner_id, Player, Pos};
