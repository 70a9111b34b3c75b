pub mod batch;
pub mod mcts;
pub mod proof;
pub mod rollout;
pub mod tree;
pub mod tt;
pub mod uct;

pub use batch::{BatchConfig, BatchDriver, BatchOutcome};
pub use mcts::{search, Mcts};
pub use tree::{Node, NodeId, ProofSource, Tree, Untried};
pub use tt::{InMemoryTT, ProofRecord, ProofStatus, PutOutcome, TranspositionTable};

use crate::types::Player;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Iteration budget for one run.
    pub iterations: u64,
    /// UCT exploration constant.
    pub exploration: f64,
    /// Progress report period in iterations (0 disables).
    pub report_interval: u64,
    /// Cache save period in iterations (0 saves only at exit).
    pub save_interval: u64,
    /// Moves per rollout before it is scored a draw.
    pub rollout_cap: u32,
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 100_000,
            exploration: std::f64::consts::SQRT_2,
            report_interval: 1_000,
            save_interval: 10_000,
            rollout_cap: 500,
            seed: 0x00C0_FFEE,
        }
    }
}

/// Summary of one search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Root player-1 win rate.
    pub win_rate: f64,
    pub total_simulations: u64,
    pub player1_wins: u64,
    pub player2_wins: u64,
    pub draws: u64,
    pub best_move: Option<String>,
    pub is_proven: bool,
    pub proof: Option<ProofRecord>,
    /// Proven nodes in this run's tree.
    pub proven_nodes: u64,
    pub cache_hits: u64,
    pub cache_size: usize,
}

impl SearchResult {
    #[inline]
    pub fn proof_status(&self) -> Option<ProofStatus> {
        self.proof.map(|p| p.status)
    }

    #[inline]
    pub fn proof_player(&self) -> Option<Player> {
        self.proof.map(|p| p.player)
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.proof.map(|p| p.winner())
    }
}
