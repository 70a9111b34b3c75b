//! Search driver: MCTS iterations interleaved with proof propagation.
//!
//! Each iteration runs selection, transposition lookup, the instant-win shortcut,
//! expansion, the terminal check, simulation and backpropagation. Proven positions are
//! written to the transposition table as soon as they are found and are never sampled
//! again.

use std::cmp::Ordering;
use std::time::Instant;

use rand_pcg::Pcg64;
use tracing::{debug, info, warn};

use crate::engine::apply::apply_generated;
use crate::engine::lethal::has_instant_win;
use crate::hash::state_key;
use crate::persist::CacheStore;
use crate::rng::rng_for_run;
use crate::solver::proof::{mark_proven, propagate_proofs};
use crate::solver::rollout::rollout;
use crate::solver::tree::{NodeId, ProofSource, Tree, Untried};
use crate::solver::tt::{InMemoryTT, ProofRecord, TranspositionTable};
use crate::solver::uct::select_child;
use crate::solver::{SearchConfig, SearchResult};
use crate::state::GameState;
use crate::types::Player;

#[derive(Debug, Clone, Copy, Default)]
struct RunStats {
    iterations: u64,
    cache_hits: u64,
    // proofs derived this run (cache adoptions excluded)
    new_proofs: u64,
    p1_wins: u64,
    p2_wins: u64,
    draws: u64,
}

pub struct Mcts<'a> {
    tree: Tree,
    tt: &'a mut InMemoryTT,
    store: Option<&'a CacheStore>,
    config: SearchConfig,
    rng: Pcg64,
    stats: RunStats,
}

impl<'a> Mcts<'a> {
    pub fn new(initial: &GameState, config: SearchConfig, tt: &'a mut InMemoryTT) -> Self {
        Self {
            tree: Tree::new(*initial),
            tt,
            store: None,
            rng: rng_for_run(config.seed, 0),
            config,
            stats: RunStats::default(),
        }
    }

    /// Persist the table to `store` periodically and at exit.
    pub fn with_store(mut self, store: &'a CacheStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Reseed for the given run of a batch.
    pub fn with_run_index(mut self, run_index: u64) -> Self {
        self.rng = rng_for_run(self.config.seed, run_index);
        self
    }

    #[inline]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    #[inline]
    pub fn table(&self) -> &InMemoryTT {
        &*self.tt
    }

    /// Iterate until the budget runs out or the root is proven, then save once more.
    pub fn run(&mut self) -> SearchResult {
        let start = Instant::now();
        let root = self.tree.root();
        debug!(budget = self.config.iterations, cache_size = self.tt.len(), "search run starting");

        while self.stats.iterations < self.config.iterations {
            if self.tree.get(root).is_proven() {
                info!(iteration = self.stats.iterations, proof = ?self.tree.get(root).proof, "root proven");
                break;
            }
            self.step();
        }

        self.persist();
        let result = self.result();
        info!(
            iterations = self.stats.iterations,
            elapsed_ms = start.elapsed().as_millis() as u64,
            win_rate = result.win_rate,
            proven = result.is_proven,
            best_move = result.best_move.as_deref().unwrap_or("-"),
            "search run finished"
        );
        result
    }

    /// One iteration plus the periodic progress report and cache save.
    pub fn step(&mut self) {
        self.iterate();
        self.stats.iterations += 1;

        let it = self.stats.iterations;
        if self.config.report_interval > 0 && it % self.config.report_interval == 0 {
            self.report();
        }
        if self.config.save_interval > 0 && it % self.config.save_interval == 0 {
            self.persist();
        }
    }

    fn iterate(&mut self) {
        let selected = self.select();

        if !self.tree.get(selected).is_proven() {
            let key = state_key(&self.tree.get(selected).state);
            if let Some(record) = self.tt.get(key) {
                let node = self.tree.get_mut(selected);
                node.proof = Some(record);
                node.proof_source = Some(ProofSource::Cached);
                self.stats.cache_hits += 1;
                self.backpropagate(selected, Some(record.winner()));
                return;
            }
        }

        let node = self.tree.get(selected);
        if !node.is_terminal() && !node.is_proven() && has_instant_win(&node.state) {
            let record = ProofRecord::win(node.mover());
            self.prove(selected, record, ProofSource::InstantWin);
            self.backpropagate(selected, Some(record.winner()));
            return;
        }

        let leaf = self.expand(selected);

        let node = self.tree.get(leaf);
        if node.is_terminal() && !node.is_proven() {
            if let Some(winner) = node.state.winner() {
                self.prove(leaf, ProofRecord::win(winner), ProofSource::Terminal);
            }
        }

        let node = self.tree.get(leaf);
        let outcome = match node.proven_winner() {
            Some(w) => Some(w),
            None => {
                let state = node.state;
                rollout(&state, self.config.rollout_cap, &mut self.rng)
            }
        };
        self.backpropagate(leaf, outcome);
    }

    /// Descend by UCT through fully expanded, open, non-terminal nodes. Stops on
    /// reaching a proven child.
    fn select(&self) -> NodeId {
        let mut id = self.tree.root();
        loop {
            let node = self.tree.get(id);
            if !node.is_fully_expanded() || node.is_terminal() || node.is_proven() {
                return id;
            }
            let Some(child) = select_child(&self.tree, id, self.config.exploration) else {
                return id;
            };
            id = child;
            if self.tree.get(child).is_proven() {
                return id;
            }
        }
    }

    /// Expand one untried move of `id` and return the new child, or `id` itself when
    /// nothing is left to expand.
    fn expand(&mut self, id: NodeId) -> NodeId {
        let node = self.tree.get_mut(id);
        if node.is_terminal() || node.is_proven() {
            return id;
        }
        if node.untried == Untried::NotGenerated {
            node.untried = Untried::Pending(node.state.legal_moves());
        }
        let next = match &mut node.untried {
            Untried::Pending(moves) => moves.pop(),
            Untried::NotGenerated => None,
        };
        let Some(mv) = next else {
            return id;
        };

        let state = node.state;
        let ns = apply_generated(&state, mv, &mut self.rng);
        self.tree.add_child(id, mv, ns)
    }

    fn prove(&mut self, id: NodeId, record: ProofRecord, source: ProofSource) {
        mark_proven(&mut self.tree, &mut *self.tt, id, record, source);
        self.stats.new_proofs += 1;
    }

    /// Count the outcome on every node from `id` to the root, then re-check proofs
    /// along the same path.
    fn backpropagate(&mut self, id: NodeId, winner: Option<Player>) {
        let p1_won = winner == Some(Player::One);
        for nid in self.tree.path_to_root(id) {
            let node = self.tree.get_mut(nid);
            node.visits += 1;
            if p1_won {
                node.wins += 1;
            }
        }
        match winner {
            Some(Player::One) => self.stats.p1_wins += 1,
            Some(Player::Two) => self.stats.p2_wins += 1,
            None => self.stats.draws += 1,
        }
        self.stats.new_proofs += propagate_proofs(&mut self.tree, &mut *self.tt, id);
    }

    fn hit_rate(&self) -> f64 {
        if self.stats.iterations == 0 {
            0.0
        } else {
            self.stats.cache_hits as f64 / self.stats.iterations as f64
        }
    }

    fn report(&self) {
        let root = self.tree.get(self.tree.root());
        let tt = self.tt.stats();
        info!(
            iteration = self.stats.iterations,
            win_rate = root.win_rate(),
            proven_nodes = self.tree.proven_count(),
            tree_size = self.tree.len(),
            cache_size = self.tt.len(),
            hit_rate = self.hit_rate(),
            tt_gets = tt.gets,
            tt_hits = tt.hits,
            tt_conflicts = tt.conflicts,
            "search progress"
        );
    }

    fn persist(&self) {
        let Some(store) = self.store else {
            return;
        };
        if let Err(e) = store.save(&*self.tt, self.stats.new_proofs) {
            warn!(path = %store.path().display(), error = %e, "failed to save proof cache");
        }
    }

    /// Root child to recommend: proven wins for player 1 first, then by win rate.
    pub fn best_move(&self) -> Option<String> {
        let root = self.tree.get(self.tree.root());
        let mut children: Vec<_> = root.children.iter().map(|&c| self.tree.get(c)).collect();
        children.sort_by(|a, b| {
            let a_win = a.proven_winner() == Some(Player::One);
            let b_win = b.proven_winner() == Some(Player::One);
            match b_win.cmp(&a_win) {
                Ordering::Equal => b.win_rate().total_cmp(&a.win_rate()),
                other => other,
            }
        });
        children.first().and_then(|n| n.mv).map(|mv| mv.description())
    }

    pub fn result(&self) -> SearchResult {
        let root = self.tree.get(self.tree.root());
        SearchResult {
            win_rate: root.win_rate(),
            total_simulations: self.stats.iterations,
            player1_wins: self.stats.p1_wins,
            player2_wins: self.stats.p2_wins,
            draws: self.stats.draws,
            best_move: self.best_move(),
            is_proven: root.is_proven(),
            proof: root.proof,
            proven_nodes: self.tree.proven_count() as u64,
            cache_hits: self.stats.cache_hits,
            cache_size: self.tt.len(),
        }
    }
}

/// Run entry point: one search from `initial` against `tt`, saving to `store` if given.
pub fn search(
    initial: &GameState,
    config: SearchConfig,
    tt: &mut InMemoryTT,
    store: Option<&CacheStore>,
) -> SearchResult {
    let mut mcts = Mcts::new(initial, config, tt);
    if let Some(store) = store {
        mcts = mcts.with_store(store);
    }
    mcts.run()
}
