use tracing::info;

use crate::persist::CacheStore;
use crate::solver::mcts::Mcts;
use crate::solver::tt::{InMemoryTT, TranspositionTable};
use crate::solver::{SearchConfig, SearchResult};
use crate::state::GameState;

#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    /// Maximum number of search runs.
    pub runs: u32,
    pub search: SearchConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// A run proved the root.
    Proven { runs: u32, result: SearchResult },
    /// Budget exhausted without a root proof.
    Unresolved { runs: u32, last: Option<SearchResult> },
}

impl BatchOutcome {
    #[inline]
    pub fn is_proven(&self) -> bool {
        matches!(self, BatchOutcome::Proven { .. })
    }

    #[inline]
    pub fn last_result(&self) -> Option<&SearchResult> {
        match self {
            BatchOutcome::Proven { result, .. } => Some(result),
            BatchOutcome::Unresolved { last, .. } => last.as_ref(),
        }
    }
}

/// Repeats search runs, each with a fresh tree, sharing proofs through the cache store.
#[derive(Debug)]
pub struct BatchDriver {
    config: BatchConfig,
    store: Option<CacheStore>,
    // proofs held from earlier runs, folded into every reload
    carried: InMemoryTT,
}

impl BatchDriver {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            store: None,
            carried: InMemoryTT::default(),
        }
    }

    pub fn with_store(mut self, store: CacheStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Proofs accumulated so far.
    #[inline]
    pub fn table(&self) -> &InMemoryTT {
        &self.carried
    }

    pub fn run(&mut self, initial: &GameState) -> BatchOutcome {
        self.run_with(initial, |_, _| {})
    }

    /// Like `run`, calling `on_run(run_index, result)` after every run.
    pub fn run_with<F>(&mut self, initial: &GameState, mut on_run: F) -> BatchOutcome
    where
        F: FnMut(u32, &SearchResult),
    {
        let mut last: Option<SearchResult> = None;

        for run in 0..self.config.runs {
            let mut tt = match self.store.as_mut() {
                Some(store) => store.load_or_empty(),
                None => InMemoryTT::default(),
            };
            let carried_in = tt.merge(&self.carried);
            info!(run = run + 1, of = self.config.runs, cache_size = tt.len(), carried_in, "batch run starting");

            let result = {
                let mut mcts = Mcts::new(initial, self.config.search, &mut tt).with_run_index(u64::from(run));
                if let Some(store) = self.store.as_ref() {
                    mcts = mcts.with_store(store);
                }
                mcts.run()
            };
            self.carried = tt;
            on_run(run, &result);

            if result.is_proven {
                info!(run = run + 1, winner = ?result.winner(), "batch proved the root");
                return BatchOutcome::Proven {
                    runs: run + 1,
                    result,
                };
            }
            last = Some(result);
        }

        info!(runs = self.config.runs, "batch budget exhausted without proof");
        BatchOutcome::Unresolved {
            runs: self.config.runs,
            last,
        }
    }
}
