//! Gannet's search backend: move ordering plus fail-hard alpha-beta with
//! quiescence, wrapped in the `Engine` trait for the UCI driver.

pub mod search;
pub mod sort;

use gannet_core::{Board, Engine, SearchLimits, SearchResult};

pub use search::{INFINITY, MATE, MAX_PLY, Pv, SearchStats, quies, search, search_root};
pub use sort::{HASH_MOVE_SCORE, Sort};

/// Negamax alpha-beta engine with PST/MVV-LVA move ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaBetaEngine {
    stats: SearchStats,
}

impl AlphaBetaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters from the most recent search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl Engine for AlphaBetaEngine {
    fn search(&mut self, board: &Board, limits: SearchLimits) -> SearchResult {
        self.stats.reset();

        let mut b = board.clone();
        let mut pv = Pv::new();
        let score = search_root(&mut b, limits.depth, &mut pv, &mut self.stats);

        SearchResult {
            best_move: pv.line().first().copied(),
            score,
            depth: limits.depth,
            nodes: self.stats.nodes,
            stopped: limits.should_stop(),
            pv: pv.line().to_vec(),
        }
    }

    fn name(&self) -> &str {
        "Gannet"
    }

    fn new_game(&mut self) {
        self.stats.reset();
    }
}
