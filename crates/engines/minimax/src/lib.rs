//! Minimax Chess Engine
//!
//! The hard computer opponent: a full-width minimax search to a fixed depth
//! over a material and piece-square evaluation. Alpha-beta pruning can be
//! switched off to compare node counts; it never changes the chosen move.

mod eval;
mod search;

use chess_core::{Engine, Position, SearchLimits, SearchResult};
use tracing::debug;

pub use eval::evaluate;
pub use search::{pick_best_move, root_candidates, SearchOutcome, MATE_SCORE};

/// Depths outside this range are clamped.
pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 6;

/// Minimax engine.
///
/// Scores are reported from white's point of view: positive favours white
/// regardless of which side is searching.
#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    alpha_beta: bool,
    /// Node counter for statistics
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new(alpha_beta: bool) -> Self {
        Self {
            alpha_beta,
            nodes: 0,
        }
    }

    pub fn alpha_beta(&self) -> bool {
        self.alpha_beta
    }

    pub fn set_alpha_beta(&mut self, enabled: bool) {
        self.alpha_beta = enabled;
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        self.nodes = 0;
        limits.start();
        let depth = limits.depth.clamp(MIN_DEPTH, MAX_DEPTH);

        let outcome = pick_best_move(
            pos,
            depth,
            self.alpha_beta,
            &mut self.nodes,
            &limits.time_control,
        );

        let score = outcome.best_move.map(|(_, s)| s).unwrap_or(0);
        debug!(
            engine = self.name(),
            depth,
            nodes = self.nodes,
            score,
            stopped = outcome.stopped,
            alpha_beta = self.alpha_beta,
            elapsed_ms = limits.time_control.elapsed().as_millis() as u64,
            "search finished"
        );

        SearchResult {
            best_move: outcome.best_move.map(|(mv, _)| mv),
            score,
            depth,
            nodes: self.nodes,
            stopped: outcome.stopped,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
