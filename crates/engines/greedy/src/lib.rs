//! Greedy Capture Engine
//!
//! The easy computer opponent. Every legal move is scored by the value of the
//! piece it captures and one of the best-scoring moves
//! is picked at random. There is no look-ahead, so it happily walks into
//! recaptures.

use chess_core::{
    captured_piece, computer_moves, eval::standard_value, Engine, Move, Position, SearchLimits,
    SearchResult,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

#[cfg(test)]
mod lib_tests;

/// A chess engine that grabs the most valuable piece it can.
#[derive(Debug, Clone)]
pub struct GreedyEngine {
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic tie-breaking for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard value of the captured piece (en passant included); 0 for a quiet move.
pub fn capture_value(pos: &Position, mv: &Move) -> i32 {
    captured_piece(pos, mv)
        .map(|pc| standard_value(pc.kind))
        .unwrap_or(0)
}

/// Moves sharing the highest [`capture_value`], in generation order.
pub fn best_captures(pos: &Position, moves: &[Move]) -> Vec<Move> {
    let Some(best) = moves.iter().map(|mv| capture_value(pos, mv)).max() else {
        return Vec::new();
    };
    moves
        .iter()
        .copied()
        .filter(|mv| capture_value(pos, mv) == best)
        .collect()
}

impl Engine for GreedyEngine {
    fn search(&mut self, pos: &Position, _limits: SearchLimits) -> SearchResult {
        let moves = computer_moves(pos);
        let candidates = best_captures(pos, &moves);
        let Some(&mv) = candidates.choose(&mut self.rng) else {
            return SearchResult::none();
        };

        let score = capture_value(pos, &mv);
        debug!(
            engine = self.name(),
            legal = moves.len(),
            ties = candidates.len(),
            score,
            "greedy move chosen"
        );
        SearchResult {
            best_move: Some(mv),
            score,
            depth: 1,
            nodes: moves.len() as u64,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Greedy v1.0"
    }
}
