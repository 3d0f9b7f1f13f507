//! Tactical Capture Engine
//!
//! The medium computer opponent. It looks one ply ahead:
//! - captures are scored on the resulting position and tried best-first,
//!   and the first one whose capturing piece is safe on its new square wins;
//! - otherwise it plays a random move that leaves the moved piece unattacked;
//! - otherwise any random legal move.

use chess_core::{
    apply_move, captured_piece, computer_moves,
    eval::{centipawn_value, is_piece_attacked, material_balance},
    rules::is_square_attacked,
    Color, Engine, Move, Position, SearchLimits, SearchResult,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;


/// Bonus for a capture that also gives check.
pub const CHECK_BONUS: i32 = 100;
/// Penalty when the mover's own king is attacked.
pub const IN_CHECK_PENALTY: i32 = 150;

#[derive(Debug, Clone)]
pub struct TacticalEngine {
    rng: StdRng,
}

impl TacticalEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for TacticalEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores `after` from `mover`'s point of view: centipawn material, minus half
/// the value of each of the mover's pieces that the opponent attacks, plus
/// [`CHECK_BONUS`] for giving check and minus [`IN_CHECK_PENALTY`] for being in it.
pub fn evaluate_for(after: &Position, mover: Color) -> i32 {
    let board = &after.board;
    let hanging: i32 = board
        .pieces_of(mover)
        .filter(|&(at, _)| is_piece_attacked(board, at))
        .map(|(_, pc)| centipawn_value(pc.kind) / 2)
        .sum();

    let mut score = material_balance(board, mover) - hanging;
    if after.in_check(mover.other()) {
        score += CHECK_BONUS;
    }
    if after.in_check(mover) {
        score -= IN_CHECK_PENALTY;
    }
    score
}

/// The moved piece cannot be taken on its destination next ply.
pub fn lands_safely(pos: &Position, mv: &Move) -> bool {
    let after = apply_move(pos, mv);
    !is_square_attacked(&after.board, mv.to, pos.turn.other())
}

/// Captures ordered best-first by [`evaluate_for`]; equal scores keep
/// generation order.
pub fn ranked_captures(pos: &Position, moves: &[Move]) -> Vec<(Move, i32)> {
    let mut ranked: Vec<(Move, i32)> = moves
        .iter()
        .filter(|mv| captured_piece(pos, mv).is_some())
        .map(|mv| (*mv, evaluate_for(&apply_move(pos, mv), pos.turn)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

impl Engine for TacticalEngine {
    fn search(&mut self, pos: &Position, _limits: SearchLimits) -> SearchResult {
        let moves = computer_moves(pos);
        if moves.is_empty() {
            return SearchResult::none();
        }
        let nodes = moves.len() as u64;

        let ranked = ranked_captures(pos, &moves);
        if let Some(&(mv, score)) = ranked.iter().find(|(mv, _)| lands_safely(pos, mv)) {
            debug!(engine = self.name(), to = %mv.to, score, "safe capture");
            return SearchResult {
                score,
                nodes,
                depth: 1,
                ..SearchResult::instant(mv)
            };
        }

        let safe: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|mv| lands_safely(pos, mv))
            .collect();
        let pool = if safe.is_empty() { &moves } else { &safe };
        let Some(&mv) = pool.choose(&mut self.rng) else {
            return SearchResult::none();
        };
        debug!(
            engine = self.name(),
            safe = safe.len(),
            legal = moves.len(),
            "no safe capture, random move"
        );
        SearchResult {
            nodes,
            depth: 1,
            ..SearchResult::instant(mv)
        }
    }

    fn name(&self) -> &str {
        "Tactical v1.0"
    }
}
