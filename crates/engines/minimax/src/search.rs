//! Fixed-depth minimax, white maximizing, with optional alpha-beta pruning

use chess_core::{
    apply_move, captured_piece, computer_moves, eval::centipawn_value, rules::is_square_attacked,
    Color, Move, Position, TimeControl,
};

use crate::eval::evaluate;

/// Score of a mated side, from white's point of view when white is mated.
pub const MATE_SCORE: i32 = 20_000;
const INF: i32 = i32::MAX / 2;

/// Result from pick_best_move indicating whether search completed or was stopped.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    /// Best move found with its score (if any legal moves exist)
    pub best_move: Option<(Move, i32)>,
    /// True if search was stopped early by the time control
    pub stopped: bool,
}

/// Root moves worth searching.
///
/// A move is skipped when the moved piece can be taken on its destination,
/// unless it captures something worth at least as much. If that rules out
/// every move, all of them are searched.
pub fn root_candidates(pos: &Position, moves: &[Move]) -> Vec<Move> {
    let filtered: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|mv| {
            let after = apply_move(pos, mv);
            if !is_square_attacked(&after.board, mv.to, pos.turn.other()) {
                return true;
            }
            match (pos.piece_at(mv.from), captured_piece(pos, mv)) {
                (Some(moving), Some(target)) => {
                    centipawn_value(target.kind) >= centipawn_value(moving.kind)
                }
                _ => false,
            }
        })
        .collect();

    if filtered.is_empty() {
        moves.to_vec()
    } else {
        filtered
    }
}

/// Searches `pos` to `depth` plies and returns the best root move with its
/// score (white's point of view).
///
/// Only strict improvements replace the current best, so ties keep the
/// earliest move in generation order and pruning cannot change the result.
pub fn pick_best_move(
    pos: &Position,
    depth: u8,
    alpha_beta: bool,
    nodes: &mut u64,
    tc: &TimeControl,
) -> SearchOutcome {
    let moves = computer_moves(pos);
    if moves.is_empty() {
        return SearchOutcome {
            best_move: None,
            stopped: false,
        };
    }

    let candidates = root_candidates(pos, &moves);
    let maximizing = pos.turn == Color::White;
    let (mut alpha, mut beta) = (-INF, INF);
    let mut best: Option<(Move, i32)> = None;
    let mut stopped = false;

    for &mv in &candidates {
        if tc.check_time() {
            stopped = true;
            break;
        }

        let next = apply_move(pos, &mv);
        *nodes += 1;
        let (score, was_stopped) = minimax(
            &next,
            depth.saturating_sub(1),
            alpha,
            beta,
            alpha_beta,
            nodes,
            tc,
        );
        if was_stopped {
            stopped = true;
            break;
        }

        let improves = match best {
            None => true,
            Some((_, b)) if maximizing => score > b,
            Some((_, b)) => score < b,
        };
        if improves {
            best = Some((mv, score));
            if alpha_beta {
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
            }
        }
    }

    // Stopped before any root move finished: play the first candidate.
    let best_move = best.or_else(|| {
        candidates
            .first()
            .map(|&mv| (mv, evaluate(&apply_move(pos, &mv).board)))
    });
    SearchOutcome { best_move, stopped }
}

/// Recursive minimax. Returns (score, stopped).
///
/// Leaves are scored statically without looking for mate. With pruning the
/// bounds are fail-soft: a cut node returns the value that caused the cut.
fn minimax(
    pos: &Position,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    alpha_beta: bool,
    nodes: &mut u64,
    tc: &TimeControl,
) -> (i32, bool) {
    if tc.check_time() {
        return (0, true);
    }

    if depth == 0 {
        return (evaluate(&pos.board), false);
    }

    let maximizing = pos.turn == Color::White;
    let moves = computer_moves(pos);
    if moves.is_empty() {
        if pos.in_check(pos.turn) {
            return (if maximizing { -MATE_SCORE } else { MATE_SCORE }, false);
        }
        return (0, false); // Stalemate
    }

    let mut best = if maximizing { -INF } else { INF };
    for mv in moves {
        let next = apply_move(pos, &mv);
        *nodes += 1;

        let (score, stopped) = minimax(&next, depth - 1, alpha, beta, alpha_beta, nodes, tc);
        if stopped {
            return (best, true);
        }

        if maximizing {
            best = best.max(score);
            if alpha_beta {
                if best >= beta {
                    break; // Beta cutoff
                }
                alpha = alpha.max(best);
            }
        } else {
            best = best.min(score);
            if alpha_beta {
                if best <= alpha {
                    break; // Alpha cutoff
                }
                beta = beta.min(best);
            }
        }
    }

    (best, false)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
