//! Static evaluation from white's point of view.

use chess_core::{
    eval::{centipawn_value, is_piece_attacked, sign, square_value},
    Board,
};

/// Material plus piece-square bonus, signed by colour. Every piece the
/// opponent attacks then costs its own side half its material value.
pub fn evaluate(board: &Board) -> i32 {
    let mut score = 0;
    for (at, pc) in board.pieces() {
        score += sign(pc.color) * (centipawn_value(pc.kind) + square_value(pc, at));
    }
    for (at, pc) in board.pieces() {
        if is_piece_attacked(board, at) {
            score -= sign(pc.color) * centipawn_value(pc.kind) / 2;
        }
    }
    score
}
