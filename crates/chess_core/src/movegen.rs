//! Legal move enumeration and terminal-position detection.
//!
//! Moves are found by trying every destination square for every piece of the
//! side to move through [`is_legal_move`]; there is no incremental generator.
//! Output order is source row-major, then destination row-major, then
//! promotion order Q, R, B, N. Search tiers rely on this order for tie-breaks.

use crate::{
    board::Position,
    rules::is_legal_move,
    types::*,
};

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    for (from, pc) in pos.board.pieces_of(pos.turn) {
        push_legal_from(pos, from, pc, &PieceKind::PROMOTIONS, out);
    }
}

/// Legal moves with promotions restricted to a queen, as computer players use.
pub fn computer_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (from, pc) in pos.board.pieces_of(pos.turn) {
        push_legal_from(pos, from, pc, &[PieceKind::Queen], &mut out);
    }
    out
}

/// Legal moves of the piece standing on `from` (empty if it is not the mover's).
pub fn legal_moves_from(pos: &Position, from: Coord) -> Vec<Move> {
    let mut out = Vec::new();
    if let Some(pc) = pos.piece_at(from)
        && pc.color == pos.turn
    {
        push_legal_from(pos, from, pc, &PieceKind::PROMOTIONS, &mut out);
    }
    out
}

fn push_legal_from(
    pos: &Position,
    from: Coord,
    pc: Piece,
    promotions: &[PieceKind],
    out: &mut Vec<Move>,
) {
    for to in Coord::all() {
        if pc.kind == PieceKind::Pawn && to.row == pc.color.promotion_row() {
            for &kind in promotions {
                let mv = Move::with_promotion(from, to, kind);
                if is_legal_move(pos, &mv) {
                    out.push(mv);
                }
            }
        } else {
            let mv = Move::new(from, to);
            if is_legal_move(pos, &mv) {
                out.push(mv);
            }
        }
    }
}

/// Stops at the first legal move found.
pub fn has_legal_move(pos: &Position) -> bool {
    pos.board.pieces_of(pos.turn).any(|(from, pc)| {
        Coord::all().any(|to| {
            let mv = if pc.kind == PieceKind::Pawn && to.row == pc.color.promotion_row() {
                Move::with_promotion(from, to, PieceKind::Queen)
            } else {
                Move::new(from, to)
            };
            is_legal_move(pos, &mv)
        })
    })
}

pub fn is_checkmate(pos: &Position) -> bool {
    pos.in_check(pos.turn) && !has_legal_move(pos)
}

pub fn is_stalemate(pos: &Position) -> bool {
    !pos.in_check(pos.turn) && !has_legal_move(pos)
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
