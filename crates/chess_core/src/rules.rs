//! Move legality under full chess law.
//!
//! Legality is split in two layers so attack detection never recurses into the
//! self-check filter:
//!
//! * [`attacks_square`] / [`is_pseudo_legal`]: shape, path, castling and
//!   en-passant rules with no regard for the mover's own king.
//! * [`is_legal_move`]: the pseudo-legal check plus the self-check filter,
//!   evaluated on a scratch copy of the position.

use crate::{
    board::{Board, Position},
    types::*,
};

/// Raw attack geometry: can the piece on `from` strike `target`?
///
/// Ignores whose turn it is and what stands on `target`. Pawns attack only
/// diagonally forward and kings only adjacent squares (castling is a move, not
/// an attack).
pub fn attacks_square(board: &Board, from: Coord, target: Coord) -> bool {
    let Some(pc) = board.get(from) else {
        return false;
    };
    if from == target || !target.in_bounds() {
        return false;
    }
    let dr = target.row as i8 - from.row as i8;
    let dc = target.col as i8 - from.col as i8;
    match pc.kind {
        PieceKind::Pawn => dr == pc.color.forward() && dc.abs() == 1,
        PieceKind::Knight => is_knight_step(dr, dc),
        PieceKind::Bishop => dr.abs() == dc.abs() && path_clear(board, from, target),
        PieceKind::Rook => (dr == 0 || dc == 0) && path_clear(board, from, target),
        PieceKind::Queen => {
            (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && path_clear(board, from, target)
        }
        PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
    }
}

fn is_knight_step(dr: i8, dc: i8) -> bool {
    matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1))
}

/// Every square strictly between `from` and `to` is empty.
/// Callers guarantee the two squares share a row, column or diagonal.
fn path_clear(board: &Board, from: Coord, to: Coord) -> bool {
    let step_r = (to.row as i8 - from.row as i8).signum();
    let step_c = (to.col as i8 - from.col as i8).signum();
    let mut cur = from.offset(step_r, step_c);
    while let Some(sq) = cur {
        if sq == to {
            return true;
        }
        if !board.is_empty(sq) {
            return false;
        }
        cur = sq.offset(step_r, step_c);
    }
    false
}

pub fn is_square_attacked(board: &Board, target: Coord, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, _)| attacks_square(board, from, target))
}

/// False when `color` has no king on the board.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(k) => is_square_attacked(board, k, color.other()),
        None => false,
    }
}

/// Pseudo-legality: everything except the self-check filter.
pub fn is_pseudo_legal(pos: &Position, mv: &Move) -> bool {
    if !mv.from.in_bounds() || !mv.to.in_bounds() {
        return false;
    }
    let Some(piece) = pos.board.get(mv.from) else {
        return false;
    };
    if piece.color != pos.turn {
        return false;
    }
    if mv.from == mv.to {
        return false;
    }
    if let Some(dest) = pos.board.get(mv.to)
        && dest.color == piece.color
    {
        return false;
    }

    let shape_ok = match piece.kind {
        PieceKind::Pawn => pawn_move_ok(pos, mv, piece.color),
        PieceKind::Knight => is_knight_step(mv.row_delta(), mv.col_delta()),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            attacks_square(&pos.board, mv.from, mv.to)
        }
        PieceKind::King => {
            (mv.row_delta().abs() <= 1 && mv.col_delta().abs() <= 1)
                || castling_ok(pos, mv, piece.color)
        }
    };

    shape_ok && promotion_ok(piece, mv)
}

/// Full legality: pseudo-legal and the mover's king is not attacked afterwards.
pub fn is_legal_move(pos: &Position, mv: &Move) -> bool {
    if !is_pseudo_legal(pos, mv) {
        return false;
    }
    let next = apply_move(pos, mv);
    !is_king_in_check(&next.board, pos.turn)
}

fn promotion_ok(piece: Piece, mv: &Move) -> bool {
    let reaches_last_rank =
        piece.kind == PieceKind::Pawn && mv.to.row == piece.color.promotion_row();
    if reaches_last_rank {
        mv.promotion.is_some_and(PieceKind::is_promotion_target)
    } else {
        mv.promotion.is_none()
    }
}

fn pawn_move_ok(pos: &Position, mv: &Move, color: Color) -> bool {
    let dir = color.forward();
    let dr = mv.row_delta();
    let dc = mv.col_delta();

    if dc == 0 {
        if dr == dir {
            return pos.board.is_empty(mv.to);
        }
        if dr == 2 * dir && mv.from.row == color.pawn_home_row() {
            return match mv.from.offset(dir, 0) {
                Some(mid) => pos.board.is_empty(mid) && pos.board.is_empty(mv.to),
                None => false,
            };
        }
        return false;
    }

    if dc.abs() == 1 && dr == dir {
        return match pos.board.get(mv.to) {
            Some(target) => target.color != color,
            None => is_en_passant_capture(pos, mv),
        };
    }
    false
}

/// True when `mv` is a pawn capturing en passant against `pos.last_move`.
///
/// The previous move must be a two-square pawn advance that ended beside the
/// capturing pawn, on the capture's destination file.
pub fn is_en_passant_capture(pos: &Position, mv: &Move) -> bool {
    let Some(piece) = pos.board.get(mv.from) else {
        return false;
    };
    if piece.kind != PieceKind::Pawn
        || !pos.board.is_empty(mv.to)
        || mv.row_delta() != piece.color.forward()
        || mv.col_delta().abs() != 1
    {
        return false;
    }
    let Some(last) = pos.last_move else {
        return false;
    };
    let victim_ok = matches!(
        pos.board.get(last.to),
        Some(Piece { kind: PieceKind::Pawn, color }) if color != piece.color
    );
    victim_ok
        && last.from.col == last.to.col
        && last.row_delta().abs() == 2
        && last.to.row == mv.from.row
        && last.to.col == mv.to.col
}

/// The piece `mv` removes from the board, including the pawn taken en passant.
pub fn captured_piece(pos: &Position, mv: &Move) -> Option<Piece> {
    if is_en_passant_capture(pos, mv) {
        return pos.board.get(Coord::new(mv.from.row, mv.to.col));
    }
    pos.board.get(mv.to)
}

/// Castling request: the king on its home square moving two files along its rank.
pub fn is_castling_move(pos: &Position, mv: &Move) -> bool {
    match pos.board.get(mv.from) {
        Some(pc) if pc.kind == PieceKind::King => {
            mv.from == king_home(pc.color) && mv.row_delta() == 0 && mv.col_delta().abs() == 2
        }
        _ => false,
    }
}

fn castling_ok(pos: &Position, mv: &Move, color: Color) -> bool {
    if mv.from != king_home(color) || mv.row_delta() != 0 || mv.col_delta().abs() != 2 {
        return false;
    }
    let king_side = mv.col_delta() > 0;
    let rights = pos.castling_rights.side(color);
    let allowed = if king_side {
        rights.king_side
    } else {
        rights.queen_side
    };
    if !allowed {
        return false;
    }

    let row = color.back_rank();
    let rook_col = if king_side {
        KING_SIDE_ROOK_COL
    } else {
        QUEEN_SIDE_ROOK_COL
    };
    // The right alone is not trusted: the rook must still be at home.
    if pos.board.get(Coord::new(row, rook_col)) != Some(Piece::new(color, PieceKind::Rook)) {
        return false;
    }

    let (lo, hi) = if king_side { (5, 6) } else { (1, 3) };
    if (lo..=hi).any(|col| !pos.board.is_empty(Coord::new(row, col))) {
        return false;
    }

    // Start, transit and destination squares must all be safe.
    let step: i8 = if king_side { 1 } else { -1 };
    (0..=2).all(|i| {
        let sq = Coord::new(row, (KING_HOME_COL as i8 + step * i) as u8);
        !is_square_attacked(&pos.board, sq, color.other())
    })
}

/// Returns the successor position. The caller is responsible for legality.
///
/// Handles the en-passant victim, the castling rook, promotion (queen when the
/// move names none), castling-right revocation, `last_move` and the turn flip.
pub fn apply_move(pos: &Position, mv: &Move) -> Position {
    let mut next = *pos;
    let Some(piece) = next.board.get(mv.from) else {
        return next;
    };

    let en_passant = is_en_passant_capture(pos, mv);
    let castling = is_castling_move(pos, mv);
    let captured = next.board.get(mv.to);

    next.board.set(mv.from, None);
    if en_passant {
        next.board.set(Coord::new(mv.from.row, mv.to.col), None);
    }

    let placed = if piece.kind == PieceKind::Pawn && mv.to.row == piece.color.promotion_row() {
        let kind = mv
            .promotion
            .filter(|k| k.is_promotion_target())
            .unwrap_or(PieceKind::Queen);
        Piece::new(piece.color, kind)
    } else {
        piece
    };
    next.board.set(mv.to, Some(placed));

    if castling {
        let row = mv.from.row;
        let (rook_from, rook_to) = if mv.col_delta() > 0 {
            (KING_SIDE_ROOK_COL, 5)
        } else {
            (QUEEN_SIDE_ROOK_COL, 3)
        };
        let rook = next.board.take(Coord::new(row, rook_from));
        next.board.set(Coord::new(row, rook_to), rook);
    }

    revoke_castling_rights(&mut next.castling_rights, piece, mv, captured);

    next.last_move = Some(*mv);
    next.turn = pos.turn.other();
    next
}

fn revoke_castling_rights(
    rights: &mut CastlingRights,
    moved: Piece,
    mv: &Move,
    captured: Option<Piece>,
) {
    match moved.kind {
        PieceKind::King => rights.revoke_all(moved.color),
        PieceKind::Rook if mv.from.row == moved.color.back_rank() => {
            revoke_rook_side(rights, moved.color, mv.from.col)
        }
        _ => {}
    }

    // A rook captured on its home square takes its side's right with it.
    if let Some(cp) = captured
        && cp.kind == PieceKind::Rook
        && mv.to.row == cp.color.back_rank()
    {
        revoke_rook_side(rights, cp.color, mv.to.col);
    }
}

fn revoke_rook_side(rights: &mut CastlingRights, color: Color, col: u8) {
    let side = rights.side_mut(color);
    match col {
        KING_SIDE_ROOK_COL => side.king_side = false,
        QUEEN_SIDE_ROOK_COL => side.queen_side = false,
        _ => {}
    }
}

/// King-and-minor-piece-or-less on both sides: K vs K, K+B vs K, K+N vs K.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut extras = board
        .pieces()
        .filter(|(_, pc)| pc.kind != PieceKind::King)
        .map(|(_, pc)| pc.kind);
    match (extras.next(), extras.next()) {
        (None, _) => true,
        (Some(PieceKind::Bishop | PieceKind::Knight), None) => true,
        _ => false,
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
