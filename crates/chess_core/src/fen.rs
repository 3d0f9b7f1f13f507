//! FEN-like export of a game, plus a lenient reader for setting up positions.
//!
//! Export is one-directional in spirit: the reader exists so tests and tools
//! can describe positions compactly, and it is not an authoritative parser.

use crate::{
    board::{Board, Position},
    error::FenError,
    history::{MoveRecord, halfmove_clock},
    notation::parse_square,
    types::*,
};

/// FEN string for `pos`, reached from the standard start through `history`.
pub fn to_fen(pos: &Position, history: &[MoveRecord]) -> String {
    let turn = match pos.turn {
        Color::White => 'w',
        Color::Black => 'b',
    };
    let en_passant = en_passant_target(pos)
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} {} {} {} {} {}",
        pos.board.placement(),
        turn,
        castling_field(&pos.castling_rights),
        en_passant,
        halfmove_clock(history),
        1 + history.len() / 2
    )
}

fn castling_field(rights: &CastlingRights) -> String {
    let mut s = String::new();
    if rights.white.king_side {
        s.push('K');
    }
    if rights.white.queen_side {
        s.push('Q');
    }
    if rights.black.king_side {
        s.push('k');
    }
    if rights.black.queen_side {
        s.push('q');
    }
    if s.is_empty() {
        s.push('-');
    }
    s
}

/// Square passed over by a two-square pawn advance in `last_move`.
pub fn en_passant_target(pos: &Position) -> Option<Coord> {
    let last = pos.last_move?;
    let pc = pos.board.get(last.to)?;
    if pc.kind != PieceKind::Pawn || last.from.col != last.to.col || last.row_delta().abs() != 2 {
        return None;
    }
    Some(Coord::new((last.from.row + last.to.row) / 2, last.to.col))
}

impl Position {
    /// Reads placement, side to move, castling and en-passant fields. Clock
    /// fields are accepted and ignored. An en-passant square is turned back
    /// into the two-square advance that produced it.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let board = Board::from_placement(parts[0])
            .ok_or_else(|| FenError::Placement(parts[0].to_string()))?;

        let turn = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let mut castling_rights = CastlingRights::NONE;
        let castle_part = parts.get(2).copied().unwrap_or("-");
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling_rights.white.king_side = true,
                    'Q' => castling_rights.white.queen_side = true,
                    'k' => castling_rights.black.king_side = true,
                    'q' => castling_rights.black.queen_side = true,
                    _ => return Err(FenError::Castling(castle_part.to_string())),
                }
            }
        }

        let ep_part = parts.get(3).copied().unwrap_or("-");
        let last_move = if ep_part == "-" {
            None
        } else {
            let target =
                parse_square(ep_part).ok_or_else(|| FenError::EnPassant(ep_part.to_string()))?;
            // The pawn that just advanced belongs to the side not on move.
            let mover = turn.other();
            let dir = mover.forward();
            let from = target.offset(-dir, 0);
            let to = target.offset(dir, 0);
            match (from, to) {
                (Some(from), Some(to)) => Some(Move::new(from, to)),
                _ => return Err(FenError::EnPassant(ep_part.to_string())),
            }
        };

        Ok(Position {
            board,
            turn,
            castling_rights,
            last_move,
        })
    }
}

#[cfg(test)]
#[path = "fen_tests.rs"]
mod fen_tests;
