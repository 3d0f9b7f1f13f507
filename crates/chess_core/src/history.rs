//! Move history records and the draw rules that read them.

use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, Position},
    movegen::has_legal_move,
    rules::{captured_piece, is_insufficient_material},
    types::*,
};

/// Half-moves without a pawn move or capture that make a fifty-move draw.
pub const FIFTY_MOVE_HALFMOVES: usize = 100;

/// Copy of the game state taken immediately before a move is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub board: Board,
    pub turn: Color,
    pub castling_rights: CastlingRights,
    pub is_check: bool,
    pub last_move: Option<Move>,
}

impl BoardSnapshot {
    pub fn capture(pos: &Position, is_check: bool) -> Self {
        BoardSnapshot {
            board: pos.board,
            turn: pos.turn,
            castling_rights: pos.castling_rights,
            is_check,
            last_move: pos.last_move,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            board: self.board,
            turn: self.turn,
            castling_rights: self.castling_rights,
            last_move: self.last_move,
        }
    }
}

/// A committed move: the move, its SAN description and the state before it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    #[serde(rename = "move")]
    pub mv: Move,
    pub description: String,
    pub snapshot: BoardSnapshot,
}

impl MoveRecord {
    pub fn is_pawn_move(&self) -> bool {
        self.snapshot
            .board
            .get(self.mv.from)
            .is_some_and(|pc| pc.kind == PieceKind::Pawn)
    }

    pub fn is_capture(&self) -> bool {
        captured_piece(&self.snapshot.position(), &self.mv).is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Check)
    }

    pub fn is_check(self) -> bool {
        matches!(self, GameStatus::Check | GameStatus::Checkmate { .. })
    }
}

/// Repetition key: the piece layout only. Turn, castling rights and en-passant
/// eligibility are deliberately not part of it.
pub fn position_key(board: &Board) -> String {
    board.placement()
}

/// The current layout has occurred at least three times, counting the
/// current board and every snapshot in `history`.
pub fn is_threefold_repetition(board: &Board, history: &[MoveRecord]) -> bool {
    let key = position_key(board);
    let earlier = history
        .iter()
        .filter(|rec| position_key(&rec.snapshot.board) == key)
        .count();
    earlier + 1 >= 3
}

/// Consecutive half-moves, counted back from the latest, with neither a pawn
/// move nor a capture.
pub fn halfmove_clock(history: &[MoveRecord]) -> usize {
    history
        .iter()
        .rev()
        .take_while(|rec| !rec.is_pawn_move() && !rec.is_capture())
        .count()
}

pub fn is_fifty_move_draw(history: &[MoveRecord]) -> bool {
    halfmove_clock(history) >= FIFTY_MOVE_HALFMOVES
}

/// Classifies `pos`, whose preceding moves are `history`.
pub fn game_status(pos: &Position, history: &[MoveRecord]) -> GameStatus {
    let in_check = pos.in_check(pos.turn);
    if !has_legal_move(pos) {
        return if in_check {
            GameStatus::Checkmate {
                winner: pos.turn.other(),
            }
        } else {
            GameStatus::Stalemate
        };
    }
    if is_insufficient_material(&pos.board) {
        return GameStatus::Draw(DrawReason::InsufficientMaterial);
    }
    if is_threefold_repetition(&pos.board, history) {
        return GameStatus::Draw(DrawReason::ThreefoldRepetition);
    }
    if is_fifty_move_draw(history) {
        return GameStatus::Draw(DrawReason::FiftyMoveRule);
    }
    if in_check {
        GameStatus::Check
    } else {
        GameStatus::Ongoing
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
