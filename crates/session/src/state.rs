//! The persisted form of a game and its load-time validation.

use chess_core::{
    Board, BoardSnapshot, CastlingRights, Color, Coord, Move, MoveRecord, PieceKind, Position,
};
use serde::{Deserialize, Serialize};

/// Current position plus the move history that led to it.
///
/// This is the JSON shape written under the saved-game key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub castling_rights: CastlingRights,
    pub is_check: bool,
    pub last_move: Option<Move>,
    pub move_history: Vec<MoveRecord>,
}

impl GameState {
    pub fn new() -> Self {
        Self::from_position(&Position::startpos())
    }

    pub fn from_position(pos: &Position) -> Self {
        Self {
            board: pos.board,
            turn: pos.turn,
            castling_rights: pos.castling_rights,
            is_check: pos.in_check(pos.turn),
            last_move: pos.last_move,
            move_history: Vec::new(),
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

    /// Replaces board, turn, castling rights and last move in one step.
    pub(crate) fn set_position(&mut self, pos: &Position) {
        self.board = pos.board;
        self.turn = pos.turn;
        self.castling_rights = pos.castling_rights;
        self.last_move = pos.last_move;
        self.is_check = pos.in_check(pos.turn);
    }

    pub(crate) fn restore(&mut self, snapshot: &BoardSnapshot) {
        self.board = snapshot.board;
        self.turn = snapshot.turn;
        self.castling_rights = snapshot.castling_rights;
        self.last_move = snapshot.last_move;
        self.is_check = snapshot.is_check;
    }

    /// Checks that a deserialized game is playable: one king per side, no
    /// pawn on a back rank and every move inside the board, both for the
    /// current position and for each history snapshot.
    pub fn validate(&self) -> Result<(), String> {
        validate_board(&self.board).map_err(|e| format!("board: {e}"))?;
        if let Some(mv) = &self.last_move {
            validate_move(mv).map_err(|e| format!("lastMove: {e}"))?;
        }
        for (i, rec) in self.move_history.iter().enumerate() {
            validate_move(&rec.mv).map_err(|e| format!("moveHistory[{i}].move: {e}"))?;
            validate_board(&rec.snapshot.board)
                .map_err(|e| format!("moveHistory[{i}].snapshot: {e}"))?;
            if let Some(mv) = &rec.snapshot.last_move {
                validate_move(mv)
                    .map_err(|e| format!("moveHistory[{i}].snapshot.lastMove: {e}"))?;
            }
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_board(board: &Board) -> Result<(), String> {
    for color in [Color::White, Color::Black] {
        let kings = board.count(color, PieceKind::King);
        if kings != 1 {
            return Err(format!("{color:?} has {kings} kings"));
        }
    }
    for (at, pc) in board.pieces() {
        if pc.kind == PieceKind::Pawn && (at.row == 0 || at.row == 7) {
            return Err(format!("pawn on back rank at {at}"));
        }
    }
    Ok(())
}

fn validate_move(mv: &Move) -> Result<(), String> {
    let in_bounds = |c: Coord| c.in_bounds();
    if !in_bounds(mv.from) || !in_bounds(mv.to) {
        return Err(format!(
            "square out of range ({},{}) -> ({},{})",
            mv.from.row, mv.from.col, mv.to.row, mv.to.col
        ));
    }
    match mv.promotion {
        Some(kind) if !kind.is_promotion_target() => Err(format!("cannot promote to {kind:?}")),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
