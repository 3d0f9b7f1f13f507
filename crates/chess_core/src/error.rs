//! Error types for chess_core

use thiserror::Error;

/// Failure to map a notation string back onto a legal move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("unreadable move text: {0:?}")]
    Malformed(String),

    #[error("no legal move matches {0:?}")]
    NoMatch(String),

    #[error("{0:?} matches more than one legal move")]
    Ambiguous(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 2 FEN fields, found {0}")]
    MissingFields(usize),

    #[error("invalid piece placement: {0:?}")]
    Placement(String),

    #[error("invalid side to move: {0:?}")]
    SideToMove(String),

    #[error("invalid castling field: {0:?}")]
    Castling(String),

    #[error("invalid en-passant square: {0:?}")]
    EnPassant(String),
}
