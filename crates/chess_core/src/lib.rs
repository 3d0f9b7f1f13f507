pub mod board;
pub mod error;
pub mod eval;
pub mod fen;
pub mod history;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod rules;
pub mod time_control;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::{FenError, NotationError};
pub use fen::to_fen;
pub use history::*;
pub use movegen::*;
pub use notation::{CheckState, check_state_after, parse_san, to_algebraic};
pub use perft::perft;
pub use rules::{
    apply_move, captured_piece, is_insufficient_material, is_king_in_check, is_legal_move,
};
pub use time_control::*;
pub use types::*;

// =============================================================================
// Engine trait: implemented by every computer-player tier
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The move chosen (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score in the engine's own units; 0 for tiers that do not score
    pub score: i32,
    /// Search depth reached
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether search was stopped early by the time control
    pub stopped: bool,
}

impl SearchResult {
    /// Result for a position with no legal move.
    pub fn none() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        }
    }

    /// A move picked without look-ahead.
    pub fn instant(best_move: Move) -> Self {
        Self {
            best_move: Some(best_move),
            ..Self::none()
        }
    }
}

/// Trait that all computer players implement.
///
/// The session selects an implementation per side from its difficulty
/// settings and only ever talks to it through this trait.
pub trait Engine: Send {
    /// Choose a move for the side to move in `pos`.
    ///
    /// Engines that do not look ahead ignore `limits` except for the stop flag.
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult;

    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
