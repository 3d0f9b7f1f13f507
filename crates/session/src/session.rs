//! Interactive game controller: square selection, move commits, undo/redo,
//! computer turns and persistence.

use chess_core::{
    apply_move, check_state_after, game_status, is_legal_move, legal_moves_from, parse_san,
    to_algebraic, to_fen, BoardSnapshot, Coord, Engine, GameStatus, Move, MoveRecord, PieceKind,
    Position, SearchLimits,
};
use greedy_engine::GreedyEngine;
use minimax_engine::MinimaxEngine;
use tactical_engine::TacticalEngine;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::settings::{Difficulty, GameSettings};
use crate::state::GameState;
use crate::store::KeyValueStore;
use crate::suggestion::{MoveSuggester, SuggestedMove, SuggestionRequest};

/// Store key of the autosaved game.
pub const SAVE_KEY: &str = "chessGameState";

/// Outcome of clicking a square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// An own piece is now selected; these are the squares it can reach.
    Selected { from: Coord, destinations: Vec<Coord> },
    /// The selected piece moved.
    Moved(MoveRecord),
    /// The selected pawn reaches the last rank; call
    /// [`GameSession::choose_promotion`] or [`GameSession::cancel_promotion`].
    PromotionRequired { from: Coord, to: Coord },
    Cleared,
}

pub struct GameSession {
    state: GameState,
    redo_stack: Vec<MoveRecord>,
    selected: Option<Coord>,
    pending_promotion: Option<(Coord, Coord)>,
    status: GameStatus,
    settings: GameSettings,
    greedy: GreedyEngine,
    tactical: TacticalEngine,
    minimax: MinimaxEngine,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

impl GameSession {
    pub fn new(settings: GameSettings) -> Self {
        let settings = settings.normalized();
        let minimax = MinimaxEngine::new(settings.hard.use_alpha_beta);
        Self {
            state: GameState::new(),
            redo_stack: Vec::new(),
            selected: None,
            pending_promotion: None,
            status: GameStatus::Ongoing,
            settings,
            greedy: GreedyEngine::new(),
            tactical: TacticalEngine::new(),
            minimax,
        }
    }

    /// Back to the standard start with an empty history.
    pub fn reset(&mut self) {
        self.replace_state(GameState::new());
        self.greedy.new_game();
        self.tactical.new_game();
        self.minimax.new_game();
        info!("new game");
    }

    pub fn position(&self) -> Position {
        self.state.position()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.state.move_history
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn pending_promotion(&self) -> Option<(Coord, Coord)> {
        self.pending_promotion
    }

    pub fn fen(&self) -> String {
        to_fen(&self.position(), self.history())
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: GameSettings) {
        self.settings = settings.normalized();
        self.minimax.set_alpha_beta(self.settings.hard.use_alpha_beta);
    }

    /// Squares the piece on `from` can legally move to. Promotion choices
    /// share a destination and appear once.
    pub fn legal_destinations(&self, from: Coord) -> Vec<Coord> {
        let mut squares: Vec<Coord> = legal_moves_from(&self.position(), from)
            .into_iter()
            .map(|mv| mv.to)
            .collect();
        squares.dedup();
        squares
    }

    /// Handles a click on `at`.
    ///
    /// An own piece becomes the selection. With a piece selected, one of its
    /// destinations moves it (or asks for a promotion piece). Anything else
    /// clears the selection.
    pub fn select_square(&mut self, at: Coord) -> Selection {
        self.pending_promotion = None;
        if self.status.is_over() {
            self.selected = None;
            return Selection::Cleared;
        }

        let pos = self.position();
        if let Some(pc) = pos.piece_at(at) {
            if pc.color == pos.turn {
                self.selected = Some(at);
                return Selection::Selected {
                    from: at,
                    destinations: self.legal_destinations(at),
                };
            }
        }

        let Some(from) = self.selected.take() else {
            return Selection::Cleared;
        };
        let moves: Vec<Move> = legal_moves_from(&pos, from)
            .into_iter()
            .filter(|mv| mv.to == at)
            .collect();
        match moves.as_slice() {
            [] => Selection::Cleared,
            [mv, ..] if mv.promotion.is_some() => {
                self.selected = Some(from);
                self.pending_promotion = Some((from, at));
                Selection::PromotionRequired { from, to: at }
            }
            [mv, ..] => match self.attempt_move(*mv) {
                Ok(record) => Selection::Moved(record),
                Err(_) => Selection::Cleared,
            },
        }
    }

    /// Resolves a pending promotion with `kind`.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> Result<MoveRecord, SessionError> {
        let (from, to) = self
            .pending_promotion
            .ok_or(SessionError::NoPendingPromotion)?;
        let record = self.attempt_move(Move::with_promotion(from, to, kind))?;
        self.pending_promotion = None;
        Ok(record)
    }

    pub fn cancel_promotion(&mut self) {
        self.pending_promotion = None;
        self.selected = None;
    }

    /// Plays `mv` for the side to move.
    ///
    /// A pawn move to the last rank without a promotion piece is rejected
    /// with [`SessionError::PromotionRequired`]. Nothing changes on error.
    pub fn attempt_move(&mut self, mv: Move) -> Result<MoveRecord, SessionError> {
        if self.status.is_over() {
            return Err(SessionError::GameOver);
        }
        let pos = self.position();
        if !is_legal_move(&pos, &mv) {
            let as_queen = Move::with_promotion(mv.from, mv.to, PieceKind::Queen);
            if mv.promotion.is_none() && is_legal_move(&pos, &as_queen) {
                return Err(SessionError::PromotionRequired);
            }
            return Err(SessionError::IllegalMove(mv));
        }
        self.redo_stack.clear();
        Ok(self.commit(mv))
    }

    /// Applies a legal move: snapshot, successor position, status, SAN and
    /// history record, in that order.
    fn commit(&mut self, mv: Move) -> MoveRecord {
        let before = self.position();
        let snapshot = BoardSnapshot::capture(&before, self.state.is_check);
        let next = apply_move(&before, &mv);
        self.state.set_position(&next);

        let description = to_algebraic(&before, &mv, check_state_after(&before, &mv));
        let record = MoveRecord {
            mv,
            description,
            snapshot,
        };
        self.state.move_history.push(record.clone());
        self.selected = None;
        self.pending_promotion = None;
        self.update_status();

        debug!(
            ply = self.state.move_history.len(),
            san = %record.description,
            "move committed"
        );
        record
    }

    fn update_status(&mut self) {
        let previous = self.status;
        self.status = game_status(&self.position(), &self.state.move_history);
        if self.status.is_over() && !previous.is_over() {
            info!(status = ?self.status, plies = self.history().len(), "game over");
        }
    }

    /// Takes back the last move. The record moves onto the redo stack.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.state.move_history.pop()?;
        self.state.restore(&record.snapshot);
        self.redo_stack.push(record.clone());
        self.selected = None;
        self.pending_promotion = None;
        self.update_status();
        Some(record)
    }

    /// Replays the most recently undone move, keeping the rest of the redo
    /// stack.
    pub fn redo(&mut self) -> Option<MoveRecord> {
        let undone = self.redo_stack.pop()?;
        if !is_legal_move(&self.position(), &undone.mv) {
            warn!(san = %undone.description, "redo move no longer legal");
            self.redo_stack.clear();
            return None;
        }
        Some(self.commit(undone.mv))
    }

    /// True when the side to move is played by the computer and the game
    /// is still running.
    pub fn is_computer_turn(&self) -> bool {
        !self.status.is_over() && self.settings.is_computer(self.state.turn)
    }

    /// Lets the configured engine move for the side to move.
    pub fn play_computer_move(&mut self) -> Option<MoveRecord> {
        if !self.is_computer_turn() {
            return None;
        }
        let pos = self.position();
        let level = self.settings.level_for(pos.turn);
        let result = match level {
            Difficulty::Easy => self.greedy.search(&pos, SearchLimits::depth(1)),
            Difficulty::Medium => self.tactical.search(&pos, SearchLimits::depth(1)),
            Difficulty::Hard => {
                let limits = SearchLimits::depth(self.settings.hard.depth());
                self.minimax.search(&pos, limits)
            }
        };
        debug!(
            ?level,
            score = result.score,
            depth = result.depth,
            nodes = result.nodes,
            "computer search"
        );

        self.play_engine_move(result.best_move?)
    }

    /// Engine moves take the same validation path as human moves.
    fn play_engine_move(&mut self, mv: Move) -> Option<MoveRecord> {
        match self.attempt_move(mv) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "engine proposed an unplayable move");
                None
            }
        }
    }

    /// Writes the current game under [`SAVE_KEY`].
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), SessionError> {
        let json = serde_json::to_string(&self.state)?;
        store.set(SAVE_KEY, &json)?;
        info!(plies = self.history().len(), "game saved");
        Ok(())
    }

    /// Restores the game saved under [`SAVE_KEY`].
    ///
    /// Returns `Ok(false)` when nothing is saved. The live game only changes
    /// once the saved state has parsed and validated.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> Result<bool, SessionError> {
        let Some(json) = store.get(SAVE_KEY)? else {
            return Ok(false);
        };
        let state: GameState = serde_json::from_str(&json).map_err(|e| {
            warn!(error = %e, "saved game is not readable");
            SessionError::from(e)
        })?;
        self.restore(state)?;
        Ok(true)
    }

    pub fn clear_saved(&self, store: &mut dyn KeyValueStore) -> Result<(), SessionError> {
        store.remove(SAVE_KEY)?;
        Ok(())
    }

    /// Replaces the live game with `state` after validating it.
    pub fn restore(&mut self, state: GameState) -> Result<(), SessionError> {
        if let Err(reason) = state.validate() {
            warn!(%reason, "saved game rejected");
            return Err(SessionError::MalformedState(reason));
        }
        let plies = state.move_history.len();
        self.replace_state(state);
        info!(plies, "game loaded");
        Ok(())
    }

    fn replace_state(&mut self, mut state: GameState) {
        state.is_check = state.position().in_check(state.turn);
        self.state = state;
        self.redo_stack.clear();
        self.selected = None;
        self.pending_promotion = None;
        self.status = game_status(&self.position(), &self.state.move_history);
    }

    /// Asks `suggester` for a move in the current position.
    ///
    /// Every failure, from a missing API key to a reply that names no legal
    /// move, is logged and yields `None`.
    pub fn suggest(&self, suggester: &dyn MoveSuggester) -> Option<SuggestedMove> {
        if !self.settings.suggestion.is_configured() {
            warn!("move suggestion requested without an API key and model");
            return None;
        }
        let request = SuggestionRequest {
            fen: self.fen(),
            api_key: self.settings.suggestion.api_key.clone(),
            model: self.settings.suggestion.model.clone(),
        };
        let suggestion = match suggester.suggest(&request) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "move suggestion failed");
                return None;
            }
        };
        match parse_san(&self.position(), &suggestion.mv) {
            Ok(mv) => Some(SuggestedMove {
                mv,
                san: suggestion.mv,
                explain: suggestion.explain,
            }),
            Err(e) => {
                warn!(error = %e, "suggested move does not fit the position");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
