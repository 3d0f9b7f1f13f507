//! Game Session
//!
//! Drives one game for an interactive host: square selection and promotion
//! choice, undo/redo, computer turns at three difficulty levels, autosave and
//! named saves over a key-value store, TOML settings and an optional external
//! move-suggestion service.

pub mod error;
pub mod saves;
pub mod session;
pub mod settings;
pub mod state;
pub mod store;
pub mod suggestion;

pub use error::{SessionError, SettingsError, StoreError};
pub use saves::{SaveLibrary, SavedGame, SAVED_GAMES_KEY};
pub use session::{GameSession, Selection, SAVE_KEY};
pub use settings::{Difficulty, GameMode, GameSettings, HardSettings, SuggestionSettings};
pub use state::GameState;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use suggestion::{
    parse_suggestion_text, MoveSuggester, SuggestedMove, Suggestion, SuggestionError,
    SuggestionRequest,
};
