//! Error types for game_session

use chess_core::Move;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("illegal move {0:?}")]
    IllegalMove(Move),

    #[error("the game is over")]
    GameOver,

    #[error("a promotion piece must be chosen")]
    PromotionRequired,

    #[error("no promotion is pending")]
    NoPendingPromotion,

    #[error("saved game rejected: {0}")]
    MalformedState(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to write settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
