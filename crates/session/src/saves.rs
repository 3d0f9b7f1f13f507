//! Named saved games, kept as one JSON list under a single store key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SessionError;
use crate::state::GameState;
use crate::store::KeyValueStore;

pub const SAVED_GAMES_KEY: &str = "savedGames";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    /// Unique within a library
    pub name: String,
    pub date: DateTime<Utc>,
    pub state: GameState,
}

/// Named saves on top of a [`KeyValueStore`].
#[derive(Debug)]
pub struct SaveLibrary<S> {
    store: S,
}

impl<S: KeyValueStore> SaveLibrary<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// All saves in insertion order.
    pub fn list(&self) -> Result<Vec<SavedGame>, SessionError> {
        match self.store.get(SAVED_GAMES_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn get(&self, name: &str) -> Result<Option<SavedGame>, SessionError> {
        Ok(self.list()?.into_iter().find(|g| g.name == name))
    }

    /// Stores `state` under `name`, replacing any save with the same name.
    pub fn save_as(&mut self, name: &str, state: &GameState) -> Result<SavedGame, SessionError> {
        self.save_at(name, state, Utc::now())
    }

    pub fn save_at(
        &mut self,
        name: &str,
        state: &GameState,
        date: DateTime<Utc>,
    ) -> Result<SavedGame, SessionError> {
        let entry = SavedGame {
            name: name.to_string(),
            date,
            state: state.clone(),
        };
        let mut games = self.list()?;
        match games.iter_mut().find(|g| g.name == name) {
            Some(existing) => *existing = entry.clone(),
            None => games.push(entry.clone()),
        }
        self.write(&games)?;
        info!(name, date = %entry.date.to_rfc3339(), "game saved");
        Ok(entry)
    }

    /// Returns whether a save with that name existed.
    pub fn delete(&mut self, name: &str) -> Result<bool, SessionError> {
        let mut games = self.list()?;
        let before = games.len();
        games.retain(|g| g.name != name);
        if games.len() == before {
            return Ok(false);
        }
        self.write(&games)?;
        info!(name, "saved game deleted");
        Ok(true)
    }

    fn write(&mut self, games: &[SavedGame]) -> Result<(), SessionError> {
        let json = serde_json::to_string(games)?;
        self.store.set(SAVED_GAMES_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "saves_tests.rs"]
mod saves_tests;
