//! The ordered game catalog supplied at session start.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

use crate::types::{GameId, GameRecord, GameStatus, GameType};

/// Error building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CatalogError {
    /// Two records share an id.
    #[display("Duplicate game id: {}", _0)]
    DuplicateId(GameId),
}

impl std::error::Error for CatalogError {}

/// Ordered sequence of games with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GameRecord>", into = "Vec<GameRecord>")]
pub struct Catalog {
    games: Vec<GameRecord>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids.
    #[instrument(skip(games), fields(count = games.len()))]
    pub fn new(games: Vec<GameRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for game in &games {
            if !seen.insert(game.id()) {
                warn!(game_id = %game.id(), "Duplicate id in catalog");
                return Err(CatalogError::DuplicateId(game.id().clone()));
            }
        }
        debug!("Catalog built");
        Ok(Self { games })
    }

    /// Builds a catalog without the uniqueness check, for corrupting states in tests.
    #[cfg(test)]
    pub(crate) fn from_unchecked(games: Vec<GameRecord>) -> Self {
        Self { games }
    }

    /// The five-game catalog used for demos and tests.
    pub fn sample() -> Self {
        Self {
            games: vec![
                GameRecord::new("game-1", "科技创新冒险", GameType::TapPlay, GameStatus::Online),
                GameRecord::new("game-2", "文化传承小游戏", GameType::MiniGame, GameStatus::Test),
                GameRecord::new("game-3", "普通游戏", GameType::Other, GameStatus::Online),
                GameRecord::new("game-4", "草稿游戏", GameType::TapPlay, GameStatus::Draft),
                GameRecord::new("game-5", "提审中游戏", GameType::MiniGame, GameStatus::Review),
            ],
        }
    }

    /// All games in catalog order.
    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    /// Iterates games in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, GameRecord> {
        self.games.iter()
    }

    /// Number of games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Returns true if the catalog has no games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Looks up a game by id.
    pub fn get(&self, id: &GameId) -> Option<&GameRecord> {
        self.games.iter().find(|g| g.id() == id)
    }

    /// Games that can be picked for registration now.
    pub fn selectable(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.iter().filter(|g| g.is_selectable())
    }

    /// Games already registered into the campaign.
    pub fn registered(&self) -> impl Iterator<Item = &GameRecord> {
        self.games.iter().filter(|g| g.is_registered())
    }

    /// Returns a copy with the entry of the same id replaced by `record`.
    ///
    /// Order is preserved. An unknown id leaves the catalog unchanged.
    #[instrument(skip(self, record), fields(game_id = %record.id()))]
    pub fn with_record(&self, record: GameRecord) -> Self {
        let mut games = self.games.clone();
        match games.iter_mut().find(|g| g.id() == record.id()) {
            Some(slot) => *slot = record,
            None => warn!("Record not in catalog, nothing replaced"),
        }
        Self { games }
    }
}

impl TryFrom<Vec<GameRecord>> for Catalog {
    type Error = CatalogError;

    fn try_from(games: Vec<GameRecord>) -> Result<Self, Self::Error> {
        Self::new(games)
    }
}

impl From<Catalog> for Vec<GameRecord> {
    fn from(catalog: Catalog) -> Self {
        catalog.games
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a GameRecord;
    type IntoIter = std::slice::Iter<'a, GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.games.iter()
    }
}
