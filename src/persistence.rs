//! Roster persistence.
//!
//! Only `{id, name}` pairs are stored; round fields are ephemeral and never
//! hit the disk. The app treats every store failure as "no saved roster".

use crate::types::SavedPlayer;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Schema version for the roster file
pub const ROSTER_SCHEMA_VERSION: u32 = 1;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid roster file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Roster schema version {0} is newer than supported version {max}", max = ROSTER_SCHEMA_VERSION)]
    UnsupportedSchema(u32),
}

/// On-disk roster layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    pub schema_version: u32,
    /// Save timestamp (ISO8601)
    pub saved_at: String,
    pub players: Vec<SavedPlayer>,
}

impl RosterFile {
    pub fn new(players: Vec<SavedPlayer>) -> Self {
        Self {
            schema_version: ROSTER_SCHEMA_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            players,
        }
    }
}

/// Accepts both the versioned file and a bare array of players
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRoster {
    Versioned(RosterFile),
    Bare(Vec<SavedPlayer>),
}

/// Parse roster file contents
pub fn parse_roster(json: &str) -> StoreResult<Vec<SavedPlayer>> {
    match serde_json::from_str::<StoredRoster>(json)? {
        StoredRoster::Versioned(file) if file.schema_version > ROSTER_SCHEMA_VERSION => {
            Err(StoreError::UnsupportedSchema(file.schema_version))
        }
        StoredRoster::Versioned(file) => Ok(file.players),
        StoredRoster::Bare(players) => Ok(players),
    }
}

/// Where the roster survives app restarts
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Saved roster, empty when nothing was saved yet
    async fn load(&self) -> StoreResult<Vec<SavedPlayer>>;

    async fn save(&self, players: &[SavedPlayer]) -> StoreResult<()>;

    /// Get the name of this store
    fn name(&self) -> &str;
}

/// Roster kept in a JSON file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RosterStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Vec<SavedPlayer>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        parse_roster(&contents)
    }

    async fn save(&self, players: &[SavedPlayer]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(&RosterFile::new(players.to_vec()))?;

        // Write then rename so a crash never leaves a half-written roster
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json-file"
    }
}

/// In-memory store, for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStore {
    players: RwLock<Vec<SavedPlayer>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(players: Vec<SavedPlayer>) -> Self {
        Self {
            players: RwLock::new(players),
        }
    }
}

#[async_trait]
impl RosterStore for MemoryStore {
    async fn load(&self) -> StoreResult<Vec<SavedPlayer>> {
        Ok(self.players.read().await.clone())
    }

    async fn save(&self, players: &[SavedPlayer]) -> StoreResult<()> {
        *self.players.write().await = players.to_vec();
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
