use super::{GameError, GameResult, Session, ValidationError};
use crate::types::*;
use std::collections::HashSet;

/// Rebuild roster entries from persisted data.
///
/// Names are trimmed; blank names and repeated ids are dropped so the
/// roster invariants hold no matter what was on disk.
pub(super) fn restore(saved: Vec<SavedPlayer>) -> Vec<Player> {
    let mut seen = HashSet::new();
    let mut roster = Vec::with_capacity(saved.len());

    for entry in saved {
        let name = entry.name.trim();
        if name.is_empty() || entry.id.is_empty() {
            tracing::warn!("Skipping saved player with empty name or id");
            continue;
        }
        if !seen.insert(entry.id.clone()) {
            tracing::warn!("Skipping saved player with duplicate id {}", entry.id);
            continue;
        }
        roster.push(Player::new(entry.id, name.to_string()));
    }

    roster
}

impl Session {
    /// Append a player. Returns the fresh id.
    pub fn add_player(&mut self, name: &str) -> GameResult<PlayerId> {
        self.expect_phase("add_player", &[GamePhase::Setup])?;

        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        // Roster ids must stay unique
        let id = loop {
            let candidate = ulid::Ulid::new().to_string();
            if self.player(&candidate).is_none() {
                break candidate;
            }
        };

        self.roster.push(Player::new(id.clone(), name.to_string()));
        tracing::debug!("Added player {} ({})", name, id);
        Ok(id)
    }

    /// Remove a player by id
    pub fn remove_player(&mut self, player_id: &str) -> GameResult<Player> {
        self.expect_phase("remove_player", &[GamePhase::Setup])?;

        let index = self
            .roster
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| GameError::NotFound(player_id.to_string()))?;

        let player = self.roster.remove(index);
        self.clamp_impostor_count();
        tracing::debug!("Removed player {} ({})", player.name, player.id);
        Ok(player)
    }

    /// Empty the roster
    pub fn clear_all(&mut self) -> GameResult<()> {
        self.expect_phase("clear_all", &[GamePhase::Setup])?;
        self.roster.clear();
        self.clamp_impostor_count();
        Ok(())
    }

    /// Leave the lobby for the configuration screen
    pub fn proceed_to_config(&mut self) -> GameResult<()> {
        self.expect_phase("proceed_to_config", &[GamePhase::Setup])?;

        if self.roster.len() < 2 {
            return Err(ValidationError::NotEnoughPlayers {
                required: 2,
                actual: self.roster.len(),
            }
            .into());
        }

        self.clamp_impostor_count();
        self.set_phase(GamePhase::Configuring);
        Ok(())
    }
}
