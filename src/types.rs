use crate::i18n::Language;
use serde::{Deserialize, Serialize};

/// Opaque ID type for roster entries
pub type PlayerId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Setup,
    Configuring,
    AwaitingReady,
    Revealing,
    Debating,
    Finished,
}

impl GamePhase {
    /// Phases in which a round is live and roles are assigned
    pub fn in_round(&self) -> bool {
        matches!(
            self,
            GamePhase::AwaitingReady
                | GamePhase::Revealing
                | GamePhase::Debating
                | GamePhase::Finished
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Impostors,
    Crew,
}

/// Which phase model a session follows.
///
/// `Extended` is the six-phase flow with an explicit configuration step and a
/// "ready" screen before the reveal. `Classic` jumps from the lobby straight
/// into the reveal and needs at least three players.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameVariant {
    #[default]
    Extended,
    Classic,
}

/// How the private reveal order is derived from the roster
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RevealOrderPolicy {
    /// Independent random permutation, so turn order leaks nothing
    #[default]
    Shuffled,
    /// Sorted by name under the session locale (case and accent
    /// insensitive), ties keep roster order
    Alphabetical,
}

/// Rules fixed for the lifetime of a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GameRules {
    pub variant: GameVariant,
    pub reveal_order: RevealOrderPolicy,
    /// Locale used to alphabetize names
    #[serde(default)]
    pub language: Language,
    /// Themes drawn from when no explicit theme is chosen
    pub preset_themes: Vec<String>,
}

impl GameRules {
    /// Players needed before a round can start
    pub fn min_players(&self) -> usize {
        match self.variant {
            GameVariant::Extended => 2,
            GameVariant::Classic => 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_impostor: bool,
    /// Mirrors the round theme for crew members, None for impostors
    pub assigned_theme: Option<String>,
    /// Whether the player has privately viewed their role this round
    pub revealed: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            is_impostor: false,
            assigned_theme: None,
            revealed: false,
        }
    }

    /// Drop everything that only makes sense inside a round
    pub(crate) fn clear_round_fields(&mut self) {
        self.is_impostor = false;
        self.assigned_theme = None;
        self.revealed = false;
    }
}

/// The persisted part of a roster entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedPlayer {
    pub id: PlayerId,
    pub name: String,
}

impl From<&Player> for SavedPlayer {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
        }
    }
}
