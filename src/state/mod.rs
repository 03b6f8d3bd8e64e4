mod game;
mod reveal;
mod roster;
mod round;
mod setup;

pub use game::is_valid_phase_transition;
pub use reveal::compare_names;

use crate::protocol::Command;
use crate::random::RandomSource;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Result type for session commands
pub type GameResult<T> = Result<T, GameError>;

/// Why a command was rejected. A rejected command never mutates the session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Player not found: {0}")]
    NotFound(PlayerId),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Player name cannot be empty")]
    EmptyName,

    #[error("At least {required} players are required, roster has {actual}")]
    NotEnoughPlayers { required: usize, actual: usize },

    #[error("Theme cannot be empty")]
    EmptyTheme,

    #[error("No theme chosen and no preset themes available")]
    NoThemeAvailable,

    #[error("{command} is not allowed during {phase:?}")]
    WrongPhase {
        command: &'static str,
        phase: GamePhase,
    },

    #[error("Current player has not seen their role yet")]
    NotRevealed,

    #[error("Every player has already seen their role")]
    RevealComplete,
}

impl GameError {
    /// Stable machine-readable error class
    pub fn code(&self) -> &'static str {
        match self {
            GameError::Validation(_) => "VALIDATION_FAILED",
            GameError::NotFound(_) => "NOT_FOUND",
        }
    }

    /// Translation key for a user-facing message
    pub fn key(&self) -> &'static str {
        match self {
            GameError::NotFound(_) => "error.notFound",
            GameError::Validation(v) => match v {
                ValidationError::EmptyName => "error.emptyName",
                ValidationError::NotEnoughPlayers { .. } => "error.notEnoughPlayers",
                ValidationError::EmptyTheme => "error.emptyTheme",
                ValidationError::NoThemeAvailable => "error.noThemeAvailable",
                ValidationError::WrongPhase { .. } => "error.wrongPhase",
                ValidationError::NotRevealed => "error.notRevealed",
                ValidationError::RevealComplete => "error.revealComplete",
            },
        }
    }
}

/// The whole mutable state of one pass-the-phone session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Bumped on every accepted command
    pub version: u64,
    pub rules: GameRules,
    /// Insertion order is the display order
    pub roster: Vec<Player>,
    pub impostor_count: usize,
    /// Explicit theme (preset or custom). None means "draw a preset".
    pub theme_choice: Option<String>,
    /// Theme of the active round, empty outside a round
    pub theme: String,
    pub phase: GamePhase,
    /// Number of role assignments so far
    pub round_no: u32,
    pub reveal_order: Vec<PlayerId>,
    pub reveal_cursor: usize,
    pub winner: Option<Winner>,
}

impl Session {
    pub fn new(rules: GameRules) -> Self {
        Self {
            version: 1,
            rules,
            roster: Vec::new(),
            impostor_count: 1,
            theme_choice: None,
            theme: String::new(),
            phase: GamePhase::Setup,
            round_no: 0,
            reveal_order: Vec::new(),
            reveal_cursor: 0,
            winner: None,
        }
    }

    /// Start a session from a persisted roster
    pub fn with_roster(rules: GameRules, saved: Vec<SavedPlayer>) -> Self {
        let mut session = Self::new(rules);
        session.roster = roster::restore(saved);
        session
    }

    /// Apply one command to a copy of this session.
    ///
    /// On success the new session is returned with its version bumped; on
    /// failure `self` is untouched and nothing is returned.
    pub fn apply(&self, command: &Command, random: &mut dyn RandomSource) -> GameResult<Session> {
        let mut next = self.clone();
        match command {
            Command::GetSession => return Ok(next),
            Command::AddPlayer { name } => next.add_player(name).map(|_| ())?,
            Command::RemovePlayer { player_id } => next.remove_player(player_id).map(|_| ())?,
            Command::ClearAll => next.clear_all()?,
            Command::ProceedToConfig => next.proceed_to_config()?,
            Command::SetImpostorCount { count } => next.set_impostor_count(*count).map(|_| ())?,
            Command::SetTheme { theme } => next.set_theme(theme)?,
            Command::ClearTheme => next.clear_theme()?,
            Command::StartRound => next.start_round(random)?,
            Command::ConfirmReady => next.confirm_ready(random)?,
            Command::RevealCurrent => next.reveal_current().map(|_| ())?,
            Command::Advance => next.advance()?,
            Command::DeclareWinner { winner } => next.declare_winner(*winner)?,
            Command::PlayAgain => next.play_again(random)?,
            Command::ResetToLobby => next.reset_to_lobby()?,
        }
        next.version += 1;
        Ok(next)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }

    /// Players holding the impostor role this round
    pub fn impostors(&self) -> Vec<&Player> {
        self.roster.iter().filter(|p| p.is_impostor).collect()
    }

    pub fn min_players(&self) -> usize {
        self.rules.min_players()
    }

    /// Upper bound for `impostor_count` given the current roster
    pub fn max_impostors(&self) -> usize {
        self.roster.len().saturating_sub(1).max(1)
    }

    pub(crate) fn clamp_impostor_count(&mut self) {
        self.impostor_count = self.impostor_count.clamp(1, self.max_impostors());
    }

    /// Reject the command unless the session is in one of `allowed`
    pub(crate) fn expect_phase(
        &self,
        command: &'static str,
        allowed: &[GamePhase],
    ) -> GameResult<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(ValidationError::WrongPhase {
                command,
                phase: self.phase,
            }
            .into())
        }
    }

    /// Wipe everything scoped to a single round
    pub(crate) fn clear_round(&mut self) {
        for player in &mut self.roster {
            player.clear_round_fields();
        }
        self.theme.clear();
        self.reveal_order.clear();
        self.reveal_cursor = 0;
        self.winner = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameRules::default())
    }
}
