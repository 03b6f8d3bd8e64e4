use crate::state::{GameError, Session};
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Everything a front-end can ask of the session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum Command {
    /// Read-only snapshot query
    GetSession,
    // Lobby
    AddPlayer {
        name: String,
    },
    RemovePlayer {
        player_id: PlayerId,
    },
    ClearAll,
    ProceedToConfig,
    // Round settings
    SetImpostorCount {
        count: i64,
    },
    SetTheme {
        theme: String,
    },
    /// Switch back to a random preset theme
    ClearTheme,
    StartRound,
    // Round flow
    ConfirmReady,
    RevealCurrent,
    Advance,
    DeclareWinner {
        winner: Winner,
    },
    PlayAgain,
    ResetToLobby,
}

impl Command {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetSession => "get_session",
            Command::AddPlayer { .. } => "add_player",
            Command::RemovePlayer { .. } => "remove_player",
            Command::ClearAll => "clear_all",
            Command::ProceedToConfig => "proceed_to_config",
            Command::SetImpostorCount { .. } => "set_impostor_count",
            Command::SetTheme { .. } => "set_theme",
            Command::ClearTheme => "clear_theme",
            Command::StartRound => "start_round",
            Command::ConfirmReady => "confirm_ready",
            Command::RevealCurrent => "reveal_current",
            Command::Advance => "advance",
            Command::DeclareWinner { .. } => "declare_winner",
            Command::PlayAgain => "play_again",
            Command::ResetToLobby => "reset_to_lobby",
        }
    }

    /// Whether a successful run of this command changes the saved roster
    pub fn touches_roster(&self) -> bool {
        matches!(
            self,
            Command::AddPlayer { .. } | Command::RemovePlayer { .. } | Command::ClearAll
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum Response {
    Session {
        session: Session,
    },
    Error {
        code: String,
        /// Translation key for the front-end
        key: String,
        msg: String,
    },
}

impl Response {
    /// Error for input that could not be turned into a command at all
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Response::Error {
            code: "BAD_REQUEST".to_string(),
            key: "common.unknownCommand".to_string(),
            msg: msg.into(),
        }
    }
}

impl From<&GameError> for Response {
    fn from(err: &GameError) -> Self {
        Response::Error {
            code: err.code().to_string(),
            key: err.key().to_string(),
            msg: err.to_string(),
        }
    }
}
