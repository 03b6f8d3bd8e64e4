//! Command dispatch
//!
//! Front-ends hand every command to [`handle_command`] and render whatever
//! comes back. No game logic lives here.

use crate::app::AppState;
use crate::protocol::{Command, Response};

/// Handle a command and return the resulting snapshot or error
pub async fn handle_command(command: Command, state: &AppState) -> Response {
    if command == Command::GetSession {
        return Response::Session {
            session: state.snapshot().await,
        };
    }

    match &command {
        Command::AddPlayer { name } => tracing::info!("Adding player {:?}", name.trim()),
        Command::RemovePlayer { player_id } => tracing::info!("Removing player {}", player_id),
        Command::SetImpostorCount { count } => tracing::info!("Setting impostor count to {}", count),
        Command::DeclareWinner { winner } => tracing::info!("Declaring winner: {:?}", winner),
        other => tracing::info!("Handling {}", other.name()),
    }

    match state.apply(&command).await {
        Ok(session) => Response::Session { session },
        Err(e) => {
            tracing::info!("Rejected {}: {}", command.name(), e);
            Response::from(&e)
        }
    }
}

/// Handle one line of JSON input (used by the scripted front-end)
pub async fn handle_json_line(line: &str, state: &AppState) -> Response {
    match serde_json::from_str::<Command>(line) {
        Ok(command) => handle_command(command, state).await,
        Err(e) => {
            tracing::warn!("Malformed command: {}", e);
            Response::bad_request(format!("Malformed command: {}", e))
        }
    }
}
