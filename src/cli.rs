//! Terminal front-end.
//!
//! Two modes share the same [`AppState`]: an interactive, translated screen
//! per phase for people passing a laptop around, and a line-oriented JSON
//! mode (one [`Command`] in, one [`Response`] out) for scripting.

use crate::app::AppState;
use crate::handlers::{handle_command, handle_json_line};
use crate::i18n::Translator;
use crate::protocol::{Command, Response};
use crate::state::Session;
use crate::types::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// ANSI "clear screen and home cursor", so the next player can't scroll back
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[3J\x1b[H";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode response: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a line typed at the prompt means on the current screen
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(Command),
    Help,
    Quit,
    Unknown,
}

/// Turn a typed line into an [`Input`].
///
/// Some words depend on the screen: `next` leaves the lobby in `Setup` but
/// passes the device on during `Revealing`.
pub fn parse_input(session: &Session, line: &str) -> Input {
    let line = line.trim();
    let (word, arg) = match line.split_once(char::is_whitespace) {
        Some((word, arg)) => (word, arg.trim()),
        None => (line, ""),
    };
    let word = word.to_lowercase();

    let command = match (word.as_str(), arg.is_empty()) {
        ("quit" | "q" | "exit", true) => return Input::Quit,
        ("help" | "?", true) => return Input::Help,
        ("add", false) => Command::AddPlayer {
            name: arg.to_string(),
        },
        ("rm" | "remove", false) => match find_player(session, arg) {
            Some(player_id) => Command::RemovePlayer { player_id },
            None => return Input::Unknown,
        },
        ("clear", true) => Command::ClearAll,
        ("next", true) => match session.phase {
            GamePhase::Revealing => Command::Advance,
            _ => Command::ProceedToConfig,
        },
        ("impostors", false) => match arg.parse() {
            Ok(count) => Command::SetImpostorCount { count },
            Err(_) => return Input::Unknown,
        },
        ("theme", false) => Command::SetTheme {
            theme: preset_or_text(session, arg),
        },
        ("random", true) => Command::ClearTheme,
        ("start", true) => Command::StartRound,
        ("ready", true) => Command::ConfirmReady,
        ("show", true) => Command::RevealCurrent,
        ("crew", true) => Command::DeclareWinner {
            winner: Winner::Crew,
        },
        ("impostor" | "impostors" | "impostors-win", true) => Command::DeclareWinner {
            winner: Winner::Impostors,
        },
        ("again", true) => Command::PlayAgain,
        ("lobby", true) => Command::ResetToLobby,
        _ => return Input::Unknown,
    };
    Input::Command(command)
}

/// Resolve a 1-based list number or a name to a player id
fn find_player(session: &Session, arg: &str) -> Option<PlayerId> {
    let player = match arg.parse::<usize>() {
        Ok(n) => n.checked_sub(1).and_then(|i| session.roster.get(i)),
        Err(_) => session
            .roster
            .iter()
            .find(|p| p.name.to_lowercase() == arg.to_lowercase()),
    };
    player.map(|p| p.id.clone())
}

/// A number picks a preset, anything else is a custom theme
fn preset_or_text(session: &Session, arg: &str) -> String {
    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| session.rules.preset_themes.get(i))
        .cloned()
        .unwrap_or_else(|| arg.to_string())
}

/// Command hint line for the current screen
pub fn phase_commands(session: &Session, t: &dyn Translator) -> String {
    let key = match session.phase {
        GamePhase::Setup if session.rules.variant == GameVariant::Classic => {
            "lobby.classicCommands"
        }
        GamePhase::Setup => "lobby.commands",
        GamePhase::Configuring => "config.commands",
        GamePhase::AwaitingReady => "ready.commands",
        GamePhase::Revealing => "reveal.commands",
        GamePhase::Debating => "game.commands",
        GamePhase::Finished => "results.commands",
    };
    t.t(key)
}

/// Draw the screen for the session's phase
pub fn render(session: &Session, t: &dyn Translator) -> String {
    let mut lines = vec![format!("== {} ==", t.t("common.appTitle")), String::new()];

    match session.phase {
        GamePhase::Setup => {
            lines.push(format!("{} ({})", t.t("lobby.heading"), session.roster.len()));
            if session.roster.is_empty() {
                lines.push(format!("  {}", t.t("lobby.emptyState")));
            }
            for (i, player) in session.roster.iter().enumerate() {
                lines.push(format!("  {}. {}", i + 1, player.name));
            }
            lines.push(String::new());
            let min = session.min_players().to_string();
            lines.push(t.translate("lobby.subtitle", &[("min", min.as_str())]));
        }
        GamePhase::Configuring => {
            lines.push(t.t("config.heading"));
            let count = session.impostor_count.to_string();
            let max = session.max_impostors().to_string();
            lines.push(t.translate(
                "config.impostors",
                &[("count", count.as_str()), ("max", max.as_str())],
            ));
            lines.push(match &session.theme_choice {
                Some(theme) => t.translate("config.theme", &[("theme", theme.as_str())]),
                None => t.t("config.randomTheme"),
            });
            lines.push(String::new());
            lines.push(t.t("config.presets"));
            for (i, theme) in session.rules.preset_themes.iter().enumerate() {
                lines.push(format!("  {}. {}", i + 1, theme));
            }
        }
        GamePhase::AwaitingReady => {
            lines.push(t.t("ready.heading"));
            let players = session.roster.len().to_string();
            let impostors = session.impostor_count.to_string();
            lines.push(t.translate(
                "ready.summary",
                &[("players", players.as_str()), ("impostors", impostors.as_str())],
            ));
            lines.push(t.t("ready.instructions"));
        }
        GamePhase::Revealing => render_reveal(session, t, &mut lines),
        GamePhase::Debating => {
            lines.push(t.t("game.inProgress"));
            lines.push(t.t("game.instructions"));
            lines.push(String::new());
            lines.push(t.t("game.whoWon"));
        }
        GamePhase::Finished => {
            let (title, msg) = match session.winner {
                Some(Winner::Impostors) => ("results.impostorWins", "results.impostorWinMsg"),
                _ => ("results.teamWins", "results.teamWinMsg"),
            };
            lines.push(t.t(title));
            lines.push(t.t(msg));
            lines.push(String::new());
            lines.push(t.translate("results.themeWas", &[("theme", session.theme.as_str())]));
            let names = session
                .impostors()
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(t.translate("results.impostorWas", &[("names", names.as_str())]));
        }
    }

    lines.push(String::new());
    lines.push(phase_commands(session, t));
    lines.join("\n")
}

/// The private part: only the current player's role, and only after `show`
fn render_reveal(session: &Session, t: &dyn Translator, lines: &mut Vec<String>) {
    let Some(player) = session.current_player() else {
        return;
    };

    let current = (session.reveal_cursor + 1).to_string();
    let total = session.reveal_order.len().to_string();
    lines.push(t.translate(
        "reveal.stepOf",
        &[("current", current.as_str()), ("total", total.as_str())],
    ));
    lines.push(String::new());

    if !player.revealed {
        lines.push(t.translate("reveal.whoHasPhone", &[("name", player.name.as_str())]));
        lines.push(t.translate("reveal.tapToReveal", &[("name", player.name.as_str())]));
        return;
    }

    if player.is_impostor {
        lines.push(t.t("reveal.impostor"));
        lines.push(t.t("reveal.impostorHint"));
    } else {
        let theme = player.assigned_theme.as_deref().unwrap_or(&session.theme);
        lines.push(t.translate("reveal.themeIs", &[("theme", theme)]));
        lines.push(t.t("reveal.teamHint"));
    }
    lines.push(String::new());
    if session.reveal_cursor + 1 < session.reveal_order.len() {
        lines.push(t.t("reveal.nextPlayer"));
    } else {
        lines.push(t.t("reveal.startGame"));
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> Result<(), CliError> {
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Interactive loop: render, prompt, apply, repeat until `quit` or EOF
pub async fn run_interactive<R, W>(
    state: &AppState,
    t: &dyn Translator,
    reader: R,
    mut writer: W,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut screen = render(&state.snapshot().await, t);

    loop {
        write_line(&mut writer, &screen).await?;
        writer.write_all(b"> ").await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let session = state.snapshot().await;
        let command = match parse_input(&session, &line) {
            Input::Quit => {
                if session.phase == GamePhase::Revealing {
                    writer.write_all(CLEAR_SCREEN.as_bytes()).await?;
                }
                write_line(&mut writer, &t.t("common.bye")).await?;
                return Ok(());
            }
            Input::Help => {
                let help = format!("{}\n  {}", t.t("common.help"), phase_commands(&session, t));
                write_line(&mut writer, &help).await?;
                continue;
            }
            Input::Unknown => {
                write_line(&mut writer, &t.t("common.unknownCommand")).await?;
                continue;
            }
            Input::Command(command) => command,
        };

        // Any successful command other than `show` moves past a shown role
        let hides_role = session.phase == GamePhase::Revealing
            && !matches!(command, Command::RevealCurrent);
        match handle_command(command, state).await {
            Response::Session { session } => {
                if hides_role {
                    writer.write_all(CLEAR_SCREEN.as_bytes()).await?;
                }
                screen = render(&session, t);
            }
            Response::Error { key, .. } => {
                write_line(&mut writer, &format!("! {}", t.t(&key))).await?;
            }
        }
    }

    Ok(())
}

/// Scripted loop: one JSON command per line in, one JSON response per line out
pub async fn run_json<R, W>(state: &AppState, reader: R, mut writer: W) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_json_line(&line, state).await;
        write_line(&mut writer, &serde_json::to_string(&response)?).await?;
    }
    Ok(())
}
