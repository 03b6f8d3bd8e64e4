use impostor::app::AppState;
use impostor::handlers::{handle_command, handle_json_line};
use impostor::i18n::Language;
use impostor::persistence::{JsonFileStore, MemoryStore, RosterStore};
use impostor::protocol::{Command, Response};
use impostor::random::RngSource;
use impostor::state::Session;
use impostor::types::{GamePhase, GameRules, GameVariant, RevealOrderPolicy, Winner};
use std::collections::HashSet;
use std::sync::Arc;

fn rules(variant: GameVariant) -> GameRules {
    GameRules {
        variant,
        reveal_order: RevealOrderPolicy::Shuffled,
        language: Language::Pt,
        preset_themes: vec!["Animais".to_string(), "Filmes".to_string()],
    }
}

fn new_state(variant: GameVariant, seed: u64) -> AppState {
    AppState::new(
        Session::new(rules(variant)),
        Box::new(RngSource::seeded(seed)),
        Arc::new(MemoryStore::new()),
    )
}

async fn ok(state: &AppState, command: Command) -> Session {
    match handle_command(command.clone(), state).await {
        Response::Session { session } => session,
        other => panic!("{:?} failed: {:?}", command, other),
    }
}

async fn rejected(state: &AppState, command: Command) -> String {
    match handle_command(command.clone(), state).await {
        Response::Error { key, .. } => key,
        other => panic!("{:?} should have been rejected, got {:?}", command, other),
    }
}

async fn add_players(state: &AppState, names: &[&str]) -> Session {
    let mut session = state.snapshot().await;
    for name in names {
        session = ok(
            state,
            Command::AddPlayer {
                name: name.to_string(),
            },
        )
        .await;
    }
    session
}

/// Show every player their role, checking what each one would see
async fn reveal_everyone(state: &AppState) -> Session {
    let mut session = state.snapshot().await;
    let total = session.reveal_order.len();

    for step in 0..total {
        assert_eq!(session.phase, GamePhase::Revealing);
        assert_eq!(session.reveal_cursor, step);

        // Passing on before looking is refused
        assert_eq!(rejected(state, Command::Advance).await, "error.notRevealed");

        session = ok(state, Command::RevealCurrent).await;
        let player = session.current_player().expect("current player").clone();
        assert!(player.revealed);
        if player.is_impostor {
            assert_eq!(player.assigned_theme, None);
        } else {
            assert_eq!(player.assigned_theme.as_deref(), Some(session.theme.as_str()));
        }

        session = ok(state, Command::Advance).await;
    }

    session
}

/// End-to-end test for a complete extended round
#[tokio::test]
async fn test_full_game_flow() {
    let state = new_state(GameVariant::Extended, 11);

    // 1. Lobby: build the roster
    let session = add_players(&state, &["Ana", "Bruno", "Carla", "Davi"]).await;
    assert_eq!(session.phase, GamePhase::Setup);
    assert_eq!(session.roster.len(), 4);
    let ids: HashSet<_> = session.roster.iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids.len(), 4, "Player ids should be unique");

    // Blank names never make it in
    assert_eq!(
        rejected(
            &state,
            Command::AddPlayer {
                name: "   ".to_string()
            }
        )
        .await,
        "error.emptyName"
    );

    // 2. Configure the round
    let session = ok(&state, Command::ProceedToConfig).await;
    assert_eq!(session.phase, GamePhase::Configuring);

    let session = ok(&state, Command::SetImpostorCount { count: 10 }).await;
    assert_eq!(session.impostor_count, 3, "Count is clamped to players - 1");
    let session = ok(&state, Command::SetImpostorCount { count: 2 }).await;
    assert_eq!(session.impostor_count, 2);

    let session = ok(
        &state,
        Command::SetTheme {
            theme: "  Frutas ".to_string(),
        },
    )
    .await;
    assert_eq!(session.theme_choice.as_deref(), Some("Frutas"));

    // 3. Start: roles are assigned and the ready screen is shown
    let session = ok(&state, Command::StartRound).await;
    assert_eq!(session.phase, GamePhase::AwaitingReady);
    assert_eq!(session.theme, "Frutas");
    assert_eq!(session.impostors().len(), 2);
    assert_eq!(session.round_no, 1);

    // Roster edits are locked during a round
    assert_eq!(rejected(&state, Command::ClearAll).await, "error.wrongPhase");

    // 4. Reveal: every player sees their role exactly once
    let session = ok(&state, Command::ConfirmReady).await;
    assert_eq!(session.phase, GamePhase::Revealing);
    let order: HashSet<_> = session.reveal_order.iter().cloned().collect();
    assert_eq!(order, ids, "Reveal order is a permutation of the roster");

    let session = reveal_everyone(&state).await;
    assert_eq!(session.phase, GamePhase::Debating);
    assert!(session.roster.iter().all(|p| p.revealed));
    assert_eq!(
        rejected(&state, Command::RevealCurrent).await,
        "error.wrongPhase"
    );

    // 5. Debate and result
    let session = ok(
        &state,
        Command::DeclareWinner {
            winner: Winner::Impostors,
        },
    )
    .await;
    assert_eq!(session.phase, GamePhase::Finished);
    assert_eq!(session.winner, Some(Winner::Impostors));

    // 6. Back to the lobby keeps the roster but nothing from the round
    let session = ok(&state, Command::ResetToLobby).await;
    assert_eq!(session.phase, GamePhase::Setup);
    assert_eq!(session.roster.len(), 4);
    assert!(session.theme.is_empty());
    assert_eq!(session.theme_choice, None);
    assert_eq!(session.impostor_count, 1);
    assert_eq!(session.winner, None);
    assert!(session
        .roster
        .iter()
        .all(|p| !p.is_impostor && !p.revealed && p.assigned_theme.is_none()));
}

#[tokio::test]
async fn test_play_again_reassigns_roles() {
    let state = new_state(GameVariant::Extended, 99);
    add_players(&state, &["Ana", "Bruno", "Carla"]).await;
    ok(&state, Command::ProceedToConfig).await;
    ok(&state, Command::StartRound).await;
    ok(&state, Command::ConfirmReady).await;
    reveal_everyone(&state).await;
    ok(
        &state,
        Command::DeclareWinner {
            winner: Winner::Crew,
        },
    )
    .await;

    // No explicit theme, so each round draws a preset
    let session = ok(&state, Command::PlayAgain).await;
    assert_eq!(session.phase, GamePhase::AwaitingReady);
    assert_eq!(session.round_no, 2);
    assert_eq!(session.winner, None);
    assert!(session.rules.preset_themes.contains(&session.theme));
    assert_eq!(session.impostors().len(), 1);
    assert!(session.roster.iter().all(|p| !p.revealed));
}

#[tokio::test]
async fn test_classic_flow() {
    let state = new_state(GameVariant::Classic, 5);

    add_players(&state, &["Ana", "Bruno"]).await;
    assert_eq!(
        rejected(&state, Command::StartRound).await,
        "error.notEnoughPlayers"
    );

    add_players(&state, &["Carla"]).await;
    let session = ok(&state, Command::StartRound).await;
    assert_eq!(session.phase, GamePhase::Revealing, "Classic skips the ready screen");
    assert!(session.rules.preset_themes.contains(&session.theme));

    let session = reveal_everyone(&state).await;
    assert_eq!(session.phase, GamePhase::Debating);

    ok(
        &state,
        Command::DeclareWinner {
            winner: Winner::Crew,
        },
    )
    .await;
    let session = ok(&state, Command::PlayAgain).await;
    assert_eq!(session.phase, GamePhase::Revealing);
}

#[tokio::test]
async fn test_rejected_commands_do_not_change_version() {
    let state = new_state(GameVariant::Extended, 1);
    add_players(&state, &["Ana"]).await;
    let before = state.snapshot().await;

    assert_eq!(
        rejected(&state, Command::ProceedToConfig).await,
        "error.notEnoughPlayers"
    );
    assert_eq!(rejected(&state, Command::Advance).await, "error.wrongPhase");
    assert_eq!(
        rejected(
            &state,
            Command::RemovePlayer {
                player_id: "ghost".to_string()
            }
        )
        .await,
        "error.notFound"
    );

    assert_eq!(state.snapshot().await, before);
}

#[tokio::test]
async fn test_alphabetical_reveal_order() {
    let rules = GameRules {
        reveal_order: RevealOrderPolicy::Alphabetical,
        ..rules(GameVariant::Extended)
    };
    let state = AppState::new(
        Session::new(rules),
        Box::new(RngSource::seeded(3)),
        Arc::new(MemoryStore::new()),
    );
    add_players(&state, &["carla", "Álvaro", "Bruno", "ana"]).await;
    ok(&state, Command::ProceedToConfig).await;
    ok(&state, Command::StartRound).await;
    let session = ok(&state, Command::ConfirmReady).await;

    let names: Vec<_> = session
        .reveal_order
        .iter()
        .map(|id| session.player(id).expect("player").name.as_str())
        .collect();
    assert_eq!(names, vec!["Álvaro", "ana", "Bruno", "carla"]);
}

#[tokio::test]
async fn test_roster_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.json");

    let first = AppState::load(
        rules(GameVariant::Extended),
        Box::new(RngSource::seeded(1)),
        Arc::new(JsonFileStore::new(&path)),
    )
    .await;
    add_players(&first, &["Ana", "Bruno", "Carla"]).await;
    let removed = first.snapshot().await.roster[1].id.clone();
    ok(&first, Command::RemovePlayer { player_id: removed }).await;

    // Round state is never saved
    ok(&first, Command::ProceedToConfig).await;
    ok(&first, Command::StartRound).await;

    let second = AppState::load(
        rules(GameVariant::Extended),
        Box::new(RngSource::seeded(2)),
        Arc::new(JsonFileStore::new(&path)),
    )
    .await;
    let session = second.snapshot().await;
    let names: Vec<_> = session.roster.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Carla"]);
    assert_eq!(session.phase, GamePhase::Setup);
    assert!(session.roster.iter().all(|p| !p.is_impostor));

    let stored = JsonFileStore::new(&path).load().await.unwrap();
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn test_corrupt_roster_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.json");
    std::fs::write(&path, "definitely not json").unwrap();

    let state = AppState::load(
        rules(GameVariant::Extended),
        Box::new(RngSource::seeded(1)),
        Arc::new(JsonFileStore::new(&path)),
    )
    .await;
    assert!(state.snapshot().await.roster.is_empty());

    // The next roster edit overwrites the broken file
    add_players(&state, &["Ana"]).await;
    let stored = JsonFileStore::new(&path).load().await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_json_protocol_flow() {
    let state = new_state(GameVariant::Extended, 8);

    for line in [
        r#"{"t":"add_player","name":"Ana"}"#,
        r#"{"t":"add_player","name":"Bruno"}"#,
        r#"{"t":"proceed_to_config"}"#,
        r#"{"t":"set_theme","theme":"Esportes"}"#,
        r#"{"t":"start_round"}"#,
        r#"{"t":"confirm_ready"}"#,
    ] {
        let response = handle_json_line(line, &state).await;
        assert!(
            matches!(response, Response::Session { .. }),
            "{} failed: {:?}",
            line,
            response
        );
    }

    let response = handle_json_line(r#"{"t":"get_session"}"#, &state).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["t"], "session");
    assert_eq!(json["session"]["phase"], "REVEALING");
    assert_eq!(json["session"]["theme"], "Esportes");
    assert_eq!(json["session"]["reveal_order"].as_array().unwrap().len(), 2);

    let response = handle_json_line(r#"{"t":"advance"}"#, &state).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["t"], "error");
    assert_eq!(json["code"], "VALIDATION_FAILED");
    assert_eq!(json["key"], "error.notRevealed");
}
