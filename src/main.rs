use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use impostor::{
    app::AppState,
    cli,
    config::AppConfig,
    i18n::Catalog,
    persistence::JsonFileStore,
    random::{RandomSource, RngSource},
};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // stdout belongs to the game screen and JSON responses
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "impostor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let json_mode = std::env::args().skip(1).any(|arg| arg == "--json");
    tracing::info!(json_mode, "Starting impostor...");

    let config = AppConfig::from_env();

    let random: Box<dyn RandomSource> = match config.seed {
        Some(seed) => {
            tracing::info!("Using fixed seed {}", seed);
            Box::new(RngSource::seeded(seed))
        }
        None => Box::new(RngSource::from_entropy()),
    };
    let store = Arc::new(JsonFileStore::new(config.roster_path.clone()));
    let state = AppState::load(config.rules(), random, store).await;

    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();
    let result = if json_mode {
        cli::run_json(&state, input, output).await
    } else {
        let translator = Catalog::new(config.language);
        cli::run_interactive(&state, &translator, input, output).await
    };

    if let Err(e) = result {
        tracing::error!("Terminal session failed: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Goodbye");
}
