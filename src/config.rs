use crate::i18n::{self, Language};
use crate::types::{GameRules, GameVariant, RevealOrderPolicy};
use std::path::PathBuf;

/// Runtime configuration, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub language: Language,
    pub roster_path: PathBuf,
    pub reveal_order: RevealOrderPolicy,
    pub variant: GameVariant,
    /// Fixed seed for reproducible games
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            roster_path: PathBuf::from("impostor-roster.json"),
            reveal_order: RevealOrderPolicy::default(),
            variant: GameVariant::default(),
            seed: None,
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Parse an env var, warning and falling back to `None` when it doesn't parse
fn parse_env<T>(name: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let raw = env_value(name)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        tracing::warn!("Ignoring invalid {}={:?}, using default", name, raw);
    }
    parsed
}

fn parse_reveal_order(value: &str) -> Option<RevealOrderPolicy> {
    match value.to_lowercase().as_str() {
        "shuffled" | "random" => Some(RevealOrderPolicy::Shuffled),
        "alphabetical" | "alpha" => Some(RevealOrderPolicy::Alphabetical),
        _ => None,
    }
}

fn parse_variant(value: &str) -> Option<GameVariant> {
    match value.to_lowercase().as_str() {
        "extended" => Some(GameVariant::Extended),
        "classic" => Some(GameVariant::Classic),
        _ => None,
    }
}

impl AppConfig {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            language: parse_env("IMPOSTOR_LANGUAGE", Language::from_code)
                .unwrap_or(defaults.language),
            roster_path: env_value("IMPOSTOR_ROSTER_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.roster_path),
            reveal_order: parse_env("IMPOSTOR_REVEAL_ORDER", parse_reveal_order)
                .unwrap_or(defaults.reveal_order),
            variant: parse_env("IMPOSTOR_VARIANT", parse_variant).unwrap_or(defaults.variant),
            seed: parse_env("IMPOSTOR_SEED", |s| s.parse().ok()),
        };

        tracing::info!(
            language = config.language.code(),
            roster_path = %config.roster_path.display(),
            reveal_order = ?config.reveal_order,
            variant = ?config.variant,
            seeded = config.seed.is_some(),
            "Config loaded"
        );

        config
    }

    /// Game rules for a new session, with presets in the configured language
    pub fn rules(&self) -> GameRules {
        GameRules {
            variant: self.variant,
            reveal_order: self.reveal_order,
            language: self.language,
            preset_themes: i18n::preset_themes(self.language),
        }
    }
}
