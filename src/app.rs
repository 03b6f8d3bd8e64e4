use crate::persistence::RosterStore;
use crate::protocol::Command;
use crate::random::RandomSource;
use crate::state::{GameResult, Session};
use crate::types::*;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared application state: the session plus its injected collaborators
#[derive(Clone)]
pub struct AppState {
    session: Arc<RwLock<Session>>,
    random: Arc<Mutex<Box<dyn RandomSource>>>,
    store: Arc<dyn RosterStore>,
}

impl AppState {
    pub fn new(
        session: Session,
        random: Box<dyn RandomSource>,
        store: Arc<dyn RosterStore>,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            random: Arc::new(Mutex::new(random)),
            store,
        }
    }

    /// Start a session from whatever roster the store holds.
    ///
    /// A store that can't be read yields an empty roster rather than an error.
    pub async fn load(
        rules: GameRules,
        random: Box<dyn RandomSource>,
        store: Arc<dyn RosterStore>,
    ) -> Self {
        let saved = match store.load().await {
            Ok(saved) => {
                tracing::info!("Loaded {} saved player(s) from {}", saved.len(), store.name());
                saved
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load roster from {}: {}. Starting with an empty roster.",
                    store.name(),
                    e
                );
                Vec::new()
            }
        };

        Self::new(Session::with_roster(rules, saved), random, store)
    }

    /// Read-only snapshot of the session
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Apply a command atomically and return the new snapshot.
    ///
    /// Roster changes are written to the store before the lock is released,
    /// so saves land in command order.
    pub async fn apply(&self, command: &Command) -> GameResult<Session> {
        let mut session = self.session.write().await;

        let next = {
            let mut random = self.random.lock().await;
            session.apply(command, &mut **random)?
        };
        *session = next.clone();

        if command.touches_roster() {
            self.persist_roster(&next).await;
        }

        Ok(next)
    }

    async fn persist_roster(&self, session: &Session) {
        let players: Vec<SavedPlayer> = session.roster.iter().map(SavedPlayer::from).collect();
        match self.store.save(&players).await {
            Ok(()) => tracing::debug!("Saved {} player(s) to {}", players.len(), self.store.name()),
            Err(e) => tracing::warn!(
                "Failed to save roster to {}: {}. Roster will not survive a restart.",
                self.store.name(),
                e
            ),
        }
    }
}
