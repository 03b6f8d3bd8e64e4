use super::{GameResult, Session, ValidationError};
use crate::types::*;

/// Phases in which round settings may still change
const SETTINGS_PHASES: &[GamePhase] = &[GamePhase::Setup, GamePhase::Configuring];

impl Session {
    /// Set how many impostors the next round gets. Out-of-range values are
    /// clamped to `1..=max(1, players - 1)`, negatives included. Returns the
    /// stored count.
    pub fn set_impostor_count(&mut self, count: i64) -> GameResult<usize> {
        self.expect_phase("set_impostor_count", SETTINGS_PHASES)?;
        let max = i64::try_from(self.max_impostors()).unwrap_or(i64::MAX);
        self.impostor_count = usize::try_from(count.clamp(1, max)).unwrap_or(1);
        Ok(self.impostor_count)
    }

    /// Choose an explicit theme (a preset or a custom one)
    pub fn set_theme(&mut self, theme: &str) -> GameResult<()> {
        self.expect_phase("set_theme", SETTINGS_PHASES)?;

        let theme = theme.trim();
        if theme.is_empty() {
            return Err(ValidationError::EmptyTheme.into());
        }

        self.theme_choice = Some(theme.to_string());
        Ok(())
    }

    /// Go back to drawing a random preset for each round
    pub fn clear_theme(&mut self) -> GameResult<()> {
        self.expect_phase("clear_theme", SETTINGS_PHASES)?;
        self.theme_choice = None;
        Ok(())
    }
}
