use super::{GameResult, Session, ValidationError};
use crate::random::{self as rng, RandomSource};
use crate::types::*;
use std::collections::HashSet;

impl Session {
    /// Pick this round's theme: the explicit choice if there is one,
    /// otherwise a uniformly drawn preset
    fn draw_theme(&self, random: &mut dyn RandomSource) -> GameResult<String> {
        if let Some(choice) = &self.theme_choice {
            return Ok(choice.clone());
        }
        rng::pick(random, &self.rules.preset_themes)
            .map(|theme| theme.trim().to_string())
            .filter(|theme| !theme.is_empty())
            .ok_or_else(|| ValidationError::NoThemeAvailable.into())
    }

    /// Hand out hidden roles for a new round.
    ///
    /// All checks run before anything is written, so a failure leaves the
    /// session exactly as it was.
    fn assign_roles(&mut self, random: &mut dyn RandomSource) -> GameResult<()> {
        let required = self.min_players();
        if self.roster.len() < required {
            return Err(ValidationError::NotEnoughPlayers {
                required,
                actual: self.roster.len(),
            }
            .into());
        }

        let theme = self.draw_theme(random)?;
        self.clamp_impostor_count();

        // First `impostor_count` entries of a uniform permutation
        let impostors: HashSet<usize> = rng::permutation(random, self.roster.len())
            .into_iter()
            .take(self.impostor_count)
            .collect();

        self.clear_round();
        for (index, player) in self.roster.iter_mut().enumerate() {
            player.is_impostor = impostors.contains(&index);
            if !player.is_impostor {
                player.assigned_theme = Some(theme.clone());
            }
        }
        self.theme = theme;
        self.round_no += 1;

        tracing::info!(
            "Round {} started with {} players and {} impostor(s)",
            self.round_no,
            self.roster.len(),
            self.impostor_count
        );
        tracing::debug!(
            impostors = ?self.impostors().iter().map(|p| &p.name).collect::<Vec<_>>(),
            theme = %self.theme,
            "Roles assigned"
        );
        Ok(())
    }

    /// Where the game goes once roles are assigned
    fn enter_round(&mut self, random: &mut dyn RandomSource) {
        match self.rules.variant {
            GameVariant::Extended => self.set_phase(GamePhase::AwaitingReady),
            GameVariant::Classic => self.begin_reveal(random),
        }
    }

    /// Assign roles and start a round
    pub fn start_round(&mut self, random: &mut dyn RandomSource) -> GameResult<()> {
        match self.rules.variant {
            GameVariant::Extended => self.expect_phase("start_round", &[GamePhase::Configuring])?,
            GameVariant::Classic => {
                self.expect_phase("start_round", &[GamePhase::Setup, GamePhase::Configuring])?
            }
        }

        self.assign_roles(random)?;
        self.enter_round(random);
        Ok(())
    }

    /// Replay with the same roster and theme selection
    pub fn play_again(&mut self, random: &mut dyn RandomSource) -> GameResult<()> {
        self.expect_phase("play_again", &[GamePhase::Finished])?;
        self.assign_roles(random)?;
        self.enter_round(random);
        Ok(())
    }
}
