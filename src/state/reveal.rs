use super::{GameError, GameResult, Session, ValidationError};
use crate::i18n::Language;
use crate::random::{self as rng, RandomSource};
use crate::types::*;
use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::Locale;
use std::cmp::Ordering;

/// Primary-strength collator for `language`: case and accents are ignored,
/// letters like "Ł" or "Đ" sort next to their base letter.
fn name_collator(language: Language) -> Option<Collator> {
    let locale: Locale = match language.locale().parse() {
        Ok(locale) => locale,
        Err(e) => {
            tracing::warn!("Invalid locale {}: {:?}", language.locale(), e);
            Locale::UND
        }
    };

    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Primary);
    match Collator::try_new(&locale.clone().into(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!("No collation data for {}: {:?}", locale, e);
            None
        }
    }
}

fn compare_with(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    let (a, b) = (a.trim(), b.trim());
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Compare two names the way people alphabetize them in `language`
pub fn compare_names(language: Language, a: &str, b: &str) -> Ordering {
    compare_with(name_collator(language).as_ref(), a, b)
}

impl Session {
    /// Reveal order for the round, per the session's policy
    fn compute_reveal_order(&self, random: &mut dyn RandomSource) -> Vec<PlayerId> {
        let indices = match self.rules.reveal_order {
            RevealOrderPolicy::Shuffled => rng::permutation(random, self.roster.len()),
            RevealOrderPolicy::Alphabetical => {
                let mut indices: Vec<usize> = (0..self.roster.len()).collect();
                let collator = name_collator(self.rules.language);
                // Stable sort keeps roster order for equal names
                indices.sort_by(|&a, &b| {
                    compare_with(collator.as_ref(), &self.roster[a].name, &self.roster[b].name)
                });
                indices
            }
        };

        indices
            .into_iter()
            .map(|i| self.roster[i].id.clone())
            .collect()
    }

    /// Fix the reveal order and hand the device to the first player
    pub(super) fn begin_reveal(&mut self, random: &mut dyn RandomSource) {
        self.reveal_order = self.compute_reveal_order(random);
        self.reveal_cursor = 0;
        self.set_phase(GamePhase::Revealing);
    }

    /// Everyone is gathered, start passing the device around
    pub fn confirm_ready(&mut self, random: &mut dyn RandomSource) -> GameResult<()> {
        self.expect_phase("confirm_ready", &[GamePhase::AwaitingReady])?;
        self.begin_reveal(random);
        Ok(())
    }

    /// Whose turn it is to look at the device, during `Revealing` only
    pub fn current_player(&self) -> Option<&Player> {
        if self.phase != GamePhase::Revealing {
            return None;
        }
        let id = self.reveal_order.get(self.reveal_cursor)?;
        self.player(id)
    }

    /// Show the current player their role. Returns their id.
    pub fn reveal_current(&mut self) -> GameResult<PlayerId> {
        self.expect_phase("reveal_current", &[GamePhase::Revealing])?;

        let id = self
            .reveal_order
            .get(self.reveal_cursor)
            .cloned()
            .ok_or(ValidationError::RevealComplete)?;

        let player = self
            .roster
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| GameError::NotFound(id.clone()))?;
        player.revealed = true;
        Ok(id)
    }

    /// Hand the device to the next player, or open the debate after the last
    pub fn advance(&mut self) -> GameResult<()> {
        self.expect_phase("advance", &[GamePhase::Revealing])?;

        let revealed = self.current_player().map(|p| p.revealed);
        match revealed {
            Some(true) => {}
            Some(false) => return Err(ValidationError::NotRevealed.into()),
            None => return Err(ValidationError::RevealComplete.into()),
        }

        self.reveal_cursor += 1;
        if self.reveal_cursor >= self.reveal_order.len() {
            self.set_phase(GamePhase::Debating);
        }
        Ok(())
    }
}
