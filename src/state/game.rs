use super::{GameResult, Session};
use crate::types::*;

/// Check if a phase transition is valid for the given variant
pub fn is_valid_phase_transition(variant: GameVariant, from: GamePhase, to: GamePhase) -> bool {
    use GamePhase::*;

    match (from, to) {
        // Normal forward flow
        (Setup, Configuring) => true,
        (Configuring, AwaitingReady) => variant == GameVariant::Extended,
        (AwaitingReady, Revealing) => true,
        (Revealing, Debating) => true,
        (Debating, Finished) => true,

        // The classic flow skips the ready screen
        (Setup, Revealing) | (Configuring, Revealing) => variant == GameVariant::Classic,

        // Play again
        (Finished, AwaitingReady) => variant == GameVariant::Extended,
        (Finished, Revealing) => variant == GameVariant::Classic,

        // Back to the lobby from anywhere
        (_, Setup) => true,

        // All other transitions are invalid
        _ => false,
    }
}

impl Session {
    pub(super) fn set_phase(&mut self, to: GamePhase) {
        debug_assert!(
            to == self.phase || is_valid_phase_transition(self.rules.variant, self.phase, to),
            "unexpected phase transition {:?} -> {:?}",
            self.phase,
            to
        );
        if to != self.phase {
            tracing::info!("Phase transition {:?} -> {:?}", self.phase, to);
        }
        self.phase = to;
    }

    /// Record the group's verdict and end the round
    pub fn declare_winner(&mut self, winner: Winner) -> GameResult<()> {
        self.expect_phase("declare_winner", &[GamePhase::Debating])?;
        self.winner = Some(winner);
        self.set_phase(GamePhase::Finished);
        tracing::info!("Round {} won by {:?}", self.round_no, winner);
        Ok(())
    }

    /// Abandon any round and return to the lobby. The roster is kept; theme,
    /// winner and round fields are cleared and the impostor count resets.
    pub fn reset_to_lobby(&mut self) -> GameResult<()> {
        self.clear_round();
        self.theme_choice = None;
        self.impostor_count = 1;
        self.set_phase(GamePhase::Setup);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::{GameError, ValidationError};
    use super::*;
    use crate::random::RngSource;

    #[test]
    fn test_valid_extended_transitions() {
        use GamePhase::*;
        let v = GameVariant::Extended;

        assert!(is_valid_phase_transition(v, Setup, Configuring));
        assert!(is_valid_phase_transition(v, Configuring, AwaitingReady));
        assert!(is_valid_phase_transition(v, AwaitingReady, Revealing));
        assert!(is_valid_phase_transition(v, Revealing, Debating));
        assert!(is_valid_phase_transition(v, Debating, Finished));
        assert!(is_valid_phase_transition(v, Finished, AwaitingReady));
        assert!(is_valid_phase_transition(v, Revealing, Setup));
    }

    #[test]
    fn test_invalid_transitions() {
        use GamePhase::*;
        let v = GameVariant::Extended;

        assert!(!is_valid_phase_transition(v, Setup, Revealing));
        assert!(!is_valid_phase_transition(v, Setup, Debating));
        assert!(!is_valid_phase_transition(v, Configuring, Finished));
        assert!(!is_valid_phase_transition(v, Debating, Revealing));
        assert!(!is_valid_phase_transition(v, Finished, Revealing));
        assert!(!is_valid_phase_transition(GameVariant::Classic, Configuring, AwaitingReady));
    }

    #[test]
    fn test_declare_winner_only_while_debating() {
        let mut session = configured(&["Ana", "Bruno"], "Animals");
        let result = session.declare_winner(Winner::Crew);
        assert!(matches!(
            result,
            Err(GameError::Validation(ValidationError::WrongPhase {
                command: "declare_winner",
                ..
            }))
        ));
        assert!(session.winner.is_none());
    }

    #[test]
    fn test_reset_to_lobby_mid_round() {
        let mut random = RngSource::seeded(4);
        let mut session = configured(&["Ana", "Bruno", "Carla"], "Animals");
        session.set_impostor_count(2).unwrap();
        session.start_round(&mut random).unwrap();
        session.confirm_ready(&mut random).unwrap();
        session.reveal_current().unwrap();

        session.reset_to_lobby().unwrap();
        assert_eq!(session.phase, GamePhase::Setup);
        assert_eq!(session.roster.len(), 3);
        assert!(session.theme.is_empty());
        assert!(session.theme_choice.is_none());
        assert!(session.reveal_order.is_empty());
        assert_eq!(session.reveal_cursor, 0);
        assert_eq!(session.impostor_count, 1);
        assert!(session
            .roster
            .iter()
            .all(|p| !p.is_impostor && !p.revealed && p.assigned_theme.is_none()));
    }
}
