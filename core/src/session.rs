//! Game Session
//!
//! One play-through of the guessing game: a fixed number of rounds, a
//! running score, and the creature currently on screen. The session is pure
//! state with no I/O, so every transition the game can make is testable in
//! isolation.
//!
//! # Design Philosophy
//!
//! The engine owns exactly one [`GameSession`] and is its only writer.
//! Transition methods mutate the session synchronously: a transition always
//! reads the state it is about to write, so there is no window in which a
//! stale round counter can be captured while a request is outstanding.
//! Invalid-phase attempts return a [`SessionError`] and leave the session
//! untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Creature;

/// Default number of rounds in a session.
pub const DEFAULT_ROUNDS: u32 = 5;

/// Phase of a play-through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game running; the start screen.
    NotStarted,
    /// A creature is on screen and a guess is pending.
    Playing,
    /// The round resolved; waiting for the player to advance.
    RoundResolved,
    /// All rounds resolved; the final score is fixed.
    Finished,
}

/// Outcome of a resolved round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The guess matched the creature's name.
    Correct,
    /// The guess did not match.
    Incorrect,
}

/// Errors from invalid transition attempts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A round can only start from the start screen or between rounds.
    #[error("cannot start a round while {0:?}")]
    RoundNotStartable(GamePhase),

    /// Guess resolution needs an active round with a creature on screen.
    #[error("no active round to resolve")]
    NoActiveRound,
}

/// State of one play-through.
///
/// Invariants, held after every transition:
/// - `0 <= rounds_remaining <= rounds`
/// - `phase == Finished` iff `final_score` is set iff `rounds_remaining == 0`
/// - `score` only increases, and only when a round resolves correctly
/// - a creature is present exactly while `phase` is `Playing` or
///   `RoundResolved`
#[derive(Clone, Debug)]
pub struct GameSession {
    phase: GamePhase,
    creature: Option<Creature>,
    guess: String,
    feedback: Option<RoundOutcome>,
    score: u32,
    rounds_remaining: u32,
    rounds: u32,
    final_score: Option<u32>,
}

impl GameSession {
    /// Create a pristine session with the given round count.
    ///
    /// A session needs at least one round; zero is clamped to one.
    #[must_use]
    pub fn new(rounds: u32) -> Self {
        let rounds = rounds.max(1);
        Self {
            phase: GamePhase::NotStarted,
            creature: None,
            guess: String::new(),
            feedback: None,
            score: 0,
            rounds_remaining: rounds,
            rounds,
            final_score: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The creature on screen, present in `Playing` and `RoundResolved`.
    #[must_use]
    pub fn creature(&self) -> Option<&Creature> {
        self.creature.as_ref()
    }

    /// Current unsubmitted guess text.
    #[must_use]
    pub fn guess(&self) -> &str {
        &self.guess
    }

    /// Last round's outcome, cleared when a new round begins.
    #[must_use]
    pub fn feedback(&self) -> Option<RoundOutcome> {
        self.feedback
    }

    /// Score so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Rounds left to play.
    #[must_use]
    pub fn rounds_remaining(&self) -> u32 {
        self.rounds_remaining
    }

    /// Rounds per session, as configured.
    #[must_use]
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Final score, fixed once the last round resolves.
    #[must_use]
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Put a freshly fetched creature on screen and enter `Playing`.
    ///
    /// Valid from `NotStarted` (first round) and `RoundResolved` (advancing).
    /// The previous creature is discarded, feedback and guess text cleared.
    pub fn begin_round(&mut self, creature: Creature) -> Result<(), SessionError> {
        match self.phase {
            GamePhase::NotStarted | GamePhase::RoundResolved => {
                self.phase = GamePhase::Playing;
                self.creature = Some(creature);
                self.feedback = None;
                self.guess.clear();
                Ok(())
            }
            other => Err(SessionError::RoundNotStartable(other)),
        }
    }

    /// Replace the unsubmitted guess text.
    pub fn set_guess(&mut self, text: String) {
        self.guess = text;
    }

    /// Resolve the current round against the submitted guess.
    ///
    /// The comparison is a case-insensitive exact match; no trimming, no
    /// fuzzy matching. Both outcomes consume the round: the counter drops by
    /// exactly one and the guess text is cleared. When the last round
    /// resolves the session enters `Finished` and the final score is fixed.
    pub fn resolve_guess(&mut self) -> Result<RoundOutcome, SessionError> {
        if self.phase != GamePhase::Playing {
            return Err(SessionError::NoActiveRound);
        }
        let matched = match self.creature.as_ref() {
            Some(creature) => self.guess.eq_ignore_ascii_case(&creature.name),
            None => return Err(SessionError::NoActiveRound),
        };

        let outcome = if matched {
            self.score += 1;
            RoundOutcome::Correct
        } else {
            RoundOutcome::Incorrect
        };
        self.feedback = Some(outcome);
        self.guess.clear();
        self.rounds_remaining -= 1;

        if self.rounds_remaining == 0 {
            self.phase = GamePhase::Finished;
            self.final_score = Some(self.score);
            self.creature = None;
        } else {
            self.phase = GamePhase::RoundResolved;
        }
        Ok(outcome)
    }

    /// Reset to a pristine `NotStarted` session with the same round count.
    pub fn reset(&mut self) {
        *self = Self::new(self.rounds);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn creature(name: &str) -> Creature {
        Creature {
            id: 1,
            name: name.to_string(),
            image_url: None,
        }
    }

    fn session_in_round(name: &str) -> GameSession {
        let mut session = GameSession::new(DEFAULT_ROUNDS);
        session.begin_round(creature(name)).unwrap();
        session
    }

    #[test]
    fn test_new_session_is_pristine() {
        let session = GameSession::new(DEFAULT_ROUNDS);
        assert_eq!(session.phase(), GamePhase::NotStarted);
        assert_eq!(session.score(), 0);
        assert_eq!(session.rounds_remaining(), 5);
        assert_eq!(session.final_score(), None);
        assert!(session.creature().is_none());
    }

    #[test]
    fn test_zero_rounds_clamped_to_one() {
        let session = GameSession::new(0);
        assert_eq!(session.rounds_remaining(), 1);
    }

    #[test]
    fn test_correct_guess_scores_and_resolves() {
        let mut session = session_in_round("bulbasaur");
        session.set_guess("Bulbasaur".to_string());
        let outcome = session.resolve_guess().unwrap();

        assert_eq!(outcome, RoundOutcome::Correct);
        assert_eq!(session.feedback(), Some(RoundOutcome::Correct));
        assert_eq!(session.score(), 1);
        assert_eq!(session.rounds_remaining(), 4);
        assert_eq!(session.phase(), GamePhase::RoundResolved);
        assert_eq!(session.guess(), "");
    }

    #[test]
    fn test_guess_comparison_is_case_insensitive() {
        let mut session = session_in_round("pikachu");
        session.set_guess("PIKACHU".to_string());
        assert_eq!(session.resolve_guess().unwrap(), RoundOutcome::Correct);
    }

    #[test]
    fn test_incorrect_guess_keeps_score() {
        let mut session = session_in_round("pikachu");
        session.set_guess("raichu".to_string());
        let outcome = session.resolve_guess().unwrap();

        assert_eq!(outcome, RoundOutcome::Incorrect);
        assert_eq!(session.score(), 0);
        assert_eq!(session.rounds_remaining(), 4);
        assert_eq!(session.phase(), GamePhase::RoundResolved);
    }

    #[test]
    fn test_creature_survives_round_resolution() {
        let mut session = session_in_round("pikachu");
        session.resolve_guess().unwrap();
        assert!(session.creature().is_some());
    }

    #[test]
    fn test_five_rounds_three_correct_finishes_with_three() {
        let mut session = GameSession::new(5);
        let guesses = ["yes", "yes", "no", "yes", "no"];
        for guess in guesses {
            session.begin_round(creature("yes")).unwrap();
            session.set_guess(guess.to_string());
            session.resolve_guess().unwrap();
            assert!(session.rounds_remaining() <= 5);
        }

        assert_eq!(session.score(), 3);
        assert_eq!(session.phase(), GamePhase::Finished);
        assert_eq!(session.final_score(), Some(3));
        assert_eq!(session.rounds_remaining(), 0);
        assert!(session.creature().is_none());
    }

    #[test]
    fn test_final_round_incorrect_fixes_final_score() {
        let mut session = GameSession::new(5);
        for guess in ["ok", "ok", "no", "no"] {
            session.begin_round(creature("ok")).unwrap();
            session.set_guess(guess.to_string());
            session.resolve_guess().unwrap();
        }
        session.begin_round(creature("ok")).unwrap();
        session.set_guess("no".to_string());
        session.resolve_guess().unwrap();

        assert_eq!(session.phase(), GamePhase::Finished);
        assert_eq!(session.final_score(), Some(2));
    }

    #[test]
    fn test_final_score_set_only_when_finished() {
        let mut session = GameSession::new(2);
        session.begin_round(creature("a")).unwrap();
        session.resolve_guess().unwrap();
        assert_eq!(session.final_score(), None);

        session.begin_round(creature("a")).unwrap();
        session.resolve_guess().unwrap();
        assert_eq!(session.phase(), GamePhase::Finished);
        assert_eq!(session.final_score(), Some(session.score()));
    }

    #[test]
    fn test_resolve_needs_an_active_round() {
        let mut session = GameSession::new(5);
        assert_eq!(session.resolve_guess(), Err(SessionError::NoActiveRound));

        session.begin_round(creature("a")).unwrap();
        session.resolve_guess().unwrap();
        // RoundResolved: the round is already consumed.
        assert_eq!(session.resolve_guess(), Err(SessionError::NoActiveRound));
    }

    #[test]
    fn test_round_cannot_start_mid_round_or_after_finish() {
        let mut session = session_in_round("a");
        assert_eq!(
            session.begin_round(creature("b")),
            Err(SessionError::RoundNotStartable(GamePhase::Playing))
        );

        let mut finished = GameSession::new(1);
        finished.begin_round(creature("a")).unwrap();
        finished.resolve_guess().unwrap();
        assert_eq!(
            finished.begin_round(creature("b")),
            Err(SessionError::RoundNotStartable(GamePhase::Finished))
        );
    }

    #[test]
    fn test_new_round_discards_previous_creature_and_feedback() {
        let mut session = session_in_round("pikachu");
        session.resolve_guess().unwrap();

        session.begin_round(creature("eevee")).unwrap();
        assert_eq!(session.creature().unwrap().name, "eevee");
        assert_eq!(session.feedback(), None);
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_reset_restores_pristine_state() {
        let mut session = GameSession::new(1);
        session.begin_round(creature("a")).unwrap();
        session.set_guess("a".to_string());
        session.resolve_guess().unwrap();
        assert_eq!(session.phase(), GamePhase::Finished);

        session.reset();
        assert_eq!(session.phase(), GamePhase::NotStarted);
        assert_eq!(session.score(), 0);
        assert_eq!(session.rounds_remaining(), 1);
        assert_eq!(session.final_score(), None);
        assert!(session.creature().is_none());
    }
}
