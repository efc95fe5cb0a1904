//! Display State
//!
//! Render model the app derives from engine messages: the latest session
//! snapshot, the leaderboard rows, and a transient error banner. Rendering
//! never reaches into the engine; it only reads this state.

use std::time::Duration;

use guessdex_core::{GameMessage, GamePhase, Leaderboard, SessionSnapshot, DEFAULT_ROUNDS};

/// How long an error banner stays on screen.
const ERROR_TTL: Duration = Duration::from_secs(6);

/// Which screen the TUI is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Title screen.
    Start,
    /// A round in progress or just resolved.
    Game,
    /// Final score plus the save-name prompt.
    Result,
    /// Leaderboard rows.
    Leaderboard,
}

/// Render model fed by engine messages.
pub struct DisplayState {
    /// Latest session snapshot.
    pub snapshot: SessionSnapshot,
    /// Leaderboard as last fetched.
    pub leaderboard: Leaderboard,
    /// Error banner with remaining time to live.
    error: Option<(String, Duration)>,
}

impl DisplayState {
    /// Create an empty display state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: SessionSnapshot::initial(DEFAULT_ROUNDS),
            leaderboard: Vec::new(),
            error: None,
        }
    }

    /// Apply one message from the engine.
    pub fn apply_message(&mut self, msg: GameMessage) {
        match msg {
            GameMessage::Session(snapshot) => self.snapshot = snapshot,
            GameMessage::Leaderboard(rows) => self.leaderboard = rows,
            GameMessage::ScoreSaved => {}
            GameMessage::Error { detail } => self.error = Some((detail, ERROR_TTL)),
        }
    }

    /// Advance timers (error banner expiry).
    pub fn update(&mut self, delta: Duration) {
        if let Some((_, ttl)) = &mut self.error {
            *ttl = ttl.saturating_sub(delta);
        }
        if matches!(&self.error, Some((_, ttl)) if ttl.is_zero()) {
            self.error = None;
        }
    }

    /// Error banner text, if one is active.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|(msg, _)| msg.as_str())
    }

    /// Which screen the current state calls for.
    #[must_use]
    pub fn screen(&self) -> Screen {
        if self.snapshot.viewing_leaderboard {
            return Screen::Leaderboard;
        }
        match self.snapshot.phase {
            GamePhase::NotStarted => Screen::Start,
            GamePhase::Playing | GamePhase::RoundResolved => Screen::Game,
            GamePhase::Finished => Screen::Result,
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}
