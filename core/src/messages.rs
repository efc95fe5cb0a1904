//! Engine Messages
//!
//! Messages from the engine to a presentation surface. The engine pushes a
//! full [`SessionSnapshot`] after every state change; surfaces render from
//! the latest snapshot and never reach into engine state directly.

use serde::{Deserialize, Serialize};

use crate::catalog::SpriteImage;
use crate::scores::Leaderboard;
use crate::session::{GamePhase, RoundOutcome};

/// What a surface may show of the current creature.
///
/// The name is deliberately absent: it is the answer, and no surface should
/// be able to leak it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureView {
    /// Catalog id.
    pub id: u32,
    /// Artwork URL, when the catalog has one.
    pub image_url: Option<String>,
    /// Decoded artwork, when it could be fetched.
    pub sprite: Option<SpriteImage>,
}

/// Snapshot of everything a surface needs to render the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: GamePhase,
    /// Creature on screen, present in `Playing` and `RoundResolved`.
    pub creature: Option<CreatureView>,
    /// Current unsubmitted guess text.
    pub guess: String,
    /// Last round's outcome, cleared when a new round begins.
    pub feedback: Option<RoundOutcome>,
    /// Score so far.
    pub score: u32,
    /// Rounds left to play.
    pub rounds_remaining: u32,
    /// Rounds per session, as configured.
    pub rounds: u32,
    /// Fixed once the last round resolves.
    pub final_score: Option<u32>,
    /// Whether the save-name prompt is open.
    pub save_prompt_open: bool,
    /// Whether the leaderboard view is open.
    pub viewing_leaderboard: bool,
    /// Whether a remote request is outstanding.
    pub busy: bool,
}

impl SessionSnapshot {
    /// Snapshot of a pristine, not-started session.
    #[must_use]
    pub fn initial(rounds: u32) -> Self {
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
            save_prompt_open: false,
            viewing_leaderboard: false,
            busy: false,
        }
    }
}

/// Messages from the engine to a presentation surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameMessage {
    /// The session changed; full snapshot to render.
    Session(SessionSnapshot),

    /// Leaderboard contents, in store order.
    Leaderboard(Leaderboard),

    /// The final score was persisted.
    ScoreSaved,

    /// A remote call failed; the prior state is unchanged.
    Error {
        /// Human-readable description for the player.
        detail: String,
    },
}
