//! Player Intents
//!
//! Everything a presentation surface can ask the engine to do. Surfaces are
//! dumb renderers: they report what the player did and the engine decides
//! what it means in the current phase. An intent that makes no sense right
//! now (submitting with no round active, restarting mid-game) is ignored.

use serde::{Deserialize, Serialize};

/// Intents from a presentation surface to the game engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerIntent {
    /// Start a new game from the start screen.
    StartGame,

    /// The guess input changed; carries the full new text.
    GuessChanged(String),

    /// Submit the current guess against the creature on screen.
    SubmitGuess,

    /// Advance to the next round after one resolved.
    NextRound,

    /// Start over after a finished game.
    Restart,

    /// Persist the final score under the given player name.
    SaveScore {
        /// Name to record the score under.
        name: String,
    },

    /// Close the save prompt without saving.
    DismissSavePrompt,

    /// Show the leaderboard.
    ViewLeaderboard,

    /// Leave the leaderboard and return to the start screen.
    LeaveLeaderboard,
}
