//! Guessdex Core - Headless Game Engine
//!
//! This crate provides the complete game logic for Guessdex, a casual
//! creature-guessing game, independent of any UI framework. It can drive a
//! TUI, a web UI, or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Presentation Surfaces                    │
//! │          TUI / test harness / anything else              │
//! │                                                          │
//! │            PlayerIntent (up)                             │
//! │            GameMessage  (down)                           │
//! └──────────────────────────┬───────────────────────────────┘
//!                            │
//! ┌──────────────────────────┼───────────────────────────────┐
//! │                     GAME ENGINE                           │
//! │  ┌───────────────────────┴─────────────────────────────┐ │
//! │  │                   GameEngine                         │ │
//! │  │  ┌─────────────┐  ┌──────────────┐  ┌────────────┐  │ │
//! │  │  │ GameSession │  │   Catalog    │  │ ScoreStore │  │ │
//! │  │  │  (rounds,   │  │   Client     │  │  Client    │  │ │
//! │  │  │   score)    │  │  (creatures) │  │ (ranking)  │  │ │
//! │  │  └─────────────┘  └──────────────┘  └────────────┘  │ │
//! │  └─────────────────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`GameEngine`]: owns the session and sequences the remote calls
//! - [`GameSession`]: the round/score state machine for one play-through
//! - [`PlayerIntent`]: events sent from a surface to the engine
//! - [`GameMessage`]: messages sent from the engine to a surface
//! - [`CatalogClient`] / [`ScoreStore`]: the two remote collaborators
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on any UI framework. It is pure
//! game logic that can be embedded anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod engine;
pub mod error;
pub mod events;
pub mod messages;
pub mod scores;
pub mod session;

// Re-exports for convenience
pub use catalog::{CatalogClient, Creature, CreatureFetch, PokeApiCatalog, SpriteImage};
pub use engine::{GameConfig, GameEngine};
pub use error::NetworkError;
pub use events::PlayerIntent;
pub use messages::{CreatureView, GameMessage, SessionSnapshot};
pub use scores::{HttpScoreStore, Leaderboard, ScoreRecord, ScoreStore};
pub use session::{GamePhase, GameSession, RoundOutcome, SessionError, DEFAULT_ROUNDS};
