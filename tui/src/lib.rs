//! Guessdex TUI - terminal interface for the creature guessing game
//!
//! This crate is a thin display client over the headless engine in
//! `guessdex-core`:
//!
//! - **EngineClient**: embeds the game engine and its message channel
//! - **DisplayState**: render model fed by engine messages
//! - **ui**: pure render functions per screen
//! - **sprite**: creature artwork as Unicode half-block pixels

pub mod app;
pub mod display;
pub mod engine_client;
pub mod sprite;
pub mod ui;

pub use app::App;
