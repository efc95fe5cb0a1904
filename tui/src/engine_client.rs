//! Engine Client
//!
//! Thin wrapper around the game engine for TUI integration. The engine is
//! embedded directly (no network hop) and this client provides a convenient
//! interface for sending intents and draining messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it contains no game logic. Its job is:
//! 1. Convert terminal events to `PlayerIntent`s
//! 2. Send intents to the engine
//! 3. Receive `GameMessage`s
//! 4. Render display state based on messages

use tokio::sync::mpsc;

use guessdex_core::{
    GameConfig, GameEngine, GameMessage, HttpScoreStore, PlayerIntent, PokeApiCatalog,
};

/// Client for communicating with the embedded game engine.
pub struct EngineClient {
    /// The embedded engine instance.
    engine: GameEngine<PokeApiCatalog, HttpScoreStore>,
    /// Receiver for messages from the engine.
    rx: mpsc::Receiver<GameMessage>,
}

impl EngineClient {
    /// Create a client with engine and remote clients configured from the
    /// environment.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(100);

        let catalog = PokeApiCatalog::from_env();
        let scores = HttpScoreStore::from_env();
        let engine = GameEngine::new(catalog, scores, GameConfig::from_env(), tx);

        Self { engine, rx }
    }

    /// Send one player intent to the engine.
    pub async fn send(&mut self, intent: PlayerIntent) {
        self.engine.handle_intent(intent).await;
    }

    /// Poll the engine's outstanding request (must be called regularly).
    pub async fn poll_pending(&mut self) {
        self.engine.poll_pending().await;
    }

    /// Receive all pending messages from the engine (non-blocking).
    pub fn recv_all(&mut self) -> Vec<GameMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }
}

impl Default for EngineClient {
    fn default() -> Self {
        Self::new()
    }
}
