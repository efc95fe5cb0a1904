//! Game Engine
//!
//! The engine is the only owner of the [`GameSession`] and the only caller
//! of the two remote clients. It is UI-agnostic: surfaces send
//! [`PlayerIntent`]s in and receive [`GameMessage`]s out, so the same engine
//! can drive a TUI, a test harness, or any other surface.
//!
//! # Request Discipline
//!
//! At most one remote request is ever in flight. Requests run on spawned
//! tasks and complete through a oneshot channel the engine polls every
//! frame ([`GameEngine::poll_pending`]). The resulting transition is
//! applied against the state as it is at completion time, never against
//! state captured when the request started. An intent that would start a
//! second request while one is pending is ignored.
//!
//! # Error Handling
//!
//! A failed remote call never half-applies a transition: the session stays
//! in its prior phase, the failure is logged, and a [`GameMessage::Error`]
//! tells the surface so the player can retry the intent manually. There is
//! no automatic retry.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::catalog::{CatalogClient, CreatureFetch, SpriteImage};
use crate::error::NetworkError;
use crate::events::PlayerIntent;
use crate::messages::{CreatureView, GameMessage, SessionSnapshot};
use crate::scores::{Leaderboard, ScoreRecord, ScoreStore};
use crate::session::{GamePhase, GameSession, DEFAULT_ROUNDS};

/// Engine configuration.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Rounds per session.
    pub rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl GameConfig {
    /// Create configuration from the `GUESSDEX_ROUNDS` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            rounds: std::env::var("GUESSDEX_ROUNDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ROUNDS),
        }
    }
}

/// The remote request the engine is waiting on, if any.
enum PendingRequest {
    /// New creature for a starting round.
    Creature(oneshot::Receiver<Result<CreatureFetch, NetworkError>>),
    /// Score record being persisted.
    Save(oneshot::Receiver<Result<(), NetworkError>>),
    /// Leaderboard being fetched.
    Leaderboard(oneshot::Receiver<Result<Leaderboard, NetworkError>>),
}

impl PendingRequest {
    fn kind(&self) -> &'static str {
        match self {
            Self::Creature(_) => "creature fetch",
            Self::Save(_) => "score save",
            Self::Leaderboard(_) => "leaderboard fetch",
        }
    }
}

/// The Guessdex engine: session state plus remote-call sequencing.
pub struct GameEngine<C: CatalogClient, S: ScoreStore> {
    /// Configuration.
    config: GameConfig,
    /// Creature catalog.
    catalog: Arc<C>,
    /// Score store.
    scores: Arc<S>,
    /// The session this engine owns.
    session: GameSession,
    /// Decoded artwork for the creature on screen.
    current_sprite: Option<SpriteImage>,
    /// Whether the save-name prompt is open.
    save_prompt_open: bool,
    /// Whether the leaderboard view is open.
    leaderboard_open: bool,
    /// Outstanding remote request, at most one.
    pending: Option<PendingRequest>,
    /// Channel to the presentation surface.
    tx: mpsc::Sender<GameMessage>,
}

impl<C, S> GameEngine<C, S>
where
    C: CatalogClient + 'static,
    S: ScoreStore + 'static,
{
    /// Create a new engine with the given clients.
    pub fn new(catalog: C, scores: S, config: GameConfig, tx: mpsc::Sender<GameMessage>) -> Self {
        Self {
            session: GameSession::new(config.rounds),
            config,
            catalog: Arc::new(catalog),
            scores: Arc::new(scores),
            current_sprite: None,
            save_prompt_open: false,
            leaderboard_open: false,
            pending: None,
            tx,
        }
    }

    /// The session this engine owns (read-only).
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Engine configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whether a remote request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the leaderboard view is open.
    pub fn leaderboard_open(&self) -> bool {
        self.leaderboard_open
    }

    /// Build a renderable snapshot of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.session.phase(),
            creature: self.session.creature().map(|c| CreatureView {
                id: c.id,
                image_url: c.image_url.clone(),
                sprite: self.current_sprite.clone(),
            }),
            guess: self.session.guess().to_string(),
            feedback: self.session.feedback(),
            score: self.session.score(),
            rounds_remaining: self.session.rounds_remaining(),
            rounds: self.session.rounds(),
            final_score: self.session.final_score(),
            save_prompt_open: self.save_prompt_open,
            viewing_leaderboard: self.leaderboard_open,
            busy: self.pending.is_some(),
        }
    }

    /// Handle one player intent.
    pub async fn handle_intent(&mut self, intent: PlayerIntent) {
        match intent {
            PlayerIntent::StartGame => self.on_start().await,
            PlayerIntent::GuessChanged(text) => self.on_guess_changed(text).await,
            PlayerIntent::SubmitGuess => self.on_submit().await,
            PlayerIntent::NextRound => self.on_next_round().await,
            PlayerIntent::Restart => self.on_restart().await,
            PlayerIntent::SaveScore { name } => self.on_save(name).await,
            PlayerIntent::DismissSavePrompt => self.on_dismiss_save().await,
            PlayerIntent::ViewLeaderboard => self.on_view_leaderboard().await,
            PlayerIntent::LeaveLeaderboard => self.on_leave_leaderboard().await,
        }
    }

    /// Poll the outstanding remote request, applying its transition when it
    /// completes. Call once per frame.
    pub async fn poll_pending(&mut self) {
        use tokio::sync::oneshot::error::TryRecvError;

        let Some(pending) = self.pending.take() else {
            return;
        };
        match pending {
            PendingRequest::Creature(mut rx) => match rx.try_recv() {
                Ok(result) => self.apply_creature_result(result).await,
                Err(TryRecvError::Empty) => self.pending = Some(PendingRequest::Creature(rx)),
                Err(TryRecvError::Closed) => self.report_dropped("creature fetch").await,
            },
            PendingRequest::Save(mut rx) => match rx.try_recv() {
                Ok(result) => self.apply_save_result(result).await,
                Err(TryRecvError::Empty) => self.pending = Some(PendingRequest::Save(rx)),
                Err(TryRecvError::Closed) => self.report_dropped("score save").await,
            },
            PendingRequest::Leaderboard(mut rx) => match rx.try_recv() {
                Ok(result) => self.apply_leaderboard_result(result).await,
                Err(TryRecvError::Empty) => self.pending = Some(PendingRequest::Leaderboard(rx)),
                Err(TryRecvError::Closed) => self.report_dropped("leaderboard fetch").await,
            },
        }
    }

    // ------------------------------------------------------------------
    // Intent handlers
    // ------------------------------------------------------------------

    async fn on_start(&mut self) {
        if self.session.phase() != GamePhase::NotStarted {
            tracing::debug!("start ignored in phase {:?}", self.session.phase());
            return;
        }
        self.request_creature().await;
    }

    async fn on_guess_changed(&mut self, text: String) {
        self.session.set_guess(text);
        self.send_snapshot().await;
    }

    async fn on_submit(&mut self) {
        match self.session.resolve_guess() {
            Ok(outcome) => {
                tracing::info!(
                    ?outcome,
                    score = self.session.score(),
                    rounds_remaining = self.session.rounds_remaining(),
                    "round resolved"
                );
                if self.session.phase() == GamePhase::Finished {
                    self.current_sprite = None;
                    self.save_prompt_open = true;
                }
                self.send_snapshot().await;
            }
            Err(e) => tracing::debug!("submit ignored: {e}"),
        }
    }

    async fn on_next_round(&mut self) {
        if self.session.phase() != GamePhase::RoundResolved {
            tracing::debug!("next round ignored in phase {:?}", self.session.phase());
            return;
        }
        self.request_creature().await;
    }

    async fn on_restart(&mut self) {
        if self.session.phase() != GamePhase::Finished {
            tracing::debug!("restart ignored in phase {:?}", self.session.phase());
            return;
        }
        if self.request_in_flight() {
            return;
        }
        self.session.reset();
        self.current_sprite = None;
        self.save_prompt_open = false;
        self.leaderboard_open = false;
        self.request_creature().await;
    }

    async fn on_save(&mut self, name: String) {
        if self.session.phase() != GamePhase::Finished {
            tracing::debug!("save ignored in phase {:?}", self.session.phase());
            return;
        }
        let Some(score) = self.session.final_score() else {
            return;
        };
        if name.trim().is_empty() {
            self.send_error("enter a name before saving").await;
            return;
        }
        if self.request_in_flight() {
            return;
        }

        let record = ScoreRecord { name, score };
        let (tx, rx) = oneshot::channel();
        let scores = Arc::clone(&self.scores);
        tokio::spawn(async move {
            let _ = tx.send(scores.save(&record).await);
        });
        self.pending = Some(PendingRequest::Save(rx));
        self.send_snapshot().await;
    }

    async fn on_dismiss_save(&mut self) {
        if self.save_prompt_open {
            self.save_prompt_open = false;
            self.send_snapshot().await;
        }
    }

    async fn on_view_leaderboard(&mut self) {
        if self.leaderboard_open || self.request_in_flight() {
            return;
        }
        self.request_leaderboard().await;
    }

    async fn on_leave_leaderboard(&mut self) {
        if !self.leaderboard_open {
            return;
        }
        self.leaderboard_open = false;
        self.save_prompt_open = false;
        self.session.reset();
        self.current_sprite = None;
        self.send_snapshot().await;
    }

    // ------------------------------------------------------------------
    // Remote requests
    // ------------------------------------------------------------------

    /// True (and logged) when a request is already outstanding.
    fn request_in_flight(&self) -> bool {
        match &self.pending {
            Some(pending) => {
                tracing::debug!("intent ignored: {} already in flight", pending.kind());
                true
            }
            None => false,
        }
    }

    async fn request_creature(&mut self) {
        if self.request_in_flight() {
            return;
        }
        let (tx, rx) = oneshot::channel();
        let catalog = Arc::clone(&self.catalog);
        tokio::spawn(async move {
            let _ = tx.send(catalog.random_creature().await);
        });
        self.pending = Some(PendingRequest::Creature(rx));
        self.send_snapshot().await;
    }

    async fn request_leaderboard(&mut self) {
        let (tx, rx) = oneshot::channel();
        let scores = Arc::clone(&self.scores);
        tokio::spawn(async move {
            let _ = tx.send(scores.leaderboard().await);
        });
        self.pending = Some(PendingRequest::Leaderboard(rx));
        self.send_snapshot().await;
    }

    // ------------------------------------------------------------------
    // Request completions
    // ------------------------------------------------------------------

    async fn apply_creature_result(&mut self, result: Result<CreatureFetch, NetworkError>) {
        match result {
            Ok(fetch) => {
                let id = fetch.creature.id;
                match self.session.begin_round(fetch.creature) {
                    Ok(()) => {
                        self.current_sprite = fetch.sprite;
                        tracing::debug!(id, "round started");
                    }
                    Err(e) => tracing::warn!("discarding fetched creature {id}: {e}"),
                }
                self.send_snapshot().await;
            }
            Err(e) => {
                tracing::error!("creature fetch failed: {e}");
                self.send_error(format!("could not fetch a creature: {e}"))
                    .await;
                self.send_snapshot().await;
            }
        }
    }

    async fn apply_save_result(&mut self, result: Result<(), NetworkError>) {
        match result {
            Ok(()) => {
                tracing::info!("score saved");
                self.save_prompt_open = false;
                self.send(GameMessage::ScoreSaved).await;
                // Saving flows straight into the leaderboard view.
                self.request_leaderboard().await;
            }
            Err(e) => {
                tracing::error!("score save failed: {e}");
                self.send_error(format!("could not save your score: {e}"))
                    .await;
                self.send_snapshot().await;
            }
        }
    }

    async fn apply_leaderboard_result(&mut self, result: Result<Leaderboard, NetworkError>) {
        match result {
            Ok(rows) => {
                self.leaderboard_open = true;
                self.send(GameMessage::Leaderboard(rows)).await;
                self.send_snapshot().await;
            }
            Err(e) => {
                tracing::error!("leaderboard fetch failed: {e}");
                self.send_error(format!("could not fetch the leaderboard: {e}"))
                    .await;
                self.send_snapshot().await;
            }
        }
    }

    async fn report_dropped(&mut self, kind: &str) {
        tracing::error!("{kind} task dropped before completing");
        self.send_error(format!("{kind} failed")).await;
        self.send_snapshot().await;
    }

    // ------------------------------------------------------------------
    // Surface channel
    // ------------------------------------------------------------------

    async fn send_snapshot(&self) {
        self.send(GameMessage::Session(self.snapshot())).await;
    }

    async fn send_error(&self, detail: impl Into<String>) {
        self.send(GameMessage::Error {
            detail: detail.into(),
        })
        .await;
    }

    /// Send a message to the surface.
    async fn send(&self, msg: GameMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_config_default_rounds() {
        let config = GameConfig::default();
        assert_eq!(config.rounds, DEFAULT_ROUNDS);
    }

    #[test]
    fn test_pending_request_kinds() {
        let (_tx, rx) = oneshot::channel::<Result<CreatureFetch, NetworkError>>();
        assert_eq!(PendingRequest::Creature(rx).kind(), "creature fetch");
    }
}
