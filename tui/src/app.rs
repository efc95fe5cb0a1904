//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, frame tick)
//! - EngineClient for the embedded game engine
//! - DisplayState for rendering
//!
//! Each loop iteration converts at most one terminal event into a
//! `PlayerIntent`, polls the engine's outstanding request, drains engine
//! messages into the display state, and renders.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use guessdex_core::{GamePhase, PlayerIntent};

use crate::display::{DisplayState, Screen};
use crate::engine_client::EngineClient;
use crate::ui;

/// Frame duration (~20 FPS is plenty for a guessing game).
const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Main application state.
pub struct App {
    /// Is the app still running?
    running: bool,
    /// Client for the embedded game engine.
    engine: EngineClient,
    /// Display state derived from engine messages.
    display: DisplayState,
    /// Name typed into the save prompt, local until submitted.
    name_buffer: String,
}

impl App {
    /// Create a new App instance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            running: true,
            engine: EngineClient::new(),
            display: DisplayState::new(),
            name_buffer: String::new(),
        }
    }

    /// Main event loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();
        let mut last_frame = Instant::now();

        // Render initial frame immediately so the user sees the UI.
        self.render(terminal)?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Terminal events - highest priority.
                maybe_event = event_stream.next() => {
                    if let Some(Ok(Event::Key(key))) = maybe_event {
                        // Only handle Press events (not Release or Repeat).
                        if key.kind == KeyEventKind::Press {
                            self.handle_key(key).await;
                        }
                    }
                }

                // Frame tick.
                () = tokio::time::sleep(FRAME_DURATION) => {}
            }

            // Poll the engine for a completed remote request.
            self.engine.poll_pending().await;

            // Receive and process messages from the engine.
            for msg in self.engine.recv_all() {
                self.display.apply_message(msg);
            }
            self.sync_prompt_buffer();

            // Update display timers.
            let now = Instant::now();
            self.display.update(now - last_frame);
            last_frame = now;

            self.render(terminal)?;

            // Frame rate limiting.
            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_DURATION {
                tokio::time::sleep(FRAME_DURATION - elapsed).await;
            }
        }

        Ok(())
    }

    /// Handle keyboard input.
    async fn handle_key(&mut self, key: event::KeyEvent) {
        // Ctrl-C always quits.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        match self.display.screen() {
            Screen::Start => self.handle_start_key(key).await,
            Screen::Game => self.handle_game_key(key).await,
            Screen::Result => self.handle_result_key(key).await,
            Screen::Leaderboard => self.handle_leaderboard_key(key).await,
        }
    }

    async fn handle_start_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Enter => self.engine.send(PlayerIntent::StartGame).await,
            KeyCode::Char('l') => self.engine.send(PlayerIntent::ViewLeaderboard).await,
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            _ => {}
        }
    }

    async fn handle_game_key(&mut self, key: event::KeyEvent) {
        let phase = self.display.snapshot.phase;
        match key.code {
            KeyCode::Esc => self.running = false,

            KeyCode::Enter => match phase {
                GamePhase::Playing => self.engine.send(PlayerIntent::SubmitGuess).await,
                GamePhase::RoundResolved => self.engine.send(PlayerIntent::NextRound).await,
                _ => {}
            },

            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.engine.send(PlayerIntent::ViewLeaderboard).await;
            }

            // Typing edits the guess; the session is the source of truth,
            // so the edited text goes straight back to the engine.
            KeyCode::Char(c) if phase == GamePhase::Playing => {
                let mut guess = self.display.snapshot.guess.clone();
                guess.push(c);
                self.engine.send(PlayerIntent::GuessChanged(guess)).await;
            }
            KeyCode::Backspace if phase == GamePhase::Playing => {
                let mut guess = self.display.snapshot.guess.clone();
                guess.pop();
                self.engine.send(PlayerIntent::GuessChanged(guess)).await;
            }

            _ => {}
        }
    }

    async fn handle_result_key(&mut self, key: event::KeyEvent) {
        if self.display.snapshot.save_prompt_open {
            match key.code {
                KeyCode::Enter => {
                    let name = self.name_buffer.clone();
                    self.engine.send(PlayerIntent::SaveScore { name }).await;
                }
                KeyCode::Esc => self.engine.send(PlayerIntent::DismissSavePrompt).await,
                KeyCode::Char(c) => self.name_buffer.push(c),
                KeyCode::Backspace => {
                    self.name_buffer.pop();
                }
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Char('r') => self.engine.send(PlayerIntent::Restart).await,
                KeyCode::Char('l') => self.engine.send(PlayerIntent::ViewLeaderboard).await,
                KeyCode::Esc | KeyCode::Char('q') => self.running = false,
                _ => {}
            }
        }
    }

    async fn handle_leaderboard_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.engine.send(PlayerIntent::LeaveLeaderboard).await;
            }
            _ => {}
        }
    }

    /// Drop the typed name once the save prompt closes.
    fn sync_prompt_buffer(&mut self) {
        if !self.display.snapshot.save_prompt_open {
            self.name_buffer.clear();
        }
    }

    /// Render the UI.
    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        terminal.draw(|frame| ui::render(frame, &self.display, &self.name_buffer))?;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
