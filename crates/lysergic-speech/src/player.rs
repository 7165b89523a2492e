//! Read-aloud player - drives a [`SpeechDriver`] through a chunk queue.
//!
//! ```text
//!   Idle ──play──▶ Playing ──play──▶ Paused
//!    ▲               │  ▲              │
//!    │               │  └────play──────┘
//!    └──stop / last chunk done─────────┘
//! ```
//!
//! The player owns the current document and the chunk queue built from it.
//! Completion events flow back from the driver over a channel; each one
//! advances the cursor to the next chunk. Events tagged with an older
//! session (from before a stop or restart) are ignored.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::document::SpeechDocument;
use crate::driver::{DriverEvent, SessionId, SpeechDriver, Utterance};
use crate::text_utils::{self, MAX_CHUNK_CHARS};
use crate::voice::{self, VoiceInfo, VoicePreferences};

// ── Playback state machine ─────────────────────────────────────────

/// Current state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing queued or speaking.
    Idle,

    /// The driver is speaking the chunk at the cursor.
    Playing,

    /// Playback suspended; the cursor is kept.
    Paused,
}

// ── Events emitted by the player ───────────────────────────────────

/// Events emitted by the player to the UI / application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Player state changed.
    StateChanged(PlaybackState),

    /// A chunk was handed to the driver.
    ChunkStarted { index: usize, total: usize },

    /// The last chunk completed.
    Finished,

    /// A chunk could not be spoken. Playback moves on to the next one.
    Error(String),
}

// ── Player configuration ───────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Upper bound on chunk length, in characters.
    pub max_chunk_chars: usize,

    pub voice: VoicePreferences,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: MAX_CHUNK_CHARS,
            voice: VoicePreferences::default(),
        }
    }
}

/// One queued piece of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceChunk {
    pub text: String,
    pub index: usize,
}

// ── Speech player ──────────────────────────────────────────────────

pub struct SpeechPlayer {
    state: PlaybackState,

    driver: Box<dyn SpeechDriver>,

    /// Completion events coming back from the driver.
    driver_rx: mpsc::UnboundedReceiver<DriverEvent>,

    event_tx: mpsc::UnboundedSender<PlaybackEvent>,

    config: PlayerConfig,

    document: Option<SpeechDocument>,

    queue: Vec<UtteranceChunk>,

    voice: Option<VoiceInfo>,

    /// Index of the chunk being spoken, or next to speak.
    cursor: usize,

    session: SessionId,

    voices_ready: bool,

    /// The chunk at the cursor completed its predecessor while paused and
    /// still has to be handed to the driver on resume.
    deferred: bool,
}

impl SpeechPlayer {
    /// Create a player around a driver.
    ///
    /// Returns the player and a receiver for [`PlaybackEvent`]s. Driver
    /// events raised during subscription (typically the initial voice
    /// list) are applied before this returns.
    #[must_use]
    pub fn new(
        mut driver: Box<dyn SpeechDriver>,
        config: PlayerConfig,
    ) -> (Self, mpsc::UnboundedReceiver<PlaybackEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (driver_tx, driver_rx) = mpsc::unbounded_channel();
        driver.subscribe(driver_tx);

        let mut player = Self {
            state: PlaybackState::Idle,
            driver,
            driver_rx,
            event_tx,
            config,
            document: None,
            queue: Vec::new(),
            voice: None,
            cursor: 0,
            session: 0,
            voices_ready: false,
            deferred: false,
        };

        while let Ok(event) = player.driver_rx.try_recv() {
            player.handle_driver_event(event);
        }

        (player, event_rx)
    }

    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the driver has announced its voice list at least once.
    #[must_use]
    pub const fn voices_ready(&self) -> bool {
        self.voices_ready
    }

    #[must_use]
    pub fn queue(&self) -> &[UtteranceChunk] {
        &self.queue
    }

    /// Index of the chunk being spoken, or next to speak.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn voice(&self) -> Option<&VoiceInfo> {
        self.voice.as_ref()
    }

    #[must_use]
    pub const fn document(&self) -> Option<&SpeechDocument> {
        self.document.as_ref()
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.driver.is_supported()
    }

    // ── Document & queue ───────────────────────────────────────────

    /// Replace the document. A running session is stopped first.
    pub fn load_document(&mut self, document: SpeechDocument) {
        if self.state != PlaybackState::Idle {
            self.stop();
        }
        tracing::debug!(title = %document.title, "Speech document loaded");
        self.document = Some(document);
    }

    /// Rebuild the chunk queue and voice from the current document.
    ///
    /// Does nothing until the driver's voices are ready. Returns the number
    /// of queued chunks.
    pub fn build_queue(&mut self) -> usize {
        if !self.voices_ready {
            tracing::debug!("Voices not ready, queue not built");
            return 0;
        }

        let stream = self
            .document
            .as_ref()
            .map(SpeechDocument::to_stream)
            .unwrap_or_default();

        self.queue = text_utils::split_into_chunks(&stream, self.config.max_chunk_chars)
            .into_iter()
            .enumerate()
            .map(|(index, text)| UtteranceChunk { text, index })
            .collect();
        self.cursor = 0;
        self.deferred = false;

        let voices = self.driver.voices();
        self.voice = voice::select_voice(&voices, &self.config.voice).cloned();

        tracing::debug!(
            chunks = self.queue.len(),
            voice = ?self.voice.as_ref().map(|v| &v.name),
            "Speech queue built"
        );
        self.queue.len()
    }

    // ── Transport ──────────────────────────────────────────────────

    /// Toggle playback.
    ///
    /// From `Idle` a fresh session starts at chunk 0, from `Playing` the
    /// driver is paused, from `Paused` it resumes where it left off.
    pub fn play(&mut self) {
        if !self.driver.is_supported() {
            tracing::debug!("Speech synthesis unsupported, ignoring play");
            return;
        }
        if !self.voices_ready {
            tracing::debug!("Voices not ready, ignoring play");
            return;
        }

        match self.state {
            PlaybackState::Paused => {
                self.driver.resume();
                self.set_state(PlaybackState::Playing);
                if self.deferred {
                    self.deferred = false;
                    self.speak_current();
                }
            }
            PlaybackState::Playing => {
                self.driver.pause();
                self.set_state(PlaybackState::Paused);
            }
            PlaybackState::Idle => {
                self.driver.cancel();
                self.session += 1;
                if self.build_queue() == 0 {
                    tracing::debug!("Nothing to read");
                    return;
                }
                tracing::info!(
                    session = self.session,
                    chunks = self.queue.len(),
                    "Starting playback"
                );
                self.set_state(PlaybackState::Playing);
                self.speak_current();
            }
        }
    }

    /// Cancel the driver, discard the queue and return to `Idle`.
    pub fn stop(&mut self) {
        self.driver.cancel();
        self.session += 1;
        self.queue.clear();
        self.cursor = 0;
        self.deferred = false;
        self.set_state(PlaybackState::Idle);
    }

    // ── Driver events ──────────────────────────────────────────────

    /// Apply one driver event to the state machine.
    pub fn handle_driver_event(&mut self, event: DriverEvent) {
        let (session, index, failure) = match event {
            DriverEvent::VoicesChanged => {
                if !self.voices_ready {
                    tracing::debug!("Speech voices ready");
                }
                self.voices_ready = true;
                return;
            }
            DriverEvent::Ended { session, index } => (session, index, None),
            DriverEvent::Failed {
                session,
                index,
                message,
            } => (session, index, Some(message)),
        };

        if self.state == PlaybackState::Idle || session != self.session || index != self.cursor {
            tracing::trace!(session, index, "Ignoring stale driver event");
            return;
        }

        if let Some(message) = failure {
            tracing::warn!(index, %message, "Utterance failed");
            self.emit(PlaybackEvent::Error(message));
        }

        self.cursor += 1;
        match self.state {
            PlaybackState::Playing => self.speak_current(),
            PlaybackState::Paused => self.deferred = true,
            PlaybackState::Idle => {}
        }
    }

    /// Wait for the next driver event and apply it.
    ///
    /// Returns `false` once the driver has dropped its sender.
    pub async fn process_next_event(&mut self) -> bool {
        match self.driver_rx.recv().await {
            Some(event) => {
                self.handle_driver_event(event);
                true
            }
            None => false,
        }
    }

    /// Keep applying driver events until playback returns to `Idle`.
    pub async fn run_until_idle(&mut self) {
        while self.state != PlaybackState::Idle {
            if !self.process_next_event().await {
                tracing::warn!("Speech driver channel closed during playback");
                self.stop();
                break;
            }
        }
    }

    // ── Internal helpers ───────────────────────────────────────────

    /// Hand the chunk at the cursor to the driver, finishing when the queue
    /// is exhausted. Chunks the driver rejects are skipped.
    fn speak_current(&mut self) {
        while self.state == PlaybackState::Playing {
            let Some(chunk) = self.queue.get(self.cursor).cloned() else {
                self.finish();
                return;
            };

            let total = self.queue.len();
            self.emit(PlaybackEvent::ChunkStarted {
                index: chunk.index,
                total,
            });

            let utterance = Utterance {
                session: self.session,
                index: chunk.index,
                total,
                text: chunk.text,
                voice: self.voice.clone(),
            };
            match self.driver.speak(utterance) {
                Ok(()) => return,
                Err(e) => {
                    tracing::warn!(index = chunk.index, error = %e, "Driver rejected utterance");
                    self.emit(PlaybackEvent::Error(e.to_string()));
                    self.cursor += 1;
                }
            }
        }
    }

    fn finish(&mut self) {
        tracing::info!(session = self.session, "Playback finished");
        self.queue.clear();
        self.cursor = 0;
        self.emit(PlaybackEvent::Finished);
        self.set_state(PlaybackState::Idle);
    }

    fn set_state(&mut self, new_state: PlaybackState) {
        if self.state != new_state {
            tracing::debug!(old = ?self.state, new = ?new_state, "Playback state transition");
            self.state = new_state;
            self.emit(PlaybackEvent::StateChanged(new_state));
        }
    }

    /// Emit a playback event (best-effort - if the receiver is dropped, we log and move on).
    fn emit(&self, event: PlaybackEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("Playback event receiver dropped");
        }
    }
}

impl Drop for SpeechPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}
