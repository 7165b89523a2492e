//! Speech driver trait - the seam between the player and a synthesis engine.
//!
//! A driver speaks one utterance at a time and reports completion through a
//! [`DriverEvent`] channel handed to it by the player. Every utterance
//! carries the session id and chunk index it belongs to, so the player can
//! discard events that arrive after a stop or restart.

use std::io::Write;

use tokio::sync::mpsc;

use crate::error::SpeechError;
use crate::voice::VoiceInfo;

/// Identifies one playback run; bumped on every start and stop.
pub type SessionId = u64;

/// One chunk handed to the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub session: SessionId,
    pub index: usize,
    /// Number of chunks in the session's queue.
    pub total: usize,
    pub text: String,
    /// `None` uses the driver default.
    pub voice: Option<VoiceInfo>,
}

/// Notifications from a driver back to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// The utterance finished normally.
    Ended { session: SessionId, index: usize },

    /// The utterance was abandoned by the engine.
    Failed {
        session: SessionId,
        index: usize,
        message: String,
    },

    /// The voice list became available or changed.
    VoicesChanged,
}

// ── Driver trait ───────────────────────────────────────────────────

/// Engine-agnostic speech synthesis driver.
pub trait SpeechDriver: Send {
    /// Register the channel completion events are delivered on.
    ///
    /// Called once by the player at construction.
    fn subscribe(&mut self, events: mpsc::UnboundedSender<DriverEvent>);

    /// Whether speech synthesis is available at all.
    fn is_supported(&self) -> bool;

    /// Voices currently offered by the engine.
    fn voices(&self) -> Vec<VoiceInfo>;

    /// Start speaking an utterance. Completion is reported asynchronously.
    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError>;

    fn pause(&mut self);

    fn resume(&mut self);

    /// Drop the current and any queued utterances without reporting them.
    fn cancel(&mut self);
}

// ── Transcript driver ──────────────────────────────────────────────

/// A driver that writes each utterance as a line of text and completes it
/// immediately.
///
/// Used by the command line, which has no synthesis engine of its own.
pub struct TranscriptDriver<W> {
    out: W,
    voices: Vec<VoiceInfo>,
    events: Option<mpsc::UnboundedSender<DriverEvent>>,
}

impl<W: Write + Send> TranscriptDriver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            voices: vec![VoiceInfo::new("Transcript", "en-US").as_default()],
            events: None,
        }
    }

    #[must_use]
    pub fn with_voices(mut self, voices: Vec<VoiceInfo>) -> Self {
        self.voices = voices;
        self
    }

    fn notify(&self, event: DriverEvent) {
        if let Some(events) = &self.events {
            if events.send(event).is_err() {
                tracing::warn!("Speech player dropped its driver channel");
            }
        }
    }
}

impl<W: Write + Send> SpeechDriver for TranscriptDriver<W> {
    fn subscribe(&mut self, events: mpsc::UnboundedSender<DriverEvent>) {
        self.events = Some(events);
        self.notify(DriverEvent::VoicesChanged);
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn voices(&self) -> Vec<VoiceInfo> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        writeln!(
            self.out,
            "[{}/{}] {}",
            utterance.index + 1,
            utterance.total,
            utterance.text.trim()
        )?;
        self.out.flush()?;

        self.notify(DriverEvent::Ended {
            session: utterance.session,
            index: utterance.index,
        });
        Ok(())
    }

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn cancel(&mut self) {}
}
