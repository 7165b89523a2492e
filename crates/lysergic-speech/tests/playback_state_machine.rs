//! Integration tests for the `SpeechPlayer` state machine.
//!
//! A recording driver stands in for the synthesis engine: it logs every
//! call and never completes utterances on its own, so each test decides
//! exactly when chunks end.

use std::sync::{Arc, Mutex};

use lysergic_speech::{
    DriverEvent, PlaybackEvent, PlaybackState, PlayerConfig, SpeechDocument, SpeechDriver,
    SpeechError, SpeechPlayer, Utterance, VoiceInfo,
};
use tokio::sync::mpsc;

// ── Recording driver ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Speak { session: u64, index: usize },
    Pause,
    Resume,
    Cancel,
}

#[derive(Default)]
struct Shared {
    calls: Vec<Call>,
    events: Option<mpsc::UnboundedSender<DriverEvent>>,
}

struct RecordingDriver {
    shared: Arc<Mutex<Shared>>,
    supported: bool,
    announce_voices: bool,
    reject_index: Option<usize>,
}

impl SpeechDriver for RecordingDriver {
    fn subscribe(&mut self, events: mpsc::UnboundedSender<DriverEvent>) {
        if self.announce_voices {
            events.send(DriverEvent::VoicesChanged).unwrap();
        }
        self.shared.lock().unwrap().events = Some(events);
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn voices(&self) -> Vec<VoiceInfo> {
        vec![
            VoiceInfo::new("Daniel", "en-GB").as_default(),
            VoiceInfo::new("Samantha Female", "en-US"),
        ]
    }

    fn speak(&mut self, utterance: Utterance) -> Result<(), SpeechError> {
        let mut shared = self.shared.lock().unwrap();
        shared.calls.push(Call::Speak {
            session: utterance.session,
            index: utterance.index,
        });
        if self.reject_index == Some(utterance.index) {
            return Err(SpeechError::Driver("engine busy".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.shared.lock().unwrap().calls.push(Call::Pause);
    }

    fn resume(&mut self) {
        self.shared.lock().unwrap().calls.push(Call::Resume);
    }

    fn cancel(&mut self) {
        self.shared.lock().unwrap().calls.push(Call::Cancel);
    }
}

// ── Helpers ────────────────────────────────────────────────────────

struct Harness {
    player: SpeechPlayer,
    events: mpsc::UnboundedReceiver<PlaybackEvent>,
    shared: Arc<Mutex<Shared>>,
}

impl Harness {
    fn build(supported: bool, announce_voices: bool, reject_index: Option<usize>) -> Self {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let driver = RecordingDriver {
            shared: shared.clone(),
            supported,
            announce_voices,
            reject_index,
        };
        let config = PlayerConfig {
            max_chunk_chars: 20,
            ..PlayerConfig::default()
        };
        let (player, events) = SpeechPlayer::new(Box::new(driver), config);
        Self {
            player,
            events,
            shared,
        }
    }

    fn new() -> Self {
        Self::build(true, true, None)
    }

    /// A player holding a three-chunk document.
    fn loaded() -> Self {
        let mut harness = Self::new();
        harness.player.load_document(three_chunk_doc());
        harness
    }

    fn calls(&self) -> Vec<Call> {
        self.shared.lock().unwrap().calls.clone()
    }

    fn clear_calls(&self) {
        self.shared.lock().unwrap().calls.clear();
    }

    fn speaks(&self) -> Vec<usize> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Speak { index, .. } => Some(index),
                _ => None,
            })
            .collect()
    }

    fn last_session(&self) -> u64 {
        self.calls()
            .into_iter()
            .rev()
            .find_map(|c| match c {
                Call::Speak { session, .. } => Some(session),
                _ => None,
            })
            .unwrap()
    }

    fn end(&mut self, session: u64, index: usize) {
        self.player
            .handle_driver_event(DriverEvent::Ended { session, index });
    }

    /// Complete the chunk the player is waiting on.
    fn end_current(&mut self) {
        let session = self.last_session();
        let index = self.player.position();
        self.end(session, index);
    }
}

/// A document whose stream splits into exactly three 20-char chunks.
fn three_chunk_doc() -> SpeechDocument {
    let body = format!("{}. {}. {}.", "B".repeat(13), "C".repeat(18), "D".repeat(18));
    SpeechDocument::new("Aaaa", body)
}

/// Drain all pending events from the event receiver and return them.
fn drain_events(rx: &mut mpsc::UnboundedReceiver<PlaybackEvent>) -> Vec<PlaybackEvent> {
    let mut events = Vec::new();
    while let Ok(e) = rx.try_recv() {
        events.push(e);
    }
    events
}

/// Collect only the PlaybackState values from StateChanged events.
fn states_from(events: &[PlaybackEvent]) -> Vec<PlaybackState> {
    events
        .iter()
        .filter_map(|e| {
            if let PlaybackEvent::StateChanged(s) = e {
                Some(*s)
            } else {
                None
            }
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────

#[test]
fn initial_state_is_idle_with_voices_ready() {
    let harness = Harness::new();
    assert_eq!(harness.player.state(), PlaybackState::Idle);
    assert!(harness.player.voices_ready());
    assert!(harness.player.queue().is_empty());
}

#[test]
fn document_splits_into_three_chunks() {
    let mut harness = Harness::loaded();
    assert_eq!(harness.player.build_queue(), 3);

    let texts: Vec<&str> = harness
        .player
        .queue()
        .iter()
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(texts[0], format!("Aaaa. {}.", "B".repeat(13)));
    assert_eq!(texts[1], format!(" {}.", "C".repeat(18)));
    assert_eq!(texts[2], format!(" {}.", "D".repeat(18)));
    assert!(texts.iter().all(|t| t.chars().count() <= 20));
    assert_eq!(texts.concat(), three_chunk_doc().to_stream());
    assert_eq!(harness.player.voice().unwrap().name, "Samantha Female");
}

#[test]
fn play_from_idle_cancels_then_speaks_first_chunk() {
    let mut harness = Harness::loaded();
    harness.player.play();

    assert_eq!(harness.player.state(), PlaybackState::Playing);
    let calls = harness.calls();
    assert_eq!(calls[0], Call::Cancel);
    assert!(matches!(calls[1], Call::Speak { index: 0, .. }));

    let events = drain_events(&mut harness.events);
    assert_eq!(states_from(&events), vec![PlaybackState::Playing]);
    assert!(events.contains(&PlaybackEvent::ChunkStarted { index: 0, total: 3 }));
}

#[test]
fn chunks_advance_until_idle() {
    let mut harness = Harness::loaded();
    harness.player.play();
    let total = harness.player.queue().len();

    for _ in 0..total {
        harness.end_current();
    }

    assert_eq!(harness.player.state(), PlaybackState::Idle);
    assert_eq!(harness.speaks(), (0..total).collect::<Vec<_>>());
    assert!(harness.player.queue().is_empty());

    let events = drain_events(&mut harness.events);
    assert!(events.contains(&PlaybackEvent::Finished));
    assert_eq!(
        states_from(&events),
        vec![PlaybackState::Playing, PlaybackState::Idle]
    );
}

#[test]
fn pause_and_resume_keep_position() {
    let mut harness = Harness::loaded();
    harness.player.play();
    harness.end_current();
    assert_eq!(harness.player.position(), 1);

    harness.player.play();
    assert_eq!(harness.player.state(), PlaybackState::Paused);
    assert_eq!(harness.calls().last(), Some(&Call::Pause));

    harness.clear_calls();
    harness.player.play();
    assert_eq!(harness.player.state(), PlaybackState::Playing);
    assert_eq!(harness.player.position(), 1);
    // Resuming does not restart or rebuild.
    assert_eq!(harness.calls(), vec![Call::Resume]);
}

#[test]
fn chunk_ending_while_paused_is_spoken_on_resume() {
    let mut harness = Harness::loaded();
    harness.player.play();
    harness.player.play();
    assert_eq!(harness.player.state(), PlaybackState::Paused);

    // The engine finished chunk 0 just as the pause arrived.
    harness.end_current();
    assert_eq!(harness.player.position(), 1);
    assert_eq!(harness.speaks(), vec![0]);

    harness.player.play();
    assert_eq!(harness.speaks(), vec![0, 1]);
    assert_eq!(harness.player.state(), PlaybackState::Playing);
}

#[test]
fn stop_forces_idle_from_every_state() {
    // Idle
    let mut harness = Harness::loaded();
    harness.player.stop();
    assert_eq!(harness.player.state(), PlaybackState::Idle);

    // Playing
    harness.player.play();
    harness.player.stop();
    assert_eq!(harness.player.state(), PlaybackState::Idle);
    assert!(harness.player.queue().is_empty());
    assert_eq!(harness.calls().last(), Some(&Call::Cancel));

    // Paused
    harness.player.play();
    harness.player.play();
    assert_eq!(harness.player.state(), PlaybackState::Paused);
    harness.player.stop();
    assert_eq!(harness.player.state(), PlaybackState::Idle);
}

#[test]
fn events_from_stopped_session_are_ignored() {
    let mut harness = Harness::loaded();
    harness.player.play();
    let old_session = harness.last_session();
    harness.player.stop();

    harness.player.play();
    let session = harness.last_session();
    assert_ne!(session, old_session);
    harness.clear_calls();

    harness.end(old_session, 0);
    assert_eq!(harness.player.position(), 0);
    assert!(harness.speaks().is_empty());

    // Out-of-order index within the live session is ignored too.
    harness.end(session, 2);
    assert_eq!(harness.player.position(), 0);

    harness.end(session, 0);
    assert_eq!(harness.player.position(), 1);
    assert_eq!(harness.calls(), vec![Call::Speak { session, index: 1 }]);
}

#[test]
fn events_after_stop_do_not_restart_playback() {
    let mut harness = Harness::loaded();
    harness.player.play();
    let session = harness.last_session();
    harness.player.stop();
    drain_events(&mut harness.events);

    harness.end(session, 0);
    assert_eq!(harness.player.state(), PlaybackState::Idle);
    assert!(drain_events(&mut harness.events).is_empty());
}

#[test]
fn failed_chunk_advances_and_reports() {
    let mut harness = Harness::loaded();
    harness.player.play();
    let session = harness.last_session();
    drain_events(&mut harness.events);

    harness.player.handle_driver_event(DriverEvent::Failed {
        session,
        index: 0,
        message: "interrupted".to_string(),
    });

    assert_eq!(harness.player.position(), 1);
    assert_eq!(harness.speaks(), vec![0, 1]);
    let events = drain_events(&mut harness.events);
    assert!(events.contains(&PlaybackEvent::Error("interrupted".to_string())));
}

#[test]
fn rejected_chunk_is_skipped() {
    let mut harness = Harness::build(true, true, Some(0));
    harness.player.load_document(three_chunk_doc());
    harness.player.play();

    assert_eq!(harness.player.state(), PlaybackState::Playing);
    assert_eq!(harness.player.position(), 1);
    assert_eq!(harness.speaks(), vec![0, 1]);
    let events = drain_events(&mut harness.events);
    assert!(events.iter().any(|e| matches!(e, PlaybackEvent::Error(_))));
}

#[test]
fn play_is_noop_until_voices_ready() {
    let mut harness = Harness::build(true, false, None);
    harness.player.load_document(three_chunk_doc());

    assert!(!harness.player.voices_ready());
    assert_eq!(harness.player.build_queue(), 0);
    harness.player.play();
    assert_eq!(harness.player.state(), PlaybackState::Idle);
    assert!(harness.calls().is_empty());

    harness.player.handle_driver_event(DriverEvent::VoicesChanged);
    harness.player.play();
    assert_eq!(harness.player.state(), PlaybackState::Playing);
}

#[test]
fn play_is_noop_when_unsupported() {
    let mut harness = Harness::build(false, true, None);
    harness.player.load_document(three_chunk_doc());
    harness.player.play();

    assert_eq!(harness.player.state(), PlaybackState::Idle);
    assert!(harness.calls().is_empty());
    assert!(drain_events(&mut harness.events).is_empty());
}

#[test]
fn play_without_document_stays_idle() {
    let mut harness = Harness::new();
    harness.player.play();
    assert_eq!(harness.player.state(), PlaybackState::Idle);
    assert!(harness.speaks().is_empty());
}

#[test]
fn loading_new_document_stops_playback() {
    let mut harness = Harness::loaded();
    harness.player.play();
    harness.end_current();

    harness
        .player
        .load_document(SpeechDocument::new("Another", "Short."));
    assert_eq!(harness.player.state(), PlaybackState::Idle);
    assert!(harness.player.queue().is_empty());

    harness.player.play();
    assert_eq!(harness.player.position(), 0);
    assert_eq!(harness.player.queue().len(), 1);
}

#[tokio::test]
async fn run_until_idle_consumes_driver_events() {
    let mut harness = Harness::loaded();
    harness.player.play();
    let total = harness.player.queue().len();
    let sender = harness.shared.lock().unwrap().events.clone().unwrap();
    let session = harness.last_session();

    for index in 0..total {
        sender.send(DriverEvent::Ended { session, index }).unwrap();
    }
    harness.player.run_until_idle().await;

    assert_eq!(harness.player.state(), PlaybackState::Idle);
    assert_eq!(harness.speaks(), (0..total).collect::<Vec<_>>());
}

#[test]
fn drop_cancels_driver() {
    let harness = Harness::loaded();
    let Harness {
        mut player, shared, ..
    } = harness;
    player.play();
    drop(player);

    assert_eq!(shared.lock().unwrap().calls.last(), Some(&Call::Cancel));
}
