#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod document;
pub mod driver;
pub mod error;
pub mod player;
pub mod text_utils;
pub mod voice;

// Re-export key types for convenience
pub use document::SpeechDocument;
pub use driver::{DriverEvent, SessionId, SpeechDriver, TranscriptDriver, Utterance};
pub use error::SpeechError;
pub use player::{PlaybackEvent, PlaybackState, PlayerConfig, SpeechPlayer, UtteranceChunk};
pub use text_utils::MAX_CHUNK_CHARS;
pub use voice::{VoiceInfo, VoicePreferences, select_voice};
