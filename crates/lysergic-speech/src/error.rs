//! Speech playback error types.

/// Errors reported by speech drivers.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// The platform has no speech synthesis facility.
    #[error("Speech synthesis is not supported on this platform")]
    Unsupported,

    /// The driver rejected an utterance.
    #[error("Speech driver failed: {0}")]
    Driver(String),

    /// Writing a transcript failed.
    #[error("Transcript output failed: {0}")]
    Io(#[from] std::io::Error),
}
