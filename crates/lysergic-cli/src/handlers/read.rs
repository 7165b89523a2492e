//! Read-aloud handler.
//!
//! The terminal has no synthesis engine, so the report is played through a
//! transcript driver that prints each utterance as it is spoken.

use anyhow::Result;
use lysergic_speech::{
    PlaybackEvent, PlayerConfig, SpeechDocument, SpeechPlayer, TranscriptDriver, VoicePreferences,
};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::checked_url;

pub async fn execute(ctx: &CliContext, url: &str, voice: Option<String>) -> Result<()> {
    let url = checked_url(url)?;
    let detail = ctx
        .app()
        .explore()
        .experience(&url)
        .await
        .map_err(CliError::from)?;

    let config = PlayerConfig {
        voice: VoicePreferences {
            name: voice,
            ..VoicePreferences::default()
        },
        ..PlayerConfig::default()
    };
    let driver = TranscriptDriver::new(std::io::stdout());
    let (mut player, mut events) = SpeechPlayer::new(Box::new(driver), config);

    player.load_document(SpeechDocument::from_experience(&detail));
    player.play();
    player.run_until_idle().await;

    let mut failures = 0usize;
    while let Ok(event) = events.try_recv() {
        if let PlaybackEvent::Error(message) = event {
            tracing::warn!(%message, "Chunk skipped");
            failures += 1;
        }
    }
    if failures > 0 {
        eprintln!("{failures} chunk(s) could not be read.");
    }
    Ok(())
}
