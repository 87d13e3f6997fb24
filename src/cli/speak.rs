//! CLI command handlers for listing voices and generating audiobooks.

use std::path::Path;
use std::sync::Arc;

use super::SpeakArgs;
use crate::audio::{ElevenLabsClient, GenerationRequest, PlayableSource, VoiceCatalog};
use crate::config::EchoverseConfig;
use crate::error::EchoverseError;
use crate::generation::GenerationController;
use crate::playback::{MediaElement, PlaybackController};
use crate::text::TextStats;

/// Media element for a terminal with no audio output: accepts every command.
#[derive(Debug, Default)]
pub struct HeadlessMedia;

impl MediaElement for HeadlessMedia {
    fn load(&mut self, _source: &PlayableSource) -> Result<(), EchoverseError> {
        Ok(())
    }

    fn unload(&mut self) {}

    fn play(&mut self) -> Result<(), EchoverseError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek(&mut self, _position_seconds: f64) -> Result<(), EchoverseError> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f64) {}
}

/// Handle `echoverse voices`.
pub fn handle_voices() {
    let config = EchoverseConfig::from_env();
    for voice in VoiceCatalog::default().voices() {
        let marker = if voice.id == config.default_voice { "*" } else { " " };
        println!("{marker} {:<8} {}  {}", voice.name, voice.id, voice.description);
    }
}

/// Handle `echoverse speak`.
pub async fn handle_speak(args: SpeakArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = EchoverseConfig::load()?;
    let text = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => read_text_file(&path)?,
        (None, None) => std::io::read_to_string(std::io::stdin())?,
    };

    let catalog = VoiceCatalog::default();
    let wanted = args.voice.unwrap_or_else(|| config.default_voice.clone());
    let voice = catalog
        .resolve(&wanted)
        .ok_or_else(|| EchoverseError::UnknownVoice(wanted.clone()))?
        .clone();
    let credential =
        EchoverseConfig::credential_from_env().ok_or(EchoverseError::MissingCredential)?;

    let stats = TextStats::of(&text);
    eprintln!(
        "⏳ Generating {} words (~{} min) with {}...",
        stats.words, stats.estimated_minutes, voice.name
    );

    let controller = GenerationController::new(
        Arc::new(ElevenLabsClient::from_config(&config)),
        PlaybackController::new(Box::new(HeadlessMedia)),
    )
    .with_catalog(catalog);
    controller
        .generate(GenerationRequest::new(text, voice.id, credential))
        .await?;

    let title = args.title.unwrap_or(config.title);
    let download = controller
        .download(&title)
        .ok_or_else(|| EchoverseError::InvalidResponse("No audio available".to_string()))?;

    tokio::fs::create_dir_all(&args.out).await?;
    let path = args.out.join(&download.file_name);
    tokio::fs::write(&path, &download.bytes).await?;
    println!("✅ {}", path.display());
    Ok(())
}

/// Only `.txt` files are accepted.
fn read_text_file(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let is_text = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if !is_text {
        return Err(format!("Not a plain-text file: {}", path.display()).into());
    }
    Ok(std::fs::read_to_string(path)?)
}
