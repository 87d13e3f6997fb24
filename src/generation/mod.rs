//! Generation orchestration: one synthesis in flight, one live audio handle.

pub mod download;

pub use download::{sanitize_title, Download, DEFAULT_TITLE};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::audio::{
    AudioHandle, AudioResource, GenerationRequest, PlayableSource, SpeechSynthesizer,
    SynthesizedAudio, VoiceCatalog,
};
use crate::error::{EchoverseError, Result};
use crate::playback::PlaybackController;

/// UI-facing generation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationStatus {
    Idle,
    Generating,
    Ready,
    Failed(EchoverseError),
}

impl GenerationStatus {
    pub fn is_generating(&self) -> bool {
        matches!(self, Self::Generating)
    }
}

#[derive(Debug)]
struct ControllerState {
    status: GenerationStatus,
    live: Option<AudioHandle>,
}

/// Coordinates synthesis, the live audio handle and playback.
///
/// `generate` takes `&self`, so the controller can be shared (e.g. in an
/// `Arc`) and a duplicate submission observed while the first is suspended.
/// Internal locks are never held across an `.await`.
pub struct GenerationController {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    resource: Arc<AudioResource>,
    catalog: VoiceCatalog,
    state: Mutex<ControllerState>,
    playback: Mutex<PlaybackController>,
}

impl std::fmt::Debug for GenerationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationController")
            .field("catalog", &self.catalog)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Restores the pre-call status if a `generate` future is dropped mid-flight.
struct InFlight<'a> {
    state: &'a Mutex<ControllerState>,
    previous: Option<GenerationStatus>,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.previous = None;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.status.is_generating() {
                tracing::debug!("Generation dropped before completion");
                state.status = previous;
            }
        }
    }
}

impl GenerationController {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, playback: PlaybackController) -> Self {
        Self {
            synthesizer,
            resource: Arc::new(AudioResource::new()),
            catalog: VoiceCatalog::default(),
            state: Mutex::new(ControllerState {
                status: GenerationStatus::Idle,
                live: None,
            }),
            playback: Mutex::new(playback),
        }
    }

    /// Share an existing registry, e.g. one a media element resolves through.
    pub fn with_resource(mut self, resource: Arc<AudioResource>) -> Self {
        self.resource = resource;
        self
    }

    pub fn with_catalog(mut self, catalog: VoiceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locked access to the transport. Do not hold the guard across an `.await`.
    pub fn playback(&self) -> MutexGuard<'_, PlaybackController> {
        self.playback.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn resource(&self) -> &Arc<AudioResource> {
        &self.resource
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    pub fn status(&self) -> GenerationStatus {
        self.lock_state().status.clone()
    }

    /// Reference to the live audio, if a generation has succeeded.
    pub fn current_source(&self) -> Option<PlayableSource> {
        self.lock_state().live.as_ref().map(AudioHandle::source)
    }

    pub fn has_audio(&self) -> bool {
        self.lock_state().live.is_some()
    }

    /// Synthesize `request` and make the result the live, bound audio.
    ///
    /// Rejected immediately with [`EchoverseError::AlreadyInProgress`] while
    /// another call is outstanding. Client-side rejections leave the status
    /// untouched; synthesis failures set `Failed` and keep any prior audio.
    pub async fn generate(&self, request: GenerationRequest) -> Result<PlayableSource> {
        let in_flight = self.begin(&request)?;
        let outcome = self.synthesizer.synthesize(&request).await;
        in_flight.disarm();

        match outcome.and_then(Self::check_audio) {
            Ok(audio) => self.accept(audio),
            Err(error) => {
                tracing::warn!(voice_id = %request.voice_id, error = %error, "Generation failed");
                self.fail(error.clone());
                Err(error)
            }
        }
    }

    fn begin(&self, request: &GenerationRequest) -> Result<InFlight<'_>> {
        let mut state = self.lock_state();
        if state.status.is_generating() {
            tracing::warn!("Rejected generation while another is in flight");
            return Err(EchoverseError::AlreadyInProgress);
        }
        self.validate(request)?;

        let previous = std::mem::replace(&mut state.status, GenerationStatus::Generating);
        tracing::debug!(
            voice_id = %request.voice_id,
            text_len = request.text.len(),
            "Generation started"
        );
        Ok(InFlight {
            state: &self.state,
            previous: Some(previous),
        })
    }

    fn validate(&self, request: &GenerationRequest) -> Result<()> {
        if request.text.trim().is_empty() {
            return Err(EchoverseError::EmptyInput);
        }
        if request.credential().trim().is_empty() {
            return Err(EchoverseError::MissingCredential);
        }
        if !self.catalog.contains(&request.voice_id) {
            return Err(EchoverseError::UnknownVoice(request.voice_id.clone()));
        }
        Ok(())
    }

    fn check_audio(audio: SynthesizedAudio) -> Result<SynthesizedAudio> {
        if audio.bytes.is_empty() {
            return Err(EchoverseError::InvalidResponse(
                "Synthesizer returned no audio".to_string(),
            ));
        }
        Ok(audio)
    }

    /// Adopt, bind, then release the superseded handle.
    fn accept(&self, audio: SynthesizedAudio) -> Result<PlayableSource> {
        let handle = self.resource.adopt(audio.bytes, audio.format);
        let source = handle.source();

        let bound = self.playback().bind(&source);
        if let Err(error) = bound {
            self.resource.release(&handle);
            self.restore_playback();
            self.fail(error.clone());
            return Err(error);
        }

        let superseded = {
            let mut state = self.lock_state();
            state.status = GenerationStatus::Ready;
            state.live.replace(handle)
        };
        if let Some(old) = superseded {
            self.resource.release(&old);
        }

        tracing::info!(source = %source.id, bytes = source.byte_len, "Generation ready");
        Ok(source)
    }

    /// Rebind the prior live source after a failed bind left playback detached.
    fn restore_playback(&self) {
        let Some(previous) = self.current_source() else {
            return;
        };
        if let Err(error) = self.playback().bind(&previous) {
            tracing::warn!(source = %previous.id, error = %error, "Could not restore previous source");
        }
    }

    fn fail(&self, error: EchoverseError) {
        self.lock_state().status = GenerationStatus::Failed(error);
    }

    /// Build the download for the live audio, named after `title`.
    pub fn download(&self, title: &str) -> Option<Download> {
        let state = self.lock_state();
        let handle = state.live.as_ref()?;
        let bytes = self.resource.resolve(&handle.source())?;
        Some(Download::new(title, handle.format(), bytes))
    }

    /// Detach playback and release the live handle. The controller stays usable.
    pub fn shutdown(&self) {
        self.playback().unbind();
        let live = self.lock_state().live.take();
        if let Some(handle) = live {
            self.resource.release(&handle);
        }
    }
}

impl Drop for GenerationController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
