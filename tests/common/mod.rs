//! Shared test helpers: scripted synthesizer and recording media element.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Notify;

use echoverse::audio::{
    AudioFormat, AudioResource, GenerationRequest, HandleId, PlayableSource, SpeechSynthesizer,
    SynthesizedAudio, Voice, VoiceCatalog,
};
use echoverse::error::EchoverseError;
use echoverse::generation::GenerationController;
use echoverse::playback::{MediaElement, PlaybackController, PlaybackEvent, PlaybackEventSink};

pub fn catalog() -> VoiceCatalog {
    VoiceCatalog::new(vec![
        Voice::new("V1", "First", "Test voice"),
        Voice::new("V2", "Second", "Another test voice"),
    ])
}

pub fn request(text: &str) -> GenerationRequest {
    GenerationRequest::new(text, "V1", "k1")
}

pub fn audio(len: usize) -> SynthesizedAudio {
    SynthesizedAudio {
        bytes: Bytes::from(vec![0xAB; len]),
        format: AudioFormat::Mp3,
    }
}

/// A synthesizer that replays queued outcomes and counts invocations.
#[derive(Default)]
pub struct ScriptedSynthesizer {
    outcomes: Mutex<VecDeque<Result<SynthesizedAudio, EchoverseError>>>,
    texts: Mutex<Vec<String>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every call until the gate is notified.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn then(self, outcome: Result<SynthesizedAudio, EchoverseError>) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for ScriptedSynthesizer {
    async fn synthesize(
        &self,
        request: &GenerationRequest,
    ) -> Result<SynthesizedAudio, EchoverseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(request.text.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EchoverseError::Transport("no scripted outcome".into())))
    }
}

/// Commands observed by [`RecordingMedia`].
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    Load(HandleId),
    Unload,
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
}

/// Test-side view of a [`RecordingMedia`] after it has been boxed.
#[derive(Clone, Default)]
pub struct MediaProbe {
    calls: Arc<Mutex<Vec<MediaCall>>>,
    fail_play: Arc<AtomicBool>,
    failing_loads: Arc<AtomicUsize>,
}

impl MediaProbe {
    pub fn calls(&self) -> Vec<MediaCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn fail_play(&self, fail: bool) {
        self.fail_play.store(fail, Ordering::SeqCst);
    }

    /// Make the next `count` loads fail.
    pub fn fail_next_loads(&self, count: usize) {
        self.failing_loads.store(count, Ordering::SeqCst);
    }

    fn record(&self, call: MediaCall) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Media element that records commands and, when given a registry, refuses
/// to load sources that no longer resolve.
pub struct RecordingMedia {
    probe: MediaProbe,
    resource: Option<Arc<AudioResource>>,
}

impl RecordingMedia {
    pub fn new() -> (Self, MediaProbe) {
        let probe = MediaProbe::default();
        (
            Self {
                probe: probe.clone(),
                resource: None,
            },
            probe,
        )
    }

    pub fn resolving(resource: Arc<AudioResource>) -> (Self, MediaProbe) {
        let (mut media, probe) = Self::new();
        media.resource = Some(resource);
        (media, probe)
    }
}

impl MediaElement for RecordingMedia {
    fn load(&mut self, source: &PlayableSource) -> Result<(), EchoverseError> {
        let failing = &self.probe.failing_loads;
        if failing
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(EchoverseError::Playback("unsupported source".into()));
        }
        if let Some(resource) = &self.resource {
            if resource.resolve(source).is_none() {
                return Err(EchoverseError::Playback("dangling source".into()));
            }
        }
        self.probe.record(MediaCall::Load(source.id));
        Ok(())
    }

    fn unload(&mut self) {
        self.probe.record(MediaCall::Unload);
    }

    fn play(&mut self) -> Result<(), EchoverseError> {
        if self.probe.fail_play.load(Ordering::SeqCst) {
            return Err(EchoverseError::Playback("decode error".into()));
        }
        self.probe.record(MediaCall::Play);
        Ok(())
    }

    fn pause(&mut self) {
        self.probe.record(MediaCall::Pause);
    }

    fn seek(&mut self, position_seconds: f64) -> Result<(), EchoverseError> {
        self.probe.record(MediaCall::Seek(position_seconds));
        Ok(())
    }

    fn set_volume(&mut self, volume: f64) {
        self.probe.record(MediaCall::SetVolume(volume));
    }
}

pub fn capture_events() -> (PlaybackEventSink, Arc<Mutex<Vec<PlaybackEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::<PlaybackEvent>::new()));
    let sink_events = events.clone();
    let sink: PlaybackEventSink = Arc::new(move |event| {
        if let Ok(mut guard) = sink_events.lock() {
            guard.push(event);
        }
    });
    (sink, events)
}

/// Controller wired to a scripted synthesizer and a resolving recording media element.
pub fn controller(
    synthesizer: Arc<ScriptedSynthesizer>,
) -> (GenerationController, MediaProbe, Arc<AudioResource>) {
    let resource = Arc::new(AudioResource::new());
    let (media, probe) = RecordingMedia::resolving(resource.clone());
    let controller =
        GenerationController::new(synthesizer, PlaybackController::new(Box::new(media)))
            .with_resource(resource.clone())
            .with_catalog(catalog());
    (controller, probe, resource)
}
