//! Convenience re-exports for common use.

pub use crate::audio::{
    AudioFormat, AudioResource, ElevenLabsClient, GenerationRequest, PlayableSource,
    SpeechSynthesizer, Voice, VoiceCatalog, VoiceSettings,
};
pub use crate::config::EchoverseConfig;
pub use crate::error::{EchoverseError, Result};
pub use crate::generation::{Download, GenerationController, GenerationStatus};
pub use crate::playback::{
    MediaElement, MediaEvent, PlaybackController, PlaybackEvent, PlaybackState, PlaybackStatus,
};
