//! Audio capabilities: synthesis, format/voice types, and ownership of generated audio.

pub mod elevenlabs;
pub mod resource;
pub mod synthesis;
pub mod types;

pub use elevenlabs::ElevenLabsClient;
pub use resource::{AudioHandle, AudioResource, HandleId, PlayableSource};
pub use synthesis::{GenerationRequest, SpeechSynthesizer, SynthesizedAudio};
pub use types::*;
