//! Text-to-speech request types and the synthesizer trait.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

use super::types::AudioFormat;
use crate::error::EchoverseError;

/// A single submission: text, a catalog voice, and the caller's credential.
///
/// The credential is a per-request capability. It is never stored by the
/// controller and is redacted from `Debug` output.
#[derive(Clone)]
pub struct GenerationRequest {
    pub text: String,
    pub voice_id: String,
    credential: String,
}

impl GenerationRequest {
    pub fn new(
        text: impl Into<String>,
        voice_id: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            credential: credential.into(),
        }
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }
}

impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("text_len", &self.text.len())
            .field("voice_id", &self.voice_id)
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// A complete audio byte stream returned by a synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub bytes: Bytes,
    pub format: AudioFormat,
}

/// Trait for remote text-to-speech providers.
///
/// Implementations make exactly one outbound call per invocation and never
/// retry. Inputs are validated by the caller.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, request: &GenerationRequest)
        -> Result<SynthesizedAudio, EchoverseError>;
}
