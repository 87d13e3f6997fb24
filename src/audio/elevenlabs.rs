//! ElevenLabs text-to-speech provider (`/v1/text-to-speech/{voice_id}`).

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use super::synthesis::{GenerationRequest, SpeechSynthesizer, SynthesizedAudio};
use super::types::{AudioFormat, VoiceSettings};
use crate::config::EchoverseConfig;
use crate::error::EchoverseError;
use crate::provider::http::{elevenlabs_headers, shared_client, status_to_error};

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// ElevenLabs TTS client. Stateless: every call is a single POST.
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    base_url: String,
    model_id: String,
    output_format: Option<String>,
    voice_settings: VoiceSettings,
}

impl Default for ElevenLabsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ElevenLabsClient {
    pub fn new() -> Self {
        Self::new_with_base_url(DEFAULT_BASE_URL)
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            output_format: None,
            voice_settings: VoiceSettings::default(),
        }
    }

    pub fn from_config(config: &EchoverseConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            model_id: config.model_id.clone(),
            output_format: config.output_format.clone(),
            voice_settings: config.voice_settings.clamped(),
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Request a specific encoding, e.g. `mp3_44100_128`.
    pub fn with_output_format(mut self, output_format: impl Into<String>) -> Self {
        self.output_format = Some(output_format.into());
        self
    }

    pub fn with_voice_settings(mut self, voice_settings: VoiceSettings) -> Self {
        self.voice_settings = voice_settings.clamped();
        self
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn expected_format(&self) -> AudioFormat {
        self.output_format
            .as_deref()
            .and_then(AudioFormat::from_output_format)
            .unwrap_or(AudioFormat::Mp3)
    }

    fn speech_url(&self, voice_id: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.base_url.trim_end_matches('/'),
            voice_id
        )
    }
}

#[derive(Debug, Serialize)]
struct SpeechPayload<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(
        &self,
        request: &GenerationRequest,
    ) -> Result<SynthesizedAudio, EchoverseError> {
        let expected = self.expected_format();
        let headers = elevenlabs_headers(request.credential(), expected.mime_type())?;
        let payload = SpeechPayload {
            text: &request.text,
            model_id: &self.model_id,
            voice_settings: self.voice_settings,
        };

        let mut builder = shared_client()
            .post(self.speech_url(&request.voice_id))
            .headers(headers)
            .json(&payload);
        if let Some(output_format) = &self.output_format {
            builder = builder.query(&[("output_format", output_format)]);
        }

        tracing::debug!(
            voice_id = %request.voice_id,
            model_id = %self.model_id,
            text_len = request.text.len(),
            "Dispatching synthesis request"
        );

        let response = builder.send().await?;
        parse_speech_response(response, expected).await
    }
}

async fn parse_speech_response(
    response: reqwest::Response,
    expected: AudioFormat,
) -> Result<SynthesizedAudio, EchoverseError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_to_error(status.as_u16(), &body));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        return Err(EchoverseError::InvalidResponse(
            "Expected audio payload, got JSON response".to_string(),
        ));
    }

    let format = match AudioFormat::from_content_type(&content_type) {
        Some(format) => format,
        None if content_type.is_empty() || content_type.starts_with("application/octet-stream") => {
            expected
        }
        None => {
            return Err(EchoverseError::InvalidResponse(format!(
                "Unexpected speech response MIME type '{content_type}'"
            )))
        }
    };

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(EchoverseError::InvalidResponse(
            "Speech response contained empty audio payload".to_string(),
        ));
    }

    Ok(SynthesizedAudio { bytes, format })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speech_url_trims_trailing_slash() {
        let client = ElevenLabsClient::new_with_base_url("http://localhost:9/");
        assert_eq!(
            client.speech_url("V1"),
            "http://localhost:9/v1/text-to-speech/V1"
        );
    }

    #[test]
    fn expected_format_follows_output_format() {
        let client = ElevenLabsClient::new().with_output_format("pcm_24000");
        assert_eq!(client.expected_format(), AudioFormat::Pcm16);
        assert_eq!(ElevenLabsClient::new().expected_format(), AudioFormat::Mp3);
    }

    #[test]
    fn payload_uses_snake_case_wire_names() {
        let payload = SpeechPayload {
            text: "Hello",
            model_id: DEFAULT_MODEL_ID,
            voice_settings: VoiceSettings::default(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "text": "Hello",
                "model_id": "eleven_multilingual_v2",
                "voice_settings": {"stability": 0.5, "similarity_boost": 0.75}
            })
        );
    }
}
