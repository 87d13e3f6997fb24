//! Audio-related types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Audio container/encoding of a synthesized byte stream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    Pcm16,
}

impl AudioFormat {
    /// Detect the format from a `Content-Type` header value.
    ///
    /// Returns `None` for generic or non-audio types.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .map(str::trim)
            .unwrap_or_default()
            .to_ascii_lowercase();
        match mime.as_str() {
            "audio/mpeg" | "audio/mp3" | "audio/mpga" => Some(Self::Mp3),
            "audio/opus" | "audio/ogg" | "application/ogg" => Some(Self::Opus),
            "audio/aac" | "audio/mp4" => Some(Self::Aac),
            "audio/flac" | "audio/x-flac" => Some(Self::Flac),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/pcm" | "audio/l16" => Some(Self::Pcm16),
            _ => None,
        }
    }

    /// Infer the format from an ElevenLabs `output_format` query value such
    /// as `mp3_44100_128` or `pcm_16000`.
    pub fn from_output_format(output_format: &str) -> Option<Self> {
        let codec = output_format.split('_').next().unwrap_or_default();
        match codec {
            "mp3" => Some(Self::Mp3),
            "opus" => Some(Self::Opus),
            "pcm" => Some(Self::Pcm16),
            "wav" => Some(Self::Wav),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/ogg",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
            Self::Pcm16 => "audio/pcm",
        }
    }

    /// File extension used for downloads.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "ogg",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Pcm16 => "pcm",
        }
    }
}

/// A selectable voice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Voice {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Id of the voice selected when nothing else is chosen (Aria).
pub const DEFAULT_VOICE_ID: &str = "9BWtsMINqrJLrRacOk9x";

/// The fixed set of voices a request may use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCatalog {
    voices: Vec<Voice>,
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self::new(vec![
            Voice::new(DEFAULT_VOICE_ID, "Aria", "Clear and professional"),
            Voice::new("CwhRBWXzGAHq8TQ4Fs17", "Roger", "Deep and authoritative"),
            Voice::new("EXAVITQu4vr4xnSDxMaL", "Sarah", "Warm and engaging"),
            Voice::new("FGY2WhTYpPnrIDTdsKH5", "Laura", "Smooth and confident"),
            Voice::new("IKne3meq5aSn9XLyUdCD", "Charlie", "Youthful and energetic"),
            Voice::new("JBFqnCBsd6RMkjVDRZzb", "George", "Wise and distinguished"),
        ])
    }
}

impl VoiceCatalog {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self { voices }
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn contains(&self, voice_id: &str) -> bool {
        self.get(voice_id).is_some()
    }

    pub fn get(&self, voice_id: &str) -> Option<&Voice> {
        self.voices.iter().find(|voice| voice.id == voice_id)
    }

    /// Look up a voice by id, or by name ignoring case.
    pub fn resolve(&self, id_or_name: &str) -> Option<&Voice> {
        let needle = id_or_name.trim();
        self.get(needle).or_else(|| {
            self.voices
                .iter()
                .find(|voice| voice.name.eq_ignore_ascii_case(needle))
        })
    }
}

/// ElevenLabs voice tuning sent with every request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VoiceSettings {
    pub stability: f64,
    pub similarity_boost: f64,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }
}

impl VoiceSettings {
    /// Clamp both knobs into `[0, 1]`, replacing non-finite values with the defaults.
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        let clamp = |value: f64, fallback: f64| {
            if value.is_nan() {
                fallback
            } else {
                value.clamp(0.0, 1.0)
            }
        };
        Self {
            stability: clamp(self.stability, defaults.stability),
            similarity_boost: clamp(self.similarity_boost, defaults.similarity_boost),
        }
    }
}
