//! Configuration system (layered: defaults < config file < env).
//!
//! The ElevenLabs credential is not stored here. It travels with each
//! [`GenerationRequest`](crate::audio::GenerationRequest) and is only read
//! from the environment on demand via [`EchoverseConfig::credential_from_env`].

use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::audio::elevenlabs::{DEFAULT_BASE_URL, DEFAULT_MODEL_ID};
use crate::audio::{VoiceSettings, DEFAULT_VOICE_ID};
use crate::error::{EchoverseError, Result};
use crate::generation::DEFAULT_TITLE;

pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";
pub const BASE_URL_ENV: &str = "ELEVENLABS_BASE_URL";
pub const MODEL_ID_ENV: &str = "ELEVENLABS_MODEL_ID";
pub const OUTPUT_FORMAT_ENV: &str = "ELEVENLABS_OUTPUT_FORMAT";
pub const DEFAULT_VOICE_ENV: &str = "ECHOVERSE_DEFAULT_VOICE";
pub const TITLE_ENV: &str = "ECHOVERSE_TITLE";

/// Synthesis and presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default, deny_unknown_fields)]
pub struct EchoverseConfig {
    #[builder(default = DEFAULT_BASE_URL.to_string(), into)]
    pub base_url: String,
    #[builder(default = DEFAULT_MODEL_ID.to_string(), into)]
    pub model_id: String,
    /// ElevenLabs `output_format`, e.g. `mp3_44100_128`. Provider default when unset.
    #[builder(into)]
    pub output_format: Option<String>,
    #[builder(default)]
    pub voice_settings: VoiceSettings,
    #[builder(default = DEFAULT_VOICE_ID.to_string(), into)]
    pub default_voice: String,
    /// Title used to name downloads.
    #[builder(default = DEFAULT_TITLE.to_string(), into)]
    pub title: String,
}

impl Default for EchoverseConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EchoverseConfig {
    /// Defaults, then the user config file if present, then environment overrides.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let base = match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// Defaults plus environment overrides; never touches the filesystem beyond `.env`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::default().with_env_overrides()
    }

    /// Parse a TOML config file. Unknown keys (including any attempt to store
    /// an API key) are rejected.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EchoverseError::Configuration(format!("Failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&raw).map_err(|e| {
            EchoverseError::Configuration(format!("Invalid config {}: {e}", path.display()))
        })
    }

    /// `~/.echoverse/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".echoverse").join("config.toml"))
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = non_empty_env(BASE_URL_ENV) {
            self.base_url = url;
        }
        if let Some(model) = non_empty_env(MODEL_ID_ENV) {
            self.model_id = model;
        }
        if let Some(format) = non_empty_env(OUTPUT_FORMAT_ENV) {
            self.output_format = Some(format);
        }
        if let Some(voice) = non_empty_env(DEFAULT_VOICE_ENV) {
            self.default_voice = voice;
        }
        if let Some(title) = non_empty_env(TITLE_ENV) {
            self.title = title;
        }
        self
    }

    /// Read the ElevenLabs API key from `ELEVENLABS_API_KEY`.
    pub fn credential_from_env() -> Option<String> {
        non_empty_env(API_KEY_ENV)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
