//! Download affordance for the live audio.

use std::sync::OnceLock;

use bytes::Bytes;
use regex::Regex;

use crate::audio::AudioFormat;

pub const DEFAULT_TITLE: &str = "Your Audiobook";

static UNSAFE_FILENAME_CHARS: OnceLock<Regex> = OnceLock::new();

/// A user-downloadable file built from the live audio. Writing it is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Bytes,
}

impl Download {
    pub(crate) fn new(title: &str, format: AudioFormat, bytes: Bytes) -> Self {
        Self {
            file_name: format!("{}.{}", sanitize_title(title), format.extension()),
            mime_type: format.mime_type(),
            bytes,
        }
    }
}

/// Turn an audiobook title into a portable file stem.
pub fn sanitize_title(title: &str) -> String {
    let pattern = UNSAFE_FILENAME_CHARS.get_or_init(|| {
        Regex::new(r#"[\\/:*?"<>|\x00-\x1f]+"#).expect("static filename pattern is valid")
    });
    let cleaned = pattern.replace_all(title, "_");
    let cleaned = cleaned.trim().trim_matches('.').trim();
    if cleaned.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        cleaned.to_string()
    }
}
