//! Ownership registry for generated audio.
//!
//! Adopted bytes are reachable through a `blob:` style URL until the owning
//! [`AudioHandle`] is released. Media elements resolve that URL through the
//! registry, so a released source can never be played.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::AudioFormat;

const URL_PREFIX: &str = "blob:echoverse/";

/// Unique id of an adopted audio stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleId(Uuid);

impl HandleId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Read-only reference to a live audio stream, handed to playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableSource {
    pub id: HandleId,
    pub url: String,
    pub format: AudioFormat,
    pub byte_len: usize,
}

/// Exclusive ownership of an adopted audio stream.
///
/// Not `Clone`: there is exactly one owner, which hands the
/// handle back to [`AudioResource::release`].
#[derive(Debug, PartialEq, Eq)]
pub struct AudioHandle {
    source: PlayableSource,
}

impl AudioHandle {
    pub fn id(&self) -> HandleId {
        self.source.id
    }

    pub fn url(&self) -> &str {
        &self.source.url
    }

    pub fn format(&self) -> AudioFormat {
        self.source.format
    }

    pub fn byte_len(&self) -> usize {
        self.source.byte_len
    }

    pub fn source(&self) -> PlayableSource {
        self.source.clone()
    }
}

/// Registry of live audio streams keyed by handle id.
#[derive(Debug, Default)]
pub struct AudioResource {
    live: Mutex<HashMap<HandleId, Bytes>>,
}

impl AudioResource {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<HandleId, Bytes>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take ownership of `bytes` and derive a playable reference for them.
    pub fn adopt(&self, bytes: Bytes, format: AudioFormat) -> AudioHandle {
        let id = HandleId::new();
        let source = PlayableSource {
            id,
            url: format!("{URL_PREFIX}{id}"),
            format,
            byte_len: bytes.len(),
        };
        self.entries().insert(id, bytes);
        tracing::debug!(handle = %id, bytes = source.byte_len, %format, "Adopted audio");
        AudioHandle { source }
    }

    /// Invalidate the handle's URL and free its bytes. Releasing twice is a no-op.
    pub fn release(&self, handle: &AudioHandle) {
        if self.entries().remove(&handle.id()).is_some() {
            tracing::debug!(handle = %handle.id(), "Released audio");
        }
    }

    /// Bytes behind a live source, or `None` once it has been released.
    pub fn resolve(&self, source: &PlayableSource) -> Option<Bytes> {
        self.entries().get(&source.id).cloned()
    }

    /// Resolve a `blob:echoverse/...` URL.
    pub fn resolve_url(&self, url: &str) -> Option<Bytes> {
        let entries = self.entries();
        let raw = url.strip_prefix(URL_PREFIX)?;
        let id = Uuid::parse_str(raw).ok().map(HandleId)?;
        entries.get(&id).cloned()
    }

    pub fn is_live(&self, handle: &AudioHandle) -> bool {
        self.entries().contains_key(&handle.id())
    }

    pub fn live_count(&self) -> usize {
        self.entries().len()
    }
}
