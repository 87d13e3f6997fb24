//! The media primitive driven by the playback controller.

use serde::{Deserialize, Serialize};

use crate::audio::{HandleId, PlayableSource};
use crate::error::EchoverseError;

/// A live media-playing primitive (an `<audio>` element, a native sink, ...).
///
/// Every call returns immediately; time, metadata and completion are
/// reported back later as [`MediaEvent`]s fed to
/// [`PlaybackController::handle_media_event`](super::PlaybackController::handle_media_event).
pub trait MediaElement: Send {
    /// Point the element at a new source. Positions reset to zero.
    fn load(&mut self, source: &PlayableSource) -> Result<(), EchoverseError>;

    /// Detach the current source.
    fn unload(&mut self);

    fn play(&mut self) -> Result<(), EchoverseError>;

    fn pause(&mut self);

    fn seek(&mut self, position_seconds: f64) -> Result<(), EchoverseError>;

    /// `volume` is already clamped to `[0, 1]`.
    fn set_volume(&mut self, volume: f64);
}

/// What the media element reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaEventKind {
    TimeUpdate { position_seconds: f64 },
    DurationKnown { duration_seconds: f64 },
    Ended,
}

/// A report from the media element, tagged with the source it concerns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediaEvent {
    pub source: HandleId,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn time_update(source: HandleId, position_seconds: f64) -> Self {
        Self {
            source,
            kind: MediaEventKind::TimeUpdate { position_seconds },
        }
    }

    pub fn duration_known(source: HandleId, duration_seconds: f64) -> Self {
        Self {
            source,
            kind: MediaEventKind::DurationKnown { duration_seconds },
        }
    }

    pub fn ended(source: HandleId) -> Self {
        Self {
            source,
            kind: MediaEventKind::Ended,
        }
    }
}
