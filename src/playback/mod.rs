//! Playback transport: keeps a [`PlaybackState`] in sync with a live media element.
//!
//! The controller is synchronous. Commands configure the injected
//! [`MediaElement`] and return immediately; the element's later reports are
//! fed back through [`PlaybackController::handle_media_event`] and re-emitted
//! to the registered [`PlaybackEventSink`] in non-decreasing position order
//! for the bound source.

pub mod events;
pub mod media;

pub use events::{PlaybackEvent, PlaybackEventPayload, PlaybackEventSink};
pub use media::{MediaElement, MediaEvent, MediaEventKind};

use serde::Serialize;
use strum::Display;

use crate::audio::{HandleId, PlayableSource};
use crate::error::Result;
use events::PlaybackEventEmitter;

/// Transport state of the bound source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlaybackStatus {
    Idle,
    Playing,
    Paused,
    Ended,
}

/// Snapshot of the transport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub position_seconds: f64,
    /// `None` until the media element has loaded metadata.
    pub duration_seconds: Option<f64>,
    pub volume: f64,
}

impl PlaybackState {
    fn idle(volume: f64) -> Self {
        Self {
            status: PlaybackStatus::Idle,
            position_seconds: 0.0,
            duration_seconds: None,
            volume,
        }
    }

    /// Position as a fraction of the duration, when the duration is known and non-zero.
    pub fn progress_fraction(&self) -> Option<f64> {
        let duration = self.duration_seconds?;
        if duration <= 0.0 {
            return None;
        }
        Some((self.position_seconds / duration).clamp(0.0, 1.0))
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::idle(1.0)
    }
}

/// Render seconds as `m:ss`.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Drives one media element on behalf of whichever source is bound.
pub struct PlaybackController {
    media: Box<dyn MediaElement>,
    bound: Option<PlayableSource>,
    state: PlaybackState,
    last_reported: f64,
    emitter: PlaybackEventEmitter,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("bound", &self.bound)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl PlaybackController {
    pub fn new(media: Box<dyn MediaElement>) -> Self {
        Self {
            media,
            bound: None,
            state: PlaybackState::default(),
            last_reported: 0.0,
            emitter: PlaybackEventEmitter::new(None),
        }
    }

    pub fn with_event_sink(mut self, sink: PlaybackEventSink) -> Self {
        self.emitter.set_sink(Some(sink));
        self
    }

    pub fn set_event_sink(&mut self, sink: Option<PlaybackEventSink>) {
        self.emitter.set_sink(sink);
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn source(&self) -> Option<&PlayableSource> {
        self.bound.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    fn bound_id(&self) -> Option<HandleId> {
        self.bound.as_ref().map(|source| source.id)
    }

    /// Attach to a new source and reset to Idle. Volume carries over.
    ///
    /// If the media element refuses the source the controller is left unbound.
    pub fn bind(&mut self, source: &PlayableSource) -> Result<()> {
        if self.bound.take().is_some() {
            self.media.unload();
        }
        self.state = PlaybackState::idle(self.state.volume);
        self.last_reported = 0.0;
        self.emitter.reset();

        if let Err(error) = self.media.load(source) {
            tracing::warn!(source = %source.id, error = %error, "Media element rejected source");
            return Err(error);
        }
        self.media.set_volume(self.state.volume);
        self.bound = Some(source.clone());

        tracing::info!(source = %source.id, format = %source.format, "Bound playback source");
        self.emitter.emit(
            source.id,
            PlaybackEventPayload::StatusChanged {
                status: PlaybackStatus::Idle,
            },
        );
        Ok(())
    }

    /// Detach the current source, if any.
    pub fn unbind(&mut self) {
        if self.bound.take().is_some() {
            self.media.unload();
        }
        self.state = PlaybackState::idle(self.state.volume);
        self.last_reported = 0.0;
        self.emitter.reset();
    }

    /// Start or resume playback. Playing from Ended restarts at zero.
    pub fn play(&mut self) -> Result<()> {
        let Some(id) = self.bound_id() else {
            return Ok(());
        };
        let restarting = match self.state.status {
            PlaybackStatus::Playing => return Ok(()),
            PlaybackStatus::Ended => true,
            PlaybackStatus::Idle | PlaybackStatus::Paused => false,
        };

        if restarting {
            self.media.seek(0.0)?;
        }
        let started = self.media.play();
        if restarting {
            self.restart_at(id, 0.0);
        }
        if let Err(error) = started {
            tracing::warn!(source = %id, error = %error, "Failed to start playback");
            return Err(error);
        }

        self.set_status(id, PlaybackStatus::Playing);
        Ok(())
    }

    pub fn pause(&mut self) {
        let Some(id) = self.bound_id() else {
            return;
        };
        if self.state.status == PlaybackStatus::Playing {
            self.media.pause();
            self.set_status(id, PlaybackStatus::Paused);
        }
    }

    /// Play when not playing, pause when playing.
    pub fn toggle(&mut self) -> Result<()> {
        if self.state.status == PlaybackStatus::Playing {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    /// Jump to `fraction` of the duration; ignored until the duration is known.
    ///
    /// Seeking an ended source resumes playback from the new position.
    pub fn seek(&mut self, fraction: f64) -> Result<()> {
        let Some(id) = self.bound_id() else {
            return Ok(());
        };
        let Some(duration) = self.state.duration_seconds else {
            return Ok(());
        };

        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let position = (fraction * duration).clamp(0.0, duration);

        if let Err(error) = self.media.seek(position) {
            tracing::warn!(source = %id, position, error = %error, "Seek failed");
            return Err(error);
        }
        self.restart_at(id, position);

        if self.state.status == PlaybackStatus::Ended {
            if let Err(error) = self.media.play() {
                tracing::warn!(source = %id, error = %error, "Failed to resume playback after seek");
                return Err(error);
            }
            self.set_status(id, PlaybackStatus::Playing);
        }
        Ok(())
    }

    /// Set the volume, clamped to `[0, 1]`. NaN is ignored.
    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.state.volume = volume;
        if self.bound.is_some() {
            self.media.set_volume(volume);
        }
    }

    /// Apply a report from the media element.
    ///
    /// Returns `false` when the event was dropped: nothing bound, a different
    /// source, a non-finite value, or a time update older than the last one
    /// reported.
    pub fn handle_media_event(&mut self, event: MediaEvent) -> bool {
        let Some(id) = self.bound_id() else {
            return false;
        };
        if event.source != id {
            tracing::trace!(source = %event.source, bound = %id, "Dropping media event for stale source");
            return false;
        }

        match event.kind {
            MediaEventKind::DurationKnown { duration_seconds } => {
                if !duration_seconds.is_finite() || duration_seconds < 0.0 {
                    return false;
                }
                self.state.duration_seconds = Some(duration_seconds);
                if self.state.position_seconds > duration_seconds {
                    self.state.position_seconds = duration_seconds;
                    self.last_reported = duration_seconds;
                }
                self.emitter
                    .emit(id, PlaybackEventPayload::DurationKnown { duration_seconds });
            }
            MediaEventKind::TimeUpdate { position_seconds } => {
                if !position_seconds.is_finite() {
                    return false;
                }
                let mut position = position_seconds.max(0.0);
                if let Some(duration) = self.state.duration_seconds {
                    position = position.min(duration);
                }
                if position < self.last_reported {
                    return false;
                }
                self.move_to(id, position);
            }
            MediaEventKind::Ended => {
                if let Some(duration) = self.state.duration_seconds {
                    self.state.position_seconds = duration;
                    self.last_reported = duration;
                }
                self.emitter.emit(id, PlaybackEventPayload::Ended);
                self.set_status(id, PlaybackStatus::Ended);
            }
        }
        true
    }

    /// Jump to `position` and open a new event sequence, so consumers see
    /// `seq == 1` wherever the position may move backwards.
    fn restart_at(&mut self, id: HandleId, position: f64) {
        self.emitter.reset();
        self.move_to(id, position);
    }

    fn move_to(&mut self, id: HandleId, position: f64) {
        self.state.position_seconds = position;
        self.last_reported = position;
        self.emitter.emit(
            id,
            PlaybackEventPayload::Progress {
                position_seconds: position,
                duration_seconds: self.state.duration_seconds,
            },
        );
    }

    fn set_status(&mut self, id: HandleId, status: PlaybackStatus) {
        if self.state.status == status {
            return;
        }
        self.state.status = status;
        self.emitter
            .emit(id, PlaybackEventPayload::StatusChanged { status });
    }
}
