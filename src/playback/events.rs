//! Playback event types and the synchronous emitter.

use std::sync::Arc;

use serde::Serialize;

use super::PlaybackStatus;
use crate::audio::HandleId;

/// Concrete notifications emitted by the playback controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEventPayload {
    Progress {
        position_seconds: f64,
        duration_seconds: Option<f64>,
    },
    DurationKnown {
        duration_seconds: f64,
    },
    Ended,
    StatusChanged {
        status: PlaybackStatus,
    },
}

/// A playback notification for one bound source.
///
/// `seq` restarts at 1 on every `bind` and on every jump (a seek, or play
/// after the end). `Progress` positions never decrease within one sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackEvent {
    pub source: HandleId,
    pub seq: u64,
    pub payload: PlaybackEventPayload,
}

/// Callback receiving playback events, invoked inline on the caller's task.
pub type PlaybackEventSink = Arc<dyn Fn(PlaybackEvent) + Send + Sync>;

pub(super) struct PlaybackEventEmitter {
    seq: u64,
    sink: Option<PlaybackEventSink>,
}

impl PlaybackEventEmitter {
    pub(super) fn new(sink: Option<PlaybackEventSink>) -> Self {
        Self { seq: 1, sink }
    }

    pub(super) fn set_sink(&mut self, sink: Option<PlaybackEventSink>) {
        self.sink = sink;
    }

    pub(super) fn reset(&mut self) {
        self.seq = 1;
    }

    pub(super) fn emit(&mut self, source: HandleId, payload: PlaybackEventPayload) {
        let Some(sink) = &self.sink else {
            return;
        };
        let seq = self.seq;
        self.seq += 1;
        (sink)(PlaybackEvent {
            source,
            seq,
            payload,
        });
    }
}
