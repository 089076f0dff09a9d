// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for a breathing session.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Session`](crate::session::Session) calls as it processes samples, frames,
//! and playback results. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.

use crate::playback::PlaybackError;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Who changed the mute state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MuteSource {
    /// The user pressed the mute button.
    User,
    /// The media element reported a state different from the one requested.
    Reported,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted for every time-update the session sees after start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleEvent {
    /// Host time of the notification.
    pub now: HostTime,
    /// Media position in seconds.
    pub current_time: f64,
    /// Media duration, if known.
    pub duration: Option<f64>,
    /// Whether the sample gate let it through.
    pub accepted: bool,
}

/// Emitted when an accepted sample has been mapped to a phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseResolvedEvent<'a> {
    /// Host time of the notification.
    pub now: HostTime,
    /// Media position in seconds.
    pub current_time: f64,
    /// Resolved instruction text, if any.
    pub phase: Option<&'a str>,
}

/// Emitted when the debouncer commits new instruction text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseCommittedEvent<'a> {
    /// Host time of the commit.
    pub now: HostTime,
    /// Committed text, if any.
    pub text: Option<&'a str>,
}

/// Emitted when the animator jumps across a discontinuity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSnapEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Host time of the frame.
    pub now: HostTime,
    /// Value before the jump.
    pub from: f64,
    /// Value after the jump.
    pub to: f64,
}

/// Emitted when the animator comes to rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressSettledEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Host time of the frame.
    pub now: HostTime,
    /// Resting value.
    pub value: f64,
}

/// Emitted once playback has started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackStartEvent {
    /// Mute state the session asked for.
    pub requested_muted: bool,
    /// Mute state playback actually started with.
    pub muted: bool,
    /// Whether the muted retry was needed.
    pub fallback: bool,
}

/// Emitted when playback could not be started.
#[derive(Clone, Copy, Debug)]
pub struct PlaybackErrorEvent<'a> {
    /// The terminal error.
    pub error: &'a PlaybackError,
}

/// Emitted when the session's mute state changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MuteChangedEvent {
    /// New mute state.
    pub muted: bool,
    /// What caused the change.
    pub source: MuteSource,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a session.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called for every time-update after start.
    fn on_sample(&mut self, e: &SampleEvent) {
        _ = e;
    }

    /// Called when an accepted sample is mapped to a phase.
    fn on_phase_resolved(&mut self, e: &PhaseResolvedEvent<'_>) {
        _ = e;
    }

    /// Called when new instruction text is committed.
    fn on_phase_committed(&mut self, e: &PhaseCommittedEvent<'_>) {
        _ = e;
    }

    /// Called when progress jumps across a discontinuity.
    fn on_progress_snap(&mut self, e: &ProgressSnapEvent) {
        _ = e;
    }

    /// Called when progress comes to rest.
    fn on_progress_settled(&mut self, e: &ProgressSettledEvent) {
        _ = e;
    }

    /// Called when playback has started.
    fn on_playback_start(&mut self, e: &PlaybackStartEvent) {
        _ = e;
    }

    /// Called when playback could not be started.
    fn on_playback_error(&mut self, e: &PlaybackErrorEvent<'_>) {
        _ = e;
    }

    /// Called when the mute state changes.
    fn on_mute_changed(&mut self, e: &MuteChangedEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Dispatches to the sink when tracing is compiled in.
macro_rules! dispatch {
    ($self:ident, $method:ident, $e:ident) => {{
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $e;
        }
    }};
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SampleEvent`].
    #[inline]
    pub fn sample(&mut self, e: &SampleEvent) {
        dispatch!(self, on_sample, e);
    }

    /// Emits a [`PhaseResolvedEvent`].
    #[inline]
    pub fn phase_resolved(&mut self, e: &PhaseResolvedEvent<'_>) {
        dispatch!(self, on_phase_resolved, e);
    }

    /// Emits a [`PhaseCommittedEvent`].
    #[inline]
    pub fn phase_committed(&mut self, e: &PhaseCommittedEvent<'_>) {
        dispatch!(self, on_phase_committed, e);
    }

    /// Emits a [`ProgressSnapEvent`].
    #[inline]
    pub fn progress_snap(&mut self, e: &ProgressSnapEvent) {
        dispatch!(self, on_progress_snap, e);
    }

    /// Emits a [`ProgressSettledEvent`].
    #[inline]
    pub fn progress_settled(&mut self, e: &ProgressSettledEvent) {
        dispatch!(self, on_progress_settled, e);
    }

    /// Emits a [`PlaybackStartEvent`].
    #[inline]
    pub fn playback_start(&mut self, e: &PlaybackStartEvent) {
        dispatch!(self, on_playback_start, e);
    }

    /// Emits a [`PlaybackErrorEvent`].
    #[inline]
    pub fn playback_error(&mut self, e: &PlaybackErrorEvent<'_>) {
        dispatch!(self, on_playback_error, e);
    }

    /// Emits a [`MuteChangedEvent`].
    #[inline]
    pub fn mute_changed(&mut self, e: &MuteChangedEvent) {
        dispatch!(self, on_mute_changed, e);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
