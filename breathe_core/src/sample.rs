// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Playback samples and sample gating.
//!
//! A [`PlaybackSample`] is what the host reads off the media element when it
//! is notified: the current position and, once metadata has loaded, the
//! duration. [`SampleGate`] filters the notification stream so samples that
//! did not move the clock are not reprocessed.

/// A read-only snapshot of the media clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackSample {
    /// Playback position in seconds. Wraps to zero when the video loops.
    pub current_time: f64,
    /// Total media length in seconds, or `None` before metadata has loaded.
    pub duration: Option<f64>,
}

impl PlaybackSample {
    /// Builds a sample from raw media readings.
    ///
    /// Media elements report an unknown duration as `NaN` (and live streams
    /// as `+∞`); any duration that is not finite and positive is treated as
    /// unknown.
    #[must_use]
    pub fn new(current_time: f64, duration: f64) -> Self {
        Self {
            current_time,
            duration: known_duration(duration),
        }
    }

    /// Returns the completion percentage in `[0, 100]`, or `None` if the
    /// duration is unknown.
    #[must_use]
    pub fn raw_progress(&self) -> Option<f64> {
        let duration = self.duration?;
        if !self.current_time.is_finite() {
            return None;
        }
        Some((self.current_time / duration * 100.0).clamp(0.0, 100.0))
    }
}

/// Normalizes a reported media duration: `Some` only if finite and positive.
#[inline]
#[must_use]
pub fn known_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

/// Configuration for a [`SampleGate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleGateConfig {
    /// Samples closer than this (in seconds) to the last accepted one are
    /// dropped.
    pub min_step_seconds: f64,
}

impl SampleGateConfig {
    /// Default gate: 10 ms.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            min_step_seconds: 0.01,
        }
    }
}

impl Default for SampleGateConfig {
    fn default() -> Self {
        Self::web()
    }
}

/// Drops samples whose position moved less than
/// [`SampleGateConfig::min_step_seconds`] since the last accepted sample.
///
/// The comparison is on absolute distance, so loop wraps and backward seeks
/// pass straight through.
#[derive(Clone, Copy, Debug)]
pub struct SampleGate {
    config: SampleGateConfig,
    last_accepted: Option<f64>,
}

impl SampleGate {
    /// Creates a gate that accepts the next sample unconditionally.
    #[must_use]
    pub const fn new(config: SampleGateConfig) -> Self {
        Self {
            config,
            last_accepted: None,
        }
    }

    /// Returns `true` and records `current_time` if it moved far enough from
    /// the last accepted position.
    pub fn accept(&mut self, current_time: f64) -> bool {
        if !current_time.is_finite() {
            return false;
        }
        if let Some(last) = self.last_accepted
            && (current_time - last).abs() < self.config.min_step_seconds
        {
            return false;
        }
        self.last_accepted = Some(current_time);
        true
    }

    /// Forgets the last accepted position.
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

impl Default for SampleGate {
    fn default() -> Self {
        Self::new(SampleGateConfig::default())
    }
}
