// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media source abstraction.
//!
//! The media element is the source of truth for the playback clock and the
//! mute flag. The core reads position and duration through [`MediaSource`]
//! and expresses play and mute intent through [`MediaControl`]; backends
//! implement both for their native element.

use alloc::string::String;
use core::fmt;

use crate::sample::PlaybackSample;

/// Read access to the media clock.
pub trait MediaSource {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Total length in seconds, or `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;

    /// Reads both into a [`PlaybackSample`].
    fn sample(&self) -> PlaybackSample {
        PlaybackSample {
            current_time: self.current_time(),
            duration: self.duration(),
        }
    }
}

/// Play and mute control over a media element.
pub trait MediaControl: MediaSource {
    /// Returns the element's actual mute state.
    fn muted(&self) -> bool;

    /// Requests a mute state. The element may still report otherwise (for
    /// example when the platform forces muted autoplay).
    fn set_muted(&self, muted: bool);

    /// Starts playback. Resolves once playback has begun, or fails with the
    /// platform's reason (typically an autoplay policy rejection).
    fn play(&self) -> impl Future<Output = Result<(), PlayRejected>>;
}

/// A `play()` request refused by the platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayRejected {
    /// Platform-provided reason, e.g. `NotAllowedError`.
    pub reason: String,
}

impl PlayRejected {
    /// Creates a rejection with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PlayRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "play() rejected: {}", self.reason)
    }
}

impl core::error::Error for PlayRejected {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64, Option<f64>);

    impl MediaSource for Fixed {
        fn current_time(&self) -> f64 {
            self.0
        }
        fn duration(&self) -> Option<f64> {
            self.1
        }
    }

    #[test]
    fn sample_reads_both_fields() {
        let s = Fixed(4.5, Some(160.0)).sample();
        assert_eq!(s.current_time, 4.5);
        assert_eq!(s.duration, Some(160.0));
        assert_eq!(Fixed(1.0, None).sample().raw_progress(), None);
    }

    #[test]
    fn rejection_display() {
        let r = PlayRejected::new("NotAllowedError");
        assert_eq!(alloc::format!("{r}"), "play() rejected: NotAllowedError");
    }
}
