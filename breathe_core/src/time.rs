// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time in microseconds.
//!
//! [`HostTime`] is a point on the host's monotonic clock (on the web,
//! `performance.now()`), stored as whole microseconds so it can be compared
//! and hashed. [`Duration`] is a span on the same clock.
//!
//! Media positions are *not* host time: they come from the media element in
//! fractional seconds and wrap on every loop. Only deadlines (debounce timers)
//! and frame timestamps use these types.

use core::fmt;

/// A point in time on the host's monotonic clock, in microseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw microsecond value.
    #[inline]
    #[must_use]
    pub const fn micros(self) -> u64 {
        self.0
    }

    /// Creates a [`HostTime`] from a fractional millisecond timestamp, such as
    /// a `DOMHighResTimeStamp`.
    ///
    /// Negative and non-finite inputs map to zero.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "host timestamps are small positive values; µs fits in u64"
    )]
    pub fn from_millis_f64(ms: f64) -> Self {
        if ms.is_finite() && ms > 0.0 {
            Self((ms * 1000.0) as u64)
        } else {
            Self(0)
        }
    }

    /// Returns this time as fractional milliseconds.
    #[inline]
    #[must_use]
    pub fn as_millis_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }

    /// Adds a duration, saturating at the end of the clock.
    #[inline]
    #[must_use]
    pub const fn saturating_add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.0))
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({}µs)", self.0)
    }
}

/// A span of host time, in microseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from whole milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms.saturating_mul(1000))
    }

    /// Returns the raw microsecond value.
    #[inline]
    #[must_use]
    pub const fn micros(self) -> u64 {
        self.0
    }

    /// Returns the duration as fractional milliseconds.
    #[inline]
    #[must_use]
    pub fn as_millis_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Returns the duration as whole milliseconds, rounding up so a timer
    /// armed with it never fires early.
    #[inline]
    #[must_use]
    pub const fn as_millis_ceil(self) -> u64 {
        self.0.div_ceil(1000)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({}µs)", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_conversion() {
        let t = HostTime::from_millis_f64(16.667);
        assert_eq!(t.micros(), 16_667);
        assert!((t.as_millis_f64() - 16.667).abs() < 1e-9, "round trip");
    }

    #[test]
    fn invalid_timestamps_clamp_to_zero() {
        assert_eq!(HostTime::from_millis_f64(-5.0), HostTime(0));
        assert_eq!(HostTime::from_millis_f64(f64::NAN), HostTime(0));
        assert_eq!(HostTime::from_millis_f64(f64::INFINITY), HostTime(0));
    }

    #[test]
    fn duration_rounds_up_to_whole_millis() {
        assert_eq!(Duration::from_millis(250).as_millis_ceil(), 250);
        assert_eq!(Duration(250_001).as_millis_ceil(), 251);
        assert_eq!(Duration::ZERO.as_millis_ceil(), 0);
    }

    #[test]
    fn arithmetic_saturates() {
        let t = HostTime(1000);
        let d = Duration(200);
        assert_eq!(t.saturating_add(d), HostTime(1200));
        assert_eq!(t.saturating_duration_since(HostTime(400)), Duration(600));
        assert_eq!(t.saturating_duration_since(HostTime(1500)), Duration::ZERO);
        assert_eq!(HostTime(u64::MAX).saturating_add(d), HostTime(u64::MAX));
    }
}
