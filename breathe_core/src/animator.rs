// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Progress easing.
//!
//! The media element reports its position a few times per second at an
//! irregular, browser-throttled cadence. Rendering that raw percentage
//! directly makes the indicator step. [`ProgressAnimator`] instead eases a
//! rendered value toward the latest raw target once per display frame:
//!
//! ```text
//! delta = target - value
//! |delta| > discontinuity_threshold  → value = target        (seek / loop wrap)
//! |delta| < snap_threshold           → value = target, settle
//! otherwise                          → value += delta * easing_factor
//! ```
//!
//! Once settled, the animator reports [`TickRequest::Settled`] and the host
//! stops requesting frames until a new target arrives.

use crate::timing::TickRequest;

/// Tunables for [`ProgressAnimator`]. All thresholds are in percentage
/// points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorConfig {
    /// Fraction of the remaining distance covered per frame (0.0–1.0).
    pub easing_factor: f64,
    /// Distance below which the value snaps to the target and settles.
    pub snap_threshold: f64,
    /// Distance above which the value jumps straight to the target instead
    /// of sweeping across the indicator.
    pub discontinuity_threshold: f64,
}

impl AnimatorConfig {
    /// Default tuning for a 60–120 Hz display.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            easing_factor: 0.15,
            snap_threshold: 0.05,
            discontinuity_threshold: 10.0,
        }
    }
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self::web()
    }
}

/// Result of one [`ProgressAnimator::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Moved part of the way toward the target.
    Eased(f64),
    /// Jumped across a discontinuity.
    Snapped {
        /// Value before the jump.
        from: f64,
        /// New value (the target).
        to: f64,
    },
    /// Reached the target (or was already there).
    Settled(f64),
}

impl Step {
    /// Returns the animated value after this step.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Eased(v) | Self::Settled(v) => v,
            Self::Snapped { to, .. } => to,
        }
    }

    /// Returns whether another frame is needed after this step.
    #[must_use]
    pub const fn request(self) -> TickRequest {
        match self {
            Self::Eased(_) => TickRequest::Continue,
            Self::Snapped { .. } | Self::Settled(_) => TickRequest::Settled,
        }
    }
}

/// Eases a rendered progress value toward a raw target, one tick per frame.
#[derive(Clone, Copy, Debug)]
pub struct ProgressAnimator {
    config: AnimatorConfig,
    value: f64,
    target: f64,
    settled: bool,
}

impl ProgressAnimator {
    /// Creates an animator at rest at zero.
    #[must_use]
    pub const fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            value: 0.0,
            target: 0.0,
            settled: true,
        }
    }

    /// Returns the current rendered value in `[0, 100]`.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Returns `true` if the value has reached the target and no frames are
    /// needed.
    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Replaces the target. The new target supersedes the old one: the next
    /// tick eases toward it, whatever was in flight.
    ///
    /// Targets are clamped to `[0, 100]`; non-finite targets are ignored.
    pub fn set_target(&mut self, target: f64) -> TickRequest {
        if target.is_finite() {
            self.target = target.clamp(0.0, 100.0);
            // Settled values are assigned, never computed, so exact equality holds.
            self.settled = self.value == self.target;
        }
        if self.settled {
            TickRequest::Settled
        } else {
            TickRequest::Continue
        }
    }

    /// Advances one frame.
    pub fn tick(&mut self) -> Step {
        let delta = self.target - self.value;
        let distance = delta.abs();

        if distance > self.config.discontinuity_threshold {
            let from = self.value;
            self.value = self.target;
            self.settled = true;
            return Step::Snapped {
                from,
                to: self.target,
            };
        }
        if distance < self.config.snap_threshold {
            self.value = self.target;
            self.settled = true;
            return Step::Settled(self.value);
        }

        self.value += delta * self.config.easing_factor;
        self.settled = false;
        Step::Eased(self.value)
    }

    /// Sets the target and advances one frame, returning the rendered value.
    ///
    /// Convenience for hosts that drive the animator from their own render
    /// loop with the latest raw progress on every frame.
    pub fn update(&mut self, raw_progress: f64) -> f64 {
        let _ = self.set_target(raw_progress);
        self.tick().value()
    }

    /// Returns to rest at zero.
    pub fn reset(&mut self) {
        self.value = 0.0;
        self.target = 0.0;
        self.settled = true;
    }
}

impl Default for ProgressAnimator {
    fn default() -> Self {
        Self::new(AnimatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::PlaybackSample;

    #[test]
    fn eases_part_of_the_way() {
        let mut a = ProgressAnimator::default();
        assert_eq!(a.set_target(5.0), TickRequest::Continue);
        let step = a.tick();
        assert!(
            matches!(step, Step::Eased(v) if (v - 0.75).abs() < 1e-12),
            "got {step:?}"
        );
        assert_eq!(step.request(), TickRequest::Continue);
    }

    #[test]
    fn idempotent_at_rest() {
        let mut a = ProgressAnimator::default();
        let _ = a.set_target(2.0);
        while a.tick().request().wants_frame() {}
        let rest = a.value();
        assert_eq!(rest, 2.0);
        for _ in 0..10 {
            assert_eq!(a.update(2.0), rest, "value moved at rest");
            assert!(a.is_settled());
        }
    }

    #[test]
    fn snaps_within_threshold() {
        let mut a = ProgressAnimator::default();
        let _ = a.set_target(0.04);
        assert_eq!(a.tick(), Step::Settled(0.04));
    }

    #[test]
    fn large_jump_snaps_on_next_update() {
        let mut a = ProgressAnimator::default();
        let _ = a.set_target(60.0);
        let _ = a.tick();
        while a.tick().request().wants_frame() {}
        assert_eq!(a.value(), 60.0);

        // Back by more than the threshold: no intermediate frames.
        assert_eq!(a.update(45.0), 45.0);
        assert_eq!(a.update(45.0), 45.0);
    }

    #[test]
    fn jump_just_under_threshold_eases() {
        let mut a = ProgressAnimator::default();
        let v = a.update(9.0);
        assert!(v > 0.0 && v < 9.0, "expected easing, got {v}");
    }

    #[test]
    fn loop_wrap_snaps_immediately() {
        let mut a = ProgressAnimator::default();
        let end = PlaybackSample::new(159.9, 160.0).raw_progress().unwrap();
        let _ = a.set_target(end);
        // Bring the value up to the end of the video.
        let mut guard = 0;
        while a.tick().request().wants_frame() {
            guard += 1;
            assert!(guard < 1_000, "did not settle");
        }

        let start = PlaybackSample::new(0.1, 160.0).raw_progress().unwrap();
        let step = {
            let _ = a.set_target(start);
            a.tick()
        };
        assert!(
            matches!(step, Step::Snapped { to, .. } if (to - 0.0625).abs() < 1e-9),
            "expected snap to ~0.06, got {step:?}"
        );
    }

    #[test]
    fn converges_toward_media_progress() {
        // 160 s video, timeupdate at 4 Hz, display at 60 Hz, playing to 80 s.
        let mut a = ProgressAnimator::default();
        let mut lagged = false;
        let mut t = 0.0;
        while t <= 80.0 {
            let raw = PlaybackSample::new(t, 160.0).raw_progress().unwrap();
            let _ = a.set_target(raw);
            let _ = a.tick();
            if a.value() != a.target() {
                lagged = true;
            }
            for _ in 0..14 {
                let _ = a.tick();
            }
            t += 0.25;
        }
        assert!(lagged, "easing should not be instantaneous");
        assert_eq!(a.target(), 50.0);

        let mut frames = 0;
        while a.tick().request().wants_frame() {
            frames += 1;
            assert!(frames < 100, "did not converge");
        }
        assert!((a.value() - 50.0).abs() < 0.05, "settled at {}", a.value());
    }

    #[test]
    fn from_zero_converges_in_bounded_steps() {
        // A target within the discontinuity threshold is approached
        // geometrically, never reached by a jump.
        let mut a = ProgressAnimator::default();
        let _ = a.set_target(10.0);
        let mut steps = 0;
        loop {
            let step = a.tick();
            steps += 1;
            assert!(!matches!(step, Step::Snapped { .. }), "unexpected jump");
            if !step.request().wants_frame() {
                break;
            }
            assert!(steps < 100, "did not converge");
        }
        assert!(steps > 1, "converged instantly");
        assert_eq!(a.value(), 10.0);
    }

    #[test]
    fn non_finite_targets_are_ignored() {
        let mut a = ProgressAnimator::default();
        let _ = a.set_target(3.0);
        let _ = a.set_target(f64::NAN);
        assert_eq!(a.target(), 3.0);
    }

    #[test]
    fn targets_are_clamped() {
        let mut a = ProgressAnimator::default();
        let _ = a.set_target(250.0);
        assert_eq!(a.target(), 100.0);
        let _ = a.set_target(-4.0);
        assert_eq!(a.target(), 0.0);
    }

    #[test]
    fn reset_returns_to_rest() {
        let mut a = ProgressAnimator::default();
        let _ = a.update(5.0);
        a.reset();
        assert_eq!(a.value(), 0.0);
        assert!(a.is_settled());
    }
}
