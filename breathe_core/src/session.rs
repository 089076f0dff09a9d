// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The breathing session state machine.
//!
//! [`Session`] owns every piece of per-page state: the start-screen gate, the
//! ambient flags in [`SessionState`], the sample gate, the progress animator,
//! and the instruction debouncer. Hosts forward each platform notification to
//! the matching `on_*` method, apply the returned timer and frame requests,
//! and render [`Session::view`].
//!
//! ```text
//!                start()
//!   Idle ─────────────────► Started ◄──── restart() resets progress/phase
//!                              │
//!    timeupdate ───────────────┤──► gate ─► animator target + debouncer
//!    loadedmetadata ───────────┤──► duration known, first phase shown
//!    animation frame ──────────┤──► animator tick
//!    debounce timer ───────────┘──► commit pending phase
//! ```
//!
//! Before [`start`](Session::start), media notifications are ignored.

use crate::animator::{AnimatorConfig, ProgressAnimator, Step};
use crate::debounce::{CommitToken, DebounceConfig, PhaseDebouncer, PhaseDisplay, TimerAction};
use crate::playback::{PlaybackError, PlaybackStart};
use crate::sample::{PlaybackSample, SampleGate, SampleGateConfig};
use crate::schedule::CycleSchedule;
use crate::segment::{SegmentFill, SegmentLayout};
use crate::time::HostTime;
use crate::timing::{FrameTick, TickRequest};
use crate::trace::{
    MuteChangedEvent, MuteSource, PhaseCommittedEvent, PhaseResolvedEvent, PlaybackErrorEvent,
    PlaybackStartEvent, ProgressSettledEvent, ProgressSnapEvent, SampleEvent, Tracer,
};

/// Everything needed to build a [`Session`].
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// The breathing cycle.
    pub schedule: CycleSchedule,
    /// Progress easing.
    pub animator: AnimatorConfig,
    /// Instruction debounce.
    pub debounce: DebounceConfig,
    /// Sample gating.
    pub gate: SampleGateConfig,
    /// Slice boundaries for the three-region indicator.
    pub segments: SegmentLayout,
    /// Mute state requested when the session starts.
    pub initial_muted: bool,
}

impl SessionConfig {
    /// Default tuning around the given schedule.
    #[must_use]
    pub fn with_schedule(schedule: CycleSchedule) -> Self {
        Self {
            schedule,
            animator: AnimatorConfig::web(),
            debounce: DebounceConfig::web(),
            gate: SampleGateConfig::web(),
            segments: SegmentLayout::DEFAULT,
            initial_muted: false,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::with_schedule(CycleSchedule::breathing_box())
    }
}

/// Ambient page flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// The user has left the start screen.
    pub started: bool,
    /// Current mute state, reconciled with what the media reports.
    pub muted: bool,
    /// The media is playing.
    pub playing: bool,
    /// A valid media duration has been seen.
    pub duration_known: bool,
    /// Playback was refused even when muted; waiting for a user gesture.
    pub blocked: bool,
}

/// Returned by [`Session::start`]: what the host should ask the media for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartRequest {
    /// Requested mute state for [`start_playback`](crate::playback::start_playback).
    pub muted: bool,
}

/// Returned by [`Session::on_time_update`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[must_use]
pub struct SessionUpdate<'a> {
    /// Instruction to render now.
    pub display: PhaseDisplay<'a>,
    /// What to do with the debounce timer.
    pub timer: TimerAction,
    /// Whether a new animation frame must be requested. A running frame loop
    /// decides for itself when to stop, so `Settled` here never cancels it.
    pub frame: TickRequest,
}

/// Snapshot of everything a presenter renders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionView<'a> {
    /// Whether to show the session (`true`) or the start screen.
    pub started: bool,
    /// Instruction text and its visibility.
    pub instruction: PhaseDisplay<'a>,
    /// Animated progress in `[0, 100]`, once the duration is known.
    pub progress: Option<f64>,
    /// Three-region fill for `progress`, once the duration is known.
    pub segments: Option<SegmentFill>,
    /// Mute state for the mute button.
    pub muted: bool,
    /// Whether the media is playing.
    pub playing: bool,
    /// Playback needs a user gesture before it can start.
    pub blocked: bool,
}

/// One breathing page's worth of state.
#[derive(Clone, Debug)]
pub struct Session {
    schedule: CycleSchedule,
    segments: SegmentLayout,
    state: SessionState,
    gate: SampleGate,
    animator: ProgressAnimator,
    debouncer: PhaseDebouncer,
}

impl Session {
    /// Creates a session on the start screen.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            schedule: config.schedule,
            segments: config.segments,
            state: SessionState {
                muted: config.initial_muted,
                ..SessionState::default()
            },
            gate: SampleGate::new(config.gate),
            animator: ProgressAnimator::new(config.animator),
            debouncer: PhaseDebouncer::new(config.debounce),
        }
    }

    /// Returns the ambient flags.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the cycle schedule.
    #[must_use]
    pub fn schedule(&self) -> &CycleSchedule {
        &self.schedule
    }

    /// Leaves the start screen.
    ///
    /// Returns the playback request the first time, and `None` if the session
    /// was already started.
    pub fn start(&mut self) -> Option<StartRequest> {
        if self.state.started {
            return None;
        }
        self.state.started = true;
        self.state.blocked = false;
        self.reset_progress();
        // Nothing can be pending before start; samples are ignored until now.
        let _ = self.debouncer.reset();
        Some(StartRequest {
            muted: self.state.muted,
        })
    }

    /// Handles a media time-update notification.
    pub fn on_time_update(
        &mut self,
        sample: PlaybackSample,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> SessionUpdate<'_> {
        if !self.state.started {
            return self.idle();
        }
        if sample.duration.is_some() {
            self.state.duration_known = true;
        }

        let accepted = sample.duration.is_some() && self.gate.accept(sample.current_time);
        tracer.sample(&SampleEvent {
            now,
            current_time: sample.current_time,
            duration: sample.duration,
            accepted,
        });
        if !accepted {
            return self.idle();
        }

        let frame = match sample.raw_progress() {
            Some(raw) => self.animator.set_target(raw),
            None => TickRequest::Settled,
        };

        let phase = self.schedule.resolve(sample.current_time);
        tracer.phase_resolved(&PhaseResolvedEvent {
            now,
            current_time: sample.current_time,
            phase,
        });
        let outcome = self.debouncer.on_phase(phase, now);
        SessionUpdate {
            display: outcome.display,
            timer: outcome.timer,
            frame,
        }
    }

    /// Handles the media's metadata-loaded notification.
    ///
    /// Records that the duration is known and, if the session has started
    /// inside the first interval, shows that interval's text without waiting
    /// for the debounce delay.
    pub fn on_metadata_loaded(
        &mut self,
        sample: PlaybackSample,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> TimerAction {
        if sample.duration.is_some() {
            self.state.duration_known = true;
        }
        let first = self.schedule.first();
        if !self.state.started || !first.contains(sample.current_time) {
            return TimerAction::Keep;
        }
        let timer = self.debouncer.show_now(Some(&first.text));
        tracer.phase_committed(&PhaseCommittedEvent {
            now,
            text: self.debouncer.display().text,
        });
        timer
    }

    /// Advances progress easing by one display frame.
    pub fn on_frame(&mut self, tick: FrameTick, tracer: &mut Tracer<'_>) -> TickRequest {
        if !self.state.started {
            return TickRequest::Settled;
        }
        let step = self.animator.tick();
        match step {
            Step::Snapped { from, to } => tracer.progress_snap(&ProgressSnapEvent {
                frame_index: tick.frame_index,
                now: tick.now,
                from,
                to,
            }),
            Step::Settled(value) => tracer.progress_settled(&ProgressSettledEvent {
                frame_index: tick.frame_index,
                now: tick.now,
                value,
            }),
            Step::Eased(_) => {}
        }
        step.request()
    }

    /// Handles expiry of the debounce timer armed with `token`.
    ///
    /// Returns `true` if the instruction changed. Stale tokens are ignored.
    pub fn on_debounce_fired(
        &mut self,
        token: CommitToken,
        now: HostTime,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if !self.debouncer.fire(token) {
            return false;
        }
        tracer.phase_committed(&PhaseCommittedEvent {
            now,
            text: self.debouncer.display().text,
        });
        true
    }

    /// Flips the mute state on user request. Returns the new state, which the
    /// host applies to the media.
    pub fn toggle_mute(&mut self, tracer: &mut Tracer<'_>) -> bool {
        self.state.muted = !self.state.muted;
        tracer.mute_changed(&MuteChangedEvent {
            muted: self.state.muted,
            source: MuteSource::User,
        });
        self.state.muted
    }

    /// Reconciles with the mute state the media actually reports.
    pub fn set_muted_reported(&mut self, muted: bool, tracer: &mut Tracer<'_>) {
        if self.state.muted == muted {
            return;
        }
        self.state.muted = muted;
        tracer.mute_changed(&MuteChangedEvent {
            muted,
            source: MuteSource::Reported,
        });
    }

    /// Handles play/pause notifications.
    pub fn set_playing(&mut self, playing: bool) {
        self.state.playing = playing;
        if playing {
            self.state.blocked = false;
        }
    }

    /// Records the outcome of [`start_playback`](crate::playback::start_playback).
    pub fn on_playback_result(
        &mut self,
        requested_muted: bool,
        result: &Result<PlaybackStart, PlaybackError>,
        tracer: &mut Tracer<'_>,
    ) {
        match result {
            Ok(start) => {
                tracer.playback_start(&PlaybackStartEvent {
                    requested_muted,
                    muted: start.muted(),
                    fallback: matches!(start, PlaybackStart::MutedFallback { .. }),
                });
                self.set_muted_reported(start.muted(), tracer);
                self.set_playing(true);
            }
            Err(error) => {
                tracer.playback_error(&PlaybackErrorEvent { error });
                // The muted retry left the element muted.
                self.set_muted_reported(true, tracer);
                self.state.playing = false;
                self.state.blocked = true;
            }
        }
    }

    /// Resets progress and instruction state, for when the video restarts
    /// from the beginning.
    pub fn restart(&mut self) -> TimerAction {
        self.reset_progress();
        self.debouncer.reset()
    }

    /// Returns what the presenter should render.
    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        let progress = self.state.duration_known.then_some(self.animator.value());
        SessionView {
            started: self.state.started,
            instruction: self.debouncer.display(),
            progress,
            segments: progress.map(|p| self.segments.segment(p)),
            muted: self.state.muted,
            playing: self.state.playing,
            blocked: self.state.blocked,
        }
    }

    fn idle(&self) -> SessionUpdate<'_> {
        SessionUpdate {
            display: self.debouncer.display(),
            timer: TimerAction::Keep,
            frame: TickRequest::Settled,
        }
    }

    fn reset_progress(&mut self) {
        self.gate.reset();
        self.animator.reset();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
