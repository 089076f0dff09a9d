// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced instruction text.
//!
//! Near a phase boundary, sampling jitter can make the resolved phase flip
//! back and forth for a sample or two. [`PhaseDebouncer`] turns that stream
//! into a stable `{text, visible}` pair:
//!
//! - A value different from the one on screen hides the text immediately and
//!   arms a commit for `delay` later.
//! - When the commit fires, the new text replaces the old and is shown (unless
//!   it is empty).
//! - A different value arriving before the commit fires supersedes it. Only
//!   the latest pending value can ever be committed.
//!
//! The debouncer owns no timer. It hands the host a [`TimerAction`] and the
//! host arms or cancels its own timer. Each armed commit carries a
//! [`CommitToken`]; [`fire`](PhaseDebouncer::fire) ignores tokens that are no
//! longer current, so a timer that raced a cancellation cannot resurrect a
//! superseded value.

use alloc::string::String;

use crate::time::{Duration, HostTime};

/// Tunables for [`PhaseDebouncer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceConfig {
    /// How long a new value stays hidden before it is committed.
    pub delay: Duration,
}

impl DebounceConfig {
    /// Default delay: 250 ms.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            delay: Duration::from_millis(250),
        }
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::web()
    }
}

/// Identifies one armed commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommitToken(u64);

/// What the host should do with its debounce timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    /// Leave any armed timer alone.
    Keep,
    /// Replace any armed timer with one firing at `deadline`, then call
    /// [`PhaseDebouncer::fire`] with `token`.
    Arm {
        /// Host time at which the commit is due.
        deadline: HostTime,
        /// Token to hand back on expiry.
        token: CommitToken,
    },
    /// Cancel any armed timer.
    Cancel,
}

/// The instruction as it should currently be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseDisplay<'a> {
    /// Committed instruction text, if any.
    pub text: Option<&'a str>,
    /// Whether the text is shown (faded in) or hidden.
    pub visible: bool,
}

/// Result of feeding one resolved phase to [`PhaseDebouncer::on_phase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct DebounceOutcome<'a> {
    /// What to render now.
    pub display: PhaseDisplay<'a>,
    /// What to do with the host timer.
    pub timer: TimerAction,
}

#[derive(Clone, Debug)]
struct Pending {
    text: Option<String>,
    deadline: HostTime,
    token: CommitToken,
}

/// Delay-and-supersede state machine for the instruction text.
#[derive(Clone, Debug)]
pub struct PhaseDebouncer {
    config: DebounceConfig,
    displayed: Option<String>,
    visible: bool,
    pending: Option<Pending>,
    generation: u64,
}

impl PhaseDebouncer {
    /// Creates a debouncer showing nothing.
    #[must_use]
    pub const fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            displayed: None,
            visible: false,
            pending: None,
            generation: 0,
        }
    }

    /// Returns what should be rendered.
    #[must_use]
    pub fn display(&self) -> PhaseDisplay<'_> {
        PhaseDisplay {
            text: self.displayed.as_deref(),
            visible: self.visible,
        }
    }

    /// Returns the pending text and its deadline, if a commit is armed.
    #[must_use]
    pub fn pending(&self) -> Option<(Option<&str>, HostTime)> {
        self.pending
            .as_ref()
            .map(|p| (p.text.as_deref(), p.deadline))
    }

    /// Feeds the phase resolved from the latest sample.
    pub fn on_phase(&mut self, phase: Option<&str>, now: HostTime) -> DebounceOutcome<'_> {
        let timer = self.route(phase, now);
        DebounceOutcome {
            display: self.display(),
            timer,
        }
    }

    fn route(&mut self, phase: Option<&str>, now: HostTime) -> TimerAction {
        if phase == self.displayed.as_deref() {
            // Jitter returned to what is on screen: drop the pending change.
            let timer = if self.pending.take().is_some() {
                TimerAction::Cancel
            } else {
                TimerAction::Keep
            };
            if phase.is_some() {
                self.visible = true;
            }
            return timer;
        }

        // Already waiting on this exact value; keep the original deadline so
        // a steady stream of samples cannot postpone the commit forever.
        if let Some(pending) = &self.pending
            && pending.text.as_deref() == phase
        {
            return TimerAction::Keep;
        }

        self.visible = false;
        self.generation += 1;
        let token = CommitToken(self.generation);
        let deadline = now.saturating_add(self.config.delay);
        self.pending = Some(Pending {
            text: phase.map(String::from),
            deadline,
            token,
        });
        TimerAction::Arm { deadline, token }
    }

    /// Commits the pending value if `token` is still current.
    ///
    /// Returns `true` if something was committed. Stale tokens (superseded or
    /// cancelled commits) are ignored.
    pub fn fire(&mut self, token: CommitToken) -> bool {
        match &self.pending {
            Some(pending) if pending.token == token => {
                self.commit();
                true
            }
            _ => false,
        }
    }

    /// Commits the pending value if its deadline has passed.
    ///
    /// For hosts that poll once per frame instead of arming a timer.
    pub fn poll(&mut self, now: HostTime) -> bool {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {
                self.commit();
                true
            }
            _ => false,
        }
    }

    /// Shows `text` immediately, bypassing the delay and dropping any pending
    /// commit.
    pub fn show_now(&mut self, text: Option<&str>) -> TimerAction {
        let timer = if self.pending.take().is_some() {
            TimerAction::Cancel
        } else {
            TimerAction::Keep
        };
        self.displayed = text.map(String::from);
        self.visible = self.displayed.is_some();
        timer
    }

    /// Clears the display and drops any pending commit.
    pub fn reset(&mut self) -> TimerAction {
        let timer = if self.pending.take().is_some() {
            TimerAction::Cancel
        } else {
            TimerAction::Keep
        };
        self.displayed = None;
        self.visible = false;
        timer
    }

    fn commit(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.displayed = pending.text;
            self.visible = self.displayed.is_some();
        }
    }
}

impl Default for PhaseDebouncer {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}
