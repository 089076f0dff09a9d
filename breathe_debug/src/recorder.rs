// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event as an
//! owned [`RecordedEvent`]. Session events borrow their text from the
//! session, so the recorder copies it; a recording outlives the session that
//! produced it and can be exported with [`chrome::export`](crate::chrome::export).

use breathe_core::time::HostTime;
use breathe_core::trace::{
    MuteChangedEvent, MuteSource, PhaseCommittedEvent, PhaseResolvedEvent, PlaybackErrorEvent,
    PlaybackStartEvent, ProgressSettledEvent, ProgressSnapEvent, SampleEvent, TraceSink,
};

/// An owned copy of one trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A time-update.
    Sample(SampleEvent),
    /// A resolved phase.
    PhaseResolved {
        /// Host time of the notification.
        now: HostTime,
        /// Media position in seconds.
        current_time: f64,
        /// Resolved text.
        phase: Option<String>,
    },
    /// A committed instruction.
    PhaseCommitted {
        /// Host time of the commit.
        now: HostTime,
        /// Committed text.
        text: Option<String>,
    },
    /// A progress discontinuity.
    ProgressSnap(ProgressSnapEvent),
    /// Progress came to rest.
    ProgressSettled(ProgressSettledEvent),
    /// Playback started.
    PlaybackStart(PlaybackStartEvent),
    /// Playback could not be started.
    PlaybackError {
        /// Rendered error message.
        message: String,
    },
    /// The mute state changed.
    MuteChanged(MuteChangedEvent),
}

impl RecordedEvent {
    /// Host time of the event, if it carries one.
    #[must_use]
    pub fn time(&self) -> Option<HostTime> {
        match self {
            Self::Sample(e) => Some(e.now),
            Self::PhaseResolved { now, .. } | Self::PhaseCommitted { now, .. } => Some(*now),
            Self::ProgressSnap(e) => Some(e.now),
            Self::ProgressSettled(e) => Some(e.now),
            Self::PlaybackStart(_) | Self::PlaybackError { .. } | Self::MuteChanged(_) => None,
        }
    }
}

/// A [`TraceSink`] that records every event in order.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Returns every committed instruction text in order.
    pub fn committed(&self) -> impl Iterator<Item = Option<&str>> {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::PhaseCommitted { text, .. } => Some(text.as_deref()),
            _ => None,
        })
    }

    /// Returns how many mute changes came from `source`.
    #[must_use]
    pub fn mute_changes(&self, source: MuteSource) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::MuteChanged(m) if m.source == source))
            .count()
    }
}

impl TraceSink for RecorderSink {
    fn on_sample(&mut self, e: &SampleEvent) {
        self.events.push(RecordedEvent::Sample(*e));
    }

    fn on_phase_resolved(&mut self, e: &PhaseResolvedEvent<'_>) {
        self.events.push(RecordedEvent::PhaseResolved {
            now: e.now,
            current_time: e.current_time,
            phase: e.phase.map(str::to_owned),
        });
    }

    fn on_phase_committed(&mut self, e: &PhaseCommittedEvent<'_>) {
        self.events.push(RecordedEvent::PhaseCommitted {
            now: e.now,
            text: e.text.map(str::to_owned),
        });
    }

    fn on_progress_snap(&mut self, e: &ProgressSnapEvent) {
        self.events.push(RecordedEvent::ProgressSnap(*e));
    }

    fn on_progress_settled(&mut self, e: &ProgressSettledEvent) {
        self.events.push(RecordedEvent::ProgressSettled(*e));
    }

    fn on_playback_start(&mut self, e: &PlaybackStartEvent) {
        self.events.push(RecordedEvent::PlaybackStart(*e));
    }

    fn on_playback_error(&mut self, e: &PlaybackErrorEvent<'_>) {
        self.events.push(RecordedEvent::PlaybackError {
            message: e.error.to_string(),
        });
    }

    fn on_mute_changed(&mut self, e: &MuteChangedEvent) {
        self.events.push(RecordedEvent::MuteChanged(*e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breathe_core::debounce::TimerAction;
    use breathe_core::sample::PlaybackSample;
    use breathe_core::session::Session;
    use breathe_core::time::Duration;
    use breathe_core::trace::Tracer;

    #[test]
    fn records_a_session_cycle() {
        let mut rec = RecorderSink::new();
        let mut session = Session::default();
        let _ = session.start();
        {
            let mut tracer = Tracer::new(&mut rec);
            let mut now = HostTime(0);
            for t in [0.0, 3.9, 4.1, 7.2, 14.5] {
                let timer = session
                    .on_time_update(PlaybackSample::new(t, 160.0), now, &mut tracer)
                    .timer;
                if let TimerAction::Arm { deadline, token } = timer {
                    assert!(session.on_debounce_fired(token, deadline, &mut tracer));
                }
                now = now.saturating_add(Duration::from_millis(1000));
            }
            let _ = session.toggle_mute(&mut tracer);
        }

        let committed: Vec<_> = rec.committed().collect();
        assert_eq!(
            committed,
            [
                Some("Inhale..."),
                Some("Hold"),
                Some("Exhale..."),
                Some("Hold")
            ]
        );
        assert_eq!(rec.mute_changes(MuteSource::User), 1);
        assert_eq!(rec.mute_changes(MuteSource::Reported), 0);
    }

    #[test]
    fn borrowed_text_is_copied() {
        let mut rec = RecorderSink::new();
        {
            let text = String::from("Hold");
            rec.on_phase_committed(&PhaseCommittedEvent {
                now: HostTime(5),
                text: Some(&text),
            });
        }
        assert_eq!(
            rec.events(),
            [RecordedEvent::PhaseCommitted {
                now: HostTime(5),
                text: Some("Hold".to_owned()),
            }]
        );
        assert_eq!(rec.events()[0].time(), Some(HostTime(5)));
    }
}
