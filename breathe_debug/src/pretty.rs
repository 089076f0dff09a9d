// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Host times
//! are printed in milliseconds.

use std::io::Write;

use breathe_core::trace::{
    MuteChangedEvent, PhaseCommittedEvent, PhaseResolvedEvent, PlaybackErrorEvent,
    PlaybackStartEvent, ProgressSettledEvent, ProgressSnapEvent, SampleEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    /// Also print rejected samples and per-sample phase resolution.
    verbose: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            verbose: false,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }

    /// Also prints every sample and phase resolution, not just changes.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_sample(&mut self, e: &SampleEvent) {
        if !self.verbose && e.accepted {
            return;
        }
        let duration = e
            .duration
            .map_or_else(|| "?".to_owned(), |d| format!("{d:.3}s"));
        let _ = writeln!(
            self.writer,
            "[sample] at {:.1}ms t={:.3}s duration={duration} {}",
            e.now.as_millis_f64(),
            e.current_time,
            if e.accepted { "accepted" } else { "dropped" },
        );
    }

    fn on_phase_resolved(&mut self, e: &PhaseResolvedEvent<'_>) {
        if !self.verbose {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[phase:resolve] at {:.1}ms t={:.3}s -> {:?}",
            e.now.as_millis_f64(),
            e.current_time,
            e.phase.unwrap_or(""),
        );
    }

    fn on_phase_committed(&mut self, e: &PhaseCommittedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[phase:commit] at {:.1}ms {:?}",
            e.now.as_millis_f64(),
            e.text.unwrap_or(""),
        );
    }

    fn on_progress_snap(&mut self, e: &ProgressSnapEvent) {
        let _ = writeln!(
            self.writer,
            "[progress:snap] frame={} at {:.1}ms {:.3} -> {:.3}",
            e.frame_index,
            e.now.as_millis_f64(),
            e.from,
            e.to,
        );
    }

    fn on_progress_settled(&mut self, e: &ProgressSettledEvent) {
        let _ = writeln!(
            self.writer,
            "[progress:settle] frame={} at {:.1}ms value={:.3}",
            e.frame_index,
            e.now.as_millis_f64(),
            e.value,
        );
    }

    fn on_playback_start(&mut self, e: &PlaybackStartEvent) {
        let how = if e.fallback { "fallback" } else { "direct" };
        let _ = writeln!(
            self.writer,
            "[playback:start] {how} muted={} requested={}",
            e.muted, e.requested_muted,
        );
    }

    fn on_playback_error(&mut self, e: &PlaybackErrorEvent<'_>) {
        let _ = writeln!(self.writer, "[playback:error] {}", e.error);
    }

    fn on_mute_changed(&mut self, e: &MuteChangedEvent) {
        let _ = writeln!(
            self.writer,
            "[mute] muted={} source={:?}",
            e.muted, e.source,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breathe_core::time::HostTime;

    fn sample(accepted: bool) -> SampleEvent {
        SampleEvent {
            now: HostTime(1_500),
            current_time: 4.25,
            duration: None,
            accepted,
        }
    }

    #[test]
    fn pretty_print_commit() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_phase_committed(&PhaseCommittedEvent {
            now: HostTime(250_000),
            text: Some("Exhale..."),
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[phase:commit]"), "got: {output}");
        assert!(output.contains("250.0ms"), "got: {output}");
        assert!(output.contains("\"Exhale...\""), "got: {output}");
    }

    #[test]
    fn quiet_by_default_for_accepted_samples() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_sample(&sample(true));
        sink.on_sample(&sample(false));
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 1, "got: {output}");
        assert!(output.contains("dropped"), "got: {output}");
        assert!(output.contains("duration=?"), "got: {output}");
    }

    #[test]
    fn verbose_prints_every_sample() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new()).verbose(true);
        sink.on_sample(&sample(true));
        sink.on_phase_resolved(&PhaseResolvedEvent {
            now: HostTime(0),
            current_time: 4.25,
            phase: Some("Hold"),
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 2, "got: {output}");
    }
}
