// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads events from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Samples and progress become counter tracks, so the media clock and the
//! eased progress can be compared on the same timeline; commits, snaps, and
//! playback milestones become instant events.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use breathe_core::time::HostTime;

use crate::recorder::RecordedEvent;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Events without their own timestamp (playback and mute changes) are placed
/// at the time of the preceding timed event.
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::new();
    let mut last = HostTime(0);

    for recorded in events {
        let ts = recorded.time().unwrap_or(last);
        last = ts;
        let ts = ts.as_millis_f64() * 1000.0;

        match recorded {
            RecordedEvent::Sample(e) => {
                if !e.accepted {
                    continue;
                }
                out.push(json!({
                    "ph": "C",
                    "name": "media",
                    "cat": "Sample",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "current_time": e.current_time,
                    }
                }));
            }
            RecordedEvent::PhaseResolved { .. } => {}
            RecordedEvent::PhaseCommitted { text, .. } => {
                out.push(instant(
                    "Phase",
                    text.as_deref().unwrap_or("(none)"),
                    ts,
                    json!({}),
                ));
            }
            RecordedEvent::ProgressSnap(e) => {
                out.push(instant(
                    "Progress",
                    "Snap",
                    ts,
                    json!({
                        "frame_index": e.frame_index,
                        "from": e.from,
                        "to": e.to,
                    }),
                ));
                out.push(progress_counter(ts, e.to));
            }
            RecordedEvent::ProgressSettled(e) => {
                out.push(progress_counter(ts, e.value));
            }
            RecordedEvent::PlaybackStart(e) => {
                out.push(instant(
                    "Playback",
                    "Start",
                    ts,
                    json!({
                        "muted": e.muted,
                        "requested_muted": e.requested_muted,
                        "fallback": e.fallback,
                    }),
                ));
            }
            RecordedEvent::PlaybackError { message } => {
                out.push(instant(
                    "Playback",
                    "Error",
                    ts,
                    json!({ "message": message }),
                ));
            }
            RecordedEvent::MuteChanged(e) => {
                out.push(instant(
                    "Playback",
                    "Mute",
                    ts,
                    json!({
                        "muted": e.muted,
                        "source": format!("{:?}", e.source),
                    }),
                ));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn instant(cat: &str, name: &str, ts: f64, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "s": "g",
        "args": args,
    })
}

fn progress_counter(ts: f64, value: f64) -> Value {
    json!({
        "ph": "C",
        "name": "progress",
        "cat": "Progress",
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "args": {
            "value": value,
        }
    })
}
