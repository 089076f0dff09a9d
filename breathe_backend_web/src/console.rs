// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace sink.

use alloc::format;

use breathe_core::trace::{
    MuteChangedEvent, PhaseCommittedEvent, PlaybackErrorEvent, PlaybackStartEvent,
    ProgressSnapEvent, TraceSink,
};
use wasm_bindgen::JsValue;
use web_sys::console;

/// A [`TraceSink`] that logs session milestones to the browser console.
///
/// Per-sample and per-frame events are skipped; they arrive several times a
/// second and would drown the console. Playback errors go to
/// `console.error`, everything else to `console.log`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

fn log(line: &str) {
    console::log_1(&JsValue::from_str(line));
}

impl TraceSink for ConsoleSink {
    fn on_phase_committed(&mut self, e: &PhaseCommittedEvent<'_>) {
        log(&format!(
            "[breathe] {:>10.1}ms phase {:?}",
            e.now.as_millis_f64(),
            e.text.unwrap_or("")
        ));
    }

    fn on_progress_snap(&mut self, e: &ProgressSnapEvent) {
        log(&format!(
            "[breathe] {:>10.1}ms progress snap {:.2} -> {:.2}",
            e.now.as_millis_f64(),
            e.from,
            e.to
        ));
    }

    fn on_playback_start(&mut self, e: &PlaybackStartEvent) {
        log(&format!(
            "[breathe] playback started muted={} (requested {}){}",
            e.muted,
            e.requested_muted,
            if e.fallback { " after muted fallback" } else { "" }
        ));
    }

    fn on_playback_error(&mut self, e: &PlaybackErrorEvent<'_>) {
        console::error_1(&JsValue::from_str(&format!("[breathe] {}", e.error)));
    }

    fn on_mute_changed(&mut self, e: &MuteChangedEvent) {
        log(&format!("[breathe] muted={} ({:?})", e.muted, e.source));
    }
}
