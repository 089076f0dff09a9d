// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guided breathing page.
//!
//! Shows a start screen; on "Begin Session" it starts a looping breathing
//! video (falling back to muted playback when the browser refuses sound),
//! traces the video's progress around the frame border, and shows the current
//! phase of the breathing cycle above it.
//!
//! Build with: `wasm-pack build --target web breathe_web`
//! Then serve `breathe_web/www/` (with `pkg/` and `animation.mp4` next to
//! `index.html`) and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

pub mod config;
mod shell;

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString as _};
use core::cell::RefCell;

use breathe_backend_web::{
    ConsoleSink, DelayTimer, DomPresenter, Presenter as _, RafLoop, VideoSource,
};
use breathe_core::media::{MediaControl as _, MediaSource as _};
use breathe_core::playback::{PlaybackError, PlaybackStart, start_playback};
use breathe_core::session::Session;
use breathe_core::trace::Tracer;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, console};

use crate::config::PageConfig;

/// A seek landing this close to the start is the loop wrapping around.
const LOOP_RESTART_WINDOW_S: f64 = 0.5;

struct PageState {
    session: Session,
    presenter: DomPresenter,
    video: VideoSource,
    sink: ConsoleSink,
}

impl PageState {
    fn present(&mut self) {
        self.presenter.present(&self.session.view());
    }
}

/// Clock and frame sources shared by every handler.
struct Drivers {
    timer: DelayTimer,
    raf: RafLoop,
}

type Shared = Rc<RefCell<PageState>>;

/// Entry point for the breathing page.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    #[cfg(all(target_arch = "wasm32", debug_assertions))]
    console_error_panic_hook::set_once();

    run(&PageConfig::web())
}

/// Builds the page described by `config` and wires it up.
pub fn run(config: &PageConfig) -> Result<(), JsValue> {
    let session_config = config
        .session()
        .map_err(|e| JsValue::from_str(&format!("invalid breathing cycle: {e}")))?;

    let document = web_sys::window()
        .expect("window")
        .document()
        .expect("document");
    let shell = shell::build(&document, config)?;

    let state: Shared = Rc::new(RefCell::new(PageState {
        session: Session::new(session_config),
        presenter: DomPresenter::new(shell.parts),
        video: VideoSource::new(shell.video.clone()),
        sink: ConsoleSink,
    }));
    state.borrow_mut().present();

    let timer_state = Rc::clone(&state);
    let timer = DelayTimer::new(move |token| {
        let s = &mut *timer_state.borrow_mut();
        let now = breathe_backend_web::now();
        let mut tracer = Tracer::new(&mut s.sink);
        if s.session.on_debounce_fired(token, now, &mut tracer) {
            s.present();
        }
    });

    let raf_state = Rc::clone(&state);
    let raf = RafLoop::new(move |tick| {
        let s = &mut *raf_state.borrow_mut();
        let mut tracer = Tracer::new(&mut s.sink);
        let request = s.session.on_frame(tick, &mut tracer);
        s.present();
        request
    });

    let drivers = Rc::new(Drivers { timer, raf });

    // Begin Session.
    let begin_state = Rc::clone(&state);
    listen(&shell.begin, "click", move |_event| {
        let request = {
            let mut s = begin_state.borrow_mut();
            let request = s.session.start();
            s.present();
            request
        };
        if let Some(request) = request {
            request_playback(&begin_state, request.muted);
        }
    })?;

    // Tap the frame to retry after the browser refused playback outright.
    let tap_state = Rc::clone(&state);
    listen(&shell.frame, "click", move |_event| {
        let retry = {
            let s = tap_state.borrow();
            let flags = s.session.state();
            (flags.started && flags.blocked).then_some(flags.muted)
        };
        if let Some(muted) = retry {
            request_playback(&tap_state, muted);
        }
    })?;

    let mute_state = Rc::clone(&state);
    listen(&state.borrow().presenter.parts().mute_button, "click", move |_event| {
        let s = &mut *mute_state.borrow_mut();
        let mut tracer = Tracer::new(&mut s.sink);
        let muted = s.session.toggle_mute(&mut tracer);
        s.video.set_muted(muted);
        s.present();
    })?;

    let video = &shell.video;

    let time_state = Rc::clone(&state);
    let time_drivers = Rc::clone(&drivers);
    listen(video, "timeupdate", move |_event| {
        let s = &mut *time_state.borrow_mut();
        let now = breathe_backend_web::now();
        let sample = s.video.sample();
        let mut tracer = Tracer::new(&mut s.sink);
        let update = s.session.on_time_update(sample, now, &mut tracer);
        let (timer, frame) = (update.timer, update.frame);
        time_drivers.timer.apply(timer, now);
        if frame.wants_frame() {
            time_drivers.raf.start();
        }
        s.present();
    })?;

    let meta_state = Rc::clone(&state);
    let meta_drivers = Rc::clone(&drivers);
    listen(video, "loadedmetadata", move |_event| {
        let s = &mut *meta_state.borrow_mut();
        let now = breathe_backend_web::now();
        let sample = s.video.sample();
        let mut tracer = Tracer::new(&mut s.sink);
        let timer = s.session.on_metadata_loaded(sample, now, &mut tracer);
        meta_drivers.timer.apply(timer, now);
        s.present();
    })?;

    let seek_state = Rc::clone(&state);
    let seek_drivers = Rc::clone(&drivers);
    listen(video, "seeked", move |_event| {
        let s = &mut *seek_state.borrow_mut();
        if !s.session.state().started || s.video.current_time() >= LOOP_RESTART_WINDOW_S {
            return;
        }
        let timer = s.session.restart();
        seek_drivers.timer.apply(timer, breathe_backend_web::now());
        s.present();
    })?;

    for (name, playing) in [("play", true), ("pause", false)] {
        let play_state = Rc::clone(&state);
        listen(video, name, move |_event| {
            let mut s = play_state.borrow_mut();
            s.session.set_playing(playing);
            s.present();
        })?;
    }

    let volume_state = Rc::clone(&state);
    listen(video, "volumechange", move |_event| {
        let s = &mut *volume_state.borrow_mut();
        let muted = s.video.muted();
        let mut tracer = Tracer::new(&mut s.sink);
        s.session.set_muted_reported(muted, &mut tracer);
        s.present();
    })?;

    // The handlers above hold the only other references; the page lives as
    // long as the document.
    core::mem::forget(drivers);

    Ok(())
}

/// Starts playback asynchronously and records the outcome.
fn request_playback(state: &Shared, muted: bool) {
    let video = state.borrow().video.clone();
    let state = Rc::clone(state);
    wasm_bindgen_futures::spawn_local(async move {
        let result = start_playback(&video, muted).await;
        let s = &mut *state.borrow_mut();
        if let Some(message) = untraced_error(&result) {
            console::error_1(&JsValue::from_str(&message));
        }
        let mut tracer = Tracer::new(&mut s.sink);
        s.session.on_playback_result(muted, &result, &mut tracer);
        s.present();
    });
}

/// The console line for a playback failure that no trace sink will report.
///
/// With the `trace` feature the [`ConsoleSink`] already logs the error.
fn untraced_error(result: &Result<PlaybackStart, PlaybackError>) -> Option<String> {
    if cfg!(feature = "trace") {
        return None;
    }
    result.as_ref().err().map(|error| error.to_string())
}

fn listen(
    target: &EventTarget,
    name: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use breathe_core::media::PlayRejected;

    fn refused() -> Result<PlaybackStart, PlaybackError> {
        Err(PlaybackError::MutedRetryFailed {
            first: PlayRejected::new("NotAllowedError"),
            muted: PlayRejected::new("NotAllowedError"),
        })
    }

    #[test]
    fn playback_failure_is_logged_once() {
        let line = untraced_error(&refused());
        if cfg!(feature = "trace") {
            assert_eq!(line, None, "the trace sink reports it");
        } else {
            let line = line.unwrap();
            assert!(line.contains("muted retry refused"), "got: {line}");
        }
    }

    #[test]
    fn successful_playback_logs_nothing() {
        let started = Ok(PlaybackStart::Started { muted: false });
        assert_eq!(untraced_error(&started), None);
    }
}
