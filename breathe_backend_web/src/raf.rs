// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` tick source.
//!
//! [`RafLoop`] drives progress easing from the browser's
//! `requestAnimationFrame` API. Each callback receives a
//! [`DOMHighResTimeStamp`][mdn] (milliseconds from `performance.now()`),
//! which is converted to microsecond [`HostTime`].
//!
//! Unlike a render loop, the easing loop is idle most of the time: the
//! callback answers each tick with a [`TickRequest`], and the loop only
//! re-registers on [`TickRequest::Continue`]. A parked loop costs nothing
//! until the next [`start`](RafLoop::start).
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp
//! [`HostTime`]: breathe_core::time::HostTime

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use breathe_core::time::HostTime;
use breathe_core::timing::{FrameTick, TickRequest};

// Direct global bindings instead of `web_sys::Window` methods, so each frame
// does not fetch (and unwrap) the Window/Performance objects.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// A `requestAnimationFrame` loop that runs while its callback asks for more
/// frames.
///
/// Create with [`RafLoop::new`], then call [`start`](Self::start) whenever
/// something may need animating. The loop re-registers itself each frame
/// until the callback returns [`TickRequest::Settled`], [`stop`](Self::stop)
/// is called, or the `RafLoop` is dropped.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// The JS closure registered with `requestAnimationFrame`. Built on the
    /// first `start()` and reused afterwards.
    closure: RefCell<Option<RafClosure>>,

    /// The user-supplied callback.
    callback: RefCell<Box<dyn FnMut(FrameTick) -> TickRequest>>,

    /// Becomes `FrameTick::frame_index`.
    frame_counter: Cell<u64>,

    /// Whether a frame is currently requested.
    running: Cell<bool>,

    /// The ID returned by the most recent `requestAnimationFrame` call.
    raf_id: Cell<i32>,
}

impl RafLoop {
    /// Creates a new `RafLoop` that is **not yet running**.
    pub fn new(callback: impl FnMut(FrameTick) -> TickRequest + 'static) -> Self {
        Self {
            inner: Rc::new(RafInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                frame_counter: Cell::new(0),
                running: Cell::new(false),
                raf_id: Cell::new(0),
            }),
        }
    }

    /// Requests frames until the callback settles.
    ///
    /// If already running, this is a no-op.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);

        let mut slot = self.inner.closure.borrow_mut();
        let closure = slot.get_or_insert_with(|| frame_closure(Rc::clone(&self.inner)));
        let id = request_animation_frame(closure.as_ref().unchecked_ref());
        self.inner.raf_id.set(id);
    }

    /// Stops the loop and cancels the pending frame. Can be restarted with
    /// [`start`](Self::start).
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        cancel_animation_frame(self.inner.raf_id.get());
    }
}

fn frame_closure(inner: Rc<RafInner>) -> RafClosure {
    Closure::wrap(Box::new(move |timestamp_ms: f64| {
        if !inner.running.get() {
            return;
        }

        let frame_index = inner.frame_counter.get();
        inner.frame_counter.set(frame_index + 1);
        let tick = FrameTick {
            now: HostTime::from_millis_f64(timestamp_ms),
            frame_index,
        };

        // Scoped so the borrow does not overlap with `closure` below.
        let request = inner.callback.borrow_mut()(tick);

        if !request.wants_frame() {
            inner.running.set(false);
            return;
        }
        // `stop()` may have been called from inside the callback.
        if inner.running.get()
            && let Some(ref closure) = *inner.closure.borrow()
        {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            inner.raf_id.set(id);
        }
    }) as Box<dyn FnMut(f64)>)
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        // Break the closure → inner cycle so neither leaks.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("running", &self.inner.running.get())
            .field("frame_counter", &self.inner.frame_counter.get())
            .finish_non_exhaustive()
    }
}
