// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout`-backed delay timer for debounced commits.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use breathe_core::debounce::{CommitToken, TimerAction};
use breathe_core::time::HostTime;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(handler: &JsValue, timeout_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// Applies [`TimerAction`]s with the browser's `setTimeout`.
///
/// At most one timeout is outstanding. Arming replaces (and clears) the
/// previous one; dropping the timer clears it.
pub struct DelayTimer {
    inner: Rc<TimerInner>,
}

struct TimerInner {
    /// Receives the token of the armed commit when its timeout expires.
    callback: RefCell<Box<dyn FnMut(CommitToken)>>,
    /// The JS closure handed to `setTimeout`. Built once and reused.
    closure: RefCell<Option<Closure<dyn FnMut()>>>,
    /// Token of the armed commit.
    armed: Cell<Option<CommitToken>>,
    /// ID returned by the outstanding `setTimeout`.
    timeout_id: Cell<Option<i32>>,
}

impl DelayTimer {
    /// Creates an idle timer that calls `callback` on expiry.
    pub fn new(callback: impl FnMut(CommitToken) + 'static) -> Self {
        let inner = Rc::new(TimerInner {
            callback: RefCell::new(Box::new(callback)),
            closure: RefCell::new(None),
            armed: Cell::new(None),
            timeout_id: Cell::new(None),
        });
        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.timeout_id.set(None);
            if let Some(token) = inner.armed.take() {
                inner.callback.borrow_mut()(token);
            }
        }) as Box<dyn FnMut()>);
        *inner.closure.borrow_mut() = Some(closure);
        Self { inner }
    }

    /// Applies `action`, measuring any deadline from `now`.
    pub fn apply(&self, action: TimerAction, now: HostTime) {
        match action {
            TimerAction::Keep => {}
            TimerAction::Cancel => self.cancel(),
            TimerAction::Arm { deadline, token } => {
                self.cancel();
                let Some(ref closure) = *self.inner.closure.borrow() else {
                    return;
                };
                let id = set_timeout(closure.as_ref().unchecked_ref(), delay_ms(deadline, now));
                self.inner.armed.set(Some(token));
                self.inner.timeout_id.set(Some(id));
            }
        }
    }

    /// Clears the outstanding timeout, if any.
    pub fn cancel(&self) {
        self.inner.armed.set(None);
        if let Some(id) = self.inner.timeout_id.take() {
            clear_timeout(id);
        }
    }
}

impl Drop for DelayTimer {
    fn drop(&mut self) {
        self.cancel();
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for DelayTimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DelayTimer")
            .field("armed", &self.inner.armed.get())
            .field("timeout_id", &self.inner.timeout_id.get())
            .finish_non_exhaustive()
    }
}

/// Whole milliseconds from `now` until `deadline`, rounded up so the timeout
/// never fires early.
fn delay_ms(deadline: HostTime, now: HostTime) -> i32 {
    let ms = deadline.saturating_duration_since(now).as_millis_ceil();
    i32::try_from(ms).unwrap_or(i32::MAX)
}
