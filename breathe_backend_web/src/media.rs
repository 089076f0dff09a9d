// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `<video>` media source.

use alloc::string::String;

use breathe_core::media::{MediaControl, MediaSource, PlayRejected};
use breathe_core::sample::known_duration;
use wasm_bindgen::{JsCast as _, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlVideoElement;

/// [`MediaSource`] and [`MediaControl`] over an `HtmlVideoElement`.
#[derive(Clone, Debug)]
pub struct VideoSource {
    element: HtmlVideoElement,
}

impl VideoSource {
    /// Wraps a video element.
    #[must_use]
    pub fn new(element: HtmlVideoElement) -> Self {
        Self { element }
    }
}

impl MediaSource for VideoSource {
    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        known_duration(self.element.duration())
    }
}

impl MediaControl for VideoSource {
    fn muted(&self) -> bool {
        self.element.muted()
    }

    fn set_muted(&self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn play(&self) -> impl Future<Output = Result<(), PlayRejected>> {
        // play() is issued when the future is built; awaiting only observes
        // the returned promise.
        let promise = self.element.play();
        async move {
            let promise = promise.map_err(rejection)?;
            JsFuture::from(promise).await.map(drop).map_err(rejection)
        }
    }
}

/// Extracts a readable reason from a rejected `play()` promise.
///
/// Autoplay refusals arrive as `DOMException`s, which are `Error` instances
/// in every current engine; the `name` (`NotAllowedError`, `AbortError`, ...)
/// is the useful part.
fn rejection(value: JsValue) -> PlayRejected {
    let reason = if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        String::from(err.name())
    } else if let Some(s) = value.as_string() {
        s
    } else {
        String::from("unknown")
    };
    PlayRejected { reason }
}
