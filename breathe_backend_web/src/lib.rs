// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for breathe.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source that parks itself when
//!   progress settles
//! - [`DelayTimer`]: `setTimeout`-backed debounce timer
//! - [`VideoSource`]: [`MediaSource`] and [`MediaControl`] over an
//!   `HtmlVideoElement`
//! - [`DomPresenter`]: renders a session view into the page's elements
//! - [`ConsoleSink`]: trace sink writing to the browser console
//!
//! [`MediaSource`]: breathe_core::media::MediaSource
//! [`MediaControl`]: breathe_core::media::MediaControl

#![no_std]

extern crate alloc;

mod console;
mod media;
mod presenter;
mod raf;
mod timer;

pub use breathe_core::backend::Presenter;
pub use console::ConsoleSink;
pub use media::VideoSource;
pub use presenter::{DomParts, DomPresenter, Indicator, TAP_TO_PLAY};
pub use raf::RafLoop;
pub use timer::DelayTimer;

use breathe_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microseconds, the same scale as the
/// timestamps delivered to [`RafLoop`] callbacks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}
