// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Platform-specific work lives in *backend* crates. Each backend provides:
//!
//! - **Tick source**: produces [`FrameTick`] values via a platform mechanism
//!   (on the web, `requestAnimationFrame`) and stops requesting frames when
//!   the consumer answers [`TickRequest::Settled`].
//!
//! - **Delay timer**: arms and cancels the debounce commit described by a
//!   [`TimerAction`].
//!
//! - **Media**: implements [`MediaSource`] and [`MediaControl`] for the
//!   native media element.
//!
//! - **Presenter**: implements the [`Presenter`] trait to render a
//!   [`SessionView`] into a platform-native tree.
//!
//! [`FrameTick`]: crate::timing::FrameTick
//! [`TickRequest::Settled`]: crate::timing::TickRequest::Settled
//! [`TimerAction`]: crate::debounce::TimerAction
//! [`MediaSource`]: crate::media::MediaSource
//! [`MediaControl`]: crate::media::MediaControl

use crate::session::SessionView;

/// Renders a [`SessionView`] into a platform-native presentation tree.
///
/// # Event loop pseudocode
///
/// ```rust,ignore
/// fn on_time_update() {
///     let update = session.on_time_update(video.sample(), now(), &mut tracer);
///     timer.apply(update.timer);
///     if update.frame.wants_frame() {
///         raf.start();
///     }
///     presenter.present(&session.view());
/// }
///
/// fn on_frame(tick: FrameTick) -> TickRequest {
///     let request = session.on_frame(tick, &mut tracer);
///     presenter.present(&session.view());
///     request
/// }
/// ```
pub trait Presenter {
    /// Updates the native tree to match `view`.
    fn present(&mut self, view: &SessionView<'_>);
}
