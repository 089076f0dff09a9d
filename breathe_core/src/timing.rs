// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame ticks and tick requests.
//!
//! Progress easing is driven by the display refresh, not by the media
//! element's notification cadence. A backend tick source (on the web,
//! `requestAnimationFrame`) delivers a [`FrameTick`] per frame; the consumer
//! answers with a [`TickRequest`] saying whether it wants another one.
//!
//! ```text
//! backend ── FrameTick ──► Session::on_frame() ── TickRequest ──► backend
//!    ▲                                                               │
//!    └──────────────── re-register only on Continue ◄────────────────┘
//! ```

use crate::time::HostTime;

/// A frame opportunity delivered by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time of the frame callback.
    pub now: HostTime,
    /// Monotonically increasing frame counter, per tick source.
    pub frame_index: u64,
}

/// Whether the consumer of a [`FrameTick`] needs another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickRequest {
    /// Still animating; request the next frame.
    Continue,
    /// At rest; stop requesting frames until something changes.
    Settled,
}

impl TickRequest {
    /// Returns `true` if another frame should be requested.
    #[inline]
    #[must_use]
    pub const fn wants_frame(self) -> bool {
        matches!(self, Self::Continue)
    }
}
