// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core state for a video-guided breathing session.
//!
//! `breathe_core` turns a media clock (a looping `<video>` element, or anything
//! that can report a playback position) into the two things a breathing page
//! renders: the current instruction text and a smoothed progress value. It is
//! `no_std` compatible (with `alloc`) and contains no platform code; hosts feed
//! it samples, frame ticks, and timer expiries, and it tells them what to do
//! next.
//!
//! # Architecture
//!
//! ```text
//!   MediaSource ── timeupdate ──► SampleGate ──► CycleSchedule::resolve()
//!        │                            │                   │
//!        │                            ▼                   ▼
//!        │                 ProgressAnimator::set_target  PhaseDebouncer::on_phase
//!        │                            │                   │
//!   FrameTick ──────────► ProgressAnimator::tick()    TimerAction (arm/cancel)
//!                                     │                   │
//!                                     └──► SessionView ◄──┘ ──► Presenter::present()
//! ```
//!
//! **[`schedule`]**: validated cycle schedule and the pure phase resolver.
//!
//! **[`sample`]**: playback samples, raw progress, and the sample gate that
//! drops notifications which did not move the clock.
//!
//! **[`animator`]**: exponential easing toward the raw progress with
//! discontinuity snapping.
//!
//! **[`debounce`]**: delay-and-supersede state machine for the instruction
//! text.
//!
//! **[`segment`]** and **[`border`]**: the two progress indicator geometries
//! (three-region bar and continuous rounded border).
//!
//! **[`session`]**: the single state structure that owns everything above and
//! handles every host notification.
//!
//! **[`playback`]**: the autoplay policy with its muted fallback, over the
//! [`media`] traits.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with a
//! zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies and
//!   SVG path output for [`border::BorderPath`].
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod animator;
pub mod backend;
pub mod border;
pub mod debounce;
pub mod media;
pub mod playback;
pub mod sample;
pub mod schedule;
pub mod segment;
pub mod session;
pub mod time;
pub mod timing;
pub mod trace;
