// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM rendering of a session view.
//!
//! The page builds its elements once; [`DomPresenter`] only toggles
//! visibility, swaps text, and moves the progress indicator. Each property is
//! cached and written only when it changes, so presenting an unchanged view
//! touches no DOM state.
//!
//! Paused playback is exposed as `data-playing="false"` on the session
//! container; the page's stylesheet decides how that looks.

use alloc::format;
use alloc::string::{String, ToString};

use breathe_core::backend::Presenter;
use breathe_core::border::BorderPath;
use breathe_core::segment::SegmentFill;
use breathe_core::session::SessionView;
use web_sys::{Element, HtmlElement};

/// Shown on the instruction line when playback needs a user gesture.
pub const TAP_TO_PLAY: &str = "Tap to play";

/// The progress indicator's elements.
#[derive(Debug)]
pub enum Indicator {
    /// Two SVG `<path>` halves of the rounded border.
    Border {
        /// Left half.
        left: Element,
        /// Right half.
        right: Element,
        /// Geometry the halves were drawn from.
        path: BorderPath,
    },
    /// Four bars along the frame edges.
    Segments {
        /// Bottom bar, grows in width.
        bottom: HtmlElement,
        /// Left bar, grows in height.
        left: HtmlElement,
        /// Right bar, grows in height.
        right: HtmlElement,
        /// Top bar, grows in width.
        top: HtmlElement,
    },
}

/// Handles to the page elements a [`DomPresenter`] drives.
#[derive(Debug)]
pub struct DomParts {
    /// Start screen, hidden once the session starts.
    pub start_screen: HtmlElement,
    /// Session container, shown once the session starts.
    pub session: HtmlElement,
    /// Instruction line.
    pub instruction: HtmlElement,
    /// Mute toggle.
    pub mute_button: HtmlElement,
    /// Progress indicator.
    pub indicator: Indicator,
}

#[derive(Debug, Default)]
struct Shown {
    started: Option<bool>,
    label: Option<String>,
    visible: Option<bool>,
    progress: Option<Option<f64>>,
    muted: Option<bool>,
    playing: Option<bool>,
}

/// Renders [`SessionView`]s into a fixed set of page elements.
pub struct DomPresenter {
    parts: DomParts,
    shown: Shown,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("parts", &"DomParts")
            .field("shown", &self.shown)
            .finish()
    }
}

impl DomPresenter {
    /// Creates a presenter over `parts` and prepares the indicator.
    #[must_use]
    pub fn new(parts: DomParts) -> Self {
        if let Indicator::Border { left, right, path } = &parts.indicator {
            let length = format!("{:.3}", path.length());
            for half in [left, right] {
                let _ = half.set_attribute("stroke-dasharray", &length);
                let _ = half.set_attribute("stroke-dashoffset", &length);
            }
        }
        Self {
            parts,
            shown: Shown::default(),
        }
    }

    /// Returns the element handles.
    #[must_use]
    pub fn parts(&self) -> &DomParts {
        &self.parts
    }

    fn show_started(&mut self, started: bool) {
        if self.shown.started == Some(started) {
            return;
        }
        self.shown.started = Some(started);
        let (hide, show) = if started {
            (&self.parts.start_screen, &self.parts.session)
        } else {
            (&self.parts.session, &self.parts.start_screen)
        };
        let _ = hide.style().set_property("display", "none");
        let _ = show.style().remove_property("display");
    }

    fn show_instruction(&mut self, label: &str, visible: bool) {
        if self.shown.label.as_deref() != Some(label) {
            self.parts.instruction.set_text_content(Some(label));
            self.shown.label = Some(label.to_string());
        }
        if self.shown.visible != Some(visible) {
            let opacity = if visible { "1" } else { "0" };
            let _ = self.parts.instruction.style().set_property("opacity", opacity);
            self.shown.visible = Some(visible);
        }
    }

    fn show_progress(&mut self, progress: Option<f64>, segments: Option<SegmentFill>) {
        if self.shown.progress == Some(progress) {
            return;
        }
        self.shown.progress = Some(progress);
        match &self.parts.indicator {
            Indicator::Border { left, right, path } => {
                let offset = match progress {
                    Some(p) => path.dash_offset(p),
                    None => path.length(),
                };
                let offset = format!("{offset:.3}");
                for half in [left, right] {
                    let _ = half.set_attribute("stroke-dashoffset", &offset);
                }
            }
            Indicator::Segments {
                bottom,
                left,
                right,
                top,
            } => {
                let fill = segments.unwrap_or(SegmentFill::EMPTY);
                let _ = bottom.style().set_property("width", &percent(fill.bottom));
                let _ = top.style().set_property("width", &percent(fill.top));
                let side = percent(fill.side);
                let _ = left.style().set_property("height", &side);
                let _ = right.style().set_property("height", &side);
            }
        }
    }

    fn show_muted(&mut self, muted: bool) {
        if self.shown.muted == Some(muted) {
            return;
        }
        self.shown.muted = Some(muted);
        let button = &self.parts.mute_button;
        let _ = button.set_attribute("aria-label", mute_label(muted));
        let _ = button.set_attribute("data-muted", flag(muted));
    }

    fn show_playing(&mut self, playing: bool) {
        if self.shown.playing == Some(playing) {
            return;
        }
        self.shown.playing = Some(playing);
        let _ = self.parts.session.set_attribute("data-playing", flag(playing));
    }
}

impl Presenter for DomPresenter {
    fn present(&mut self, view: &SessionView<'_>) {
        self.show_started(view.started);
        let (label, visible) = instruction_label(view);
        self.show_instruction(label, visible);
        self.show_progress(view.progress, view.segments);
        self.show_muted(view.muted);
        self.show_playing(view.playing);
    }
}

/// What the instruction line shows for `view`.
fn instruction_label<'a>(view: &SessionView<'a>) -> (&'a str, bool) {
    if view.blocked {
        return (TAP_TO_PLAY, true);
    }
    (
        view.instruction.text.unwrap_or(""),
        view.instruction.visible,
    )
}

/// Accessible name of the mute button: the action it performs.
fn mute_label(muted: bool) -> &'static str {
    if muted { "Unmute" } else { "Mute" }
}

/// Value of a boolean `data-*` attribute.
fn flag(on: bool) -> &'static str {
    if on { "true" } else { "false" }
}

fn percent(v: f64) -> String {
    format!("{v:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use breathe_core::debounce::PhaseDisplay;

    fn view(text: Option<&str>, visible: bool, blocked: bool) -> SessionView<'_> {
        SessionView {
            started: true,
            instruction: PhaseDisplay { text, visible },
            progress: Some(12.5),
            segments: None,
            muted: false,
            playing: !blocked,
            blocked,
        }
    }

    #[test]
    fn label_follows_instruction() {
        assert_eq!(instruction_label(&view(Some("Hold"), true, false)), ("Hold", true));
        assert_eq!(
            instruction_label(&view(Some("Hold"), false, false)),
            ("Hold", false),
            "hidden text keeps its content while fading"
        );
        assert_eq!(instruction_label(&view(None, false, false)), ("", false));
    }

    #[test]
    fn blocked_playback_asks_for_a_tap() {
        assert_eq!(
            instruction_label(&view(Some("Inhale..."), true, true)),
            (TAP_TO_PLAY, true)
        );
    }

    #[test]
    fn mute_label_names_the_action() {
        assert_eq!(mute_label(true), "Unmute");
        assert_eq!(mute_label(false), "Mute");
    }

    #[test]
    fn flags_match_stylesheet_selectors() {
        assert_eq!(flag(true), "true");
        assert_eq!(flag(false), "false");
        let paused = view(Some("Hold"), true, true);
        assert_eq!(flag(paused.playing), "false");
    }

    #[test]
    fn percent_formats_css() {
        assert_eq!(percent(50.0), "50.00%");
        assert_eq!(percent(0.0625), "0.06%");
    }
}
