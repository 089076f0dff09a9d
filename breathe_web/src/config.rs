// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page configuration.

use alloc::format;
use alloc::string::String;

use breathe_core::border::BorderPath;
use breathe_core::schedule::{
    BREATHING_BOX, BREATHING_BOX_CYCLE, CycleSchedule, PhaseEntry, ScheduleError,
};
use breathe_core::session::SessionConfig;
use kurbo::Size;

/// How progress through the video is drawn around the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndicatorStyle {
    /// A single stroke tracing both halves of the rounded border.
    #[default]
    Border,
    /// Four bars filled bottom, then sides, then top.
    Segments,
}

/// Page colours and font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Page background and gradient ends.
    pub background: &'static str,
    /// Gradient middle and video frame fill.
    pub sky_blue: &'static str,
    /// Headings and the begin button.
    pub dark_purple_blue: &'static str,
    /// Progress stroke.
    pub progress: &'static str,
    /// Instruction text.
    pub text_primary: &'static str,
    /// Start screen subtitle.
    pub text_secondary: &'static str,
    /// Footer text.
    pub footer: &'static str,
    /// CSS `font-family`.
    pub font_family: &'static str,
}

impl Theme {
    /// The default light-blue palette.
    #[must_use]
    pub const fn calm() -> Self {
        Self {
            background: "#7bbbf4",
            sky_blue: "#82C3F0",
            dark_purple_blue: "rgb(32, 32, 56)",
            progress: "#FFFFFF",
            text_primary: "#202038",
            text_secondary: "#5F8CB0",
            footer: "rgba(224, 240, 255, 0.9)",
            font_family: "Montserrat, Arial, sans-serif",
        }
    }

    /// CSS for the slowly drifting page background.
    #[must_use]
    pub fn background_css(&self) -> String {
        format!(
            "position: fixed; inset: 0; z-index: -1; \
             background: linear-gradient(135deg, {bg}, {sky}, {bg}); \
             background-size: 200% 200%; animation: breathe-bg 30s ease infinite;",
            bg = self.background,
            sky = self.sky_blue,
        )
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::calm()
    }
}

/// Everything the page needs to build itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageConfig {
    /// Video to loop.
    pub video_url: &'static str,
    /// Frame size in CSS pixels; also the indicator's coordinate space.
    pub frame: Size,
    /// Frame corner radius in CSS pixels.
    pub corner_radius: f64,
    /// Progress stroke width in CSS pixels.
    pub stroke_width: f64,
    /// Requested mute state for the first play.
    pub initial_muted: bool,
    /// Cycle length in seconds.
    pub cycle_duration: f64,
    /// Cycle intervals.
    pub phases: &'static [PhaseEntry],
    /// Indicator drawing style.
    pub indicator: IndicatorStyle,
    /// Colours and font.
    pub theme: Theme,
}

impl PageConfig {
    /// The bundled page: `animation.mp4` next to `index.html`, unmuted, with
    /// the border indicator.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            video_url: "animation.mp4",
            frame: BorderPath::DEFAULT_SIZE,
            corner_radius: BorderPath::DEFAULT_CORNER_RADIUS,
            stroke_width: 4.0,
            initial_muted: false,
            cycle_duration: BREATHING_BOX_CYCLE,
            phases: &BREATHING_BOX,
            indicator: IndicatorStyle::Border,
            theme: Theme::calm(),
        }
    }

    /// Builds and validates the cycle schedule.
    pub fn schedule(&self) -> Result<CycleSchedule, ScheduleError> {
        CycleSchedule::from_entries(self.phases, self.cycle_duration)
    }

    /// Builds the session configuration.
    pub fn session(&self) -> Result<SessionConfig, ScheduleError> {
        let mut config = SessionConfig::with_schedule(self.schedule()?);
        config.initial_muted = self.initial_muted;
        Ok(config)
    }

    /// Border geometry for the frame.
    #[must_use]
    pub fn border(&self) -> BorderPath {
        BorderPath::new(self.frame, self.corner_radius)
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::web()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_schedule_matches_the_box_preset() {
        assert_eq!(
            PageConfig::web().schedule(),
            Ok(CycleSchedule::breathing_box())
        );
    }

    #[test]
    fn bad_phases_fail_validation() {
        static OVERLAPPING: [PhaseEntry; 2] = [
            PhaseEntry {
                name: "a",
                start: 0.0,
                end: 5.0,
                text: "A",
            },
            PhaseEntry {
                name: "b",
                start: 4.0,
                end: 8.0,
                text: "B",
            },
        ];
        let config = PageConfig {
            phases: &OVERLAPPING,
            cycle_duration: 8.0,
            ..PageConfig::web()
        };
        assert!(config.schedule().is_err());
        assert!(config.session().is_err());

        let empty = PageConfig {
            phases: &[],
            ..PageConfig::web()
        };
        assert_eq!(empty.schedule().unwrap_err(), ScheduleError::Empty);
    }

    #[test]
    fn session_carries_initial_mute() {
        let config = PageConfig {
            initial_muted: true,
            ..PageConfig::web()
        };
        assert!(config.session().unwrap().initial_muted);
        assert!(!PageConfig::default().session().unwrap().initial_muted);
    }

    #[test]
    fn border_uses_frame_geometry() {
        let border = PageConfig::web().border();
        assert_eq!(border.size(), Size::new(350.0, 525.0));
        assert_eq!(border.corner_radius(), 18.0);
    }

    #[test]
    fn background_css_names_theme_colours() {
        let css = Theme::calm().background_css();
        assert!(css.contains("#7bbbf4"), "got: {css}");
        assert!(css.contains("#82C3F0"), "got: {css}");
        assert!(css.contains("breathe-bg"), "got: {css}");
    }
}
