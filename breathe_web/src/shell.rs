// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builds the page: background, start screen, and session view.

use alloc::format;
use alloc::string::String;

use breathe_backend_web::{DomParts, Indicator};
use kurbo::Size;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlVideoElement};

use crate::config::{IndicatorStyle, PageConfig, Theme};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Elements the entry point binds events to, plus what the presenter drives.
pub(crate) struct Shell {
    pub(crate) parts: DomParts,
    pub(crate) begin: HtmlButtonElement,
    pub(crate) frame: HtmlElement,
    pub(crate) video: HtmlVideoElement,
}

impl core::fmt::Debug for Shell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Shell").finish_non_exhaustive()
    }
}

pub(crate) fn build(doc: &Document, config: &PageConfig) -> Result<Shell, JsValue> {
    let theme = &config.theme;
    let body = doc.body().ok_or("document has no body")?;
    style(
        &body,
        &format!(
            "margin: 0; min-height: 100vh; font-family: {}; color: {};",
            theme.font_family, theme.text_primary
        ),
    )?;

    let sheet = element(doc, "style")?;
    sheet.set_text_content(Some(&stylesheet(config)));
    match doc.head() {
        Some(head) => head.append_child(&sheet)?,
        None => body.append_child(&sheet)?,
    };

    let background = element(doc, "div")?;
    style(&background, &theme.background_css())?;
    body.append_child(&background)?;

    let (start_screen, begin) = build_start_screen(doc, theme)?;
    body.append_child(&start_screen)?;

    let session = element(doc, "main")?;
    style(
        &session,
        "display: none; min-height: 100vh; box-sizing: border-box; padding: 24px; \
         flex-direction: column; align-items: center; justify-content: center; \
         gap: 24px; text-align: center; position: relative; z-index: 1;",
    )?;
    // The presenter clears `display: none` by removing the property, which
    // would fall back to block; the class restores the flex layout.
    session.set_class_name("breathe-session");
    body.append_child(&session)?;

    let title = element(doc, "h1")?;
    title.set_text_content(Some("Breathe Deeply"));
    style(
        &title,
        &format!(
            "margin: 0; font-size: 2.125rem; font-weight: 600; color: {};",
            theme.dark_purple_blue
        ),
    )?;
    session.append_child(&title)?;

    let instruction_row = element(doc, "div")?;
    style(
        &instruction_row,
        "height: 40px; display: flex; align-items: center;",
    )?;
    let instruction = element(doc, "p")?;
    instruction.set_attribute("aria-live", "polite")?;
    style(
        &instruction,
        &format!(
            "margin: 0; font-size: 1.25rem; font-weight: 400; color: {}; \
             opacity: 0; transition: opacity 500ms ease;",
            theme.text_primary
        ),
    )?;
    instruction_row.append_child(&instruction)?;
    session.append_child(&instruction_row)?;

    let stage = element(doc, "div")?;
    style(&stage, "position: relative; display: inline-block;")?;
    session.append_child(&stage)?;

    let frame = element(doc, "div")?;
    style(&frame, &frame_css(config))?;
    stage.append_child(&frame)?;

    let video: HtmlVideoElement = doc.create_element("video")?.unchecked_into();
    video.set_src(config.video_url);
    video.set_controls(false);
    video.set_loop(true);
    video.set_autoplay(false);
    video.set_muted(config.initial_muted);
    video.set_preload("auto");
    video.set_attribute("playsinline", "")?;
    style(
        &video,
        "width: 100%; height: 100%; object-fit: cover; display: block;",
    )?;
    frame.append_child(&video)?;

    let indicator = match config.indicator {
        IndicatorStyle::Border => build_border(doc, &frame, config)?,
        IndicatorStyle::Segments => build_segments(doc, &frame, config)?,
    };

    let mute_button = element(doc, "button")?;
    mute_button.set_attribute("type", "button")?;
    mute_button.set_class_name("breathe-mute");
    style(
        &mute_button,
        "position: absolute; top: 50%; left: 100%; transform: translate(10px, -50%); \
         z-index: 20; width: 34px; height: 34px; border: 0; border-radius: 50%; \
         background: rgba(0, 0, 0, 0.25); color: white; cursor: pointer; \
         display: flex; align-items: center; justify-content: center; font-size: 16px;",
    )?;
    stage.append_child(&mute_button)?;

    let footer = element(doc, "p")?;
    footer.set_text_content(Some("Allow the rhythm to guide you to a state of calm."));
    style(
        &footer,
        &format!(
            "margin: 0; max-width: 350px; line-height: 1.6; font-weight: 300; \
             font-size: 0.875rem; color: {};",
            theme.footer
        ),
    )?;
    session.append_child(&footer)?;

    Ok(Shell {
        parts: DomParts {
            start_screen,
            session,
            instruction,
            mute_button,
            indicator,
        },
        begin,
        frame,
        video,
    })
}

fn build_start_screen(
    doc: &Document,
    theme: &Theme,
) -> Result<(HtmlElement, HtmlButtonElement), JsValue> {
    let screen = element(doc, "section")?;
    style(
        &screen,
        "display: flex; flex-direction: column; align-items: center; \
         justify-content: center; min-height: 100vh; box-sizing: border-box; \
         padding: 16px; text-align: center; position: relative; z-index: 1;",
    )?;

    let heading = element(doc, "h1")?;
    heading.set_text_content(Some("Ready to Relax?"));
    style(
        &heading,
        &format!(
            "margin: 0 0 16px; font-size: 3rem; font-weight: 600; color: {};",
            theme.dark_purple_blue
        ),
    )?;
    screen.append_child(&heading)?;

    let subtitle = element(doc, "p")?;
    subtitle.set_text_content(Some("Take a moment for yourself. Let's breathe together."));
    style(
        &subtitle,
        &format!(
            "margin: 0 0 32px; max-width: 400px; font-size: 1.25rem; color: {};",
            theme.text_secondary
        ),
    )?;
    screen.append_child(&subtitle)?;

    let begin: HtmlButtonElement = doc.create_element("button")?.unchecked_into();
    begin.set_type("button");
    begin.set_text_content(Some("Begin Session"));
    begin.set_class_name("breathe-begin");
    style(
        &begin,
        &format!(
            "border: 0; border-radius: 25px; padding: 12px 28px; background: {}; \
             color: white; font: inherit; font-size: 1.1rem; cursor: pointer;",
            theme.dark_purple_blue
        ),
    )?;
    screen.append_child(&begin)?;

    Ok((screen, begin))
}

fn build_border(
    doc: &Document,
    frame: &HtmlElement,
    config: &PageConfig,
) -> Result<Indicator, JsValue> {
    let path = config.border();
    let svg = doc.create_element_ns(Some(SVG_NS), "svg")?;
    svg.set_attribute("viewBox", &view_box(path.size()))?;
    svg.set_attribute("aria-hidden", "true")?;
    style(
        &svg,
        "position: absolute; inset: 0; width: 100%; height: 100%; \
         pointer-events: none; z-index: 10; overflow: visible;",
    )?;

    let (left_d, right_d) = path.svg_data();
    let left = stroke(doc, &left_d, config)?;
    let right = stroke(doc, &right_d, config)?;
    svg.append_child(&left)?;
    svg.append_child(&right)?;
    frame.append_child(&svg)?;

    Ok(Indicator::Border { left, right, path })
}

fn stroke(doc: &Document, d: &str, config: &PageConfig) -> Result<Element, JsValue> {
    let half = doc.create_element_ns(Some(SVG_NS), "path")?;
    half.set_attribute("d", d)?;
    half.set_attribute("fill", "none")?;
    half.set_attribute("stroke", config.theme.progress)?;
    half.set_attribute("stroke-width", &format!("{}", config.stroke_width))?;
    half.set_attribute("stroke-linecap", "round")?;
    half.set_attribute("class", "breathe-progress")?;
    Ok(half)
}

fn build_segments(
    doc: &Document,
    frame: &HtmlElement,
    config: &PageConfig,
) -> Result<Indicator, JsValue> {
    let w = config.stroke_width;
    let colour = config.theme.progress;
    let bar = |anchor: &str, grows: &str, thickness: &str| -> Result<HtmlElement, JsValue> {
        let el = element(doc, "div")?;
        el.set_class_name("breathe-progress");
        style(
            &el,
            &format!(
                "position: absolute; {anchor}; {grows}: 0%; {thickness}: {w}px; \
                 background: {colour}; z-index: 10; pointer-events: none;"
            ),
        )?;
        frame.append_child(&el)?;
        Ok(el)
    };
    Ok(Indicator::Segments {
        bottom: bar("left: 0; bottom: 0", "width", "height")?,
        left: bar("left: 0; bottom: 0", "height", "width")?,
        right: bar("right: 0; bottom: 0", "height", "width")?,
        top: bar("left: 0; top: 0", "width", "height")?,
    })
}

/// Page-wide rules that inline styles cannot express.
fn stylesheet(config: &PageConfig) -> String {
    format!(
        "@keyframes breathe-bg {{ 0% {{ background-position: 0% 50%; }} \
         50% {{ background-position: 100% 50%; }} \
         100% {{ background-position: 0% 50%; }} }}\n\
         .breathe-session {{ display: flex; }}\n\
         .breathe-begin:hover {{ opacity: 0.85; }}\n\
         .breathe-mute::after {{ content: \"\\1F50A\"; }}\n\
         .breathe-mute[data-muted=\"true\"]::after {{ content: \"\\1F507\"; }}\n\
         .breathe-progress {{ will-change: stroke-dashoffset; }}\n\
         @keyframes breathe-pulse {{ 0%, 100% {{ opacity: 0.8; }} 50% {{ opacity: 0.4; }} }}\n\
         .breathe-session[data-playing=\"false\"] .breathe-progress \
         {{ animation: breathe-pulse 1.5s ease-in-out infinite; }}\n\
         video {{ background: {}; }}\n",
        config.theme.sky_blue
    )
}

fn frame_css(config: &PageConfig) -> String {
    let Size { width, height } = config.frame;
    format!(
        "position: relative; width: clamp(280px, 80vw, {width}px); \
         aspect-ratio: {width} / {height}; border-radius: {radius}px; overflow: hidden; \
         box-shadow: 0 8px 25px rgba(0, 0, 0, 0.1); background: {sky}; cursor: pointer;",
        radius = config.corner_radius,
        sky = config.theme.sky_blue,
    )
}

fn view_box(size: Size) -> String {
    format!("0 0 {} {}", size.width, size.height)
}

fn element(doc: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(doc.create_element(tag)?.unchecked_into())
}

fn style(el: &Element, css: &str) -> Result<(), JsValue> {
    el.set_attribute("style", css)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_box_spans_the_frame() {
        assert_eq!(view_box(Size::new(350.0, 525.0)), "0 0 350 525");
        assert_eq!(view_box(Size::new(320.5, 480.0)), "0 0 320.5 480");
    }

    #[test]
    fn frame_keeps_the_configured_aspect() {
        let css = frame_css(&PageConfig::web());
        assert!(css.contains("clamp(280px, 80vw, 350px)"), "got: {css}");
        assert!(css.contains("aspect-ratio: 350 / 525"), "got: {css}");
        assert!(css.contains("border-radius: 18px"), "got: {css}");
    }

    #[test]
    fn stylesheet_pulses_paused_progress() {
        let css = stylesheet(&PageConfig::web());
        assert!(css.contains("@keyframes breathe-pulse"), "got: {css}");
        assert!(
            css.contains(".breathe-session[data-playing=\"false\"] .breathe-progress"),
            "got: {css}"
        );
    }

    #[test]
    fn stylesheet_switches_mute_glyph() {
        let css = stylesheet(&PageConfig::web());
        assert!(css.contains("@keyframes breathe-bg"), "got: {css}");
        assert!(
            css.contains(".breathe-mute[data-muted=\"true\"]::after"),
            "got: {css}"
        );
    }
}
