//! Standalone SVG rendering of the slider, the same picture the cairo view
//! paints. Each arc segment references its own `<linearGradient>` through
//! [`gradient_id`].

use super::{Handle, HandleIcons, SliderStyle, SliderValue};
use crate::clock_face::{ClockFace, LABEL_FONT_SIZE};
use crate::color::{HexColor, compute_arc_color};
use crate::geometry::{ArcSegment, arc_segments, gradient_id};
use std::f64::consts::PI;
use std::fmt;

pub struct SliderSvg<'a> {
    pub style: &'a SliderStyle,
    pub value: SliderValue,
    pub icons: &'a HandleIcons,
}

pub fn render(style: &SliderStyle, value: SliderValue, icons: &HandleIcons) -> String {
    SliderSvg {
        style,
        value,
        icons,
    }
    .to_string()
}

impl SliderSvg<'_> {
    fn segments(&self) -> impl Iterator<Item = ArcSegment> {
        arc_segments(
            self.style.segments,
            self.style.radius,
            self.value.start_angle,
            self.value.angle_length,
        )
    }

    fn write_gradients(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<defs>")?;
        for segment in self.segments() {
            let colors = compute_arc_color(
                segment.index,
                self.style.segments,
                self.style.gradient_color_from,
                self.style.gradient_color_to,
            );
            writeln!(
                f,
                r#"<linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"><stop offset="0" stop-color="{}"/><stop offset="1" stop-color="{}"/></linearGradient>"#,
                gradient_id(segment.index),
                segment.from.x,
                segment.from.y,
                segment.to.x,
                segment.to.y,
                HexColor::from(colors.from),
                HexColor::from(colors.to),
            )?;
        }
        writeln!(f, "</defs>")
    }

    fn write_clock_face(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = ClockFace::layout(self.style.clock_face_radius(), self.style.clock_format);
        let color = self.style.clock_face_color;

        writeln!(f, r#"<g stroke="{color}">"#)?;
        for tick in &face.ticks {
            writeln!(
                f,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke-width="{}"/>"#,
                tick.outer.x,
                tick.outer.y,
                tick.inner.x,
                tick.inner.y,
                tick.stroke_width(),
            )?;
        }
        writeln!(f, "</g>")?;

        writeln!(
            f,
            r#"<g fill="{color}" font-size="{LABEL_FONT_SIZE}" text-anchor="middle">"#
        )?;
        for label in &face.labels {
            writeln!(
                f,
                r#"<text x="{:.2}" y="{:.2}">{}</text>"#,
                label.anchor.x, label.anchor.y, label.value,
            )?;
        }
        writeln!(f, "</g>")
    }

    fn write_segment(&self, f: &mut fmt::Formatter<'_>, segment: &ArcSegment) -> fmt::Result {
        let r = self.style.radius;
        let large_arc = u8::from(segment.drawn_sweep() > PI);
        writeln!(
            f,
            r#"<path d="M {:.2} {:.2} A {r} {r} 0 {large_arc} 1 {:.2} {:.2}" stroke-width="{}" stroke="url(#{})" fill="none"/>"#,
            segment.from.x,
            segment.from.y,
            segment.to.x,
            segment.to.y,
            self.style.stroke_width,
            gradient_id(segment.index),
        )
    }

    fn write_handle(&self, f: &mut fmt::Formatter<'_>, handle: Handle) -> fmt::Result {
        let position = self.style.handle_position(handle, self.value);
        let tint = self.style.handle_color(handle);

        writeln!(
            f,
            r#"<g transform="translate({:.2}, {:.2})" fill="{tint}">"#,
            position.x, position.y,
        )?;
        writeln!(
            f,
            r#"<circle r="{}" fill="{}" stroke="{tint}" stroke-width="1"/>"#,
            self.style.handle_radius(),
            self.style.bg_circle_color,
        )?;
        if let Some(markup) = self
            .icons
            .get(handle)
            .and_then(|icon| icon.to_svg(self.style.stroke_width - 1.0, tint.to_srgb()))
        {
            writeln!(f, "{markup}")?;
        }
        writeln!(f, "</g>")
    }
}

impl fmt::Display for SliderSvg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.style.container_width();
        let offset = self.style.center_offset();

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{side}" height="{side}" viewBox="0 0 {side} {side}">"#
        )?;
        self.write_gradients(f)?;
        writeln!(f, r#"<g transform="translate({offset}, {offset})">"#)?;
        writeln!(
            f,
            r#"<circle r="{}" stroke-width="{}" fill="none" stroke="{}"/>"#,
            self.style.radius, self.style.stroke_width, self.style.bg_circle_color,
        )?;
        if self.style.show_clock_face {
            self.write_clock_face(f)?;
        }
        for segment in self.segments() {
            self.write_segment(f, &segment)?;
        }
        self.write_handle(f, Handle::Stop)?;
        self.write_handle(f, Handle::Start)?;
        writeln!(f, "</g>")?;
        writeln!(f, "</svg>")
    }
}
