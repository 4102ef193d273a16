use super::{Handle, HandleIcons, SliderStyle, SliderValue};
use crate::clock_face::{ClockFace, LABEL_FONT_SIZE};
use crate::color::compute_arc_color;
use crate::geometry::{ArcSegment, SEAM_OVERLAP, arc_segments};
use cairo::{Context, LinearGradient};
use palette::Srgb;
use std::f64::consts::{FRAC_PI_2, TAU};

fn set_source_color(cr: &Context, color: Srgb<f64>) {
    cr.set_source_rgb(color.red, color.green, color.blue);
}

/// Cairo measures from the +x axis, the slider from 12 o'clock.
fn cairo_angle(angle: f64) -> f64 {
    angle - FRAC_PI_2
}

struct SliderRenderer<'a> {
    style: &'a SliderStyle,
    value: SliderValue,
    icons: &'a HandleIcons,
}

impl SliderRenderer<'_> {
    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        let offset = self.style.center_offset();

        cr.save()?;
        cr.translate(offset, offset);
        self.draw_background(cr)?;
        if self.style.show_clock_face {
            self.draw_clock_face(cr)?;
        }
        for segment in arc_segments(
            self.style.segments,
            self.style.radius,
            self.value.start_angle,
            self.value.angle_length,
        ) {
            self.draw_segment(cr, &segment)?;
        }
        // start handle on top, matching hit testing
        self.draw_handle(cr, Handle::Stop)?;
        self.draw_handle(cr, Handle::Start)?;
        cr.restore()
    }

    fn draw_background(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_source_color(cr, self.style.bg_circle_color.to_srgb());
        cr.set_line_width(self.style.stroke_width);
        cr.new_path();
        cr.arc(0.0, 0.0, self.style.radius, 0.0, TAU);
        cr.stroke()
    }

    fn draw_clock_face(&self, cr: &Context) -> Result<(), cairo::Error> {
        let face = ClockFace::layout(self.style.clock_face_radius(), self.style.clock_format);
        set_source_color(cr, self.style.clock_face_color.to_srgb());

        for tick in &face.ticks {
            cr.set_line_width(tick.stroke_width());
            cr.move_to(tick.outer.x, tick.outer.y);
            cr.line_to(tick.inner.x, tick.inner.y);
            cr.stroke()?;
        }

        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(LABEL_FONT_SIZE);
        for label in &face.labels {
            let text = label.value.to_string();
            let ext = cr.text_extents(&text)?;
            cr.move_to(
                label.anchor.x - (ext.width() / 2.0 + ext.x_bearing()),
                label.anchor.y,
            );
            cr.show_text(&text)?;
        }
        Ok(())
    }

    fn draw_segment(&self, cr: &Context, segment: &ArcSegment) -> Result<(), cairo::Error> {
        let colors = compute_arc_color(
            segment.index,
            self.style.segments,
            self.style.gradient_color_from,
            self.style.gradient_color_to,
        );
        let gradient = LinearGradient::new(segment.from.x, segment.from.y, segment.to.x, segment.to.y);
        gradient.add_color_stop_rgb(0.0, colors.from.red, colors.from.green, colors.from.blue);
        gradient.add_color_stop_rgb(1.0, colors.to.red, colors.to.green, colors.to.blue);

        cr.set_source(&gradient)?;
        cr.set_line_width(self.style.stroke_width);
        cr.new_path();
        cr.arc(
            0.0,
            0.0,
            self.style.radius,
            cairo_angle(segment.from_angle),
            cairo_angle(segment.to_angle + SEAM_OVERLAP),
        );
        cr.stroke()
    }

    fn draw_handle(&self, cr: &Context, handle: Handle) -> Result<(), cairo::Error> {
        let position = self.style.handle_position(handle, self.value);
        let tint = self.style.handle_color(handle).to_srgb();

        cr.save()?;
        cr.translate(position.x, position.y);
        cr.new_path();
        cr.arc(0.0, 0.0, self.style.handle_radius(), 0.0, TAU);
        set_source_color(cr, self.style.bg_circle_color.to_srgb());
        cr.fill_preserve()?;
        set_source_color(cr, tint);
        cr.set_line_width(1.0);
        cr.stroke()?;

        if let Some(icon) = self.icons.get(handle) {
            icon.paint(cr, self.style.stroke_width - 1.0, tint)?;
        }
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    style: &SliderStyle,
    value: SliderValue,
    icons: &HandleIcons,
) -> Result<(), cairo::Error> {
    SliderRenderer {
        style,
        value,
        icons,
    }
    .draw(cr)
}
