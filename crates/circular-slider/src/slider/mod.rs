use crate::clock_face::ClockFormat;
use crate::color::HexColor;
use crate::geometry::{self, Point, normalize_angle};
use crate::icon::HandleIcon;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::num::NonZeroUsize;
use std::rc::Rc;
use strum::{Display as StrumDisplay, EnumIter};

pub mod model;
pub mod svg;
pub mod view;

pub use model::{CircleCenter, HandleGesture, LatestValue, UpdateCallback, hit_handle};
pub use view::draw;

pub const DEFAULT_SEGMENTS: NonZeroUsize = NonZeroUsize::MIN.saturating_add(4);
pub const DEFAULT_STROKE_WIDTH: f64 = 40.0;
pub const DEFAULT_RADIUS: f64 = 145.0;
/// Pointer travel below which a press on a handle still counts as a tap.
pub const TAP_SLOP: f64 = 4.0;
/// Quarter turn added by tapping a handle.
pub const TAP_STEP: f64 = FRAC_PI_2;

/// The externally visible state of the slider.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderValue {
    pub start_angle: f64,
    pub angle_length: f64,
}

impl SliderValue {
    pub fn new(start_angle: f64, angle_length: f64) -> Self {
        Self {
            start_angle,
            angle_length,
        }
    }

    pub fn end_angle(&self) -> f64 {
        normalize_angle(self.start_angle + self.angle_length)
    }

    /// Moves one handle to `angle`, keeping the opposite end in place.
    pub fn dragged(self, handle: Handle, angle: f64) -> Self {
        match handle {
            Handle::Start => Self::new(angle, normalize_angle(self.end_angle() - angle)),
            Handle::Stop => Self::new(
                self.start_angle,
                normalize_angle(angle - self.start_angle),
            ),
        }
    }

    /// Extends the arc by a quarter turn past the tapped handle.
    pub fn tapped(self, handle: Handle) -> Self {
        match handle {
            Handle::Start => Self::new(
                normalize_angle(self.start_angle - TAP_STEP),
                normalize_angle(self.angle_length + TAP_STEP),
            ),
            Handle::Stop => Self::new(
                self.start_angle,
                normalize_angle(self.angle_length + TAP_STEP),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Handle {
    Start,
    Stop,
}

/// Appearance options of the slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderStyle {
    /// Number of linear gradients imitating the angular gradient.
    pub segments: NonZeroUsize,
    pub stroke_width: f64,
    pub radius: f64,
    pub gradient_color_from: HexColor,
    pub gradient_color_to: HexColor,
    pub show_clock_face: bool,
    pub clock_face_color: HexColor,
    pub clock_format: ClockFormat,
    pub bg_circle_color: HexColor,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            stroke_width: DEFAULT_STROKE_WIDTH,
            radius: DEFAULT_RADIUS,
            gradient_color_from: HexColor::rgb(0xff, 0x98, 0x00),
            gradient_color_to: HexColor::rgb(0xff, 0xcf, 0x00),
            show_clock_face: false,
            clock_face_color: HexColor::rgb(0x9d, 0x9d, 0x9d),
            clock_format: ClockFormat::TwelveHour,
            bg_circle_color: HexColor::rgb(0x17, 0x17, 0x17),
        }
    }
}

impl SliderStyle {
    /// Side of the square the slider occupies.
    pub fn container_width(&self) -> f64 {
        self.stroke_width + self.radius * 2.0 + 2.0
    }

    /// Offset from the container's corner to the circle center.
    pub fn center_offset(&self) -> f64 {
        self.stroke_width / 2.0 + self.radius + 1.0
    }

    pub fn handle_radius(&self) -> f64 {
        (self.stroke_width - 1.0) / 2.0
    }

    pub fn clock_face_radius(&self) -> f64 {
        self.radius - self.stroke_width / 2.0
    }

    pub fn handle_color(&self, handle: Handle) -> HexColor {
        match handle {
            Handle::Start => self.gradient_color_from,
            Handle::Stop => self.gradient_color_to,
        }
    }

    /// Handle center relative to the circle center.
    pub fn handle_position(&self, handle: Handle, value: SliderValue) -> Point {
        let index = match handle {
            Handle::Start => 0,
            Handle::Stop => self.segments.get() - 1,
        };
        let segment = geometry::compute_arc_segment(
            index,
            self.segments,
            self.radius,
            value.start_angle,
            value.angle_length,
        );

        match handle {
            Handle::Start => segment.from,
            Handle::Stop => segment.real_to,
        }
    }
}

/// Caller-supplied content drawn inside each handle.
#[derive(Clone, Default)]
pub struct HandleIcons {
    pub start: Option<Rc<dyn HandleIcon>>,
    pub stop: Option<Rc<dyn HandleIcon>>,
}

impl HandleIcons {
    pub fn get(&self, handle: Handle) -> Option<&dyn HandleIcon> {
        match handle {
            Handle::Start => self.start.as_deref(),
            Handle::Stop => self.stop.as_deref(),
        }
    }
}
