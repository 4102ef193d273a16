use crate::geometry::Point;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const TICK_COUNT: usize = 48;
pub const MAJOR_TICK_EVERY: usize = 4;
pub const MAJOR_TICK_WIDTH: f64 = 3.0;
pub const MINOR_TICK_WIDTH: f64 = 1.0;
pub const LABEL_FONT_SIZE: f64 = 16.0;
pub const LABEL_BASELINE_SHIFT: f64 = -9.0;
const FACE_INSET: f64 = 5.0;
const TICK_LENGTH: f64 = 7.0;
const TEXT_INSET: f64 = 26.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum ClockFormat {
    #[default]
    #[strum(to_string = "12h", serialize = "12")]
    TwelveHour,
    #[strum(to_string = "24h", serialize = "24")]
    TwentyFourHour,
}

impl ClockFormat {
    pub fn hours(self) -> u32 {
        match self {
            Self::TwelveHour => 12,
            Self::TwentyFourHour => 24,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub outer: Point,
    pub inner: Point,
    pub major: bool,
}

impl Tick {
    pub fn stroke_width(&self) -> f64 {
        if self.major {
            MAJOR_TICK_WIDTH
        } else {
            MINOR_TICK_WIDTH
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourLabel {
    pub value: u32,
    /// Baseline anchor of the centered text, baseline shift included.
    pub anchor: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    pub ticks: Vec<Tick>,
    pub labels: Vec<HourLabel>,
}

impl ClockFace {
    pub fn layout(radius: f64, format: ClockFormat) -> Self {
        Self {
            ticks: Self::ticks(radius),
            labels: Self::labels(radius, format),
        }
    }

    fn ticks(radius: f64) -> Vec<Tick> {
        let face_radius = radius - FACE_INSET;

        (0..TICK_COUNT)
            .map(|i| {
                let angle = TAU / TICK_COUNT as f64 * i as f64;
                let (sin, cos) = angle.sin_cos();
                Tick {
                    outer: Point::new(cos * face_radius, sin * face_radius),
                    inner: Point::new(
                        cos * (face_radius - TICK_LENGTH),
                        sin * (face_radius - TICK_LENGTH),
                    ),
                    major: i % MAJOR_TICK_EVERY == 0,
                }
            })
            .collect()
    }

    /// Slot `i` is rotated one hour (`π/6` or `π/12`) past `i`, so label
    /// `i + 1` lands on its own hour mark.
    fn labels(radius: f64, format: ClockFormat) -> Vec<HourLabel> {
        let text_radius = radius - TEXT_INSET;
        let full = format.hours();
        let half = f64::from(full / 2);

        (0..full)
            .map(|i| {
                let angle = TAU / f64::from(full) * f64::from(i) - FRAC_PI_2 + PI / half;
                let (sin, cos) = angle.sin_cos();
                HourLabel {
                    value: i + 1,
                    anchor: Point::new(
                        text_radius * cos,
                        text_radius * sin + LABEL_BASELINE_SHIFT,
                    ),
                }
            })
            .collect()
    }
}
