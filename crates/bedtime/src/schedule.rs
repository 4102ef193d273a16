//! Reads the slider as a sleep schedule: the start handle is bedtime, the
//! stop handle wake-up time, and the arc the time asleep.

use circular_slider::geometry::normalize_angle;
use circular_slider::{ClockFormat, SliderValue};
use std::f64::consts::TAU;
use std::fmt;

/// Times snap to this many minutes.
pub const STEP_MINUTES: u32 = 5;

fn minutes_per_turn(format: ClockFormat) -> u32 {
    format.hours() * 60
}

/// Minutes covered by `angle` on the dial, snapped to [`STEP_MINUTES`].
pub fn angle_to_minutes(angle: f64, format: ClockFormat) -> u32 {
    let turn = minutes_per_turn(format);
    let steps = (normalize_angle(angle) / TAU * f64::from(turn / STEP_MINUTES)).round();
    (steps as u32 * STEP_MINUTES) % turn
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub minutes: u32,
    pub format: ClockFormat,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, minute) = (self.minutes / 60, self.minutes % 60);
        match self.format {
            ClockFormat::TwelveHour => {
                let hour = if hour == 0 { 12 } else { hour };
                write!(f, "{hour}:{minute:02}")
            }
            ClockFormat::TwentyFourHour => write!(f, "{hour:02}:{minute:02}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub bedtime: TimeOfDay,
    pub wake: TimeOfDay,
    pub asleep_minutes: u32,
}

impl Schedule {
    pub fn from_value(value: SliderValue, format: ClockFormat) -> Self {
        let time = |angle| TimeOfDay {
            minutes: angle_to_minutes(angle, format),
            format,
        };

        Self {
            bedtime: time(value.start_angle),
            wake: time(value.end_angle()),
            asleep_minutes: angle_to_minutes(value.angle_length, format),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bedtime {}  ·  Wake {}  ·  {} h {:02} min",
            self.bedtime,
            self.wake,
            self.asleep_minutes / 60,
            self.asleep_minutes % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_INITIAL;
    use std::f64::consts::PI;

    #[test]
    fn test_angle_to_minutes() {
        let cases = [
            (0.0, ClockFormat::TwelveHour, 0),
            (PI, ClockFormat::TwelveHour, 360),
            (PI / 2.0, ClockFormat::TwentyFourHour, 360),
            (TAU - 1e-6, ClockFormat::TwelveHour, 0),
            (-PI / 2.0, ClockFormat::TwelveHour, 540),
            // 0.01 turn = 7.2 minutes, snapped to 5
            (TAU * 0.01, ClockFormat::TwelveHour, 5),
        ];

        for (angle, format, expected) in cases {
            assert_eq!(angle_to_minutes(angle, format), expected, "{angle} {format}");
        }
    }

    #[test]
    fn test_default_schedule() {
        let schedule = Schedule::from_value(DEFAULT_INITIAL, ClockFormat::TwelveHour);

        assert_eq!(schedule.bedtime.minutes, 600);
        assert_eq!(schedule.wake.minutes, 360);
        assert_eq!(schedule.asleep_minutes, 480);
        assert_eq!(
            schedule.to_string(),
            "Bedtime 10:00  ·  Wake 6:00  ·  8 h 00 min"
        );
    }

    #[test]
    fn test_twenty_four_hour_display() {
        let value = SliderValue::new(3.0 * PI / 2.0, PI);
        let schedule = Schedule::from_value(value, ClockFormat::TwentyFourHour);

        assert_eq!(schedule.bedtime.to_string(), "18:00");
        assert_eq!(schedule.wake.to_string(), "06:00");
        assert_eq!(schedule.asleep_minutes, 720);
    }

    #[test]
    fn test_midnight_on_twelve_hour_dial() {
        let time = TimeOfDay {
            minutes: 25,
            format: ClockFormat::TwelveHour,
        };
        assert_eq!(time.to_string(), "12:25");
    }
}
