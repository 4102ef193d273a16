use derive_more::{Deref, From, Into};
use palette::rgb::FromHexError;
use palette::white_point::D65;
use palette::{FromColor, IntoColor, Lch, Mix, Srgb};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid color '{input}': {source}")]
pub struct ColorParseError {
    input: String,
    #[source]
    source: FromHexError,
}

/// An sRGB color written as `#rrggbb` (or `#rgb`) in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn to_srgb(self) -> Srgb<f64> {
        self.0.into_format()
    }
}

impl From<Srgb<f64>> for HexColor {
    fn from(color: Srgb<f64>) -> Self {
        Self(color.into_format())
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Srgb<u8>>()
            .map(Self)
            .map_err(|source| ColorParseError {
                input: s.to_string(),
                source,
            })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Gradient stops for one arc segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcColor {
    pub from: Srgb<f64>,
    pub to: Srgb<f64>,
}

/// Interpolates between two colors in CIE Lch, taking the shorter way around
/// the hue circle. `t` is clamped to `[0, 1]`.
pub fn lch_interpolator(from: HexColor, to: HexColor) -> impl Fn(f64) -> Srgb<f64> {
    let from: Lch<D65, f64> = from.to_srgb().into_color();
    let to: Lch<D65, f64> = to.to_srgb().into_color();

    move |t| Srgb::from_color(from.mix(to, t.clamp(0.0, 1.0)))
}

pub fn compute_arc_color(
    index: usize,
    segments: NonZeroUsize,
    color_from: HexColor,
    color_to: HexColor,
) -> ArcColor {
    let interpolate = lch_interpolator(color_from, color_to);
    let n = segments.get() as f64;

    ArcColor {
        from: interpolate(index as f64 / n),
        to: interpolate((index + 1) as f64 / n),
    }
}
