use cairo::Context;
use freedesktop_icons::lookup;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::color::HexColor;

pub const ICON_SIZE: i32 = 128;
/// Share of the handle diameter an icon may cover.
const ICON_FILL: f64 = 0.6;

crate::string_newtype! {
    pub struct IconName;
}

crate::string_newtype! {
    pub struct Glyph;
}

/// Drawable content placed inside a slider handle.
///
/// Painting happens with the origin at the handle center; `size` is the
/// handle diameter and `tint` the handle's accent color.
pub trait HandleIcon {
    fn paint(&self, cr: &Context, size: f64, tint: Srgb<f64>) -> Result<(), cairo::Error>;

    fn to_svg(&self, _size: f64, _tint: Srgb<f64>) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct GlyphIcon {
    pub glyph: Glyph,
}

impl GlyphIcon {
    pub fn new(glyph: impl Into<String>) -> Self {
        Self {
            glyph: Glyph::new(glyph),
        }
    }

    fn font_size(size: f64) -> f64 {
        size * ICON_FILL
    }
}

impl HandleIcon for GlyphIcon {
    fn paint(&self, cr: &Context, size: f64, tint: Srgb<f64>) -> Result<(), cairo::Error> {
        cr.set_source_rgb(tint.red, tint.green, tint.blue);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(Self::font_size(size));
        let ext = cr.text_extents(&self.glyph)?;
        cr.move_to(
            -(ext.width() / 2.0 + ext.x_bearing()),
            -(ext.height() / 2.0 + ext.y_bearing()),
        );
        cr.show_text(&self.glyph)
    }

    fn to_svg(&self, size: f64, tint: Srgb<f64>) -> Option<String> {
        let font_size = Self::font_size(size);
        Some(format!(
            r#"<text x="0" y="{:.2}" font-size="{:.2}" font-weight="bold" text-anchor="middle" fill="{}">{}</text>"#,
            font_size * 0.35,
            font_size,
            HexColor::from(tint),
            escape_xml(&self.glyph),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct PixbufIcon {
    pixbuf: Pixbuf,
}

impl PixbufIcon {
    pub fn load(path: &Path) -> Option<Self> {
        Pixbuf::from_file_at_scale(path, ICON_SIZE, ICON_SIZE, true)
            .inspect_err(|e| log::warn!("Failed to load icon {}: {}", path.display(), e))
            .ok()
            .map(|pixbuf| Self { pixbuf })
    }
}

impl HandleIcon for PixbufIcon {
    fn paint(&self, cr: &Context, size: f64, _tint: Srgb<f64>) -> Result<(), cairo::Error> {
        let (w, h) = (
            f64::from(self.pixbuf.width()),
            f64::from(self.pixbuf.height()),
        );
        let scale = size * ICON_FILL / w.max(h);

        cr.save()?;
        cr.scale(scale, scale);
        cr.set_source_pixbuf(&self.pixbuf, -w / 2.0, -h / 2.0);
        cr.paint()?;
        cr.restore()
    }
}

/// Icon content as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSource {
    Glyph(Glyph),
    /// Icon-theme name or absolute file path.
    Name(IconName),
}

impl IconSource {
    pub fn load(&self) -> Option<Rc<dyn HandleIcon>> {
        match self {
            Self::Glyph(glyph) => Some(Rc::new(GlyphIcon {
                glyph: glyph.clone(),
            })),
            Self::Name(name) => find_icon_path(name)
                .and_then(|path| PixbufIcon::load(&path))
                .map(|icon| Rc::new(icon) as Rc<dyn HandleIcon>),
        }
    }
}

pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_str());
    if path.is_absolute() && path.exists() {
        return Some(path.to_path_buf());
    }

    lookup(icon_name.as_str())
        .with_size(ICON_SIZE as u16)
        .with_scale(1)
        .find()
}

pub(crate) fn escape_xml(text: &str) -> String {
    text.chars().fold(String::with_capacity(text.len()), |mut out, c| {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Icons {
        start: IconSource,
        stop: IconSource,
    }

    #[test]
    fn test_icon_source_deserialization() {
        let json = r#"{"start": {"glyph": "☾"}, "stop": {"name": "weather-clear"}}"#;
        let icons: Icons = serde_json::from_str(json).unwrap();

        assert_eq!(icons.start, IconSource::Glyph(Glyph::new("☾")));
        assert_eq!(icons.stop, IconSource::Name(IconName::new("weather-clear")));
    }

    #[test]
    fn test_glyph_source_always_loads() {
        assert!(IconSource::Glyph(Glyph::new("☀")).load().is_some());
    }

    #[test]
    fn test_empty_icon_name_has_no_path() {
        assert_eq!(find_icon_path(&IconName::new("")), None);
    }

    #[test]
    fn test_glyph_svg_is_escaped_and_tinted() {
        let svg = GlyphIcon::new("<&>")
            .to_svg(40.0, Srgb::new(1.0, 0.0, 0.0))
            .unwrap();

        assert!(svg.contains("&lt;&amp;&gt;"));
        assert!(svg.contains(r##"fill="#ff0000""##));
        assert!(svg.contains(r#"font-size="24.00""#));
    }
}
