//! A circular slider: an arc between two draggable handles, painted as a
//! chain of linear-gradient segments over an optional clock face.

pub mod clock_face;
pub mod color;
pub mod geometry;
pub mod icon;
mod macros;
pub mod slider;
pub mod widget;

pub use clock_face::{ClockFace, ClockFormat};
pub use color::{ArcColor, HexColor, compute_arc_color};
pub use geometry::{ArcSegment, Point, compute_arc_segment, gradient_id};
pub use icon::{GlyphIcon, HandleIcon, IconSource, PixbufIcon};
pub use slider::{Handle, HandleIcons, SliderStyle, SliderValue};
pub use widget::CircularSlider;
