// SPDX: CC0-1.0

pub mod color;
pub mod eval;
pub mod lex;
pub mod parse;
pub mod render;
pub mod sample;
pub mod sheet;
pub mod shell;
pub mod stdlib;
pub mod svg;

use crate::{color::Rgb, eval::FunctionModel};
use core::{fmt, ops::Range};

pub type Number = f64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

/// A sampled curve point in logical space.
///
/// `draw_from` means a segment may start here, `draw_to` means the segment
/// from the previous point may end here. A point with both flags cleared is a
/// break placeholder and is never connected to its neighbors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogicalPoint {
    x: Number,
    y: Number,
    draw_from: bool,
    draw_to: bool,
}

impl LogicalPoint {
    #[inline]
    pub const fn new(x: Number, y: Number) -> Self {
        Self::with_flags(x, y, true, true)
    }

    #[inline]
    pub const fn gap(x: Number) -> Self {
        Self::with_flags(x, 0.0, false, false)
    }

    #[inline]
    pub const fn with_flags(x: Number, y: Number, draw_from: bool, draw_to: bool) -> Self {
        Self {
            x,
            y,
            draw_from,
            draw_to,
        }
    }

    pub const fn x(&self) -> Number {
        self.x
    }

    pub const fn y(&self) -> Number {
        self.y
    }

    pub const fn pos(&self) -> Point<Number> {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    pub const fn draw_from(&self) -> bool {
        self.draw_from
    }

    pub const fn draw_to(&self) -> bool {
        self.draw_to
    }

    pub const fn is_gap(&self) -> bool {
        !self.draw_from && !self.draw_to
    }
}

/// Target rectangle in pixel space. Rows grow downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Logical ranges and the pixel rectangle they are mapped onto for one render
/// pass. The logical origin is the start of each range.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub x: Range<Number>,
    pub y: Range<Number>,
    pub pixels: PixelRect,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: -10.0..10.0,
            y: -10.0..10.0,
            pixels: PixelRect {
                x: 0,
                y: 0,
                width: 600,
                height: 400,
            },
        }
    }
}

impl Viewport {
    pub fn origin(&self) -> Point<Number> {
        Point {
            x: self.x.start,
            y: self.y.start,
        }
    }

    pub fn x_range(&self) -> Number {
        self.x.end - self.x.start
    }

    pub fn y_range(&self) -> Number {
        self.y.end - self.y.start
    }

    /// Pixels per logical unit along each axis.
    pub fn scale(&self) -> Point<Number> {
        Point {
            x: Number::from(self.pixels.width) / self.x_range(),
            y: Number::from(self.pixels.height) / self.y_range(),
        }
    }

    /// Map a logical point into pixel space, flipping y.
    pub fn project(&self, p: Point<Number>) -> Point<Number> {
        let scale = self.scale();
        Point {
            x: Number::from(self.pixels.x) + (p.x - self.x.start) * scale.x,
            y: Number::from(self.pixels.y) + (self.y.start + self.y_range() - p.y) * scale.y,
        }
    }

    /// Both logical ranges are non-empty and finite and the pixel rectangle
    /// has an area.
    pub fn is_valid(&self) -> bool {
        let range_ok = |r: &Range<Number>| r.start.is_finite() && r.end.is_finite() && r.start < r.end;
        range_ok(&self.x) && range_ok(&self.y) && self.pixels.width > 0 && self.pixels.height > 0
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("x range", &self.x)
            .field("y range", &self.y)
            .field("width", &self.pixels.width)
            .field("height", &self.pixels.height)
            .finish()
    }
}

/// One equation's drawable state. Specs with `visible` unset are skipped by
/// the renderer before sampling.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSpec {
    pub model: FunctionModel,
    pub color: Rgb,
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Number, b: Number) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn origin_maps_to_bottom_left() {
        let view = Viewport {
            x: -3.0..5.0,
            y: 2.0..6.0,
            pixels: PixelRect {
                x: 10,
                y: 20,
                width: 800,
                height: 300,
            },
        };
        let p = view.project(view.origin());
        assert!(close(p.x, 10.0), "{p:?}");
        assert!(close(p.y, 320.0), "{p:?}");
    }

    #[test]
    fn far_corner_maps_to_top_right() {
        let view = Viewport {
            x: -3.0..5.0,
            y: 2.0..6.0,
            pixels: PixelRect {
                x: 10,
                y: 20,
                width: 800,
                height: 300,
            },
        };
        let p = view.project(Point { x: 5.0, y: 6.0 });
        assert!(close(p.x, 810.0), "{p:?}");
        assert!(close(p.y, 20.0), "{p:?}");
    }

    #[test]
    fn larger_y_is_higher_on_screen() {
        let view = Viewport::default();
        let low = view.project(Point { x: 0.0, y: -1.0 });
        let high = view.project(Point { x: 0.0, y: 1.0 });
        assert!(high.y < low.y);
    }

    #[test]
    fn viewport_validity() {
        assert!(Viewport::default().is_valid());
        let mut view = Viewport::default();
        view.x = 1.0..1.0;
        assert!(!view.is_valid());
        let mut view = Viewport::default();
        view.pixels.height = 0;
        assert!(!view.is_valid());
    }

    #[test]
    fn gap_point_flags() {
        let gap = LogicalPoint::gap(1.5);
        assert!(gap.is_gap());
        assert_eq!(gap.y(), 0.0);
        assert!(!LogicalPoint::new(1.0, 2.0).is_gap());
    }
}
