// SPDX: CC0-1.0

//! Projection of sampled curves into pixel space and segment drawing.
//!
//! Axes are drawn first in [`color::AXIS`], then every visible spec in its own
//! color. Two consecutive points are joined only when the earlier one allows
//! a segment to start and the later one allows it to end, so a break
//! placeholder leaves a gap on both of its sides.

use crate::{color, color::Rgb, sample::sample, GraphSpec, LogicalPoint, Number, Point, Viewport};

pub const AXIS_WIDTH: f64 = 1.0;
pub const CURVE_WIDTH: f64 = 2.0;

/// Drawing primitives the renderer needs from its target.
pub trait Surface {
    fn set_color(&mut self, color: Rgb);

    fn set_line_width(&mut self, width: f64);

    /// Straight line between two pixel positions.
    fn line(&mut self, from: Point<i32>, to: Point<i32>);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub axes: usize,
    pub curves: usize,
    pub segments: usize,
    /// Consecutive pairs left unjoined because of a break.
    pub breaks: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CurveStats {
    pub segments: usize,
    pub breaks: usize,
}

/// Where the axes cross the target. `None` for an axis outside of it.
///
/// Visibility is judged against `0..width` and `0..height` of the target,
/// whatever the rectangle's own offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axes {
    /// Pixel row of the line `y = 0`.
    pub horizontal: Option<Number>,
    /// Pixel column of the line `x = 0`.
    pub vertical: Option<Number>,
}

pub fn axes(viewport: &Viewport) -> Axes {
    let scale = viewport.scale();
    let px = viewport.pixels;
    let vertical = Number::from(px.x) - viewport.x.start * scale.x;
    let horizontal = Number::from(px.y) + (viewport.y.start + viewport.y_range()) * scale.y;

    let inside = |v: Number, len: u32| 0.0 < v && v < Number::from(len);
    Axes {
        horizontal: inside(horizontal, px.height).then_some(horizontal),
        vertical: inside(vertical, px.width).then_some(vertical),
    }
}

/// Draw whichever axes are visible, returning how many were drawn. Each runs
/// from pixel 0 to the full width or height.
pub fn draw_axes<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport) -> usize {
    let px = viewport.pixels;
    let Axes {
        horizontal,
        vertical,
    } = axes(viewport);
    let span = |len: u32| i32::try_from(len).unwrap_or(i32::MAX);

    surface.set_color(color::AXIS);
    surface.set_line_width(AXIS_WIDTH);
    let mut drawn = 0;
    if let Some(row) = horizontal {
        let row = to_pixel(row);
        surface.line(Point { x: 0, y: row }, Point { x: span(px.width), y: row });
        drawn += 1;
    }
    if let Some(col) = vertical {
        let col = to_pixel(col);
        surface.line(Point { x: col, y: 0 }, Point { x: col, y: span(px.height) });
        drawn += 1;
    }
    drawn
}

#[derive(Clone, Copy, Debug)]
struct Projected {
    at: Point<Number>,
    draw_from: bool,
    draw_to: bool,
}

fn project(viewport: &Viewport, point: LogicalPoint) -> Projected {
    Projected {
        at: viewport.project(point.pos()),
        draw_from: point.draw_from(),
        draw_to: point.draw_to(),
    }
}

// float to int casts saturate, and NaN becomes 0
fn to_pixel(v: Number) -> i32 {
    v.round() as i32
}

fn to_pixel_point(p: Point<Number>) -> Point<i32> {
    Point {
        x: to_pixel(p.x),
        y: to_pixel(p.y),
    }
}

/// Join consecutive points of one curve with the surface's current color and
/// width.
pub fn draw_curve<S, I>(surface: &mut S, points: I, viewport: &Viewport) -> CurveStats
where
    S: Surface + ?Sized,
    I: IntoIterator<Item = LogicalPoint>,
{
    let mut stats = CurveStats::default();
    let mut prev: Option<Projected> = None;
    for point in points {
        let cur = project(viewport, point);
        if let Some(prev) = prev {
            if prev.draw_from && cur.draw_to {
                surface.line(to_pixel_point(prev.at), to_pixel_point(cur.at));
                stats.segments += 1;
            } else {
                stats.breaks += 1;
            }
        }
        prev = Some(cur);
    }
    stats
}

/// One full render pass: axes, then every visible spec in order.
pub fn render<S: Surface + ?Sized>(surface: &mut S, specs: &[GraphSpec], viewport: &Viewport) -> RenderStats {
    let mut stats = RenderStats {
        axes: draw_axes(surface, viewport),
        ..RenderStats::default()
    };

    for spec in specs.iter().filter(|spec| spec.visible) {
        surface.set_color(spec.color);
        surface.set_line_width(CURVE_WIDTH);
        let curve = draw_curve(surface, sample(&spec.model), viewport);
        stats.curves += 1;
        stats.segments += curve.segments;
        stats.breaks += curve.breaks;
    }

    log::debug!(
        "rendered {} of {} curves: {} segments, {} breaks, {} axes",
        stats.curves,
        specs.len(),
        stats.segments,
        stats.breaks,
        stats.axes
    );
    stats
}
