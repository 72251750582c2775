// SPDX: CC0-1.0

use crate::{color::Rgb, render::Surface, Point};
use plotters::prelude::{Color, DrawingBackend, RGBColor, SVGBackend};
use plotters_backend::DrawingErrorKind;
use std::io;

pub type SvgErr = DrawingErrorKind<io::Error>;

/// Draws lines through the `plotters` SVG backend into a caller-owned buffer,
/// over a white background.
pub struct SvgSurface<'a> {
    backend: SVGBackend<'a>,
    color: Rgb,
    line_width: u32,
    lines: usize,
    // kept until finish, later lines are dropped
    failed: Option<SvgErr>,
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

impl<'a> SvgSurface<'a> {
    pub fn new(buf: &'a mut String, (width, height): (u32, u32)) -> Result<Self, SvgErr> {
        let mut backend = SVGBackend::with_string(buf, (width, height));
        let corner = (
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        );
        backend.draw_rect((0, 0), corner, &rgb(Rgb::WHITE).filled(), true)?;
        Ok(Self {
            backend,
            color: Rgb::BLACK,
            line_width: 1,
            lines: 0,
            failed: None,
        })
    }

    pub const fn lines(&self) -> usize {
        self.lines
    }

    /// Close the document, returning how many lines went into it.
    pub fn finish(mut self) -> Result<usize, SvgErr> {
        if let Some(err) = self.failed.take() {
            return Err(err);
        }
        self.backend.present()?;
        Ok(self.lines)
    }
}

impl Surface for SvgSurface<'_> {
    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        // strokes are whole pixels wide
        self.line_width = width.round() as u32;
    }

    fn line(&mut self, from: Point<i32>, to: Point<i32>) {
        if self.failed.is_some() {
            return;
        }
        let style = rgb(self.color).stroke_width(self.line_width);
        match self.backend.draw_line((from.x, from.y), (to.x, to.y), &style) {
            Ok(()) => self.lines += 1,
            Err(err) => self.failed = Some(err),
        }
    }
}
