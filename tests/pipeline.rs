// SPDX: CC0-1.0

use grapher::{
    color::Rgb,
    eval::FunctionModel,
    parse::{parse, ParseErrTyp},
    render::{render, Surface},
    sample::sample,
    sheet::Sheet,
    GraphSpec, LogicalPoint, PixelRect, Point, Viewport,
};
use std::collections::BTreeSet;

type Segment = (Point<i32>, Point<i32>);

#[derive(Default)]
struct Lines {
    color: Option<Rgb>,
    drawn: Vec<(Option<Rgb>, Segment)>,
}

impl Lines {
    fn of(&self, color: Rgb) -> Vec<Segment> {
        self.drawn
            .iter()
            .filter(|(it, _)| *it == Some(color))
            .map(|(_, seg)| *seg)
            .collect()
    }
}

impl Surface for Lines {
    fn set_color(&mut self, color: Rgb) {
        self.color = Some(color);
    }

    fn set_line_width(&mut self, _width: f64) {}

    fn line(&mut self, from: Point<i32>, to: Point<i32>) {
        self.drawn.push((self.color, (from, to)));
    }
}

const RED: Rgb = Rgb::new(255, 0, 0);

fn excluding(text: &str, at: Vec<f64>) -> FunctionModel {
    match parse(text).unwrap() {
        FunctionModel::Polynomial(poly) => FunctionModel::Polynomial(poly.with_exclusions(at)),
        other => panic!("expected a polynomial, got {other:?}"),
    }
}

#[test]
fn polynomial_sample_count_matches_domain() {
    for text in ["y=3x^2-2x+1", "y=x", "y=5", "y=-x^7+x^3"] {
        let model = parse(text).unwrap();
        let FunctionModel::Polynomial(poly) = &model else {
            panic!("{text} should be a polynomial");
        };
        let expected = (poly.extent / poly.step).floor() as usize + 1;
        let points: Vec<LogicalPoint> = sample(&model).collect();
        assert_eq!(points.len(), expected, "{text}");
        for pair in points.windows(2) {
            assert!(pair[1].x() > pair[0].x());
            assert!((pair[1].x() - pair[0].x() - poly.step).abs() < 1e-9);
        }
    }
}

#[test]
fn break_placeholder_suppresses_adjacent_segments() {
    let model = excluding("y=x", vec![0.0]);
    let points: Vec<LogicalPoint> = sample(&model).collect();
    let k = points.iter().position(|p| p.is_gap()).unwrap();
    assert_eq!(points.iter().filter(|p| p.is_gap()).count(), 1);

    let view = Viewport::default();
    let spec = GraphSpec {
        model,
        color: RED,
        visible: true,
    };
    let mut lines = Lines::default();
    let stats = render(&mut lines, &[spec.clone()], &view);
    assert_eq!(stats.breaks, 2);
    assert_eq!(stats.segments, points.len() - 3);

    let drawn: BTreeSet<(i32, i32, i32, i32)> = lines
        .of(RED)
        .into_iter()
        .map(|(a, b)| (a.x, a.y, b.x, b.y))
        .collect();
    let px = |p: &LogicalPoint| {
        let at = view.project(p.pos());
        (at.x.round() as i32, at.y.round() as i32)
    };
    for (i, pair) in points.windows(2).enumerate() {
        let (ax, ay) = px(&pair[0]);
        let (bx, by) = px(&pair[1]);
        let present = drawn.contains(&(ax, ay, bx, by));
        if i + 1 == k || i == k {
            assert!(!present, "segment ({i}, {}) should be missing", i + 1);
        } else {
            assert!(present, "segment ({i}, {}) should be drawn", i + 1);
        }
    }

    let mut again = Lines::default();
    render(&mut again, &[spec], &view);
    assert_eq!(lines.drawn, again.drawn);
}

#[test]
fn projection_corners() {
    let view = Viewport {
        x: 2.0..6.0,
        y: -1.0..1.0,
        pixels: PixelRect {
            x: 5,
            y: 7,
            width: 400,
            height: 200,
        },
    };
    let bottom_left = view.project(Point { x: 2.0, y: -1.0 });
    assert!((bottom_left.x - 5.0).abs() < 1e-9);
    assert!((bottom_left.y - 207.0).abs() < 1e-9);

    let top_right = view.project(Point { x: 6.0, y: 1.0 });
    assert!((top_right.x - 405.0).abs() < 1e-9);
    assert!((top_right.y - 7.0).abs() < 1e-9);
}

#[test]
fn ellipse_stays_inside_its_box() {
    let model = parse("x=2cos(t);y=sin(t);0<t<2pi").unwrap();
    let points: Vec<LogicalPoint> = sample(&model).collect();
    // 0, 0.1, ..., 6.2 are all below 2pi
    assert_eq!(points.len(), 63);
    assert!(points
        .iter()
        .all(|p| p.x().abs() <= 2.0 + 1e-12 && p.y().abs() <= 1.0 + 1e-12));
}

#[test]
fn sheet_to_svg_pipeline() {
    let mut sheet = Sheet::new();
    let a = sheet.add("y = x^2 - 4");
    sheet.add("y = x^ - 1");
    let c = sheet.add("x = 3sin(t); y = 3cos(t); 0 < t < 2pi");
    sheet.set_color(a, RED).unwrap();
    sheet.toggle(c).unwrap();

    let specs = sheet.specs();
    assert_eq!(specs.len(), 2);

    let mut lines = Lines::default();
    let stats = render(&mut lines, &specs, &Viewport::default());
    assert_eq!(stats.curves, 1);
    assert_eq!(stats.axes, 2);
    assert_eq!(lines.of(RED).len(), 200);
    assert_eq!(lines.drawn.len(), 202);
}

#[test]
fn errors_are_typed() {
    assert!(matches!(parse("3x+1").unwrap_err().typ, ParseErrTyp::BadForm(_)));
    assert!(matches!(
        parse("x=sin(t);y=cos(t);0<s<1").unwrap_err().typ,
        ParseErrTyp::BadRange(_)
    ));
    assert_eq!(
        parse("x=log(t);y=cos(t);0<t<1").unwrap_err().typ,
        ParseErrTyp::UnsupportedFunction
    );
}
