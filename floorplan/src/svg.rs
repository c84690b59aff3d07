//! SVG adapter over the plan geometry. Everything here formats geometry the
//! kernel already computed; styling is left to the host via class names.

use crate::geometry::polygon::{polygon_centroid, Bounds};
use crate::model::{Fixture, FixtureKind, Point, Rect};
use crate::Plan;
use serde::Serialize;
use std::fmt::Write;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    pub angle_label_radius: f64,
    pub angle_marker_radius: f64,
    /// World-unit margin around the content in the document viewBox.
    pub padding: f64,
    /// Footprint of a fixture being placed, drawn on top.
    pub preview: Option<Rect>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { angle_label_radius: 25.0, angle_marker_radius: 20.0, padding: 20.0, preview: None }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SvgPath {
    pub class: String,
    pub d: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SvgText {
    pub class: String,
    pub x: f64,
    pub y: f64,
    /// Degrees about `(x, y)`.
    pub rotation: f64,
    pub text: String,
}

pub fn polygon_path(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{} {} {}", if i == 0 { "" } else { " " }, cmd, p.x, p.y);
    }
    if !d.is_empty() {
        d.push_str(" Z");
    }
    d
}

pub fn to_svg_paths_impl(p: &Plan) -> Vec<String> {
    p.walls().filter_map(|w| w.outline()).map(|r| polygon_path(&r)).collect()
}

// Fixture-local point (x along width, y along depth, origin at center) to world.
fn to_world(f: &Fixture, local: Point) -> Point {
    let (s, c) = f.rotation.to_radians().sin_cos();
    Point::new(f.position.x + local.x * c - local.y * s, f.position.y + local.x * s + local.y * c)
}

fn line(f: &Fixture, a: Point, b: Point) -> String {
    let a = to_world(f, a);
    let b = to_world(f, b);
    format!("M {} {} L {} {}", a.x, a.y, b.x, b.y)
}

fn body(f: &Fixture) -> String {
    let (hw, hd) = (f.width * 0.5, f.depth * 0.5);
    let corners = [Point::new(-hw, -hd), Point::new(hw, -hd), Point::new(hw, hd), Point::new(-hw, hd)];
    polygon_path(&corners.map(|c| to_world(f, c)))
}

fn circle(center: Point, r: f64) -> String {
    format!(
        "M {} {} A {r} {r} 0 1 0 {} {} A {r} {r} 0 1 0 {} {}",
        center.x - r,
        center.y,
        center.x + r,
        center.y,
        center.x - r,
        center.y
    )
}

/// Outline glyph of a fixture as one or more path strings.
pub fn fixture_glyph(f: &Fixture) -> Vec<String> {
    let (hw, hd) = (f.width * 0.5, f.depth * 0.5);
    match f.kind {
        FixtureKind::Door => {
            // leaf opened 90° from the hinge side, with its swing arc
            let hinge = Point::new(-hw, hd);
            let open = Point::new(-hw, hd + f.width);
            let closed = to_world(f, Point::new(hw, hd));
            let tip = to_world(f, open);
            vec![
                body(f),
                line(f, hinge, open),
                format!("M {} {} A {r} {r} 0 0 1 {} {}", closed.x, closed.y, tip.x, tip.y, r = f.width),
            ]
        }
        FixtureKind::Window => vec![body(f), line(f, Point::new(-hw, 0.0), Point::new(hw, 0.0))],
        FixtureKind::Socket => {
            let r = hw.min(hd);
            vec![
                circle(f.position, r),
                line(f, Point::new(-r * 0.4, -r * 0.3), Point::new(-r * 0.4, r * 0.3)),
                line(f, Point::new(r * 0.4, -r * 0.3), Point::new(r * 0.4, r * 0.3)),
            ]
        }
        FixtureKind::Switch => vec![body(f), line(f, Point::new(-hw, hd), Point::new(hw, -hd))],
        FixtureKind::Lamp => {
            let r = hw.min(hd);
            let k = r * std::f64::consts::FRAC_1_SQRT_2;
            vec![
                circle(f.position, r),
                line(f, Point::new(-k, -k), Point::new(k, k)),
                line(f, Point::new(-k, k), Point::new(k, -k)),
            ]
        }
        FixtureKind::Panel => {
            let mut zig = String::new();
            for (i, x) in [-hw, -hw * 0.5, 0.0, hw * 0.5, hw].into_iter().enumerate() {
                let y = if i % 2 == 0 { hd } else { -hd };
                let p = to_world(f, Point::new(x, y));
                let _ = write!(zig, "{}{} {} {}", if i == 0 { "" } else { " " }, if i == 0 { 'M' } else { 'L' }, p.x, p.y);
            }
            vec![body(f), zig]
        }
    }
}

fn path(class: &str, d: String) -> SvgPath {
    SvgPath { class: class.to_string(), d }
}

/// Paths and labels for the whole plan, back to front.
pub fn render_impl(p: &Plan, opts: &RenderOptions) -> (Vec<SvgPath>, Vec<SvgText>) {
    let mut paths = Vec::new();
    let mut texts = Vec::new();

    for r in p.rooms() {
        paths.push(path("room", polygon_path(&r.points)));
        if let Some(c) = polygon_centroid(&r.points) {
            texts.push(SvgText { class: "room-area".into(), x: c.x, y: c.y, rotation: 0.0, text: format!("{:.2} m²", r.area) });
        }
    }
    for d in to_svg_paths_impl(p) {
        paths.push(path("wall", d));
    }

    let outline = p.outline();
    if outline.is_closed() {
        paths.push(path("outline", polygon_path(&outline.points())));
        for m in outline.angle_markers(opts.angle_marker_radius) {
            paths.push(path("angle-arc", m.svg_path()));
        }
        for a in outline.angles(opts.angle_label_radius) {
            texts.push(SvgText {
                class: "angle-label".into(),
                x: a.label.x,
                y: a.label.y,
                rotation: 0.0,
                text: format!("{:.0}°", a.degrees),
            });
        }
        let unit = p.unit();
        for l in outline.internal_lines(p.outline_thickness(), unit) {
            paths.push(path("dimension", format!("M {} {} L {} {}", l.start.x, l.start.y, l.end.x, l.end.y)));
            texts.push(SvgText {
                class: "dimension-label".into(),
                x: l.midpoint.x,
                y: l.midpoint.y,
                rotation: l.rotation,
                text: format!("{} {}", l.label, unit.suffix()),
            });
        }
    }

    for f in p.fixtures() {
        let class = format!("fixture fixture-{}", f.kind.as_str());
        for d in fixture_glyph(f) {
            paths.push(SvgPath { class: class.clone(), d });
        }
    }
    if let Some(r) = opts.preview {
        let corners = [
            Point::new(r.x, r.y),
            Point::new(r.x + r.width, r.y),
            Point::new(r.x + r.width, r.y + r.height),
            Point::new(r.x, r.y + r.height),
        ];
        paths.push(path("fixture-preview", polygon_path(&corners)));
    }
    (paths, texts)
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

pub fn to_svg_document_impl(p: &Plan, opts: &RenderOptions) -> String {
    let (paths, texts) = render_impl(p, opts);
    // wall bodies reach half a thickness past their centerlines
    let mut pts = p.all_points();
    pts.extend(p.walls().filter_map(|w| w.outline()).flatten());
    let b = Bounds::of(&pts)
        .unwrap_or(Bounds { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 })
        .pad(opts.padding);
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">",
        b.min_x,
        b.min_y,
        b.width(),
        b.height()
    );
    for sp in &paths {
        let _ = write!(out, "<path class=\"{}\" d=\"{}\"/>", escape(&sp.class), sp.d);
    }
    for t in &texts {
        let _ = write!(out, "<text class=\"{}\" x=\"{}\" y=\"{}\"", escape(&t.class), t.x, t.y);
        if t.rotation != 0.0 {
            let _ = write!(out, " transform=\"rotate({} {} {})\"", t.rotation, t.x, t.y);
        }
        let _ = write!(out, ">{}</text>", escape(&t.text));
    }
    out.push_str("</svg>");
    out
}
