use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use crate::geometry::tolerance::{mm_to_world, EPS_LEN, EPS_POS};

pub type CornerId = u32;
pub type WallId = u32;
pub type RoomId = u32;
pub type FixtureId = u32;

/// A position in world units (centimeters).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
    #[inline]
    pub fn dot(self, o: Point) -> f64 {
        self.x * o.x + self.y * o.y
    }
    #[inline]
    pub fn cross(self, o: Point) -> f64 {
        self.x * o.y - self.y * o.x
    }
    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
    #[inline]
    pub fn distance(self, o: Point) -> f64 {
        (self - o).length()
    }
    /// Left-hand perpendicular `(-y, x)`.
    #[inline]
    pub fn perp(self) -> Point {
        Point { x: -self.y, y: self.x }
    }
    /// Unit vector, or `None` for a (near) zero vector.
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        if len > EPS_LEN {
            Some(Point { x: self.x / len, y: self.y / len })
        } else {
            None
        }
    }
    #[inline]
    pub fn lerp(self, o: Point, t: f64) -> Point {
        Point { x: self.x + (o.x - self.x) * t, y: self.y + (o.y - self.y) * t }
    }
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
    #[inline]
    pub fn coincident(self, o: Point) -> bool {
        self.distance(o) <= EPS_POS
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, o: Point) -> Point {
        Point { x: self.x + o.x, y: self.y + o.y }
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, o: Point) -> Point {
        Point { x: self.x - o.x, y: self.y - o.y }
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, s: f64) -> Point {
        Point { x: self.x * s, y: self.y * s }
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point { x: -self.x, y: -self.y }
    }
}

/// Persisted wall. `thickness` and `height` are millimeters, `start`/`end` centimeters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: WallId,
    pub start: Point,
    pub end: Point,
    pub thickness: f64,
    pub height: f64,
}

impl Wall {
    /// Thickness converted to world units.
    pub fn thickness_world(&self) -> f64 {
        mm_to_world(self.thickness)
    }
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
    pub fn is_valid(&self) -> bool {
        self.thickness > 0.0
            && self.start.is_finite()
            && self.end.is_finite()
            && !self.start.coincident(self.end)
    }
    /// Dominant direction is horizontal when `|dx| > |dy|`.
    pub fn is_horizontal(&self) -> bool {
        let d = self.end - self.start;
        d.x.abs() > d.y.abs()
    }
    /// Rectangle of the wall body centred on the centerline, `None` when degenerate.
    pub fn outline(&self) -> Option<[Point; 4]> {
        let n = (self.end - self.start).perp().normalized()?;
        let half = n * (self.thickness_world() * 0.5);
        Some([self.start - half, self.end - half, self.end + half, self.start + half])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub points: Vec<Point>,
    /// Square meters, two decimals.
    pub area: f64,
    pub color: String,
}

pub const ROOM_COLORS: [&str; 6] = ["#e3f2fd", "#fce4ec", "#e8f5e9", "#fff3e0", "#ede7f6", "#e0f7fa"];

/// Display unit selector. Stored values are always centimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Cm,
    M,
    Mm,
}

impl Unit {
    pub fn format_length(self, cm: f64) -> String {
        match self {
            // passthrough, only float noise is trimmed
            Unit::Cm => format!("{}", (cm * 100.0).round() / 100.0),
            Unit::M => format!("{:.2}", cm / 100.0),
            Unit::Mm => format!("{:.0}", cm * 10.0),
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Cm => "cm",
            Unit::M => "m",
            Unit::Mm => "mm",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapKind {
    #[serde(rename = "endpoint")]
    Endpoint,
    #[serde(rename = "edge")]
    Edge,
    #[serde(rename = "edge-boundary")]
    EdgeBoundary,
}

/// Which side of a placement preview touches a wall boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
    Top,
    Bottom,
}

/// Transient snap result; recomputed every pointer frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapPoint {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: SnapKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    pub wall: WallId,
    pub distance: f64,
}

impl SnapPoint {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    Door,
    Window,
    Socket,
    Switch,
    Lamp,
    Panel,
}

impl FixtureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FixtureKind::Door => "door",
            FixtureKind::Window => "window",
            FixtureKind::Socket => "socket",
            FixtureKind::Switch => "switch",
            FixtureKind::Lamp => "lamp",
            FixtureKind::Panel => "panel",
        }
    }

    /// Default footprint (width, depth) in centimeters.
    pub fn default_size(self) -> (f64, f64) {
        match self {
            FixtureKind::Door => (90.0, 10.0),
            FixtureKind::Window => (120.0, 10.0),
            FixtureKind::Socket => (8.0, 8.0),
            FixtureKind::Switch => (8.0, 8.0),
            FixtureKind::Lamp => (30.0, 30.0),
            FixtureKind::Panel => (40.0, 12.0),
        }
    }
}

/// Wall-mounted or free-standing fixture. `position` is the footprint center.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub kind: FixtureKind,
    pub position: Point,
    /// Degrees, clockwise in screen space.
    #[serde(default)]
    pub rotation: f64,
    pub width: f64,
    pub depth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall: Option<WallId>,
}

/// Axis-aligned rectangle, `x`/`y` is the minimum corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn centered(c: Point, width: f64, height: f64) -> Self {
        Rect { x: c.x - width * 0.5, y: c.y - height * 0.5, width, height }
    }
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}
