//! Closed corner polygon of the outline being edited, and everything derived
//! from it on read: wall segments, angles, inner dimension lines, arc markers.

use serde::Serialize;

use crate::geometry::math::{
    angle_between_deg, bisector, closest_point_on_segment, direction_angle, line_intersection,
    normalize_angle, seg_distance_sq,
};
use crate::geometry::polygon::signed_area;
use crate::geometry::tolerance::EPS_LEN;
use crate::model::{CornerId, Point, Unit};

/// Corner arena plus polygon order. Ids are arena slots and survive
/// insertions and removals elsewhere in the loop.
#[derive(Clone, Debug, Default)]
pub struct CornerLoop {
    corners: Vec<Option<Point>>,
    order: Vec<CornerId>,
}

/// One edge of the loop with its derived geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallSegment {
    pub index: usize,
    pub start_corner: CornerId,
    pub end_corner: CornerId,
    pub start: Point,
    pub end: Point,
    pub length: f64,
    /// Unit direction, zero for a degenerate segment.
    pub direction: Point,
    /// `normalize(perp(end - start))`, zero for a degenerate segment.
    pub normal: Point,
    /// Centerline shifted by `-normal * thickness / 2`; origin of the wall rectangle.
    pub offset_start: Point,
    pub offset_end: Point,
    pub thickness: f64,
}

impl WallSegment {
    /// Wall rectangle: the offset line and its mirror on the other side.
    pub fn outline(&self) -> [Point; 4] {
        let shift = self.normal * self.thickness;
        [self.offset_start, self.offset_end, self.offset_end + shift, self.offset_start + shift]
    }
    /// Rotation of the segment in degrees.
    pub fn rotation_deg(&self) -> f64 {
        direction_angle(self.end - self.start).to_degrees()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AngleLabel {
    pub corner: CornerId,
    pub degrees: f64,
    /// Label anchor on the bisector at the configured radius.
    pub label: Point,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InternalLine {
    pub index: usize,
    pub start: Point,
    pub end: Point,
    /// Centimeters.
    pub length: f64,
    /// Degrees, kept within (-90, 90] so text reads left to right.
    pub rotation: f64,
    pub midpoint: Point,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleMarker {
    pub corner: CornerId,
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub start: Point,
    pub end: Point,
    pub large_arc: bool,
    pub sweep: bool,
}

impl AngleMarker {
    pub fn svg_path(&self) -> String {
        format!(
            "M {} {} A {} {} 0 {} {} {} {}",
            self.start.x,
            self.start.y,
            self.radius,
            self.radius,
            u8::from(self.large_arc),
            u8::from(self.sweep),
            self.end.x,
            self.end.y
        )
    }
}

impl CornerLoop {
    pub fn new() -> Self {
        CornerLoop::default()
    }

    pub fn from_points(points: &[Point]) -> Self {
        let mut l = CornerLoop::new();
        for p in points {
            l.add_corner(*p);
        }
        l
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    /// Three or more corners form a closed polygon.
    pub fn is_closed(&self) -> bool {
        self.order.len() >= 3
    }
    pub fn ids(&self) -> &[CornerId] {
        &self.order
    }
    pub fn get(&self, id: CornerId) -> Option<Point> {
        self.corners.get(id as usize).and_then(|c| *c)
    }
    pub fn position_of(&self, id: CornerId) -> Option<usize> {
        self.order.iter().position(|c| *c == id)
    }
    pub fn points(&self) -> Vec<Point> {
        self.order.iter().filter_map(|id| self.get(*id)).collect()
    }
    pub fn clear(&mut self) {
        self.corners.clear();
        self.order.clear();
    }

    fn at(&self, pos: usize) -> Point {
        self.get(self.order[pos]).unwrap_or_default()
    }

    fn alloc(&mut self, p: Point) -> CornerId {
        let id = self.corners.len() as CornerId;
        self.corners.push(Some(p));
        id
    }

    pub fn add_corner(&mut self, p: Point) -> CornerId {
        let id = self.alloc(p);
        self.order.push(id);
        id
    }

    /// Insert a corner right after order position `pos`.
    pub fn insert_after(&mut self, pos: usize, p: Point) -> Option<CornerId> {
        if pos >= self.order.len() {
            return None;
        }
        let id = self.alloc(p);
        self.order.insert(pos + 1, id);
        Some(id)
    }

    pub fn move_corner(&mut self, id: CornerId, p: Point) -> bool {
        if !p.is_finite() {
            return false;
        }
        match self.corners.get_mut(id as usize) {
            Some(Some(c)) => {
                *c = p;
                true
            }
            _ => false,
        }
    }

    pub fn remove_corner(&mut self, id: CornerId) -> Option<Point> {
        let pos = self.position_of(id)?;
        self.order.remove(pos);
        self.corners.get_mut(id as usize).and_then(|c| c.take())
    }

    /// Corners before and after `id` in loop order.
    pub fn neighbors(&self, id: CornerId) -> Option<(Point, Point)> {
        let n = self.order.len();
        if n < 3 {
            return None;
        }
        let pos = self.position_of(id)?;
        Some((self.at((pos + n - 1) % n), self.at((pos + 1) % n)))
    }

    /// Orientation-aware signed area in cm².
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points())
    }

    /// Exactly `n` segments for a closed loop; none otherwise.
    pub fn segments(&self, thickness: f64) -> Vec<WallSegment> {
        let n = self.order.len();
        if n < 3 {
            return Vec::new();
        }
        let half = thickness * 0.5;
        (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                let start = self.at(i);
                let end = self.at(j);
                let d = end - start;
                let direction = d.normalized().unwrap_or_default();
                let normal = d.perp().normalized().unwrap_or_default();
                WallSegment {
                    index: i,
                    start_corner: self.order[i],
                    end_corner: self.order[j],
                    start,
                    end,
                    length: d.length(),
                    direction,
                    normal,
                    offset_start: start - normal * half,
                    offset_end: end - normal * half,
                    thickness,
                }
            })
            .collect()
    }

    /// Interior angle per corner. Corners with a zero-length adjacent edge
    /// have no defined angle and are skipped.
    pub fn angles(&self, radius: f64) -> Vec<AngleLabel> {
        let n = self.order.len();
        if n < 3 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let c = self.at(i);
            let v1 = self.at((i + n - 1) % n) - c;
            let v2 = self.at((i + 1) % n) - c;
            let (Some(degrees), Some(b)) = (angle_between_deg(v1, v2), bisector(v1, v2)) else {
                continue;
            };
            out.push(AngleLabel { corner: self.order[i], degrees, label: c + b * radius });
        }
        out
    }

    /// Inner face of each wall: the centerline moved inward by half the
    /// thickness, trimmed where it meets the neighbouring inner faces.
    pub fn internal_lines(&self, thickness: f64, unit: Unit) -> Vec<InternalLine> {
        let segs = self.segments(thickness);
        let n = segs.len();
        if n == 0 {
            return Vec::new();
        }
        let inward = if self.signed_area() >= 0.0 { 1.0 } else { -1.0 };
        let half = thickness * 0.5;
        let faces: Vec<(Point, Point)> = segs
            .iter()
            .map(|s| {
                let off = s.normal * (inward * half);
                (s.start + off, s.end + off)
            })
            .collect();
        let mut out = Vec::with_capacity(n);
        for (i, seg) in segs.iter().enumerate() {
            let (fs, fe) = faces[i];
            let d = fe - fs;
            let (ps, pe) = faces[(i + n - 1) % n];
            let (ns, ne) = faces[(i + 1) % n];
            let start = if seg.length > EPS_LEN {
                line_intersection(ps, pe - ps, fs, d).unwrap_or(fs)
            } else {
                fs
            };
            let end = if seg.length > EPS_LEN {
                line_intersection(fs, d, ns, ne - ns).unwrap_or(fe)
            } else {
                fe
            };
            let length = start.distance(end);
            let mut rotation = direction_angle(end - start).to_degrees();
            if rotation > 90.0 {
                rotation -= 180.0;
            } else if rotation <= -90.0 {
                rotation += 180.0;
            }
            out.push(InternalLine {
                index: i,
                start,
                end,
                length,
                rotation,
                midpoint: start.lerp(end, 0.5),
                label: unit.format_length(length),
            });
        }
        out
    }

    /// Arc geometry for the angle indicator at each corner, drawn with a
    /// fixed sweep flag of 0. `start_angle` is the incoming edge direction
    /// and `end_angle` the outgoing one; the arc runs from the leg towards
    /// the previous corner to the leg towards the next.
    pub fn angle_markers(&self, radius: f64) -> Vec<AngleMarker> {
        let n = self.order.len();
        if n < 3 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let c = self.at(i);
            let (Some(u1), Some(u2)) = (
                (self.at((i + n - 1) % n) - c).normalized(),
                (self.at((i + 1) % n) - c).normalized(),
            ) else {
                continue;
            };
            // incoming edge runs prev -> c, opposite to the leg u1
            let start_angle = direction_angle(-u1);
            let end_angle = direction_angle(u2);
            let diff = normalize_angle(end_angle - start_angle);
            out.push(AngleMarker {
                corner: self.order[i],
                center: c,
                radius,
                start_angle,
                end_angle,
                start: c + u1 * radius,
                end: c + u2 * radius,
                large_arc: diff > std::f64::consts::PI,
                sweep: false,
            });
        }
        out
    }

    /// Nearest point on segment `index` to `cursor`.
    pub fn closest_point_on_segment(&self, index: usize, cursor: Point) -> Option<Point> {
        let n = self.order.len();
        if n < 2 || index >= n {
            return None;
        }
        let (p, _) = closest_point_on_segment(cursor, self.at(index), self.at((index + 1) % n));
        Some(p)
    }

    /// Insert a corner at the projection of `cursor` onto segment `index`,
    /// right after the segment's start corner.
    pub fn split(&mut self, index: usize, cursor: Point) -> Option<CornerId> {
        let p = self.closest_point_on_segment(index, cursor)?;
        self.insert_after(index, p)
    }

    /// Segment nearest to `p` as `(index, distance)`.
    pub fn nearest_segment(&self, p: Point) -> Option<(usize, f64)> {
        let n = self.order.len();
        if n < 3 {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for i in 0..n {
            let (d2, _) = seg_distance_sq(p, self.at(i), self.at((i + 1) % n));
            if best.map_or(true, |(_, bd)| d2 < bd) {
                best = Some((i, d2));
            }
        }
        best.map(|(i, d2)| (i, d2.sqrt()))
    }

    /// Corner within `radius` of `p`, closest first.
    pub fn hit_corner(&self, p: Point, radius: f64) -> Option<CornerId> {
        let r2 = radius * radius;
        let mut best: Option<(CornerId, f64)> = None;
        for id in &self.order {
            let Some(c) = self.get(*id) else { continue };
            let d = c - p;
            let d2 = d.dot(d);
            if d2 <= r2 && best.map_or(true, |(_, bd)| d2 < bd) {
                best = Some((*id, d2));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Ids of the corners bounding segment `index`.
    pub fn segment_corners(&self, index: usize) -> Option<(CornerId, CornerId)> {
        let n = self.order.len();
        if n < 2 || index >= n {
            return None;
        }
        Some((self.order[index], self.order[(index + 1) % n]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square() -> CornerLoop {
        CornerLoop::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ])
    }

    #[test]
    fn open_loop_has_no_segments() {
        let l = CornerLoop::from_points(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        assert!(l.segments(10.0).is_empty());
        assert!(l.angles(25.0).is_empty());
    }

    #[test]
    fn offset_centerline_uses_left_normal() {
        let segs = square().segments(10.0);
        let s0 = segs[0];
        assert_eq!(s0.normal, Point::new(0.0, 1.0));
        assert_eq!(s0.offset_start, Point::new(0.0, -5.0));
        assert_eq!(s0.outline()[3], Point::new(0.0, 5.0));
    }

    #[test]
    fn square_angles_are_right() {
        let a = square().angles(25.0);
        assert_eq!(a.len(), 4);
        for l in &a {
            assert_abs_diff_eq!(l.degrees, 90.0, epsilon = 1e-9);
        }
        // corner (0,0): bisector points into the square
        let d = a[0].label - Point::new(0.0, 0.0);
        assert_abs_diff_eq!(d.length(), 25.0, epsilon = 1e-9);
        assert!(d.x > 0.0 && d.y > 0.0);
    }

    #[test]
    fn zero_length_edge_skips_angle() {
        let l = CornerLoop::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
        ]);
        let a = l.angles(25.0);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn inner_face_of_square() {
        let lines = square().internal_lines(10.0, Unit::Cm);
        assert_eq!(lines.len(), 4);
        for l in &lines {
            assert_abs_diff_eq!(l.length, 90.0, epsilon = 1e-9);
            assert_eq!(l.label, "90");
        }
        assert_abs_diff_eq!(lines[0].start.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lines[0].start.y, 5.0, epsilon = 1e-9);
        // the top edge runs right-to-left; its label still reads upright
        assert_abs_diff_eq!(lines[2].rotation, 0.0, epsilon = 1e-9);

        let m = square().internal_lines(10.0, Unit::M);
        assert_eq!(m[0].label, "0.90");
        let mm = square().internal_lines(10.0, Unit::Mm);
        assert_eq!(mm[0].label, "900");
    }

    #[test]
    fn inner_face_flips_with_orientation() {
        let mut pts = square().points();
        pts.reverse();
        let lines = CornerLoop::from_points(&pts).internal_lines(10.0, Unit::Cm);
        for l in &lines {
            assert_abs_diff_eq!(l.length, 90.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn markers_flag_reflex_side() {
        let m = square().angle_markers(20.0);
        assert_eq!(m.len(), 4);
        // at (0,0): incoming edge points down (-pi/2), outgoing right (0): a quarter turn
        for k in &m {
            assert!(!k.large_arc);
            assert!(!k.sweep);
        }
        assert_eq!(m[0].svg_path(), "M 0 20 A 20 20 0 0 0 20 0");

        // L-shape: only the notch corner at (100, 100) is reflex
        let l = CornerLoop::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(200.0, 0.0),
            Point::new(200.0, 100.0),
            Point::new(100.0, 100.0),
            Point::new(100.0, 200.0),
            Point::new(0.0, 200.0),
        ]);
        let flags: Vec<bool> = l.angle_markers(20.0).iter().map(|k| k.large_arc).collect();
        assert_eq!(flags, [false, false, false, true, false, false]);
    }

    #[test]
    fn split_midpoint_preserves_length_and_direction() {
        let mut l = square();
        let before = l.segments(10.0)[1];
        let id = l.split(1, Point::new(130.0, 50.0)).unwrap();
        assert_eq!(l.get(id), Some(Point::new(100.0, 50.0)));
        assert_eq!(l.ids()[2], id);
        let segs = l.segments(10.0);
        assert_eq!(segs.len(), 5);
        assert_abs_diff_eq!(segs[1].length + segs[2].length, before.length, epsilon = 1e-9);
        assert_eq!(segs[1].direction, before.direction);
        assert_eq!(segs[2].direction, before.direction);
    }

    #[test]
    fn ids_survive_insertions_and_removals() {
        let mut l = square();
        let third = l.ids()[2];
        l.split(0, Point::new(50.0, 0.0));
        let first = l.ids()[0];
        assert_eq!(l.remove_corner(first), Some(Point::new(0.0, 0.0)));
        assert_eq!(l.get(third), Some(Point::new(100.0, 100.0)));
        assert!(l.get(first).is_none());
        assert!(!l.move_corner(first, Point::new(1.0, 1.0)));
    }

    #[test]
    fn hit_and_nearest() {
        let l = square();
        assert_eq!(l.hit_corner(Point::new(98.0, 3.0), 5.0), Some(l.ids()[1]));
        assert_eq!(l.hit_corner(Point::new(50.0, 50.0), 5.0), None);
        let (i, d) = l.nearest_segment(Point::new(50.0, 96.0)).unwrap();
        assert_eq!(i, 2);
        assert_abs_diff_eq!(d, 4.0, epsilon = 1e-9);
    }
}
