use super::tolerance::{clamp01, EPS_DENOM, EPS_LEN};
use crate::model::Point;
use std::f64::consts::TAU;

/// Squared distance from `p` to segment `ab` and the clamped projection parameter.
pub fn seg_distance_sq(p: Point, a: Point, b: Point) -> (f64, f64) {
    let (proj, t) = closest_point_on_segment(p, a, b);
    let d = p - proj;
    (d.dot(d), t)
}

/// Projection of `p` onto segment `ab` with `t` clamped to `[0, 1]`.
/// A zero-length segment returns `a` with `t = 0`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> (Point, f64) {
    let v = b - a;
    let vv = v.dot(v);
    if vv <= EPS_LEN * EPS_LEN {
        return (a, 0.0);
    }
    let t = clamp01((p - a).dot(v) / vv);
    (a + v * t, t)
}

pub fn dist_point_to_seg(p: Point, a: Point, b: Point) -> f64 {
    seg_distance_sq(p, a, b).0.sqrt()
}

/// Unit normal `normalize(perp(b - a))`, `None` when `a == b`.
pub fn segment_normal(a: Point, b: Point) -> Option<Point> {
    (b - a).perp().normalized()
}

/// Unsigned angle between two vectors in degrees, `None` if either is zero-length.
pub fn angle_between_deg(v1: Point, v2: Point) -> Option<f64> {
    let l1 = v1.length();
    let l2 = v2.length();
    if l1 <= EPS_LEN || l2 <= EPS_LEN {
        return None;
    }
    let c = (v1.dot(v2) / (l1 * l2)).clamp(-1.0, 1.0);
    Some(c.acos().to_degrees())
}

/// Unit bisector of two non-zero vectors. Opposite vectors have no bisector;
/// the perpendicular of `v1` is returned instead.
pub fn bisector(v1: Point, v2: Point) -> Option<Point> {
    let u1 = v1.normalized()?;
    let u2 = v2.normalized()?;
    (u1 + u2).normalized().or_else(|| u1.perp().normalized())
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(a: f64) -> f64 {
    let r = a.rem_euclid(TAU);
    if r >= TAU { 0.0 } else { r }
}

#[inline]
pub fn direction_angle(v: Point) -> f64 {
    v.y.atan2(v.x)
}

/// Intersection of the infinite lines `p + s*d` and `q + u*e`.
pub fn line_intersection(p: Point, d: Point, q: Point, e: Point) -> Option<Point> {
    let den = d.cross(e);
    if den.abs() <= EPS_DENOM {
        return None;
    }
    let s = (q - p).cross(e) / den;
    Some(p + d * s)
}
