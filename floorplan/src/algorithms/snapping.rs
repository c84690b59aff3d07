use crate::geometry::math::closest_point_on_segment;
use crate::geometry::tolerance::EDGE_BOUNDARY_BAND;
use crate::model::{Alignment, Point, Rect, SnapKind, SnapPoint, Wall};

/// Side of a placement preview that should touch the boundary at one end of a
/// wall edge, from the wall's dominant direction, its traversal sign and
/// which end is being approached.
pub fn boundary_alignment(is_horizontal: bool, positive: bool, is_start: bool) -> Alignment {
    match (is_horizontal, positive, is_start) {
        (true, true, true) | (true, false, false) => Alignment::Left,
        (true, true, false) | (true, false, true) => Alignment::Right,
        (false, true, true) | (false, false, false) => Alignment::Top,
        (false, true, false) | (false, false, true) => Alignment::Bottom,
    }
}

fn push_candidate(
    best: &mut Option<SnapPoint>,
    cursor: Point,
    at: Point,
    kind: SnapKind,
    normal: Option<Point>,
    alignment: Option<Alignment>,
    wall: &Wall,
    max_dist: f64,
) {
    let distance = cursor.distance(at);
    if distance > max_dist {
        return;
    }
    if best.as_ref().map_or(true, |b| distance < b.distance) {
        *best = Some(SnapPoint { x: at.x, y: at.y, kind, normal, alignment, wall: wall.id, distance });
    }
}

/// Nearest snap candidate within `snap_distance` (world units), or `None`.
///
/// Per wall the candidates are both endpoints, the closest point on each of
/// the two faces offset `±thickness/2` from the centerline, and the face end
/// itself when that closest point lies in the outer `band` of the face.
pub fn find_nearest_snap_point_with_band<'a>(
    cursor: Point,
    walls: impl IntoIterator<Item = &'a Wall>,
    snap_distance: f64,
    band: f64,
) -> Option<SnapPoint> {
    let mut best: Option<SnapPoint> = None;
    for w in walls {
        push_candidate(&mut best, cursor, w.start, SnapKind::Endpoint, None, None, w, snap_distance);
        push_candidate(&mut best, cursor, w.end, SnapKind::Endpoint, None, None, w, snap_distance);

        let d = w.end - w.start;
        let Some(n) = d.perp().normalized() else {
            continue;
        };
        let half = w.thickness_world() * 0.5;
        let horizontal = w.is_horizontal();
        let positive = if horizontal { d.x > 0.0 } else { d.y > 0.0 };
        for side in [1.0, -1.0] {
            let face_normal = n * side;
            let a = w.start + face_normal * half;
            let b = w.end + face_normal * half;
            let (p, t) = closest_point_on_segment(cursor, a, b);
            // boundary first: when the projection is clamped onto the face end
            // both candidates coincide and the boundary one must win the tie
            if t <= band || t >= 1.0 - band {
                let is_start = t <= band;
                let at = if is_start { a } else { b };
                let align = boundary_alignment(horizontal, positive, is_start);
                push_candidate(
                    &mut best,
                    cursor,
                    at,
                    SnapKind::EdgeBoundary,
                    Some(face_normal),
                    Some(align),
                    w,
                    snap_distance,
                );
            }
            push_candidate(&mut best, cursor, p, SnapKind::Edge, Some(face_normal), None, w, snap_distance);
        }
    }
    best
}

pub fn find_nearest_snap_point<'a>(
    cursor: Point,
    walls: impl IntoIterator<Item = &'a Wall>,
    snap_distance: f64,
) -> Option<SnapPoint> {
    find_nearest_snap_point_with_band(cursor, walls, snap_distance, EDGE_BOUNDARY_BAND)
}

/// Nearest wall endpoint within `snap_distance`, ignoring faces.
pub fn find_nearest_endpoint<'a>(
    cursor: Point,
    walls: impl IntoIterator<Item = &'a Wall>,
    snap_distance: f64,
) -> Option<SnapPoint> {
    let mut best: Option<SnapPoint> = None;
    for w in walls {
        push_candidate(&mut best, cursor, w.start, SnapKind::Endpoint, None, None, w, snap_distance);
        push_candidate(&mut best, cursor, w.end, SnapKind::Endpoint, None, None, w, snap_distance);
    }
    best
}

/// Footprint of a `width x height` preview at `cursor`, magnetised to `snap`.
pub fn place_preview(cursor: Point, snap: Option<&SnapPoint>, width: f64, height: f64) -> Rect {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let Some(s) = snap else {
        return Rect::centered(cursor, width, height);
    };
    let p = s.point();
    let center = match s.kind {
        SnapKind::Endpoint => match (p - cursor).normalized() {
            Some(dir) => Point::new(p.x - dir.x * hw, p.y - dir.y * hh),
            None => p,
        },
        SnapKind::Edge => {
            let n = s.normal.unwrap_or_default();
            let reach = n.x.abs() * hw + n.y.abs() * hh;
            p + n * reach
        }
        SnapKind::EdgeBoundary => match s.alignment {
            Some(Alignment::Left) => Point::new(p.x + hw, p.y),
            Some(Alignment::Right) => Point::new(p.x - hw, p.y),
            Some(Alignment::Top) => Point::new(p.x, p.y + hh),
            Some(Alignment::Bottom) => Point::new(p.x, p.y - hh),
            None => p,
        },
    };
    Rect::centered(center, width, height)
}
