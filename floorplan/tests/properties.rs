use approx::assert_abs_diff_eq;
use floorplan::algorithms::drag::{move_axis, Axis};
use floorplan::algorithms::rooms::{detect_room, RoomSettings};
use floorplan::algorithms::snapping::find_nearest_snap_point;
use floorplan::geometry::polygon::calculate_area;
use floorplan::model::{Point, Wall};
use floorplan::topology::CornerLoop;
use floorplan::view::ViewTransform;
use proptest::prelude::*;

// Convex polygon: vertices on a circle in angular order, at least ~0.1 rad apart.
fn convex_polygon() -> impl Strategy<Value = Vec<Point>> {
    (
        prop::collection::vec(0.1f64..1.0, 3..12),
        50.0f64..5000.0,
        -1000.0f64..1000.0,
        -1000.0f64..1000.0,
    )
        .prop_map(|(steps, r, cx, cy)| {
            let total: f64 = steps.iter().sum();
            let mut a: f64 = 0.0;
            steps
                .iter()
                .map(|s| {
                    let p = Point::new(cx + r * a.cos(), cy + r * a.sin());
                    a += s / total * std::f64::consts::TAU * 0.999;
                    p
                })
                .collect()
        })
}

fn walls_of(points: &[Point]) -> Vec<Wall> {
    (0..points.len())
        .map(|i| Wall {
            id: i as u32,
            start: points[i],
            end: points[(i + 1) % points.len()],
            thickness: 100.0,
            height: 2700.0,
        })
        .collect()
}

proptest! {
    #[test]
    fn segments_close_the_loop(points in convex_polygon(), thickness in 1.0f64..50.0) {
        let l = CornerLoop::from_points(&points);
        let segs = l.segments(thickness);
        prop_assert_eq!(segs.len(), points.len());
        for i in 0..segs.len() {
            prop_assert_eq!(segs[i].end, segs[(i + 1) % segs.len()].start);
            prop_assert_eq!(segs[i].end_corner, segs[(i + 1) % segs.len()].start_corner);
        }
    }

    #[test]
    fn convex_angles_sum_to_polygon_total(points in convex_polygon()) {
        let n = points.len();
        let angles = CornerLoop::from_points(&points).angles(25.0);
        prop_assert_eq!(angles.len(), n);
        let sum: f64 = angles.iter().map(|a| a.degrees).sum();
        prop_assert!((sum - (n as f64 - 2.0) * 180.0).abs() < 1e-6, "sum {} for n {}", sum, n);
    }

    #[test]
    fn split_keeps_length_and_direction(points in convex_polygon(), idx in 0usize..12, t in 0.05f64..0.95) {
        let mut l = CornerLoop::from_points(&points);
        let i = idx % points.len();
        let before = l.segments(10.0)[i];
        let cursor = before.start.lerp(before.end, t) + before.normal * 3.0;
        prop_assert!(l.split(i, cursor).is_some());
        let segs = l.segments(10.0);
        prop_assert_eq!(segs.len(), points.len() + 1);
        prop_assert!((segs[i].length + segs[i + 1].length - before.length).abs() < 1e-6);
        for s in [segs[i], segs[i + 1]] {
            prop_assert!(s.direction.dot(before.direction) > 1.0 - 1e-9);
        }
    }

    #[test]
    fn shoelace_matches_rounded_area(w in 1u32..2000, h in 1u32..2000) {
        let (w, h) = (w as f64, h as f64);
        let rect = [Point::new(0.0, 0.0), Point::new(w, 0.0), Point::new(w, h), Point::new(0.0, h)];
        let expected = (w * h / 10_000.0 * 100.0).round() / 100.0;
        prop_assert_eq!(calculate_area(&rect), expected);
    }

    #[test]
    fn zoom_stays_clamped(deltas in prop::collection::vec(-500.0f64..500.0, 0..200)) {
        let mut v = ViewTransform::default();
        for d in deltas {
            let s = v.zoom(d, Point::new(10.0, 10.0));
            prop_assert!((0.1..=5.0).contains(&s));
        }
    }

    #[test]
    fn wall_drag_axis_is_the_minor_one(dx in -1000.0f64..1000.0, dy in -1000.0f64..1000.0) {
        let axis = move_axis(Point::ZERO, Point::new(dx, dy));
        if dx.abs() > dy.abs() {
            prop_assert_eq!(axis, Axis::Y);
        } else {
            prop_assert_eq!(axis, Axis::X);
        }
    }
}

#[test]
fn snap_threshold_is_inclusive_and_exclusive_beyond() {
    let walls = walls_of(&[Point::new(0.0, 0.0), Point::new(500.0, 0.0), Point::new(500.0, 500.0)]);
    // straight past the end of the wall the face corners are farther than the endpoint
    let at = Point::new(500.0, 520.0);
    let hit = find_nearest_snap_point(at, &walls[1..2], 20.0).unwrap();
    assert_eq!(hit.point(), Point::new(500.0, 500.0));
    assert!(find_nearest_snap_point(Point::new(500.0, 520.5), &walls[1..2], 20.0).is_none());
}

#[test]
fn square_room_is_found_and_triangles_filtered() {
    let square = [Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0), Point::new(0.0, 100.0)];
    let room = detect_room(&walls_of(&square), RoomSettings::default()).unwrap();
    assert_eq!(room.area, 1.0);
    // 0.09 m² stays below the noise floor
    let small = [Point::new(0.0, 0.0), Point::new(60.0, 0.0), Point::new(0.0, 30.0)];
    assert!(detect_room(&walls_of(&small), RoomSettings::default()).is_none());
}

#[test]
fn inner_faces_of_a_ten_centimeter_square() {
    let l = CornerLoop::from_points(&[
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ]);
    for line in l.internal_lines(10.0, floorplan::model::Unit::Cm) {
        assert_abs_diff_eq!(line.length, 90.0, epsilon = 1e-9);
    }
}

#[test]
fn square_segments_turn_a_quarter_each() {
    let l = CornerLoop::from_points(&[
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ]);
    let rot: Vec<f64> = l.segments(10.0).iter().map(|s| s.rotation_deg()).collect();
    for (got, want) in rot.iter().zip([0.0, 90.0, 180.0, -90.0]) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
    }
}
