use floorplan::algorithms::rooms::RoomSettings;
use floorplan::model::{FixtureKind, Point};
use floorplan::{Editor, LogHost, Plan, PointerEvent, RenderOptions, Tool};

#[test]
fn empty_plan_queries_do_not_panic() {
    let mut p = Plan::new();
    assert!(p.recompute_rooms(RoomSettings::default()).is_none());
    assert!(p.snap(Point::ZERO, 20.0).is_none());
    assert!(p.hit_outline_segment(Point::ZERO, 5.0).is_none());
    let (paths, texts) = p.render_paths(&RenderOptions::default());
    assert!(paths.is_empty() && texts.is_empty());
    assert!(p.to_svg_paths().is_empty());
}

#[test]
fn non_finite_outline_corners_are_dropped() {
    let mut p = Plan::new();
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(f64::NAN, 5.0),
        Point::new(200.0, 0.0),
        Point::new(200.0, 200.0),
        Point::new(0.0, f64::INFINITY),
    ];
    p.set_outline(&pts, 100.0, 2700.0);
    assert_eq!(p.outline().len(), 3);
    assert_eq!(p.wall_count(), 3);
}

#[test]
fn short_outline_has_no_segments() {
    let mut p = Plan::new();
    p.set_outline(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)], 100.0, 2700.0);
    assert!(!p.outline().is_closed());
    assert_eq!(p.wall_count(), 0);
    assert!(p.outline().angles(25.0).is_empty());
}

#[test]
fn repeated_outline_corner_yields_no_zero_length_wall() {
    let mut p = Plan::new();
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
        Point::new(0.0, 100.0),
    ];
    p.set_outline(&pts, 100.0, 2700.0);
    assert_eq!(p.wall_count(), 4);
    assert!(p.walls().all(|w| w.length() > 0.0 && w.is_valid()));
    // the doubled corner has no defined angle
    assert_eq!(p.outline().angles(25.0).len(), 3);
    let _ = p.to_svg_document(&RenderOptions::default());
}

#[test]
fn invalid_ids_are_noops() {
    let mut p = Plan::new();
    assert!(!p.remove_wall(42));
    assert!(!p.remove_fixture(42));
    assert!(!p.move_wall(42, Point::ZERO, Point::new(1.0, 0.0)));
    assert!(p.split_wall(42, Point::ZERO).is_none());
    assert!(!p.move_outline_corner(42, Point::ZERO));
    assert!(p.split_outline_segment(9, Point::ZERO).is_none());
}

#[test]
fn non_finite_pointer_events_are_ignored() {
    let mut ed = Editor::new(LogHost::default());
    ed.set_viewport(0.0, 0.0, 640.0, 480.0);
    ed.set_tool(Tool::DrawWall);
    let bad = PointerEvent::primary(f64::NAN, 10.0);
    assert!(!ed.pointer_down(&bad));
    assert!(!ed.pointer_move(&bad));
    assert!(!ed.pointer_up(&bad));
    assert!(ed.draw_start().is_none());

    ed.set_tool(Tool::PlaceFixture(FixtureKind::Lamp));
    ed.pointer_move(&PointerEvent::primary(50.0, 50.0));
    assert!(ed.preview().unwrap().snap.is_none());
    // with nothing to snap to the footprint sits centred on the cursor
    assert_eq!(ed.preview().unwrap().footprint.center(), Point::new(50.0, 50.0));
}
