use floorplan::algorithms::split::SplitResult;
use floorplan::model::{FixtureKind, Point};
use floorplan::{Editor, LogHost, PointerEvent, Tool};

fn click(ed: &mut Editor<LogHost>, x: f64, y: f64) {
    let ev = PointerEvent::primary(x, y);
    ed.pointer_down(&ev);
    ed.pointer_up(&ev);
}

fn drawn_room() -> Editor<LogHost> {
    let mut ed = Editor::new(LogHost::default());
    ed.set_viewport(0.0, 0.0, 1024.0, 768.0);
    ed.set_tool(Tool::DrawWall);
    for (x, y) in [(0.0, 0.0), (400.0, 0.0), (400.0, 300.0), (0.0, 300.0), (3.0, 2.0)] {
        click(&mut ed, x, y);
    }
    ed.set_tool(Tool::Select);
    ed
}

#[test]
fn draw_split_furnish_and_reload() {
    let mut ed = drawn_room();
    assert_eq!(ed.plan().wall_count(), 4);
    assert_eq!(ed.plan().rooms().next().map(|r| r.area), Some(12.0));
    let w = ed.plan().get_wall(0).unwrap();
    assert_eq!((w.thickness, w.height), (100.0, 2700.0));

    // a click without movement on a drawn wall offers a split there
    click(&mut ed, 200.0, 1.0);
    assert_eq!(ed.split_menu().map(|m| m.anchor), Some(Point::new(200.0, 0.0)));
    assert_eq!(ed.split_at_menu(), Some(SplitResult::Walls(0, 4)));
    assert_eq!(ed.plan().get_wall(0).unwrap().end, Point::new(200.0, 0.0));
    assert_eq!(ed.plan().get_wall(4).unwrap().start, Point::new(200.0, 0.0));
    assert_eq!(ed.plan().rooms().next().map(|r| r.area), Some(12.0));

    ed.set_tool(Tool::PlaceFixture(FixtureKind::Door));
    click(&mut ed, 100.0, 12.0);
    let door = ed.plan().fixtures().next().cloned().unwrap();
    assert_eq!((door.wall, door.rotation), (Some(0), 0.0));

    let svg = ed.render_svg();
    for class in ["room", "room-area", "wall", "fixture fixture-door", "fixture-preview"] {
        assert!(svg.contains(&format!("class=\"{class}\"")), "missing {class}");
    }

    let saved = ed.save_project().unwrap();
    let mut other = Editor::new(LogHost::default());
    other.set_viewport(0.0, 0.0, 1024.0, 768.0);
    other.load_project(&saved).unwrap();
    assert_eq!(other.plan().wall_count(), 5);
    assert_eq!(other.plan().fixture_count(), 1);
    assert_eq!(other.plan().get_fixture(door.id).map(|f| f.wall), Some(Some(0)));
    assert_eq!(other.plan().rooms().next().map(|r| r.area), Some(12.0));
}

#[test]
fn cancel_drops_the_open_chain() {
    let mut ed = Editor::new(LogHost::default());
    ed.set_tool(Tool::DrawWall);
    click(&mut ed, 10.0, 10.0);
    assert!(ed.pointer_move(&PointerEvent::primary(50.0, 10.0)));
    ed.cancel();
    assert!(ed.draw_start().is_none());
    assert!(!ed.pointer_move(&PointerEvent::primary(60.0, 10.0)));
    assert_eq!(ed.plan().wall_count(), 0);
}

#[test]
fn removing_a_wall_clears_the_room() {
    let mut ed = drawn_room();
    ed.remove_wall(1).unwrap();
    assert_eq!(ed.plan().rooms().count(), 0);
    assert!(ed.remove_wall(1).is_err());
}
