use floorplan::geometry::limits::{COORD_MAX, MAX_ROOM_POINTS, MAX_WALLS};
use floorplan::Plan;
use serde_json::{json, Value};

fn wall(id: usize, x0: f64, y0: f64, x1: f64, y1: f64) -> Value {
    json!({"id": id, "start": {"x": x0, "y": y0}, "end": {"x": x1, "y": y1}, "thickness": 100.0, "height": 2700.0})
}

#[test]
fn json_caps_exceeded_walls() {
    let mut p = Plan::new();
    let walls: Vec<_> = (0..MAX_WALLS + 1).map(|i| wall(i, 0.0, i as f64, 10.0, i as f64)).collect();
    let v = json!({"walls": walls, "rooms": [], "unit": "cm", "wallHeight": 2700.0});
    assert!(!p.from_json_value(v.clone()), "expected failure on walls cap");
    assert_eq!(p.from_json_value_strict(v).unwrap_err().code(), "too_large");
    assert_eq!(p.wall_count(), 0);
}

#[test]
fn json_out_of_range_coordinates() {
    let v = json!({
        "walls": [wall(0, 1.0e38, 0.0, 0.0, 0.0), wall(1, 0.0, 0.0, 100.0, 0.0)],
        "rooms": [],
        "unit": "cm",
        "wallHeight": 2700.0
    });
    let mut lenient = Plan::new();
    assert!(lenient.from_json_value(v.clone()));
    assert_eq!(lenient.wall_count(), 1);
    assert!(lenient.get_wall(0).is_none());

    let mut strict = Plan::new();
    assert_eq!(strict.from_json_value_strict(v).unwrap_err().code(), "out_of_range");
}

#[test]
fn json_oversized_room_is_skipped() {
    let points: Vec<_> = (0..MAX_ROOM_POINTS + 1).map(|i| json!({"x": i as f64, "y": 0.0})).collect();
    let v = json!({"walls": [], "rooms": [{"id": 0, "points": points}], "unit": "cm", "wallHeight": 2700.0});
    let mut p = Plan::new();
    assert!(p.from_json_value(v.clone()));
    assert_eq!(p.rooms().count(), 0);
    assert_eq!(p.from_json_value_strict(v).unwrap_err().code(), "too_large");
}

#[test]
fn json_bad_wall_height_keeps_default() {
    let v = json!({"walls": [], "rooms": [], "unit": "cm", "wallHeight": -5.0});
    let mut p = Plan::new();
    assert!(p.from_json_value(v.clone()));
    assert_eq!(p.wall_height(), 2700.0);
    assert_eq!(p.from_json_value_strict(v).unwrap_err().code(), "out_of_range");
}

#[test]
fn add_wall_rejects_coordinates_past_the_bound() {
    let mut p = Plan::new();
    let far = floorplan::model::Point::new(COORD_MAX * 2.0, 0.0);
    let err = p.add_wall(floorplan::model::Point::ZERO, far, 100.0, 2700.0).unwrap_err();
    assert_eq!(err.code(), "out_of_range");
    let thick = p.add_wall(floorplan::model::Point::ZERO, floorplan::model::Point::new(1.0, 0.0), 1.0e9, 2700.0);
    assert_eq!(thick.unwrap_err().code(), "out_of_range");
}
