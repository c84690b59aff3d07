#![cfg(target_arch = "wasm32")]

use floorplan_wasm::FloorPlan;
use js_sys::{Array, Float64Array, Function, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_ok(v: &JsValue) -> bool {
    Reflect::get(v, &JsValue::from_str("ok")).ok().and_then(|x| x.as_bool()).unwrap_or(false)
}

fn value(v: &JsValue) -> JsValue {
    Reflect::get(v, &JsValue::from_str("value")).unwrap()
}

fn event(x: f64, y: f64) -> JsValue {
    let o = Object::new();
    Reflect::set(&o, &"clientX".into(), &x.into()).unwrap();
    Reflect::set(&o, &"clientY".into(), &y.into()).unwrap();
    o.into()
}

fn tool(name: &str) -> JsValue {
    let o = Object::new();
    Reflect::set(&o, &"tool".into(), &name.into()).unwrap();
    o.into()
}

fn click(fp: &mut FloorPlan, x: f64, y: f64) {
    fp.pointer_down(event(x, y));
    fp.pointer_up(event(x, y));
}

#[wasm_bindgen_test]
fn draws_walls_with_host_settings_and_reports_rooms() {
    let mut fp = FloorPlan::new();
    fp.set_viewport(0.0, 0.0, 800.0, 600.0);
    let thickness = Function::new_no_args("return 150;");
    let height = Function::new_no_args("return 2400;");
    fp.set_host(Some(thickness), Some(height));
    let log = Array::new();
    let push = Function::new_with_args("m", "this.push(m);").bind(&log);
    fp.set_notifier(None, Some(push));

    assert!(fp.set_tool(tool("drawWall")));
    for (x, y) in [(0.0, 0.0), (300.0, 0.0), (300.0, 200.0), (0.0, 200.0), (2.0, 2.0)] {
        click(&mut fp, x, y);
    }
    assert_eq!(fp.wall_count(), 4);
    let w = value(&fp.get_wall_res(0));
    assert_eq!(Reflect::get(&w, &"thickness".into()).unwrap().as_f64(), Some(150.0));
    assert_eq!(Reflect::get(&w, &"height".into()).unwrap().as_f64(), Some(2400.0));
    assert_eq!(log.length(), 1);
    assert_eq!(log.get(0).as_string().as_deref(), Some("Room detected: 6.00 m²"));
}

#[wasm_bindgen_test]
fn outline_split_and_round_trip() {
    let mut fp = FloorPlan::new();
    fp.set_viewport(0.0, 0.0, 800.0, 600.0);
    let pts = Float64Array::from(&[0.0, 0.0, 300.0, 0.0, 300.0, 300.0, 0.0, 300.0][..]);
    assert_eq!(value(&fp.set_outline_res(&pts)).as_f64(), Some(4.0));
    click(&mut fp, 150.0, 2.0);
    assert!(!fp.split_menu().is_null());
    let r = fp.split_at_menu_res();
    assert!(is_ok(&r));
    assert_eq!(Reflect::get(&value(&r), &"kind".into()).unwrap().as_string().as_deref(), Some("corner"));
    assert_eq!(fp.outline_points().length(), 10);

    let saved = value(&fp.save_project_res()).as_string().unwrap();
    let mut other = FloorPlan::new();
    assert!(is_ok(&other.load_project_res(&saved)));
    assert_eq!(other.wall_count(), 5);
    let paths = Reflect::get(&fp.render_paths(), &"paths".into()).unwrap();
    assert!(Array::from(&paths).length() > 0);
    assert!(fp.render_svg().starts_with("<svg"));
}

#[wasm_bindgen_test]
fn wheel_zoom_and_view() {
    let mut fp = FloorPlan::new();
    let s = fp.wheel(-1.0, 0.0, 0.0);
    assert!((s - 1.1).abs() < 1e-12);
    let v = fp.view();
    assert_eq!(Reflect::get(&v, &"scale".into()).unwrap().as_f64(), Some(s));
}

#[wasm_bindgen_test]
fn json_load_does_not_reannounce_loaded_room() {
    let mut small = FloorPlan::new();
    let pts = Float64Array::from(&[0.0, 0.0, 200.0, 0.0, 200.0, 200.0, 0.0, 200.0][..]);
    assert!(small.set_outline(&pts));
    let doc = small.to_json();

    let mut fp = FloorPlan::new();
    let log = Array::new();
    let push = Function::new_with_args("m", "this.push(m);").bind(&log);
    fp.set_notifier(None, Some(push));
    let big = Float64Array::from(&[0.0, 0.0, 300.0, 0.0, 300.0, 300.0, 0.0, 300.0][..]);
    assert!(fp.set_outline(&big));
    assert_eq!(log.length(), 1);
    assert!(fp.from_json(doc.clone()));
    fp.refresh_rooms();
    assert_eq!(log.length(), 1);

    assert!(fp.set_outline(&big));
    assert!(is_ok(&fp.from_json_res(doc)));
    fp.refresh_rooms();
    assert_eq!(log.length(), 2);
}
