use floorplan::PlanError;
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

#[inline]
pub fn invalid_points(len: u32) -> JsValue {
    let d = new_obj(); set_kv(&d, "len", &JsValue::from_f64(len as f64));
    err("invalid_points", "points must be flat [x, y] pairs", Some(d.into()))
}

/// Typed error object for a core error, `data` carrying its fields.
pub fn from_plan(e: &PlanError) -> JsValue {
    let d = new_obj();
    match e {
        PlanError::InvalidId { kind, id } => {
            set_kv(&d, "kind", &JsValue::from_str(kind));
            set_kv(&d, "id", &JsValue::from_f64(*id as f64));
        }
        PlanError::NonFinite(param) => set_kv(&d, "param", &JsValue::from_str(param)),
        PlanError::OutOfRange { param, min, max, got } => {
            set_kv(&d, "param", &JsValue::from_str(param));
            set_kv(&d, "min", &JsValue::from_f64(*min));
            set_kv(&d, "max", &JsValue::from_f64(*max));
            set_kv(&d, "got", &JsValue::from_f64(*got));
        }
        PlanError::DegenerateWall(id) => set_kv(&d, "wall", &JsValue::from_f64(*id as f64)),
        PlanError::TooLarge { what, limit } => {
            set_kv(&d, "what", &JsValue::from_str(what));
            set_kv(&d, "limit", &JsValue::from_f64(*limit as f64));
        }
        PlanError::Json(_) => return err(e.code(), e.to_string(), None),
    }
    err(e.code(), e.to_string(), Some(d.into()))
}
